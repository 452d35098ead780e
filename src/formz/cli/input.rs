//! Turns command-line edit and answer arguments into builder and fill-session
//! operations. Positions on the command line are 1-based.

use super::setup::{AnswerArgs, BuilderArgs};
use formz::builder::Builder;
use formz::error::{FormzError, Result};
use formz::fill::FillSession;
use formz::model::{FieldType, FormField};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub field_type: FieldType,
    pub required: bool,
    pub label: String,
    pub options: Vec<String>,
}

/// Parses `KIND[*]:LABEL[:OPT1,OPT2]`.
pub fn parse_field_spec(spec: &str) -> Result<FieldSpec> {
    let mut parts = spec.splitn(3, ':');
    let kind = parts.next().unwrap_or_default().trim();
    let label = parts
        .next()
        .ok_or_else(|| invalid(spec, "expected KIND:LABEL"))?
        .trim();

    let (kind, required) = match kind.strip_suffix('*') {
        Some(k) => (k, true),
        None => (kind, false),
    };
    let field_type: FieldType = kind.parse().map_err(FormzError::Validation)?;

    let options: Vec<String> = parts
        .next()
        .map(|opts| opts.split(',').map(|o| o.trim().to_string()).collect())
        .unwrap_or_default();
    if !options.is_empty() && !field_type.is_choice() {
        return Err(invalid(spec, "text fields take no options"));
    }

    Ok(FieldSpec {
        field_type,
        required,
        label: label.to_string(),
        options,
    })
}

/// Parses `N=VALUE` into a 0-based position and the value.
pub fn parse_assignment(arg: &str) -> Result<(usize, String)> {
    let (pos, value) = arg
        .split_once('=')
        .ok_or_else(|| invalid(arg, "expected N=VALUE"))?;
    Ok((parse_position(pos)?, value.to_string()))
}

/// Parses `N.O=TEXT` into 0-based field and option positions and the text.
pub fn parse_option_assignment(arg: &str) -> Result<(usize, usize, String)> {
    let (target, value) = arg
        .split_once('=')
        .ok_or_else(|| invalid(arg, "expected N.O=TEXT"))?;
    let (field, option) = target
        .split_once('.')
        .ok_or_else(|| invalid(arg, "expected N.O=TEXT"))?;
    Ok((parse_position(field)?, parse_position(option)?, value.to_string()))
}

pub fn parse_position(s: &str) -> Result<usize> {
    s.trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .ok_or_else(|| invalid(s, "positions start at 1"))
}

fn to_index(n: usize) -> Result<usize> {
    n.checked_sub(1)
        .ok_or_else(|| FormzError::Validation("Positions start at 1".to_string()))
}

fn invalid(input: &str, why: &str) -> FormzError {
    FormzError::Validation(format!("Invalid argument '{}': {}", input, why))
}

/// Applies the edits in a fixed order: form text, changes to existing fields,
/// new fields, then removals from the highest position down.
pub fn apply_builder_args(builder: &mut Builder, args: &BuilderArgs) -> Result<()> {
    if let Some(title) = &args.title {
        builder.set_title(title.clone());
    }
    if let Some(description) = &args.description {
        builder.set_description(description.clone());
    }

    for arg in &args.labels {
        let (index, label) = parse_assignment(arg)?;
        builder.set_label(index, label)?;
    }
    for &n in &args.require {
        builder.set_required(to_index(n)?, true)?;
    }
    for &n in &args.optional {
        builder.set_required(to_index(n)?, false)?;
    }
    for arg in &args.add_options {
        let (index, text) = parse_assignment(arg)?;
        let option = builder.add_option(index)?;
        builder.set_option(index, option, text)?;
    }
    for arg in &args.set_options {
        let (index, option, text) = parse_option_assignment(arg)?;
        builder.set_option(index, option, text)?;
    }

    for spec in &args.fields {
        add_field(builder, &parse_field_spec(spec)?)?;
    }

    let mut removals = args
        .remove
        .iter()
        .map(|&n| to_index(n))
        .collect::<Result<Vec<_>>>()?;
    removals.sort_unstable_by(|a, b| b.cmp(a));
    removals.dedup();
    for index in removals {
        builder.remove_field(index)?;
    }
    Ok(())
}

fn add_field(builder: &mut Builder, spec: &FieldSpec) -> Result<()> {
    let index = builder.add_field(spec.field_type);
    builder.set_label(index, spec.label.clone())?;
    builder.set_required(index, spec.required)?;
    for (i, option) in spec.options.iter().enumerate() {
        // A new choice field starts with one empty option
        let slot = if i == 0 { 0 } else { builder.add_option(index)? };
        builder.set_option(index, slot, option.clone())?;
    }
    Ok(())
}

/// Finds the option a user meant: exact text, case-insensitive text, or its
/// 1-based number.
pub fn match_option(field: &FormField, token: &str) -> Option<String> {
    let token = token.trim();
    let options = field.options();
    if let Some(o) = options.iter().find(|o| o.as_str() == token) {
        return Some(o.clone());
    }
    if let Some(o) = options.iter().find(|o| o.eq_ignore_ascii_case(token)) {
        return Some(o.clone());
    }
    token
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| options.get(i))
        .cloned()
}

/// Applies one raw answer to a field, according to the field's type.
pub fn answer_field(session: &mut FillSession, field: &FormField, raw: &str) -> Result<()> {
    match field.field_type {
        FieldType::Text => session.set_text(&field.id, raw),
        FieldType::SingleChoice => {
            let option = match_option(field, raw).ok_or_else(|| no_option(field, raw))?;
            session.choose(&field.id, option)
        }
        FieldType::MultiChoice => {
            for token in raw.split(',').filter(|t| !t.trim().is_empty()) {
                let option = match_option(field, token).ok_or_else(|| no_option(field, token))?;
                let checked = session
                    .answer(&field.id)
                    .is_some_and(|a| a.values().contains(&option.as_str()));
                session.toggle(&field.id, &option, !checked)?;
            }
            Ok(())
        }
    }
}

fn no_option(field: &FormField, token: &str) -> FormzError {
    FormzError::Validation(format!(
        "'{}' is not an option of '{}' (choose from: {})",
        token.trim(),
        field.label,
        field.options().join(", ")
    ))
}

pub fn apply_answer_args(session: &mut FillSession, args: &AnswerArgs) -> Result<()> {
    for arg in &args.answers {
        let (index, value) = parse_assignment(arg)?;
        let field = session
            .form()
            .fields
            .get(index)
            .cloned()
            .ok_or_else(|| FormzError::Validation(format!("No field at position {}", index + 1)))?;
        answer_field(session, &field, &value)?;
    }
    Ok(())
}
