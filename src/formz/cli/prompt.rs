//! Interactive filling: asks each question in order on any reader/writer pair.

use super::input::{answer_field, match_option};
use super::print::render_field;
use formz::error::Result;
use formz::fill::FillSession;
use formz::model::{FieldType, FormField};
use std::io::{BufRead, Write};

/// Prompts for every field. Input ending early stops prompting; the
/// required-answer check on submit still applies.
pub fn fill_interactively<R: BufRead, W: Write>(
    session: &mut FillSession,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    let fields = session.form().fields.clone();

    for (i, field) in fields.iter().enumerate() {
        writeln!(out)?;
        write!(out, "{}", render_field(i + 1, field))?;
        loop {
            write!(out, "{}", hint(field))?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                return Ok(());
            }
            let raw = line.trim();

            if raw.is_empty() {
                if field.required && field.field_type != FieldType::MultiChoice {
                    writeln!(out, "This question is required.")?;
                    continue;
                }
                break;
            }

            if let Some(bad) = unknown_token(field, raw) {
                writeln!(out, "'{}' is not one of the options.", bad)?;
                continue;
            }
            answer_field(session, field, raw)?;
            break;
        }
    }
    Ok(())
}

fn hint(field: &FormField) -> &'static str {
    match field.field_type {
        FieldType::Text => "> ",
        FieldType::SingleChoice => "choose one> ",
        FieldType::MultiChoice => "choose any, comma separated> ",
    }
}

fn unknown_token<'a>(field: &FormField, raw: &'a str) -> Option<&'a str> {
    match field.field_type {
        FieldType::Text => None,
        FieldType::SingleChoice => match_option(field, raw).is_none().then_some(raw),
        FieldType::MultiChoice => raw
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .find(|t| match_option(field, t).is_none()),
    }
}
