use super::styles::STYLES;
use chrono::{DateTime, Utc};
use colored::Colorize;
use formz::api::{CmdMessage, FormSummary, MessageLevel};
use formz::commands::helpers::format_date;
use formz::model::{FieldType, Form, FormField, FormResponse};
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const RESPONSE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn render_form_list(forms: &[FormSummary], show_responses: bool) -> String {
    if forms.is_empty() {
        return "No forms yet. Create one with: formz new --title <TITLE>\n".to_string();
    }

    let mut out = String::new();
    for summary in forms {
        let idx_str = format!("{}. ", summary.position);
        let mut meta = format!(
            "{} {}",
            summary.field_count,
            plural(summary.field_count, "question", "questions")
        );
        if show_responses {
            meta.push_str(&format!(
                "  {} {}",
                summary.response_count,
                plural(summary.response_count, "response", "responses")
            ));
        }
        meta.push_str(&format!("  {}", summary.created));

        let time_ago = format_time_ago(summary.form.created_at);
        let fixed_width = 2 + idx_str.width() + meta.width() + 2 + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let title = truncate_to_width(&summary.form.title, available);
        let padding = available.saturating_sub(title.width());

        out.push_str(&format!(
            "  {}{}{}  {}{}\n",
            STYLES.position.apply_to(&idx_str),
            STYLES.title.apply_to(&title),
            " ".repeat(padding),
            STYLES.meta.apply_to(&meta),
            STYLES.time.apply_to(time_ago)
        ));

        let first_line = summary
            .form
            .description
            .lines()
            .find(|l| !l.trim().is_empty());
        if let Some(first_line) = first_line {
            let indent = 2 + idx_str.width();
            let desc = truncate_to_width(first_line.trim(), LINE_WIDTH.saturating_sub(indent));
            out.push_str(&format!(
                "{}{}\n",
                " ".repeat(indent),
                STYLES.meta.apply_to(desc)
            ));
        }
    }
    out
}

/// One question as the builder and the fill view show it.
pub(super) fn render_field(position: usize, field: &FormField) -> String {
    let label = if field.label.is_empty() {
        "(untitled question)"
    } else {
        field.label.as_str()
    };
    let marker = if field.required {
        format!(" {}", STYLES.required.apply_to("*"))
    } else {
        String::new()
    };

    let mut out = format!(
        "{}. {}{}  {}\n",
        position,
        label,
        marker,
        STYLES.kind.apply_to(format!("[{}]", field.field_type))
    );
    for (i, option) in field.options().iter().enumerate() {
        let bullet = match field.field_type {
            FieldType::MultiChoice => "[ ]",
            _ => "( )",
        };
        let text = if option.is_empty() { "(empty option)" } else { option.as_str() };
        out.push_str(&format!("   {} {}) {}\n", bullet, i + 1, text));
    }
    out
}

pub(super) fn render_form(form: &Form) -> String {
    let mut out = format!("{}\n", STYLES.title.apply_to(&form.title));
    if !form.description.is_empty() {
        out.push_str(&format!("{}\n", form.description));
    }
    out.push_str(&format!("{}\n", STYLES.meta.apply_to(format!("id {}", form.id))));
    for (i, field) in form.fields.iter().enumerate() {
        out.push('\n');
        out.push_str(&render_field(i + 1, field));
    }
    out
}

pub(super) fn render_responses(form: &Form, responses: &[FormResponse]) -> String {
    let mut out = format!(
        "{}  {}\n",
        STYLES.title.apply_to(&form.title),
        STYLES.meta.apply_to(format!(
            "{} {}",
            responses.len(),
            plural(responses.len(), "response", "responses")
        ))
    );
    if responses.is_empty() {
        out.push_str("No responses yet.\n");
        return out;
    }

    for (i, response) in responses.iter().enumerate() {
        out.push_str(&format!(
            "\n{} {}  {}\n",
            STYLES.position.apply_to(format!("#{}", i + 1)),
            format_date(response.submitted_at, RESPONSE_DATE_FORMAT),
            STYLES.time.apply_to(format_time_ago(response.submitted_at).trim())
        ));

        // Answers follow the form's field order; answers to fields removed
        // since submission come last, labelled by field id.
        for field in &form.fields {
            if let Some(answer) = response.answers.get(&field.id) {
                out.push_str(&format!("   {}: {}\n", field.label, answer));
            }
        }
        for (field_id, answer) in &response.answers {
            if form.field(field_id).is_none() {
                out.push_str(&format!(
                    "   {}: {}\n",
                    STYLES.meta.apply_to(field_id),
                    answer
                ));
            }
        }
    }
    out
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 {
        one
    } else {
        many
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use formz::model::{Answer, Answers};

    fn form_with_fields() -> Form {
        let mut form = Form::new();
        form.title = "Survey".into();
        form.fields = vec![
            FormField {
                id: "q1".into(),
                field_type: FieldType::Text,
                label: "Name".into(),
                required: true,
                options: None,
            },
            FormField {
                id: "q2".into(),
                field_type: FieldType::MultiChoice,
                label: "Extras".into(),
                required: false,
                options: Some(vec!["A".into(), String::new()]),
            },
        ];
        form
    }

    fn summary(form: Form, fields: usize, responses: usize) -> FormSummary {
        console::set_colors_enabled(false);
        FormSummary {
            position: 1,
            form,
            field_count: fields,
            response_count: responses,
            created: "2024-06-15".into(),
        }
    }

    #[test]
    fn empty_list_has_hint() {
        assert!(render_form_list(&[], true).contains("No forms yet"));
    }

    #[test]
    fn list_row_shows_counts_and_date() {
        let mut form = form_with_fields();
        form.description = "\nAbout you".into();
        let out = render_form_list(&[summary(form, 2, 1)], true);
        assert!(out.contains("1. Survey"));
        assert!(out.contains("2 questions  1 response  2024-06-15"));
        assert!(out.contains("About you"));
    }

    #[test]
    fn list_can_hide_response_counts() {
        let out = render_form_list(&[summary(form_with_fields(), 1, 4)], false);
        assert!(out.contains("1 question  2024-06-15"));
        assert!(!out.contains("responses"));
    }

    #[test]
    fn long_titles_are_truncated() {
        let mut form = form_with_fields();
        form.title = "x".repeat(200);
        let out = render_form_list(&[summary(form, 0, 0)], true);
        assert!(out.contains('…'));
        assert!(!out.contains(&"x".repeat(100)));
    }

    #[test]
    fn renders_fields_with_options() {
        let form = form_with_fields();
        let out = render_form(&form);
        assert!(out.contains("1. Name"));
        assert!(out.contains("[text]"));
        assert!(out.contains("[ ] 1) A"));
        assert!(out.contains("(empty option)"));
    }

    #[test]
    fn responses_follow_field_order() {
        let form = form_with_fields();
        let mut answers = Answers::new();
        answers.insert("q2".into(), Answer::MultiChoice(vec!["A".into()]));
        answers.insert("q1".into(), Answer::Text("Ada".into()));
        answers.insert("gone".into(), Answer::Text("old".into()));
        let response = FormResponse::new(form.id.clone(), answers);

        let out = render_responses(&form, &[response]);
        let name = out.find("Name: Ada").unwrap();
        let extras = out.find("Extras: A").unwrap();
        let gone = out.find("gone").unwrap();
        assert!(name < extras && extras < gone);
        assert!(out.contains("1 response"));
    }

    #[test]
    fn no_responses_message() {
        let out = render_responses(&form_with_fields(), &[]);
        assert!(out.contains("No responses yet."));
    }
}
