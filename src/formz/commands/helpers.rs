use crate::error::{FormzError, Result};
use crate::model::Form;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, Utc};

const FALLBACK_DATE_FORMAT: &str = "%Y-%m-%d";

/// Resolves a user reference to a form id. A reference is a 1-based list
/// position, a full id, or an unambiguous id prefix.
pub fn resolve_form(forms: &[Form], reference: &str) -> Result<String> {
    let reference = reference.trim();

    if let Some(form) = forms.iter().find(|f| f.id == reference) {
        return Ok(form.id.clone());
    }

    // All-digit references are positions only; ids may start with digits
    if !reference.is_empty() && reference.bytes().all(|b| b.is_ascii_digit()) {
        return reference
            .parse::<usize>()
            .ok()
            .and_then(|position| position.checked_sub(1))
            .and_then(|i| forms.get(i))
            .map(|form| form.id.clone())
            .ok_or_else(|| FormzError::FormNotFound(reference.to_string()));
    }

    if !reference.is_empty() {
        let matches: Vec<&Form> = forms
            .iter()
            .filter(|f| f.id.starts_with(reference))
            .collect();
        match matches.as_slice() {
            [only] => return Ok(only.id.clone()),
            [] => {}
            _ => {
                return Err(FormzError::Api(format!(
                    "'{}' matches {} forms, use a longer prefix",
                    reference,
                    matches.len()
                )))
            }
        }
    }

    Err(FormzError::FormNotFound(reference.to_string()))
}

/// Formats a timestamp in local time. An invalid format string falls back to
/// ISO dates instead of failing.
pub fn format_date(timestamp: DateTime<Utc>, format: &str) -> String {
    let items: Vec<Item> = StrftimeItems::new(format).collect();
    let local = timestamp.with_timezone(&Local);
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return local.format(FALLBACK_DATE_FORMAT).to_string();
    }
    local.format_with_items(items.iter()).to_string()
}
