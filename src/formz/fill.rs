//! # Fill Session
//!
//! The model behind the preview screen: a read-only [`Form`] plus the answers
//! entered so far. Answers stay local until [`FillSession::submit`] turns them
//! into a [`FormResponse`].
//!
//! Answers are keyed by field id and shaped by field type:
//!
//! - text fields hold [`Answer::Text`]
//! - single-choice fields hold [`Answer::Choice`]
//! - multi-choice fields hold [`Answer::MultiChoice`], in the order options were checked

use crate::error::{FormzError, Result};
use crate::model::{Answer, Answers, FieldType, Form, FormField, FormResponse};

#[derive(Debug, Clone)]
pub struct FillSession {
    form: Form,
    answers: Answers,
}

impl FillSession {
    /// `None` when the form does not exist.
    pub fn open(forms: &[Form], id: &str) -> Option<Self> {
        forms.iter().find(|f| f.id == id).map(|f| Self::new(f.clone()))
    }

    pub fn new(form: Form) -> Self {
        Self {
            form,
            answers: Answers::new(),
        }
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn answer(&self, field_id: &str) -> Option<&Answer> {
        self.answers.get(field_id)
    }

    pub fn set_text(&mut self, field_id: &str, value: impl Into<String>) -> Result<()> {
        self.expect_type(field_id, FieldType::Text)?;
        self.answers
            .insert(field_id.to_string(), Answer::Text(value.into()));
        Ok(())
    }

    pub fn choose(&mut self, field_id: &str, option: impl Into<String>) -> Result<()> {
        self.expect_type(field_id, FieldType::SingleChoice)?;
        self.answers
            .insert(field_id.to_string(), Answer::Choice(option.into()));
        Ok(())
    }

    /// Checking appends the option unless already present; unchecking removes it.
    pub fn toggle(&mut self, field_id: &str, option: &str, checked: bool) -> Result<()> {
        self.expect_type(field_id, FieldType::MultiChoice)?;
        let entry = self
            .answers
            .entry(field_id.to_string())
            .or_insert_with(|| Answer::MultiChoice(Vec::new()));
        if let Answer::MultiChoice(selected) = entry {
            if checked {
                if !selected.iter().any(|s| s == option) {
                    selected.push(option.to_string());
                }
            } else {
                selected.retain(|s| s != option);
            }
        }
        Ok(())
    }

    /// Required text and single-choice fields without an answer. Multi-choice
    /// fields have no minimum selection.
    pub fn missing_required(&self) -> Vec<&FormField> {
        self.form
            .fields
            .iter()
            .filter(|f| f.required && f.field_type != FieldType::MultiChoice)
            .filter(|f| self.answers.get(&f.id).map_or(true, Answer::is_blank))
            .collect()
    }

    pub fn submit(self) -> Result<FormResponse> {
        let missing = self.missing_required();
        if !missing.is_empty() {
            let labels: Vec<&str> = missing.iter().map(|f| f.label.as_str()).collect();
            return Err(FormzError::Validation(format!(
                "Please answer the required questions: {}",
                labels.join(", ")
            )));
        }
        Ok(FormResponse::new(self.form.id, self.answers))
    }

    fn expect_type(&self, field_id: &str, expected: FieldType) -> Result<()> {
        let field = self.form.field(field_id).ok_or_else(|| {
            FormzError::Api(format!("Form has no field with id {}", field_id))
        })?;
        if field.field_type != expected {
            return Err(FormzError::Api(format!(
                "'{}' is a {} field, not {}",
                field.label, field.field_type, expected
            )));
        }
        Ok(())
    }
}
