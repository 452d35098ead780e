use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Generates a fresh identifier for forms, fields and responses.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Current time at millisecond precision, the resolution timestamps are stored with.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldType {
    Text,
    #[serde(alias = "radio")]
    SingleChoice,
    #[serde(alias = "checkbox")]
    MultiChoice,
}

impl FieldType {
    pub fn is_choice(self) -> bool {
        matches!(self, FieldType::SingleChoice | FieldType::MultiChoice)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::SingleChoice => "single-choice",
            FieldType::MultiChoice => "multi-choice",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(FieldType::Text),
            "single-choice" | "radio" => Ok(FieldType::SingleChoice),
            "multi-choice" | "checkbox" => Ok(FieldType::MultiChoice),
            other => Err(format!(
                "Unknown field type '{}' (expected text, single-choice or multi-choice)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub id: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    /// Only meaningful for choice fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl FormField {
    /// A blank field as the builder appends it: empty label, optional, and a
    /// single empty option for choice types.
    pub fn new(field_type: FieldType) -> Self {
        Self {
            id: new_id(),
            field_type,
            label: String::new(),
            required: false,
            options: field_type.is_choice().then(|| vec![String::new()]),
        }
    }

    pub fn options(&self) -> &[String] {
        self.options.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub fields: Vec<FormField>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl Form {
    pub fn new() -> Self {
        Self {
            id: new_id(),
            title: String::new(),
            description: String::new(),
            fields: Vec::new(),
            created_at: now(),
        }
    }

    pub fn field(&self, id: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.id == id)
    }
}

impl Default for Form {
    fn default() -> Self {
        Self::new()
    }
}

/// One answer in a response. The variant follows the field type it answers.
///
/// Besides its own tagged layout, an answer reads the untagged layout of
/// older data: a plain string or a list of strings. A plain string loads as
/// [`Answer::Text`] until [`Answer::conform`] sees the field it answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "kind",
    content = "value",
    rename_all = "kebab-case",
    from = "StoredAnswer"
)]
pub enum Answer {
    Text(String),
    Choice(String),
    MultiChoice(Vec<String>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredAnswer {
    Plain(String),
    List(Vec<String>),
    Tagged(TaggedAnswer),
}

#[derive(Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
enum TaggedAnswer {
    Text(String),
    Choice(String),
    MultiChoice(Vec<String>),
}

impl From<StoredAnswer> for Answer {
    fn from(stored: StoredAnswer) -> Self {
        match stored {
            StoredAnswer::Tagged(TaggedAnswer::Text(s)) | StoredAnswer::Plain(s) => {
                Answer::Text(s)
            }
            StoredAnswer::Tagged(TaggedAnswer::Choice(s)) => Answer::Choice(s),
            StoredAnswer::Tagged(TaggedAnswer::MultiChoice(items)) | StoredAnswer::List(items) => {
                Answer::MultiChoice(items)
            }
        }
    }
}

impl Answer {
    pub fn values(&self) -> Vec<&str> {
        match self {
            Answer::Text(s) | Answer::Choice(s) => vec![s.as_str()],
            Answer::MultiChoice(items) => items.iter().map(String::as_str).collect(),
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            Answer::Text(s) | Answer::Choice(s) => s.is_empty(),
            Answer::MultiChoice(items) => items.is_empty(),
        }
    }

    /// Reshapes an untyped answer to the field it answers: a lone string for a
    /// single-choice field is a choice.
    pub fn conform(self, field_type: FieldType) -> Self {
        match (self, field_type) {
            (Answer::Text(s), FieldType::SingleChoice) => Answer::Choice(s),
            (answer, _) => answer,
        }
    }

    /// Whether this answer has the shape a field of `field_type` produces.
    pub fn fits(&self, field_type: FieldType) -> bool {
        matches!(
            (self, field_type),
            (Answer::Text(_), FieldType::Text)
                | (Answer::Choice(_), FieldType::SingleChoice)
                | (Answer::MultiChoice(_), FieldType::MultiChoice)
        )
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.values().join(", "))
    }
}

pub type Answers = BTreeMap<String, Answer>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormResponse {
    pub id: String,
    pub form_id: String,
    #[serde(default)]
    pub answers: Answers,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub submitted_at: DateTime<Utc>,
}

impl FormResponse {
    pub fn new(form_id: impl Into<String>, answers: Answers) -> Self {
        Self {
            id: new_id(),
            form_id: form_id.into(),
            answers,
            submitted_at: now(),
        }
    }
}
