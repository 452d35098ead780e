use crate::config::FormzConfig;
use crate::model::{Form, FormResponse};

pub mod config;
pub mod create;
pub mod delete;
pub mod helpers;
pub mod list;
pub mod responses;
pub mod submit;
pub mod update;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// One row of the form list.
#[derive(Debug, Clone)]
pub struct FormSummary {
    /// 1-based position in the list
    pub position: usize,
    pub form: Form,
    pub field_count: usize,
    pub response_count: usize,
    /// Creation date rendered with the configured date format
    pub created: String,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_forms: Vec<Form>,
    pub listed_forms: Vec<FormSummary>,
    pub responses: Vec<FormResponse>,
    pub config: Option<FormzConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_forms(mut self, forms: Vec<Form>) -> Self {
        self.affected_forms = forms;
        self
    }

    pub fn with_listed_forms(mut self, forms: Vec<FormSummary>) -> Self {
        self.listed_forms = forms;
        self
    }

    pub fn with_responses(mut self, responses: Vec<FormResponse>) -> Self {
        self.responses = responses;
        self
    }

    pub fn with_config(mut self, config: FormzConfig) -> Self {
        self.config = Some(config);
        self
    }
}
