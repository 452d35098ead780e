use super::{StoreBackend, StoreState};
use crate::error::{FormzError, Result};

/// In-memory backend for testing and development.
/// Does NOT persist data.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    state: Option<StoreState>,
    corrupt: bool,
    fail_saves: bool,
    saves: usize,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: StoreState) -> Self {
        Self {
            state: Some(state),
            ..Self::default()
        }
    }

    /// A backend whose persisted slot cannot be read.
    pub fn corrupt() -> Self {
        Self {
            corrupt: true,
            ..Self::default()
        }
    }

    pub fn failing_saves(mut self) -> Self {
        self.fail_saves = true;
        self
    }

    pub fn saved(&self) -> Option<&StoreState> {
        self.state.as_ref()
    }

    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl StoreBackend for InMemoryBackend {
    fn load(&self) -> Result<Option<StoreState>> {
        if self.corrupt {
            return Err(FormzError::Store("persisted state is corrupt".to_string()));
        }
        Ok(self.state.clone())
    }

    fn save(&mut self, state: &StoreState) -> Result<()> {
        if self.fail_saves {
            return Err(FormzError::Store("save rejected".to_string()));
        }
        self.state = Some(state.clone());
        self.saves += 1;
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{Answers, FieldType, Form, FormField, FormResponse};
    use crate::store::FormStore;
    use chrono::{TimeZone, Utc};

    pub fn form(id: &str, title: &str) -> Form {
        Form {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            fields: Vec::new(),
            created_at: Utc.timestamp_millis_opt(1000).unwrap(),
        }
    }

    pub fn field(id: &str, field_type: FieldType, label: &str, options: &[&str]) -> FormField {
        FormField {
            id: id.to_string(),
            field_type,
            label: label.to_string(),
            required: false,
            options: field_type
                .is_choice()
                .then(|| options.iter().map(|o| o.to_string()).collect()),
        }
    }

    pub fn response(id: &str, form_id: &str) -> FormResponse {
        FormResponse {
            id: id.to_string(),
            form_id: form_id.to_string(),
            answers: Answers::new(),
            submitted_at: Utc.timestamp_millis_opt(2000).unwrap(),
        }
    }

    /// A form with one field of each type: a required text question, a
    /// single-choice and a multi-choice question.
    pub fn survey(id: &str) -> Form {
        let mut name = field("name", FieldType::Text, "Your name", &[]);
        name.required = true;
        Form {
            fields: vec![
                name,
                field("color", FieldType::SingleChoice, "Favourite colour", &["Red", "Blue"]),
                field("extras", FieldType::MultiChoice, "Extras", &["A", "B", "C"]),
            ],
            ..form(id, "Survey")
        }
    }

    pub struct StoreFixture {
        pub store: FormStore<InMemoryBackend>,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: FormStore::open(InMemoryBackend::new()),
            }
        }

        pub fn with_form(mut self, form: Form) -> Self {
            self.store.add_form(form).unwrap();
            self
        }

        pub fn with_forms(mut self, count: usize) -> Self {
            for i in 0..count {
                let f = form(&format!("form-{}", i + 1), &format!("Form {}", i + 1));
                self.store.add_form(f).unwrap();
            }
            self
        }

        pub fn with_response(mut self, id: &str, form_id: &str) -> Self {
            self.store.add_response(response(id, form_id)).unwrap();
            self
        }
    }
}
