//! # Storage Layer
//!
//! [`FormStore`] is the single owner of the canonical forms and responses. It is
//! constructed once at startup and handed by reference to whatever needs it;
//! there is no global instance.
//!
//! ## Persistence
//!
//! Every mutation saves the *whole* state through a [`StoreBackend`]. A backend
//! only knows how to `load` and `save` a [`StoreState`]; the store owns all the
//! rules about how the state changes.
//!
//! - [`fs::FileBackend`]: production, one JSON file in the data directory
//! - [`memory::InMemoryBackend`]: testing, no persistence
//!
//! ## Storage Format
//!
//! ```text
//! <data dir>/
//! ├── form-storage.json   # { "forms": [...], "responses": [...] }
//! └── config.json         # FormzConfig
//! ```
//!
//! ## Atomicity
//!
//! A mutation builds the next state, saves it, and only then swaps it in. If the
//! save fails the in-memory state is untouched, so a reader never observes a
//! half-applied change.

use crate::error::Result;
use crate::model::{Form, FormResponse};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub mod fs;
pub mod memory;

/// Namespace key of the persisted slot.
pub const STORAGE_KEY: &str = "form-storage";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreState {
    #[serde(default)]
    pub forms: Vec<Form>,
    #[serde(default)]
    pub responses: Vec<FormResponse>,
}

impl StoreState {
    /// Gives untyped answers the shape of the field they answer.
    pub fn conform_answers(&mut self) {
        let forms = &self.forms;
        for response in &mut self.responses {
            let Some(form) = forms.iter().find(|f| f.id == response.form_id) else {
                continue;
            };
            response.answers = std::mem::take(&mut response.answers)
                .into_iter()
                .map(|(field_id, answer)| {
                    let answer = match form.field(&field_id) {
                        Some(field) => answer.conform(field.field_type),
                        None => answer,
                    };
                    (field_id, answer)
                })
                .collect();
        }
    }
}

/// Raw persistence of the store state.
pub trait StoreBackend {
    /// Read the persisted state. `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<StoreState>>;

    /// Replace the persisted state.
    fn save(&mut self, state: &StoreState) -> Result<()>;
}

pub struct FormStore<B: StoreBackend> {
    backend: B,
    state: StoreState,
}

impl<B: StoreBackend> FormStore<B> {
    /// Rehydrates from the backend. Missing or unreadable data yields empty
    /// collections rather than an error.
    pub fn open(backend: B) -> Self {
        let state = match backend.load() {
            Ok(Some(mut state)) => {
                state.conform_answers();
                debug!(
                    forms = state.forms.len(),
                    responses = state.responses.len(),
                    "loaded form store"
                );
                state
            }
            Ok(None) => {
                debug!("no persisted form store, starting empty");
                StoreState::default()
            }
            Err(e) => {
                warn!(error = %e, "could not read persisted form store, starting empty");
                StoreState::default()
            }
        };
        Self { backend, state }
    }

    pub fn forms(&self) -> &[Form] {
        &self.state.forms
    }

    pub fn responses(&self) -> &[FormResponse] {
        &self.state.responses
    }

    pub fn state(&self) -> &StoreState {
        &self.state
    }

    pub fn form(&self, id: &str) -> Option<&Form> {
        self.state.forms.iter().find(|f| f.id == id)
    }

    pub fn responses_for<'a>(
        &'a self,
        form_id: &'a str,
    ) -> impl Iterator<Item = &'a FormResponse> {
        self.state
            .responses
            .iter()
            .filter(move |r| r.form_id == form_id)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Appends a form. Ids are not checked for uniqueness.
    pub fn add_form(&mut self, form: Form) -> Result<()> {
        let mut next = self.state.clone();
        debug!(id = %form.id, "adding form");
        next.forms.push(form);
        self.commit(next)
    }

    /// Replaces the form with the same id. Returns `false`, leaving the store
    /// unchanged, when no such form exists.
    pub fn update_form(&mut self, form: Form) -> Result<bool> {
        let Some(pos) = self.state.forms.iter().position(|f| f.id == form.id) else {
            debug!(id = %form.id, "update of unknown form ignored");
            return Ok(false);
        };
        let mut next = self.state.clone();
        debug!(id = %form.id, "updating form");
        next.forms[pos] = form;
        self.commit(next)?;
        Ok(true)
    }

    /// Removes the form and every response submitted to it. Returns the number
    /// of responses removed.
    pub fn delete_form(&mut self, id: &str) -> Result<usize> {
        let mut next = self.state.clone();
        next.forms.retain(|f| f.id != id);
        let before = next.responses.len();
        next.responses.retain(|r| r.form_id != id);
        let removed = before - next.responses.len();
        debug!(id, responses = removed, "deleting form");
        self.commit(next)?;
        Ok(removed)
    }

    /// Appends a response. It is not checked against the form's fields.
    pub fn add_response(&mut self, response: FormResponse) -> Result<()> {
        let mut next = self.state.clone();
        debug!(id = %response.id, form = %response.form_id, "adding response");
        next.responses.push(response);
        self.commit(next)
    }

    fn commit(&mut self, next: StoreState) -> Result<()> {
        self.backend.save(&next)?;
        self.state = next;
        Ok(())
    }
}
