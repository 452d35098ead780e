//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the view
//! models. Every client (the CLI today) goes through it.
//!
//! ## Role and Responsibilities
//!
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs**: user references (list positions, id prefixes) become form ids
//! - **Opens views**: hands out [`Builder`]s and [`FillSession`]s over the current forms
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no I/O of its own beyond what the store and config do, and never
//! formats output.
//!
//! ## Generic Over StoreBackend
//!
//! `FormzApi<B: StoreBackend>`:
//! - Production: `FormzApi<FileBackend>`
//! - Testing: `FormzApi<InMemoryBackend>`

use crate::builder::{Builder, BuilderEntry};
use crate::commands::{self, helpers::resolve_form};
use crate::config::FormzConfig;
use crate::error::{FormzError, Result};
use crate::fill::FillSession;
use crate::model::{Form, FormResponse};
use crate::store::{FormStore, StoreBackend};
use std::path::{Path, PathBuf};

pub struct FormzApi<B: StoreBackend> {
    store: FormStore<B>,
    data_dir: PathBuf,
}

impl<B: StoreBackend> FormzApi<B> {
    pub fn new(store: FormStore<B>, data_dir: PathBuf) -> Self {
        Self { store, data_dir }
    }

    pub fn store(&self) -> &FormStore<B> {
        &self.store
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn load_config(&self) -> Result<FormzConfig> {
        FormzConfig::load(&self.data_dir)
    }

    pub fn list_forms(&self) -> Result<commands::CmdResult> {
        let config = self.load_config()?;
        commands::list::run(&self.store, &config)
    }

    /// Resolves a list position, id or id prefix to a form id.
    pub fn resolve(&self, reference: &str) -> Result<String> {
        resolve_form(self.store.forms(), reference)
    }

    /// Create mode for `None`, edit mode otherwise. A reference that matches
    /// no form redirects to the list.
    pub fn open_builder(&self, reference: Option<&str>) -> Result<BuilderEntry> {
        let id = match reference {
            Some(r) => Some(self.resolve_or_raw(r)?),
            None => None,
        };
        Ok(Builder::open(self.store.forms(), id.as_deref()))
    }

    /// `None` when the form does not exist.
    pub fn open_fill(&self, reference: &str) -> Result<Option<FillSession>> {
        let id = self.resolve_or_raw(reference)?;
        Ok(FillSession::open(self.store.forms(), &id))
    }

    pub fn create_form(&mut self, form: Form) -> Result<commands::CmdResult> {
        commands::create::run(&mut self.store, form)
    }

    pub fn update_form(&mut self, form: Form) -> Result<commands::CmdResult> {
        commands::update::run(&mut self.store, form)
    }

    pub fn delete_form(&mut self, reference: &str) -> Result<commands::CmdResult> {
        let id = self.resolve_or_raw(reference)?;
        commands::delete::run(&mut self.store, &id)
    }

    pub fn submit_response(&mut self, response: FormResponse) -> Result<commands::CmdResult> {
        commands::submit::run(&mut self.store, response)
    }

    pub fn responses(&self, reference: &str) -> Result<commands::CmdResult> {
        let id = self.resolve_or_raw(reference)?;
        commands::responses::run(&self.store, &id)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.data_dir, action)
    }

    fn resolve_or_raw(&self, reference: &str) -> Result<String> {
        match self.resolve(reference) {
            Ok(id) => Ok(id),
            Err(FormzError::FormNotFound(_)) => Ok(reference.to_string()),
            Err(e) => Err(e),
        }
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, FormSummary, MessageLevel};
