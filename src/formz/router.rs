//! Navigation paths.
//!
//! ```text
//! /                        -> redirects to /forms
//! /forms                   list
//! /forms/new               builder, create mode
//! /forms/{id}/edit         builder, edit mode
//! /forms/{id}/preview      fill and submit
//! /forms/{id}/responses    collected responses
//! ```
//!
//! The router only maps paths to [`Route`]s; dispatching a route to a view is
//! the client's job.

use crate::error::{FormzError, Result};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Root,
    List,
    New,
    Edit(String),
    Preview(String),
    Responses(String),
}

impl Route {
    pub fn parse(path: &str) -> Result<Self> {
        let trimmed = path.trim();
        if !trimmed.starts_with('/') {
            return Err(FormzError::UnknownRoute(path.to_string()));
        }
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

        let route = match segments.as_slice() {
            [] => Route::Root,
            ["forms"] => Route::List,
            ["forms", "new"] => Route::New,
            ["forms", id, "edit"] => Route::Edit(id.to_string()),
            ["forms", id, "preview"] => Route::Preview(id.to_string()),
            ["forms", id, "responses"] => Route::Responses(id.to_string()),
            _ => return Err(FormzError::UnknownRoute(path.to_string())),
        };
        debug!(path, ?route, "parsed route");
        Ok(route)
    }

    pub fn path(&self) -> String {
        match self {
            Route::Root => "/".to_string(),
            Route::List => "/forms".to_string(),
            Route::New => "/forms/new".to_string(),
            Route::Edit(id) => format!("/forms/{}/edit", id),
            Route::Preview(id) => format!("/forms/{}/preview", id),
            Route::Responses(id) => format!("/forms/{}/responses", id),
        }
    }

    /// Follows redirects until a route that renders a view is reached.
    pub fn resolve(self) -> Self {
        match self {
            Route::Root => Route::List,
            other => other,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl FromStr for Route {
    type Err = FormzError;

    fn from_str(s: &str) -> Result<Self> {
        Route::parse(s)
    }
}
