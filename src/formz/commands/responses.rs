use crate::commands::CmdResult;
use crate::error::{FormzError, Result};
use crate::store::{FormStore, StoreBackend};

/// Responses collected by one form, oldest first.
pub fn run<B: StoreBackend>(store: &FormStore<B>, form_id: &str) -> Result<CmdResult> {
    let form = store
        .form(form_id)
        .cloned()
        .ok_or_else(|| FormzError::FormNotFound(form_id.to_string()))?;
    let responses = store.responses_for(form_id).cloned().collect();

    Ok(CmdResult::default()
        .with_affected_forms(vec![form])
        .with_responses(responses))
}
