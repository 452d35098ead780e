use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{FormStore, StoreBackend};

/// Deletes a form and its responses. No confirmation step.
pub fn run<B: StoreBackend>(store: &mut FormStore<B>, id: &str) -> Result<CmdResult> {
    let form = store.form(id).cloned();
    let removed = store.delete_form(id)?;

    let mut result = CmdResult::default();
    match form {
        Some(form) => {
            result.add_message(CmdMessage::success(format!(
                "Form deleted: {} ({} responses removed)",
                form.title, removed
            )));
            Ok(result.with_affected_forms(vec![form]))
        }
        None => {
            result.add_message(CmdMessage::warning(format!("No form with id {}", id)));
            Ok(result)
        }
    }
}
