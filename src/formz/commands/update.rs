use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Form;
use crate::store::{FormStore, StoreBackend};

/// Save handler of the edit route. A form that vanished while being edited is
/// not recreated; the caller only gets a warning.
pub fn run<B: StoreBackend>(store: &mut FormStore<B>, form: Form) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    if store.update_form(form.clone())? {
        result.add_message(CmdMessage::success(format!("Form updated: {}", form.title)));
        Ok(result.with_affected_forms(vec![form]))
    } else {
        result.add_message(CmdMessage::warning(format!(
            "Form {} no longer exists, nothing was saved",
            form.id
        )));
        Ok(result)
    }
}
