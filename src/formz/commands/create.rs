use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Form;
use crate::store::{FormStore, StoreBackend};

/// Save handler of the create route.
pub fn run<B: StoreBackend>(store: &mut FormStore<B>, form: Form) -> Result<CmdResult> {
    store.add_form(form.clone())?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Form created: {} ({} questions)",
        form.title,
        form.fields.len()
    )));
    Ok(result.with_affected_forms(vec![form]))
}
