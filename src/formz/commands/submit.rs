use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::FormResponse;
use crate::store::{FormStore, StoreBackend};

pub fn run<B: StoreBackend>(store: &mut FormStore<B>, response: FormResponse) -> Result<CmdResult> {
    let title = store
        .form(&response.form_id)
        .map(|f| f.title.clone())
        .unwrap_or_else(|| response.form_id.clone());
    store.add_response(response.clone())?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Response recorded for {}", title)));
    Ok(result.with_responses(vec![response]))
}
