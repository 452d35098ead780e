use crate::commands::helpers::format_date;
use crate::commands::{CmdResult, FormSummary};
use crate::config::FormzConfig;
use crate::error::Result;
use crate::store::{FormStore, StoreBackend};

pub fn run<B: StoreBackend>(store: &FormStore<B>, config: &FormzConfig) -> Result<CmdResult> {
    let listed = store
        .forms()
        .iter()
        .enumerate()
        .map(|(i, form)| FormSummary {
            position: i + 1,
            field_count: form.fields.len(),
            response_count: store.responses_for(&form.id).count(),
            created: format_date(form.created_at, &config.date_format),
            form: form.clone(),
        })
        .collect();

    Ok(CmdResult::default().with_listed_forms(listed))
}
