use crate::commands::{CmdMessage, CmdResult};
use crate::config::FormzConfig;
use crate::error::Result;
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    match action {
        ConfigAction::ShowAll => {
            let config = FormzConfig::load(dir)?;
            Ok(CmdResult::default().with_config(config))
        }
        ConfigAction::ShowKey(key) => {
            let config = FormzConfig::load(dir)?;
            let mut result = CmdResult::default();
            match config.get(&key) {
                Some(val) => result.add_message(CmdMessage::info(val)),
                None => {
                    result.add_message(CmdMessage::error(format!("Unknown config key: {}", key)))
                }
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            let mut config = FormzConfig::load(dir)?;
            if let Err(e) = config.set(&key, &value) {
                let mut res = CmdResult::default();
                res.add_message(CmdMessage::error(e));
                return Ok(res);
            }
            config.save(dir)?;
            let display_val = config.get(&key).unwrap_or(value);
            let mut result = CmdResult::default().with_config(config);
            result.add_message(CmdMessage::success(format!("{} set to {}", key, display_val)));
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use tempfile::tempdir;

    #[test]
    fn set_persists_value() {
        let dir = tempdir().unwrap();
        let action = ConfigAction::Set("date-format".into(), "%d/%m".into());
        let result = run(dir.path(), action).unwrap();
        assert_eq!(result.config.unwrap().date_format, "%d/%m");

        let shown = run(dir.path(), ConfigAction::ShowKey("date-format".into())).unwrap();
        assert_eq!(shown.messages[0].content, "%d/%m");
    }

    #[test]
    fn unknown_key_reports_error_message() {
        let dir = tempdir().unwrap();
        let result = run(dir.path(), ConfigAction::Set("nope".into(), "1".into())).unwrap();
        assert!(matches!(result.messages[0].level, MessageLevel::Error));
        assert!(result.config.is_none());
    }

    #[test]
    fn show_all_returns_defaults() {
        let dir = tempdir().unwrap();
        let result = run(dir.path(), ConfigAction::ShowAll).unwrap();
        assert_eq!(result.config, Some(FormzConfig::default()));
    }
}
