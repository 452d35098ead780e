use super::{StoreBackend, StoreState, STORAGE_KEY};
use crate::error::{FormzError, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Persists the whole store as `form-storage.json` inside a data directory.
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn data_file(&self) -> PathBuf {
        self.root.join(format!("{}.json", STORAGE_KEY))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(FormzError::Io)?;
        }
        Ok(())
    }
}

impl StoreBackend for FileBackend {
    fn load(&self) -> Result<Option<StoreState>> {
        let data_file = self.data_file();
        if !data_file.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&data_file).map_err(FormzError::Io)?;
        let value: Value = serde_json::from_str(&content).map_err(FormzError::Serialization)?;

        let value = unwrap_envelope(value);
        if value.as_object().is_some_and(|map| !has_collections(map)) {
            return Err(FormzError::Store(format!(
                "{} has neither forms nor responses",
                data_file.display()
            )));
        }
        let state: StoreState =
            serde_json::from_value(value).map_err(FormzError::Serialization)?;
        Ok(Some(state))
    }

    fn save(&mut self, state: &StoreState) -> Result<()> {
        self.ensure_dir()?;
        let content = serde_json::to_string_pretty(state).map_err(FormzError::Serialization)?;

        // Write then rename so the slot is never left half-written
        let data_file = self.data_file();
        let tmp_file = data_file.with_extension("json.tmp");
        fs::write(&tmp_file, content).map_err(FormzError::Io)?;
        fs::rename(&tmp_file, &data_file).map_err(FormzError::Io)?;
        Ok(())
    }
}

fn has_collections(map: &Map<String, Value>) -> bool {
    map.contains_key("forms") || map.contains_key("responses")
}

/// Older data nests the collections as `{ "state": {...}, "version": 0 }`.
fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map) if !has_collections(&map) && map.contains_key("state") => {
            debug!(version = ?map.get("version"), "reading enveloped form store");
            map.remove("state").unwrap_or_default()
        }
        other => other,
    }
}
