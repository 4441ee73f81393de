//! JSON snapshot store - local durable storage as a single file

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::result::Result;
use crate::domain::AppState;
use crate::ports::SnapshotStore;

/// File-backed snapshot store.
///
/// The whole application state is one JSON document. Writes go through
/// a temp file and a rename, so a crash mid-write never leaves a
/// half-written snapshot behind.
pub struct JsonSnapshotStore {
    path: PathBuf,
}

impl JsonSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.as_os_str().to_owned();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

impl SnapshotStore for JsonSnapshotStore {
    fn load(&self) -> Result<Option<AppState>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&self.path)?;
        let state: AppState = serde_json::from_str(&data)?;
        Ok(Some(state))
    }

    fn save(&self, state: &AppState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(state)?;
        let tmp = self.tmp_path();
        let mut file = File::create(&tmp)?;
        file.write_all(json.as_bytes())?;
        file.flush()?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), "snapshot written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let store = JsonSnapshotStore::new(dir.path().join("state.json"));

        store.save(&seed::demo_state()).unwrap();
        let loaded = store.load().unwrap().unwrap();

        assert_eq!(loaded.accounts.len(), 3);
        assert_eq!(loaded.transactions.len(), 5);
        assert_eq!(loaded.accounts[0].id, "acc1");
        assert!(loaded.is_demo_mode);
    }

    #[test]
    fn test_missing_file_loads_none() {
        let dir = tempdir().unwrap();
        let store = JsonSnapshotStore::new(dir.path().join("state.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = JsonSnapshotStore::new(path);
        assert!(store.load().is_err());
    }

    #[test]
    fn test_save_replaces_previous_snapshot() {
        let dir = tempdir().unwrap();
        let store = JsonSnapshotStore::new(dir.path().join("state.json"));

        let mut state = seed::demo_state();
        store.save(&state).unwrap();
        state.transactions.clear();
        store.save(&state).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert!(loaded.transactions.is_empty());
    }
}
