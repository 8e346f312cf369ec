//! JSON checkpoints of accumulated tallies.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write {path:?}: {source}")]
    Io {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to serialize state for {path:?}: {source}")]
    Serialize {
        #[source]
        source: serde_json::Error,
        path: PathBuf,
    },
}

/// Loads prior state, falling back to an empty value when the file is absent or unreadable.
pub fn load_or_default<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no prior state, starting empty");
            return T::default();
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "prior state unreadable, starting empty");
            return T::default();
        }
    };

    match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "prior state corrupt, starting empty");
            T::default()
        }
    }
}

/// Overwrites `path` with `value`. Writes a sibling temp file first so an
/// interrupted run never leaves a truncated checkpoint.
pub fn save<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let io_err = |source| StoreError::Io {
        source,
        path: path.to_path_buf(),
    };

    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(io_err)?;
    }

    let json = serde_json::to_string_pretty(value).map_err(|source| StoreError::Serialize {
        source,
        path: path.to_path_buf(),
    })?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, json).map_err(io_err)?;
    fs::rename(&tmp, path).map_err(io_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use spades_core::tally::{NilGrid, NilTally};

    #[test]
    fn missing_file_yields_empty_state() {
        let dir = tempfile::tempdir().expect("temp dir");
        let grid: NilGrid = load_or_default(&dir.path().join("absent.json"));
        assert!(grid.is_empty());
    }

    #[test]
    fn corrupt_file_yields_empty_state() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("state.json");
        fs::write(&path, "{ not json").expect("write");
        let grid: NilGrid = load_or_default(&path);
        assert!(grid.is_empty());
    }

    #[test]
    fn save_then_load_restores_counts() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("state.json");
        let mut grid = NilGrid::new();
        grid.add(
            "JH,KH",
            &NilTally {
                iterations: 12,
                covered: 7,
            },
        );

        save(&path, &grid).expect("save");
        let loaded: NilGrid = load_or_default(&path);
        assert_eq!(loaded, grid);
        assert!(!dir.path().join("nested").join("state.json.tmp").exists());
    }
}
