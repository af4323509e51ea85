//! Directory-backed side-store.
//!
//! Each key lives in its own file, `<dir>/<key>.json`. Writes go to a
//! temporary sibling first and are renamed into place, so a crash mid-write
//! leaves the previous value intact.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{SideStore, SideStoreError};

/// Side-store persisting each key as a file in a data directory.
#[derive(Debug, Clone)]
pub struct FileSideStore {
    dir: PathBuf,
}

impl FileSideStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `SideStoreError::DataDir` if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, SideStoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| SideStoreError::DataDir {
            path: dir.clone(),
            source,
        })?;
        tracing::debug!(dir = %dir.display(), "Opened file side-store");
        Ok(Self { dir })
    }

    /// Directory holding the key files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, SideStoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(SideStoreError::InvalidKey(key.to_owned()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl SideStore for FileSideStore {
    fn get(&self, key: &str) -> Result<Option<String>, SideStoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(SideStoreError::Io {
                key: key.to_owned(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SideStoreError> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");
        let io_err = |source| SideStoreError::Io {
            key: key.to_owned(),
            source,
        };

        fs::write(&tmp, value).map_err(io_err)?;
        fs::rename(&tmp, &path).map_err(io_err)
    }

    fn remove(&mut self, key: &str) -> Result<(), SideStoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(SideStoreError::Io {
                key: key.to_owned(),
                source,
            }),
        }
    }
}
