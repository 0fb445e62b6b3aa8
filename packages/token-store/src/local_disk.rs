use std::{fs, io, path};

use lazy_static::lazy_static;
use regex::Regex;

use crate::{Error, TokenStore};

/// A token store that keeps one JSON-encoded file per key.
///
/// Each key maps to `<root>/<key>.json`. Tokens survive process restarts,
/// which makes this the counterpart of a browser's local storage for
/// command-line tools.
#[derive(Debug, Clone)]
pub struct LocalDiskTokenStore {
    root: path::PathBuf,
}

impl LocalDiskTokenStore {
    /// Open a store rooted at an existing, writable directory.
    pub fn new(root: path::PathBuf) -> Result<LocalDiskTokenStore, Error> {
        let attr = fs::metadata(&root).map_err(|error| Error::RootPathInvalid {
            path: root.clone(),
            error,
        })?;

        if !attr.is_dir() {
            return Err(Error::RootPathInvalid {
                path: root,
                error: io::Error::other("Root path must be a directory."),
            });
        }

        if attr.permissions().readonly() {
            return Err(Error::RootPathInvalid {
                path: root,
                error: io::Error::other("Root directory must be writable"),
            });
        }

        match root.canonicalize() {
            Ok(root) => Ok(LocalDiskTokenStore { root }),
            Err(error) => Err(Error::RootPathInvalid { path: root, error }),
        }
    }

    /// Open a store, creating the root directory first if needed.
    pub fn create(root: path::PathBuf) -> Result<LocalDiskTokenStore, Error> {
        fs::create_dir_all(&root).map_err(|error| Error::RootPathInvalid {
            path: root.clone(),
            error,
        })?;
        Self::new(root)
    }

    pub fn root(&self) -> &path::Path {
        &self.root
    }

    fn key_to_file_path(&self, key: &str) -> Result<path::PathBuf, Error> {
        lazy_static! {
            static ref VALID_KEY: Regex = Regex::new(r"^[A-Za-z0-9_-]+$").unwrap();
        }

        if !VALID_KEY.is_match(key) {
            return Err(Error::InvalidKey {
                key: key.to_string(),
            });
        }

        Ok(self.root.join(format!("{}.json", key)))
    }
}

impl TokenStore for LocalDiskTokenStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        let file_path = self.key_to_file_path(key)?;
        log::debug!("Reading {}...", file_path.display());

        let contents = match fs::read_to_string(&file_path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(error.into()),
        };

        Ok(Some(serde_json::from_str(&contents)?))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        let file_path = self.key_to_file_path(key)?;
        log::debug!("Writing {}...", file_path.display());

        let contents = serde_json::to_string(value)?;
        fs::write(&file_path, contents)?;
        Ok(())
    }
}
