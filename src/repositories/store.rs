use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::RepositoryError;

/// Flat-file JSON document store. The whole document is read once at startup
/// and rewritten wholesale on every flush; once a flush returns, the mutation
/// it covers is durable.
#[derive(Clone, Debug)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn open(path: impl AsRef<Path>) -> Self {
        JsonStore {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// A missing file is a first boot. An unreadable document is logged and
    /// treated as empty; any other I/O error aborts startup.
    pub async fn load<T>(&self) -> Result<T, RepositoryError>
    where
        T: DeserializeOwned + Default,
    {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(T::default()),
            Err(err) => return Err(err.into()),
        };

        match serde_json::from_slice(&raw) {
            Ok(state) => Ok(state),
            Err(err) => {
                log::error!("Unreadable store {}: {}", self.path.display(), err);
                Ok(T::default())
            }
        }
    }

    pub async fn flush<T>(&self, state: &T) -> Result<(), RepositoryError>
    where
        T: Serialize,
    {
        let raw = serde_json::to_vec_pretty(state)?;
        tokio::fs::write(&self.path, raw).await?;

        Ok(())
    }
}
