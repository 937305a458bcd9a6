//! File-based endpoint storage implementation

use crate::{EndpointStore, PersistedEndpoint, StateError, StateResult};
use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, trace, warn};
use uuid::Uuid;

/// Directory name used under the platform config directory
const APP_DIR: &str = "chatrelay";

/// File-based endpoint store
///
/// Each key is stored as `<key>.json` in the base directory, holding a
/// [`PersistedEndpoint`].
#[derive(Debug, Clone)]
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    /// Create a new file store at the given path
    ///
    /// The directory will be created if it doesn't exist.
    pub fn new(base_path: impl AsRef<Path>) -> StateResult<Self> {
        let base_path = base_path.as_ref().to_path_buf();

        std::fs::create_dir_all(&base_path)
            .map_err(|e| StateError::Configuration(format!("Failed to create directory: {}", e)))?;

        debug!("Initialized endpoint file store at: {:?}", base_path);
        Ok(Self { base_path })
    }

    /// Create a file store in the platform config directory
    pub fn default_location() -> StateResult<Self> {
        let dir = dirs::config_dir()
            .ok_or_else(|| StateError::configuration("no platform config directory"))?
            .join(APP_DIR);
        Self::new(dir)
    }

    /// Directory holding the stored files
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn get_file_path(&self, key: &str) -> StateResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StateError::configuration(format!(
                "invalid store key: {:?}",
                key
            )));
        }
        Ok(self.base_path.join(format!("{}.json", key)))
    }
}

async fn write_then_rename(temp_path: &Path, path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(temp_path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await?;
    drop(file);

    fs::rename(temp_path, path).await
}

#[async_trait]
impl EndpointStore for FileStore {
    async fn load(&self, key: &str) -> StateResult<Option<String>> {
        let path = self.get_file_path(key)?;
        trace!("Loading endpoint override {} from file: {:?}", key, path);

        match fs::read_to_string(&path).await {
            Ok(json) => {
                let record: PersistedEndpoint = serde_json::from_str(&json)?;
                Ok(Some(record.url))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, key: &str, url: &str) -> StateResult<()> {
        let path = self.get_file_path(key)?;
        trace!("Saving endpoint override {} to file: {:?}", key, path);

        let json = serde_json::to_string_pretty(&PersistedEndpoint::new(url))?;

        // Unique per write so concurrent saves of one key never share a temp file
        let temp_path = self
            .base_path
            .join(format!("{}.{}.tmp", key, Uuid::new_v4().simple()));

        if let Err(e) = write_then_rename(&temp_path, &path, json.as_bytes()).await {
            if let Err(cleanup) = fs::remove_file(&temp_path).await {
                if cleanup.kind() != io::ErrorKind::NotFound {
                    warn!("Failed to remove temp file {:?}: {}", temp_path, cleanup);
                }
            }
            return Err(e.into());
        }

        debug!("Saved endpoint override {} to file: {:?}", key, path);
        Ok(())
    }

    async fn clear(&self, key: &str) -> StateResult<()> {
        let path = self.get_file_path(key)?;
        trace!("Clearing endpoint override {} from file: {:?}", key, path);

        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!("Cleared endpoint override {}", key);
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
