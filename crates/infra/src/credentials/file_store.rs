//! JSON file credential store
//!
//! The pair is written to a sibling temp file and renamed over the target,
//! so a reader never observes a half-written file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use convene_common::auth::{CredentialPair, CredentialStore};
use convene_domain::ConveneError;
use tokio::fs;
use tracing::debug;

use crate::errors::InfraError;

#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn write_atomically(&self, contents: &[u8]) -> Result<(), InfraError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let temp = self.temp_path();
        fs::write(&temp, contents).await?;
        restrict_permissions(&temp).await?;
        fs::rename(&temp, &self.path).await?;
        Ok(())
    }
}

#[cfg(unix)]
async fn restrict_permissions(path: &Path) -> Result<(), InfraError> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).await?;
    Ok(())
}

#[cfg(not(unix))]
async fn restrict_permissions(_path: &Path) -> Result<(), InfraError> {
    Ok(())
}

fn describe(err: InfraError) -> String {
    ConveneError::from(err).to_string()
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn save(&self, credentials: &CredentialPair) -> Result<(), String> {
        let contents = serde_json::to_vec_pretty(credentials).map_err(|e| describe(e.into()))?;
        self.write_atomically(&contents).await.map_err(describe)?;
        debug!(path = %self.path.display(), "credentials saved");
        Ok(())
    }

    async fn load(&self) -> Result<Option<CredentialPair>, String> {
        let contents = match fs::read(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(describe(e.into())),
        };

        let credentials = serde_json::from_slice(&contents).map_err(|e| describe(e.into()))?;
        Ok(Some(credentials))
    }

    async fn clear(&self) -> Result<(), String> {
        match fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "credentials removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(describe(e.into())),
        }
    }
}
