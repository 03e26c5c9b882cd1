use std::path::{Component, Path, PathBuf};

use anyhow::{Result, bail};
use tokio::fs;
use tracing::info;

/// Blob storage rooted at a local directory.
///
/// Every stored object is public-read: the server mounts the root under
/// `/media`, and `upload` hands back the URL an object is served at.
pub struct Storage {
    dir: PathBuf,
    public_base: String,
}

impl Storage {
    pub async fn new(dir: PathBuf, public_base: impl Into<String>) -> Result<Self> {
        fs::create_dir_all(&dir).await?;
        let public_base = public_base.into().trim_end_matches('/').to_string();
        info!("Blob storage directory: {}", dir.display());
        Ok(Self { dir, public_base })
    }

    /// Store an object and return its public URL.
    pub async fn upload(&self, bytes: &[u8], remote_path: &str) -> Result<String> {
        let path = self.object_path(remote_path)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&path, bytes).await?;

        info!("Stored {} byte object at {}", bytes.len(), remote_path);
        Ok(self.public_url(remote_path))
    }

    /// The URL an object is served under, without touching the filesystem.
    pub fn public_url(&self, remote_path: &str) -> String {
        format!("{}/media/{}", self.public_base, remote_path)
    }

    /// Storage root, for mounting the static file service.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Local path of an object. Only plain relative components are
    /// accepted, so a remote path can never escape the storage root.
    fn object_path(&self, remote_path: &str) -> Result<PathBuf> {
        let relative = Path::new(remote_path);
        let plain = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if remote_path.is_empty() || !plain {
            bail!("Invalid object path: {}", remote_path);
        }
        Ok(self.dir.join(relative))
    }
}
