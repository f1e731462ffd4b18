//! Artifact delivery.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use super::ExportArtifact;
use crate::error::DocflowError;

/// Hands a finished artifact to the user.
#[async_trait]
pub trait Delivery: Send + Sync {
    /// Deliver `artifact`, returning where it went.
    async fn deliver(&self, artifact: &ExportArtifact) -> Result<String, DocflowError>;
}

/// Writes artifacts into a directory under their own file name.
#[derive(Debug, Clone)]
pub struct DirectoryDelivery {
    dir: PathBuf,
}

impl DirectoryDelivery {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// A file name must be a single, non-empty path component.
fn check_filename(name: &str) -> Result<(), DocflowError> {
    let bad = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\'])
        || name.contains('\0');
    if bad {
        return Err(DocflowError::InvalidFilename(name.to_string()));
    }
    Ok(())
}

#[async_trait]
impl Delivery for DirectoryDelivery {
    async fn deliver(&self, artifact: &ExportArtifact) -> Result<String, DocflowError> {
        check_filename(&artifact.filename)?;

        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(&artifact.filename);
        tokio::fs::write(&path, &artifact.bytes).await?;

        tracing::info!(job_id = %artifact.job_id, path = %path.display(), "artifact written");
        Ok(path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use uuid::Uuid;

    fn artifact(filename: &str) -> ExportArtifact {
        ExportArtifact {
            job_id: Uuid::new_v4(),
            filename: filename.to_string(),
            content_type: "image/jpeg",
            bytes: vec![0xFF, 0xD8, 0xFF, 0xD9],
            width: 1,
            height: 1,
        }
    }

    #[tokio::test]
    async fn test_writes_file() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("exports");
        let delivery = DirectoryDelivery::new(&dir);

        let location = delivery.deliver(&artifact("check-001.jpg")).await.unwrap();
        assert!(location.ends_with("check-001.jpg"));
        let written = std::fs::read(dir.join("check-001.jpg")).unwrap();
        assert_eq!(written, vec![0xFF, 0xD8, 0xFF, 0xD9]);

        let root = tmp.path().to_path_buf();
        drop(tmp);
        assert!(!root.exists());
    }

    #[tokio::test]
    async fn test_rejects_path_components() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("exports");
        let delivery = DirectoryDelivery::new(&dir);
        for name in ["../escape.jpg", "a/b.jpg", "a\\b.jpg", "", ".."] {
            let err = delivery.deliver(&artifact(name)).await.unwrap_err();
            assert!(matches!(err, DocflowError::InvalidFilename(_)), "{name}");
        }
        assert!(!dir.exists());
    }
}
