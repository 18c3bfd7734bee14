use std::{io::ErrorKind, path::PathBuf};

use bytes::Bytes;
use tracing::instrument;
use uuid::Uuid;

use crate::domain::{
    common::{ScratchConfig, entities::app_errors::CoreError},
    medicine_analysis::{entities::ScratchFile, ports::ScratchStorage},
};

/// Scratch files stored as `<upload_dir>/<uuid v4>.<extension>`.
#[derive(Debug, Clone)]
pub struct FsScratchStorage {
    upload_dir: PathBuf,
}

impl FsScratchStorage {
    pub async fn new(config: ScratchConfig) -> Result<Self, CoreError> {
        tokio::fs::create_dir_all(&config.upload_dir)
            .await
            .map_err(|e| {
                CoreError::ScratchStorage(format!(
                    "Failed to create {}: {}",
                    config.upload_dir.display(),
                    e
                ))
            })?;

        tracing::info!(upload_dir = %config.upload_dir.display(), "Scratch storage ready");

        Ok(Self {
            upload_dir: config.upload_dir,
        })
    }

    fn scratch_path(&self, extension: &str) -> PathBuf {
        let name = if extension.is_empty() {
            Uuid::new_v4().to_string()
        } else {
            format!("{}.{}", Uuid::new_v4(), extension)
        };
        self.upload_dir.join(name)
    }
}

impl ScratchStorage for FsScratchStorage {
    #[instrument(skip_all, fields(size = data.len(), extension = %extension))]
    async fn persist(
        &self,
        data: Bytes,
        extension: String,
        content_type: String,
    ) -> Result<ScratchFile, CoreError> {
        let path = self.scratch_path(&extension);

        if let Err(e) = tokio::fs::write(&path, &data).await {
            // Do not leave a partial file behind
            let _ = tokio::fs::remove_file(&path).await;
            tracing::error!(path = %path.display(), "Failed to write scratch file: {}", e);
            return Err(CoreError::ScratchStorage(format!(
                "Failed to write {}: {}",
                path.display(),
                e
            )));
        }

        Ok(ScratchFile { path, content_type })
    }

    #[instrument(skip_all, fields(path = %file.path.display()))]
    async fn discard(&self, file: ScratchFile) -> Result<(), CoreError> {
        match tokio::fs::remove_file(&file.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CoreError::ScratchStorage(format!(
                "Failed to remove {}: {}",
                file.path.display(),
                e
            ))),
        }
    }
}
