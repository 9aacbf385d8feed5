// ABOUTME: File-backed key-value slots, one JSON file per session slot
// ABOUTME: Writes go to a temp file that is renamed over the target
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;
use uuid::Uuid;

use super::{KeyValueSlot, SlotKey};
use crate::errors::{AppError, AppResult};

/// Slots stored as files under one directory
#[derive(Debug, Clone)]
pub struct FileSlot {
    root: PathBuf,
}

impl FileSlot {
    /// Open (and create if needed) the slot directory
    ///
    /// # Errors
    ///
    /// Returns a storage error if the directory cannot be created
    pub async fn open(root: impl Into<PathBuf>) -> AppResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::storage(format!("Cannot create {}: {e}", root.display())).with_source(e)
        })?;
        Ok(Self { root })
    }

    /// Directory holding the slot files
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &SlotKey) -> PathBuf {
        self.root.join(key.file_name())
    }
}

#[async_trait::async_trait]
impl KeyValueSlot for FileSlot {
    async fn read(&self, key: &SlotKey) -> AppResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::storage(format!("Cannot read slot {key}: {e}")).with_source(e)),
        }
    }

    async fn write(&self, key: &SlotKey, value: String) -> AppResult<()> {
        let target = self.path_for(key);
        let temp = self
            .root
            .join(format!(".{}.{}.tmp", key.file_name(), Uuid::new_v4()));

        if let Err(e) = fs::write(&temp, value.as_bytes()).await {
            return Err(AppError::storage(format!("Cannot write slot {key}: {e}")).with_source(e));
        }
        if let Err(e) = fs::rename(&temp, &target).await {
            // best effort: the temp file is garbage either way
            let _ = fs::remove_file(&temp).await;
            return Err(AppError::storage(format!("Cannot replace slot {key}: {e}")).with_source(e));
        }

        debug!(slot = %key, path = %target.display(), "Slot written");
        Ok(())
    }

    async fn remove(&self, key: &SlotKey) -> AppResult<()> {
        match fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(AppError::storage(format!("Cannot remove slot {key}: {e}")).with_source(e))
            }
        }
    }

    async fn health_check(&self) -> AppResult<()> {
        let metadata = fs::metadata(&self.root).await.map_err(|e| {
            AppError::storage(format!("Data directory unavailable: {e}")).with_source(e)
        })?;
        if metadata.is_dir() {
            Ok(())
        } else {
            Err(AppError::storage(format!(
                "{} is not a directory",
                self.root.display()
            )))
        }
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}
