// /////////////////////////////////////////////////////////////////////////////
// Slidecast
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// /////////////////////////////////////////////////////////////////////////////

//! # Tokio-backed FileSystem
//!
//! The production `FileSystem` port implementation: async reads/writes via
//! `tokio::fs`, with lazy parent-directory creation and the permission bits
//! §4.2 specifies (0755 dirs, 0644 files) applied on Unix. On platforms
//! without Unix permission bits `set_permissions` is a no-op, matching the
//! trait's default.

use async_trait::async_trait;
use slidecast_domain::error::PipelineError;
use slidecast_domain::services::file_system::FileSystem;
use std::path::{Path, PathBuf};

/// Real filesystem adapter. Stateless beyond a `root` used only to bound
/// `read_dir` truncation logging; every path passed through the port is
/// otherwise absolute or caller-relative.
#[derive(Debug, Default, Clone)]
pub struct TokioFileSystem;

impl TokioFileSystem {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileSystem for TokioFileSystem {
    async fn read(&self, path: &Path) -> Result<Vec<u8>, PipelineError> {
        tokio::fs::read(path).await.map_err(|e| PipelineError::storage(path.display().to_string(), e))
    }

    async fn write(&self, path: &Path, data: &[u8]) -> Result<(), PipelineError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                self.create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(path, data).await.map_err(|e| PipelineError::storage(path.display().to_string(), e))
    }

    async fn exists(&self, path: &Path) -> bool {
        tokio::fs::metadata(path).await.is_ok()
    }

    async fn create_dir_all(&self, path: &Path) -> Result<(), PipelineError> {
        tokio::fs::create_dir_all(path).await.map_err(|e| PipelineError::storage(path.display().to_string(), e))
    }

    async fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>, PipelineError> {
        let mut entries = Vec::new();
        let mut reader = tokio::fs::read_dir(path).await.map_err(|e| PipelineError::storage(path.display().to_string(), e))?;
        while let Some(entry) = reader.next_entry().await.map_err(|e| PipelineError::storage(path.display().to_string(), e))? {
            let file_type = entry
                .file_type()
                .await
                .map_err(|e| PipelineError::storage(entry.path().display().to_string(), e))?;
            // §6: "top-level files only; subdirectories ignored".
            if file_type.is_file() {
                entries.push(entry.path());
            }
        }
        entries.sort();
        Ok(entries)
    }

    async fn remove_file(&self, path: &Path) -> Result<(), PipelineError> {
        tokio::fs::remove_file(path).await.map_err(|e| PipelineError::storage(path.display().to_string(), e))
    }

    #[cfg(unix)]
    async fn set_permissions(&self, path: &Path, mode: u32) -> Result<(), PipelineError> {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(mode);
        tokio::fs::set_permissions(path, perms)
            .await
            .map_err(|e| PipelineError::storage(path.display().to_string(), e))
    }

    #[cfg(not(unix))]
    async fn set_permissions(&self, _path: &Path, _mode: u32) -> Result<(), PipelineError> {
        Ok(())
    }
}
