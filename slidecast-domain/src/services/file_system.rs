// /////////////////////////////////////////////////////////////////////////////
// Slidecast
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// /////////////////////////////////////////////////////////////////////////////

//! # FileSystem
//!
//! Filesystem-agnostic port (§4.2, §6): open/create/read/write/exists/
//! mkdir/readdir/remove, sufficient to be backed by an in-memory filesystem
//! in tests. Directory creation is lazy — every producer path's parent
//! directory is created before first write.

use crate::error::PipelineError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Default directory mode: permissive-but-restricted per §4.2.
pub const DEFAULT_DIR_MODE: u32 = 0o755;
/// Default file mode: permissive-but-restricted per §4.2.
pub const DEFAULT_FILE_MODE: u32 = 0o644;

#[async_trait]
pub trait FileSystem: Send + Sync {
    async fn read(&self, path: &Path) -> Result<Vec<u8>, PipelineError>;

    /// Writes `data` to `path`, creating the parent directory (and setting
    /// `DEFAULT_DIR_MODE`/`DEFAULT_FILE_MODE`) if it doesn't exist yet.
    async fn write(&self, path: &Path, data: &[u8]) -> Result<(), PipelineError>;

    async fn exists(&self, path: &Path) -> bool;

    async fn create_dir_all(&self, path: &Path) -> Result<(), PipelineError>;

    /// Top-level entries of `path` only; subdirectories are not descended
    /// into (§6: "top-level files only; subdirectories ignored").
    async fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>, PipelineError>;

    async fn remove_file(&self, path: &Path) -> Result<(), PipelineError>;

    /// No-op on filesystems that don't model Unix permission bits (the
    /// in-memory test filesystem, Windows).
    async fn set_permissions(&self, _path: &Path, _mode: u32) -> Result<(), PipelineError> {
        Ok(())
    }
}
