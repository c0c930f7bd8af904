// /////////////////////////////////////////////////////////////////////////////
// Slidecast
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// /////////////////////////////////////////////////////////////////////////////

//! # Artifact Store
//!
//! Content-addressed filesystem layer (§4.2): for every produced artifact at
//! path `P`, a sidecar at `<P>.hash` holds the fingerprint that sealed it.
//!
//! `Check(path, fp)` is true iff both the artifact file and its sidecar
//! exist and the (trimmed) sidecar contents equal `fp`. `Seal` is not
//! required to be atomic with the producer's write, only monotonic: once
//! sealed with `fp`, `Check(path, fp)` stays true until `Invalidate` runs.
//! On any producer failure the caller must not seal — a stale data file
//! without a matching sidecar is a cache miss on the next attempt.
//!
//! The store is generic over [`FileSystem`] so an in-memory filesystem can
//! substitute for tests without a second implementation of the cache
//! protocol itself.

use crate::error::PipelineError;
use crate::fingerprint::Fingerprint;
use crate::services::file_system::{FileSystem, DEFAULT_DIR_MODE, DEFAULT_FILE_MODE};
use crate::value_objects::RunPaths;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

#[async_trait]
pub trait ArtifactStore: Send + Sync {
    async fn check(&self, path: &Path, fp: &Fingerprint) -> Result<bool, PipelineError>;

    /// Writes `data` to `path` (creating parent directories lazily) and
    /// seals it with `fp`. Producers call this instead of going through
    /// `FileSystem` directly so a write failure can never leave a sealed
    /// sidecar without matching data.
    async fn commit(&self, path: &Path, data: &[u8], fp: &Fingerprint) -> Result<(), PipelineError>;

    async fn invalidate(&self, path: &Path) -> Result<(), PipelineError>;
}

/// The filesystem-agnostic artifact store described by §4.2, implemented
/// once against the `FileSystem` port rather than once per backend.
pub struct FsArtifactStore<F: FileSystem> {
    fs: Arc<F>,
}

impl<F: FileSystem> FsArtifactStore<F> {
    pub fn new(fs: Arc<F>) -> Self {
        Self { fs }
    }
}

#[async_trait]
impl<F: FileSystem> ArtifactStore for FsArtifactStore<F> {
    async fn check(&self, path: &Path, fp: &Fingerprint) -> Result<bool, PipelineError> {
        if !self.fs.exists(path).await {
            return Ok(false);
        }
        let sidecar = RunPaths::sidecar_of(path);
        if !self.fs.exists(&sidecar).await {
            return Ok(false);
        }
        let bytes = self.fs.read(&sidecar).await?;
        let text = String::from_utf8_lossy(&bytes);
        match Fingerprint::from_hex(text.trim()) {
            Ok(sealed) => Ok(sealed == *fp),
            Err(_) => Ok(false),
        }
    }

    async fn commit(&self, path: &Path, data: &[u8], fp: &Fingerprint) -> Result<(), PipelineError> {
        if let Some(parent) = path.parent() {
            self.fs.create_dir_all(parent).await?;
            self.fs.set_permissions(parent, DEFAULT_DIR_MODE).await?;
        }
        self.fs.write(path, data).await?;
        self.fs.set_permissions(path, DEFAULT_FILE_MODE).await?;
        let sidecar = RunPaths::sidecar_of(path);
        self.fs.write(&sidecar, fp.as_hex().as_bytes()).await?;
        self.fs.set_permissions(&sidecar, DEFAULT_FILE_MODE).await?;
        Ok(())
    }

    async fn invalidate(&self, path: &Path) -> Result<(), PipelineError> {
        let sidecar = RunPaths::sidecar_of(path);
        if self.fs.exists(&sidecar).await {
            self.fs.remove_file(&sidecar).await?;
        }
        Ok(())
    }
}
