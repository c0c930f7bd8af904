// /////////////////////////////////////////////////////////////////////////////
// Slidecast
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// /////////////////////////////////////////////////////////////////////////////

//! # In-Memory FileSystem
//!
//! A `FileSystem` implementation backed by a `HashMap`, per §4.2's
//! requirement that the artifact store (and everything built on the
//! `FileSystem` port) be filesystem-agnostic "so an in-memory filesystem can
//! substitute for tests." Not gated behind `#[cfg(test)]` so that the
//! `slidecast` crate's own test suite can depend on it directly.

use crate::error::PipelineError;
use crate::services::file_system::FileSystem;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Default)]
pub struct InMemoryFileSystem {
    files: Mutex<BTreeMap<PathBuf, Vec<u8>>>,
}

impl InMemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, path: impl Into<PathBuf>, data: impl Into<Vec<u8>>) {
        self.files.lock().unwrap().insert(path.into(), data.into());
    }
}

#[async_trait]
impl FileSystem for InMemoryFileSystem {
    async fn read(&self, path: &Path) -> Result<Vec<u8>, PipelineError> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| PipelineError::storage(path.display().to_string(), std::io::Error::from(std::io::ErrorKind::NotFound)))
    }

    async fn write(&self, path: &Path, data: &[u8]) -> Result<(), PipelineError> {
        self.files.lock().unwrap().insert(path.to_path_buf(), data.to_vec());
        Ok(())
    }

    async fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }

    async fn create_dir_all(&self, _path: &Path) -> Result<(), PipelineError> {
        // Directories are implicit in a flat key-value store.
        Ok(())
    }

    async fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>, PipelineError> {
        let files = self.files.lock().unwrap();
        let mut entries: Vec<PathBuf> = files
            .keys()
            .filter(|p| p.parent() == Some(path))
            .cloned()
            .collect();
        entries.sort();
        Ok(entries)
    }

    async fn remove_file(&self, path: &Path) -> Result<(), PipelineError> {
        self.files.lock().unwrap().remove(path);
        Ok(())
    }
}
