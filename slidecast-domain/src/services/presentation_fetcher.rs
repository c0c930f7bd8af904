// /////////////////////////////////////////////////////////////////////////////
// Slidecast
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// /////////////////////////////////////////////////////////////////////////////

//! # PresentationFetcher
//!
//! External collaborator (§6), out of scope for this core (§1): fetches
//! slide images and speaker notes for a remote presentation. The Loading
//! stage (§4.7) uses this only when `presentation_id` is non-empty.

use crate::cancellation::CancellationToken;
use crate::error::PipelineError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// What a successful fetch returns: parallel lists of slide image paths
/// (already written under `out_dir`) and per-slide speaker notes.
pub struct FetchedPresentation {
    pub slide_paths: Vec<PathBuf>,
    pub notes: Vec<String>,
}

#[async_trait]
pub trait PresentationFetcher: Send + Sync {
    async fn fetch(&self, token: &CancellationToken, id: &str, out_dir: &Path) -> Result<FetchedPresentation, PipelineError>;
}
