// /////////////////////////////////////////////////////////////////////////////
// Slidecast
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// /////////////////////////////////////////////////////////////////////////////

//! The remote `PresentationFetcher` is an out-of-scope external collaborator
//! (§6) with no local stand-in that could meaningfully fabricate slides and
//! speaker notes. The composition root wires this adapter whenever
//! `--presentation-id` selects the remote source but no real fetcher has
//! been injected, or as the type parameter for `Loader` when a run is
//! local-only and the fetcher is never invoked at all.

use async_trait::async_trait;
use slidecast_domain::services::{FetchedPresentation, PresentationFetcher};
use slidecast_domain::{CancellationToken, PipelineError};
use std::path::Path;

pub struct UnavailablePresentationFetcher;

#[async_trait]
impl PresentationFetcher for UnavailablePresentationFetcher {
    async fn fetch(&self, _token: &CancellationToken, _id: &str, _out_dir: &Path) -> Result<FetchedPresentation, PipelineError> {
        Err(PipelineError::collaborator(
            "PresentationFetcher",
            "no remote presentation fetcher is configured for this run",
        ))
    }
}
