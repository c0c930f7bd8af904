// /////////////////////////////////////////////////////////////////////////////
// Slidecast
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// /////////////////////////////////////////////////////////////////////////////

//! The `Encoder` subprocess is explicitly out of scope for this core (§1):
//! unlike translation or speech, there is no meaningful passthrough stand-in
//! for "encode a video segment", so the composition root wires this adapter
//! when no real encoder has been injected. Every call fails with a
//! `CollaboratorFailure` naming `Encoder`, which `map_pipeline_error_to_exit_code`
//! turns into exit code 69 (service unavailable) rather than a panic.

use async_trait::async_trait;
use slidecast_domain::services::{Encoder, ProbeResult, SourceKind};
use slidecast_domain::value_objects::TransitionKind;
use slidecast_domain::{CancellationToken, PipelineError};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub struct UnavailableEncoder;

fn unavailable() -> PipelineError {
    PipelineError::collaborator("Encoder", "no encoder subprocess is configured for this run")
}

#[async_trait]
impl Encoder for UnavailableEncoder {
    async fn probe(&self, _token: &CancellationToken, _path: &Path) -> Result<ProbeResult, PipelineError> {
        Err(unavailable())
    }

    async fn render_segment(
        &self,
        _token: &CancellationToken,
        _slide: &Path,
        _audio: &Path,
        _out: &Path,
        _target_width: u32,
        _target_height: u32,
        _source_kind: SourceKind,
        _duration: Option<Duration>,
    ) -> Result<(), PipelineError> {
        Err(unavailable())
    }

    async fn concat(&self, _token: &CancellationToken, _segments: &[PathBuf], _out: &Path) -> Result<(), PipelineError> {
        Err(unavailable())
    }

    async fn cross_fade(
        &self,
        _token: &CancellationToken,
        _segments: &[PathBuf],
        _kind: TransitionKind,
        _duration_ms: u64,
        _out: &Path,
    ) -> Result<(), PipelineError> {
        Err(unavailable())
    }
}
