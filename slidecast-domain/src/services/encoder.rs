// /////////////////////////////////////////////////////////////////////////////
// Slidecast
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// /////////////////////////////////////////////////////////////////////////////

//! # Encoder
//!
//! External collaborator (§6). The encoder subprocess itself is explicitly
//! out of scope for this core (§1) — "how those are realized (hardware-
//! accelerated or software) is not the pipeline's concern." This trait is
//! the boundary: the pipeline emits filter expressions and structured
//! render/concat/cross-fade requests; the concrete adapter decides how to
//! execute them.

use crate::cancellation::CancellationToken;
use crate::error::PipelineError;
use crate::value_objects::TransitionKind;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// What `Encoder::probe` determined a slide's source media to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Image,
    Video,
}

/// Result of probing a slide's source media.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeResult {
    pub kind: SourceKind,
    pub width: u32,
    pub height: u32,
    /// Present only for `SourceKind::Video`.
    pub duration: Option<Duration>,
}

#[async_trait]
pub trait Encoder: Send + Sync {
    /// Probes a slide's native dimensions and, for video sources, duration.
    async fn probe(&self, token: &CancellationToken, path: &Path) -> Result<ProbeResult, PipelineError>;

    /// Renders one segment: combines `slide` (+ its duration policy) with
    /// `audio` into `out`, scaled/padded to `(target_width, target_height)`
    /// per §4.5's scaling policy. `duration` is `Some` only when the
    /// segment's duration policy already pinned a value (e.g. the
    /// video-source branch); `None` lets the encoder derive it from the
    /// audio track (the still-image branch).
    #[allow(clippy::too_many_arguments)]
    async fn render_segment(
        &self,
        token: &CancellationToken,
        slide: &Path,
        audio: &Path,
        out: &Path,
        target_width: u32,
        target_height: u32,
        source_kind: SourceKind,
        duration: Option<Duration>,
    ) -> Result<(), PipelineError>;

    /// Plain stream-level concatenation of `segments` (§4.6). Valid only
    /// when every segment shares geometry, pixel format, frame rate, and
    /// codec (guaranteed by the Render Stage's invariants).
    async fn concat(&self, token: &CancellationToken, segments: &[PathBuf], out: &Path) -> Result<(), PipelineError>;

    /// Chains `segments.len() - 1` pairwise cross-fade operations of `kind`
    /// over `duration_ms`, producing the re-encoded `out`. Cross-fading
    /// fewer than two segments is a caller error (§4.6) enforced by the
    /// Assembly Stage before this is invoked.
    async fn cross_fade(
        &self,
        token: &CancellationToken,
        segments: &[PathBuf],
        kind: TransitionKind,
        duration_ms: u64,
        out: &Path,
    ) -> Result<(), PipelineError>;
}
