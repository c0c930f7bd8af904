// /////////////////////////////////////////////////////////////////////////////
// Slidecast
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// /////////////////////////////////////////////////////////////////////////////

//! # SpeechSynth
//!
//! External collaborator (§6), out of scope for this core (§1). Synthesizes
//! one unit of narration text into an audio byte stream, which the Speech
//! Stage streams to disk.

use crate::cancellation::CancellationToken;
use crate::error::PipelineError;
use async_trait::async_trait;
use futures::stream::BoxStream;

/// A chunk of synthesized audio bytes, as would arrive over a streaming
/// TTS response.
pub type AudioChunk = Vec<u8>;

#[async_trait]
pub trait SpeechSynth: Send + Sync {
    /// Synthesizes `text` into a stream of audio byte chunks. The Speech
    /// Stage drains this stream directly to the per-index audio file.
    async fn synthesize(
        &self,
        token: &CancellationToken,
        text: &str,
    ) -> Result<BoxStream<'static, Result<AudioChunk, PipelineError>>, PipelineError>;
}
