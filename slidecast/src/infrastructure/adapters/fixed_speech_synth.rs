// /////////////////////////////////////////////////////////////////////////////
// Slidecast
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// /////////////////////////////////////////////////////////////////////////////

//! A `SpeechSynth` that emits the input text's own bytes as a single-chunk
//! stream, counting calls. Used by the Speech Stage's cache-protocol tests
//! (cold run / warm rerun / selective re-run) where the point under test is
//! the cache behavior, not any real synthesis.

use async_trait::async_trait;
use futures::stream::BoxStream;
use slidecast_domain::services::{AudioChunk, SpeechSynth};
use slidecast_domain::{CancellationToken, PipelineError};
use std::sync::atomic::{AtomicUsize, Ordering};

pub struct FixedSpeechSynth {
    calls: AtomicUsize,
}

impl FixedSpeechSynth {
    pub fn counting() -> Self {
        Self { calls: AtomicUsize::new(0) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechSynth for FixedSpeechSynth {
    async fn synthesize(
        &self,
        _token: &CancellationToken,
        text: &str,
    ) -> Result<BoxStream<'static, Result<AudioChunk, PipelineError>>, PipelineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let bytes = text.as_bytes().to_vec();
        Ok(Box::pin(futures::stream::once(async move { Ok(bytes) })))
    }
}
