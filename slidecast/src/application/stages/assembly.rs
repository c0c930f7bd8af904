// /////////////////////////////////////////////////////////////////////////////
// Slidecast
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// /////////////////////////////////////////////////////////////////////////////

//! # Assembly Stage (§4.6)
//!
//! Whole-output cache of the final container. Plain concatenation requires
//! no re-encode (every segment already shares geometry, pixel format, frame
//! rate, and codec per the Render Stage's invariants); cross-fade chains
//! `N-1` pairwise fade operations and always re-encodes.

use slidecast_domain::services::{ArtifactStore, Encoder, FileSystem, ProgressEvent, ProgressSink, Stage};
use slidecast_domain::value_objects::{FinalDescriptor, LanguageCode, RunPaths, TransitionConfig};
use slidecast_domain::{CancellationToken, PipelineError};
use std::path::PathBuf;
use std::sync::Arc;

pub struct AssemblyStage<F: FileSystem, A: ArtifactStore, E: Encoder> {
    fs: Arc<F>,
    store: Arc<A>,
    encoder: Arc<E>,
    progress: Arc<dyn ProgressSink>,
}

impl<F: FileSystem, A: ArtifactStore, E: Encoder> AssemblyStage<F, A, E> {
    pub fn new(fs: Arc<F>, store: Arc<A>, encoder: Arc<E>, progress: Arc<dyn ProgressSink>) -> Self {
        Self { fs, store, encoder, progress }
    }

    pub async fn assemble(
        &self,
        token: &CancellationToken,
        paths: &RunPaths,
        lang: &LanguageCode,
        segments: &[PathBuf],
        transition: &TransitionConfig,
    ) -> Result<PathBuf, PipelineError> {
        if transition.kind().is_cross_fade() && !transition.is_plain_concat() && segments.len() < 2 {
            return Err(PipelineError::precondition(
                "cross-fade assembly requires at least two segments",
            ));
        }

        self.progress.notify(ProgressEvent::StageStart {
            lang: lang.clone(),
            stage: Stage::Assembly,
        });

        let descriptor = FinalDescriptor {
            segment_paths: segments.to_vec(),
            transition_kind: transition.kind(),
            transition_duration_ms: transition.duration_ms(),
        };
        let fp = descriptor.fingerprint()?;
        let out = paths.output_container_path(lang);

        let result = self.assemble_inner(token, &out, segments, transition, &fp).await;

        self.progress.notify(ProgressEvent::StageComplete {
            lang: lang.clone(),
            stage: Stage::Assembly,
            error: result.as_ref().err().map(ToString::to_string),
        });

        result.map(|()| out)
    }

    async fn assemble_inner(
        &self,
        token: &CancellationToken,
        out: &std::path::Path,
        segments: &[PathBuf],
        transition: &TransitionConfig,
        fp: &slidecast_domain::Fingerprint,
    ) -> Result<(), PipelineError> {
        if self.store.check(out, fp).await? {
            return Ok(());
        }

        token.check()?;
        if let Some(parent) = out.parent() {
            self.fs.create_dir_all(parent).await?;
        }

        if transition.is_plain_concat() {
            self.encoder.concat(token, segments, out).await?;
        } else {
            self.encoder
                .cross_fade(token, segments, transition.kind(), transition.duration_ms(), out)
                .await?;
        }

        let bytes = self.fs.read(out).await?;
        self.store.commit(out, &bytes, fp).await?;
        Ok(())
    }
}
