// /////////////////////////////////////////////////////////////////////////////
// Slidecast
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// /////////////////////////////////////////////////////////////////////////////

//! # Per-Language Worker (§4.7)
//!
//! Drives one language through the state machine:
//!
//! ```text
//! Init -> Translating -> Synthesizing -> Rendering -> Assembling -> Done
//!                       \-> Failed (terminal)            /
//! ```
//!
//! Each transition is gated by the predecessor's success; `Failed` is
//! terminal for that language only (§4.7's fan-out isolation guarantee).

use slidecast_domain::services::{ArtifactStore, Encoder, FileSystem, PresentationFetcher, ProgressSink, SpeechSynth, Translator};
use slidecast_domain::value_objects::{LanguageCode, RunPaths, TransitionConfig};
use slidecast_domain::{CancellationToken, PipelineError};
use std::path::PathBuf;
use std::sync::Arc;

use crate::application::stages::{AssemblyStage, RenderStage, SpeechStage, TranslationStage};
use crate::application::use_cases::load_run_inputs::LoadedInputs;

/// Observable state for progress reporting and tests. Not exposed over the
/// wire; the `ProgressSink` events are the externally visible signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageWorkerState {
    Init,
    Translating,
    Synthesizing,
    Rendering,
    Assembling,
    Done,
    Failed,
}

#[allow(clippy::too_many_arguments)]
pub async fn run_language<F, A, T, S, E, P>(
    token: &CancellationToken,
    fs: Arc<F>,
    store: Arc<A>,
    translator: Arc<T>,
    synth: Arc<S>,
    encoder: Arc<E>,
    progress: Arc<dyn ProgressSink>,
    paths: &RunPaths,
    source_lang: &LanguageCode,
    target_lang: &LanguageCode,
    inputs: &LoadedInputs,
    transition: &TransitionConfig,
    speech_concurrency: Option<usize>,
    render_concurrency: Option<usize>,
) -> Result<PathBuf, PipelineError>
where
    F: FileSystem,
    A: ArtifactStore,
    T: Translator,
    S: SpeechSynth,
    E: Encoder,
    P: PresentationFetcher,
{
    let mut state = LanguageWorkerState::Init;

    state = LanguageWorkerState::Translating;
    let translation = TranslationStage::new(fs.clone(), translator);
    let script = match translation.translate(token, paths, &inputs.script, source_lang, target_lang).await {
        Ok(s) => s,
        Err(e) => return Err(fail(&mut state, e)),
    };

    state = LanguageWorkerState::Synthesizing;
    let speech = SpeechStage::new(fs.clone(), store.clone(), synth, progress.clone(), speech_concurrency);
    let audio_paths = match speech.synthesize_all(token, paths, target_lang, &script).await {
        Ok(a) => a,
        Err(e) => return Err(fail(&mut state, e)),
    };

    state = LanguageWorkerState::Rendering;
    let render = RenderStage::new(fs.clone(), store.clone(), encoder.clone(), progress.clone(), render_concurrency);
    let (target_width, target_height) = match render.target_geometry(token, &inputs.slides[0]).await {
        Ok(dims) => dims,
        Err(e) => return Err(fail(&mut state, e)),
    };
    let segments = match render
        .render_all(token, paths, target_lang, &inputs.slides, &audio_paths, target_width, target_height)
        .await
    {
        Ok(s) => s,
        Err(e) => return Err(fail(&mut state, e)),
    };

    state = LanguageWorkerState::Assembling;
    let assembly = AssemblyStage::new(fs, store, encoder, progress);
    let output = match assembly.assemble(token, paths, target_lang, &segments, transition).await {
        Ok(o) => o,
        Err(e) => return Err(fail(&mut state, e)),
    };

    state = LanguageWorkerState::Done;
    debug_assert_eq!(state, LanguageWorkerState::Done);
    Ok(output)
}

fn fail(state: &mut LanguageWorkerState, err: PipelineError) -> PipelineError {
    *state = LanguageWorkerState::Failed;
    err
}
