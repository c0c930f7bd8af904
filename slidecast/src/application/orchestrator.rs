// /////////////////////////////////////////////////////////////////////////////
// Slidecast
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// /////////////////////////////////////////////////////////////////////////////

//! # Pipeline Orchestrator (§4.7)
//!
//! Drives Loading, then fans out one worker per requested output language.
//! Workers share nothing but the read-only script/slides and the
//! read-mostly artifact store; stages within a language are strictly
//! sequential, languages have no ordering guarantee relative to each other.
//!
//! Error policy (§4.7 step 3, §7): every language worker runs to
//! completion independently. If any returned an error, the orchestrator
//! returns the first error in language-definition (not completion) order;
//! partial success — other languages' containers already written and
//! sealed — is committed, never rolled back.

use slidecast_domain::services::{ArtifactStore, Encoder, FileSystem, PresentationFetcher, ProgressSink, SpeechSynth, Translator};
use slidecast_domain::value_objects::{LanguageCode, RunPaths, SlideSelection, TransitionConfig};
use slidecast_domain::{CancellationToken, PipelineError};
use std::path::PathBuf;
use std::sync::Arc;

use crate::application::use_cases::load_run_inputs::Loader;
use crate::application::use_cases::run_language;

/// Per-run concurrency policy (§5). `None` in either field means unbounded
/// within that stage's batch, matching the spec's default.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrchestratorConfig {
    pub speech_concurrency: Option<usize>,
    pub render_concurrency: Option<usize>,
}

/// Successful per-language output paths, in language-definition order.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub containers: Vec<(LanguageCode, PathBuf)>,
}

pub struct Orchestrator<F, A, T, S, E, Fe>
where
    F: FileSystem,
    A: ArtifactStore,
    T: Translator,
    S: SpeechSynth,
    E: Encoder,
    Fe: PresentationFetcher,
{
    fs: Arc<F>,
    store: Arc<A>,
    translator: Arc<T>,
    synth: Arc<S>,
    encoder: Arc<E>,
    fetcher: Option<Arc<Fe>>,
    progress: Arc<dyn ProgressSink>,
    config: OrchestratorConfig,
}

impl<F, A, T, S, E, Fe> Orchestrator<F, A, T, S, E, Fe>
where
    F: FileSystem + 'static,
    A: ArtifactStore + 'static,
    T: Translator + 'static,
    S: SpeechSynth + 'static,
    E: Encoder + 'static,
    Fe: PresentationFetcher + 'static,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        fs: Arc<F>,
        store: Arc<A>,
        translator: Arc<T>,
        synth: Arc<S>,
        encoder: Arc<E>,
        fetcher: Option<Arc<Fe>>,
        progress: Arc<dyn ProgressSink>,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            fs,
            store,
            translator,
            synth,
            encoder,
            fetcher,
            progress,
            config,
        }
    }

    /// Runs the full pipeline: Loading, then one worker per entry of
    /// `output_langs`, fanned out concurrently via `tokio::spawn`.
    #[allow(clippy::too_many_arguments)]
    pub async fn run(
        &self,
        token: &CancellationToken,
        paths: &RunPaths,
        source_lang: &LanguageCode,
        output_langs: &[LanguageCode],
        presentation_id: Option<&str>,
        selection: &SlideSelection,
        transition: &TransitionConfig,
    ) -> Result<RunOutcome, PipelineError> {
        let loader = Loader::new(self.fs.clone(), self.fetcher.clone());
        let inputs = Arc::new(loader.load(token, paths, presentation_id, selection).await?);

        let mut handles = Vec::with_capacity(output_langs.len());
        for lang in output_langs {
            let token = token.clone();
            let fs = self.fs.clone();
            let store = self.store.clone();
            let translator = self.translator.clone();
            let synth = self.synth.clone();
            let encoder = self.encoder.clone();
            let progress = self.progress.clone();
            let paths = paths.clone();
            let source_lang = source_lang.clone();
            let lang = lang.clone();
            let inputs = inputs.clone();
            let transition = *transition;
            let speech_concurrency = self.config.speech_concurrency;
            let render_concurrency = self.config.render_concurrency;

            handles.push((
                lang.clone(),
                tokio::spawn(async move {
                    run_language::<F, A, T, S, E, Fe>(
                        &token,
                        fs,
                        store,
                        translator,
                        synth,
                        encoder,
                        progress,
                        &paths,
                        &source_lang,
                        &lang,
                        &inputs,
                        &transition,
                        speech_concurrency,
                        render_concurrency,
                    )
                    .await
                }),
            ));
        }

        let mut containers = Vec::with_capacity(handles.len());
        let mut first_err: Option<PipelineError> = None;
        for (lang, handle) in handles {
            match handle.await {
                Ok(Ok(path)) => containers.push((lang, path)),
                Ok(Err(e)) => {
                    if first_err.is_none() {
                        first_err = Some(e);
                    }
                }
                Err(join_err) => {
                    if first_err.is_none() {
                        first_err = Some(PipelineError::collaborator("orchestrator", join_err.to_string()));
                    }
                }
            }
        }

        match first_err {
            Some(e) => Err(e),
            None => Ok(RunOutcome { containers }),
        }
    }
}
