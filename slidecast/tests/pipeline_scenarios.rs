// /////////////////////////////////////////////////////////////////////////////
// Slidecast
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// /////////////////////////////////////////////////////////////////////////////

//! End-to-end orchestrator scenarios (spec §8's S1/S2/S4/S5/S6-shaped
//! cases), driven against an in-memory filesystem and hand-written fake
//! collaborators rather than the stage-level unit tests colocated with
//! each stage module.

use async_trait::async_trait;
use futures::stream::BoxStream;
use slidecast::infrastructure::adapters::UnavailablePresentationFetcher;
use slidecast::{Orchestrator, OrchestratorConfig};
use slidecast_domain::services::{
    AudioChunk, Encoder, FsArtifactStore, NullProgressSink, ProbeResult, SourceKind, SpeechSynth, Translator,
};
use slidecast_domain::test_support::InMemoryFileSystem;
use slidecast_domain::value_objects::{LanguageCode, RunPaths, SlideSelection, TransitionConfig, TransitionKind};
use slidecast_domain::{CancellationToken, PipelineError};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

struct CountingTranslator {
    calls: AtomicUsize,
}

#[async_trait]
impl Translator for CountingTranslator {
    async fn translate(&self, _token: &CancellationToken, text: &str, target_lang: &LanguageCode) -> Result<String, PipelineError> {
        Ok(format!("{text}-{}", target_lang.as_str()))
    }

    async fn translate_batch(
        &self,
        _token: &CancellationToken,
        texts: &[String],
        target_lang: &LanguageCode,
    ) -> Result<Vec<String>, PipelineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts.iter().map(|t| format!("{t}-{}", target_lang.as_str())).collect())
    }
}

struct EchoSpeechSynth {
    calls: AtomicUsize,
}

#[async_trait]
impl SpeechSynth for EchoSpeechSynth {
    async fn synthesize(&self, _token: &CancellationToken, text: &str) -> Result<BoxStream<'static, Result<AudioChunk, PipelineError>>, PipelineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let bytes = text.as_bytes().to_vec();
        Ok(Box::pin(futures::stream::once(async move { Ok(bytes) })))
    }
}

/// Fakes an encoder over an in-memory filesystem: `render_segment` copies
/// slide+audio bytes into the output so distinct inputs fingerprint
/// distinctly; `concat`/`cross_fade` write a fixed marker. Optionally fails
/// every `render_segment` whose audio path belongs to `fail_lang`, to
/// exercise the orchestrator's partial-failure/error-ordering policy.
struct FakeEncoder {
    fs: Arc<InMemoryFileSystem>,
    render_calls: AtomicUsize,
    concat_calls: AtomicUsize,
    cross_fade_calls: AtomicUsize,
    fail_lang: Option<String>,
}

impl FakeEncoder {
    fn new(fs: Arc<InMemoryFileSystem>) -> Self {
        Self {
            fs,
            render_calls: AtomicUsize::new(0),
            concat_calls: AtomicUsize::new(0),
            cross_fade_calls: AtomicUsize::new(0),
            fail_lang: None,
        }
    }

    fn failing(fs: Arc<InMemoryFileSystem>, fail_lang: impl Into<String>) -> Self {
        Self {
            fail_lang: Some(fail_lang.into()),
            ..Self::new(fs)
        }
    }
}

#[async_trait]
impl Encoder for FakeEncoder {
    async fn probe(&self, _token: &CancellationToken, _path: &Path) -> Result<ProbeResult, PipelineError> {
        Ok(ProbeResult {
            kind: SourceKind::Image,
            width: 1920,
            height: 1080,
            duration: None,
        })
    }

    async fn render_segment(
        &self,
        _token: &CancellationToken,
        slide: &Path,
        audio: &Path,
        out: &Path,
        _target_width: u32,
        _target_height: u32,
        _source_kind: SourceKind,
        _duration: Option<std::time::Duration>,
    ) -> Result<(), PipelineError> {
        if let Some(lang) = &self.fail_lang {
            if audio.to_string_lossy().contains(&format!("/cache/{lang}/")) {
                return Err(PipelineError::collaborator("Encoder", "simulated render failure"));
            }
        }
        self.render_calls.fetch_add(1, Ordering::SeqCst);
        let slide_bytes = self.fs.read(slide).await?;
        let audio_bytes = self.fs.read(audio).await?;
        let mut combined = slide_bytes;
        combined.extend_from_slice(&audio_bytes);
        self.fs.write(out, &combined).await
    }

    async fn concat(&self, _token: &CancellationToken, _segments: &[PathBuf], out: &Path) -> Result<(), PipelineError> {
        self.concat_calls.fetch_add(1, Ordering::SeqCst);
        self.fs.write(out, b"concatenated-container").await
    }

    async fn cross_fade(
        &self,
        _token: &CancellationToken,
        _segments: &[PathBuf],
        _kind: TransitionKind,
        _duration_ms: u64,
        out: &Path,
    ) -> Result<(), PipelineError> {
        self.cross_fade_calls.fetch_add(1, Ordering::SeqCst);
        self.fs.write(out, b"cross-faded-container").await
    }
}

async fn seed_run(fs: &InMemoryFileSystem, root: &str, slide_count: usize) {
    fs.write(&PathBuf::from(format!("{root}/data/texts.txt")), b"Hello\n-\nWorld").await.unwrap();
    for i in 0..slide_count {
        fs.write(&PathBuf::from(format!("{root}/data/slides/{i}.png")), format!("slide-{i}").as_bytes())
            .await
            .unwrap();
    }
}

fn paths(root: &str) -> RunPaths {
    RunPaths::new(root, "aud", "mp4")
}

type TestOrchestrator = Orchestrator<InMemoryFileSystem, FsArtifactStore<InMemoryFileSystem>, CountingTranslator, EchoSpeechSynth, FakeEncoder, UnavailablePresentationFetcher>;

fn build_orchestrator(fs: Arc<InMemoryFileSystem>, encoder: Arc<FakeEncoder>, translator: Arc<CountingTranslator>, synth: Arc<EchoSpeechSynth>) -> TestOrchestrator {
    let store = Arc::new(FsArtifactStore::new(fs.clone()));
    Orchestrator::new(
        fs,
        store,
        translator,
        synth,
        encoder,
        None,
        Arc::new(NullProgressSink),
        OrchestratorConfig::default(),
    )
}

/// S1-shaped: cold run, two output languages, image slides. Every
/// collaborator is called the expected number of times and both
/// containers are produced with sidecars.
#[tokio::test]
async fn cold_run_two_languages_produces_both_containers() {
    let fs = Arc::new(InMemoryFileSystem::new());
    seed_run(&fs, "/r", 2).await;

    let translator = Arc::new(CountingTranslator { calls: AtomicUsize::new(0) });
    let synth = Arc::new(EchoSpeechSynth { calls: AtomicUsize::new(0) });
    let encoder = Arc::new(FakeEncoder::new(fs.clone()));
    let orchestrator = build_orchestrator(fs.clone(), encoder.clone(), translator.clone(), synth.clone());

    let en = LanguageCode::new("en");
    let output_langs = vec![LanguageCode::new("es"), LanguageCode::new("fr")];
    let p = paths("/r");
    let token = CancellationToken::new();

    let outcome = orchestrator
        .run(&token, &p, &en, &output_langs, None, &SlideSelection::All, &TransitionConfig::none())
        .await
        .unwrap();

    assert_eq!(outcome.containers.len(), 2);
    assert_eq!(translator.calls.load(Ordering::SeqCst), 2, "one TranslateBatch call per language");
    assert_eq!(synth.calls.load(Ordering::SeqCst), 4, "2 units x 2 languages");
    assert_eq!(encoder.render_calls.load(Ordering::SeqCst), 4, "2 segments x 2 languages");
    assert_eq!(encoder.concat_calls.load(Ordering::SeqCst), 2);

    for lang in &output_langs {
        let container = p.output_container_path(lang);
        assert!(fs.exists(&container).await);
        assert!(fs.exists(&RunPaths::sidecar_of(&container)).await);
    }
}

/// S2-shaped: an unchanged rerun hits every cache and calls no collaborator.
#[tokio::test]
async fn warm_rerun_calls_no_collaborator_again() {
    let fs = Arc::new(InMemoryFileSystem::new());
    seed_run(&fs, "/r", 2).await;

    let translator = Arc::new(CountingTranslator { calls: AtomicUsize::new(0) });
    let synth = Arc::new(EchoSpeechSynth { calls: AtomicUsize::new(0) });
    let encoder = Arc::new(FakeEncoder::new(fs.clone()));
    let orchestrator = build_orchestrator(fs.clone(), encoder.clone(), translator.clone(), synth.clone());

    let en = LanguageCode::new("en");
    let output_langs = vec![LanguageCode::new("es")];
    let p = paths("/r");
    let token = CancellationToken::new();
    let transition = TransitionConfig::none();

    orchestrator.run(&token, &p, &en, &output_langs, None, &SlideSelection::All, &transition).await.unwrap();
    orchestrator.run(&token, &p, &en, &output_langs, None, &SlideSelection::All, &transition).await.unwrap();

    assert_eq!(translator.calls.load(Ordering::SeqCst), 1);
    assert_eq!(synth.calls.load(Ordering::SeqCst), 2);
    assert_eq!(encoder.render_calls.load(Ordering::SeqCst), 2);
    assert_eq!(encoder.concat_calls.load(Ordering::SeqCst), 1);
}

/// source == one of the output languages: that language is a pure
/// passthrough for Translation (zero TranslateBatch calls for it) while a
/// genuinely foreign output language still triggers translation.
#[tokio::test]
async fn source_language_in_output_set_is_translation_passthrough() {
    let fs = Arc::new(InMemoryFileSystem::new());
    seed_run(&fs, "/r", 1).await;

    let translator = Arc::new(CountingTranslator { calls: AtomicUsize::new(0) });
    let synth = Arc::new(EchoSpeechSynth { calls: AtomicUsize::new(0) });
    let encoder = Arc::new(FakeEncoder::new(fs.clone()));
    let orchestrator = build_orchestrator(fs.clone(), encoder.clone(), translator.clone(), synth.clone());

    let en = LanguageCode::new("en");
    let output_langs = vec![LanguageCode::new("en"), LanguageCode::new("es")];
    let p = paths("/r");
    let token = CancellationToken::new();

    orchestrator
        .run(&token, &p, &en, &output_langs, None, &SlideSelection::All, &TransitionConfig::none())
        .await
        .unwrap();

    assert_eq!(translator.calls.load(Ordering::SeqCst), 1, "only the foreign language calls TranslateBatch");
}

/// Transition-duration-only change: re-running with a different cross-fade
/// duration must re-run Assembly (new fingerprint) but must not touch
/// Translation/Speech/Render, which a naive whole-run cache key would.
#[tokio::test]
async fn transition_duration_change_only_invalidates_assembly() {
    let fs = Arc::new(InMemoryFileSystem::new());
    seed_run(&fs, "/r", 2).await;

    let translator = Arc::new(CountingTranslator { calls: AtomicUsize::new(0) });
    let synth = Arc::new(EchoSpeechSynth { calls: AtomicUsize::new(0) });
    let encoder = Arc::new(FakeEncoder::new(fs.clone()));
    let orchestrator = build_orchestrator(fs.clone(), encoder.clone(), translator.clone(), synth.clone());

    let en = LanguageCode::new("en");
    let output_langs = vec![LanguageCode::new("es")];
    let p = paths("/r");
    let token = CancellationToken::new();

    let t1 = TransitionConfig::new(TransitionKind::Fade, 0.5).unwrap();
    let t2 = TransitionConfig::new(TransitionKind::Fade, 1.0).unwrap();

    orchestrator.run(&token, &p, &en, &output_langs, None, &SlideSelection::All, &t1).await.unwrap();
    orchestrator.run(&token, &p, &en, &output_langs, None, &SlideSelection::All, &t2).await.unwrap();

    assert_eq!(translator.calls.load(Ordering::SeqCst), 1, "translation cache must not be touched by a transition change");
    assert_eq!(synth.calls.load(Ordering::SeqCst), 2, "speech cache must not be touched by a transition change");
    assert_eq!(encoder.render_calls.load(Ordering::SeqCst), 2, "render cache must not be touched by a transition change");
    assert_eq!(encoder.cross_fade_calls.load(Ordering::SeqCst), 2, "assembly must re-run for each distinct duration");
}

/// Slide/script count mismatch is a fatal precondition raised before any
/// stage executes, for every requested language.
#[tokio::test]
async fn slide_script_count_mismatch_is_fatal_precondition() {
    let fs = Arc::new(InMemoryFileSystem::new());
    seed_run(&fs, "/r", 3).await; // 3 slides, 2 script units

    let translator = Arc::new(CountingTranslator { calls: AtomicUsize::new(0) });
    let synth = Arc::new(EchoSpeechSynth { calls: AtomicUsize::new(0) });
    let encoder = Arc::new(FakeEncoder::new(fs.clone()));
    let orchestrator = build_orchestrator(fs.clone(), encoder, translator.clone(), synth.clone());

    let en = LanguageCode::new("en");
    let output_langs = vec![LanguageCode::new("es")];
    let p = paths("/r");
    let token = CancellationToken::new();

    let err = orchestrator
        .run(&token, &p, &en, &output_langs, None, &SlideSelection::All, &TransitionConfig::none())
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::PreconditionFailure(_)));
    assert_eq!(translator.calls.load(Ordering::SeqCst), 0, "no stage may run once Loading fails");
    assert_eq!(synth.calls.load(Ordering::SeqCst), 0);
}

/// §4.7/§7 error policy: every language worker runs to completion
/// independently; the orchestrator surfaces the first error in
/// language-definition order, but a language that succeeded keeps its
/// committed container rather than being rolled back.
#[tokio::test]
async fn one_language_failing_does_not_roll_back_a_succeeding_sibling() {
    let fs = Arc::new(InMemoryFileSystem::new());
    seed_run(&fs, "/r", 1).await;

    let translator = Arc::new(CountingTranslator { calls: AtomicUsize::new(0) });
    let synth = Arc::new(EchoSpeechSynth { calls: AtomicUsize::new(0) });
    let encoder = Arc::new(FakeEncoder::failing(fs.clone(), "fr"));
    let orchestrator = build_orchestrator(fs.clone(), encoder, translator.clone(), synth.clone());

    let en = LanguageCode::new("en");
    // "fr" sorts before "es" in language-definition order here, so a
    // distinct ordering also covers that the *first* error is the one
    // surfaced, not simply "an" error.
    let output_langs = vec![LanguageCode::new("fr"), LanguageCode::new("es")];
    let p = paths("/r");
    let token = CancellationToken::new();

    let err = orchestrator
        .run(&token, &p, &en, &output_langs, None, &SlideSelection::All, &TransitionConfig::none())
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::CollaboratorFailure { collaborator: "Encoder", .. }));

    let es_container = p.output_container_path(&LanguageCode::new("es"));
    assert!(fs.exists(&es_container).await, "the succeeding language's container must still be committed");
}
