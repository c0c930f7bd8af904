// /////////////////////////////////////////////////////////////////////////////
// Slidecast
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// /////////////////////////////////////////////////////////////////////////////

//! # Speech Stage (§4.4)
//!
//! Per-index cache of synthesized audio, plus the hash manifest (`hashes`)
//! that lets downstream stages validate per-index cache state without
//! re-reading every audio file's sidecar themselves.
//!
//! The overwrite-before-generate ordering in [`SpeechStage::synthesize_all`]
//! is load-bearing: the manifest is overwritten with the *current*
//! fingerprints before any synthesis call runs, so a crash mid-batch still
//! leaves the manifest reflecting the new intent. The next run recomputes
//! `Prior[i] == fp_i` against that manifest and finds only the unsealed
//! indices are misses — it does not need to know the batch crashed.

use futures::stream::StreamExt;
use slidecast_domain::fingerprint::{fingerprint, Chunk, Fingerprint};
use slidecast_domain::services::{ArtifactStore, FileSystem, ProgressEvent, ProgressSink, SpeechSynth, Stage};
use slidecast_domain::value_objects::{LanguageCode, RunPaths, Script};
use slidecast_domain::{CancellationToken, PipelineError};
use std::path::PathBuf;
use std::sync::Arc;

const UNIT_SCHEMA_TAG: &str = "slidecast.speech_unit.v1";

pub struct SpeechStage<F: FileSystem, A: ArtifactStore, S: SpeechSynth> {
    fs: Arc<F>,
    store: Arc<A>,
    synth: Arc<S>,
    progress: Arc<dyn ProgressSink>,
    /// Maximum concurrent synthesis calls within one batch. `None` means
    /// unbounded, matching §5's default.
    max_concurrency: Option<usize>,
}

impl<F: FileSystem, A: ArtifactStore, S: SpeechSynth> SpeechStage<F, A, S> {
    pub fn new(fs: Arc<F>, store: Arc<A>, synth: Arc<S>, progress: Arc<dyn ProgressSink>, max_concurrency: Option<usize>) -> Self {
        Self {
            fs,
            store,
            synth,
            progress,
            max_concurrency,
        }
    }

    fn unit_fingerprint(unit: &str) -> Result<Fingerprint, PipelineError> {
        fingerprint(vec![Chunk::Str(UNIT_SCHEMA_TAG), Chunk::Str(unit)])
    }

    /// Loads `D/hashes`: one fingerprint per line, in index order. Absent
    /// file is treated as an empty prior manifest (every index a miss).
    async fn load_prior_manifest(&self, manifest_path: &std::path::Path) -> Result<Vec<Fingerprint>, PipelineError> {
        if !self.fs.exists(manifest_path).await {
            return Ok(Vec::new());
        }
        let bytes = self.fs.read(manifest_path).await?;
        let text = String::from_utf8_lossy(&bytes);
        let mut out = Vec::new();
        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            out.push(Fingerprint::from_hex(trimmed)?);
        }
        Ok(out)
    }

    async fn write_manifest(&self, manifest_path: &std::path::Path, fps: &[Fingerprint]) -> Result<(), PipelineError> {
        let text = fps.iter().map(|fp| fp.as_hex()).collect::<Vec<_>>().join("\n");
        if let Some(parent) = manifest_path.parent() {
            self.fs.create_dir_all(parent).await?;
        }
        self.fs.write(manifest_path, text.as_bytes()).await
    }

    /// Synthesizes audio for every unit of `script`, returning the ordered
    /// audio paths `D/0.aud .. D/(n-1).aud`.
    pub async fn synthesize_all(
        &self,
        token: &CancellationToken,
        paths: &RunPaths,
        lang: &LanguageCode,
        script: &Script,
    ) -> Result<Vec<PathBuf>, PipelineError> {
        let current_fps: Vec<Fingerprint> = script.units().iter().map(|u| Self::unit_fingerprint(u)).collect::<Result<_, _>>()?;
        let manifest_path = paths.audio_hashes_manifest(lang);
        let prior = self.load_prior_manifest(&manifest_path).await?;

        // Overwrite-before-generate (§4.4 step 3): record intent first so a
        // crash mid-batch invalidates only the indices that hadn't sealed.
        self.write_manifest(&manifest_path, &current_fps).await?;

        self.progress.notify(ProgressEvent::StageStart {
            lang: lang.clone(),
            stage: Stage::Speech,
        });

        let n = script.units().len();
        let concurrency = self.max_concurrency.unwrap_or(n.max(1));
        let results: Vec<Result<PathBuf, PipelineError>> = futures::stream::iter(script.units().iter().enumerate())
            .map(|(i, unit)| {
                let audio_path = paths.audio_path(lang, i);
                let fp = current_fps[i];
                let prior_hit = prior.get(i).is_some_and(|p| *p == fp);
                let lang = lang.clone();
                async move {
                    token.check()?;
                    self.progress.notify(ProgressEvent::ItemStart {
                        lang: lang.clone(),
                        stage: Stage::Speech,
                        item: i,
                    });

                    if prior_hit && self.store.check(&audio_path, &fp).await? {
                        self.progress.notify(ProgressEvent::ItemComplete {
                            lang,
                            stage: Stage::Speech,
                            item: i,
                            error: None,
                        });
                        return Ok(audio_path);
                    }

                    let outcome = self.synthesize_one(token, unit, &audio_path, &fp).await;
                    self.progress.notify(ProgressEvent::ItemComplete {
                        lang,
                        stage: Stage::Speech,
                        item: i,
                        error: outcome.as_ref().err().map(ToString::to_string),
                    });
                    outcome
                }
            })
            .buffer_unordered(concurrency)
            .collect()
            .await;

        let mut audio_paths = Vec::with_capacity(n);
        let mut first_err = None;
        // `buffer_unordered` does not preserve input order; recompute the
        // ordered path list directly rather than trusting completion order.
        for i in 0..n {
            audio_paths.push(paths.audio_path(lang, i));
        }
        for r in results {
            if let Err(e) = r {
                if first_err.is_none() {
                    first_err = Some(e);
                }
            }
        }

        self.progress.notify(ProgressEvent::StageComplete {
            lang: lang.clone(),
            stage: Stage::Speech,
            error: first_err.as_ref().map(ToString::to_string),
        });

        match first_err {
            Some(e) => Err(e),
            None => Ok(audio_paths),
        }
    }

    async fn synthesize_one(
        &self,
        token: &CancellationToken,
        unit: &str,
        audio_path: &std::path::Path,
        fp: &Fingerprint,
    ) -> Result<PathBuf, PipelineError> {
        let mut stream = self.synth.synthesize(token, unit).await?;
        let mut bytes = Vec::new();
        while let Some(chunk) = stream.next().await {
            token.check()?;
            bytes.extend_from_slice(&chunk?);
        }
        self.store.commit(audio_path, &bytes, fp).await?;
        Ok(audio_path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::FixedSpeechSynth;
    use slidecast_domain::services::{FsArtifactStore, NullProgressSink};
    use slidecast_domain::test_support::InMemoryFileSystem;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn paths() -> RunPaths {
        RunPaths::new("/r", "aud", "mp4")
    }

    #[tokio::test]
    async fn cold_run_synthesizes_every_unit() {
        let fs = Arc::new(InMemoryFileSystem::new());
        let store = Arc::new(FsArtifactStore::new(fs.clone()));
        let synth = Arc::new(FixedSpeechSynth::counting());
        let stage = SpeechStage::new(fs, store, synth.clone(), Arc::new(NullProgressSink), None);
        let script = Script::new(vec!["a".into(), "b".into(), "c".into()]);
        let lang = LanguageCode::new("es");

        let paths_out = stage.synthesize_all(&CancellationToken::new(), &paths(), &lang, &script).await.unwrap();

        assert_eq!(paths_out.len(), 3);
        assert_eq!(synth.calls(), 3);
    }

    #[tokio::test]
    async fn warm_rerun_synthesizes_nothing() {
        let fs = Arc::new(InMemoryFileSystem::new());
        let store = Arc::new(FsArtifactStore::new(fs.clone()));
        let synth = Arc::new(FixedSpeechSynth::counting());
        let stage = SpeechStage::new(fs, store, synth.clone(), Arc::new(NullProgressSink), None);
        let script = Script::new(vec!["a".into(), "b".into()]);
        let lang = LanguageCode::new("es");
        let token = CancellationToken::new();
        let p = paths();

        stage.synthesize_all(&token, &p, &lang, &script).await.unwrap();
        stage.synthesize_all(&token, &p, &lang, &script).await.unwrap();

        assert_eq!(synth.calls(), 2);
    }

    #[tokio::test]
    async fn changed_unit_resynthesizes_only_that_index() {
        let fs = Arc::new(InMemoryFileSystem::new());
        let store = Arc::new(FsArtifactStore::new(fs.clone()));
        let synth = Arc::new(FixedSpeechSynth::counting());
        let stage = SpeechStage::new(fs, store, synth.clone(), Arc::new(NullProgressSink), None);
        let lang = LanguageCode::new("es");
        let token = CancellationToken::new();
        let p = paths();

        stage
            .synthesize_all(&token, &p, &lang, &Script::new(vec!["a".into(), "b".into()]))
            .await
            .unwrap();
        assert_eq!(synth.calls(), 2);

        stage
            .synthesize_all(&token, &p, &lang, &Script::new(vec!["a".into(), "CHANGED".into()]))
            .await
            .unwrap();
        assert_eq!(synth.calls(), 3, "only the changed unit should re-synthesize");
    }

    #[tokio::test]
    async fn unchanged_index_ordering_independent_of_completion_order() {
        let fs = Arc::new(InMemoryFileSystem::new());
        let store = Arc::new(FsArtifactStore::new(fs.clone()));
        let synth = Arc::new(FixedSpeechSynth::counting());
        let stage = SpeechStage::new(fs, store, synth, Arc::new(NullProgressSink), Some(2));
        let script = Script::new(vec!["a".into(), "b".into(), "c".into(), "d".into()]);
        let lang = LanguageCode::new("es");

        let out = stage.synthesize_all(&CancellationToken::new(), &paths(), &lang, &script).await.unwrap();
        let expected: Vec<PathBuf> = (0..4).map(|i| paths().audio_path(&lang, i)).collect();
        assert_eq!(out, expected);
    }

    struct FailingSynth {
        fail_index: usize,
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl SpeechSynth for FailingSynth {
        async fn synthesize(
            &self,
            _token: &CancellationToken,
            text: &str,
        ) -> Result<futures::stream::BoxStream<'static, Result<Vec<u8>, PipelineError>>, PipelineError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call == self.fail_index {
                return Err(PipelineError::collaborator("SpeechSynth", "synthetic failure"));
            }
            let bytes = text.as_bytes().to_vec();
            Ok(Box::pin(futures::stream::once(async move { Ok(bytes) })))
        }
    }

    #[tokio::test]
    async fn failed_index_leaves_no_sidecar_for_retry() {
        let fs = Arc::new(InMemoryFileSystem::new());
        let store = Arc::new(FsArtifactStore::new(fs.clone()));
        let synth = Arc::new(FailingSynth {
            fail_index: 0,
            calls: AtomicUsize::new(0),
        });
        let stage = SpeechStage::new(fs.clone(), store, synth, Arc::new(NullProgressSink), Some(1));
        let script = Script::new(vec!["a".into()]);
        let lang = LanguageCode::new("es");
        let p = paths();

        let err = stage.synthesize_all(&CancellationToken::new(), &p, &lang, &script).await;
        assert!(err.is_err());
        let audio_path = p.audio_path(&lang, 0);
        assert!(!fs.exists(&RunPaths::sidecar_of(&audio_path)).await);
    }
}
