// /////////////////////////////////////////////////////////////////////////////
// Slidecast
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// /////////////////////////////////////////////////////////////////////////////

//! # Render Stage (§4.5)
//!
//! Per-slide cache of a rendered video segment. Target geometry is derived
//! once per language from the first slide's native dimensions, rounded down
//! to even numbers (a common encoder requirement for 4:2:0 chroma
//! subsampling). Each segment's fingerprint hashes slide bytes, audio bytes,
//! and the target dimensions — never the slide's pathname — so segments for
//! unchanged slides survive a run even if files were renamed.

use futures::stream::StreamExt;
use slidecast_domain::services::{ArtifactStore, Encoder, FileSystem, ProbeResult, ProgressEvent, ProgressSink, SourceKind, Stage};
use slidecast_domain::value_objects::{LanguageCode, RunPaths, SegmentDescriptor};
use slidecast_domain::{CancellationToken, PipelineError};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Fraction of video duration below which a shorter audio track triggers an
/// operator warning per §4.5's segment duration policy (audio under 80% of
/// video duration is allowed, but logged).
const AUDIO_SHORT_WARNING_THRESHOLD: f64 = 0.8;

pub struct RenderStage<F: FileSystem, A: ArtifactStore, E: Encoder> {
    fs: Arc<F>,
    store: Arc<A>,
    encoder: Arc<E>,
    progress: Arc<dyn ProgressSink>,
    max_concurrency: Option<usize>,
}

impl<F: FileSystem, A: ArtifactStore, E: Encoder> RenderStage<F, A, E> {
    pub fn new(fs: Arc<F>, store: Arc<A>, encoder: Arc<E>, progress: Arc<dyn ProgressSink>, max_concurrency: Option<usize>) -> Self {
        Self {
            fs,
            store,
            encoder,
            progress,
            max_concurrency,
        }
    }

    /// Rounds a dimension down to the nearest even number, per §4.5's target
    /// geometry rule.
    fn round_down_even(v: u32) -> u32 {
        v - (v % 2)
    }

    /// Derives the shared target geometry from the first slide's probed
    /// native dimensions.
    pub async fn target_geometry(&self, token: &CancellationToken, first_slide: &std::path::Path) -> Result<(u32, u32), PipelineError> {
        let probe = self.encoder.probe(token, first_slide).await?;
        Ok((Self::round_down_even(probe.width), Self::round_down_even(probe.height)))
    }

    /// Renders every slide in `slides` against its paired `audio_paths`
    /// entry, returning the ordered segment paths.
    pub async fn render_all(
        &self,
        token: &CancellationToken,
        paths: &RunPaths,
        lang: &LanguageCode,
        slides: &[PathBuf],
        audio_paths: &[PathBuf],
        target_width: u32,
        target_height: u32,
    ) -> Result<Vec<PathBuf>, PipelineError> {
        debug_assert_eq!(slides.len(), audio_paths.len());

        self.progress.notify(ProgressEvent::StageStart {
            lang: lang.clone(),
            stage: Stage::Render,
        });

        let n = slides.len();
        let concurrency = self.max_concurrency.unwrap_or(n.max(1));
        let results: Vec<Result<(), PipelineError>> = futures::stream::iter(slides.iter().zip(audio_paths.iter()).enumerate())
            .map(|(i, (slide, audio))| {
                let out = paths.segment_path(lang, i);
                let lang = lang.clone();
                async move {
                    token.check()?;
                    self.progress.notify(ProgressEvent::ItemStart {
                        lang: lang.clone(),
                        stage: Stage::Render,
                        item: i,
                    });
                    let outcome = self.render_one(token, slide, audio, &out, target_width, target_height).await;
                    self.progress.notify(ProgressEvent::ItemComplete {
                        lang,
                        stage: Stage::Render,
                        item: i,
                        error: outcome.as_ref().err().map(ToString::to_string),
                    });
                    outcome
                }
            })
            .buffer_unordered(concurrency)
            .collect()
            .await;

        let mut first_err = None;
        for r in results {
            if let Err(e) = r {
                if first_err.is_none() {
                    first_err = Some(e);
                }
            }
        }

        self.progress.notify(ProgressEvent::StageComplete {
            lang: lang.clone(),
            stage: Stage::Render,
            error: first_err.as_ref().map(ToString::to_string),
        });

        match first_err {
            Some(e) => Err(e),
            None => Ok((0..n).map(|i| paths.segment_path(lang, i)).collect()),
        }
    }

    async fn render_one(
        &self,
        token: &CancellationToken,
        slide: &std::path::Path,
        audio: &std::path::Path,
        out: &std::path::Path,
        target_width: u32,
        target_height: u32,
    ) -> Result<(), PipelineError> {
        let probe = self.encoder.probe(token, slide).await?;
        let source_kind = probe.kind;
        let is_video_source = matches!(source_kind, SourceKind::Video);

        let descriptor = SegmentDescriptor {
            slide_path: slide.to_path_buf(),
            audio_path: audio.to_path_buf(),
            target_width,
            target_height,
            is_video_source,
        };
        let fp = descriptor.fingerprint()?;

        if self.store.check(out, &fp).await? {
            return Ok(());
        }

        let duration = self.resolve_duration_policy(token, &probe, audio).await?;

        if let Some(parent) = out.parent() {
            self.fs.create_dir_all(parent).await?;
        }
        self.encoder
            .render_segment(token, slide, audio, out, target_width, target_height, source_kind, duration)
            .await?;

        let bytes = self.fs.read(out).await?;
        self.store.commit(out, &bytes, &fp).await?;
        Ok(())
    }

    /// §4.5 step 2: still images take the audio's duration (left `None` for
    /// the encoder to derive); video sources pin the video's own duration,
    /// warning (not failing) if the audio track runs under 80% of it.
    async fn resolve_duration_policy(
        &self,
        token: &CancellationToken,
        probe: &ProbeResult,
        audio: &std::path::Path,
    ) -> Result<Option<Duration>, PipelineError> {
        match (probe.kind, probe.duration) {
            (SourceKind::Video, Some(video_duration)) => {
                let audio_probe = self.encoder.probe(token, audio).await?;
                if let Some(audio_duration) = audio_probe.duration {
                    if Self::audio_is_short(video_duration, audio_duration) {
                        tracing::warn!(
                            slide_duration_secs = video_duration.as_secs_f64(),
                            audio_duration_secs = audio_duration.as_secs_f64(),
                            "audio track runs under 80% of video-source slide duration; segment will carry trailing silence"
                        );
                    }
                }
                Ok(Some(video_duration))
            }
            (SourceKind::Video, None) => Err(PipelineError::collaborator("Encoder", "probe reported a video source with no duration")),
            (SourceKind::Image, _) => Ok(None),
        }
    }

    /// Whether `audio_duration` runs under 80% of `video_duration`, per
    /// §4.5's warn-but-proceed threshold. Kept `pub` so callers computing
    /// both durations ahead of time can reuse the same rule.
    pub fn audio_is_short(video_duration: Duration, audio_duration: Duration) -> bool {
        audio_duration.as_secs_f64() < video_duration.as_secs_f64() * AUDIO_SHORT_WARNING_THRESHOLD
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slidecast_domain::services::{FsArtifactStore, NullProgressSink};
    use slidecast_domain::test_support::InMemoryFileSystem;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct StubEncoder {
        render_calls: AtomicUsize,
        images: std::collections::HashSet<PathBuf>,
        written: Mutex<Vec<u8>>,
        fs: Arc<InMemoryFileSystem>,
    }

    #[async_trait::async_trait]
    impl Encoder for StubEncoder {
        async fn probe(&self, _token: &CancellationToken, path: &std::path::Path) -> Result<ProbeResult, PipelineError> {
            if self.images.contains(path) {
                Ok(ProbeResult {
                    kind: SourceKind::Image,
                    width: 1920,
                    height: 1081,
                    duration: None,
                })
            } else {
                Ok(ProbeResult {
                    kind: SourceKind::Video,
                    width: 1920,
                    height: 1080,
                    duration: Some(Duration::from_secs(5)),
                })
            }
        }

        async fn render_segment(
            &self,
            _token: &CancellationToken,
            _slide: &std::path::Path,
            _audio: &std::path::Path,
            out: &std::path::Path,
            _target_width: u32,
            _target_height: u32,
            _source_kind: SourceKind,
            _duration: Option<Duration>,
        ) -> Result<(), PipelineError> {
            self.render_calls.fetch_add(1, Ordering::SeqCst);
            self.fs.write(out, b"segment-bytes").await
        }

        async fn concat(&self, _token: &CancellationToken, _segments: &[PathBuf], _out: &std::path::Path) -> Result<(), PipelineError> {
            unreachable!("not exercised by render stage tests")
        }

        async fn cross_fade(
            &self,
            _token: &CancellationToken,
            _segments: &[PathBuf],
            _kind: slidecast_domain::value_objects::TransitionKind,
            _duration_ms: u64,
            _out: &std::path::Path,
        ) -> Result<(), PipelineError> {
            unreachable!("not exercised by render stage tests")
        }
    }

    fn paths() -> RunPaths {
        RunPaths::new("/r", "aud", "mp4")
    }

    async fn seed_slide_and_audio(fs: &InMemoryFileSystem, slide: &std::path::Path, audio: &std::path::Path) {
        fs.write(slide, b"slide-bytes").await.unwrap();
        fs.write(audio, b"audio-bytes").await.unwrap();
    }

    #[tokio::test]
    async fn even_rounding_of_target_geometry() {
        assert_eq!(RenderStage::<InMemoryFileSystem, FsArtifactStore<InMemoryFileSystem>, StubEncoder>::round_down_even(1081), 1080);
        assert_eq!(RenderStage::<InMemoryFileSystem, FsArtifactStore<InMemoryFileSystem>, StubEncoder>::round_down_even(1920), 1920);
    }

    #[tokio::test]
    async fn cold_run_renders_every_segment_then_warm_rerun_renders_none() {
        let fs = Arc::new(InMemoryFileSystem::new());
        let slide = PathBuf::from("/r/data/slides/0.png");
        let audio = PathBuf::from("/r/data/cache/es/audio/0.aud");
        seed_slide_and_audio(&fs, &slide, &audio).await;

        let store = Arc::new(FsArtifactStore::new(fs.clone()));
        let encoder = Arc::new(StubEncoder {
            render_calls: AtomicUsize::new(0),
            images: [slide.clone()].into_iter().collect(),
            written: Mutex::new(Vec::new()),
            fs: fs.clone(),
        });
        let stage = RenderStage::new(fs, store, encoder.clone(), Arc::new(NullProgressSink), None);
        let lang = LanguageCode::new("es");
        let token = CancellationToken::new();
        let p = paths();

        stage.render_all(&token, &p, &lang, &[slide.clone()], &[audio.clone()], 1920, 1080).await.unwrap();
        assert_eq!(encoder.render_calls.load(Ordering::SeqCst), 1);

        stage.render_all(&token, &p, &lang, &[slide], &[audio], 1920, 1080).await.unwrap();
        assert_eq!(encoder.render_calls.load(Ordering::SeqCst), 1, "unchanged inputs must hit cache");
    }

    #[tokio::test]
    async fn dimension_change_invalidates_every_segment() {
        let fs = Arc::new(InMemoryFileSystem::new());
        let slide = PathBuf::from("/r/data/slides/0.png");
        let audio = PathBuf::from("/r/data/cache/es/audio/0.aud");
        seed_slide_and_audio(&fs, &slide, &audio).await;

        let store = Arc::new(FsArtifactStore::new(fs.clone()));
        let encoder = Arc::new(StubEncoder {
            render_calls: AtomicUsize::new(0),
            images: [slide.clone()].into_iter().collect(),
            written: Mutex::new(Vec::new()),
            fs: fs.clone(),
        });
        let stage = RenderStage::new(fs, store, encoder.clone(), Arc::new(NullProgressSink), None);
        let lang = LanguageCode::new("es");
        let token = CancellationToken::new();
        let p = paths();

        stage
            .render_all(&token, &p, &lang, &[slide.clone()], &[audio.clone()], 1920, 1080)
            .await
            .unwrap();
        stage.render_all(&token, &p, &lang, &[slide], &[audio], 1280, 720).await.unwrap();
        assert_eq!(encoder.render_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn slide_byte_change_rerenders_only_that_segment() {
        let fs = Arc::new(InMemoryFileSystem::new());
        let slide0 = PathBuf::from("/r/data/slides/0.png");
        let slide1 = PathBuf::from("/r/data/slides/1.png");
        let audio0 = PathBuf::from("/r/data/cache/es/audio/0.aud");
        let audio1 = PathBuf::from("/r/data/cache/es/audio/1.aud");
        seed_slide_and_audio(&fs, &slide0, &audio0).await;
        seed_slide_and_audio(&fs, &slide1, &audio1).await;

        let store = Arc::new(FsArtifactStore::new(fs.clone()));
        let encoder = Arc::new(StubEncoder {
            render_calls: AtomicUsize::new(0),
            images: [slide0.clone(), slide1.clone()].into_iter().collect(),
            written: Mutex::new(Vec::new()),
            fs: fs.clone(),
        });
        let stage = RenderStage::new(fs.clone(), store, encoder.clone(), Arc::new(NullProgressSink), None);
        let lang = LanguageCode::new("es");
        let token = CancellationToken::new();
        let p = paths();
        let slides = vec![slide0.clone(), slide1.clone()];
        let audios = vec![audio0.clone(), audio1.clone()];

        stage.render_all(&token, &p, &lang, &slides, &audios, 100, 100).await.unwrap();
        assert_eq!(encoder.render_calls.load(Ordering::SeqCst), 2);

        fs.write(&slide1, b"changed-bytes").await.unwrap();
        stage.render_all(&token, &p, &lang, &slides, &audios, 100, 100).await.unwrap();
        assert_eq!(encoder.render_calls.load(Ordering::SeqCst), 3, "only slide1's segment should re-render");
    }

    struct VideoSourceEncoder {
        render_calls: AtomicUsize,
        probe_calls: Mutex<Vec<PathBuf>>,
        video_duration: Duration,
        audio_duration: Duration,
        fs: Arc<InMemoryFileSystem>,
    }

    #[async_trait::async_trait]
    impl Encoder for VideoSourceEncoder {
        async fn probe(&self, _token: &CancellationToken, path: &std::path::Path) -> Result<ProbeResult, PipelineError> {
            self.probe_calls.lock().unwrap().push(path.to_path_buf());
            if path.extension().and_then(|e| e.to_str()) == Some("aud") {
                Ok(ProbeResult {
                    kind: SourceKind::Image,
                    width: 0,
                    height: 0,
                    duration: Some(self.audio_duration),
                })
            } else {
                Ok(ProbeResult {
                    kind: SourceKind::Video,
                    width: 1920,
                    height: 1080,
                    duration: Some(self.video_duration),
                })
            }
        }

        async fn render_segment(
            &self,
            _token: &CancellationToken,
            _slide: &std::path::Path,
            _audio: &std::path::Path,
            out: &std::path::Path,
            _target_width: u32,
            _target_height: u32,
            _source_kind: SourceKind,
            _duration: Option<Duration>,
        ) -> Result<(), PipelineError> {
            self.render_calls.fetch_add(1, Ordering::SeqCst);
            self.fs.write(out, b"segment-bytes").await
        }

        async fn concat(&self, _token: &CancellationToken, _segments: &[PathBuf], _out: &std::path::Path) -> Result<(), PipelineError> {
            unreachable!("not exercised by render stage tests")
        }

        async fn cross_fade(
            &self,
            _token: &CancellationToken,
            _segments: &[PathBuf],
            _kind: slidecast_domain::value_objects::TransitionKind,
            _duration_ms: u64,
            _out: &std::path::Path,
        ) -> Result<(), PipelineError> {
            unreachable!("not exercised by render stage tests")
        }
    }

    #[tokio::test]
    async fn video_source_with_short_audio_still_renders_with_trailing_silence() {
        let fs = Arc::new(InMemoryFileSystem::new());
        let slide = PathBuf::from("/r/data/slides/0.mp4");
        let audio = PathBuf::from("/r/data/cache/es/audio/0.aud");
        seed_slide_and_audio(&fs, &slide, &audio).await;

        let store = Arc::new(FsArtifactStore::new(fs.clone()));
        let encoder = Arc::new(VideoSourceEncoder {
            render_calls: AtomicUsize::new(0),
            probe_calls: Mutex::new(Vec::new()),
            video_duration: Duration::from_secs(5),
            audio_duration: Duration::from_secs(3),
            fs: fs.clone(),
        });
        let stage = RenderStage::new(fs, store, encoder.clone(), Arc::new(NullProgressSink), None);
        let lang = LanguageCode::new("es");
        let token = CancellationToken::new();
        let p = paths();

        stage.render_all(&token, &p, &lang, &[slide.clone()], &[audio.clone()], 1920, 1080).await.unwrap();

        assert_eq!(encoder.render_calls.load(Ordering::SeqCst), 1, "short audio warns but still renders");
        assert!(
            encoder.probe_calls.lock().unwrap().contains(&audio),
            "the audio track must be probed to compare its duration against the video-source slide"
        );
    }

    #[test]
    fn audio_short_warning_threshold() {
        assert!(RenderStage::<InMemoryFileSystem, FsArtifactStore<InMemoryFileSystem>, StubEncoder>::audio_is_short(
            Duration::from_secs(5),
            Duration::from_secs(3)
        ));
        assert!(!RenderStage::<InMemoryFileSystem, FsArtifactStore<InMemoryFileSystem>, StubEncoder>::audio_is_short(
            Duration::from_secs(5),
            Duration::from_secs_f64(4.5)
        ));
    }
}
