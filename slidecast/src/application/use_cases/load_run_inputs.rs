// /////////////////////////////////////////////////////////////////////////////
// Slidecast
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// /////////////////////////////////////////////////////////////////////////////

//! # Loading (§4.7 step 1)
//!
//! Acquires the script and slides from one of two mutually exclusive
//! sources: local (`texts.txt` + a slides directory) or a remote
//! presentation fetch. Validates `|slides| = |script|` — the one
//! precondition failure that must be raised before any stage executes.

use slidecast_domain::services::{FileSystem, PresentationFetcher};
use slidecast_domain::value_objects::{is_slide_extension, RunPaths, Script, SlideSelection};
use slidecast_domain::{CancellationToken, PipelineError};
use std::path::PathBuf;
use std::sync::Arc;

/// The script and ordered slide paths a run proceeds with, already
/// validated to be equal in length.
pub struct LoadedInputs {
    pub script: Script,
    pub slides: Vec<PathBuf>,
}

pub struct Loader<F: FileSystem, P: PresentationFetcher> {
    fs: Arc<F>,
    fetcher: Option<Arc<P>>,
}

impl<F: FileSystem, P: PresentationFetcher> Loader<F, P> {
    pub fn new(fs: Arc<F>, fetcher: Option<Arc<P>>) -> Self {
        Self { fs, fetcher }
    }

    /// Loads inputs per §4.7 step 1. `presentation_id` non-empty selects the
    /// remote source; otherwise reads `texts.txt` and lists the slides
    /// directory locally.
    pub async fn load(
        &self,
        token: &CancellationToken,
        paths: &RunPaths,
        presentation_id: Option<&str>,
        selection: &SlideSelection,
    ) -> Result<LoadedInputs, PipelineError> {
        let (script, slides) = match presentation_id {
            Some(id) if !id.is_empty() => self.load_remote(token, paths, id).await?,
            _ => self.load_local(paths).await?,
        };

        let slides = selection.apply(&slides)?;

        if slides.len() != script.len() {
            return Err(PipelineError::precondition(format!(
                "slide/script count mismatch: {} slides, {} script units",
                slides.len(),
                script.len()
            )));
        }
        if slides.is_empty() {
            return Err(PipelineError::precondition("no slides found"));
        }

        Ok(LoadedInputs { script, slides })
    }

    async fn load_local(&self, paths: &RunPaths) -> Result<(Script, Vec<PathBuf>), PipelineError> {
        let text_path = paths.texts_path();
        let script = if self.fs.exists(&text_path).await {
            let bytes = self.fs.read(&text_path).await?;
            Script::parse(&String::from_utf8_lossy(&bytes))
        } else {
            Script::new(Vec::new())
        };

        let mut slides = self
            .fs
            .read_dir(&paths.slides_dir())
            .await?
            .into_iter()
            .filter(|p| is_slide_extension(p))
            .collect::<Vec<_>>();
        // §3: "Ordering is lexicographic on filename within the slides
        // directory." `read_dir` already returns top-level entries only.
        slides.sort();
        Ok((script, slides))
    }

    async fn load_remote(&self, token: &CancellationToken, paths: &RunPaths, id: &str) -> Result<(Script, Vec<PathBuf>), PipelineError> {
        let fetcher = self
            .fetcher
            .as_ref()
            .ok_or_else(|| PipelineError::precondition("a presentation id was given but no PresentationFetcher is configured"))?;

        let fetched = fetcher.fetch(token, id, &paths.slides_dir()).await?;
        let script = Script::new(fetched.notes);

        // §4.7: "the orchestrator saves those notes as texts.txt
        // (best-effort; a write failure is logged but does not abort the
        // run)".
        if let Ok(serialized) = script.serialize() {
            if let Err(e) = self.fs.write(&paths.texts_path(), serialized.as_bytes()).await {
                tracing::warn!(error = %e, "failed to persist fetched presentation notes to texts.txt; continuing with in-memory script");
            }
        } else {
            tracing::warn!("fetched presentation notes could not be serialized (delimiter collision); texts.txt not written");
        }

        Ok((script, fetched.slide_paths))
    }
}
