// /////////////////////////////////////////////////////////////////////////////
// Slidecast
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// /////////////////////////////////////////////////////////////////////////////

//! # Translation Stage (§4.3)
//!
//! Per-language cache of the translated script. The cache key is
//! intentionally just the on-disk presence of `cache/<lang>/text/texts.txt`
//! — not a fingerprint of the source script. §9's open question flags this
//! as preserved-but-arguably-loose: an operator who edits the source script
//! must clear or overwrite the cached translation themselves for a language
//! to pick up the change.

use slidecast_domain::services::{FileSystem, Translator};
use slidecast_domain::value_objects::{LanguageCode, RunPaths, Script};
use slidecast_domain::{CancellationToken, PipelineError};
use std::sync::Arc;

pub struct TranslationStage<F: FileSystem, T: Translator> {
    fs: Arc<F>,
    translator: Arc<T>,
}

impl<F: FileSystem, T: Translator> TranslationStage<F, T> {
    pub fn new(fs: Arc<F>, translator: Arc<T>) -> Self {
        Self { fs, translator }
    }

    /// Returns the translated script for `lang`, performing the cache
    /// protocol of §4.3:
    ///
    /// 1. `lang == source_lang` -> passthrough, zero collaborator calls.
    /// 2. cached file exists -> load and return it, no fingerprint check.
    /// 3. else -> call `TranslateBatch` once, save, return.
    pub async fn translate(
        &self,
        token: &CancellationToken,
        paths: &RunPaths,
        source: &Script,
        source_lang: &LanguageCode,
        target_lang: &LanguageCode,
    ) -> Result<Script, PipelineError> {
        if target_lang == source_lang {
            return Ok(source.clone());
        }

        let dest = paths.translated_text_path(target_lang);
        if self.fs.exists(&dest).await {
            let bytes = self.fs.read(&dest).await?;
            let text = String::from_utf8_lossy(&bytes);
            return Ok(Script::parse(&text));
        }

        token.check()?;
        let translated = self
            .translator
            .translate_batch(token, source.units(), target_lang)
            .await?;
        let script = Script::new(translated);
        let serialized = script.serialize()?;

        if let Some(parent) = dest.parent() {
            self.fs.create_dir_all(parent).await?;
        }
        self.fs.write(&dest, serialized.as_bytes()).await?;
        Ok(script)
    }
}
