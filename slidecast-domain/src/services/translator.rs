// /////////////////////////////////////////////////////////////////////////////
// Slidecast
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// /////////////////////////////////////////////////////////////////////////////

//! # Translator
//!
//! External collaborator (§6). Deliberately out of scope for this core
//! (§1): no concrete LLM/translation-API client lives here, only the
//! contract the Translation Stage calls through. The batch form is called
//! once per miss per language; implementations may parallelize internally.

use crate::cancellation::CancellationToken;
use crate::error::PipelineError;
use crate::value_objects::LanguageCode;
use async_trait::async_trait;

#[async_trait]
pub trait Translator: Send + Sync {
    /// Translates a single unit of text. Provided for collaborators that
    /// only expose a non-batched endpoint; the Translation Stage prefers
    /// `translate_batch`.
    async fn translate(&self, token: &CancellationToken, text: &str, target_lang: &LanguageCode) -> Result<String, PipelineError>;

    /// Translates every unit of a script in one call. Implementations may
    /// parallelize internally (§4.3); the stage calls this exactly once per
    /// language per run, on a cache miss.
    async fn translate_batch(
        &self,
        token: &CancellationToken,
        texts: &[String],
        target_lang: &LanguageCode,
    ) -> Result<Vec<String>, PipelineError>;
}
