// /////////////////////////////////////////////////////////////////////////////
// Slidecast
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// /////////////////////////////////////////////////////////////////////////////

//! A `Translator` that returns its input unchanged. Wired by the
//! composition root for `--dry-run`, where no real translation endpoint is
//! configured but the Translation Stage's cache protocol still needs to run
//! end to end.

use async_trait::async_trait;
use slidecast_domain::services::Translator;
use slidecast_domain::value_objects::LanguageCode;
use slidecast_domain::{CancellationToken, PipelineError};

pub struct NoopTranslator;

#[async_trait]
impl Translator for NoopTranslator {
    async fn translate(&self, _token: &CancellationToken, text: &str, _target_lang: &LanguageCode) -> Result<String, PipelineError> {
        Ok(text.to_string())
    }

    async fn translate_batch(
        &self,
        _token: &CancellationToken,
        texts: &[String],
        _target_lang: &LanguageCode,
    ) -> Result<Vec<String>, PipelineError> {
        Ok(texts.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn passes_batch_through_unchanged() {
        let translator = NoopTranslator;
        let out = translator
            .translate_batch(&CancellationToken::new(), &["a".into(), "b".into()], &LanguageCode::new("es"))
            .await
            .unwrap();
        assert_eq!(out, vec!["a".to_string(), "b".to_string()]);
    }
}
