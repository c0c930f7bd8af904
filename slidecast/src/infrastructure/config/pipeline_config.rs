// /////////////////////////////////////////////////////////////////////////////
// Slidecast
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// /////////////////////////////////////////////////////////////////////////////

//! # Pipeline Configuration
//!
//! The run-level settings named by §6 (`rootDir` excluded — that comes from
//! `ValidatedCli` and is not layered, it is always a CLI argument) plus the
//! ambient concerns §1 hands off to an external configuration collaborator:
//! the audio/container extension pair fixed "at pipeline configuration
//! time" (§3) and the concurrency caps of §5.
//!
//! Loaded with the `config` crate: built-in defaults, then an optional
//! `slidecast.toml`, then `SLIDECAST_*` environment variables, each layer
//! overriding the last. CLI flags (language list, transition, root dir)
//! are validated separately in `slidecast-bootstrap::cli` and applied on
//! top by the composition root, since they are per-invocation, not
//! per-deployment.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Audio/video format pair fixed at configuration time (§3: "Audio and
/// video container extensions are fixed at pipeline configuration time").
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct MediaConfig {
    #[serde(default = "default_audio_ext")]
    pub audio_extension: String,
    #[serde(default = "default_container_ext")]
    pub container_extension: String,
}

fn default_audio_ext() -> String {
    "aud".to_string()
}

fn default_container_ext() -> String {
    "mp4".to_string()
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            audio_extension: default_audio_ext(),
            container_extension: default_container_ext(),
        }
    }
}

/// Per-stage concurrency caps (§5). `0` is the on-disk/env encoding of
/// "unbounded within the batch", matching the spec's stated default.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
pub struct ConcurrencyConfig {
    #[serde(default)]
    pub speech_max_concurrency: usize,
    #[serde(default)]
    pub render_max_concurrency: usize,
}

impl ConcurrencyConfig {
    pub fn speech(&self) -> Option<usize> {
        (self.speech_max_concurrency != 0).then_some(self.speech_max_concurrency)
    }

    pub fn render(&self) -> Option<usize> {
        (self.render_max_concurrency != 0).then_some(self.render_max_concurrency)
    }
}

/// Top-level deployment configuration, layered and parsed once at startup.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PipelineConfig {
    #[serde(default)]
    pub media: MediaConfig,
    #[serde(default)]
    pub concurrency: ConcurrencyConfig,
}

impl PipelineConfig {
    /// Loads defaults -> `config_path` (if it exists) -> `SLIDECAST_*` env.
    /// A missing `config_path` is not an error: the file is optional, and
    /// defaults plus environment overrides are a complete configuration on
    /// their own.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("media.audio_extension", default_audio_ext())?
            .set_default("media.container_extension", default_container_ext())?
            .set_default("concurrency.speech_max_concurrency", 0i64)?
            .set_default("concurrency.render_max_concurrency", 0i64)?;

        if let Some(path) = config_path {
            if path.exists() {
                builder = builder.add_source(File::from(path));
            }
        }

        builder = builder.add_source(Environment::with_prefix("SLIDECAST").separator("__"));

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_any_file_or_env() {
        let cfg = PipelineConfig::load(None).unwrap();
        assert_eq!(cfg.media.audio_extension, "aud");
        assert_eq!(cfg.media.container_extension, "mp4");
        assert_eq!(cfg.concurrency.speech(), None);
        assert_eq!(cfg.concurrency.render(), None);
    }

    #[test]
    fn missing_config_file_path_is_not_an_error() {
        let cfg = PipelineConfig::load(Some(Path::new("/nonexistent/slidecast.toml")));
        assert!(cfg.is_ok());
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slidecast.toml");
        std::fs::write(&path, "[media]\naudio_extension = \"wav\"\n[concurrency]\nspeech_max_concurrency = 4\n").unwrap();

        let cfg = PipelineConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.media.audio_extension, "wav");
        assert_eq!(cfg.concurrency.speech(), Some(4));
    }

    #[test]
    fn zero_concurrency_means_unbounded() {
        let cfg = ConcurrencyConfig {
            speech_max_concurrency: 0,
            render_max_concurrency: 8,
        };
        assert_eq!(cfg.speech(), None);
        assert_eq!(cfg.render(), Some(8));
    }
}
