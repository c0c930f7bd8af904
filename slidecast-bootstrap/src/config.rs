// /////////////////////////////////////////////////////////////////////////////
// Slidecast
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// /////////////////////////////////////////////////////////////////////////////

//! # Bootstrap Configuration
//!
//! Bootstrap-phase settings only: how verbosely to log, where to look for
//! `slidecast.toml`, and whether a dry run was requested. The pipeline's own
//! configuration (input language, output languages, run directory,
//! transition, concurrency caps) is `slidecast::infrastructure::config::PipelineConfig`,
//! loaded separately once the composition root has a validated `AppConfig`
//! in hand.
//!
//! All configuration here is immutable after construction: built once from
//! CLI arguments in `cli.rs`, then handed to the composition root.

use std::path::PathBuf;

/// Log level configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

/// Bootstrap-phase configuration, immutable after construction.
#[derive(Debug, Clone)]
pub struct AppConfig {
    log_level: LogLevel,
    config_path: Option<PathBuf>,
    verbose: bool,
    dry_run: bool,
}

impl AppConfig {
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    pub fn config_path(&self) -> Option<&PathBuf> {
        self.config_path.as_ref()
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}

#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    log_level: Option<LogLevel>,
    config_path: Option<PathBuf>,
    verbose: bool,
    dry_run: bool,
}

impl AppConfigBuilder {
    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.log_level = Some(level);
        self
    }

    pub fn config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn verbose(mut self, enabled: bool) -> Self {
        self.verbose = enabled;
        self
    }

    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    pub fn build(self) -> AppConfig {
        AppConfig {
            log_level: self.log_level.unwrap_or_default(),
            config_path: self.config_path,
            verbose: self.verbose,
            dry_run: self.dry_run,
        }
    }
}
