// /////////////////////////////////////////////////////////////////////////////
// Slidecast
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// /////////////////////////////////////////////////////////////////////////////

//! # Command-Line Interface
//!
//! Bootstrap-layer CLI handling: parse with `clap`, then validate into the
//! process-level configuration options named by §6 (`inputLang`,
//! `outputLangs`, `rootDir`, `presentationId`, `transition.kind`,
//! `transition.durationSeconds`, `progressSink`). `progressSink` has no CLI
//! surface of its own — the composition root always wires a console
//! progress sink unless `--quiet` is given.
//!
//! ## Architecture
//!
//! ```text
//! 1. Cli::parse()           parse with clap
//! 2. ValidatedCli::try_from  validate languages, transition bounds, paths
//! 3. composition root        builds PipelineConfig + wires adapters
//! ```

use crate::config::{AppConfig, LogLevel};
use clap::Parser;
use slidecast_domain::value_objects::{LanguageCode, TransitionConfig, TransitionKind};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{arg}: {reason}")]
    InvalidValue { arg: String, reason: String },

    #[error("output-langs must list at least one language")]
    EmptyOutputLangs,

    #[error("output-langs must not repeat a language code: '{0}'")]
    DuplicateOutputLang(String),

    #[error("invalid transition configuration: {0}")]
    Transition(#[from] slidecast_domain::PipelineError),
}

/// Raw CLI surface, parsed by `clap` before any semantic validation.
#[derive(Parser, Debug)]
#[command(name = "slidecast", version, about = "Produce narrated slide-show videos in one or more languages")]
pub struct Cli {
    /// Path to a `slidecast.toml` layered under defaults and environment
    /// variables (`SLIDECAST_*`); CLI flags still take final precedence.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug-level logging.
    #[arg(long)]
    pub verbose: bool,

    /// Validate inputs and print the planned work without invoking any
    /// collaborator.
    #[arg(long)]
    pub dry_run: bool,

    /// Source language of `texts.txt` / fetched speaker notes.
    #[arg(long = "input-lang")]
    pub input_lang: Option<String>,

    /// Target languages to render, comma-separated. Order is preserved and
    /// is also the order errors are reported in (§7).
    #[arg(long = "output-langs", value_delimiter = ',')]
    pub output_langs: Vec<String>,

    /// Run root directory `R` (§3's directory layout).
    #[arg(long = "root-dir")]
    pub root_dir: Option<PathBuf>,

    /// Non-empty selects the remote `PresentationFetcher` source over the
    /// local `texts.txt` + slides directory.
    #[arg(long = "presentation-id")]
    pub presentation_id: Option<String>,

    /// One of none/fade/wipeleft/wiperight/wipeup/wipedown/slideleft/
    /// slideright/slideup/slidedown/dissolve.
    #[arg(long = "transition-kind", default_value = "none")]
    pub transition_kind: String,

    /// Seconds, in `[0, 5]`. Ignored (forced to 0) when `transition-kind` is
    /// `none`.
    #[arg(long = "transition-duration-seconds", default_value_t = 0.0)]
    pub transition_duration_seconds: f64,

    /// Suppress the console progress sink (a `NullProgressSink` is wired
    /// instead).
    #[arg(long)]
    pub quiet: bool,
}

/// Validated CLI configuration: all arguments range-checked and the
/// transition's cross-checked bounds (§4.6) already enforced.
#[derive(Debug, Clone)]
pub struct ValidatedCli {
    pub app_config: AppConfig,
    pub input_lang: LanguageCode,
    pub output_langs: Vec<LanguageCode>,
    pub root_dir: PathBuf,
    pub presentation_id: Option<String>,
    pub transition: TransitionConfig,
    pub quiet: bool,
}

/// Parse `std::env::args` with `clap` and validate the result.
///
/// Clap handles `--help`/`--version` itself and exits the process before
/// this function returns in those cases.
pub fn parse_and_validate() -> Result<ValidatedCli, ParseError> {
    validate(Cli::parse())
}

fn validate(cli: Cli) -> Result<ValidatedCli, ParseError> {
    if cli.output_langs.is_empty() {
        return Err(ParseError::EmptyOutputLangs);
    }

    let mut seen = std::collections::HashSet::new();
    for lang in &cli.output_langs {
        if !seen.insert(lang.as_str()) {
            return Err(ParseError::DuplicateOutputLang(lang.clone()));
        }
    }

    let transition_kind = TransitionKind::from_str_loose(&cli.transition_kind).map_err(|e| ParseError::InvalidValue {
        arg: "transition-kind".to_string(),
        reason: e.to_string(),
    })?;
    let transition = TransitionConfig::new(transition_kind, cli.transition_duration_seconds)?;

    let input_lang = LanguageCode::new(cli.input_lang.unwrap_or_else(|| "en".to_string()));
    let output_langs = cli.output_langs.into_iter().map(LanguageCode::new).collect();
    let root_dir = cli.root_dir.unwrap_or_else(|| PathBuf::from("."));

    let log_level = if cli.verbose { LogLevel::Debug } else { LogLevel::Info };
    let app_config = AppConfig::builder()
        .log_level(log_level)
        .verbose(cli.verbose)
        .dry_run(cli.dry_run)
        .config_path(cli.config.unwrap_or_else(|| PathBuf::from("slidecast.toml")))
        .build();

    Ok(ValidatedCli {
        app_config,
        input_lang,
        output_langs,
        root_dir,
        presentation_id: cli.presentation_id.filter(|s| !s.is_empty()),
        transition,
        quiet: cli.quiet,
    })
}
