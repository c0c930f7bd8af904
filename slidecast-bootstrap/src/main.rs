// /////////////////////////////////////////////////////////////////////////////
// Slidecast
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// /////////////////////////////////////////////////////////////////////////////

//! # Composition Root
//!
//! Parses and validates the CLI, initializes logging, loads the layered
//! pipeline configuration, wires the concrete `FileSystem`/`ArtifactStore`
//! adapters plus the stand-ins for the out-of-scope collaborator ports, and
//! runs the `Orchestrator` to completion (or to the first fatal error).
//!
//! `--dry-run` stops after Loading: it validates the script/slide count
//! invariant and prints the planned per-language work without invoking any
//! collaborator, matching the CLI's own documented contract. A full run
//! wires passthrough stand-ins for Translation/Speech (meaningful without a
//! real endpoint) and an always-`Unavailable` stand-in for Encoder/
//! PresentationFetcher (§1: real encoder and remote-fetch integrations are
//! external collaborators out of scope for this core) — such a run
//! completes Loading/Translation/Speech but fails at Render with a
//! `CollaboratorFailure` naming `Encoder`, mapped to exit code 69.

use slidecast::infrastructure::adapters::{
    FixedSpeechSynth, NoopTranslator, TracingProgressSink, UnavailableEncoder, UnavailablePresentationFetcher,
};
use slidecast::infrastructure::config::PipelineConfig;
use slidecast::infrastructure::services::TokioFileSystem;
use slidecast::{Orchestrator, OrchestratorConfig};
use slidecast_bootstrap::shutdown::ShutdownCoordinator;
use slidecast_bootstrap::signals::{create_signal_handler, SystemSignals};
use slidecast_bootstrap::{exit_code::ExitCode, map_pipeline_error_to_exit_code, parse_and_validate};
use slidecast_domain::services::{FsArtifactStore, NullProgressSink, ProgressSink};
use slidecast_domain::value_objects::{RunPaths, SlideSelection};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let validated = match parse_and_validate() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("slidecast: {e}");
            std::process::exit(ExitCode::UsageError.as_i32());
        }
    };

    init_logging(validated.app_config.log_level().to_tracing_level());

    let pipeline_config = match PipelineConfig::load(validated.app_config.config_path().map(|p| p.as_path())) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("slidecast: failed to load configuration: {e}");
            std::process::exit(ExitCode::Config.as_i32());
        }
    };

    let shutdown = ShutdownCoordinator::new(Duration::from_secs(5));
    let token = shutdown.token();
    let shutdown_for_signals = shutdown.clone();
    tokio::spawn(async move {
        create_signal_handler()
            .wait_for_signal(Box::new(move || shutdown_for_signals.initiate_shutdown()))
            .await;
    });

    let paths = RunPaths::new(
        validated.root_dir.clone(),
        pipeline_config.media.audio_extension.clone(),
        pipeline_config.media.container_extension.clone(),
    );

    let exit_code = if validated.app_config.is_dry_run() {
        run_dry(&token, &paths, &validated).await
    } else {
        run_full(&token, &paths, &validated, &pipeline_config).await
    };

    shutdown.complete_shutdown();
    std::process::exit(exit_code.as_i32());
}

fn init_logging(level: tracing::Level) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Loads and validates inputs, then prints the planned work without
/// touching any collaborator (CLI's documented `--dry-run` contract).
async fn run_dry(
    token: &slidecast_domain::CancellationToken,
    paths: &RunPaths,
    validated: &slidecast_bootstrap::ValidatedCli,
) -> ExitCode {
    let fs = Arc::new(TokioFileSystem);
    let loader = slidecast::Loader::<TokioFileSystem, UnavailablePresentationFetcher>::new(fs, None);

    match loader
        .load(
            token,
            paths,
            validated.presentation_id.as_deref(),
            &SlideSelection::All,
        )
        .await
    {
        Ok(inputs) => {
            println!("dry run: {} slides loaded, {} languages planned:", inputs.slides.len(), validated.output_langs.len());
            for lang in &validated.output_langs {
                println!("  - {}", lang.as_str());
            }
            ExitCode::Success
        }
        Err(e) => {
            eprintln!("slidecast: {e}");
            map_pipeline_error_to_exit_code(&e)
        }
    }
}

async fn run_full(
    token: &slidecast_domain::CancellationToken,
    paths: &RunPaths,
    validated: &slidecast_bootstrap::ValidatedCli,
    pipeline_config: &PipelineConfig,
) -> ExitCode {
    let fs = Arc::new(TokioFileSystem);
    let store = Arc::new(FsArtifactStore::new(fs.clone()));
    let translator = Arc::new(NoopTranslator);
    let synth = Arc::new(FixedSpeechSynth::counting());
    let encoder = Arc::new(UnavailableEncoder);
    let fetcher: Option<Arc<UnavailablePresentationFetcher>> = validated
        .presentation_id
        .as_ref()
        .map(|_| Arc::new(UnavailablePresentationFetcher));

    let progress: Arc<dyn ProgressSink> = if validated.quiet {
        Arc::new(NullProgressSink)
    } else {
        Arc::new(TracingProgressSink)
    };

    let config = OrchestratorConfig {
        speech_concurrency: pipeline_config.concurrency.speech(),
        render_concurrency: pipeline_config.concurrency.render(),
    };

    let orchestrator = Orchestrator::new(fs, store, translator, synth, encoder, fetcher, progress, config);

    match orchestrator
        .run(
            token,
            paths,
            &validated.input_lang,
            &validated.output_langs,
            validated.presentation_id.as_deref(),
            &SlideSelection::All,
            &validated.transition,
        )
        .await
    {
        Ok(outcome) => {
            for (lang, path) in outcome.containers {
                println!("{}: {}", lang.as_str(), path.display());
            }
            ExitCode::Success
        }
        Err(e) => {
            eprintln!("slidecast: {e}");
            map_pipeline_error_to_exit_code(&e)
        }
    }
}
