// /////////////////////////////////////////////////////////////////////////////
// Slidecast
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// /////////////////////////////////////////////////////////////////////////////

//! # slidecast
//!
//! Application and infrastructure layers of the narrated slide-show
//! pipeline: the four caching stages (Translation, Speech, Render,
//! Assembly), the Loading step that precedes them, the per-language
//! [`Orchestrator`] that fans work out and aggregates errors, and the
//! concrete adapters (real filesystem, layered configuration, metrics) that
//! plug into the capability ports defined in `slidecast-domain`.
//!
//! Concrete Translator/SpeechSynth/Encoder/PresentationFetcher
//! implementations are deliberately absent here: the purpose spec names
//! them external collaborators out of scope for this core, and the crate
//! depends only on their trait definitions.
//!
//! ## Architecture
//!
//! ```text
//! application/
//!   stages/        translation, speech, render, assembly — one cache
//!                  protocol each, built on ArtifactStore + Fingerprint
//!   use_cases/      loading + the per-language worker that chains stages
//!   orchestrator    fan-out, error aggregation, public entry point
//! infrastructure/
//!   services/       real FileSystem (tokio::fs-backed)
//!   config/         layered slidecast.toml -> SLIDECAST_* env -> CLI
//!   metrics/        prometheus counters/histograms per stage
//! ```

pub mod application;
pub mod infrastructure;

pub use application::orchestrator::{Orchestrator, OrchestratorConfig, RunOutcome};
pub use application::use_cases::load_run_inputs::{LoadedInputs, Loader};
