// /////////////////////////////////////////////////////////////////////////////
// Slidecast
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// /////////////////////////////////////////////////////////////////////////////

//! # Bootstrap Module
//!
//! The bootstrap crate sits **outside** the domain and application layers
//! and provides:
//!
//! - **Entry point** — `main.rs`'s application lifecycle
//! - **Platform abstraction** — OS-specific operations (POSIX vs Windows)
//! - **Signal handling** — graceful shutdown (SIGTERM, SIGINT, SIGHUP)
//! - **Argument parsing** — `clap`-based CLI validated into the options
//!   named by §6 (`inputLang`, `outputLangs`, `rootDir`, `presentationId`,
//!   `transition`)
//! - **Shutdown coordination** — owns the root `slidecast_domain::CancellationToken`
//!   and reacts to OS signals
//! - **Composition root** — wires concrete adapters (filesystem,
//!   collaborators, progress sink) into `slidecast::Orchestrator`
//!
//! ## Architecture Position
//!
//! ```text
//! slidecast-bootstrap (entry point, CLI, signals, composition root)
//!            │
//!            ▼
//!        slidecast (stages, orchestrator, infrastructure adapters)
//!            │
//!            ▼
//!   slidecast-domain (value objects, capability traits, errors)
//! ```
//!
//! Bootstrap can depend on both other crates; neither of them depends back
//! on bootstrap.

pub mod cli;
pub mod config;
pub mod exit_code;
pub mod logger;
pub mod platform;
pub mod shutdown;
pub mod signals;

pub use cli::{parse_and_validate, ParseError, ValidatedCli};
pub use exit_code::{ExitCode};

/// Map a `slidecast_domain::PipelineError` to the exit code `main` returns.
///
/// Mirrors the §7 error kinds: precondition failures are a usage/data
/// problem (64), collaborator and storage failures are treated as I/O
/// trouble (74), and cancellation maps to the conventional SIGINT exit
/// status (130) since it only ever originates from the shutdown
/// coordinator reacting to a signal.
pub fn map_pipeline_error_to_exit_code(error: &slidecast_domain::PipelineError) -> ExitCode {
    use slidecast_domain::PipelineError;
    match error {
        PipelineError::PreconditionFailure(_) => ExitCode::DataError,
        PipelineError::CollaboratorFailure { .. } => ExitCode::Unavailable,
        PipelineError::StorageFailure { .. } => ExitCode::IoError,
        PipelineError::Cancelled => ExitCode::Interrupted,
    }
}
