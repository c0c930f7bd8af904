// /////////////////////////////////////////////////////////////////////////////
// Slidecast
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// /////////////////////////////////////////////////////////////////////////////

//! # Pipeline Error
//!
//! The error kinds named by the design: precondition failures raised before
//! any stage runs, collaborator failures from Translator/SpeechSynth/Encoder/
//! PresentationFetcher, storage failures from the filesystem abstraction, and
//! cooperative cancellation. None of these are retried by the core.

use thiserror::Error;

/// Canonical error type returned by every stage and by the orchestrator.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Raised before any stage executes: slide/script count mismatch,
    /// invalid transition configuration, no slides found, etc.
    #[error("precondition failed: {0}")]
    PreconditionFailure(String),

    /// A Translator/SpeechSynth/Encoder/PresentationFetcher call returned an
    /// error. The current artifact is not sealed.
    #[error("collaborator '{collaborator}' failed: {message}")]
    CollaboratorFailure {
        collaborator: &'static str,
        message: String,
    },

    /// A filesystem read/write failed. Same no-seal semantics as a
    /// collaborator failure.
    #[error("storage error at {path}: {source}")]
    StorageFailure {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The cancellation token was tripped.
    #[error("operation cancelled")]
    Cancelled,
}

impl PipelineError {
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::PreconditionFailure(msg.into())
    }

    pub fn collaborator(name: &'static str, msg: impl Into<String>) -> Self {
        Self::CollaboratorFailure {
            collaborator: name,
            message: msg.into(),
        }
    }

    pub fn storage(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::StorageFailure {
            path: path.into(),
            source,
        }
    }

    /// Precondition and cancellation errors are not tied to one language;
    /// everything else is attributable to the language whose worker raised
    /// it. Used by the orchestrator's error-aggregation/ranking policy.
    pub fn is_fatal_before_fanout(&self) -> bool {
        matches!(self, Self::PreconditionFailure(_))
    }
}
