// /////////////////////////////////////////////////////////////////////////////
// Slidecast
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// /////////////////////////////////////////////////////////////////////////////

//! # slidecast-domain
//!
//! Pure domain layer: value objects, the fingerprint builder, cooperative
//! cancellation, the typed error, and the capability-port traits
//! (Translator, SpeechSynth, Encoder, PresentationFetcher, FileSystem,
//! ArtifactStore, ProgressSink) stage implementations in the `slidecast`
//! crate are built against. Nothing here talks to a network, a subprocess,
//! or the real filesystem — those live on the other side of the traits.

pub mod cancellation;
pub mod error;
pub mod fingerprint;
pub mod services;
pub mod test_support;
pub mod value_objects;

pub use cancellation::CancellationToken;
pub use error::PipelineError;
pub use fingerprint::{fingerprint, Chunk, Fingerprint, FingerprintBuilder};
