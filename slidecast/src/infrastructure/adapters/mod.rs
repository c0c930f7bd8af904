// /////////////////////////////////////////////////////////////////////////////
// Slidecast
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// /////////////////////////////////////////////////////////////////////////////

//! Minimal stand-ins for the out-of-scope collaborator ports, wired by the
//! composition root when no real translator/synth/encoder/fetcher has been
//! configured, and reused by this crate's own stage tests instead of
//! duplicating mocks per test module. Also the default console
//! `ProgressSink`.

pub mod fixed_speech_synth;
pub mod noop_translator;
pub mod tracing_progress_sink;
pub mod unavailable_encoder;
pub mod unavailable_presentation_fetcher;

pub use fixed_speech_synth::FixedSpeechSynth;
pub use noop_translator::NoopTranslator;
pub use tracing_progress_sink::TracingProgressSink;
pub use unavailable_encoder::UnavailableEncoder;
pub use unavailable_presentation_fetcher::UnavailablePresentationFetcher;
