// /////////////////////////////////////////////////////////////////////////////
// Slidecast
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// /////////////////////////////////////////////////////////////////////////////

//! Capability ports: the traits stage implementations call through instead
//! of talking to infrastructure directly (§6).

pub mod artifact_store;
pub mod encoder;
pub mod file_system;
pub mod presentation_fetcher;
pub mod progress_sink;
pub mod speech_synth;
pub mod translator;

pub use artifact_store::{ArtifactStore, FsArtifactStore};
pub use encoder::{Encoder, ProbeResult, SourceKind};
pub use file_system::{FileSystem, DEFAULT_DIR_MODE, DEFAULT_FILE_MODE};
pub use presentation_fetcher::{FetchedPresentation, PresentationFetcher};
pub use progress_sink::{NullProgressSink, ProgressEvent, ProgressSink, Stage};
pub use speech_synth::{AudioChunk, SpeechSynth};
pub use translator::Translator;
