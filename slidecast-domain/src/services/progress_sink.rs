// /////////////////////////////////////////////////////////////////////////////
// Slidecast
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// /////////////////////////////////////////////////////////////////////////////

//! # Progress Sink
//!
//! Receives stage and item events for UIs/logs (§2 component 8, §6). Events
//! are advisory only: no stage blocks on their delivery, and a sink
//! implementation must not be able to fail the run by erroring or panicking
//! on an event it doesn't like — hence `notify` is infallible.

use crate::value_objects::LanguageCode;

/// One of the four pipeline stages an event can be about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Loading,
    Translation,
    Speech,
    Render,
    Assembly,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Translation => "translation",
            Self::Speech => "speech",
            Self::Render => "render",
            Self::Assembly => "assembly",
        }
    }
}

/// The six events named in §6: stage start/progress/complete and item
/// start/progress/complete. `progress` is a 0-100 integer.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    StageStart {
        lang: LanguageCode,
        stage: Stage,
    },
    StageProgress {
        lang: LanguageCode,
        stage: Stage,
        progress: u8,
    },
    StageComplete {
        lang: LanguageCode,
        stage: Stage,
        error: Option<String>,
    },
    ItemStart {
        lang: LanguageCode,
        stage: Stage,
        item: usize,
    },
    ItemProgress {
        lang: LanguageCode,
        stage: Stage,
        item: usize,
        progress: u8,
    },
    ItemComplete {
        lang: LanguageCode,
        stage: Stage,
        item: usize,
        error: Option<String>,
    },
}

/// Progress sink capability. Implementations must be safe under concurrent
/// calls (§5): every stage calls this from its own worker task.
pub trait ProgressSink: Send + Sync {
    fn notify(&self, event: ProgressEvent);
}

/// A sink that discards every event, for callers (and tests) with no UI.
pub struct NullProgressSink;

impl ProgressSink for NullProgressSink {
    fn notify(&self, _event: ProgressEvent) {}
}
