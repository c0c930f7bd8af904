// /////////////////////////////////////////////////////////////////////////////
// Slidecast
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// /////////////////////////////////////////////////////////////////////////////

//! Transition configuration for the Assembly stage (§4.6, §6).

use crate::error::PipelineError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The family of cross-fade transitions the Encoder collaborator can
/// realize, plus `None` for plain concatenation. `Dissolve` is documented as
/// an alias of `Fade` at the encoder layer (§4.6) but is kept distinct here
/// so the fingerprint and the emitted filter name both reflect what the
/// operator actually configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionKind {
    None,
    Fade,
    WipeLeft,
    WipeRight,
    WipeUp,
    WipeDown,
    SlideLeft,
    SlideRight,
    SlideUp,
    SlideDown,
    Dissolve,
}

impl TransitionKind {
    /// The wire/config string form used in §6 (`transition.kind`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Fade => "fade",
            Self::WipeLeft => "wipeleft",
            Self::WipeRight => "wiperight",
            Self::WipeUp => "wipeup",
            Self::WipeDown => "wipedown",
            Self::SlideLeft => "slideleft",
            Self::SlideRight => "slideright",
            Self::SlideUp => "slideup",
            Self::SlideDown => "slidedown",
            Self::Dissolve => "dissolve",
        }
    }

    pub fn from_str_loose(s: &str) -> Result<Self, PipelineError> {
        Ok(match s {
            "none" => Self::None,
            "fade" => Self::Fade,
            "wipeleft" => Self::WipeLeft,
            "wiperight" => Self::WipeRight,
            "wipeup" => Self::WipeUp,
            "wipedown" => Self::WipeDown,
            "slideleft" => Self::SlideLeft,
            "slideright" => Self::SlideRight,
            "slideup" => Self::SlideUp,
            "slidedown" => Self::SlideDown,
            "dissolve" => Self::Dissolve,
            other => return Err(PipelineError::precondition(format!("unrecognized transition kind '{other}'"))),
        })
    }

    /// The filter name the Encoder's cross-fade filter graph should use.
    /// `dissolve` maps to `fade`'s filter identity per §4.6.
    pub fn encoder_filter_name(&self) -> &'static str {
        match self {
            Self::Dissolve => "fade",
            other => other.as_str(),
        }
    }

    pub fn is_cross_fade(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Validated `(kind, duration)` pair. Construction enforces §4.6's bound:
/// `0 < duration_seconds <= 5.0` whenever `kind` is a cross-fade; `None`
/// forces duration to exactly zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionConfig {
    kind: TransitionKind,
    duration_seconds: f64,
}

impl TransitionConfig {
    pub fn new(kind: TransitionKind, duration_seconds: f64) -> Result<Self, PipelineError> {
        if !(0.0..=5.0).contains(&duration_seconds) {
            return Err(PipelineError::precondition(format!(
                "transition.durationSeconds must be within [0, 5], got {duration_seconds}"
            )));
        }
        if kind.is_cross_fade() && duration_seconds <= 0.0 {
            return Err(PipelineError::precondition(
                "cross-fade transitions require a duration greater than zero",
            ));
        }
        Ok(Self { kind, duration_seconds })
    }

    pub fn none() -> Self {
        Self {
            kind: TransitionKind::None,
            duration_seconds: 0.0,
        }
    }

    pub fn kind(&self) -> TransitionKind {
        self.kind
    }

    pub fn duration_seconds(&self) -> f64 {
        self.duration_seconds
    }

    /// Scaled to an integer number of milliseconds, matching the fingerprint
    /// input described in §3 ("Final descriptor").
    pub fn duration_ms(&self) -> u64 {
        (self.duration_seconds * 1000.0).round() as u64
    }

    pub fn is_plain_concat(&self) -> bool {
        matches!(self.kind, TransitionKind::None) || self.duration_seconds == 0.0
    }
}
