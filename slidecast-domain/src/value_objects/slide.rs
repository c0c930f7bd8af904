// /////////////////////////////////////////////////////////////////////////////
// Slidecast
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// /////////////////////////////////////////////////////////////////////////////

//! Slide value objects: a slide is a path to either a still image or a short
//! video clip. Listing the slides directory (top-level files only,
//! lexicographic order) is a `FileSystem`-port operation; this module only
//! owns the pure classification logic.

use std::path::{Path, PathBuf};

/// Extensions recognized as still images.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];
/// Extensions recognized as video clips.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "mkv", "webm", "avi"];

/// Whether a slide's underlying media is a still image or a video clip.
/// Distinct from `SourceKind` (services::encoder), which is the
/// Encoder-probed runtime classification; this one is a cheap extension
/// sniff used before a slide is ever handed to the Encoder collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideMediaKind {
    Image,
    Video,
}

/// A single slide: an ordered position plus the path to its source media.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    pub index: usize,
    pub path: PathBuf,
}

impl Slide {
    pub fn new(index: usize, path: impl Into<PathBuf>) -> Self {
        Self {
            index,
            path: path.into(),
        }
    }

    /// Classifies by extension. Returns `None` for an unrecognized
    /// extension; callers treat that as a listing-filter bug since the
    /// slides directory listing is supposed to already have filtered by
    /// extension set.
    pub fn media_kind(&self) -> Option<SlideMediaKind> {
        media_kind_of(&self.path)
    }
}

/// Classifies a path by its extension against the recognized extension
/// sets. Extension comparison is case-insensitive.
pub fn media_kind_of(path: &Path) -> Option<SlideMediaKind> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        Some(SlideMediaKind::Image)
    } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        Some(SlideMediaKind::Video)
    } else {
        None
    }
}

/// True iff the extension is one of the slide-eligible extensions (§6:
/// "filter by extension set"). Used by the slides-directory listing to
/// decide which top-level files participate.
pub fn is_slide_extension(path: &Path) -> bool {
    media_kind_of(path).is_some()
}
