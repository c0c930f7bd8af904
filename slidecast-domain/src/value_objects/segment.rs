// /////////////////////////////////////////////////////////////////////////////
// Slidecast
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// /////////////////////////////////////////////////////////////////////////////

//! Segment and final descriptors (§3) — the in-memory shapes whose bytes and
//! scalars feed the Render and Assembly stages' fingerprints.

use crate::error::PipelineError;
use crate::fingerprint::{fingerprint, Chunk, Fingerprint};
use crate::value_objects::transition::TransitionKind;
use std::path::{Path, PathBuf};

/// Schema tag mixed into every segment fingerprint so that a future change
/// to the descriptor's shape (e.g. adding a new fingerprint input) doesn't
/// silently collide with fingerprints computed under the old schema.
pub const SEGMENT_SCHEMA_TAG: &str = "slidecast.segment.v1";
/// Same idea for the final/assembly fingerprint.
pub const FINAL_SCHEMA_TAG: &str = "slidecast.final.v1";

/// One per-slide render unit: the slide's source media, its synthesized
/// audio, and the target geometry every segment in a language must share.
#[derive(Debug, Clone)]
pub struct SegmentDescriptor {
    pub slide_path: PathBuf,
    pub audio_path: PathBuf,
    pub target_width: u32,
    pub target_height: u32,
    pub is_video_source: bool,
}

impl SegmentDescriptor {
    /// Fingerprint inputs: bytes of both files, target dimensions, and the
    /// fixed schema tag (§4.5). Invariant under the slide's pathname — it
    /// hashes bytes, not paths.
    pub fn fingerprint(&self) -> Result<Fingerprint, PipelineError> {
        fingerprint(vec![
            Chunk::Str(SEGMENT_SCHEMA_TAG),
            Chunk::File(&self.slide_path),
            Chunk::File(&self.audio_path),
            Chunk::U64(self.target_width as u64),
            Chunk::U64(self.target_height as u64),
        ])
    }
}

/// The assembled output: an ordered list of rendered segments plus the
/// transition configuration used to join them.
#[derive(Debug, Clone)]
pub struct FinalDescriptor {
    pub segment_paths: Vec<PathBuf>,
    pub transition_kind: TransitionKind,
    pub transition_duration_ms: u64,
}

impl FinalDescriptor {
    /// Fingerprint inputs: concatenation of every segment's bytes in order,
    /// then the transition kind string and duration in milliseconds (§3,
    /// §4.6). A transition-duration-only change (e.g. 0.5s -> 0.75s) must
    /// change this fingerprint even though every segment is untouched.
    pub fn fingerprint(&self) -> Result<Fingerprint, PipelineError> {
        let mut chunks = vec![Chunk::Str(FINAL_SCHEMA_TAG)];
        let paths: Vec<&Path> = self.segment_paths.iter().map(PathBuf::as_path).collect();
        for path in &paths {
            chunks.push(Chunk::File(path));
        }
        chunks.push(Chunk::Str(self.transition_kind.as_str()));
        chunks.push(Chunk::U64(self.transition_duration_ms));
        fingerprint(chunks)
    }
}
