// /////////////////////////////////////////////////////////////////////////////
// Slidecast
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// /////////////////////////////////////////////////////////////////////////////

//! # Slide Selection
//!
//! §9's redesign note: replace the upstream configuration collaborator's
//! untyped `"all"` / list-of-indices selector with a proper sum type rather
//! than a variant-typed field. The Loading stage narrows the full slide list
//! down to this selection before validating `|slides| = |script|`.

use crate::error::PipelineError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlideSelection {
    All,
    Explicit(Vec<usize>),
}

impl SlideSelection {
    /// Applies the selection to a full ordered slide list, preserving
    /// `Explicit`'s given order (it is not re-sorted: callers that want
    /// lexicographic order pass indices already in that order).
    pub fn apply<T: Clone>(&self, all: &[T]) -> Result<Vec<T>, PipelineError> {
        match self {
            Self::All => Ok(all.to_vec()),
            Self::Explicit(indices) => indices
                .iter()
                .map(|&i| {
                    all.get(i)
                        .cloned()
                        .ok_or_else(|| PipelineError::precondition(format!("slide selection index {i} out of range (have {})", all.len())))
                })
                .collect(),
        }
    }
}

impl Default for SlideSelection {
    fn default() -> Self {
        Self::All
    }
}
