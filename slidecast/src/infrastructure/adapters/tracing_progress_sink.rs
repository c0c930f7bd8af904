// /////////////////////////////////////////////////////////////////////////////
// Slidecast
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// /////////////////////////////////////////////////////////////////////////////

//! Default console `ProgressSink` (§2 component 8, §6): routes every event
//! through `tracing` rather than printing directly, so progress lines share
//! the same formatting/filtering as the rest of the run. The composition
//! root swaps in `NullProgressSink` under `--quiet`.

use slidecast_domain::services::{ProgressEvent, ProgressSink};

pub struct TracingProgressSink;

impl ProgressSink for TracingProgressSink {
    fn notify(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::StageStart { lang, stage } => {
                tracing::info!(lang = lang.as_str(), stage = stage.as_str(), "stage started");
            }
            ProgressEvent::StageProgress { lang, stage, progress } => {
                tracing::debug!(lang = lang.as_str(), stage = stage.as_str(), progress, "stage progress");
            }
            ProgressEvent::StageComplete { lang, stage, error } => match error {
                Some(message) => tracing::warn!(lang = lang.as_str(), stage = stage.as_str(), message, "stage failed"),
                None => tracing::info!(lang = lang.as_str(), stage = stage.as_str(), "stage complete"),
            },
            ProgressEvent::ItemStart { lang, stage, item } => {
                tracing::debug!(lang = lang.as_str(), stage = stage.as_str(), item, "item started");
            }
            ProgressEvent::ItemProgress { lang, stage, item, progress } => {
                tracing::trace!(lang = lang.as_str(), stage = stage.as_str(), item, progress, "item progress");
            }
            ProgressEvent::ItemComplete { lang, stage, item, error } => match error {
                Some(message) => {
                    tracing::warn!(lang = lang.as_str(), stage = stage.as_str(), item, message, "item failed")
                }
                None => tracing::debug!(lang = lang.as_str(), stage = stage.as_str(), item, "item complete"),
            },
        }
    }
}
