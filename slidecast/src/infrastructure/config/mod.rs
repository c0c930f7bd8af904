// /////////////////////////////////////////////////////////////////////////////
// Slidecast
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// /////////////////////////////////////////////////////////////////////////////

//! Layered pipeline configuration: defaults -> `slidecast.toml` ->
//! `SLIDECAST_*` environment -> CLI overrides applied by the composition
//! root (§6's "Process-level configuration" plus the ambient concerns
//! `slidecast.toml` covers that the spec leaves to an external
//! configuration collaborator: media extensions, concurrency caps).

pub mod pipeline_config;

pub use pipeline_config::{ConcurrencyConfig, MediaConfig, PipelineConfig};
