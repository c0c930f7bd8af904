// /////////////////////////////////////////////////////////////////////////////
// Slidecast
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// /////////////////////////////////////////////////////////////////////////////

//! Infrastructure layer: concrete adapters for the capability ports defined
//! in `slidecast-domain`. Real collaborator clients (Translator,
//! SpeechSynth, Encoder, PresentationFetcher) are out of scope for this
//! core (§1) — only test/dry-run stand-ins live under `adapters`.

pub mod adapters;
pub mod config;
pub mod metrics;
pub mod services;
