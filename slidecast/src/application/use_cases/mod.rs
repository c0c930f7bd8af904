// /////////////////////////////////////////////////////////////////////////////
// Slidecast
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// /////////////////////////////////////////////////////////////////////////////

//! Use cases that sit above the four caching stages: acquiring the run's
//! inputs (§4.7 Loading) and driving one language's worker through its
//! state machine.

pub mod language_worker;
pub mod load_run_inputs;

pub use language_worker::{run_language, LanguageWorkerState};
pub use load_run_inputs::{LoadedInputs, Loader};
