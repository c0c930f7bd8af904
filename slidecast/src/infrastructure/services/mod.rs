// /////////////////////////////////////////////////////////////////////////////
// Slidecast
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// /////////////////////////////////////////////////////////////////////////////

//! Concrete service implementations this core does own: the real
//! filesystem adapter behind the `FileSystem` port. Everything else
//! (translation, speech, encoding, presentation fetching) is an external
//! collaborator the spec explicitly keeps out of scope.

pub mod tokio_file_system;

pub use tokio_file_system::TokioFileSystem;
