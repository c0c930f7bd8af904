// /////////////////////////////////////////////////////////////////////////////
// Slidecast
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// /////////////////////////////////////////////////////////////////////////////

//! # Fingerprint
//!
//! A single disciplined builder for every cache key in the system. Every
//! stage's invalidation boundary is expressed as a sequence of [`Chunk`]s fed
//! to [`FingerprintBuilder`]; ad-hoc string concatenation as a hash input is
//! forbidden so the boundary stays auditable — a change in any declared
//! input flips the fingerprint, a change in an undeclared input (encoder
//! version, absolute path) does not.
//!
//! ## Encoding
//!
//! Each chunk is preceded by a one-byte tag identifying its kind and an
//! 8-byte little-endian length prefix, so the concatenation the hasher sees
//! is unambiguous regardless of chunk boundaries or content.

use crate::error::PipelineError;
use sha2::{Digest, Sha256};
use std::fmt;
use std::path::Path;

const TAG_BYTES: u8 = 0;
const TAG_STRING: u8 = 1;
const TAG_U64: u8 = 2;
const TAG_FILE: u8 = 3;

/// One input to a fingerprint computation.
pub enum Chunk<'a> {
    /// Raw bytes, hashed as given.
    Bytes(&'a [u8]),
    /// A UTF-8 string, hashed as its byte representation.
    Str(&'a str),
    /// A 64-bit integer, hashed little-endian.
    U64(u64),
    /// The entire contents of a file read from disk. The fingerprint builder
    /// always reads the whole file; mtime and size are never substituted for
    /// content.
    File(&'a Path),
}

/// A 256-bit content digest, rendered as 64 lowercase hex characters.
///
/// Deterministic and independent of absolute path: two chunk sequences that
/// differ only in the path used to reach a `Chunk::File` but whose bytes are
/// identical produce the same fingerprint.
#[derive(Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    pub fn as_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, PipelineError> {
        let trimmed = s.trim();
        let bytes = hex::decode(trimmed)
            .map_err(|e| PipelineError::precondition(format!("invalid fingerprint hex: {e}")))?;
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| PipelineError::precondition("fingerprint must be 32 bytes (64 hex chars)"))?;
        Ok(Self(arr))
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_hex())
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", self.as_hex())
    }
}

/// Builds a [`Fingerprint`] from an ordered sequence of [`Chunk`]s.
///
/// Every cache key in the system goes through this builder; see the module
/// docs for the rationale.
#[derive(Default)]
pub struct FingerprintBuilder {
    hasher: Sha256,
}

impl FingerprintBuilder {
    pub fn new() -> Self {
        Self { hasher: Sha256::new() }
    }

    fn write_tagged(&mut self, tag: u8, bytes: &[u8]) {
        self.hasher.update([tag]);
        self.hasher.update((bytes.len() as u64).to_le_bytes());
        self.hasher.update(bytes);
    }

    pub fn chunk(mut self, chunk: Chunk<'_>) -> Result<Self, PipelineError> {
        match chunk {
            Chunk::Bytes(b) => self.write_tagged(TAG_BYTES, b),
            Chunk::Str(s) => self.write_tagged(TAG_STRING, s.as_bytes()),
            Chunk::U64(n) => self.write_tagged(TAG_U64, &n.to_le_bytes()),
            Chunk::File(path) => {
                let bytes = std::fs::read(path).map_err(|e| PipelineError::storage(path.display().to_string(), e))?;
                self.write_tagged(TAG_FILE, &bytes);
            }
        }
        Ok(self)
    }

    pub fn finish(self) -> Fingerprint {
        let digest = self.hasher.finalize();
        let mut out = [0u8; 32];
        out.copy_from_slice(&digest);
        Fingerprint(out)
    }
}

/// Convenience entry point: fold a slice of chunks through a fresh builder.
pub fn fingerprint(chunks: Vec<Chunk<'_>>) -> Result<Fingerprint, PipelineError> {
    let mut builder = FingerprintBuilder::new();
    for chunk in chunks {
        builder = builder.chunk(chunk)?;
    }
    Ok(builder.finish())
}
