// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Unix Platform Implementation
//!
//! POSIX implementation backing `Platform` on Linux and macOS, via `libc`
//! and `/proc`/`sysconf` where available.

use super::{Platform, PlatformError};
use async_trait::async_trait;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Unix platform implementation (Linux, macOS, BSD).
pub struct UnixPlatform;

impl UnixPlatform {
    pub fn new() -> Self {
        Self
    }

    fn sysconf(name: i32) -> i64 {
        // SAFETY: sysconf is a pure query of kernel-provided constants; no
        // pointers are passed and the return value is checked by the caller.
        unsafe { libc::sysconf(name) }
    }

    fn memory_info() -> Result<(u64, u64), PlatformError> {
        let page_size = Self::sysconf(libc::_SC_PAGESIZE).max(0) as u64;
        let total_pages = Self::sysconf(libc::_SC_PHYS_PAGES).max(0) as u64;
        let avail_pages = Self::sysconf(libc::_SC_AVPHYS_PAGES).max(0) as u64;
        Ok((total_pages * page_size, avail_pages * page_size))
    }
}

impl Default for UnixPlatform {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Platform for UnixPlatform {
    fn page_size(&self) -> usize {
        Self::sysconf(libc::_SC_PAGESIZE).max(4096) as usize
    }

    fn cpu_count(&self) -> usize {
        Self::sysconf(libc::_SC_NPROCESSORS_ONLN).max(1) as usize
    }

    fn total_memory(&self) -> Result<u64, PlatformError> {
        Self::memory_info().map(|(total, _)| total)
    }

    fn available_memory(&self) -> Result<u64, PlatformError> {
        Self::memory_info().map(|(_, available)| available)
    }

    fn line_separator(&self) -> &'static str {
        "\n"
    }

    fn path_separator(&self) -> char {
        ':'
    }

    fn platform_name(&self) -> &'static str {
        if cfg!(target_os = "macos") {
            "macos"
        } else {
            "linux"
        }
    }

    fn temp_dir(&self) -> PathBuf {
        std::env::temp_dir()
    }

    fn is_elevated(&self) -> bool {
        // SAFETY: geteuid takes no arguments and cannot fail.
        unsafe { libc::geteuid() == 0 }
    }

    fn set_permissions(&self, path: &Path, mode: u32) -> Result<(), PlatformError> {
        fs::set_permissions(path, fs::Permissions::from_mode(mode)).map_err(PlatformError::Io)
    }

    fn is_executable(&self, path: &Path) -> bool {
        match fs::metadata(path) {
            Ok(meta) => meta.permissions().mode() & 0o111 != 0,
            Err(_) => false,
        }
    }

    async fn sync_file(&self, file: &tokio::fs::File) -> Result<(), PlatformError> {
        file.sync_all().await.map_err(PlatformError::Io)
    }
}
