// /////////////////////////////////////////////////////////////////////////////
// Slidecast
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// /////////////////////////////////////////////////////////////////////////////

//! Directory layout under a run root, per §3:
//!
//! ```text
//! R/data/texts.txt
//! R/data/slides/
//! R/data/cache/<lang>/text/texts.txt
//! R/data/cache/<lang>/audio/<i>.aud, ...hash, hashes
//! R/data/out/.temp/segment_<i>.vid, ...hash
//! R/data/out/output-<lang>.container, ...hash
//! ```
//!
//! Centralizing path construction here means every stage agrees on layout
//! without string-building path fragments ad hoc.

use crate::value_objects::language::LanguageCode;
use std::path::{Path, PathBuf};

/// Path builder rooted at a run directory `R`.
#[derive(Debug, Clone)]
pub struct RunPaths {
    root: PathBuf,
    audio_ext: String,
    container_ext: String,
    segment_ext: String,
}

impl RunPaths {
    pub fn new(root: impl Into<PathBuf>, audio_ext: impl Into<String>, container_ext: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            audio_ext: audio_ext.into(),
            container_ext: container_ext.into(),
            segment_ext: "vid".to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.join("data")
    }

    pub fn texts_path(&self) -> PathBuf {
        self.data_dir().join("texts.txt")
    }

    pub fn slides_dir(&self) -> PathBuf {
        self.data_dir().join("slides")
    }

    pub fn cache_dir(&self, lang: &LanguageCode) -> PathBuf {
        self.data_dir().join("cache").join(lang.as_str())
    }

    pub fn translated_text_path(&self, lang: &LanguageCode) -> PathBuf {
        self.cache_dir(lang).join("text").join("texts.txt")
    }

    pub fn audio_dir(&self, lang: &LanguageCode) -> PathBuf {
        self.cache_dir(lang).join("audio")
    }

    pub fn audio_path(&self, lang: &LanguageCode, index: usize) -> PathBuf {
        self.audio_dir(lang).join(format!("{index}.{}", self.audio_ext))
    }

    pub fn audio_hashes_manifest(&self, lang: &LanguageCode) -> PathBuf {
        self.audio_dir(lang).join("hashes")
    }

    pub fn out_dir(&self) -> PathBuf {
        self.data_dir().join("out")
    }

    pub fn temp_dir(&self) -> PathBuf {
        self.out_dir().join(".temp")
    }

    pub fn segment_path(&self, lang: &LanguageCode, index: usize) -> PathBuf {
        self.temp_dir().join(format!("{}_segment_{index}.{}", lang.as_str(), self.segment_ext))
    }

    pub fn output_container_path(&self, lang: &LanguageCode) -> PathBuf {
        self.out_dir().join(format!("output-{}.{}", lang.as_str(), self.container_ext))
    }

    /// Sidecar path for any artifact: `<path>.hash`.
    pub fn sidecar_of(path: &Path) -> PathBuf {
        let mut os = path.as_os_str().to_owned();
        os.push(".hash");
        PathBuf::from(os)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths() -> RunPaths {
        RunPaths::new("/run/root", "aud", "mp4")
    }

    #[test]
    fn layout_matches_spec() {
        let p = paths();
        let es = LanguageCode::new("es");
        assert_eq!(p.texts_path(), Path::new("/run/root/data/texts.txt"));
        assert_eq!(p.slides_dir(), Path::new("/run/root/data/slides"));
        assert_eq!(p.translated_text_path(&es), Path::new("/run/root/data/cache/es/text/texts.txt"));
        assert_eq!(p.audio_path(&es, 3), Path::new("/run/root/data/cache/es/audio/3.aud"));
        assert_eq!(p.audio_hashes_manifest(&es), Path::new("/run/root/data/cache/es/audio/hashes"));
        assert_eq!(p.output_container_path(&es), Path::new("/run/root/data/out/output-es.mp4"));
        assert_eq!(p.temp_dir(), Path::new("/run/root/data/out/.temp"));
    }

    #[test]
    fn sidecar_appends_hash_suffix() {
        assert_eq!(RunPaths::sidecar_of(Path::new("/a/b.vid")), Path::new("/a/b.vid.hash"));
    }
}
