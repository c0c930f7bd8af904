// /////////////////////////////////////////////////////////////////////////////
// Slidecast
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// /////////////////////////////////////////////////////////////////////////////

//! # Script
//!
//! An ordered sequence of textual units, one per slide. Serialized as UTF-8
//! text with a literal line `-` separating units; interior newlines are
//! preserved, leading/trailing whitespace of each unit is trimmed on load,
//! and no unit may itself contain a line exactly equal to `-`.
//!
//! `Script` is pure domain data: parsing and serialization operate on
//! in-memory strings. Reading `texts.txt` from disk and writing it back is
//! the `FileSystem` port's job (infrastructure layer).

use crate::error::PipelineError;

const DELIMITER: &str = "-";

/// One per-slide unit of narration text.
pub type ScriptUnit = String;

/// The ordered script for one run (or one language's translated copy of it).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Script {
    units: Vec<ScriptUnit>,
}

impl Script {
    pub fn new(units: Vec<ScriptUnit>) -> Self {
        Self { units }
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn units(&self) -> &[ScriptUnit] {
        &self.units
    }

    pub fn into_units(self) -> Vec<ScriptUnit> {
        self.units
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.units.get(index).map(String::as_str)
    }

    /// Parses `texts.txt` contents. Units are separated by a line containing
    /// only `-`; each unit is trimmed of leading/trailing whitespace.
    pub fn parse(text: &str) -> Self {
        let normalized = text.replace("\r\n", "\n");
        let units = normalized
            .split(&format!("\n{DELIMITER}\n"))
            .map(|unit| unit.trim().to_string())
            .collect::<Vec<_>>();
        // A wholly-empty script file parses to a single empty unit unless the
        // caller explicitly passes an empty string, which should parse to no
        // units at all (there is nothing to narrate).
        if units.len() == 1 && units[0].is_empty() {
            return Self { units: Vec::new() };
        }
        Self { units }
    }

    /// Serializes the script: each unit is followed by `\n-\n` except the
    /// last unit, which has no trailing delimiter.
    ///
    /// # Errors
    ///
    /// Returns a precondition failure if any unit contains a line exactly
    /// equal to `-`, which would make the delimiter ambiguous.
    pub fn serialize(&self) -> Result<String, PipelineError> {
        for (i, unit) in self.units.iter().enumerate() {
            if unit.lines().any(|line| line == DELIMITER) {
                return Err(PipelineError::precondition(format!(
                    "script unit {i} contains a line that is exactly the delimiter '-'"
                )));
            }
        }
        let mut out = String::new();
        for (i, unit) in self.units.iter().enumerate() {
            out.push_str(unit);
            if i + 1 != self.units.len() {
                out.push('\n');
                out.push_str(DELIMITER);
                out.push('\n');
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_on_delimiter_and_trims() {
        let script = Script::parse("  Hello  \n-\nWorld\n");
        assert_eq!(script.units(), &["Hello".to_string(), "World".to_string()]);
    }

    #[test]
    fn parse_empty_text_has_no_units() {
        assert!(Script::parse("").is_empty());
        assert!(Script::parse("   \n  ").is_empty());
    }

    #[test]
    fn single_unit_round_trips() {
        let script = Script::new(vec!["only unit".to_string()]);
        let serialized = script.serialize().unwrap();
        assert_eq!(serialized, "only unit");
        assert_eq!(Script::parse(&serialized), script);
    }

    #[test]
    fn round_trip_modulo_whitespace_trim() {
        let script = Script::new(vec!["Hello".to_string(), "World".to_string()]);
        let serialized = script.serialize().unwrap();
        assert_eq!(serialized, "Hello\n-\nWorld");
        assert_eq!(Script::parse(&serialized), script);
    }

    #[test]
    fn interior_newlines_are_preserved() {
        let script = Script::new(vec!["line one\nline two".to_string(), "next".to_string()]);
        let serialized = script.serialize().unwrap();
        let parsed = Script::parse(&serialized);
        assert_eq!(parsed, script);
    }

    #[test]
    fn unit_equal_to_delimiter_line_is_rejected_on_serialize() {
        let script = Script::new(vec!["fine".to_string(), "-".to_string()]);
        let err = script.serialize().unwrap_err();
        assert!(matches!(err, PipelineError::PreconditionFailure(_)));
    }

    #[test]
    fn unit_containing_delimiter_as_one_of_several_lines_is_rejected() {
        let script = Script::new(vec!["a\n-\nb".to_string()]);
        assert!(script.serialize().is_err());
    }

    proptest::proptest! {
        #[test]
        fn prop_round_trip(units in proptest::collection::vec("[a-zA-Z0-9 ]{0,20}", 0..5)) {
            let non_empty: Vec<String> = units.into_iter().filter(|u| !u.trim().is_empty()).collect();
            let trimmed: Vec<String> = non_empty.iter().map(|u| u.trim().to_string()).collect();
            let script = Script::new(non_empty.clone());
            if let Ok(serialized) = script.serialize() {
                let parsed = Script::parse(&serialized);
                proptest::prop_assert_eq!(parsed.units().to_vec(), trimmed);
            }
        }
    }
}
