// Copyright (c) 2025 sqlcoach contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Lexical normalizer
//!
//! Canonicalizes query text so downstream comparisons are case- and
//! whitespace-insensitive. Clause order is untouched: `normalize` never
//! reorders anything, so ordering still matters to the comparisons built
//! on top of it.

use regex::Regex;
use std::sync::OnceLock;

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid regex"))
}

fn comma_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s*,\s*").expect("valid regex"))
}

fn equals_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s*=\s*").expect("valid regex"))
}

fn trailing_semicolon_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Strips the full trailing run of semicolons, not just one, so that
    // normalize stays idempotent on inputs like "select 1;;".
    RE.get_or_init(|| Regex::new(r"(?:\s*;)+\s*$").expect("valid regex"))
}

/// Canonicalize raw query text for comparison
///
/// Lower-cases, collapses whitespace runs to single spaces, standardizes
/// spacing around commas and `=`, strips trailing semicolons, and
/// trims. Pure and idempotent: `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let collapsed = whitespace_re().replace_all(&lowered, " ");
    let commas = comma_re().replace_all(&collapsed, ", ");
    let equals = equals_re().replace_all(&commas, " = ");
    let trimmed = trailing_semicolon_re().replace(&equals, "");
    trimmed.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_collapses_whitespace() {
        assert_eq!(
            normalize("SELECT   id,name\n  FROM\tusers"),
            "select id, name from users"
        );
    }

    #[test]
    fn test_spaces_around_equals() {
        assert_eq!(
            normalize("SELECT id FROM users WHERE id=1"),
            "select id from users where id = 1"
        );
    }

    #[test]
    fn test_strips_trailing_semicolon() {
        assert_eq!(normalize("SELECT 1 ;"), "select 1");
        assert_eq!(normalize("SELECT 1;"), "select 1");
        assert_eq!(normalize("SELECT 1;;"), "select 1");
    }

    #[test]
    fn test_empty_and_whitespace_only() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \n\t "), "");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "SELECT   a ,b  FROM t WHERE x=1;",
            "",
            "select * from users",
            "UPDATE t SET a=b",
            "  odd ;; input ; ",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {input:?}");
        }
    }
}
