// Copyright (c) 2025 sqlcoach contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Syntax pre-check
//!
//! Cheap structural sanity checks run before any scoring. This is not a
//! SQL parser; it exists to catch the most common typos (unbalanced
//! parentheses, stray quotes, a missing FROM) cheaply, with the first
//! failing rule winning.

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Statements may begin with any of these keywords.
const LEADING_KEYWORDS: [&str; 8] = [
    "select", "insert", "update", "delete", "create", "alter", "drop", "with",
];

fn from_word_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\bfrom\b").expect("valid regex"))
}

fn select_literal_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"select\s+\d+").expect("valid regex"))
}

/// A failed syntax pre-check
///
/// The `Display` text is learner-facing and rendered verbatim by hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("Query is empty")]
    Empty,

    #[error("Unmatched closing parenthesis")]
    UnmatchedClosingParen,

    #[error("Unmatched opening parenthesis")]
    UnmatchedOpeningParen,

    #[error("Unmatched single quote")]
    UnmatchedSingleQuote,

    #[error("Query must start with a valid SQL keyword (SELECT, INSERT, UPDATE, DELETE, etc.)")]
    InvalidLeadingKeyword,

    #[error("SELECT statements typically require a FROM clause")]
    SelectWithoutFrom,
}

/// Run the syntax pre-check over a normalized query
///
/// Rules are checked in order and the first failure wins:
/// empty input, parenthesis balance, single-quote pairing, leading
/// keyword, and SELECT-requires-FROM (with a bare-literal exception so
/// `select 1` passes).
pub fn check_syntax(normalized: &str) -> Result<(), SyntaxError> {
    if normalized.is_empty() {
        return Err(SyntaxError::Empty);
    }

    let mut depth: i32 = 0;
    for ch in normalized.chars() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return Err(SyntaxError::UnmatchedClosingParen);
                }
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(SyntaxError::UnmatchedOpeningParen);
    }

    if normalized.chars().filter(|&c| c == '\'').count() % 2 != 0 {
        return Err(SyntaxError::UnmatchedSingleQuote);
    }

    if !LEADING_KEYWORDS.iter().any(|kw| normalized.starts_with(kw)) {
        return Err(SyntaxError::InvalidLeadingKeyword);
    }

    if normalized.starts_with("select")
        && !from_word_re().is_match(normalized)
        && !select_literal_re().is_match(normalized)
    {
        return Err(SyntaxError::SelectWithoutFrom);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;

    #[test]
    fn test_empty_query() {
        assert_eq!(check_syntax(""), Err(SyntaxError::Empty));
        assert_eq!(check_syntax(&normalize("   ")), Err(SyntaxError::Empty));
    }

    #[test]
    fn test_unmatched_opening_paren() {
        assert_eq!(
            check_syntax(&normalize("SELECT (id FROM users")),
            Err(SyntaxError::UnmatchedOpeningParen)
        );
    }

    #[test]
    fn test_unmatched_closing_paren() {
        assert_eq!(
            check_syntax(&normalize("SELECT id) FROM users")),
            Err(SyntaxError::UnmatchedClosingParen)
        );
    }

    #[test]
    fn test_unmatched_single_quote() {
        assert_eq!(
            check_syntax(&normalize("SELECT id FROM users WHERE name = 'bob")),
            Err(SyntaxError::UnmatchedSingleQuote)
        );
    }

    #[test]
    fn test_invalid_leading_keyword() {
        assert_eq!(
            check_syntax(&normalize("FETCH id FROM users")),
            Err(SyntaxError::InvalidLeadingKeyword)
        );
    }

    #[test]
    fn test_select_requires_from() {
        assert_eq!(
            check_syntax(&normalize("SELECT id, name")),
            Err(SyntaxError::SelectWithoutFrom)
        );
    }

    #[test]
    fn test_select_bare_literal_allowed() {
        assert_eq!(check_syntax(&normalize("SELECT 1")), Ok(()));
    }

    #[test]
    fn test_valid_statements_pass() {
        for query in [
            "SELECT id FROM users",
            "INSERT INTO users (name) VALUES ('bob')",
            "UPDATE users SET name = 'bob' WHERE id = 1",
            "DELETE FROM users WHERE id = 1",
            "WITH recent AS (SELECT id FROM orders) SELECT id FROM recent",
        ] {
            assert_eq!(check_syntax(&normalize(query)), Ok(()), "failed: {query}");
        }
    }

    #[test]
    fn test_first_failure_wins() {
        // Both an unbalanced paren and a bad keyword; paren balance is
        // checked first.
        assert_eq!(
            check_syntax(&normalize("FETCH (id")),
            Err(SyntaxError::UnmatchedOpeningParen)
        );
    }

    #[test]
    fn test_error_messages_are_learner_facing() {
        assert_eq!(SyntaxError::Empty.to_string(), "Query is empty");
        assert!(SyntaxError::SelectWithoutFrom
            .to_string()
            .contains("FROM clause"));
    }
}
