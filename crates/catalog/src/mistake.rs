// Copyright (c) 2025 sqlcoach contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Mistake definition types
//!
//! This module defines the data model for a single known SQL anti-pattern:
//! its detection patterns, severity, category, and remediation text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How damaging a mistake is when it reaches production
///
/// Ordered from least to most severe, so `Severity::Critical > Severity::Low`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        };
        f.write_str(label)
    }
}

/// The concern a mistake belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Performance,
    Security,
    Correctness,
    Style,
    DataIntegrity,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Performance => "performance",
            Category::Security => "security",
            Category::Correctness => "correctness",
            Category::Style => "style",
            Category::DataIntegrity => "data integrity",
        };
        f.write_str(label)
    }
}

/// A wrong/right snippet pair illustrating a mistake
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MistakeExample {
    pub wrong: String,
    pub right: String,
}

impl MistakeExample {
    pub fn new(wrong: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            wrong: wrong.into(),
            right: right.into(),
        }
    }
}

/// A single known SQL anti-pattern
///
/// Detection semantics: a query matches this definition when ANY entry in
/// `patterns` matches AND no entry in `unless` matches. The `unless` guards
/// exist because the `regex` crate has no lookaround; "UPDATE without WHERE"
/// is expressed as pattern `\b(update|delete)\b` with guard `\bwhere\b`.
///
/// Patterns are stored as source strings and compiled when a
/// [`crate::MistakeCatalog`] is built, so a malformed pattern is caught at
/// catalog construction, not at detection time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MistakeDefinition {
    /// Unique slug identifying the mistake
    pub id: String,
    /// Human-readable label
    pub name: String,
    /// Detection patterns (regex source, compiled case-insensitively)
    pub patterns: Vec<String>,
    /// Guard patterns: if any of these match, the mistake does NOT apply
    #[serde(default)]
    pub unless: Vec<String>,
    /// What is wrong
    pub issue: String,
    /// How to fix it
    pub correction: String,
    /// What this costs in production
    pub real_world_impact: String,
    /// How to avoid it in the first place
    pub prevention: String,
    /// Wrong/right snippet pair
    pub example: MistakeExample,
    pub severity: Severity,
    pub category: Category,
}

impl MistakeDefinition {
    /// Create a new definition with builder pattern
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        severity: Severity,
        category: Category,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            patterns: Vec::new(),
            unless: Vec::new(),
            issue: String::new(),
            correction: String::new(),
            real_world_impact: String::new(),
            prevention: String::new(),
            example: MistakeExample::new("", ""),
            severity,
            category,
        }
    }

    /// Builder method: add a detection pattern
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.patterns.push(pattern.into());
        self
    }

    /// Builder method: add a guard pattern
    pub fn with_unless(mut self, pattern: impl Into<String>) -> Self {
        self.unless.push(pattern.into());
        self
    }

    /// Builder method: set the issue text
    pub fn with_issue(mut self, issue: impl Into<String>) -> Self {
        self.issue = issue.into();
        self
    }

    /// Builder method: set the correction text
    pub fn with_correction(mut self, correction: impl Into<String>) -> Self {
        self.correction = correction.into();
        self
    }

    /// Builder method: set the real-world impact text
    pub fn with_impact(mut self, impact: impl Into<String>) -> Self {
        self.real_world_impact = impact.into();
        self
    }

    /// Builder method: set the prevention text
    pub fn with_prevention(mut self, prevention: impl Into<String>) -> Self {
        self.prevention = prevention.into();
        self
    }

    /// Builder method: set the wrong/right example pair
    pub fn with_example(
        mut self,
        wrong: impl Into<String>,
        right: impl Into<String>,
    ) -> Self {
        self.example = MistakeExample::new(wrong, right);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Critical > Severity::High);
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
    }

    #[test]
    fn test_severity_serde_lowercase() {
        let json = serde_json::to_string(&Severity::Critical).unwrap();
        assert_eq!(json, "\"critical\"");
    }

    #[test]
    fn test_category_serde_kebab_case() {
        let json = serde_json::to_string(&Category::DataIntegrity).unwrap();
        assert_eq!(json, "\"data-integrity\"");
    }

    #[test]
    fn test_category_display() {
        assert_eq!(Category::DataIntegrity.to_string(), "data integrity");
        assert_eq!(Category::Performance.to_string(), "performance");
    }

    #[test]
    fn test_builder() {
        let def = MistakeDefinition::new(
            "select-star",
            "SELECT * Anti-pattern",
            Severity::Medium,
            Category::Performance,
        )
        .with_pattern(r"select\s+\*\s+from")
        .with_issue("Retrieves all columns.")
        .with_correction("List only the columns you need.")
        .with_example("SELECT * FROM users;", "SELECT id, name FROM users;");

        assert_eq!(def.id, "select-star");
        assert_eq!(def.patterns.len(), 1);
        assert!(def.unless.is_empty());
        assert_eq!(def.example.right, "SELECT id, name FROM users;");
    }

    #[test]
    fn test_definition_deserialize_without_unless() {
        let json = r#"{
            "id": "x", "name": "X",
            "patterns": ["a"],
            "issue": "", "correction": "", "real_world_impact": "",
            "prevention": "",
            "example": {"wrong": "", "right": ""},
            "severity": "low", "category": "style"
        }"#;
        let def: MistakeDefinition = serde_json::from_str(json).unwrap();
        assert!(def.unless.is_empty());
        assert_eq!(def.severity, Severity::Low);
    }
}
