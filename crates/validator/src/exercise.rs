// Copyright (c) 2025 sqlcoach contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Exercise specification
//!
//! The per-exercise contract supplied by the curriculum layer. Every
//! optional field defaults, so the engine works when only `solution` is
//! present, degrading to solution-string comparison. Field names follow
//! the content layer's JSON (camelCase).

use serde::{Deserialize, Serialize};

/// A single coding exercise with its canonical solution and optional
/// structured checks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExerciseSpec {
    /// Display title
    pub title: String,
    /// Display prompt
    pub description: String,
    /// Initial editor contents
    pub starter_code: String,
    /// Canonical correct query; the fallback ground truth when no test
    /// cases are authored. Must be non-empty for meaningful grading.
    pub solution: String,
    /// Human-authored hints, weakest to strongest (at most 4 are used)
    pub hints: Vec<String>,
    /// SQL dialect label, display only, not enforced
    pub language: String,
    /// Structured assertions; when empty, grading falls back to
    /// feature-overlap against `solution`
    pub test_cases: Vec<TestCase>,
    /// Table/column definitions for display
    pub schema: Option<ExerciseSchema>,
    /// Substrings that must appear in the normalized query
    pub required_clauses: Vec<String>,
    /// Regexes that must NOT match the raw query
    pub forbidden_patterns: Vec<String>,
    /// Tables that must appear in the structural analysis
    pub expected_tables: Vec<String>,
    /// Columns that must appear in the structural analysis
    pub expected_columns: Vec<String>,
}

impl ExerciseSpec {
    /// Create a minimal exercise with builder pattern
    pub fn new(title: impl Into<String>, solution: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            solution: solution.into(),
            language: "sql".to_string(),
            ..Self::default()
        }
    }

    /// Builder method: set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder method: set the starter code
    pub fn with_starter_code(mut self, starter: impl Into<String>) -> Self {
        self.starter_code = starter.into();
        self
    }

    /// Builder method: add an authored hint
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }

    /// Builder method: add a structured test case
    pub fn with_test_case(mut self, test_case: TestCase) -> Self {
        self.test_cases.push(test_case);
        self
    }

    /// Builder method: add a required clause
    pub fn with_required_clause(mut self, clause: impl Into<String>) -> Self {
        self.required_clauses.push(clause.into());
        self
    }

    /// Builder method: add a forbidden pattern (regex source)
    pub fn with_forbidden_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.forbidden_patterns.push(pattern.into());
        self
    }

    /// Builder method: add an expected table
    pub fn with_expected_table(mut self, table: impl Into<String>) -> Self {
        self.expected_tables.push(table.into());
        self
    }

    /// Builder method: add an expected column
    pub fn with_expected_column(mut self, column: impl Into<String>) -> Self {
        self.expected_columns.push(column.into());
        self
    }

    /// Builder method: set the display schema
    pub fn with_schema(mut self, schema: ExerciseSchema) -> Self {
        self.schema = Some(schema);
        self
    }
}

/// A structured assertion used to grade a submission more precisely than
/// plain string comparison
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TestCase {
    /// Display label
    pub name: String,
    /// Case-insensitive substrings that must be present
    pub should_contain: Vec<String>,
    /// Case-insensitive substrings that must be absent
    pub should_not_contain: Vec<String>,
    /// Column names expected in the SELECT list
    pub expected_columns: Vec<String>,
    /// Relative importance in [0, 1]; when absent, weight is distributed
    /// equally among the exercise's test cases
    pub weight: Option<f64>,
}

impl TestCase {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builder method: require a substring
    pub fn with_contains(mut self, needle: impl Into<String>) -> Self {
        self.should_contain.push(needle.into());
        self
    }

    /// Builder method: forbid a substring
    pub fn with_not_contains(mut self, needle: impl Into<String>) -> Self {
        self.should_not_contain.push(needle.into());
        self
    }

    /// Builder method: expect a SELECT-list column
    pub fn with_expected_column(mut self, column: impl Into<String>) -> Self {
        self.expected_columns.push(column.into());
        self
    }

    /// Builder method: set the weight
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }
}

/// Display-only table/column definitions shown next to an exercise
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSchema {
    pub tables: Vec<SchemaTable>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaTable {
    pub name: String,
    pub columns: Vec<SchemaColumn>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchemaColumn {
    pub name: String,
    /// Dialect type name, display only
    #[serde(rename = "type")]
    pub data_type: String,
    pub nullable: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_exercise_defaults() {
        let exercise = ExerciseSpec::new("Title", "SELECT 1");
        assert_eq!(exercise.language, "sql");
        assert!(exercise.test_cases.is_empty());
        assert!(exercise.schema.is_none());
        assert!(exercise.forbidden_patterns.is_empty());
    }

    #[test]
    fn test_deserialize_with_all_optionals_absent() {
        let json = r#"{"title": "T", "solution": "SELECT 1"}"#;
        let exercise: ExerciseSpec = serde_json::from_str(json).unwrap();
        assert_eq!(exercise.solution, "SELECT 1");
        assert!(exercise.hints.is_empty());
        assert!(exercise.required_clauses.is_empty());
        assert!(exercise.expected_tables.is_empty());
    }

    #[test]
    fn test_deserialize_content_layer_shape() {
        let json = r#"{
            "title": "Select Specific Columns",
            "description": "Select only name and email from users.",
            "starterCode": "SELECT ",
            "solution": "SELECT name, email FROM users;",
            "hints": ["Think about which columns you need"],
            "language": "sql",
            "testCases": [
                {"name": "Contains SELECT keyword", "shouldContain": ["select"], "weight": 0.2},
                {"name": "Includes name column", "expectedColumns": ["name"], "weight": 0.3}
            ],
            "forbiddenPatterns": ["\\*"],
            "expectedTables": ["users"],
            "expectedColumns": ["name", "email"],
            "schema": {
                "tables": [
                    {"name": "users", "columns": [{"name": "id", "type": "INT"}]}
                ]
            }
        }"#;
        let exercise: ExerciseSpec = serde_json::from_str(json).unwrap();
        assert_eq!(exercise.test_cases.len(), 2);
        assert_eq!(exercise.test_cases[0].weight, Some(0.2));
        assert_eq!(exercise.forbidden_patterns, vec!["\\*"]);
        let schema = exercise.schema.unwrap();
        assert_eq!(schema.tables[0].columns[0].data_type, "INT");
    }

    #[test]
    fn test_test_case_builder() {
        let tc = TestCase::new("Uses JOIN")
            .with_contains("join")
            .with_not_contains("cross join")
            .with_weight(0.5);
        assert_eq!(tc.should_contain, vec!["join"]);
        assert_eq!(tc.weight, Some(0.5));
    }
}
