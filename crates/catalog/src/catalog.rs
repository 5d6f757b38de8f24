// Copyright (c) 2025 sqlcoach contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Frozen mistake catalog
//!
//! This module provides [`MistakeCatalog`], the immutable, ordered
//! collection of [`MistakeDefinition`]s with eagerly compiled patterns.

use std::collections::HashMap;

use regex::{Regex, RegexBuilder};

use crate::error::{CatalogError, CatalogResult};
use crate::mistake::{Category, MistakeDefinition, Severity};

/// A definition with its compiled detection and guard patterns
#[derive(Debug)]
struct CompiledMistake {
    definition: MistakeDefinition,
    patterns: Vec<Regex>,
    unless: Vec<Regex>,
}

impl CompiledMistake {
    /// A query matches when any detection pattern matches and no guard does.
    fn matches(&self, query: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(query))
            && !self.unless.iter().any(|g| g.is_match(query))
    }
}

/// Frozen, ordered catalog of known SQL anti-patterns
///
/// All invariants are enforced at construction: ids are unique, every
/// definition has at least one detection pattern, and every pattern
/// compiles. Once built, the catalog is immutable; share it behind an
/// `Arc` and swap the `Arc` to hot-reload.
#[derive(Debug)]
pub struct MistakeCatalog {
    entries: Vec<CompiledMistake>,
    index: HashMap<String, usize>,
}

impl MistakeCatalog {
    /// Build a catalog from a list of definitions
    ///
    /// Definition order is preserved and is the catalog's detection order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateId` if two definitions share an id,
    /// `CatalogError::EmptyPatternSet` if a definition has no detection
    /// patterns, or `CatalogError::InvalidPattern` if a pattern fails to
    /// compile.
    pub fn new(definitions: Vec<MistakeDefinition>) -> CatalogResult<Self> {
        let mut entries = Vec::with_capacity(definitions.len());
        let mut index = HashMap::with_capacity(definitions.len());

        for definition in definitions {
            if definition.patterns.is_empty() {
                return Err(CatalogError::EmptyPatternSet(definition.id.clone()));
            }
            if index.contains_key(&definition.id) {
                return Err(CatalogError::DuplicateId(definition.id.clone()));
            }

            let patterns = compile_all(&definition.id, &definition.patterns)?;
            let unless = compile_all(&definition.id, &definition.unless)?;

            index.insert(definition.id.clone(), entries.len());
            entries.push(CompiledMistake {
                definition,
                patterns,
                unless,
            });
        }

        Ok(Self { entries, index })
    }

    /// Scan a raw query against every catalog entry
    ///
    /// Returns all matching definitions in catalog order. Catalog order is
    /// the explicit tie-break for "primary mistake": callers treat the
    /// first returned entry as primary. Severity never reorders this list;
    /// it only feeds scoring.
    pub fn detect(&self, query: &str) -> Vec<&MistakeDefinition> {
        self.entries
            .iter()
            .filter(|entry| entry.matches(query))
            .map(|entry| &entry.definition)
            .collect()
    }

    /// Look up a definition by id
    pub fn get(&self, id: &str) -> Option<&MistakeDefinition> {
        self.index.get(id).map(|&i| &self.entries[i].definition)
    }

    /// Iterate over all definitions in catalog order
    pub fn definitions(&self) -> impl Iterator<Item = &MistakeDefinition> {
        self.entries.iter().map(|entry| &entry.definition)
    }

    /// All definitions in a given category, in catalog order
    pub fn by_category(&self, category: Category) -> Vec<&MistakeDefinition> {
        self.definitions()
            .filter(|d| d.category == category)
            .collect()
    }

    /// All definitions with a given severity, in catalog order
    pub fn by_severity(&self, severity: Severity) -> Vec<&MistakeDefinition> {
        self.definitions()
            .filter(|d| d.severity == severity)
            .collect()
    }

    /// Number of definitions in the catalog
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn compile_all(id: &str, sources: &[String]) -> CatalogResult<Vec<Regex>> {
    sources
        .iter()
        .map(|source| {
            RegexBuilder::new(source)
                .case_insensitive(true)
                .build()
                .map_err(|e| CatalogError::InvalidPattern {
                    id: id.to_string(),
                    pattern: source.clone(),
                    message: e.to_string(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition(id: &str, pattern: &str) -> MistakeDefinition {
        MistakeDefinition::new(id, id, Severity::Medium, Category::Style)
            .with_pattern(pattern)
    }

    #[test]
    fn test_empty_pattern_set_rejected() {
        let def = MistakeDefinition::new("x", "X", Severity::Low, Category::Style);
        let err = MistakeCatalog::new(vec![def]).unwrap_err();
        assert_eq!(err, CatalogError::EmptyPatternSet("x".to_string()));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let defs = vec![definition("x", "a"), definition("x", "b")];
        let err = MistakeCatalog::new(defs).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateId("x".to_string()));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let err = MistakeCatalog::new(vec![definition("x", "(")]).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidPattern { .. }));
    }

    #[test]
    fn test_detect_is_case_insensitive() {
        let catalog =
            MistakeCatalog::new(vec![definition("star", r"select\s+\*")]).unwrap();
        assert_eq!(catalog.detect("SELECT * FROM users").len(), 1);
        assert_eq!(catalog.detect("select * from users").len(), 1);
        assert!(catalog.detect("SELECT id FROM users").is_empty());
    }

    #[test]
    fn test_detect_preserves_catalog_order() {
        let defs = vec![
            definition("second-pattern", r"\bfrom\b"),
            definition("first-pattern", r"\bselect\b"),
        ];
        let catalog = MistakeCatalog::new(defs).unwrap();
        let found = catalog.detect("select id from users");
        let ids: Vec<&str> = found.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["second-pattern", "first-pattern"]);
    }

    #[test]
    fn test_unless_guard_suppresses_match() {
        let def = definition("missing-where", r"\bdelete\b").with_unless(r"\bwhere\b");
        let catalog = MistakeCatalog::new(vec![def]).unwrap();
        assert_eq!(catalog.detect("DELETE FROM orders").len(), 1);
        assert!(catalog.detect("DELETE FROM orders WHERE id = 1").is_empty());
    }

    #[test]
    fn test_catalog_is_debuggable() {
        // `unwrap_err` on `CatalogResult<MistakeCatalog>` needs the catalog
        // to be Debug; keep the representation honest too.
        let catalog = MistakeCatalog::new(vec![definition("star", r"select\s+\*")]).unwrap();
        assert!(format!("{catalog:?}").contains("star"));
    }

    #[test]
    fn test_get_by_id() {
        let catalog = MistakeCatalog::new(vec![definition("x", "a")]).unwrap();
        assert!(catalog.get("x").is_some());
        assert!(catalog.get("y").is_none());
    }

    #[test]
    fn test_by_category_and_severity() {
        let defs = vec![
            MistakeDefinition::new("a", "A", Severity::High, Category::Performance)
                .with_pattern("a"),
            MistakeDefinition::new("b", "B", Severity::High, Category::Security)
                .with_pattern("b"),
        ];
        let catalog = MistakeCatalog::new(defs).unwrap();
        assert_eq!(catalog.by_category(Category::Security).len(), 1);
        assert_eq!(catalog.by_severity(Severity::High).len(), 2);
        assert!(catalog.by_severity(Severity::Critical).is_empty());
    }
}
