// Copyright (c) 2025 sqlcoach contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Structural analyzer
//!
//! Regex-driven feature extraction over normalized query text. This
//! component only describes what is textually present; it performs no
//! validation and renders no judgment.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Fixed keyword vocabulary used by [`key_elements`] for the
/// feature-overlap fallback comparison.
const SQL_KEYWORDS: [&str; 37] = [
    "SELECT", "FROM", "WHERE", "JOIN", "LEFT", "RIGHT", "INNER", "OUTER", "GROUP BY",
    "ORDER BY", "HAVING", "INSERT", "UPDATE", "DELETE", "CREATE", "TABLE", "INDEX",
    "DROP", "ALTER", "AND", "OR", "NOT", "IN", "BETWEEN", "LIKE", "IS NULL",
    "IS NOT NULL", "COUNT", "SUM", "AVG", "MAX", "MIN", "DISTINCT", "AS", "ON",
    "LIMIT", "OFFSET",
];

fn select_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\bselect\b").expect("valid regex"))
}

fn from_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\bfrom\b").expect("valid regex"))
}

fn where_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\bwhere\b").expect("valid regex"))
}

fn join_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(inner|left|right|full|cross)?\s*join\b").expect("valid regex"))
}

fn group_by_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\bgroup\s+by\b").expect("valid regex"))
}

fn order_by_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\border\s+by\b").expect("valid regex"))
}

fn limit_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\blimit\b").expect("valid regex"))
}

fn aggregate_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(count|sum|avg|max|min)\s*\(").expect("valid regex"))
}

fn nested_select_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\bselect\b.*\bselect\b").expect("valid regex"))
}

fn from_table_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\bfrom\s+([a-z_][a-z0-9_]*)").expect("valid regex"))
}

fn join_table_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\bjoin\s+([a-z_][a-z0-9_]*)").expect("valid regex"))
}

fn select_list_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"select\s+(.*?)\s+from").expect("valid regex"))
}

fn alias_suffix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+as\s+\w+$").expect("valid regex"))
}

fn call_wrapper_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\(.*\)").expect("valid regex"))
}

fn qualifier_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r".*\.\s*").expect("valid regex"))
}

/// Coarse complexity estimate for a query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    #[default]
    Simple,
    Moderate,
    Complex,
}

/// Derived summary of which SQL features a query textually contains
///
/// Produced fresh per validation call and never persisted. The extraction
/// behind `tables` and `columns` is heuristic (see the crate docs).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuralAnalysis {
    pub has_select: bool,
    pub has_from: bool,
    pub has_where: bool,
    pub has_join: bool,
    pub has_group_by: bool,
    pub has_order_by: bool,
    pub has_limit: bool,
    pub has_aggregate: bool,
    /// Table identifiers referenced in FROM/JOIN, first-seen order, deduped
    pub tables: Vec<String>,
    /// Column identifiers in the SELECT list (wildcard excluded, aliases
    /// and qualifiers stripped), first-seen order, deduped
    pub columns: Vec<String>,
    pub estimated_complexity: Complexity,
}

/// Extract a structural feature summary from a normalized query
pub fn analyze(normalized: &str) -> StructuralAnalysis {
    let has_join = join_re().is_match(normalized);
    let has_group_by = group_by_re().is_match(normalized);
    let has_aggregate = aggregate_re().is_match(normalized);
    let tables = extract_tables(normalized);
    let columns = extract_columns(normalized);

    // Weighted feature count: join and nesting weigh double.
    let complexity_score = if has_join { 2 } else { 0 }
        + if has_group_by { 1 } else { 0 }
        + if has_aggregate { 1 } else { 0 }
        + if nested_select_re().is_match(normalized) { 2 } else { 0 }
        + if tables.len() > 2 { 1 } else { 0 };
    let estimated_complexity = match complexity_score {
        s if s >= 4 => Complexity::Complex,
        s if s >= 2 => Complexity::Moderate,
        _ => Complexity::Simple,
    };

    StructuralAnalysis {
        has_select: select_re().is_match(normalized),
        has_from: from_re().is_match(normalized),
        has_where: where_re().is_match(normalized),
        has_join,
        has_group_by,
        has_order_by: order_by_re().is_match(normalized),
        has_limit: limit_re().is_match(normalized),
        has_aggregate,
        tables,
        columns,
        estimated_complexity,
    }
}

/// Table identifiers after each FROM/JOIN, deduped, first-seen order
pub fn extract_tables(normalized: &str) -> Vec<String> {
    let mut tables = Vec::new();
    for re in [from_table_re(), join_table_re()] {
        for caps in re.captures_iter(normalized) {
            let table = caps[1].to_string();
            if !tables.contains(&table) {
                tables.push(table);
            }
        }
    }
    tables
}

/// Column identifiers from the SELECT list, deduped, first-seen order
///
/// A bare `*` select list yields an empty list. Each comma-separated item
/// is stripped of its `as <alias>` suffix, any function-call wrapper, and
/// any `table.` qualifier.
pub fn extract_columns(normalized: &str) -> Vec<String> {
    let Some(caps) = select_list_re().captures(normalized) else {
        return Vec::new();
    };
    let select_list = caps[1].trim();
    if select_list == "*" {
        return Vec::new();
    }

    let mut columns = Vec::new();
    for item in select_list.split(',') {
        let no_alias = alias_suffix_re().replace(item.trim(), "");
        let no_call = call_wrapper_re().replace(&no_alias, "");
        let bare = qualifier_re().replace(&no_call, "");
        let column = bare.trim().to_string();
        if !column.is_empty() && column != "*" && !columns.contains(&column) {
            columns.push(column);
        }
    }
    columns
}

/// Extract the text of one clause, keyword through the next top-level
/// clause boundary (a semicolon) or end of string
///
/// `keyword` is one of the fixed clause keywords ("from", "group by", ...);
/// multi-word keywords tolerate any whitespace between their words.
pub fn extract_clause(query: &str, keyword: &str) -> String {
    let word_pattern = keyword.split_whitespace().collect::<Vec<_>>().join(r"\s+");
    let source = format!(r"(?i)\b{word_pattern}\b[^;]*");
    match Regex::new(&source) {
        Ok(re) => re
            .find(query)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default(),
        Err(_) => String::new(),
    }
}

/// Feature set for the solution-overlap comparison: every vocabulary
/// keyword present in the query, plus its tables and columns, deduped
pub fn key_elements(normalized: &str) -> Vec<String> {
    let upper = normalized.to_uppercase();
    let mut elements: Vec<String> = SQL_KEYWORDS
        .iter()
        .filter(|kw| upper.contains(*kw))
        .map(|kw| kw.to_string())
        .collect();
    for item in extract_tables(normalized)
        .into_iter()
        .chain(extract_columns(normalized))
    {
        if !elements.contains(&item) {
            elements.push(item);
        }
    }
    elements
}
