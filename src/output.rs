//! Terminal and JSON output for declaration listings

use std::sync::OnceLock;

use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

static QUIET: OnceLock<bool> = OnceLock::new();

pub fn is_quiet() -> bool {
    *QUIET.get_or_init(|| {
        std::env::var("DECLAVE_QUIET")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    })
}

/// One row of a declaration listing
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct DeclRow {
    #[tabled(rename = "Kind")]
    pub kind: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Visibility")]
    pub visibility: String,
    #[tabled(rename = "Signature")]
    pub signature: String,
}

pub fn declarations_table(rows: &[DeclRow]) -> String {
    if rows.is_empty() {
        return String::new();
    }
    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn declarations_json(rows: &[DeclRow]) -> crate::Result<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}

#[derive(Tabled)]
struct StatRow {
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Count")]
    count: usize,
}

pub fn stats_table(stats: &[(&str, usize)]) -> String {
    let rows: Vec<StatRow> = stats
        .iter()
        .map(|(kind, count)| StatRow {
            kind: kind.to_string(),
            count: *count,
        })
        .collect();
    if rows.is_empty() {
        return String::new();
    }
    Table::new(&rows).with(Style::rounded()).to_string()
}

pub fn section(title: &str) -> String {
    console::style(title).bold().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_listing_renders_nothing() {
        assert_eq!(declarations_table(&[]), "");
        assert_eq!(stats_table(&[]), "");
    }

    #[test]
    fn test_listing_contains_headers_and_values() {
        let rows = vec![DeclRow {
            kind: "method".to_string(),
            name: "increment".to_string(),
            visibility: "public".to_string(),
            signature: "int increment(int delta)".to_string(),
        }];
        let table = declarations_table(&rows);
        assert!(table.contains("Kind"));
        assert!(table.contains("increment"));
    }

    #[test]
    fn test_json_listing_roundtrips() {
        let rows = vec![DeclRow {
            kind: "field".to_string(),
            name: "count".to_string(),
            visibility: "private".to_string(),
            signature: "int count".to_string(),
        }];
        let json = declarations_json(&rows).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["name"], "count");
    }
}
