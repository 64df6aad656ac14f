//! Locale-by-key coverage matrices
//!
//! A coverage matrix answers "which locales are missing which keys"
//! at a glance, without judging the values themselves. Linting judges
//! values; coverage only counts cells.

use cotejar::TranslationTable;
use serde::{Deserialize, Serialize};

/// Coverage of one locale against the catalog's full key set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleCoverage {
    /// Locale name as stored in the catalog
    pub locale: String,
    /// Number of keys this locale covers
    pub present: usize,
    /// Keys this locale is missing, in key order
    pub missing: Vec<String>,
    /// Covered share in percent
    pub percent: f64,
}

/// Coverage matrix for a whole catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageMatrix {
    /// Catalog name (built-in deck name or file stem)
    pub catalog: String,
    /// Union of keys across all locales, sorted
    pub keys: Vec<String>,
    /// Per-locale coverage rows, in catalog locale order
    pub locales: Vec<LocaleCoverage>,
    /// Whether every locale covers every key
    pub complete: bool,
}

impl CoverageMatrix {
    /// Total number of missing cells across all locales
    #[must_use]
    pub fn missing_cells(&self) -> usize {
        self.locales.iter().map(|l| l.missing.len()).sum()
    }
}

/// Build the coverage matrix for a catalog.
///
/// The key set is the union over all locales, so a key present in only
/// one locale shows up as a gap everywhere else.
#[must_use]
pub fn build_coverage(catalog: &str, table: &TranslationTable) -> CoverageMatrix {
    let keys: Vec<String> = table.keys().into_iter().map(str::to_string).collect();

    let locales: Vec<LocaleCoverage> = table
        .locales()
        .into_iter()
        .map(|locale| {
            let missing: Vec<String> = keys
                .iter()
                .filter(|key| table.get(locale, key).is_none())
                .cloned()
                .collect();
            let present = keys.len() - missing.len();
            let percent = if keys.is_empty() {
                100.0
            } else {
                present as f64 * 100.0 / keys.len() as f64
            };
            LocaleCoverage {
                locale: locale.to_string(),
                present,
                missing,
                percent,
            }
        })
        .collect();

    let complete = locales.iter().all(|l| l.missing.is_empty());

    CoverageMatrix {
        catalog: catalog.to_string(),
        keys,
        locales,
        complete,
    }
}

/// Render a coverage matrix as a text grid
#[must_use]
pub fn render_coverage_text(matrix: &CoverageMatrix) -> String {
    let mut output = String::new();

    output.push_str(&format!("COVERAGE: {}\n", matrix.catalog));
    output.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    let key_width = matrix
        .keys
        .iter()
        .map(String::len)
        .max()
        .unwrap_or(0)
        .max("key".len());

    output.push_str(&format!("{:<key_width$}", "key"));
    for row in &matrix.locales {
        output.push_str(&format!("  {:>2}", row.locale));
    }
    output.push('\n');

    for key in &matrix.keys {
        output.push_str(&format!("{key:<key_width$}"));
        for row in &matrix.locales {
            let mark = if row.missing.contains(key) { "·" } else { "✓" };
            output.push_str(&format!("  {mark:>2}"));
        }
        output.push('\n');
    }

    output.push('\n');
    output.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
    for row in &matrix.locales {
        output.push_str(&format!(
            "{:<8} {}/{} ({:.0}%)\n",
            row.locale,
            row.present,
            matrix.keys.len(),
            row.percent
        ));
    }

    if matrix.complete {
        output.push_str(&format!(
            "✓ {} locale(s) cover all {} key(s)\n",
            matrix.locales.len(),
            matrix.keys.len()
        ));
    } else {
        output.push_str(&format!("✗ {} missing cell(s)\n", matrix.missing_cells()));
    }

    output
}

/// Render a coverage matrix as JSON
pub fn render_coverage_json(matrix: &CoverageMatrix) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(matrix)
}
