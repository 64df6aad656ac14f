//! Catalog linting
//!
//! Checks a translation catalog for the authoring defects that surface
//! later as noisy verification failures: keys missing from a locale,
//! strings the comparison pipeline would silently rewrite, and
//! placeholders that drifted between a reference locale and its
//! translations.
//!
//! ## Checks
//!
//! | Code   | Severity | Check |
//! |--------|----------|-------|
//! | CAT000 | error    | reference locale missing from the catalog |
//! | CAT001 | error    | key present in the reference locale, missing from another |
//! | CAT002 | warning  | key absent from the reference locale |
//! | CAT003 | warning  | empty value |
//! | CAT004 | warning  | stray whitespace (leading/trailing, runs, NBSP) |
//! | CAT005 | warning  | HTML entity left in copy |
//! | CAT006 | error    | placeholders differ from the reference locale |

use cotejar::TranslationTable;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Lint severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LintSeverity {
    /// Error - fails the lint run
    Error,
    /// Warning - fails only under `--deny-warnings`
    Warning,
}

impl LintSeverity {
    /// Get display string
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warning => "WARN",
        }
    }

    /// Get symbol for display
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Error => "✗",
            Self::Warning => "⚠",
        }
    }
}

/// A single lint finding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LintFinding {
    /// Locale the finding applies to
    pub locale: String,
    /// Key the finding applies to, if key-specific
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Severity level
    pub severity: LintSeverity,
    /// Check code (e.g. "CAT001")
    pub code: String,
    /// Human-readable message
    pub message: String,
}

impl LintFinding {
    fn error(
        locale: impl Into<String>,
        key: Option<&str>,
        code: &str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            locale: locale.into(),
            key: key.map(str::to_string),
            severity: LintSeverity::Error,
            code: code.to_string(),
            message: message.into(),
        }
    }

    fn warning(
        locale: impl Into<String>,
        key: Option<&str>,
        code: &str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            locale: locale.into(),
            key: key.map(str::to_string),
            severity: LintSeverity::Warning,
            code: code.to_string(),
            message: message.into(),
        }
    }
}

/// Lint report for one catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LintReport {
    /// Catalog name (built-in deck name or file stem)
    pub catalog: String,
    /// Reference locale the catalog was checked against
    pub reference: String,
    /// All findings, grouped by locale in catalog order
    pub findings: Vec<LintFinding>,
    /// Number of error findings
    pub errors: usize,
    /// Number of warning findings
    pub warnings: usize,
    /// Number of locales in the catalog
    pub locales_checked: usize,
    /// Number of strings in the catalog
    pub strings_checked: usize,
}

impl LintReport {
    /// A report with no findings at all
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    /// Whether the catalog passes under the given warning policy
    #[must_use]
    pub fn passes(&self, deny_warnings: bool) -> bool {
        self.errors == 0 && (!deny_warnings || self.warnings == 0)
    }

    fn assemble(
        catalog: &str,
        reference: &str,
        findings: Vec<LintFinding>,
        locales_checked: usize,
        strings_checked: usize,
    ) -> Self {
        let errors = findings
            .iter()
            .filter(|f| f.severity == LintSeverity::Error)
            .count();
        let warnings = findings.len() - errors;
        Self {
            catalog: catalog.to_string(),
            reference: reference.to_string(),
            findings,
            errors,
            warnings,
            locales_checked,
            strings_checked,
        }
    }
}

/// Lint a translation catalog against a reference locale.
///
/// The reference locale defines the expected key set and the expected
/// placeholders per key; every locale is additionally checked for empty
/// and whitespace-damaged values on its own.
#[must_use]
pub fn lint_table(catalog: &str, table: &TranslationTable, reference: &str) -> LintReport {
    let folded = reference.trim().to_ascii_lowercase();
    let reference = folded.as_str();
    let locales = table.locales();
    let strings_checked = table.string_count();

    if !table.has_locale(reference) {
        let findings = vec![LintFinding::error(
            reference,
            None,
            "CAT000",
            format!("reference locale \"{reference}\" is not in the catalog"),
        )];
        return LintReport::assemble(catalog, reference, findings, locales.len(), strings_checked);
    }

    let reference_keys: BTreeSet<&str> = table.keys_for(reference).into_iter().collect();
    let mut findings = Vec::new();

    for locale in &locales {
        let locale_keys: BTreeSet<&str> = table.keys_for(locale).into_iter().collect();

        if *locale != reference {
            for key in reference_keys.difference(&locale_keys) {
                findings.push(LintFinding::error(
                    *locale,
                    Some(*key),
                    "CAT001",
                    format!("missing key \"{key}\" (present in {reference})"),
                ));
            }
        }

        for (key, value) in table.strings_for(locale) {
            if *locale != reference && !reference_keys.contains(key) {
                findings.push(LintFinding::warning(
                    *locale,
                    Some(key),
                    "CAT002",
                    format!("key \"{key}\" is absent from the {reference} reference"),
                ));
            }

            if value.is_empty() {
                findings.push(LintFinding::warning(
                    *locale,
                    Some(key),
                    "CAT003",
                    format!("\"{key}\": empty value"),
                ));
                continue;
            }

            if value != whitespace_collapsed(value) {
                findings.push(LintFinding::warning(
                    *locale,
                    Some(key),
                    "CAT004",
                    format!("\"{key}\": stray whitespace (leading/trailing, runs or non-breaking spaces)"),
                ));
            }

            if let Some(entity) = entity_pattern().find(value) {
                findings.push(LintFinding::warning(
                    *locale,
                    Some(key),
                    "CAT005",
                    format!("\"{key}\": HTML entity left in copy ({:?})", entity.as_str()),
                ));
            }

            if *locale != reference {
                if let Some(reference_value) = table.get(reference, key) {
                    let want = placeholders(reference_value);
                    let got = placeholders(value);
                    if want != got {
                        findings.push(LintFinding::error(
                            *locale,
                            Some(key),
                            "CAT006",
                            format!(
                                "\"{key}\": placeholders [{}] do not match {reference} placeholders [{}]",
                                placeholder_list(&got),
                                placeholder_list(&want),
                            ),
                        ));
                    }
                }
            }
        }
    }

    LintReport::assemble(catalog, reference, findings, locales.len(), strings_checked)
}

/// Render a lint report as human-readable text
#[must_use]
pub fn render_lint_report(report: &LintReport) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "LINT: {} (reference {})\n",
        report.catalog, report.reference
    ));
    output.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    if report.findings.is_empty() {
        output.push_str("✓ catalog is clean\n");
    } else {
        let mut current: Option<&str> = None;
        for finding in &report.findings {
            if current != Some(finding.locale.as_str()) {
                if current.is_some() {
                    output.push('\n');
                }
                output.push_str(&format!("{}:\n", finding.locale));
                current = Some(finding.locale.as_str());
            }
            output.push_str(&format!(
                "  {} [{}] {}\n",
                finding.severity.symbol(),
                finding.code,
                finding.message
            ));
        }
    }

    output.push('\n');
    output.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
    output.push_str(&format!(
        "Summary: {} errors, {} warnings, {} locales, {} strings checked\n",
        report.errors, report.warnings, report.locales_checked, report.strings_checked
    ));

    output
}

/// Render a lint report as JSON
pub fn render_lint_json(report: &LintReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

/// Collapse the whitespace the comparison pipeline erases. A value that
/// differs from its collapsed form would never be seen as written.
fn whitespace_collapsed(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn placeholders(value: &str) -> BTreeSet<String> {
    placeholder_pattern()
        .find_iter(value)
        .map(|m| m.as_str().to_string())
        .collect()
}

fn placeholder_list(set: &BTreeSet<String>) -> String {
    set.iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Brace-style (`{name}`, `{0}`) and printf-style (`%s`, `%d`) markers.
fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // SAFETY: The pattern is a literal and always compiles
        #[allow(clippy::expect_used)]
        Regex::new(r"\{[^{}]+\}|%[sd]").expect("placeholder pattern should compile")
    })
}

/// Named (lowercase) and numeric character references.
fn entity_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // SAFETY: The pattern is a literal and always compiles
        #[allow(clippy::expect_used)]
        Regex::new(r"&(#x?[0-9A-Fa-f]+|[a-z]{2,8});").expect("entity pattern should compile")
    })
}
