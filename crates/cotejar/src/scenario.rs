//! Scenario model and runner
//!
//! A [`Scenario`] is one locale's pass over one popup: wait for the
//! popup root, then verify every configured field against the deck.
//! Scenarios are plain data and load from YAML, so adding a flow or a
//! field is an edit to a file, not a new test class.
//!
//! The runner never aborts mid-scenario. A popup root that stays absent
//! is recorded as a failure and every field is still judged against an
//! empty reading, so one run reports everything wrong with a locale
//! instead of only the first problem.

use crate::collector::SoftCollector;
use crate::driver::UiDriver;
use crate::locale::Locale;
use crate::popup::{self, PopupSpec};
use crate::probe::FieldProbe;
use crate::result::CotejarResult;
use crate::table::TranslationTable;
use crate::verifier::{judge, FieldReading, TextVerifier};
use crate::wait::{PollOptions, DEFAULT_POLL_INTERVAL_MS, DEFAULT_POPUP_TIMEOUT_MS};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One field to verify: a deck key plus the probe that reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldCheck {
    /// Deck key whose translation should be on the page.
    pub key: String,
    /// How to locate and read the field.
    #[serde(flatten)]
    pub probe: FieldProbe,
}

impl FieldCheck {
    /// Check for `key` read through `probe`.
    #[must_use]
    pub fn new(key: impl Into<String>, probe: FieldProbe) -> Self {
        Self {
            key: key.into(),
            probe,
        }
    }
}

/// One locale's pass over one popup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Flow name, the first half of the scope.
    pub name: String,
    /// Locale under verification, the second half of the scope.
    pub locale: Locale,
    /// Popup whose root scopes every field probe.
    pub popup: PopupSpec,
    /// Built-in deck to verify against; `None` when the caller brings
    /// its own table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deck: Option<String>,
    /// Fields to verify, in check order.
    #[serde(default)]
    pub fields: Vec<FieldCheck>,
}

impl Scenario {
    /// Scenario with no fields yet.
    #[must_use]
    pub fn new(name: impl Into<String>, locale: Locale, popup: PopupSpec) -> Self {
        Self {
            name: name.into(),
            locale,
            popup,
            deck: None,
            fields: Vec::new(),
        }
    }

    /// Append one field check.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, probe: FieldProbe) -> Self {
        self.fields.push(FieldCheck::new(key, probe));
        self
    }

    /// Name the built-in deck this scenario verifies against.
    #[must_use]
    pub fn with_deck(mut self, deck: impl Into<String>) -> Self {
        self.deck = Some(deck.into());
        self
    }

    /// The same flow stamped for another locale; this is how a matrix
    /// run crosses one definition with [`Locale::ALL`].
    #[must_use]
    pub fn for_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Scope label for collectors and failure lines, `name.locale`.
    #[must_use]
    pub fn scope(&self) -> String {
        format!("{}.{}", self.name, self.locale.code())
    }

    /// Parse a scenario from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error when the document does not describe a scenario.
    pub fn from_yaml_str(text: &str) -> CotejarResult<Self> {
        Ok(serde_yaml_ng::from_str(text)?)
    }

    /// Load a scenario from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> CotejarResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }
}

/// Parse a whole suite, a YAML list of scenarios, from text.
///
/// # Errors
///
/// Returns an error when the document is not a list of scenarios.
pub fn scenarios_from_yaml_str(text: &str) -> CotejarResult<Vec<Scenario>> {
    Ok(serde_yaml_ng::from_str(text)?)
}

/// Polling cadence for a scenario run.
///
/// The popup wait runs much longer than a field read: a popup carries
/// navigation and animation latency, while a field inside an already
/// displayed root should settle quickly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Cadence for the popup root wait.
    pub popup: PollOptions,
    /// Cadence for each field read.
    pub read: PollOptions,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            popup: PollOptions::from_millis(DEFAULT_POPUP_TIMEOUT_MS, DEFAULT_POLL_INTERVAL_MS),
            read: PollOptions::default(),
        }
    }
}

impl RunOptions {
    /// One cadence for both waits; test suites use this to stay fast.
    #[must_use]
    pub const fn uniform(options: PollOptions) -> Self {
        Self {
            popup: options,
            read: options,
        }
    }
}

/// Run one scenario and return its collector, still unreported, so the
/// caller can merge it into a suite or report it directly.
///
/// When the popup root never appears, the absence itself is recorded
/// and every field is judged against an empty reading; fields whose
/// deck entry is non-empty then fail, which keeps the report complete.
pub fn run_scenario<D: UiDriver>(
    driver: &D,
    table: &TranslationTable,
    scenario: &Scenario,
    options: RunOptions,
) -> SoftCollector {
    let mut collector = SoftCollector::new(scenario.scope());
    let locale = scenario.locale.code();
    tracing::info!(scope = %collector.scope(), fields = scenario.fields.len(), "scenario start");

    if let Some(root) = popup::resolve_root(driver, &scenario.popup, options.popup) {
        let verifier = TextVerifier::new(driver).with_options(options.read);
        for field in &scenario.fields {
            verifier.verify_key(
                &mut collector,
                table,
                locale,
                &field.key,
                &field.probe,
                Some(&root),
            );
        }
    } else {
        tracing::warn!(popup = %scenario.popup.name, "popup root never appeared");
        collector.record_failure(format!(
            "[{}] popup root \"{}\" never appeared (waited {}ms)",
            scenario.scope(),
            scenario.popup.name,
            options.popup.timeout.as_millis(),
        ));
        for field in &scenario.fields {
            let expected = table.get_or_empty(locale, &field.key);
            let outcome = judge(
                collector.scope(),
                &field.key,
                expected,
                field.probe.mode,
                &FieldReading::Empty,
            );
            collector.record(&outcome);
        }
    }

    tracing::info!(
        scope = %collector.scope(),
        checks = collector.checks_recorded(),
        failures = collector.failure_count(),
        "scenario done"
    );
    collector
}

/// Counters for a multi-scenario run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SuiteSummary {
    /// Scenarios executed.
    pub scenarios: usize,
    /// Checks recorded across all scenarios.
    pub checks: usize,
    /// Failed checks across all scenarios.
    pub failures: usize,
}

/// Run scenarios in order against one driver, folding every check into
/// a single collector reported under `suite_name`.
pub fn run_suite<D: UiDriver>(
    driver: &D,
    table: &TranslationTable,
    suite_name: &str,
    scenarios: &[Scenario],
    options: RunOptions,
) -> (SoftCollector, SuiteSummary) {
    let mut suite = SoftCollector::new(suite_name);
    let mut summary = SuiteSummary::default();
    for scenario in scenarios {
        let collector = run_scenario(driver, table, scenario, options);
        summary.scenarios += 1;
        summary.checks += collector.checks_recorded();
        summary.failures += collector.failure_count();
        suite.merge(collector);
    }
    (suite, summary)
}
