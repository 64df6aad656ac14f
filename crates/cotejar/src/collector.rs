//! Soft-Assertion Collector
//!
//! A localization pass over a popup should report every wrong string in
//! one run, not die on the first one. Checks therefore record their
//! outcomes into a [`SoftCollector`] and keep going; [`report`] at the
//! end raises a single aggregated [`VerificationFailure`] listing every
//! failed field.
//!
//! A collector moves through three states: `Empty` until the first
//! check, `Accumulating` while checks land, and `Reported` once
//! [`report`] has run. `Reported` is terminal. Recording into or merging
//! a reported collector is a programming error and panics, so a test
//! cannot silently lose checks behind its own summary.
//!
//! [`report`]: SoftCollector::report

use crate::probe::MatchMode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a recorded check concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    /// Reading matched the expected copy.
    Match,
    /// Reading disagreed with the expected copy.
    Mismatch,
    /// No matching element appeared before the deadline.
    NotFound,
    /// An element was there but never yielded text before the deadline.
    EmptyText,
}

/// The judged result of one field check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationOutcome {
    /// Scope the check ran under, e.g. `signup.fr`.
    pub scope: String,
    /// Translation key being checked.
    pub key: String,
    /// Expected copy, already normalized.
    pub expected: String,
    /// Actual reading, already normalized; empty when nothing was read.
    pub actual: String,
    /// Judgment mode applied.
    pub mode: MatchMode,
    /// Whether the check passed.
    pub passed: bool,
    /// Classified result.
    pub kind: OutcomeKind,
}

impl VerificationOutcome {
    /// Successful check.
    #[must_use]
    pub fn pass(
        scope: impl Into<String>,
        key: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
        mode: MatchMode,
    ) -> Self {
        Self {
            scope: scope.into(),
            key: key.into(),
            expected: expected.into(),
            actual: actual.into(),
            mode,
            passed: true,
            kind: OutcomeKind::Match,
        }
    }

    /// Reading present but wrong.
    #[must_use]
    pub fn mismatch(
        scope: impl Into<String>,
        key: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
        mode: MatchMode,
    ) -> Self {
        Self {
            scope: scope.into(),
            key: key.into(),
            expected: expected.into(),
            actual: actual.into(),
            mode,
            passed: false,
            kind: OutcomeKind::Mismatch,
        }
    }

    /// No element answered the probe before the deadline.
    #[must_use]
    pub fn not_found(
        scope: impl Into<String>,
        key: impl Into<String>,
        expected: impl Into<String>,
        mode: MatchMode,
    ) -> Self {
        Self {
            scope: scope.into(),
            key: key.into(),
            expected: expected.into(),
            actual: String::new(),
            mode,
            passed: false,
            kind: OutcomeKind::NotFound,
        }
    }

    /// An element answered but stayed empty past the deadline.
    #[must_use]
    pub fn empty(
        scope: impl Into<String>,
        key: impl Into<String>,
        expected: impl Into<String>,
        mode: MatchMode,
    ) -> Self {
        Self {
            scope: scope.into(),
            key: key.into(),
            expected: expected.into(),
            actual: String::new(),
            mode,
            passed: false,
            kind: OutcomeKind::EmptyText,
        }
    }

    /// The failure line this outcome contributes to a report, `None`
    /// for passing checks.
    #[must_use]
    pub fn failure_line(&self) -> Option<String> {
        let Self {
            scope,
            key,
            expected,
            actual,
            mode,
            ..
        } = self;
        match self.kind {
            OutcomeKind::Match => None,
            OutcomeKind::Mismatch => Some(format!(
                "[{scope}.{key}] expected {mode}: \"{expected}\" | actual: \"{actual}\""
            )),
            OutcomeKind::NotFound => Some(format!(
                "[{scope}.{key}] element not found (expected {mode}: \"{expected}\")"
            )),
            OutcomeKind::EmptyText => Some(format!(
                "[{scope}.{key}] no text before deadline (expected {mode}: \"{expected}\")"
            )),
        }
    }
}

/// Lifecycle position of a [`SoftCollector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectorState {
    /// No checks recorded yet.
    Empty,
    /// At least one check recorded, report not yet produced.
    Accumulating,
    /// Report produced; the collector is spent.
    Reported,
}

/// Accumulates check outcomes for one scope and reports them in bulk.
///
/// ## Example
///
/// ```
/// use cotejar::{MatchMode, SoftCollector, VerificationOutcome};
///
/// let mut soft = SoftCollector::new("signup.fr");
/// soft.record(&VerificationOutcome::pass(
///     "signup.fr", "title", "Inscription", "Inscription", MatchMode::Exact,
/// ));
/// soft.record(&VerificationOutcome::mismatch(
///     "signup.fr", "submit_text", "S'inscrire", "Sign up", MatchMode::Exact,
/// ));
/// assert!(soft.has_failures());
/// assert!(soft.report().is_err());
/// ```
#[derive(Debug)]
pub struct SoftCollector {
    scope: String,
    failures: Vec<String>,
    checks_recorded: usize,
    reported: bool,
}

impl SoftCollector {
    /// Create an empty collector for `scope`.
    #[must_use]
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            failures: Vec::new(),
            checks_recorded: 0,
            reported: false,
        }
    }

    /// Scope this collector accumulates for.
    #[must_use]
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> CollectorState {
        if self.reported {
            CollectorState::Reported
        } else if self.checks_recorded == 0 {
            CollectorState::Empty
        } else {
            CollectorState::Accumulating
        }
    }

    /// Record one judged check.
    ///
    /// # Panics
    ///
    /// Panics if the collector has already reported; checks recorded
    /// after the summary would be silently lost otherwise.
    pub fn record(&mut self, outcome: &VerificationOutcome) {
        assert!(
            !self.reported,
            "SoftCollector[{}]: record after report",
            self.scope
        );
        self.checks_recorded += 1;
        if let Some(line) = outcome.failure_line() {
            self.failures.push(line);
        }
    }

    /// Record a failure that is not tied to a single field, such as a
    /// popup root that never appeared.
    ///
    /// # Panics
    ///
    /// Panics if the collector has already reported.
    pub fn record_failure(&mut self, line: impl Into<String>) {
        assert!(
            !self.reported,
            "SoftCollector[{}]: record after report",
            self.scope
        );
        self.checks_recorded += 1;
        self.failures.push(line.into());
    }

    /// Whether any recorded check failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Number of failed checks.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Total checks recorded, passing and failing.
    #[must_use]
    pub const fn checks_recorded(&self) -> usize {
        self.checks_recorded
    }

    /// The accumulated failure lines, in recording order.
    #[must_use]
    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    /// Fold another collector's accumulated checks into this one,
    /// preserving their recording order.
    ///
    /// # Panics
    ///
    /// Panics if either collector has already reported.
    pub fn merge(&mut self, other: Self) {
        assert!(
            !self.reported,
            "SoftCollector[{}]: merge after report",
            self.scope
        );
        assert!(
            !other.reported,
            "SoftCollector[{}]: merged a reported collector ({})",
            self.scope, other.scope
        );
        self.checks_recorded += other.checks_recorded;
        self.failures.extend(other.failures);
    }

    /// Produce the aggregated verdict, consuming the collector's
    /// usefulness: the state becomes `Reported` and stays there.
    ///
    /// Returns `Ok(())` when every recorded check passed (including
    /// when nothing was recorded).
    ///
    /// # Errors
    ///
    /// One [`VerificationFailure`] carrying every failure line.
    ///
    /// # Panics
    ///
    /// Panics on a second call; a report is a one-shot verdict.
    pub fn report(&mut self) -> Result<(), VerificationFailure> {
        assert!(
            !self.reported,
            "SoftCollector[{}]: report called twice",
            self.scope
        );
        self.reported = true;
        if self.failures.is_empty() {
            Ok(())
        } else {
            Err(VerificationFailure {
                scope: self.scope.clone(),
                failures: self.failures.clone(),
            })
        }
    }
}

/// Aggregated failure for one reported scope.
#[derive(Debug, Clone)]
pub struct VerificationFailure {
    /// Scope the failures were collected under.
    pub scope: String,
    /// All failure lines, in recording order.
    pub failures: Vec<String>,
}

impl VerificationFailure {
    /// Number of failed checks behind this verdict.
    #[must_use]
    pub fn count(&self) -> usize {
        self.failures.len()
    }
}

impl fmt::Display for VerificationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} check(s) failed in {}:",
            self.failures.len(),
            self.scope
        )?;
        for (i, failure) in self.failures.iter().enumerate() {
            writeln!(f, "  {}. {failure}", i + 1)?;
        }
        Ok(())
    }
}

impl std::error::Error for VerificationFailure {}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn pass(key: &str) -> VerificationOutcome {
        VerificationOutcome::pass("signup.en", key, "x", "x", MatchMode::Exact)
    }

    fn fail(key: &str) -> VerificationOutcome {
        VerificationOutcome::mismatch("signup.en", key, "x", "y", MatchMode::Exact)
    }

    mod outcome_lines {
        use super::*;

        #[test]
        fn passing_outcome_has_no_line() {
            assert!(pass("title").failure_line().is_none());
        }

        #[test]
        fn mismatch_line_shows_both_sides() {
            let outcome = VerificationOutcome::mismatch(
                "signup.fr",
                "submit_text",
                "S'inscrire",
                "Sign up",
                MatchMode::Exact,
            );
            assert_eq!(
                outcome.failure_line().unwrap(),
                "[signup.fr.submit_text] expected exact: \"S'inscrire\" | actual: \"Sign up\""
            );
        }

        #[test]
        fn not_found_line_names_key_and_absence() {
            let outcome = VerificationOutcome::not_found(
                "signup.de",
                "marketing",
                "Angebote erhalten",
                MatchMode::Contains,
            );
            let line = outcome.failure_line().unwrap();
            assert!(line.contains("signup.de.marketing"));
            assert!(line.contains("not found"));
            assert!(line.contains("Angebote erhalten"));
        }

        #[test]
        fn empty_line_mentions_deadline() {
            let outcome =
                VerificationOutcome::empty("signup.es", "title", "Registro", MatchMode::Exact);
            let line = outcome.failure_line().unwrap();
            assert!(line.contains("no text before deadline"));
        }
    }

    mod state_machine {
        use super::*;

        #[test]
        fn fresh_collector_is_empty() {
            let soft = SoftCollector::new("signup.en");
            assert_eq!(soft.state(), CollectorState::Empty);
            assert_eq!(soft.checks_recorded(), 0);
            assert!(!soft.has_failures());
        }

        #[test]
        fn recording_moves_to_accumulating() {
            let mut soft = SoftCollector::new("signup.en");
            soft.record(&pass("title"));
            assert_eq!(soft.state(), CollectorState::Accumulating);
        }

        #[test]
        fn report_is_terminal() {
            let mut soft = SoftCollector::new("signup.en");
            soft.record(&pass("title"));
            assert!(soft.report().is_ok());
            assert_eq!(soft.state(), CollectorState::Reported);
        }

        #[test]
        fn empty_report_succeeds() {
            let mut soft = SoftCollector::new("signup.en");
            assert!(soft.report().is_ok());
            assert_eq!(soft.state(), CollectorState::Reported);
        }

        #[test]
        #[should_panic(expected = "record after report")]
        fn record_after_report_panics() {
            let mut soft = SoftCollector::new("signup.en");
            let _ = soft.report();
            soft.record(&pass("title"));
        }

        #[test]
        #[should_panic(expected = "report called twice")]
        fn double_report_panics() {
            let mut soft = SoftCollector::new("signup.en");
            let _ = soft.report();
            let _ = soft.report();
        }

        #[test]
        #[should_panic(expected = "record after report")]
        fn record_failure_after_report_panics() {
            let mut soft = SoftCollector::new("signup.en");
            let _ = soft.report();
            soft.record_failure("popup root never appeared");
        }
    }

    mod accumulation {
        use super::*;

        #[test]
        fn counts_passes_and_failures_separately() {
            let mut soft = SoftCollector::new("signup.en");
            soft.record(&pass("title"));
            soft.record(&fail("email_label"));
            soft.record(&pass("submit_text"));
            soft.record(&fail("bottom_text"));

            assert_eq!(soft.checks_recorded(), 4);
            assert_eq!(soft.failure_count(), 2);
            assert!(soft.has_failures());
        }

        #[test]
        fn failures_keep_recording_order() {
            let mut soft = SoftCollector::new("signup.en");
            soft.record(&fail("b"));
            soft.record(&fail("a"));

            let lines = soft.failures();
            assert!(lines[0].contains(".b]"));
            assert!(lines[1].contains(".a]"));
        }

        #[test]
        fn record_failure_counts_as_a_check() {
            let mut soft = SoftCollector::new("signup.cn");
            soft.record_failure("[signup.cn] popup root never appeared");
            assert_eq!(soft.checks_recorded(), 1);
            assert_eq!(soft.failure_count(), 1);
        }
    }

    mod merging {
        use super::*;

        #[test]
        fn merge_preserves_order_and_counts() {
            let mut suite = SoftCollector::new("signup");
            let mut en = SoftCollector::new("signup.en");
            en.record(&pass("title"));
            en.record(&fail("email_label"));
            let mut fr = SoftCollector::new("signup.fr");
            fr.record(&fail("title"));

            suite.merge(en);
            suite.merge(fr);

            assert_eq!(suite.checks_recorded(), 3);
            assert_eq!(suite.failure_count(), 2);
            assert!(suite.failures()[0].contains("signup.en"));
            assert!(suite.failures()[1].contains("signup.fr"));
        }

        #[test]
        fn merging_empty_collectors_stays_empty() {
            let mut suite = SoftCollector::new("signup");
            suite.merge(SoftCollector::new("signup.en"));
            assert_eq!(suite.state(), CollectorState::Empty);
        }

        #[test]
        #[should_panic(expected = "merge after report")]
        fn merge_into_reported_panics() {
            let mut suite = SoftCollector::new("signup");
            let _ = suite.report();
            suite.merge(SoftCollector::new("signup.en"));
        }

        #[test]
        #[should_panic(expected = "merged a reported collector")]
        fn merging_a_reported_collector_panics() {
            let mut suite = SoftCollector::new("signup");
            let mut en = SoftCollector::new("signup.en");
            let _ = en.report();
            suite.merge(en);
        }
    }

    mod reporting {
        use super::*;

        #[test]
        fn report_aggregates_every_failure() {
            let mut soft = SoftCollector::new("signup.ru");
            soft.record(&fail("title"));
            soft.record(&pass("email_label"));
            soft.record(&fail("submit_text"));

            let err = soft.report().unwrap_err();
            assert_eq!(err.count(), 2);
            assert_eq!(err.scope, "signup.ru");

            let display = err.to_string();
            assert!(display.contains("2 check(s) failed in signup.ru:"));
            assert!(display.contains("  1. "));
            assert!(display.contains("  2. "));
        }

        #[test]
        fn all_passing_report_is_ok() {
            let mut soft = SoftCollector::new("signup.it");
            soft.record(&pass("title"));
            soft.record(&pass("submit_text"));
            assert!(soft.report().is_ok());
        }
    }
}
