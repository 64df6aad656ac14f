//! Resilient Text Verifier
//!
//! [`TextVerifier`] turns a flaky page into stable readings. A field
//! read polls the driver until some extraction strategy yields non-empty
//! text or the deadline passes; translations that load late, popups that
//! animate in and hydration that rewrites nodes all land on the same
//! code path. The result is a [`FieldReading`], never an error: a page
//! problem becomes a recorded check failure, and the scenario moves on
//! to the next field.
//!
//! Judgment is separate from reading. [`judge`] compares a reading
//! against expected copy under a [`MatchMode`] and produces the
//! [`VerificationOutcome`] a [`SoftCollector`] records. The scenario
//! runner reuses it directly when a popup root never appeared and every
//! field must still be evaluated against an empty reading.

use crate::collector::{SoftCollector, VerificationOutcome};
use crate::driver::{ElementHandle, UiDriver};
use crate::normalize::normalize;
use crate::probe::{FieldProbe, MatchMode, ReadStrategy};
use crate::table::TranslationTable;
use crate::wait::{poll_until, PollOptions};

/// What a polled field read produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldReading {
    /// First non-empty extraction, already normalized.
    Value(String),
    /// An element matched the locator but only ever yielded empty text.
    Empty,
    /// The locator never resolved to any element.
    NotFound,
}

impl FieldReading {
    /// The reading as text; `Empty` and `NotFound` read as `""`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Value(s) => s,
            Self::Empty | Self::NotFound => "",
        }
    }

    /// Whether the locator resolved to an element at least once.
    #[must_use]
    pub const fn was_found(&self) -> bool {
        !matches!(self, Self::NotFound)
    }
}

/// Whether `actual` satisfies `expected` under `mode`.
///
/// Both sides must already be normalized. Empty expected copy only
/// matches an empty reading, in both modes; an unknown table entry
/// must fail against real on-page text instead of vacuously passing
/// a substring check.
#[must_use]
pub fn matches(mode: MatchMode, expected: &str, actual: &str) -> bool {
    if expected.is_empty() {
        return actual.is_empty();
    }
    match mode {
        MatchMode::Exact => actual == expected,
        MatchMode::Contains => actual.to_lowercase().contains(&expected.to_lowercase()),
    }
}

/// Judge one reading against expected copy.
///
/// `expected` is normalized here, so callers can pass deck strings
/// verbatim.
#[must_use]
pub fn judge(
    scope: &str,
    key: &str,
    expected: &str,
    mode: MatchMode,
    reading: &FieldReading,
) -> VerificationOutcome {
    let expected = normalize(expected);
    match reading {
        FieldReading::NotFound => VerificationOutcome::not_found(scope, key, expected, mode),
        FieldReading::Empty => {
            if matches(mode, &expected, "") {
                VerificationOutcome::pass(scope, key, expected, "", mode)
            } else {
                VerificationOutcome::empty(scope, key, expected, mode)
            }
        }
        FieldReading::Value(actual) => {
            if matches(mode, &expected, actual) {
                VerificationOutcome::pass(scope, key, expected, actual.clone(), mode)
            } else {
                VerificationOutcome::mismatch(scope, key, expected, actual.clone(), mode)
            }
        }
    }
}

/// Polling reader and judge for localized fields.
#[derive(Debug)]
pub struct TextVerifier<'d, D: UiDriver> {
    driver: &'d D,
    options: PollOptions,
}

impl<'d, D: UiDriver> TextVerifier<'d, D> {
    /// Verifier with the default read deadline and poll interval.
    #[must_use]
    pub fn new(driver: &'d D) -> Self {
        Self {
            driver,
            options: PollOptions::default(),
        }
    }

    /// Override the polling cadence.
    #[must_use]
    pub const fn with_options(mut self, options: PollOptions) -> Self {
        self.options = options;
        self
    }

    /// The polling cadence in use.
    #[must_use]
    pub const fn options(&self) -> PollOptions {
        self.options
    }

    /// Poll the probe until a strategy yields non-empty text or the
    /// deadline passes.
    ///
    /// Driver errors during an attempt are logged and count as "nothing
    /// this attempt"; the next poll tick tries again. The distinction
    /// between `Empty` and `NotFound` is whether any element matched the
    /// locator at any point during the wait.
    pub fn read_field(&self, probe: &FieldProbe, within: Option<&ElementHandle>) -> FieldReading {
        let mut saw_element = false;

        let value = poll_until(self.options, || {
            let candidates = match self.driver.find_all(&probe.locator, within) {
                Ok(found) => found,
                Err(error) => {
                    tracing::warn!(locator = %probe.locator, %error, "lookup failed");
                    return None;
                }
            };
            if candidates.is_empty() {
                return None;
            }
            saw_element = true;

            let target = self.pick_candidate(&candidates);
            self.extract_first(target, &probe.strategies)
        });

        match value {
            Some(text) => FieldReading::Value(text),
            None if saw_element => FieldReading::Empty,
            None => FieldReading::NotFound,
        }
    }

    /// Read, judge and record one field.
    ///
    /// The scope comes from the collector; the mode from the probe.
    /// Always records an outcome and returns it, whatever the page did.
    pub fn verify(
        &self,
        collector: &mut SoftCollector,
        key: &str,
        probe: &FieldProbe,
        expected: &str,
    ) -> VerificationOutcome {
        self.verify_within(collector, key, probe, expected, None)
    }

    /// [`verify`](Self::verify) scoped under a root element.
    pub fn verify_within(
        &self,
        collector: &mut SoftCollector,
        key: &str,
        probe: &FieldProbe,
        expected: &str,
        within: Option<&ElementHandle>,
    ) -> VerificationOutcome {
        let reading = self.read_field(probe, within);
        let outcome = judge(collector.scope(), key, expected, probe.mode, &reading);
        if outcome.passed {
            tracing::debug!(key, actual = %outcome.actual, "check passed");
        } else {
            tracing::warn!(
                key,
                expected = %outcome.expected,
                actual = %outcome.actual,
                "check failed"
            );
        }
        collector.record(&outcome);
        outcome
    }

    /// Verify a field against the deck entry for `(locale, key)`.
    ///
    /// A missing entry becomes an empty expected string; the check then
    /// fails against any on-page text, which is the signal that the
    /// deck is incomplete.
    pub fn verify_key(
        &self,
        collector: &mut SoftCollector,
        table: &TranslationTable,
        locale: &str,
        key: &str,
        probe: &FieldProbe,
        within: Option<&ElementHandle>,
    ) -> VerificationOutcome {
        let expected = table.get_or_empty(locale, key);
        self.verify_within(collector, key, probe, expected, within)
    }

    /// Prefer the first displayed candidate; fall back to the first
    /// match so script reads still work on hidden nodes.
    fn pick_candidate<'a>(&self, candidates: &'a [ElementHandle]) -> &'a ElementHandle {
        candidates
            .iter()
            .find(|el| self.driver.is_displayed(el).unwrap_or(false))
            .unwrap_or(&candidates[0])
    }

    fn extract_first(
        &self,
        element: &ElementHandle,
        strategies: &[ReadStrategy],
    ) -> Option<String> {
        for strategy in strategies {
            match self.extract(element, strategy) {
                Ok(raw) => {
                    let text = normalize(&raw);
                    if !text.is_empty() {
                        return Some(text);
                    }
                }
                Err(error) => {
                    tracing::warn!(%strategy, %error, "extraction failed");
                }
            }
        }
        None
    }

    fn extract(
        &self,
        element: &ElementHandle,
        strategy: &ReadStrategy,
    ) -> crate::result::CotejarResult<String> {
        match strategy {
            ReadStrategy::VisibleText => self.driver.visible_text(element),
            ReadStrategy::InnerText => Ok(self
                .driver
                .attribute(element, "innerText")?
                .unwrap_or_default()),
            ReadStrategy::TextContent => self.driver.text_content(element),
            ReadStrategy::Attribute(name) => {
                Ok(self.driver.attribute(element, name)?.unwrap_or_default())
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::driver::{MockDriver, MockElement};
    use crate::locator::Selector;
    use crate::collector::OutcomeKind;
    use std::time::{Duration, Instant};

    fn fast() -> PollOptions {
        PollOptions::from_millis(250, 10)
    }

    mod read_field {
        use super::*;

        #[test]
        fn visible_text_wins_when_present() {
            let driver = MockDriver::new().with_element(
                ".title",
                MockElement::new()
                    .with_visible_text("Регистрация")
                    .with_text_content("should not be used"),
            );
            let verifier = TextVerifier::new(&driver).with_options(fast());

            let reading = verifier.read_field(&FieldProbe::text(Selector::css(".title")), None);
            assert_eq!(reading, FieldReading::Value("Регистрация".into()));
        }

        #[test]
        fn falls_back_to_inner_text_then_text_content() {
            let driver = MockDriver::new().with_element(
                ".label",
                MockElement::new().with_inner_text("Adresse e-mail"),
            );
            let verifier = TextVerifier::new(&driver).with_options(fast());
            let reading = verifier.read_field(&FieldProbe::text(Selector::css(".label")), None);
            assert_eq!(reading, FieldReading::Value("Adresse e-mail".into()));

            let driver = MockDriver::new().with_element(
                ".hidden",
                MockElement::new().hidden().with_text_content("续订"),
            );
            let verifier = TextVerifier::new(&driver).with_options(fast());
            let reading = verifier.read_field(&FieldProbe::text(Selector::css(".hidden")), None);
            assert_eq!(reading, FieldReading::Value("续订".into()));
        }

        #[test]
        fn attribute_probe_reads_placeholder() {
            let driver = MockDriver::new().with_element(
                "input[name=email]",
                MockElement::new().with_attribute("placeholder", "tu@correo.com"),
            );
            let verifier = TextVerifier::new(&driver).with_options(fast());

            let probe = FieldProbe::attribute(Selector::css("input[name=email]"), "placeholder");
            assert_eq!(
                verifier.read_field(&probe, None),
                FieldReading::Value("tu@correo.com".into())
            );
        }

        #[test]
        fn readings_come_back_normalized() {
            let driver = MockDriver::new().with_element(
                ".msg",
                MockElement::new().with_visible_text("  Check\u{00A0}your inbox  "),
            );
            let verifier = TextVerifier::new(&driver).with_options(fast());
            let reading = verifier.read_field(&FieldProbe::text(Selector::css(".msg")), None);
            assert_eq!(reading, FieldReading::Value("Check your inbox".into()));
        }

        #[test]
        fn missing_element_reads_not_found() {
            let driver = MockDriver::new();
            let verifier = TextVerifier::new(&driver).with_options(fast());
            let reading = verifier.read_field(&FieldProbe::text(Selector::css(".absent")), None);
            assert_eq!(reading, FieldReading::NotFound);
        }

        #[test]
        fn present_but_blank_reads_empty() {
            let driver = MockDriver::new().with_element(".blank", MockElement::new());
            let verifier = TextVerifier::new(&driver).with_options(fast());
            let reading = verifier.read_field(&FieldProbe::text(Selector::css(".blank")), None);
            assert_eq!(reading, FieldReading::Empty);
        }

        #[test]
        fn late_element_is_picked_up_by_polling() {
            let driver = MockDriver::new().with_element(
                ".late",
                MockElement::new()
                    .with_visible_text("Erfolg")
                    .appears_after(Duration::from_millis(50)),
            );
            let verifier =
                TextVerifier::new(&driver).with_options(PollOptions::from_millis(1_000, 10));
            let reading = verifier.read_field(&FieldProbe::text(Selector::css(".late")), None);
            assert_eq!(reading, FieldReading::Value("Erfolg".into()));
        }

        #[test]
        fn read_respects_the_deadline() {
            let driver = MockDriver::new();
            let verifier =
                TextVerifier::new(&driver).with_options(PollOptions::from_millis(300, 20));

            let start = Instant::now();
            let reading = verifier.read_field(&FieldProbe::text(Selector::css(".never")), None);
            assert_eq!(reading, FieldReading::NotFound);
            assert!(start.elapsed() < Duration::from_millis(1_500));
        }

        #[test]
        fn strategy_fault_falls_through_to_next_strategy() {
            let driver = MockDriver::new().with_element(
                ".title",
                MockElement::new()
                    .with_visible_text("unused")
                    .with_inner_text("Iscrizione"),
            );
            driver.fail_on("visible_text");
            let verifier = TextVerifier::new(&driver).with_options(fast());

            let reading = verifier.read_field(&FieldProbe::text(Selector::css(".title")), None);
            assert_eq!(reading, FieldReading::Value("Iscrizione".into()));
        }

        #[test]
        fn lookup_fault_degrades_to_not_found() {
            let driver = MockDriver::new().with_element(".title", MockElement::new());
            driver.fail_on("find_all");
            let verifier = TextVerifier::new(&driver).with_options(fast());

            let reading = verifier.read_field(&FieldProbe::text(Selector::css(".title")), None);
            assert_eq!(reading, FieldReading::NotFound);
        }
    }

    mod judgment {
        use super::*;

        #[test]
        fn exact_is_case_sensitive_on_normalized_forms() {
            let reading = FieldReading::Value(normalize("close "));
            let outcome = judge("s", "close", "Close", MatchMode::Exact, &reading);
            assert!(!outcome.passed);

            let reading = FieldReading::Value(normalize("Close "));
            let outcome = judge("s", "close", "Close", MatchMode::Exact, &reading);
            assert!(outcome.passed);
        }

        #[test]
        fn contains_is_case_insensitive_substring() {
            let reading = FieldReading::Value(normalize("please SIGN UP now"));
            let outcome = judge("s", "cta", "Sign Up", MatchMode::Contains, &reading);
            assert!(outcome.passed);
        }

        #[test]
        fn empty_expected_only_matches_empty_reading() {
            let outcome = judge("s", "k", "", MatchMode::Contains, &FieldReading::Empty);
            assert!(outcome.passed);

            let reading = FieldReading::Value("surprise".into());
            let outcome = judge("s", "k", "", MatchMode::Contains, &reading);
            assert!(!outcome.passed);
            assert_eq!(outcome.kind, OutcomeKind::Mismatch);
        }

        #[test]
        fn not_found_skips_comparison() {
            let outcome = judge("s", "k", "anything", MatchMode::Exact, &FieldReading::NotFound);
            assert!(!outcome.passed);
            assert_eq!(outcome.kind, OutcomeKind::NotFound);
        }

        #[test]
        fn empty_reading_with_copy_expected_is_its_own_kind() {
            let outcome = judge("s", "k", "Registro", MatchMode::Exact, &FieldReading::Empty);
            assert!(!outcome.passed);
            assert_eq!(outcome.kind, OutcomeKind::EmptyText);
        }

        #[test]
        fn expected_copy_is_normalized_before_comparison() {
            let reading = FieldReading::Value("Email Label".into());
            let outcome = judge(
                "s",
                "email_label",
                "Email\u{00A0}Label",
                MatchMode::Exact,
                &reading,
            );
            assert!(outcome.passed);
        }
    }

    mod verify {
        use super::*;

        #[test]
        fn records_pass_and_fail_outcomes() {
            let driver = MockDriver::new()
                .with_element(".title", MockElement::new().with_visible_text("Sign up"))
                .with_element(".cta", MockElement::new().with_visible_text("Submit"));
            let verifier = TextVerifier::new(&driver).with_options(fast());
            let mut soft = SoftCollector::new("signup.en");

            verifier.verify(
                &mut soft,
                "title",
                &FieldProbe::text(Selector::css(".title")),
                "Sign up",
            );
            verifier.verify(
                &mut soft,
                "submit_text",
                &FieldProbe::text(Selector::css(".cta")),
                "Sign up",
            );

            assert_eq!(soft.checks_recorded(), 2);
            assert_eq!(soft.failure_count(), 1);
            let line = &soft.failures()[0];
            assert!(line.contains("signup.en"));
            assert!(line.contains("submit_text"));
            assert!(line.contains("Sign up"));
            assert!(line.contains("Submit"));
        }

        #[test]
        fn missing_element_records_not_found_and_run_continues() {
            let driver = MockDriver::new()
                .with_element(".after", MockElement::new().with_visible_text("Weiter"));
            let verifier = TextVerifier::new(&driver).with_options(fast());
            let mut soft = SoftCollector::new("signup.de");

            let outcome = verifier.verify(
                &mut soft,
                "marketing",
                &FieldProbe::text(Selector::css(".gone")),
                "Angebote erhalten",
            );
            assert!(!outcome.passed);

            let outcome = verifier.verify(
                &mut soft,
                "next",
                &FieldProbe::text(Selector::css(".after")),
                "Weiter",
            );
            assert!(outcome.passed);

            assert_eq!(soft.failure_count(), 1);
            assert!(soft.failures()[0].contains("not found"));
            assert!(soft.failures()[0].contains("marketing"));
        }

        #[test]
        fn verify_key_defaults_missing_deck_entries_to_empty() {
            let driver = MockDriver::new()
                .with_element(".title", MockElement::new().with_visible_text("Titel"));
            let verifier = TextVerifier::new(&driver).with_options(fast());
            let table = TranslationTable::new();
            let mut soft = SoftCollector::new("signup.xx");

            let outcome = verifier.verify_key(
                &mut soft,
                &table,
                "xx",
                "title",
                &FieldProbe::text(Selector::css(".title")),
                None,
            );
            assert!(!outcome.passed);
            assert_eq!(outcome.expected, "");
            assert_eq!(outcome.actual, "Titel");
        }
    }
}
