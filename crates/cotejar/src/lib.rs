//! Cotejar: resilient localization verification for browser UIs
//!
//! Cotejar (Spanish: "to collate/compare") drives a localized web page
//! and checks that every visible string matches the expected
//! translation deck, reporting all of a scenario's mismatches in one
//! aggregated failure instead of dying on the first.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                      COTEJAR Pipeline                         │
//! ├───────────────────────────────────────────────────────────────┤
//! │  ┌──────────┐   ┌───────────┐   ┌──────────┐   ┌───────────┐  │
//! │  │ Scenario │──►│ Popup     │──►│ Text     │──►│ Soft      │  │
//! │  │ (YAML)   │   │ root wait │   │ Verifier │   │ Collector │  │
//! │  └──────────┘   └───────────┘   └──────────┘   └───────────┘  │
//! │      locale ──► deck lookup ──► normalize ──► one report      │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reads never throw: a missing element, a slow translation or an
//! empty node all become recorded outcomes, and the scenario keeps
//! going. Only the final [`SoftCollector::report`] raises a failure,
//! listing every wrong string the run found.

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]
#![cfg_attr(test, allow(clippy::large_stack_arrays, clippy::large_stack_frames))]

pub mod catalog;

mod collector;
mod driver;
mod forms;
mod locale;
mod locator;
mod normalize;
mod popup;
mod probe;
mod result;
mod scenario;
mod table;
mod testdata;
mod verifier;
mod wait;

pub use collector::{
    CollectorState, OutcomeKind, SoftCollector, VerificationFailure, VerificationOutcome,
};
pub use driver::{ElementHandle, MockDriver, MockElement, UiDriver};
pub use forms::{enable_options, fill_input, safe_click, submit, wait_enabled};
pub use locale::Locale;
pub use locator::Selector;
pub use normalize::{contains_normalized, eq_normalized, normalize};
pub use popup::{resolve_root, PopupSpec};
pub use probe::{FieldProbe, MatchMode, ReadStrategy};
pub use result::{CotejarError, CotejarResult};
pub use scenario::{
    run_scenario, run_suite, scenarios_from_yaml_str, FieldCheck, RunOptions, Scenario,
    SuiteSummary,
};
pub use table::TranslationTable;
pub use testdata::{name_year_email, random_email};
pub use verifier::{judge, matches, FieldReading, TextVerifier};
pub use wait::{
    poll_until, PollOptions, DEFAULT_ENABLE_TIMEOUT_MS, DEFAULT_POLL_INTERVAL_MS,
    DEFAULT_POPUP_TIMEOUT_MS, DEFAULT_READ_TIMEOUT_MS,
};
