//! Field probes
//!
//! A [`FieldProbe`] describes one piece of copy to verify: where it lives
//! ([`Selector`]), the ordered [`ReadStrategy`] list used to get text out
//! of it, and the [`MatchMode`] used to judge the reading.
//!
//! Read strategies exist because rendered pages disagree about where text
//! is. A visible heading answers to the driver's text read; a collapsed
//! accordion only answers to `textContent`; an input field keeps its copy
//! in `placeholder`. The probe tries each strategy in order and the first
//! non-empty normalized reading wins.

use crate::locator::Selector;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One way of extracting text from an element, tried in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadStrategy {
    /// The driver's rendered-text read (only what the user can see).
    VisibleText,
    /// The `innerText` attribute.
    InnerText,
    /// `textContent` via script, which sees through hidden containers.
    TextContent,
    /// A named attribute such as `placeholder`, `aria-label` or `value`.
    Attribute(String),
}

impl fmt::Display for ReadStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VisibleText => f.write_str("visible_text"),
            Self::InnerText => f.write_str("inner_text"),
            Self::TextContent => f.write_str("text_content"),
            Self::Attribute(name) => write!(f, "attribute:{name}"),
        }
    }
}

/// How an actual reading is judged against expected copy.
///
/// Both sides are normalized first. `Exact` compares code points
/// case-sensitively; `Contains` is a case-insensitive substring check,
/// for composite nodes that wrap the target copy in extra text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Normalized forms must be identical.
    #[default]
    Exact,
    /// Normalized actual must contain normalized expected, ignoring case.
    Contains,
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => f.write_str("exact"),
            Self::Contains => f.write_str("contains"),
        }
    }
}

fn default_strategies() -> Vec<ReadStrategy> {
    vec![
        ReadStrategy::VisibleText,
        ReadStrategy::InnerText,
        ReadStrategy::TextContent,
    ]
}

/// Where and how to read one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldProbe {
    /// Element to read.
    pub locator: Selector,
    /// Extraction strategies, tried in order until one yields text.
    #[serde(default = "default_strategies")]
    pub strategies: Vec<ReadStrategy>,
    /// Judgment mode for this field.
    #[serde(rename = "match", default)]
    pub mode: MatchMode,
}

impl FieldProbe {
    /// Probe for rendered copy: visible text, then `innerText`, then
    /// `textContent`.
    #[must_use]
    pub fn text(locator: Selector) -> Self {
        Self {
            locator,
            strategies: default_strategies(),
            mode: MatchMode::Exact,
        }
    }

    /// Probe for a single attribute, e.g. an input's `placeholder`.
    #[must_use]
    pub fn attribute(locator: Selector, name: impl Into<String>) -> Self {
        Self {
            locator,
            strategies: vec![ReadStrategy::Attribute(name.into())],
            mode: MatchMode::Exact,
        }
    }

    /// Replace the strategy chain.
    #[must_use]
    pub fn with_strategies(mut self, strategies: Vec<ReadStrategy>) -> Self {
        self.strategies = strategies;
        self
    }

    /// Set the judgment mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Shorthand for [`MatchMode::Contains`].
    #[must_use]
    pub const fn contains(self) -> Self {
        self.with_mode(MatchMode::Contains)
    }
}
