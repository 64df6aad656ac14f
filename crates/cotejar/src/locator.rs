//! Element selectors
//!
//! A [`Selector`] names an element the way the driver will look it up.
//! Scenario files spell these as `{ css: "#signup .title" }` or
//! `{ xpath: "//div[@id='signup']" }`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How to locate an element in the page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Selector {
    /// CSS selector, e.g. `#popup-signup .title`.
    Css(String),
    /// XPath expression, e.g. `//div[contains(@class,'title')]`.
    Xpath(String),
}

impl Selector {
    /// CSS selector.
    pub fn css(expr: impl Into<String>) -> Self {
        Self::Css(expr.into())
    }

    /// XPath expression.
    pub fn xpath(expr: impl Into<String>) -> Self {
        Self::Xpath(expr.into())
    }

    /// The raw selector expression without the kind prefix.
    #[must_use]
    pub fn expression(&self) -> &str {
        match self {
            Self::Css(e) | Self::Xpath(e) => e,
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(e) => write!(f, "css:{e}"),
            Self::Xpath(e) => write!(f, "xpath:{e}"),
        }
    }
}
