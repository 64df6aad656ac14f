//! Popup root resolution
//!
//! Auth popups render under different roots depending on app version
//! and viewport, so a [`PopupSpec`] carries an ordered list of candidate
//! selectors. [`resolve_root`] polls them in order until one resolves to
//! a displayed element; that handle then scopes every field probe in the
//! scenario.
//!
//! A root that never appears is not an error here. The resolver returns
//! `None` and the scenario runner records the absence while still
//! evaluating every configured field against an empty reading.

use crate::driver::{ElementHandle, UiDriver};
use crate::locator::Selector;
use crate::wait::{poll_until, PollOptions};
use serde::{Deserialize, Serialize};

/// A named popup and the selectors its root may answer to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopupSpec {
    /// Popup name, used in scopes and failure lines.
    pub name: String,
    /// Candidate root selectors, most specific first.
    pub roots: Vec<Selector>,
}

impl PopupSpec {
    /// Spec with one or more candidate roots.
    #[must_use]
    pub fn new(name: impl Into<String>, roots: Vec<Selector>) -> Self {
        Self {
            name: name.into(),
            roots,
        }
    }
}

/// Wait for any candidate root to resolve to a displayed element.
///
/// Candidates are tried in order on every poll tick, so an early
/// selector that appears late still wins over a later one that matched
/// first. Driver errors on one candidate are logged and do not stop the
/// others from being tried.
pub fn resolve_root<D: UiDriver>(
    driver: &D,
    spec: &PopupSpec,
    options: PollOptions,
) -> Option<ElementHandle> {
    poll_until(options, || {
        for selector in &spec.roots {
            let candidates = match driver.find_all(selector, None) {
                Ok(found) => found,
                Err(error) => {
                    tracing::warn!(popup = %spec.name, %selector, %error, "root lookup failed");
                    continue;
                }
            };
            for element in candidates {
                if driver.is_displayed(&element).unwrap_or(false) {
                    return Some(element);
                }
            }
        }
        None
    })
}
