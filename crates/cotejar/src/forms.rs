//! Form interaction helpers
//!
//! Clicks and text entry on a live page fail in boring ways: a cookie
//! banner intercepts the click, a reactive input ignores scripted
//! values, a submit button stays disabled until validation settles.
//! Each helper wires the fallback that makes the action land and only
//! errors when every route failed.

use crate::driver::{ElementHandle, UiDriver};
use crate::result::{CotejarError, CotejarResult};
use crate::wait::{poll_until, PollOptions, DEFAULT_ENABLE_TIMEOUT_MS, DEFAULT_POLL_INTERVAL_MS};

/// Cadence for waiting on a control to become enabled.
#[must_use]
pub const fn enable_options() -> PollOptions {
    PollOptions::from_millis(DEFAULT_ENABLE_TIMEOUT_MS, DEFAULT_POLL_INTERVAL_MS)
}

/// Click an element, falling back to a scripted click when the native
/// one is intercepted by an overlay.
///
/// # Errors
///
/// Returns the scripted click's error when both routes fail.
pub fn safe_click<D: UiDriver>(driver: &D, element: &ElementHandle) -> CotejarResult<()> {
    match driver.click(element) {
        Ok(()) => Ok(()),
        Err(error) => {
            tracing::warn!(%error, "native click failed, retrying through script");
            driver.script_click(element)
        }
    }
}

/// Put `text` into an input, preferring the scripted value set so
/// framework events fire, and falling back to clear-and-type.
///
/// # Errors
///
/// Returns an error when both the scripted set and typing fail.
pub fn fill_input<D: UiDriver>(
    driver: &D,
    element: &ElementHandle,
    text: &str,
) -> CotejarResult<()> {
    match driver.set_value(element, text) {
        Ok(()) => Ok(()),
        Err(error) => {
            tracing::warn!(%error, "scripted value set failed, typing instead");
            driver.clear(element)?;
            if text.is_empty() {
                return Ok(());
            }
            driver.type_text(element, text)
        }
    }
}

/// Wait until a control reports enabled.
///
/// Driver faults during a poll count as "not enabled yet"; the next
/// tick asks again.
///
/// # Errors
///
/// [`CotejarError::Timeout`] when the deadline passes first.
pub fn wait_enabled<D: UiDriver>(
    driver: &D,
    element: &ElementHandle,
    options: PollOptions,
) -> CotejarResult<()> {
    poll_until(options, || {
        driver.is_enabled(element).unwrap_or(false).then_some(())
    })
    .ok_or_else(|| CotejarError::timeout(options.timeout.as_millis() as u64))
}

/// Wait for a submit control to enable, then click it.
///
/// # Errors
///
/// [`CotejarError::Timeout`] when the control never enables, or the
/// click error when both click routes fail.
pub fn submit<D: UiDriver>(
    driver: &D,
    element: &ElementHandle,
    options: PollOptions,
) -> CotejarResult<()> {
    wait_enabled(driver, element, options)?;
    safe_click(driver, element)
}
