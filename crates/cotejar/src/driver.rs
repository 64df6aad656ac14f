//! UiDriver - Abstract Page Automation Trait
//!
//! Verification logic never talks to a real browser directly. It goes
//! through [`UiDriver`], a small blocking trait covering the handful of
//! DOM operations localization checks need: scoped lookup, three kinds
//! of text read, attribute read, displayed/enabled state, and a few
//! input actions.
//!
//! Every method returns a [`CotejarResult`] so implementations backed by
//! a real session can surface stale handles and transport failures. The
//! verifier treats those errors as "no reading this attempt" and keeps
//! polling; they never abort a scenario.
//!
//! [`MockDriver`] is the in-process implementation used by unit tests,
//! the integration suite and the examples. It matches elements by exact
//! selector expression, supports delayed appearance and per-method fault
//! injection, and records every call for verification.

use crate::locator::Selector;
use crate::result::{CotejarError, CotejarResult};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Opaque reference to a located element.
///
/// The `id` only has meaning to the driver that produced it, like a
/// WebDriver element reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementHandle {
    /// Driver-assigned identifier.
    pub id: String,
    /// Element tag name, when the driver knows it.
    pub tag_name: String,
}

impl ElementHandle {
    /// Create a new element handle
    #[must_use]
    pub fn new(id: impl Into<String>, tag_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tag_name: tag_name.into(),
        }
    }
}

/// Blocking page automation surface for localization checks.
///
/// `within` scopes a lookup to the subtree under a previously located
/// element; `None` searches the whole document.
pub trait UiDriver {
    /// First element matching `selector`, or `None`.
    fn find(
        &self,
        selector: &Selector,
        within: Option<&ElementHandle>,
    ) -> CotejarResult<Option<ElementHandle>>;

    /// All elements matching `selector`, in document order.
    fn find_all(
        &self,
        selector: &Selector,
        within: Option<&ElementHandle>,
    ) -> CotejarResult<Vec<ElementHandle>>;

    /// Rendered text as the user sees it.
    fn visible_text(&self, element: &ElementHandle) -> CotejarResult<String>;

    /// Named attribute value, `None` when absent.
    fn attribute(&self, element: &ElementHandle, name: &str) -> CotejarResult<Option<String>>;

    /// `textContent` read through script, which sees hidden nodes.
    fn text_content(&self, element: &ElementHandle) -> CotejarResult<String>;

    /// Whether the element is currently displayed.
    fn is_displayed(&self, element: &ElementHandle) -> CotejarResult<bool>;

    /// Whether the element is currently enabled.
    fn is_enabled(&self, element: &ElementHandle) -> CotejarResult<bool>;

    /// Native click.
    fn click(&self, element: &ElementHandle) -> CotejarResult<()>;

    /// Scripted click, for elements overlapped by decoration.
    fn script_click(&self, element: &ElementHandle) -> CotejarResult<()>;

    /// Clear an input's value.
    fn clear(&self, element: &ElementHandle) -> CotejarResult<()>;

    /// Type text as key events.
    fn type_text(&self, element: &ElementHandle, text: &str) -> CotejarResult<()>;

    /// Set an input's value through script and fire the framework
    /// events (`input`, `change`, `blur`) so reactive UIs notice.
    fn set_value(&self, element: &ElementHandle, value: &str) -> CotejarResult<()>;
}

/// One scripted element inside a [`MockDriver`].
#[derive(Debug, Clone, Default)]
pub struct MockElement {
    /// What `visible_text` returns.
    pub visible_text: String,
    /// What the `innerText` attribute returns, when set.
    pub inner_text: Option<String>,
    /// What `text_content` returns.
    pub text_content: String,
    /// Plain attributes (`placeholder`, `aria-label`, `value`, ...).
    pub attributes: HashMap<String, String>,
    /// Displayed state.
    pub displayed: bool,
    /// Enabled state, once past `enable_after`.
    pub enabled: bool,
    /// Element tag name.
    pub tag_name: String,
    /// Hide the element from lookups until this much time has passed
    /// since registration.
    pub appear_after: Option<Duration>,
    /// Report disabled until this much time has passed since
    /// registration.
    pub enable_after: Option<Duration>,
    /// Make native `click` fail so callers fall back to the scripted
    /// click.
    pub intercept_click: bool,
}

impl MockElement {
    /// Displayed, enabled element with no text.
    #[must_use]
    pub fn new() -> Self {
        Self {
            displayed: true,
            enabled: true,
            tag_name: "div".to_string(),
            ..Self::default()
        }
    }

    /// Set the rendered text.
    #[must_use]
    pub fn with_visible_text(mut self, text: impl Into<String>) -> Self {
        self.visible_text = text.into();
        self
    }

    /// Set the `innerText` attribute.
    #[must_use]
    pub fn with_inner_text(mut self, text: impl Into<String>) -> Self {
        self.inner_text = Some(text.into());
        self
    }

    /// Set the scripted `textContent`.
    #[must_use]
    pub fn with_text_content(mut self, text: impl Into<String>) -> Self {
        self.text_content = text.into();
        self
    }

    /// Set one attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Set the tag name.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag_name = tag.into();
        self
    }

    /// Mark the element hidden.
    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.displayed = false;
        self
    }

    /// Mark the element disabled.
    #[must_use]
    pub const fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Hide the element from lookups for `delay` after registration.
    #[must_use]
    pub const fn appears_after(mut self, delay: Duration) -> Self {
        self.appear_after = Some(delay);
        self
    }

    /// Report disabled for `delay` after registration.
    #[must_use]
    pub const fn enables_after(mut self, delay: Duration) -> Self {
        self.enable_after = Some(delay);
        self
    }

    /// Make native clicks fail with a driver error.
    #[must_use]
    pub const fn with_intercepted_click(mut self) -> Self {
        self.intercept_click = true;
        self
    }
}

#[derive(Debug)]
struct Registered {
    element: MockElement,
    added_at: Instant,
}

#[derive(Debug, Default)]
struct MockState {
    /// Selector expression -> registered elements, in registration order.
    elements: HashMap<String, Vec<usize>>,
    store: Vec<Registered>,
    /// Handle id -> index into `store`.
    handles: HashMap<String, usize>,
    next_handle: u64,
    call_history: Vec<String>,
    fail_on: HashSet<String>,
}

/// In-process driver for unit testing.
///
/// Elements are registered under a selector expression and matched by
/// exact expression; DOM nesting is not modelled, so scoped lookups see
/// the same registry as document-wide ones.
#[derive(Debug, Default)]
pub struct MockDriver {
    state: Mutex<MockState>,
}

impl MockDriver {
    /// Create new mock driver
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an element under a selector expression.
    pub fn add_element(&self, selector: impl Into<String>, element: MockElement) {
        if let Ok(mut state) = self.state.lock() {
            let index = state.store.len();
            state.store.push(Registered {
                element,
                added_at: Instant::now(),
            });
            state.elements.entry(selector.into()).or_default().push(index);
        }
    }

    /// Builder form of [`add_element`](Self::add_element).
    #[must_use]
    pub fn with_element(self, selector: impl Into<String>, element: MockElement) -> Self {
        self.add_element(selector, element);
        self
    }

    /// Make every call to `method` return a driver error.
    pub fn fail_on(&self, method: impl Into<String>) {
        if let Ok(mut state) = self.state.lock() {
            state.fail_on.insert(method.into());
        }
    }

    /// Stop failing `method`.
    pub fn clear_failure(&self, method: &str) {
        if let Ok(mut state) = self.state.lock() {
            state.fail_on.remove(method);
        }
    }

    /// Get call history
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.state
            .lock()
            .map(|s| s.call_history.clone())
            .unwrap_or_default()
    }

    /// Check if method was called
    #[must_use]
    pub fn was_called(&self, method: &str) -> bool {
        self.history().iter().any(|c| c.starts_with(method))
    }

    fn record(&self, entry: String) -> CotejarResult<()> {
        let method = entry.split(':').next().unwrap_or(&entry).to_string();
        if let Ok(mut state) = self.state.lock() {
            state.call_history.push(entry);
            if state.fail_on.contains(&method) {
                return Err(CotejarError::driver(format!(
                    "injected failure in {method}"
                )));
            }
        }
        Ok(())
    }

    fn with_registered<T>(
        &self,
        handle: &ElementHandle,
        f: impl FnOnce(&Registered) -> T,
    ) -> CotejarResult<T> {
        let state = self
            .state
            .lock()
            .map_err(|_| CotejarError::driver("mock state poisoned"))?;
        let index = *state
            .handles
            .get(&handle.id)
            .ok_or_else(|| CotejarError::driver(format!("stale element handle {}", handle.id)))?;
        Ok(f(&state.store[index]))
    }

    fn with_registered_mut<T>(
        &self,
        handle: &ElementHandle,
        f: impl FnOnce(&mut Registered) -> T,
    ) -> CotejarResult<T> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| CotejarError::driver("mock state poisoned"))?;
        let index = *state
            .handles
            .get(&handle.id)
            .ok_or_else(|| CotejarError::driver(format!("stale element handle {}", handle.id)))?;
        Ok(f(&mut state.store[index]))
    }

    fn lookup(&self, selector: &Selector) -> CotejarResult<Vec<ElementHandle>> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| CotejarError::driver("mock state poisoned"))?;
        let indices = state
            .elements
            .get(selector.expression())
            .cloned()
            .unwrap_or_default();
        let mut found = Vec::new();
        for index in indices {
            let registered = &state.store[index];
            if let Some(delay) = registered.element.appear_after {
                if registered.added_at.elapsed() < delay {
                    continue;
                }
            }
            let tag = registered.element.tag_name.clone();
            let id = format!("mock-{}", state.next_handle);
            state.next_handle += 1;
            state.handles.insert(id.clone(), index);
            found.push(ElementHandle::new(id, tag));
        }
        Ok(found)
    }
}

impl UiDriver for MockDriver {
    fn find(
        &self,
        selector: &Selector,
        within: Option<&ElementHandle>,
    ) -> CotejarResult<Option<ElementHandle>> {
        Ok(self.find_all(selector, within)?.into_iter().next())
    }

    fn find_all(
        &self,
        selector: &Selector,
        _within: Option<&ElementHandle>,
    ) -> CotejarResult<Vec<ElementHandle>> {
        self.record(format!("find_all:{selector}"))?;
        self.lookup(selector)
    }

    fn visible_text(&self, element: &ElementHandle) -> CotejarResult<String> {
        self.record(format!("visible_text:{}", element.id))?;
        self.with_registered(element, |r| r.element.visible_text.clone())
    }

    fn attribute(&self, element: &ElementHandle, name: &str) -> CotejarResult<Option<String>> {
        self.record(format!("attribute:{}:{name}", element.id))?;
        let name = name.to_string();
        self.with_registered(element, move |r| {
            if name == "innerText" {
                r.element.inner_text.clone()
            } else {
                r.element.attributes.get(&name).cloned()
            }
        })
    }

    fn text_content(&self, element: &ElementHandle) -> CotejarResult<String> {
        self.record(format!("text_content:{}", element.id))?;
        self.with_registered(element, |r| r.element.text_content.clone())
    }

    fn is_displayed(&self, element: &ElementHandle) -> CotejarResult<bool> {
        self.record(format!("is_displayed:{}", element.id))?;
        self.with_registered(element, |r| r.element.displayed)
    }

    fn is_enabled(&self, element: &ElementHandle) -> CotejarResult<bool> {
        self.record(format!("is_enabled:{}", element.id))?;
        self.with_registered(element, |r| {
            if let Some(delay) = r.element.enable_after {
                if r.added_at.elapsed() < delay {
                    return false;
                }
            }
            r.element.enabled
        })
    }

    fn click(&self, element: &ElementHandle) -> CotejarResult<()> {
        self.record(format!("click:{}", element.id))?;
        let intercepted = self.with_registered(element, |r| r.element.intercept_click)?;
        if intercepted {
            return Err(CotejarError::driver("click intercepted by overlay"));
        }
        Ok(())
    }

    fn script_click(&self, element: &ElementHandle) -> CotejarResult<()> {
        self.record(format!("script_click:{}", element.id))
    }

    fn clear(&self, element: &ElementHandle) -> CotejarResult<()> {
        self.record(format!("clear:{}", element.id))?;
        self.with_registered_mut(element, |r| {
            r.element.attributes.remove("value");
        })
    }

    fn type_text(&self, element: &ElementHandle, text: &str) -> CotejarResult<()> {
        self.record(format!("type_text:{}:{text}", element.id))?;
        let text = text.to_string();
        self.with_registered_mut(element, move |r| {
            r.element
                .attributes
                .entry("value".to_string())
                .or_default()
                .push_str(&text);
        })
    }

    fn set_value(&self, element: &ElementHandle, value: &str) -> CotejarResult<()> {
        self.record(format!("set_value:{}:{value}", element.id))?;
        let value = value.to_string();
        self.with_registered_mut(element, move |r| {
            r.element.attributes.insert("value".to_string(), value);
        })
    }
}
