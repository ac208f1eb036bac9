//! Target-environment abstraction.
//!
//! Every style operation takes an explicit document handle instead of
//! reaching for a global, so the same code drives the main page, an iframe,
//! a pop-out window, or the headless [`MemoryDocument`].
//!
//! Observation is modeled as [`Subscription`]s: cancelling one disconnects
//! synchronously, so no callback runs after teardown starts.

pub mod memory;

use std::fmt;
use std::rc::Rc;

use crate::error::AuraResult;

pub use memory::{MemoryDocument, MemoryWindow};

/// Media query matched by mice and trackpads, including on hybrid devices.
pub const FINE_POINTER_QUERY: &str = "(pointer: fine)";

/// Notification callback. Hosts run it on the UI thread.
pub type Callback = Rc<dyn Fn()>;

/// Handle to an active observer or listener.
///
/// Disconnects when cancelled or dropped.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Disconnect now.
    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// A `<style>` element owned by Aura in some document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleHandle {
    pub id: String,
    /// Current `media` attribute. `Some("not all")` while soft-hidden.
    pub media: Option<String>,
}

/// Window operations: media queries and event broadcast.
pub trait AuraWindow {
    fn matches_media(&self, query: &str) -> bool;

    /// Listen for `event` dispatched on the window.
    fn listen(&self, event: &str, callback: Callback) -> AuraResult<Subscription>;
}

/// Document operations the style applier and bindings need.
pub trait AuraDocument {
    type Window: AuraWindow;

    /// Default view of this document, `None` outside a browsing context.
    fn window(&self) -> Option<Self::Window>;

    fn find_style(&self, id: &str) -> Option<StyleHandle>;

    /// Create a `<style id=id>` holding `css` as the first child of `<head>`.
    fn prepend_style(&self, id: &str, css: &str) -> AuraResult<StyleHandle>;

    fn remove_element(&self, id: &str) -> AuraResult<()>;

    fn set_style_media(&self, id: &str, media: Option<&str>) -> AuraResult<()>;

    /// Inline style property on the root (`<html>`) element.
    fn set_root_property(&self, name: &str, value: &str) -> AuraResult<()>;

    fn remove_root_property(&self, name: &str) -> AuraResult<()>;

    fn root_property(&self, name: &str) -> Option<String>;

    /// Computed value of `name` on the root element, `None` if unset.
    fn computed_root_property(&self, name: &str) -> Option<String>;

    /// Call `callback` after any of `attributes` on the root element change.
    ///
    /// The callback sees the committed attribute state.
    fn observe_root_attributes(
        &self,
        attributes: &[&str],
        callback: Callback,
    ) -> AuraResult<Subscription>;
}

/// Whether a mouse or trackpad is present. Pure touch devices report false.
pub fn has_pointer_device<W: AuraWindow + ?Sized>(win: &W) -> bool {
    win.matches_media(FINE_POINTER_QUERY)
}
