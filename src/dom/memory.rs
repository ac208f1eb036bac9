//! Headless document for tests and non-browser hosts.
//!
//! Models what Aura touches: `<style>` elements in `<head>`, inline style
//! and attributes on the root element, computed custom properties (base
//! values plus per-`data-theme` overrides), and the window's pointer media
//! query and event listeners.
//!
//! Mutation records are queued like the browser's and only delivered by
//! [`MemoryDocument::deliver_mutations`], the stand-in for a microtask
//! checkpoint.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use super::{AuraDocument, AuraWindow, Callback, StyleHandle, Subscription, FINE_POINTER_QUERY};
use crate::error::{AuraError, AuraResult};

/// Rounds of delivery before giving up on an observer feedback loop.
const MAX_DELIVERY_ROUNDS: usize = 64;

const THEME_ATTRIBUTE: &str = "data-theme";

#[derive(Debug, Clone)]
struct StyleNode {
    id: String,
    css: String,
    media: Option<String>,
}

struct Observer {
    id: u64,
    filter: Vec<String>,
    callback: Callback,
}

#[derive(Default)]
struct DocumentState {
    head: Vec<StyleNode>,
    root_style: Vec<(String, String)>,
    root_attributes: BTreeMap<String, String>,
    base_computed: HashMap<String, String>,
    theme_computed: HashMap<String, HashMap<String, String>>,
    observers: Vec<Observer>,
    pending: Vec<u64>,
    next_id: u64,
    mutations: usize,
}

impl DocumentState {
    fn queue_attribute_mutation(&mut self, attribute: &str) {
        self.mutations += 1;
        for observer in &self.observers {
            if observer.filter.iter().any(|name| name == attribute)
                && !self.pending.contains(&observer.id)
            {
                self.pending.push(observer.id);
            }
        }
    }

    fn style_text(&self) -> String {
        self.root_style
            .iter()
            .map(|(name, value)| format!("{}: {};", name, value))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// In-memory document. Clones share the same state.
#[derive(Clone)]
pub struct MemoryDocument {
    state: Rc<RefCell<DocumentState>>,
    window: Option<MemoryWindow>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// Document in a window with a fine pointer.
    pub fn new() -> Self {
        Self::with_window(MemoryWindow::new(true))
    }

    /// Document in a touch-only window.
    pub fn touch_only() -> Self {
        Self::with_window(MemoryWindow::new(false))
    }

    pub fn with_window(window: MemoryWindow) -> Self {
        Self {
            state: Rc::new(RefCell::new(DocumentState::default())),
            window: Some(window),
        }
    }

    /// Document with no default view, as under server rendering.
    pub fn detached() -> Self {
        Self {
            state: Rc::new(RefCell::new(DocumentState::default())),
            window: None,
        }
    }

    /// Handle to the window, if the document has one.
    pub fn memory_window(&self) -> Option<&MemoryWindow> {
        self.window.as_ref()
    }

    /// Set a custom property as a stylesheet would (`:root { name: value }`).
    pub fn set_computed_property(&self, name: &str, value: &str) {
        self.state
            .borrow_mut()
            .base_computed
            .insert(name.to_string(), value.to_string());
    }

    /// Set a custom property for `[data-theme=theme]` on the root.
    pub fn set_theme_property(&self, theme: &str, name: &str, value: &str) {
        self.state
            .borrow_mut()
            .theme_computed
            .entry(theme.to_string())
            .or_default()
            .insert(name.to_string(), value.to_string());
    }

    /// Set an attribute on the root element, queueing mutation records.
    pub fn set_root_attribute(&self, name: &str, value: &str) {
        let mut state = self.state.borrow_mut();
        state
            .root_attributes
            .insert(name.to_string(), value.to_string());
        state.queue_attribute_mutation(name);
    }

    pub fn root_attribute(&self, name: &str) -> Option<String> {
        let state = self.state.borrow();
        if name == "style" {
            return Some(state.style_text()).filter(|text| !text.is_empty());
        }
        state.root_attributes.get(name).cloned()
    }

    /// Deliver queued mutation records until none remain.
    ///
    /// Returns the number of observer callbacks invoked.
    pub fn deliver_mutations(&self) -> usize {
        let mut delivered = 0;
        for _ in 0..MAX_DELIVERY_ROUNDS {
            let callbacks: Vec<Callback> = {
                let mut state = self.state.borrow_mut();
                let pending = std::mem::take(&mut state.pending);
                let callbacks = pending
                    .iter()
                    .filter_map(|id| state.observers.iter().find(|o| o.id == *id))
                    .map(|o| Rc::clone(&o.callback))
                    .collect();
                callbacks
            };
            if callbacks.is_empty() {
                return delivered;
            }
            for callback in callbacks {
                callback();
                delivered += 1;
            }
        }
        log::warn!("[AURA] Mutation delivery did not settle, dropping pending records");
        self.state.borrow_mut().pending.clear();
        delivered
    }

    /// Number of `<style>` elements carrying `id`.
    pub fn style_count(&self, id: &str) -> usize {
        self.state
            .borrow()
            .head
            .iter()
            .filter(|node| node.id == id)
            .count()
    }

    pub fn style_css(&self, id: &str) -> Option<String> {
        self.state
            .borrow()
            .head
            .iter()
            .find(|node| node.id == id)
            .map(|node| node.css.clone())
    }

    /// Inline root style properties in insertion order.
    pub fn root_properties(&self) -> Vec<(String, String)> {
        self.state.borrow().root_style.clone()
    }

    pub fn observer_count(&self) -> usize {
        self.state.borrow().observers.len()
    }

    /// Total DOM writes so far (elements, attributes, inline style).
    pub fn mutation_count(&self) -> usize {
        self.state.borrow().mutations
    }
}

impl AuraDocument for MemoryDocument {
    type Window = MemoryWindow;

    fn window(&self) -> Option<MemoryWindow> {
        self.window.clone()
    }

    fn find_style(&self, id: &str) -> Option<StyleHandle> {
        self.state
            .borrow()
            .head
            .iter()
            .find(|node| node.id == id)
            .map(|node| StyleHandle {
                id: node.id.clone(),
                media: node.media.clone(),
            })
    }

    fn prepend_style(&self, id: &str, css: &str) -> AuraResult<StyleHandle> {
        let mut state = self.state.borrow_mut();
        state.head.insert(
            0,
            StyleNode {
                id: id.to_string(),
                css: css.to_string(),
                media: None,
            },
        );
        state.mutations += 1;
        Ok(StyleHandle {
            id: id.to_string(),
            media: None,
        })
    }

    fn remove_element(&self, id: &str) -> AuraResult<()> {
        let mut state = self.state.borrow_mut();
        let before = state.head.len();
        if let Some(index) = state.head.iter().position(|node| node.id == id) {
            state.head.remove(index);
        }
        if state.head.len() != before {
            state.mutations += 1;
        }
        Ok(())
    }

    fn set_style_media(&self, id: &str, media: Option<&str>) -> AuraResult<()> {
        let mut state = self.state.borrow_mut();
        let node = state
            .head
            .iter_mut()
            .find(|node| node.id == id)
            .ok_or_else(|| AuraError::ElementNotFound { id: id.to_string() })?;
        node.media = media.map(str::to_string);
        state.mutations += 1;
        Ok(())
    }

    fn set_root_property(&self, name: &str, value: &str) -> AuraResult<()> {
        let mut state = self.state.borrow_mut();
        match state.root_style.iter_mut().find(|(prop, _)| prop == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => state
                .root_style
                .push((name.to_string(), value.to_string())),
        }
        state.queue_attribute_mutation("style");
        Ok(())
    }

    fn remove_root_property(&self, name: &str) -> AuraResult<()> {
        let mut state = self.state.borrow_mut();
        let before = state.root_style.len();
        state.root_style.retain(|(prop, _)| prop != name);
        if state.root_style.len() != before {
            state.queue_attribute_mutation("style");
        }
        Ok(())
    }

    fn root_property(&self, name: &str) -> Option<String> {
        self.state
            .borrow()
            .root_style
            .iter()
            .find(|(prop, _)| prop == name)
            .map(|(_, value)| value.clone())
    }

    fn computed_root_property(&self, name: &str) -> Option<String> {
        if let Some(value) = self.root_property(name) {
            return Some(value);
        }
        let state = self.state.borrow();
        state
            .root_attributes
            .get(THEME_ATTRIBUTE)
            .and_then(|theme| state.theme_computed.get(theme))
            .and_then(|props| props.get(name))
            .or_else(|| state.base_computed.get(name))
            .cloned()
    }

    fn observe_root_attributes(
        &self,
        attributes: &[&str],
        callback: Callback,
    ) -> AuraResult<Subscription> {
        let id = {
            let mut state = self.state.borrow_mut();
            state.next_id += 1;
            let id = state.next_id;
            state.observers.push(Observer {
                id,
                filter: attributes.iter().map(|name| name.to_string()).collect(),
                callback,
            });
            id
        };

        let state = Rc::downgrade(&self.state);
        Ok(Subscription::new(move || {
            if let Some(state) = state.upgrade() {
                let mut state = state.borrow_mut();
                state.observers.retain(|observer| observer.id != id);
                state.pending.retain(|pending| *pending != id);
            }
        }))
    }
}

#[derive(Default)]
struct WindowState {
    fine_pointer: bool,
    listeners: Vec<(u64, String, Callback)>,
    next_id: u64,
}

/// In-memory window. Clones share the same state.
#[derive(Clone, Default)]
pub struct MemoryWindow {
    state: Rc<RefCell<WindowState>>,
}

impl MemoryWindow {
    pub fn new(fine_pointer: bool) -> Self {
        Self {
            state: Rc::new(RefCell::new(WindowState {
                fine_pointer,
                ..WindowState::default()
            })),
        }
    }

    /// Dispatch `event` to every listener registered for it.
    pub fn dispatch(&self, event: &str) -> usize {
        let callbacks: Vec<Callback> = self
            .state
            .borrow()
            .listeners
            .iter()
            .filter(|(_, name, _)| name == event)
            .map(|(_, _, callback)| Rc::clone(callback))
            .collect();
        for callback in &callbacks {
            callback();
        }
        callbacks.len()
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.state
            .borrow()
            .listeners
            .iter()
            .filter(|(_, name, _)| name == event)
            .count()
    }
}

impl AuraWindow for MemoryWindow {
    fn matches_media(&self, query: &str) -> bool {
        query == FINE_POINTER_QUERY && self.state.borrow().fine_pointer
    }

    fn listen(&self, event: &str, callback: Callback) -> AuraResult<Subscription> {
        let id = {
            let mut state = self.state.borrow_mut();
            state.next_id += 1;
            let id = state.next_id;
            state.listeners.push((id, event.to_string(), callback));
            id
        };

        let state = Rc::downgrade(&self.state);
        Ok(Subscription::new(move || {
            if let Some(state) = state.upgrade() {
                state
                    .borrow_mut()
                    .listeners
                    .retain(|(listener, _, _)| *listener != id);
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counter() -> (Rc<Cell<usize>>, Callback) {
        let count = Rc::new(Cell::new(0));
        let inner = Rc::clone(&count);
        (count, Rc::new(move || inner.set(inner.get() + 1)))
    }

    #[test]
    fn test_prepend_and_remove_style() {
        let doc = MemoryDocument::new();
        doc.prepend_style("a", "html {}").unwrap();
        doc.prepend_style("b", "body {}").unwrap();
        assert_eq!(doc.find_style("b").unwrap().id, "b");
        assert_eq!(doc.style_count("a"), 1);

        doc.remove_element("a").unwrap();
        assert!(doc.find_style("a").is_none());
        // Removing a missing element is not an error
        doc.remove_element("a").unwrap();
    }

    #[test]
    fn test_set_media_on_missing_style() {
        let doc = MemoryDocument::new();
        let err = doc.set_style_media("missing", Some("not all")).unwrap_err();
        assert!(matches!(err, AuraError::ElementNotFound { .. }));
    }

    #[test]
    fn test_computed_property_precedence() {
        let doc = MemoryDocument::new();
        doc.set_computed_property("--theme-color", "#000000");
        doc.set_theme_property("pink", "--theme-color", "#FF6183");
        assert_eq!(doc.computed_root_property("--theme-color").unwrap(), "#000000");

        doc.set_root_attribute("data-theme", "pink");
        assert_eq!(doc.computed_root_property("--theme-color").unwrap(), "#FF6183");

        doc.set_root_property("--theme-color", "#0C3EFF").unwrap();
        assert_eq!(doc.computed_root_property("--theme-color").unwrap(), "#0C3EFF");
        assert!(doc.computed_root_property("--unset").is_none());
    }

    #[test]
    fn test_mutations_delivered_after_commit() {
        let doc = MemoryDocument::new();
        let (count, callback) = counter();
        let _sub = doc.observe_root_attributes(&["data-theme"], callback).unwrap();

        doc.set_root_attribute("data-theme", "blue");
        doc.set_root_attribute("data-theme", "pink");
        doc.set_root_attribute("lang", "en");
        assert_eq!(count.get(), 0);

        // Both records batch into a single callback for the observer
        assert_eq!(doc.deliver_mutations(), 1);
        assert_eq!(count.get(), 1);
        assert_eq!(doc.deliver_mutations(), 0);
    }

    #[test]
    fn test_disconnect_drops_pending_records() {
        let doc = MemoryDocument::new();
        let (count, callback) = counter();
        let sub = doc.observe_root_attributes(&["class"], callback).unwrap();

        doc.set_root_attribute("class", "dark");
        sub.cancel();
        assert_eq!(doc.deliver_mutations(), 0);
        assert_eq!(count.get(), 0);
        assert_eq!(doc.observer_count(), 0);
    }

    #[test]
    fn test_style_attribute_mirrors_inline_style() {
        let doc = MemoryDocument::new();
        assert!(doc.root_attribute("style").is_none());
        doc.set_root_property("--a", "1").unwrap();
        assert_eq!(doc.root_attribute("style").unwrap(), "--a: 1;");
    }

    #[test]
    fn test_window_listeners() {
        let win = MemoryWindow::new(true);
        let (count, callback) = counter();
        let sub = win.listen("themechange", callback).unwrap();

        assert_eq!(win.dispatch("themechange"), 1);
        assert_eq!(win.dispatch("resize"), 0);
        assert_eq!(count.get(), 1);

        drop(sub);
        assert_eq!(win.listener_count("themechange"), 0);
        assert_eq!(win.dispatch("themechange"), 0);
    }

    #[test]
    fn test_detached_document_has_no_window() {
        assert!(MemoryDocument::detached().window().is_none());
        assert!(MemoryDocument::touch_only().window().is_some());
    }
}
