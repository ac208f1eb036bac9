//! Binding layer: the mount → observe → apply → unmount lifecycle.
//!
//! ## Components
//! - `Binding`: the shared engine behind both adapters. Existing means Active.
//! - `component`: [`Aura`], driven by prop changes and mount/unmount
//! - `vanilla`: [`AuraVanilla`], driven by `init`/`set_color`/`destroy`
//!
//! Host DOM failures never escape this layer. They are logged and the
//! binding degrades (stays Idle, or leaves the previous cursors in place).

pub mod component;
pub mod vanilla;

#[cfg(test)]
mod tests;

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::sync::Arc;

use crate::config::{AuraConfig, DEFAULT_COLOR};
use crate::cursor::CursorCache;
use crate::dom::{has_pointer_device, AuraDocument, AuraWindow, Subscription};
use crate::error::{AuraError, AuraResult};
use crate::style::{
    hide_cursor_styles, inject_cursor_styles, remove_cursor_styles, resolve_color,
    set_cursor_variables, show_cursor_styles,
};

pub use component::Aura;
pub use vanilla::{AuraVanilla, InitOptions};

/// Lifecycle state of an adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingState {
    Idle,
    Active,
}

fn is_variable_reference(color: &str) -> bool {
    color.trim_start().starts_with("var(")
}

/// State shared with observer callbacks. Callbacks hold it weakly.
struct Shared<D: AuraDocument> {
    doc: D,
    cache: Arc<CursorCache>,
    config: RefCell<AuraConfig>,
    /// Resolved color currently written to the root, `None` while hidden.
    applied: RefCell<Option<String>>,
    visible: Cell<bool>,
}

impl<D: AuraDocument> Shared<D> {
    /// Resolve the configured color and write the variables.
    ///
    /// Without `force`, skips the write when the resolved color is unchanged.
    fn apply(&self, force: bool) {
        if !self.visible.get() {
            return;
        }
        let (color, pressed_variants) = {
            let config = self.config.borrow();
            (config.color.clone(), config.pressed_variants)
        };
        let resolved = resolve_color(&self.doc, &color);
        if !force && self.applied.borrow().as_deref() == Some(resolved.as_str()) {
            return;
        }

        log::debug!("[AURA] Applying cursor color {} ({})", resolved, color);
        *self.applied.borrow_mut() = Some(resolved.clone());
        if let Err(e) = set_cursor_variables(&self.doc, &self.cache, &resolved, pressed_variants) {
            log::warn!("[AURA] Failed to set cursor variables: {}", e);
        }
    }

    fn on_attributes_changed(&self) {
        let is_var = is_variable_reference(&self.config.borrow().color);
        if is_var {
            self.apply(false);
        }
    }

    fn on_theme_change(&self) {
        self.apply(true);
    }
}

/// An active binding on one document.
pub(crate) struct Binding<D: AuraDocument> {
    shared: Rc<Shared<D>>,
    observer: Option<Subscription>,
    listener: Option<Subscription>,
}

impl<D: AuraDocument + 'static> Binding<D> {
    /// Activate on `doc`.
    ///
    /// Returns `Ok(None)` when there is no window or no fine pointer; the
    /// document is left untouched in that case.
    pub(crate) fn start(
        doc: D,
        mut config: AuraConfig,
        cache: Arc<CursorCache>,
    ) -> AuraResult<Option<Self>> {
        let Some(window) = doc.window() else {
            log::debug!("[AURA] No window for document, staying idle");
            return Ok(None);
        };
        if !has_pointer_device(&window) {
            log::info!("[AURA] No fine pointer device, keeping native cursors");
            return Ok(None);
        }

        config.validate();
        let attributes = config.observed_attributes.clone();
        let theme_event = config.theme_event.clone();

        let shared = Rc::new(Shared {
            doc,
            cache,
            config: RefCell::new(config),
            applied: RefCell::new(None),
            visible: Cell::new(true),
        });

        let style = inject_cursor_styles(&shared.doc)?;
        if style.media.is_some() {
            // Another binding soft-hid the shared stylesheet
            show_cursor_styles(&shared.doc)?;
        }
        shared.apply(true);

        let mut binding = Binding {
            shared,
            observer: None,
            listener: None,
        };
        if let Err(e) = binding.subscribe(&window, &attributes, &theme_event) {
            // Cache may be shared with live bindings
            binding.detach();
            return Err(e);
        }

        log::info!("[AURA] Cursor binding active");
        Ok(Some(binding))
    }

    fn subscribe(
        &mut self,
        window: &D::Window,
        attributes: &[String],
        theme_event: &str,
    ) -> AuraResult<()> {
        let weak: Weak<Shared<D>> = Rc::downgrade(&self.shared);
        let filter: Vec<&str> = attributes.iter().map(String::as_str).collect();
        self.observer = Some(self.shared.doc.observe_root_attributes(
            &filter,
            Rc::new(move || {
                if let Some(shared) = weak.upgrade() {
                    shared.on_attributes_changed();
                }
            }),
        )?);

        let weak: Weak<Shared<D>> = Rc::downgrade(&self.shared);
        self.listener = Some(window.listen(
            theme_event,
            Rc::new(move || {
                if let Some(shared) = weak.upgrade() {
                    shared.on_theme_change();
                }
            }),
        )?);
        Ok(())
    }
}

impl<D: AuraDocument> Binding<D> {
    /// Change the color and re-apply immediately.
    pub(crate) fn set_color(&self, color: &str) {
        let color = color.trim();
        self.shared.config.borrow_mut().color = if color.is_empty() {
            DEFAULT_COLOR.to_string()
        } else {
            color.to_string()
        };
        self.shared.apply(true);
    }

    /// Soft hide/show: toggles the stylesheet's `media` instead of removing it.
    pub(crate) fn set_visible(&self, visible: bool) {
        if self.shared.visible.replace(visible) == visible {
            return;
        }
        let result = if visible {
            show_cursor_styles(&self.shared.doc)
        } else {
            *self.shared.applied.borrow_mut() = None;
            hide_cursor_styles(&self.shared.doc)
        };
        if let Err(e) = result {
            log::warn!("[AURA] Failed to toggle cursor styles: {}", e);
        }
        if visible {
            self.shared.apply(true);
        }
    }

    pub(crate) fn is_visible(&self) -> bool {
        self.shared.visible.get()
    }

    /// Configured color, possibly a `var()` reference.
    pub(crate) fn configured_color(&self) -> String {
        self.shared.config.borrow().color.clone()
    }

    /// Last color written to the root, after resolution.
    pub(crate) fn applied_color(&self) -> Option<String> {
        self.shared.applied.borrow().clone()
    }

    /// Disconnect observers, then remove styles and clear the cache.
    pub(crate) fn stop(mut self) {
        self.detach();
        self.shared.cache.clear();
        log::info!("[AURA] Cursor binding stopped");
    }

    /// Disconnect observers and remove styles, keeping the cache.
    fn detach(&mut self) {
        if let Some(observer) = self.observer.take() {
            observer.cancel();
        }
        if let Some(listener) = self.listener.take() {
            listener.cancel();
        }
        if let Err(e) = remove_cursor_styles(&self.shared.doc) {
            log::warn!("[AURA] Failed to remove cursor styles: {}", e);
        }
    }
}

/// Log and drop a start failure, leaving the adapter idle.
fn start_or_idle<D: AuraDocument + 'static>(
    doc: D,
    config: AuraConfig,
    cache: Arc<CursorCache>,
) -> Option<Binding<D>> {
    match Binding::start(doc, config, cache) {
        Ok(binding) => binding,
        Err(AuraError::NoEnvironment) => None,
        Err(e) => {
            log::warn!("[AURA] Failed to activate cursor binding: {}", e);
            None
        },
    }
}
