//! Imperative adapter for non-framework pages.
//!
//! One active color/document pair at a time: `init` starts it (replacing
//! any previous binding), `set_color` updates it, `destroy` tears it down.
//!
//! ```ignore
//! let mut aura = AuraVanilla::new(document);
//! aura.init(InitOptions::color("#0C3EFF"));
//! aura.set_color("#FF6183");
//! aura.destroy();
//! ```

use std::sync::Arc;

use super::{start_or_idle, Binding, BindingState};
use crate::config::AuraConfig;
use crate::cursor::CursorCache;
use crate::dom::AuraDocument;

/// Options for [`AuraVanilla::init`].
pub struct InitOptions<D> {
    pub config: AuraConfig,
    /// Target document. Defaults to the adapter's own document.
    pub document: Option<D>,
}

impl<D> Default for InitOptions<D> {
    fn default() -> Self {
        Self {
            config: AuraConfig::default(),
            document: None,
        }
    }
}

impl<D> InitOptions<D> {
    pub fn color(color: impl Into<String>) -> Self {
        Self {
            config: AuraConfig::with_color(color),
            document: None,
        }
    }

    /// Target another document (iframe, pop-out window).
    pub fn document(mut self, document: D) -> Self {
        self.document = Some(document);
        self
    }
}

/// Imperative cursor controller.
pub struct AuraVanilla<D: AuraDocument> {
    default_doc: D,
    cache: Arc<CursorCache>,
    color: Option<String>,
    binding: Option<Binding<D>>,
}

impl<D: AuraDocument + Clone + 'static> AuraVanilla<D> {
    /// Controller whose `init` targets `default_doc` unless told otherwise.
    pub fn new(default_doc: D) -> Self {
        Self {
            default_doc,
            cache: Arc::new(CursorCache::new()),
            color: None,
            binding: None,
        }
    }

    pub fn init(&mut self, options: InitOptions<D>) -> BindingState {
        if self.binding.is_some() {
            log::debug!("[AURA] Re-initializing, tearing down previous binding");
            self.destroy();
        }

        let doc = options.document.unwrap_or_else(|| self.default_doc.clone());
        let mut config = options.config;
        config.validate();
        self.color = Some(config.color.clone());
        self.binding = start_or_idle(doc, config, Arc::clone(&self.cache));
        self.state()
    }

    /// Update the shadow color. Before `init` the color is only remembered.
    pub fn set_color(&mut self, color: &str) {
        match &self.binding {
            Some(binding) => {
                binding.set_color(color);
                self.color = Some(binding.configured_color());
            },
            None => self.color = Some(color.trim().to_string()),
        }
    }

    /// Remove styles, listeners and cached cursors.
    pub fn destroy(&mut self) {
        if let Some(binding) = self.binding.take() {
            binding.stop();
        }
        self.cache.clear();
        self.color = None;
    }

    pub fn state(&self) -> BindingState {
        match self.binding {
            Some(_) => BindingState::Active,
            None => BindingState::Idle,
        }
    }

    /// Color last passed to `init` or `set_color`.
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn applied_color(&self) -> Option<String> {
        self.binding.as_ref().and_then(|binding| binding.applied_color())
    }

    pub fn cache(&self) -> &Arc<CursorCache> {
        &self.cache
    }
}
