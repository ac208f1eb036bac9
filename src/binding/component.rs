//! Component-style adapter.
//!
//! Owns one binding per mounted instance, the way a UI component would:
//! construct with props, `mount`, push prop changes through `set_color`,
//! `unmount` (or drop) to tear everything down.

use std::sync::Arc;

use super::{start_or_idle, Binding, BindingState};
use crate::config::AuraConfig;
use crate::cursor::CursorCache;
use crate::dom::AuraDocument;

/// Themed cursors for one document, tied to a component's lifetime.
pub struct Aura<D: AuraDocument> {
    doc: D,
    config: AuraConfig,
    cache: Arc<CursorCache>,
    binding: Option<Binding<D>>,
}

impl<D: AuraDocument + Clone + 'static> Aura<D> {
    /// Component with the default `#000` shadow.
    pub fn new(doc: D) -> Self {
        Self::with_config(doc, AuraConfig::default())
    }

    pub fn with_color(doc: D, color: impl Into<String>) -> Self {
        Self::with_config(doc, AuraConfig::with_color(color))
    }

    pub fn with_config(doc: D, mut config: AuraConfig) -> Self {
        config.validate();
        Self {
            doc,
            config,
            cache: Arc::new(CursorCache::new()),
            binding: None,
        }
    }

    /// Share a cursor cache with other instances.
    pub fn with_cache(mut self, cache: Arc<CursorCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Activate. Stays Idle on touch-only or windowless documents.
    pub fn mount(&mut self) -> BindingState {
        if self.binding.is_none() {
            self.binding = start_or_idle(self.doc.clone(), self.config.clone(), Arc::clone(&self.cache));
        }
        self.state()
    }

    /// Prop change. Re-applies immediately while mounted.
    pub fn set_color(&mut self, color: impl Into<String>) {
        self.config.color = color.into();
        self.config.validate();
        if let Some(binding) = &self.binding {
            binding.set_color(&self.config.color);
        }
    }

    /// Soft hide/show while mounted, keeping the stylesheet in the document.
    pub fn set_visible(&mut self, visible: bool) {
        if let Some(binding) = &self.binding {
            binding.set_visible(visible);
        }
    }

    pub fn is_visible(&self) -> bool {
        self.binding.as_ref().is_some_and(|binding| binding.is_visible())
    }

    /// Tear down: observers first, then styles and cache.
    pub fn unmount(&mut self) {
        if let Some(binding) = self.binding.take() {
            binding.stop();
        }
    }

    pub fn state(&self) -> BindingState {
        match self.binding {
            Some(_) => BindingState::Active,
            None => BindingState::Idle,
        }
    }

    pub fn color(&self) -> &str {
        &self.config.color
    }

    /// Color currently on the root after variable resolution.
    pub fn applied_color(&self) -> Option<String> {
        self.binding.as_ref().and_then(|binding| binding.applied_color())
    }

    pub fn cache(&self) -> &Arc<CursorCache> {
        &self.cache
    }
}

impl<D: AuraDocument> Drop for Aura<D> {
    fn drop(&mut self) {
        if let Some(binding) = self.binding.take() {
            binding.stop();
        }
    }
}
