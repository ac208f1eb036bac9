//! Lifecycle scenarios for the binding adapters.

#![cfg(test)]

use std::sync::Arc;

use super::*;
use crate::cursor::from_data_uri;
use crate::dom::{Callback, MemoryDocument, MemoryWindow, StyleHandle};
use crate::style::{all_variables, STYLE_ID};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn svg_of(value: &str) -> String {
    let start = value.find("url(").expect("url() value") + 4;
    let end = value.find(')').expect("closing paren");
    from_data_uri(&value[start..end]).expect("decodable data URI")
}

fn assert_torn_down(doc: &MemoryDocument) {
    assert_eq!(doc.style_count(STYLE_ID), 0);
    for var in all_variables() {
        assert!(doc.root_property(var.prop).is_none(), "{} left behind", var.prop);
    }
}

#[test]
fn test_mount_then_change_color() {
    init_logging();
    let doc = MemoryDocument::new();
    let mut aura = Aura::with_color(doc.clone(), "#FF6183");

    assert_eq!(aura.mount(), BindingState::Active);
    assert_eq!(doc.style_count(STYLE_ID), 1);

    let pink = doc.root_property("--cursor-pointer").unwrap();
    assert!(pink.ends_with(") 12 4, pointer"));
    assert!(svg_of(&pink).contains("#FF6183"));

    let cached_pink = aura.cache().themed("#FF6183", false).unwrap();

    aura.set_color("#000000");
    let black = doc.root_property("--cursor-pointer").unwrap();
    assert_ne!(pink, black);
    assert!(svg_of(&black).contains("#000000"));

    // The earlier set is still served from cache
    let again = aura.cache().themed("#FF6183", false).unwrap();
    assert!(Arc::ptr_eq(&cached_pink, &again));
}

#[test]
fn test_unmount_removes_everything() {
    let doc = MemoryDocument::new();
    let mut aura = Aura::with_color(doc.clone(), "#0C3EFF");
    aura.mount();
    assert!(!aura.cache().is_empty());

    aura.unmount();
    assert_eq!(aura.state(), BindingState::Idle);
    assert_torn_down(&doc);
    assert!(aura.cache().is_empty());
    assert_eq!(doc.observer_count(), 0);
    assert_eq!(doc.memory_window().unwrap().listener_count("themechange"), 0);
}

#[test]
fn test_drop_unmounts() {
    let doc = MemoryDocument::new();
    {
        let mut aura = Aura::with_color(doc.clone(), "#0C3EFF");
        aura.mount();
        assert_eq!(doc.style_count(STYLE_ID), 1);
    }
    assert_torn_down(&doc);
}

#[test]
fn test_touch_only_performs_no_mutations() {
    let doc = MemoryDocument::touch_only();
    let mut aura = Aura::with_color(doc.clone(), "#FF6183");

    assert_eq!(aura.mount(), BindingState::Idle);
    aura.set_color("#0C3EFF");
    aura.unmount();

    assert_eq!(doc.mutation_count(), 0);
    assert_eq!(doc.observer_count(), 0);
}

#[test]
fn test_detached_document_stays_idle() {
    let doc = MemoryDocument::detached();
    let mut aura = Aura::new(doc.clone());
    assert_eq!(aura.mount(), BindingState::Idle);
    assert_eq!(doc.mutation_count(), 0);
}

#[test]
fn test_mount_twice_is_noop() {
    let doc = MemoryDocument::new();
    let mut aura = Aura::new(doc.clone());
    aura.mount();
    let writes = doc.mutation_count();

    assert_eq!(aura.mount(), BindingState::Active);
    assert_eq!(doc.mutation_count(), writes);
    assert_eq!(doc.observer_count(), 1);
}

#[test]
fn test_variable_color_follows_theme_attribute() {
    init_logging();
    let doc = MemoryDocument::new();
    doc.set_theme_property("black", "--theme-color", "#000000");
    doc.set_theme_property("pink", "--theme-color", "#FF6183");
    doc.set_root_attribute("data-theme", "black");

    let mut aura = Aura::with_color(doc.clone(), "var(--theme-color)");
    aura.mount();
    assert_eq!(aura.applied_color().as_deref(), Some("#000000"));

    doc.set_root_attribute("data-theme", "pink");
    // Not applied until the mutation records are delivered
    assert_eq!(aura.applied_color().as_deref(), Some("#000000"));

    doc.deliver_mutations();
    assert_eq!(aura.applied_color().as_deref(), Some("#FF6183"));
    assert!(svg_of(&doc.root_property("--cursor-default").unwrap()).contains("#FF6183"));
}

#[test]
fn test_own_style_writes_settle() {
    let doc = MemoryDocument::new();
    doc.set_computed_property("--theme-color", "#8868EA");
    let mut aura = Aura::with_color(doc.clone(), "var(--theme-color)");
    aura.mount();
    aura.set_color("var(--theme-color)");

    // Our own inline style writes queue records; re-resolving finds no change.
    let writes = doc.mutation_count();
    let delivered = doc.deliver_mutations();
    assert_eq!(delivered, 1);
    assert_eq!(doc.mutation_count(), writes);
}

#[test]
fn test_literal_color_ignores_attribute_changes() {
    let doc = MemoryDocument::new();
    let mut aura = Aura::with_color(doc.clone(), "#FF9627");
    aura.mount();
    doc.deliver_mutations();
    let writes = doc.mutation_count();

    doc.set_root_attribute("class", "dark");
    doc.deliver_mutations();
    // Only the attribute write itself
    assert_eq!(doc.mutation_count(), writes + 1);
}

#[test]
fn test_themechange_event_reapplies() {
    let doc = MemoryDocument::new();
    doc.set_computed_property("--theme-color", "#0C3EFF");
    let mut aura = Aura::with_color(doc.clone(), "var(--theme-color)");
    aura.mount();

    // Stylesheet-level change with no attribute mutation
    doc.set_computed_property("--theme-color", "#FF6183");
    let window = doc.memory_window().unwrap();
    assert_eq!(window.dispatch("themechange"), 1);
    assert_eq!(aura.applied_color().as_deref(), Some("#FF6183"));
}

#[test]
fn test_no_callbacks_after_unmount() {
    let doc = MemoryDocument::new();
    doc.set_computed_property("--theme-color", "#0C3EFF");
    let mut aura = Aura::with_color(doc.clone(), "var(--theme-color)");
    aura.mount();

    doc.set_root_attribute("data-theme", "pink");
    aura.unmount();
    let writes = doc.mutation_count();

    assert_eq!(doc.deliver_mutations(), 0);
    assert_eq!(doc.memory_window().unwrap().dispatch("themechange"), 0);
    assert_eq!(doc.mutation_count(), writes);
    assert_torn_down(&doc);
}

#[test]
fn test_unset_variable_falls_back_to_black() {
    let doc = MemoryDocument::new();
    let mut aura = Aura::with_color(doc.clone(), "var(--missing)");
    aura.mount();

    assert_eq!(aura.applied_color().as_deref(), Some("#000"));
    assert!(svg_of(&doc.root_property("--cursor-text").unwrap()).contains("fill=\"#000\" fill-opacity"));
}

#[test]
fn test_soft_hide_and_show() {
    let doc = MemoryDocument::new();
    let mut aura = Aura::with_color(doc.clone(), "#0C3EFF");
    aura.mount();

    aura.set_visible(false);
    assert!(!aura.is_visible());
    assert_eq!(doc.style_count(STYLE_ID), 1);
    assert_eq!(doc.find_style(STYLE_ID).unwrap().media.as_deref(), Some("not all"));
    assert!(doc.root_property("--cursor-default").is_none());

    // Color changes while hidden are held until shown
    aura.set_color("#FF6183");
    assert!(doc.root_property("--cursor-default").is_none());

    aura.set_visible(true);
    assert!(doc.find_style(STYLE_ID).unwrap().media.is_none());
    assert!(svg_of(&doc.root_property("--cursor-default").unwrap()).contains("#FF6183"));
}

#[test]
fn test_without_pressed_variants() {
    let doc = MemoryDocument::new();
    let config = AuraConfig {
        pressed_variants: false,
        ..AuraConfig::with_color("#0C3EFF")
    };
    let mut aura = Aura::with_config(doc.clone(), config);
    aura.mount();

    assert_eq!(doc.root_properties().len(), 5);
    assert!(doc.root_property("--cursor-pointer-active").is_none());
    // Pressed rules read the resting cursor instead
    assert!(doc
        .style_css(STYLE_ID)
        .unwrap()
        .contains("var(--cursor-pointer-active, var(--cursor-pointer))"));
    assert_eq!(aura.cache().len(), 1);
}

#[test]
fn test_two_instances_share_one_stylesheet() {
    let doc = MemoryDocument::new();
    let cache = Arc::new(CursorCache::new());
    let mut first = Aura::with_color(doc.clone(), "#0C3EFF").with_cache(Arc::clone(&cache));
    let mut second = Aura::with_color(doc.clone(), "#0C3EFF").with_cache(Arc::clone(&cache));

    first.mount();
    second.mount();
    assert_eq!(doc.style_count(STYLE_ID), 1);
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_mount_beside_hidden_instance_shows_stylesheet() {
    let doc = MemoryDocument::new();
    let mut first = Aura::with_color(doc.clone(), "#0C3EFF");
    first.mount();
    first.set_visible(false);

    let mut second = Aura::with_color(doc.clone(), "#FF6183");
    assert_eq!(second.mount(), BindingState::Active);
    assert!(second.is_visible());
    assert_eq!(doc.style_count(STYLE_ID), 1);
    assert!(doc.find_style(STYLE_ID).unwrap().media.is_none());
    assert!(svg_of(&doc.root_property("--cursor-default").unwrap()).contains("#FF6183"));
}

/// Memory document whose host rejects attribute observers.
#[derive(Clone)]
struct NoObserverDocument(MemoryDocument);

impl AuraDocument for NoObserverDocument {
    type Window = MemoryWindow;

    fn window(&self) -> Option<MemoryWindow> {
        self.0.window()
    }

    fn find_style(&self, id: &str) -> Option<StyleHandle> {
        self.0.find_style(id)
    }

    fn prepend_style(&self, id: &str, css: &str) -> AuraResult<StyleHandle> {
        self.0.prepend_style(id, css)
    }

    fn remove_element(&self, id: &str) -> AuraResult<()> {
        self.0.remove_element(id)
    }

    fn set_style_media(&self, id: &str, media: Option<&str>) -> AuraResult<()> {
        self.0.set_style_media(id, media)
    }

    fn set_root_property(&self, name: &str, value: &str) -> AuraResult<()> {
        self.0.set_root_property(name, value)
    }

    fn remove_root_property(&self, name: &str) -> AuraResult<()> {
        self.0.remove_root_property(name)
    }

    fn root_property(&self, name: &str) -> Option<String> {
        self.0.root_property(name)
    }

    fn computed_root_property(&self, name: &str) -> Option<String> {
        self.0.computed_root_property(name)
    }

    fn observe_root_attributes(&self, _: &[&str], _: Callback) -> AuraResult<Subscription> {
        Err(AuraError::DomError("MutationObserver unavailable".to_string()))
    }
}

#[test]
fn test_failed_start_keeps_shared_cache() {
    let cache = Arc::new(CursorCache::new());
    let page = MemoryDocument::new();
    let mut live = Aura::with_color(page.clone(), "#0C3EFF").with_cache(Arc::clone(&cache));
    live.mount();
    let live_set = cache.themed("#0C3EFF", false).unwrap();

    let frame = NoObserverDocument(MemoryDocument::new());
    let mut failed = Aura::with_color(frame.clone(), "#FF6183").with_cache(Arc::clone(&cache));
    assert_eq!(failed.mount(), BindingState::Idle);
    assert_torn_down(&frame.0);

    let again = cache.themed("#0C3EFF", false).unwrap();
    assert!(Arc::ptr_eq(&live_set, &again));
    assert_eq!(page.style_count(STYLE_ID), 1);
}

#[test]
fn test_vanilla_lifecycle() {
    init_logging();
    let doc = MemoryDocument::new();
    let mut aura = AuraVanilla::new(doc.clone());

    assert_eq!(aura.init(InitOptions::color("#0C3EFF")), BindingState::Active);
    assert!(svg_of(&doc.root_property("--cursor-grab").unwrap()).contains("#0C3EFF"));

    aura.set_color("#FF6183");
    assert_eq!(aura.color(), Some("#FF6183"));
    assert!(svg_of(&doc.root_property("--cursor-grab").unwrap()).contains("#FF6183"));

    aura.destroy();
    assert_eq!(aura.state(), BindingState::Idle);
    assert!(aura.cache().is_empty());
    assert!(aura.color().is_none());
    assert_torn_down(&doc);
}

#[test]
fn test_vanilla_default_color() {
    let doc = MemoryDocument::new();
    let mut aura = AuraVanilla::new(doc.clone());
    aura.init(InitOptions::default());
    assert_eq!(aura.applied_color().as_deref(), Some("#000"));
}

#[test]
fn test_vanilla_targets_other_document() {
    let page = MemoryDocument::new();
    let frame = MemoryDocument::new();
    let mut aura = AuraVanilla::new(page.clone());

    aura.init(InitOptions::color("#8868EA").document(frame.clone()));
    assert_eq!(frame.style_count(STYLE_ID), 1);
    assert_eq!(page.mutation_count(), 0);

    aura.destroy();
    assert_torn_down(&frame);
}

#[test]
fn test_vanilla_reinit_replaces_binding() {
    let page = MemoryDocument::new();
    let frame = MemoryDocument::new();
    let mut aura = AuraVanilla::new(page.clone());

    aura.init(InitOptions::color("#0C3EFF"));
    aura.init(InitOptions::color("#FF6183").document(frame.clone()));

    assert_torn_down(&page);
    assert_eq!(page.observer_count(), 0);
    assert_eq!(frame.style_count(STYLE_ID), 1);
    assert_eq!(aura.applied_color().as_deref(), Some("#FF6183"));
}

#[test]
fn test_vanilla_set_color_before_init() {
    let doc = MemoryDocument::new();
    let mut aura = AuraVanilla::new(doc.clone());
    aura.set_color("#FF9627");

    assert_eq!(aura.color(), Some("#FF9627"));
    assert_eq!(doc.mutation_count(), 0);
}

#[test]
fn test_vanilla_touch_only() {
    let doc = MemoryDocument::touch_only();
    let mut aura = AuraVanilla::new(doc.clone());
    assert_eq!(aura.init(InitOptions::color("#0C3EFF")), BindingState::Idle);
    aura.destroy();
    assert_eq!(doc.mutation_count(), 0);
}
