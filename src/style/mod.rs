//! Style application: the injected stylesheet and the root custom properties.
//!
//! These are the only functions that write Aura's DOM state. Every call
//! takes the target document explicitly, so iframes and pop-out windows
//! get their own stylesheet and variables.
//!
//! Invariants kept here:
//! - at most one `<style id="aura-cursor-styles">` per document
//! - the cursor properties are all set or all removed together

pub mod rules;

use crate::config::DEFAULT_COLOR;
use crate::cursor::{cursor_css, CursorCache, ThemedCursorSet};
use crate::dom::{AuraDocument, StyleHandle};
use crate::error::AuraResult;

pub use rules::{
    all_variables, cursor_rules, CursorVariable, CURSOR_VARIABLES, LAYER_NAME,
    PRESSED_CURSOR_VARIABLES, STYLE_ID,
};

/// `media` value that disables the stylesheet without removing it.
pub const HIDDEN_MEDIA: &str = "not all";

/// Ensure the cursor stylesheet exists in `doc`.
///
/// Idempotent: an existing element is returned unchanged, including a
/// soft-hidden one (check `media` on the handle).
pub fn inject_cursor_styles<D: AuraDocument + ?Sized>(doc: &D) -> AuraResult<StyleHandle> {
    if let Some(existing) = doc.find_style(STYLE_ID) {
        return Ok(existing);
    }
    log::debug!("[STYLE] Injecting cursor stylesheet");
    doc.prepend_style(STYLE_ID, &cursor_rules())
}

fn write_variables<D: AuraDocument + ?Sized>(
    doc: &D,
    variables: &[CursorVariable],
    set: Option<&ThemedCursorSet>,
) -> AuraResult<()> {
    for var in variables {
        let value = match set {
            Some(set) => cursor_css(set.get(var.kind), var.kind, var.fallback),
            None => var.fallback.to_string(),
        };
        doc.set_root_property(var.prop, &value)?;
    }
    Ok(())
}

/// Set the cursor custom properties on `doc`'s root for `color`.
///
/// `color` must already be resolved. An unusable color writes the bare
/// keyword fallbacks instead of images.
pub fn set_cursor_variables<D: AuraDocument + ?Sized>(
    doc: &D,
    cache: &CursorCache,
    color: &str,
    pressed_variants: bool,
) -> AuraResult<()> {
    let resting = cache.themed(color, false);
    write_variables(doc, &CURSOR_VARIABLES, resting.as_deref())?;

    if pressed_variants {
        let pressed = cache.themed(color, true);
        write_variables(doc, &PRESSED_CURSOR_VARIABLES, pressed.as_deref())?;
    } else {
        for var in &PRESSED_CURSOR_VARIABLES {
            doc.remove_root_property(var.prop)?;
        }
    }
    Ok(())
}

/// Resolve a `var(--name)` or `var(--name, fallback)` reference against
/// the root's computed style. Other colors are returned unchanged.
///
/// An unset or empty variable falls back to the reference's own fallback,
/// then to `#000`.
pub fn resolve_color<D: AuraDocument + ?Sized>(doc: &D, color: &str) -> String {
    let color = color.trim();
    let Some(inner) = color
        .strip_prefix("var(")
        .and_then(|rest| rest.strip_suffix(')'))
    else {
        return color.to_string();
    };

    let (name, fallback) = match inner.split_once(',') {
        Some((name, fallback)) => (name.trim(), Some(fallback.trim())),
        None => (inner.trim(), None),
    };

    if let Some(value) = doc
        .computed_root_property(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
    {
        return value;
    }

    match fallback.filter(|fallback| !fallback.is_empty()) {
        Some(fallback) => resolve_color(doc, fallback),
        None => {
            log::debug!("[STYLE] {} is unset, using {}", name, DEFAULT_COLOR);
            DEFAULT_COLOR.to_string()
        },
    }
}

/// Remove the stylesheet and every cursor property from `doc`.
pub fn remove_cursor_styles<D: AuraDocument + ?Sized>(doc: &D) -> AuraResult<()> {
    if doc.find_style(STYLE_ID).is_some() {
        log::debug!("[STYLE] Removing cursor stylesheet");
        doc.remove_element(STYLE_ID)?;
    }
    remove_cursor_variables(doc)
}

/// Remove every cursor property, keeping the stylesheet.
pub fn remove_cursor_variables<D: AuraDocument + ?Sized>(doc: &D) -> AuraResult<()> {
    for var in all_variables() {
        doc.remove_root_property(var.prop)?;
    }
    Ok(())
}

/// Soft hide: disable the stylesheet via `media` and clear the properties.
pub fn hide_cursor_styles<D: AuraDocument + ?Sized>(doc: &D) -> AuraResult<()> {
    if doc.find_style(STYLE_ID).is_some() {
        doc.set_style_media(STYLE_ID, Some(HIDDEN_MEDIA))?;
    }
    remove_cursor_variables(doc)
}

/// Re-enable a soft-hidden stylesheet. Variables must be set again by the caller.
pub fn show_cursor_styles<D: AuraDocument + ?Sized>(doc: &D) -> AuraResult<()> {
    match doc.find_style(STYLE_ID) {
        Some(style) if style.media.is_some() => doc.set_style_media(STYLE_ID, None),
        _ => Ok(()),
    }
}
