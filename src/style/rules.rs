//! Static stylesheet and the custom properties it reads.
//!
//! The rules never carry cursor images themselves; they map element
//! categories to `--cursor-*` properties that the applier fills in.

use crate::cursor::CursorKind;

/// Id of the single `<style>` element Aura injects per document.
pub const STYLE_ID: &str = "aura-cursor-styles";

/// Cascade layer wrapping every rule. Unlayered consumer styles beat it.
pub const LAYER_NAME: &str = "cursor-aura";

/// A custom property on the root element and the cursor it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorVariable {
    pub prop: &'static str,
    pub kind: CursorKind,
    pub fallback: &'static str,
}

pub const CURSOR_VARIABLES: [CursorVariable; 5] = [
    CursorVariable {
        prop: "--cursor-default",
        kind: CursorKind::Default,
        fallback: "auto",
    },
    CursorVariable {
        prop: "--cursor-pointer",
        kind: CursorKind::Pointer,
        fallback: "pointer",
    },
    CursorVariable {
        prop: "--cursor-grab",
        kind: CursorKind::Grab,
        fallback: "grab",
    },
    CursorVariable {
        prop: "--cursor-grabbing",
        kind: CursorKind::Grabbing,
        fallback: "grabbing",
    },
    CursorVariable {
        prop: "--cursor-text",
        kind: CursorKind::Text,
        fallback: "text",
    },
];

/// Pressed variants: same kinds, drawn with the tucked-in shadow.
pub const PRESSED_CURSOR_VARIABLES: [CursorVariable; 3] = [
    CursorVariable {
        prop: "--cursor-default-active",
        kind: CursorKind::Default,
        fallback: "auto",
    },
    CursorVariable {
        prop: "--cursor-pointer-active",
        kind: CursorKind::Pointer,
        fallback: "pointer",
    },
    CursorVariable {
        prop: "--cursor-text-active",
        kind: CursorKind::Text,
        fallback: "text",
    },
];

/// Every property Aura may set, resting then pressed.
pub fn all_variables() -> impl Iterator<Item = &'static CursorVariable> {
    CURSOR_VARIABLES.iter().chain(PRESSED_CURSOR_VARIABLES.iter())
}

const DEFAULT_SELECTORS: &[&str] = &["html", "body"];

const POINTER_SELECTORS: &[&str] = &[
    "a",
    "button",
    "[role=\"button\"]",
    "input[type=\"submit\"]",
    "input[type=\"button\"]",
    "input[type=\"reset\"]",
    "input[type=\"checkbox\"]",
    "input[type=\"radio\"]",
    "select",
    "summary",
    "[onclick]",
    "[tabindex]:not([tabindex=\"-1\"])",
];

const TEXT_SELECTORS: &[&str] = &[
    "input[type=\"text\"]",
    "input[type=\"email\"]",
    "input[type=\"password\"]",
    "input[type=\"search\"]",
    "input[type=\"tel\"]",
    "input[type=\"url\"]",
    "input[type=\"number\"]",
    "textarea",
    "[contenteditable=\"true\"]",
    "[data-cursor=\"text\"]",
];

const GRAB_SELECTORS: &[&str] = &["[draggable=\"true\"]", ".draggable"];

const GRABBING_SELECTORS: &[&str] = &[
    "[draggable=\"true\"]:active",
    ".draggable:active",
    "body.dragging",
];

fn rule(out: &mut String, selectors: &[&str], suffix: &str, value: &str) {
    let list = selectors
        .iter()
        .map(|selector| format!("{selector}{suffix}"))
        .collect::<Vec<_>>()
        .join(",\n  ");
    out.push_str(&format!("  {list} {{\n    cursor: {value};\n  }}\n"));
}

fn pressed_rule(out: &mut String, selectors: &[&str], pressed: &str, resting: &str) {
    rule(out, selectors, ":active", &format!("var({pressed}, var({resting}))"));
}

/// Stylesheet text, identical for every binding.
///
/// Each `:active` rule falls back to the resting property, so a binding
/// without pressed variants leaves the pressed cursor equal to the resting one.
pub fn cursor_rules() -> String {
    let mut css = format!("@layer {LAYER_NAME} {{\n");
    rule(&mut css, DEFAULT_SELECTORS, "", "var(--cursor-default)");
    rule(&mut css, POINTER_SELECTORS, "", "var(--cursor-pointer)");
    rule(&mut css, TEXT_SELECTORS, "", "var(--cursor-text)");
    pressed_rule(&mut css, DEFAULT_SELECTORS, "--cursor-default-active", "--cursor-default");
    pressed_rule(&mut css, POINTER_SELECTORS, "--cursor-pointer-active", "--cursor-pointer");
    pressed_rule(&mut css, TEXT_SELECTORS, "--cursor-text-active", "--cursor-text");
    // After the pressed rules so `body.dragging` beats `body:active`
    rule(&mut css, GRAB_SELECTORS, "", "var(--cursor-grab)");
    rule(&mut css, GRABBING_SELECTORS, "", "var(--cursor-grabbing)");
    css.push_str("}\n");
    css
}
