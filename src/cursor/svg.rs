//! SVG cursor templating.
//!
//! Each cursor is the glyph drawn twice: once offset, tinted with the
//! shadow color and blurred, then once on top in black with a white outline.
//! The pressed variant pulls the shadow in closer to the glyph.

use base64::{engine::general_purpose::STANDARD, Engine};

use super::kind::{CursorKind, CURSOR_SIZE};

const DATA_URI_PREFIX: &str = "data:image/svg+xml;base64,";

/// Drop shadow geometry for one variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowProfile {
    pub offset_x: f32,
    pub offset_y: f32,
    /// `feGaussianBlur` standard deviation.
    pub blur: f32,
    pub opacity: f32,
}

/// Resting cursor, hovering above the page.
pub const NORMAL_SHADOW: ShadowProfile = ShadowProfile {
    offset_x: 1.0,
    offset_y: 2.0,
    blur: 1.5,
    opacity: 0.9,
};

/// Mouse button held: shadow tucked in, as if pressed onto the surface.
pub const PRESSED_SHADOW: ShadowProfile = ShadowProfile {
    offset_x: 0.5,
    offset_y: 1.0,
    blur: 0.75,
    opacity: 0.9,
};

impl ShadowProfile {
    pub fn for_pressed(pressed: bool) -> Self {
        if pressed {
            PRESSED_SHADOW
        } else {
            NORMAL_SHADOW
        }
    }
}

/// Whether `color` can be spliced into an SVG attribute as-is.
///
/// Covers hex, functional (`rgb()`, `hsl()`, `oklch()`...) and named colors.
/// Variable references are rejected: they must be resolved first.
pub fn is_embeddable_color(color: &str) -> bool {
    let color = color.trim();
    !color.is_empty()
        && !color.starts_with("var(")
        && color
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "#(),.%+-/ ".contains(c))
}

/// Raw SVG markup for a resting cursor of `kind` with a `color` shadow.
pub fn generate_cursor_svg(color: &str, kind: CursorKind) -> String {
    render_svg(color, kind, ShadowProfile::for_pressed(false))
}

/// Raw SVG markup for `kind` using an explicit shadow profile.
pub fn render_svg(color: &str, kind: CursorKind, shadow: ShadowProfile) -> String {
    let path = kind.path();
    format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}">"#,
            r#"<defs><filter id="aura-shadow" x="-50%" y="-50%" width="200%" height="200%">"#,
            r#"<feGaussianBlur stdDeviation="{blur}"/></filter></defs>"#,
            r#"<path d="{path}" transform="translate({dx} {dy})" fill="{color}" fill-opacity="{opacity}" filter="url(#aura-shadow)"/>"#,
            r##"<path d="{path}" fill="#000" stroke="#fff" stroke-width="1.5" stroke-linejoin="round"/>"##,
            "</svg>"
        ),
        size = CURSOR_SIZE,
        blur = shadow.blur,
        path = path,
        dx = shadow.offset_x,
        dy = shadow.offset_y,
        color = color.trim(),
        opacity = shadow.opacity,
    )
}

/// Encode SVG markup as a base64 `data:` URI.
pub fn to_data_uri(svg: &str) -> String {
    let mut uri = String::with_capacity(DATA_URI_PREFIX.len() + svg.len() * 4 / 3 + 4);
    uri.push_str(DATA_URI_PREFIX);
    STANDARD.encode_string(svg.as_bytes(), &mut uri);
    uri
}

/// Decode a URI produced by [`to_data_uri`] back into markup.
pub fn from_data_uri(uri: &str) -> Option<String> {
    let payload = uri.strip_prefix(DATA_URI_PREFIX)?;
    let bytes = STANDARD.decode(payload).ok()?;
    String::from_utf8(bytes).ok()
}
