//! Cursor generation.
//!
//! - `kind`: the five themed cursor kinds and their hotspots
//! - `svg`: SVG templating and data URI encoding
//! - `cache`: per-color cursor sets and the cache that memoizes them

pub mod cache;
pub mod kind;
pub mod svg;

pub use cache::{
    clear_cursor_cache, cursor_css, generate_themed_cursors, CursorCache, CursorImage,
    ThemedCursorSet,
};
pub use kind::{CursorKind, CURSOR_SIZE};
pub use svg::{
    from_data_uri, generate_cursor_svg, is_embeddable_color, render_svg, to_data_uri,
    ShadowProfile, NORMAL_SHADOW, PRESSED_SHADOW,
};
