//! Aura: themed cursors with an adjustable shadow color.
//!
//! Generates SVG cursors (default, pointer, grab, grabbing, text) whose drop
//! shadow takes any CSS color, and keeps them applied to a document through
//! CSS custom properties and one injected stylesheet.
//!
//! ## Modules
//! - `cursor`: SVG generation, data URIs and the per-color cache
//! - `style`: stylesheet injection and the root cursor properties
//! - `binding`: component and imperative adapters around the theme observer
//! - `dom`: the document/window traits plus a headless implementation
//! - `config`: adapter configuration
//! - `error`: error types

pub mod binding;
pub mod config;
pub mod cursor;
pub mod dom;
pub mod error;
pub mod style;

pub use binding::{Aura, AuraVanilla, BindingState, InitOptions};
pub use config::AuraConfig;
pub use cursor::{
    clear_cursor_cache, cursor_css, generate_cursor_svg, generate_themed_cursors, to_data_uri,
    CursorCache, CursorImage, CursorKind, ThemedCursorSet,
};
pub use dom::{has_pointer_device, AuraDocument, AuraWindow, MemoryDocument, MemoryWindow};
pub use error::{AuraError, AuraResult};
pub use style::{
    hide_cursor_styles, inject_cursor_styles, remove_cursor_styles, remove_cursor_variables,
    resolve_color, set_cursor_variables, show_cursor_styles,
};
