//! Themed cursor sets and their cache.
//!
//! All five kinds for one (color, pressed) pair are generated together and
//! stored behind an `Arc`, so repeated lookups hand back the same set.

use lazy_static::lazy_static;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

use super::kind::{CursorKind, CURSOR_SIZE};
use super::svg::{is_embeddable_color, render_svg, to_data_uri, ShadowProfile};
use crate::error::{AuraError, AuraResult};

/// One generated cursor image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorImage {
    /// `data:image/svg+xml;base64,...`
    pub data_uri: String,
    pub width: u32,
    pub height: u32,
    pub hotspot: (u32, u32),
}

/// Every cursor kind for one color and one pressed state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemedCursorSet {
    color: String,
    pressed: bool,
    images: [CursorImage; 5],
}

impl ThemedCursorSet {
    fn generate(color: &str, pressed: bool) -> Self {
        let shadow = ShadowProfile::for_pressed(pressed);
        let images = CursorKind::ALL.map(|kind| CursorImage {
            data_uri: to_data_uri(&render_svg(color, kind, shadow)),
            width: CURSOR_SIZE,
            height: CURSOR_SIZE,
            hotspot: kind.hotspot(),
        });
        Self {
            color: color.to_string(),
            pressed,
            images,
        }
    }

    pub fn get(&self, kind: CursorKind) -> &CursorImage {
        &self.images[kind as usize]
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn iter(&self) -> impl Iterator<Item = (CursorKind, &CursorImage)> {
        CursorKind::ALL.into_iter().zip(self.images.iter())
    }
}

/// CSS `cursor` value: the image with its hotspot, then the keyword fallback.
pub fn cursor_css(image: &CursorImage, kind: CursorKind, fallback: &str) -> String {
    let (x, y) = kind.hotspot();
    format!("url({}) {} {}, {}", image.data_uri, x, y, fallback)
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    color: String,
    pressed: bool,
}

/// Cache of generated cursor sets keyed by (color, pressed).
///
/// Unbounded: a page rarely uses more than a handful of shadow colors.
/// Owners clear it on teardown.
#[derive(Debug, Default)]
pub struct CursorCache {
    entries: Mutex<HashMap<CacheKey, Arc<ThemedCursorSet>>>,
}

impl CursorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cursor set for `color`, generating all kinds on a miss.
    ///
    /// Returns `None` when the color cannot be embedded in SVG; callers
    /// degrade to the keyword cursors.
    pub fn themed(&self, color: &str, pressed: bool) -> Option<Arc<ThemedCursorSet>> {
        match self.try_themed(color, pressed) {
            Ok(set) => Some(set),
            Err(e) => {
                log::warn!("[CURSOR] {}, using fallbacks", e);
                None
            },
        }
    }

    /// Like [`themed`](Self::themed), reporting why a color was refused.
    pub fn try_themed(&self, color: &str, pressed: bool) -> AuraResult<Arc<ThemedCursorSet>> {
        let color = color.trim();
        if !is_embeddable_color(color) {
            return Err(AuraError::InvalidColor(color.to_string()));
        }

        let key = CacheKey {
            color: color.to_string(),
            pressed,
        };
        let mut entries = self.entries.lock();
        if let Some(set) = entries.get(&key) {
            return Ok(Arc::clone(set));
        }

        log::debug!(
            "[CURSOR] Generating cursor set (color: {}, pressed: {})",
            color,
            pressed
        );
        let set = Arc::new(ThemedCursorSet::generate(color, pressed));
        entries.insert(key, Arc::clone(&set));
        Ok(set)
    }

    pub fn clear(&self) {
        let mut entries = self.entries.lock();
        if !entries.is_empty() {
            log::debug!("[CURSOR] Clearing {} cached cursor sets", entries.len());
        }
        entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

lazy_static! {
    /// Process-wide cache behind the free functions.
    static ref GLOBAL_CACHE: CursorCache = CursorCache::new();
}

/// Cursor set for `color` from the process-wide cache.
pub fn generate_themed_cursors(color: &str, pressed: bool) -> Option<Arc<ThemedCursorSet>> {
    GLOBAL_CACHE.themed(color, pressed)
}

/// Empty the process-wide cache.
pub fn clear_cursor_cache() {
    GLOBAL_CACHE.clear();
}
