//! Cursor kinds and their fixed glyph geometry.
//!
//! Every glyph is drawn on the same 32x32 canvas so the hotspots can be
//! expressed in CSS pixels directly.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Width and height of every cursor canvas, in CSS pixels.
pub const CURSOR_SIZE: u32 = 32;

/// Semantic pointer states that get a themed cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CursorKind {
    /// Arrow over plain content
    Default,
    /// Hand over clickable elements
    Pointer,
    /// Open hand over draggable elements
    Grab,
    /// Closed hand while dragging
    Grabbing,
    /// I-beam over editable or selectable text
    Text,
}

impl CursorKind {
    pub const ALL: [CursorKind; 5] = [
        CursorKind::Default,
        CursorKind::Pointer,
        CursorKind::Grab,
        CursorKind::Grabbing,
        CursorKind::Text,
    ];

    /// Name as used in CSS and in the custom property names.
    pub fn as_str(&self) -> &'static str {
        match self {
            CursorKind::Default => "default",
            CursorKind::Pointer => "pointer",
            CursorKind::Grab => "grab",
            CursorKind::Grabbing => "grabbing",
            CursorKind::Text => "text",
        }
    }

    /// Pixel the platform treats as the pointer location.
    ///
    /// Arrow tip and fingertip for default/pointer, canvas center otherwise.
    pub fn hotspot(&self) -> (u32, u32) {
        match self {
            CursorKind::Default => (5, 3),
            CursorKind::Pointer => (12, 4),
            CursorKind::Grab | CursorKind::Grabbing | CursorKind::Text => (16, 16),
        }
    }

    /// Keyword cursor shown when the image cannot be used.
    pub fn fallback(&self) -> &'static str {
        match self {
            CursorKind::Default => "auto",
            other => other.as_str(),
        }
    }

    /// Outline path of the glyph in the 32x32 canvas.
    pub(crate) fn path(&self) -> &'static str {
        match self {
            CursorKind::Default => ARROW_PATH,
            CursorKind::Pointer => HAND_PATH,
            CursorKind::Grab => OPEN_HAND_PATH,
            CursorKind::Grabbing => FIST_PATH,
            CursorKind::Text => IBEAM_PATH,
        }
    }
}

impl fmt::Display for CursorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CursorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CursorKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("Unknown cursor kind: {s}"))
    }
}

const ARROW_PATH: &str = "M5 3L5 22.5L9.9 17.9L13.3 25.6L16.6 24.2L13.3 16.7L19.8 16.7Z";

const HAND_PATH: &str = "M10.5 4.5a1.5 1.5 0 0 1 3 0V12.5V10.5a1.5 1.5 0 0 1 3 0V13V11.5a1.5 1.5 0 0 1 3 0V13.5V12.5a1.5 1.5 0 0 1 3 0V20C22.5 24.4 19.4 27.5 15.5 27.5H14.9C12.8 27.5 11.1 26.5 10 24.8L6.6 19.6a1.5 1.5 0 0 1 2.4 -1.8L10.5 19.8Z";

const OPEN_HAND_PATH: &str = "M9.5 16V11.5a1.5 1.5 0 0 1 3 0V15V9a1.5 1.5 0 0 1 3 0V15V8.5a1.5 1.5 0 0 1 3 0V15V10a1.5 1.5 0 0 1 3 0V19.5C21.5 23.1 18.6 26 15 26C12.4 26 10.5 24.8 9.4 22.7L7.3 18.6a1.4 1.4 0 0 1 2.2 -1.7Z";

const FIST_PATH: &str = "M9.5 14a1.5 1.5 0 0 1 3 0a1.5 1.5 0 0 1 3 0a1.5 1.5 0 0 1 3 0a1.5 1.5 0 0 1 3 0V19.5C21.5 23.1 18.6 26 15 26C12.4 26 10.5 24.8 9.4 22.7L8 19.5C7.6 18.5 8.2 17.5 9.5 17.5Z";

const IBEAM_PATH: &str = "M12 5H14.5C15.3 5 16 5.5 16 6C16 5.5 16.7 5 17.5 5H20V7H18C17.4 7 17 7.4 17 8V24C17 24.6 17.4 25 18 25H20V27H17.5C16.7 27 16 26.5 16 26C16 26.5 15.3 27 14.5 27H12V25H14C14.6 25 15 24.6 15 24V8C15 7.4 14.6 7 14 7H12Z";
