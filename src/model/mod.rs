//! Editor-side data model
//!
//! The event layer never owns document state. It only needs opaque keys for
//! editors and nodes, a snapshot of the engine's selection, and a handful of
//! node queries, all defined here.

pub mod editor;
pub mod selection;

pub use editor::{EditingEngine, Editor};
pub use selection::{Point, PointType, RangeSelection};

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique key of one editor instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EditorKey(Uuid);

impl EditorKey {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EditorKey {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EditorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Key of a node in the engine's document tree.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeKey(pub String);

impl From<&str> for NodeKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Text format bitset carried by text nodes and selections.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextFormat(pub u32);

impl TextFormat {
    pub const NONE: TextFormat = TextFormat(0);
    pub const BOLD: TextFormat = TextFormat(1);
    pub const ITALIC: TextFormat = TextFormat(1 << 1);
    pub const STRIKETHROUGH: TextFormat = TextFormat(1 << 2);
    pub const UNDERLINE: TextFormat = TextFormat(1 << 3);
    pub const CODE: TextFormat = TextFormat(1 << 4);

    pub fn contains(self, other: TextFormat) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for TextFormat {
    type Output = TextFormat;

    fn bitor(self, rhs: TextFormat) -> TextFormat {
        TextFormat(self.0 | rhs.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Root,
    Element,
    Text,
}

/// What the event layer needs to know about a single node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeInfo {
    pub kind: NodeKind,
    pub format: TextFormat,
    /// Immutable or inert atomic content that must not be removed implicitly.
    pub atomic: bool,
}

impl NodeInfo {
    pub fn root() -> Self {
        Self {
            kind: NodeKind::Root,
            format: TextFormat::NONE,
            atomic: false,
        }
    }

    pub fn element() -> Self {
        Self {
            kind: NodeKind::Element,
            format: TextFormat::NONE,
            atomic: false,
        }
    }

    pub fn text(format: TextFormat) -> Self {
        Self {
            kind: NodeKind::Text,
            format,
            atomic: false,
        }
    }

    pub fn atomic_text() -> Self {
        Self {
            kind: NodeKind::Text,
            format: TextFormat::NONE,
            atomic: true,
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self.kind, NodeKind::Element | NodeKind::Root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bits() {
        let format = TextFormat::BOLD | TextFormat::UNDERLINE;
        assert!(format.contains(TextFormat::BOLD));
        assert!(format.contains(TextFormat::UNDERLINE));
        assert!(!format.contains(TextFormat::ITALIC));
        assert!(!format.is_empty());
        assert!(TextFormat::default().is_empty());
    }

    #[test]
    fn test_editor_keys_are_unique() {
        assert_ne!(EditorKey::new(), EditorKey::new());
    }
}
