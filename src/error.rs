//! Error types for the event layer
//!
//! The event path itself is permissive and never fails; these errors only
//! come from the embedding-application surface (`attach`) and from the
//! JavaScript API boundary.

use thiserror::Error;

use crate::host::SurfaceId;
use crate::model::EditorKey;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventsError {
    /// The editor is still bound to another live surface.
    #[error("editor {editor} is already attached to surface {surface}")]
    EditorAlreadyAttached { editor: EditorKey, surface: SurfaceId },

    /// A value handed over from JavaScript could not be read.
    #[error("invalid descriptor: {0}")]
    InvalidDescriptor(String),
}

pub type Result<T> = std::result::Result<T, EventsError>;
