//! Actor Message Definitions
//!
//! ```text
//! FsActor / stdin --Editor--> SessionActor
//! ```

use crate::session::EditorEvent;

/// Messages to the Session Actor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionMsg {
    /// Editor or location activity
    Editor(EditorEvent),
    /// Stop the event loop
    Shutdown,
}

impl From<EditorEvent> for SessionMsg {
    fn from(event: EditorEvent) -> Self {
        Self::Editor(event)
    }
}
