//! Note dialogue module for tracking where a user is in the add/search flow.

use serde::{Deserialize, Serialize};
use teloxide::dispatching::dialogue::{Dialogue, InMemStorage};

/// Per-chat conversation state. Held in memory only; a restart drops every
/// session back to `Idle`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoteDialogueState {
    #[default]
    Idle,
    /// The user picked "add" and the next message becomes a note.
    AwaitingContent,
    /// The user picked "search" and the next text message is the keyword.
    AwaitingKeyword,
}

/// Type alias for our note dialogue
pub type NoteDialogue = Dialogue<NoteDialogueState, InMemStorage<NoteDialogueState>>;
