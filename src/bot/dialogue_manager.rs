//! Dialogue manager module for session mode transitions
//!
//! The decision of how an incoming message or callback token moves a
//! session between modes lives here, separate from the handlers that do
//! Telegram and storage I/O, so the transitions can be tested on their own.

use crate::db::NoteKind;
use crate::dialogue::NoteDialogueState;

use super::ui_builder::{parse_delete_token, CALLBACK_ADD, CALLBACK_SEARCH};

/// Payload of an incoming message, as far as the flows care.
#[derive(Debug, Clone, PartialEq)]
pub enum MessagePayload {
    /// Literal message text
    Text(String),
    /// A media attachment, reduced to its kind and file reference
    Media(NoteKind, String),
    /// Anything the bot cannot store (contact cards, locations, ...)
    Unsupported,
}

/// What the router decided to do with a message.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowStep {
    /// Store the payload as a note and confirm.
    SaveNote(NoteKind, String),
    /// Run a text search for the keyword.
    Search(String),
    /// Reply that the payload cannot be stored; keep waiting for content.
    RejectContent,
    /// Reply that search needs text; keep waiting for a keyword.
    RejectKeyword,
    /// No flow in progress; show the main menu.
    ShowMenu,
}

impl FlowStep {
    /// A completed flow ends with the main menu being re-rendered.
    pub fn completes_flow(&self) -> bool {
        matches!(self, FlowStep::SaveNote(..) | FlowStep::Search(..))
    }
}

/// Decide the next session mode and the step to carry out for a message
/// arriving in `state`. Completing a flow always returns the mode to
/// `Idle`; a rejected payload leaves the flow where it was.
pub fn next_step(
    state: &NoteDialogueState,
    payload: MessagePayload,
) -> (NoteDialogueState, FlowStep) {
    match (state, payload) {
        (NoteDialogueState::AwaitingContent, MessagePayload::Text(text)) => {
            (NoteDialogueState::Idle, FlowStep::SaveNote(NoteKind::Text, text))
        }
        (NoteDialogueState::AwaitingContent, MessagePayload::Media(kind, file_ref)) => {
            (NoteDialogueState::Idle, FlowStep::SaveNote(kind, file_ref))
        }
        (NoteDialogueState::AwaitingContent, MessagePayload::Unsupported) => {
            (NoteDialogueState::AwaitingContent, FlowStep::RejectContent)
        }
        (NoteDialogueState::AwaitingKeyword, MessagePayload::Text(keyword)) => {
            (NoteDialogueState::Idle, FlowStep::Search(keyword))
        }
        (NoteDialogueState::AwaitingKeyword, _) => {
            (NoteDialogueState::AwaitingKeyword, FlowStep::RejectKeyword)
        }
        (NoteDialogueState::Idle, _) => (NoteDialogueState::Idle, FlowStep::ShowMenu),
    }
}

/// Action encoded in a callback token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CallbackAction {
    /// Prompt for content; the session starts waiting for it.
    BeginAdd,
    /// Prompt for a keyword; the session starts waiting for it.
    BeginSearch,
    /// Delete the targeted note; the session returns to idle.
    Delete(i64),
    /// Not a token this bot ever issued.
    Ignore,
}

impl CallbackAction {
    /// Session mode once the action has been carried out; `None` leaves
    /// the current mode untouched.
    pub fn next_state(self) -> Option<NoteDialogueState> {
        match self {
            CallbackAction::BeginAdd => Some(NoteDialogueState::AwaitingContent),
            CallbackAction::BeginSearch => Some(NoteDialogueState::AwaitingKeyword),
            CallbackAction::Delete(_) => Some(NoteDialogueState::Idle),
            CallbackAction::Ignore => None,
        }
    }
}

/// Route a callback token to the action it encodes.
pub fn route_callback(data: &str) -> CallbackAction {
    if data == CALLBACK_ADD {
        CallbackAction::BeginAdd
    } else if data == CALLBACK_SEARCH {
        CallbackAction::BeginSearch
    } else if let Some(note_id) = parse_delete_token(data) {
        CallbackAction::Delete(note_id)
    } else {
        CallbackAction::Ignore
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_flow_text_resets_to_idle() {
        let (next, step) = next_step(
            &NoteDialogueState::AwaitingContent,
            MessagePayload::Text("buy milk".to_string()),
        );

        assert_eq!(next, NoteDialogueState::Idle);
        assert_eq!(step, FlowStep::SaveNote(NoteKind::Text, "buy milk".to_string()));
    }

    #[test]
    fn test_add_flow_media_resets_to_idle() {
        let (next, step) = next_step(
            &NoteDialogueState::AwaitingContent,
            MessagePayload::Media(NoteKind::Photo, "ABC123".to_string()),
        );

        assert_eq!(next, NoteDialogueState::Idle);
        assert_eq!(step, FlowStep::SaveNote(NoteKind::Photo, "ABC123".to_string()));
    }

    #[test]
    fn test_unsupported_content_keeps_waiting_and_stores_nothing() {
        let (next, step) = next_step(
            &NoteDialogueState::AwaitingContent,
            MessagePayload::Unsupported,
        );

        assert_eq!(next, NoteDialogueState::AwaitingContent);
        assert_eq!(step, FlowStep::RejectContent);
    }

    #[test]
    fn test_search_flow_resets_to_idle() {
        let (next, step) = next_step(
            &NoteDialogueState::AwaitingKeyword,
            MessagePayload::Text("milk".to_string()),
        );

        assert_eq!(next, NoteDialogueState::Idle);
        assert_eq!(step, FlowStep::Search("milk".to_string()));
    }

    #[test]
    fn test_non_text_keyword_keeps_waiting() {
        for payload in [
            MessagePayload::Media(NoteKind::Video, "file-ref".to_string()),
            MessagePayload::Unsupported,
        ] {
            let (next, step) = next_step(&NoteDialogueState::AwaitingKeyword, payload);

            assert_eq!(next, NoteDialogueState::AwaitingKeyword);
            assert_eq!(step, FlowStep::RejectKeyword);
        }
    }

    #[test]
    fn test_idle_message_shows_menu() {
        let (next, step) = next_step(
            &NoteDialogueState::Idle,
            MessagePayload::Text("stray text".to_string()),
        );

        assert_eq!(next, NoteDialogueState::Idle);
        assert_eq!(step, FlowStep::ShowMenu);
    }

    #[test]
    fn test_completes_flow_only_for_save_and_search() {
        assert!(FlowStep::SaveNote(NoteKind::Text, "x".to_string()).completes_flow());
        assert!(FlowStep::Search("x".to_string()).completes_flow());
        assert!(!FlowStep::RejectContent.completes_flow());
        assert!(!FlowStep::RejectKeyword.completes_flow());
        assert!(!FlowStep::ShowMenu.completes_flow());
    }

    #[test]
    fn test_route_callback_tokens() {
        assert_eq!(route_callback("add"), CallbackAction::BeginAdd);
        assert_eq!(route_callback("search"), CallbackAction::BeginSearch);
        assert_eq!(route_callback("delete_42"), CallbackAction::Delete(42));
        assert_eq!(route_callback("delete_abc"), CallbackAction::Ignore);
        assert_eq!(route_callback(""), CallbackAction::Ignore);
    }

    #[test]
    fn test_callback_actions_set_the_expected_mode() {
        assert_eq!(
            CallbackAction::BeginAdd.next_state(),
            Some(NoteDialogueState::AwaitingContent)
        );
        assert_eq!(
            CallbackAction::BeginSearch.next_state(),
            Some(NoteDialogueState::AwaitingKeyword)
        );
        // Deletion always lands the session back in idle.
        assert_eq!(
            CallbackAction::Delete(7).next_state(),
            Some(NoteDialogueState::Idle)
        );
        assert_eq!(CallbackAction::Ignore.next_state(), None);
    }
}
