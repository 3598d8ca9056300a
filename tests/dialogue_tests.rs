use anyhow::Result;

use notekeeper::dialogue::NoteDialogueState;

/// A fresh session starts idle.
#[test]
fn test_default_state_is_idle() {
    assert!(matches!(NoteDialogueState::default(), NoteDialogueState::Idle));
}

/// Dialogue states round-trip through serde.
#[tokio::test]
async fn test_dialogue_state_serialization() -> Result<()> {
    for state in [
        NoteDialogueState::Idle,
        NoteDialogueState::AwaitingContent,
        NoteDialogueState::AwaitingKeyword,
    ] {
        let json = serde_json::to_string(&state)?;
        let restored: NoteDialogueState = serde_json::from_str(&json)?;
        assert_eq!(state, restored);
    }

    Ok(())
}

/// The three modes are mutually exclusive.
#[test]
fn test_states_are_distinct() {
    let adding = NoteDialogueState::AwaitingContent;
    let searching = NoteDialogueState::AwaitingKeyword;

    assert!(!matches!(adding, NoteDialogueState::Idle));
    assert!(!matches!(searching, NoteDialogueState::Idle));
    assert!(!matches!(adding, NoteDialogueState::AwaitingKeyword));
}
