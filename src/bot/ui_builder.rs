//! UI Builder module for creating keyboards and callback tokens

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

// Import localization
use crate::localization::t;

// Import store types
use crate::db::Note;

/// Callback token for the "add a note" menu option
pub const CALLBACK_ADD: &str = "add";
/// Callback token for the "search notes" menu option
pub const CALLBACK_SEARCH: &str = "search";

const DELETE_TOKEN_PREFIX: &str = "delete_";

/// Maximum number of characters shown on a delete button label
pub const LABEL_MAX_CHARS: usize = 30;

/// Create the two-option main menu keyboard
pub fn main_menu_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback(t("menu-add"), CALLBACK_ADD)],
        vec![InlineKeyboardButton::callback(
            t("menu-search"),
            CALLBACK_SEARCH,
        )],
    ])
}

/// Create the delete-candidate keyboard, one row per matching note. The
/// note id is embedded in the callback token so the handler can parse the
/// target back out.
pub fn delete_results_keyboard(notes: &[Note]) -> InlineKeyboardMarkup {
    let rows = notes
        .iter()
        .map(|note| {
            vec![InlineKeyboardButton::callback(
                note_label(&note.content),
                delete_token(note.id),
            )]
        })
        .collect::<Vec<_>>();

    InlineKeyboardMarkup::new(rows)
}

/// Button label: the first 30 characters of the content, or all of it if
/// shorter. Counted in characters, not bytes, so multibyte text never
/// splits mid-codepoint.
pub fn note_label(content: &str) -> String {
    match content.char_indices().nth(LABEL_MAX_CHARS) {
        Some((byte_idx, _)) => content[..byte_idx].to_string(),
        None => content.to_string(),
    }
}

/// Build the callback token targeting one note for deletion
pub fn delete_token(note_id: i64) -> String {
    format!("{DELETE_TOKEN_PREFIX}{note_id}")
}

/// Parse a delete callback token back into the note id it targets.
/// Returns None for anything that is not a well-formed delete token.
pub fn parse_delete_token(data: &str) -> Option<i64> {
    data.strip_prefix(DELETE_TOKEN_PREFIX)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::NoteKind;
    use teloxide::types::InlineKeyboardButtonKind;

    fn callback_data(button: &InlineKeyboardButton) -> &str {
        match &button.kind {
            InlineKeyboardButtonKind::CallbackData(data) => data,
            other => panic!("expected a callback button, got {other:?}"),
        }
    }

    #[test]
    fn test_main_menu_has_add_and_search() {
        let keyboard = main_menu_keyboard();
        let rows = &keyboard.inline_keyboard;

        assert_eq!(rows.len(), 2);
        assert_eq!(callback_data(&rows[0][0]), CALLBACK_ADD);
        assert_eq!(callback_data(&rows[1][0]), CALLBACK_SEARCH);
    }

    #[test]
    fn test_delete_keyboard_one_row_per_note() {
        let notes = vec![
            Note {
                id: 1,
                kind: NoteKind::Text,
                content: "buy milk".to_string(),
            },
            Note {
                id: 42,
                kind: NoteKind::Text,
                content: "call the plumber".to_string(),
            },
        ];

        let keyboard = delete_results_keyboard(&notes);
        let rows = &keyboard.inline_keyboard;

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0].text, "buy milk");
        assert_eq!(callback_data(&rows[0][0]), "delete_1");
        assert_eq!(rows[1][0].text, "call the plumber");
        assert_eq!(callback_data(&rows[1][0]), "delete_42");
    }

    #[test]
    fn test_note_label_short_content_untouched() {
        assert_eq!(note_label("buy milk"), "buy milk");
    }

    #[test]
    fn test_note_label_exactly_thirty_chars() {
        let content = "a".repeat(30);
        assert_eq!(note_label(&content), content);
    }

    #[test]
    fn test_note_label_truncates_to_thirty_chars() {
        let content = "x".repeat(45);
        let label = note_label(&content);
        assert_eq!(label.chars().count(), 30);
        assert_eq!(label, "x".repeat(30));
    }

    #[test]
    fn test_note_label_counts_characters_not_bytes() {
        let content = "ж".repeat(35);
        let label = note_label(&content);
        assert_eq!(label.chars().count(), 30);
        assert_eq!(label, "ж".repeat(30));
    }

    #[test]
    fn test_delete_token_round_trip() {
        for id in [0, 1, 42, 1_000_000, i64::MAX] {
            assert_eq!(parse_delete_token(&delete_token(id)), Some(id));
        }
    }

    #[test]
    fn test_parse_delete_token_rejects_malformed() {
        assert_eq!(parse_delete_token("add"), None);
        assert_eq!(parse_delete_token("search"), None);
        assert_eq!(parse_delete_token("delete_"), None);
        assert_eq!(parse_delete_token("delete_abc"), None);
        assert_eq!(parse_delete_token("remove_5"), None);
    }
}
