use anyhow::{ensure, Context, Result};
use log::info;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ValueRef};
use rusqlite::{params, Connection};

/// Kind of content a note holds. Non-text kinds store a Telegram file
/// reference instead of the literal content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteKind {
    Text,
    Photo,
    Video,
    Document,
}

impl NoteKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NoteKind::Text => "text",
            NoteKind::Photo => "photo",
            NoteKind::Video => "video",
            NoteKind::Document => "document",
        }
    }

    pub fn parse(value: &str) -> Option<NoteKind> {
        match value {
            "text" => Some(NoteKind::Text),
            "photo" => Some(NoteKind::Photo),
            "video" => Some(NoteKind::Video),
            "document" => Some(NoteKind::Document),
            _ => None,
        }
    }
}

impl FromSql for NoteKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let raw = value.as_str()?;
        NoteKind::parse(raw).ok_or(FromSqlError::InvalidType)
    }
}

/// Represents a stored note
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub id: i64,
    pub kind: NoteKind,
    pub content: String,
}

/// Initialize the database schema
pub fn init_database_schema(conn: &Connection) -> Result<()> {
    info!("Initializing database schema...");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS notes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            type TEXT NOT NULL,
            content TEXT NOT NULL
        )",
        [],
    )
    .context("Failed to create notes table")?;

    info!("Database schema initialized successfully");
    Ok(())
}

/// Insert a new note and return its freshly assigned id.
pub fn add_note(conn: &Connection, kind: NoteKind, content: &str) -> Result<i64> {
    ensure!(!content.is_empty(), "note content must not be empty");

    conn.execute(
        "INSERT INTO notes (type, content) VALUES (?1, ?2)",
        params![kind.as_str(), content],
    )
    .context("Failed to insert new note")?;

    let note_id = conn.last_insert_rowid();
    info!("Note created with ID: {} ({})", note_id, kind.as_str());

    Ok(note_id)
}

/// Read a note by ID
pub fn read_note(conn: &Connection, note_id: i64) -> Result<Option<Note>> {
    let mut stmt = conn
        .prepare("SELECT id, type, content FROM notes WHERE id = ?1")
        .context("Failed to prepare read statement")?;

    let note = stmt.query_row(params![note_id], |row| {
        Ok(Note {
            id: row.get(0)?,
            kind: row.get(1)?,
            content: row.get(2)?,
        })
    });

    match note {
        Ok(note) => Ok(Some(note)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e).context("Failed to read note"),
    }
}

/// Find all text notes whose content contains `keyword` as a substring.
/// Results keep the store's insertion order; other note kinds never match.
pub fn search_text_notes(conn: &Connection, keyword: &str) -> Result<Vec<Note>> {
    let pattern = format!("%{keyword}%");

    let mut stmt = conn
        .prepare("SELECT id, type, content FROM notes WHERE type = 'text' AND content LIKE ?1")
        .context("Failed to prepare search statement")?;

    let notes = stmt
        .query_map(params![pattern], |row| {
            Ok(Note {
                id: row.get(0)?,
                kind: row.get(1)?,
                content: row.get(2)?,
            })
        })
        .context("Failed to run search query")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to read search results")?;

    info!("Search for {:?} matched {} note(s)", keyword, notes.len());
    Ok(notes)
}

/// Delete a note by ID. Returns false if no note had that id; a missing
/// note is not an error.
pub fn delete_note(conn: &Connection, note_id: i64) -> Result<bool> {
    let rows_affected = conn
        .execute("DELETE FROM notes WHERE id = ?1", params![note_id])
        .context("Failed to delete note")?;

    if rows_affected > 0 {
        info!("Note deleted with ID: {}", note_id);
        Ok(true)
    } else {
        info!("No note found with ID: {}", note_id);
        Ok(false)
    }
}
