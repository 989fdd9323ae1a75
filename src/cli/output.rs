use serde::Serialize;

use crate::model::{Record, RecordCounts};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct RecordJson {
    pub id: String,
    pub text: String,
    pub completed: bool,
    pub created_at: String,
}

#[derive(Serialize)]
pub struct ListJson {
    pub filter: String,
    pub shown: usize,
    pub total: usize,
    pub todos: Vec<RecordJson>,
}

pub fn record_to_json(record: &Record) -> RecordJson {
    RecordJson {
        id: record.id.to_string(),
        text: record.text.clone(),
        completed: record.completed,
        created_at: record.created_at.to_rfc3339(),
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// Characters of the id shown in text output
pub const SHORT_ID_LEN: usize = 8;

pub fn short_id(record: &Record) -> &str {
    let id = record.id.as_str();
    id.get(..SHORT_ID_LEN).unwrap_or(id)
}

/// `[x] 1a2b3c4d  buy milk`
pub fn format_record_line(record: &Record) -> String {
    let check = if record.completed { "[x]" } else { "[ ]" };
    format!("{} {}  {}", check, short_id(record), record.text)
}

pub fn format_counter(shown: usize, counts: &RecordCounts) -> String {
    format!("{} of {} todos", shown, counts.total)
}
