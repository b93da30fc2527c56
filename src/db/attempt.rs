use crate::quiz::score_percentage;
use rusqlite::{Connection, OptionalExtension, Result, Row};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptSummary {
    pub id: u64,
    pub filter_label: String,
    pub correct: usize,
    pub total: usize,
    pub percentage: u32,
    pub completed_at: u64,
}

fn from_row(row: &Row<'_>) -> Result<AttemptSummary> {
    Ok(AttemptSummary {
        id: row.get(0)?,
        filter_label: row.get(1)?,
        correct: row.get(2)?,
        total: row.get(3)?,
        percentage: row.get(4)?,
        completed_at: row.get(5)?,
    })
}

pub fn record_attempt(
    conn: &Connection,
    filter_label: &str,
    correct: usize,
    total: usize,
) -> Result<u64> {
    conn.execute(
        "INSERT INTO quiz_attempts (filter_label, correct, total, percentage, completed_at)
         VALUES (?, ?, ?, ?, ?)",
        rusqlite::params![
            filter_label,
            correct,
            total,
            score_percentage(correct, total),
            super::now()
        ],
    )?;
    Ok(conn.last_insert_rowid() as u64)
}

/// Highest percentage; the most recent attempt wins a tie.
pub fn best_attempt(conn: &Connection) -> Result<Option<AttemptSummary>> {
    conn.query_row(
        "SELECT id, filter_label, correct, total, percentage, completed_at
         FROM quiz_attempts ORDER BY percentage DESC, completed_at DESC, id DESC LIMIT 1",
        [],
        from_row,
    )
    .optional()
}

pub fn recent_attempts(conn: &Connection, limit: usize) -> Result<Vec<AttemptSummary>> {
    let mut stmt = conn.prepare(
        "SELECT id, filter_label, correct, total, percentage, completed_at
         FROM quiz_attempts ORDER BY completed_at DESC, id DESC LIMIT ?",
    )?;

    let attempts = stmt
        .query_map([limit], from_row)?
        .filter_map(|r| r.ok())
        .collect();

    Ok(attempts)
}
