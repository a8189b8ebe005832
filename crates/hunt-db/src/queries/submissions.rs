//! Submission-log query functions. The log is append-only.

use hunt_types::progress::{Submission, SubmissionKind, SubmissionStatus};
use hunt_types::{PoiId, SubmissionId, TeamId, Timestamp};
use rusqlite::{Connection, OptionalExtension};

use crate::queries::parse_enum;
use crate::{DbError, Result};

fn row_to_submission(row: &rusqlite::Row<'_>) -> rusqlite::Result<Submission> {
    Ok(Submission {
        id: row.get(0)?,
        team_id: row.get(1)?,
        poi_id: row.get(2)?,
        kind: parse_enum(3, row.get::<_, String>(3)?)?,
        content: row.get(4)?,
        status: parse_enum(5, row.get::<_, String>(5)?)?,
        created_at: row.get(6)?,
    })
}

const SUBMISSION_COLS: &str = "id, team_id, poi_id, kind, content, status, created_at";

/// Append an accepted proof record.
pub fn insert(
    conn: &Connection,
    team_id: TeamId,
    poi_id: PoiId,
    kind: SubmissionKind,
    content: &str,
    created_at: Timestamp,
) -> Result<SubmissionId> {
    conn.execute(
        "INSERT INTO submissions (team_id, poi_id, kind, content, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        rusqlite::params![
            team_id,
            poi_id,
            kind.as_str(),
            content,
            SubmissionStatus::Approved.as_str(),
            created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Fetch a submission by id.
pub fn get(conn: &Connection, id: SubmissionId) -> Result<Submission> {
    conn.query_row(
        &format!("SELECT {SUBMISSION_COLS} FROM submissions WHERE id = ?1"),
        [id],
        row_to_submission,
    )
    .optional()?
    .ok_or_else(|| DbError::NotFound(format!("submission {id}")))
}

/// Most recent photo submissions for the feed, newest first.
pub fn recent_photos(conn: &Connection, limit: u32) -> Result<Vec<Submission>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {SUBMISSION_COLS} FROM submissions
         WHERE kind = 'photo' ORDER BY created_at DESC, id DESC LIMIT ?1"
    ))?;
    let rows = stmt
        .query_map([limit], row_to_submission)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Number of submissions recorded for a (team, POI) pair. Audit/test hook.
pub fn count_for_pair(conn: &Connection, team_id: TeamId, poi_id: PoiId) -> Result<u32> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM submissions WHERE team_id = ?1 AND poi_id = ?2",
        rusqlite::params![team_id, poi_id],
        |row| row.get(0),
    )?;
    Ok(count as u32)
}
