//! Progress-ledger query functions.

use hunt_types::progress::{ProgressStatus, TeamPoiProgress};
use hunt_types::{PoiId, TeamId, Timestamp};
use rusqlite::{Connection, OptionalExtension};

use crate::queries::parse_enum;
use crate::{DbError, Result};

fn row_to_progress(row: &rusqlite::Row<'_>) -> rusqlite::Result<TeamPoiProgress> {
    Ok(TeamPoiProgress {
        id: row.get(0)?,
        team_id: row.get(1)?,
        poi_id: row.get(2)?,
        status: parse_enum(3, row.get::<_, String>(3)?)?,
        hints_used: row.get::<_, i64>(4)? as u32,
        completed_at: row.get(5)?,
    })
}

const PROGRESS_COLS: &str = "id, team_id, poi_id, status, hints_used, completed_at";

/// Fetch the progress record for a (team, POI) pair, if any.
pub fn get(conn: &Connection, team_id: TeamId, poi_id: PoiId) -> Result<Option<TeamPoiProgress>> {
    Ok(conn
        .query_row(
            &format!("SELECT {PROGRESS_COLS} FROM team_poi_progress WHERE team_id = ?1 AND poi_id = ?2"),
            rusqlite::params![team_id, poi_id],
            row_to_progress,
        )
        .optional()?)
}

/// Get the progress record for a (team, POI) pair, creating the
/// `assigned` row if it does not exist yet.
///
/// The insert is `INSERT OR IGNORE` against the UNIQUE (team, POI) pair,
/// so two racing callers converge on the same single row.
pub fn get_or_create(conn: &Connection, team_id: TeamId, poi_id: PoiId) -> Result<TeamPoiProgress> {
    conn.execute(
        "INSERT OR IGNORE INTO team_poi_progress (team_id, poi_id) VALUES (?1, ?2)",
        rusqlite::params![team_id, poi_id],
    )?;
    get(conn, team_id, poi_id)?
        .ok_or_else(|| DbError::NotFound(format!("progress for team {team_id} poi {poi_id}")))
}

/// Increment the hint counter. The caller enforces the cap.
pub fn increment_hints(conn: &Connection, progress_id: i64) -> Result<()> {
    conn.execute(
        "UPDATE team_poi_progress SET hints_used = hints_used + 1 WHERE id = ?1",
        [progress_id],
    )?;
    Ok(())
}

/// Mark a progress record completed with its completion time.
pub fn mark_completed(conn: &Connection, progress_id: i64, completed_at: Timestamp) -> Result<()> {
    conn.execute(
        "UPDATE team_poi_progress SET status = ?1, completed_at = ?2 WHERE id = ?3",
        rusqlite::params![ProgressStatus::Completed.as_str(), completed_at, progress_id],
    )?;
    Ok(())
}

/// Completed records for one team, newest completion first.
pub fn completed_for_team(conn: &Connection, team_id: TeamId) -> Result<Vec<TeamPoiProgress>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {PROGRESS_COLS} FROM team_poi_progress
         WHERE team_id = ?1 AND status = 'completed'
         ORDER BY completed_at DESC, id DESC"
    ))?;
    let rows = stmt
        .query_map([team_id], row_to_progress)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Number of progress rows for a (team, POI) pair. Test hook for the
/// no-duplicates invariant.
pub fn count_for_pair(conn: &Connection, team_id: TeamId, poi_id: PoiId) -> Result<u32> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM team_poi_progress WHERE team_id = ?1 AND poi_id = ?2",
        rusqlite::params![team_id, poi_id],
        |row| row.get(0),
    )?;
    Ok(count as u32)
}
