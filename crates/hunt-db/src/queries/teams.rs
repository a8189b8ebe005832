//! Team query functions.

use hunt_types::team::Team;
use hunt_types::{PoiId, RouteId, TeamId};
use rusqlite::{Connection, OptionalExtension};

use crate::{DbError, Result};

fn row_to_team(row: &rusqlite::Row<'_>) -> rusqlite::Result<Team> {
    Ok(Team {
        id: row.get(0)?,
        name: row.get(1)?,
        score: row.get::<_, i64>(2)? as u32,
        route_id: row.get(3)?,
        route_step_index: row.get::<_, i64>(4)? as u32,
        current_poi_id: row.get(5)?,
        is_finished: row.get(6)?,
    })
}

const TEAM_COLS: &str = "id, name, score, route_id, route_step_index, current_poi_id, is_finished";

/// Insert a new team with step cursor 0 and no current POI.
pub fn insert(conn: &Connection, name: &str, route_id: Option<RouteId>) -> Result<TeamId> {
    conn.execute(
        "INSERT INTO teams (name, route_id) VALUES (?1, ?2)",
        rusqlite::params![name, route_id],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Fetch a team by id.
pub fn get(conn: &Connection, id: TeamId) -> Result<Team> {
    conn.query_row(
        &format!("SELECT {TEAM_COLS} FROM teams WHERE id = ?1"),
        [id],
        row_to_team,
    )
    .optional()?
    .ok_or_else(|| DbError::NotFound(format!("team {id}")))
}

/// Total number of teams ever created. Formation continues its naming
/// counter from here.
pub fn count(conn: &Connection) -> Result<u32> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM teams", [], |row| row.get(0))?;
    Ok(count as u32)
}

/// All teams, best score first. Ties break by id for a stable order.
pub fn list_by_score_desc(conn: &Connection) -> Result<Vec<Team>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {TEAM_COLS} FROM teams ORDER BY score DESC, id ASC"
    ))?;
    let rows = stmt
        .query_map([], row_to_team)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Point the team at a POI (or none) and set the finished flag.
pub fn set_position(
    conn: &Connection,
    team_id: TeamId,
    current_poi_id: Option<PoiId>,
    is_finished: bool,
) -> Result<()> {
    conn.execute(
        "UPDATE teams SET current_poi_id = ?1, is_finished = ?2 WHERE id = ?3",
        rusqlite::params![current_poi_id, is_finished, team_id],
    )?;
    Ok(())
}

/// Apply a completion in one statement: add the awarded points and move
/// the step cursor forward.
pub fn add_score_and_advance(conn: &Connection, team_id: TeamId, awarded: u32) -> Result<()> {
    conn.execute(
        "UPDATE teams SET score = score + ?1, route_step_index = route_step_index + 1
         WHERE id = ?2",
        rusqlite::params![awarded, team_id],
    )?;
    Ok(())
}
