//! POI query functions.

use hunt_types::catalog::{CompletionMode, Difficulty, Poi};
use hunt_types::PoiId;
use rusqlite::{Connection, OptionalExtension};

use crate::queries::parse_enum;
use crate::{DbError, Result};

/// Fields for a new POI. POIs are immutable once created.
#[derive(Clone, Debug)]
pub struct NewPoi {
    pub title: String,
    pub riddle: String,
    pub hints: [Option<String>; 3],
    pub completion_mode: CompletionMode,
    pub answer_key: Option<String>,
    pub points: u32,
    pub difficulty: Difficulty,
}

fn row_to_poi(row: &rusqlite::Row<'_>) -> rusqlite::Result<Poi> {
    Ok(Poi {
        id: row.get(0)?,
        title: row.get(1)?,
        riddle: row.get(2)?,
        hints: [row.get(3)?, row.get(4)?, row.get(5)?],
        completion_mode: parse_enum(6, row.get::<_, String>(6)?)?,
        answer_key: row.get(7)?,
        points: row.get::<_, i64>(8)? as u32,
        difficulty: parse_enum(9, row.get::<_, String>(9)?)?,
    })
}

const POI_COLS: &str =
    "id, title, riddle, hint_1, hint_2, hint_3, completion_mode, answer_key, points, difficulty";

/// Insert a new POI.
pub fn insert(conn: &Connection, new: &NewPoi) -> Result<PoiId> {
    conn.execute(
        "INSERT INTO pois (title, riddle, hint_1, hint_2, hint_3, completion_mode,
                           answer_key, points, difficulty)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        rusqlite::params![
            new.title,
            new.riddle,
            new.hints[0],
            new.hints[1],
            new.hints[2],
            new.completion_mode.as_str(),
            new.answer_key,
            new.points,
            new.difficulty.as_str(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Fetch a POI by id.
pub fn get(conn: &Connection, id: PoiId) -> Result<Poi> {
    conn.query_row(
        &format!("SELECT {POI_COLS} FROM pois WHERE id = ?1"),
        [id],
        row_to_poi,
    )
    .optional()?
    .ok_or_else(|| DbError::NotFound(format!("poi {id}")))
}

/// All POIs in id order.
pub fn list(conn: &Connection) -> Result<Vec<Poi>> {
    let mut stmt = conn.prepare(&format!("SELECT {POI_COLS} FROM pois ORDER BY id ASC"))?;
    let rows = stmt
        .query_map([], row_to_poi)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Number of POIs in the catalog.
pub fn count(conn: &Connection) -> Result<u32> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM pois", [], |row| row.get(0))?;
    Ok(count as u32)
}
