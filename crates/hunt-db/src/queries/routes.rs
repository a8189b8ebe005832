//! Route and route-step query functions.

use hunt_types::catalog::{Route, RouteStep};
use hunt_types::{PoiId, RouteId};
use rusqlite::{Connection, OptionalExtension};

use crate::{DbError, Result};

fn row_to_route(row: &rusqlite::Row<'_>) -> rusqlite::Result<Route> {
    Ok(Route {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

/// Insert a new route.
pub fn insert(conn: &Connection, name: &str) -> Result<RouteId> {
    conn.execute("INSERT INTO routes (name) VALUES (?1)", [name])?;
    Ok(conn.last_insert_rowid())
}

/// Fetch a route by id.
pub fn get(conn: &Connection, id: RouteId) -> Result<Route> {
    conn.query_row("SELECT id, name FROM routes WHERE id = ?1", [id], row_to_route)
        .optional()?
        .ok_or_else(|| DbError::NotFound(format!("route {id}")))
}

/// All routes in id order. Formation assigns these round-robin.
pub fn list(conn: &Connection) -> Result<Vec<Route>> {
    let mut stmt = conn.prepare("SELECT id, name FROM routes ORDER BY id ASC")?;
    let rows = stmt
        .query_map([], row_to_route)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Number of routes.
pub fn count(conn: &Connection) -> Result<u32> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM routes", [], |row| row.get(0))?;
    Ok(count as u32)
}

/// Bind a POI to a position within a route.
///
/// The (route, step_index) pair is UNIQUE in the schema; callers wanting a
/// friendly message should check [`step_index_exists`] first.
pub fn insert_step(
    conn: &Connection,
    route_id: RouteId,
    poi_id: PoiId,
    step_index: u32,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO route_steps (route_id, poi_id, step_index) VALUES (?1, ?2, ?3)",
        rusqlite::params![route_id, poi_id, step_index],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Whether a step index is already taken within a route.
pub fn step_index_exists(conn: &Connection, route_id: RouteId, step_index: u32) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM route_steps WHERE route_id = ?1 AND step_index = ?2",
        rusqlite::params![route_id, step_index],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Steps of one route in walk order (ascending step_index).
pub fn steps_for_route(conn: &Connection, route_id: RouteId) -> Result<Vec<RouteStep>> {
    let mut stmt = conn.prepare(
        "SELECT id, route_id, poi_id, step_index FROM route_steps
         WHERE route_id = ?1 ORDER BY step_index ASC",
    )?;
    let rows = stmt
        .query_map([route_id], |row| {
            Ok(RouteStep {
                id: row.get(0)?,
                route_id: row.get(1)?,
                poi_id: row.get(2)?,
                step_index: row.get::<_, i64>(3)? as u32,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}
