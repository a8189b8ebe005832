//! User query functions.

use hunt_types::team::User;
use hunt_types::{TeamId, UserId};
use rusqlite::{Connection, OptionalExtension};

use crate::{DbError, Result};

fn row_to_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        code: row.get(1)?,
        name: row.get(2)?,
        is_admin: row.get(3)?,
        team_id: row.get(4)?,
    })
}

const USER_COLS: &str = "id, code, name, is_admin, team_id";

/// Insert a new user. The code must already be normalized (uppercase,
/// trimmed) by the caller.
pub fn insert(conn: &Connection, code: &str, name: Option<&str>, is_admin: bool) -> Result<UserId> {
    conn.execute(
        "INSERT INTO users (code, name, is_admin) VALUES (?1, ?2, ?3)",
        rusqlite::params![code, name, is_admin],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Fetch a user by id.
pub fn get(conn: &Connection, id: UserId) -> Result<User> {
    conn.query_row(
        &format!("SELECT {USER_COLS} FROM users WHERE id = ?1"),
        [id],
        row_to_user,
    )
    .optional()?
    .ok_or_else(|| DbError::NotFound(format!("user {id}")))
}

/// Look up a user by login code.
pub fn find_by_code(conn: &Connection, code: &str) -> Result<Option<User>> {
    Ok(conn
        .query_row(
            &format!("SELECT {USER_COLS} FROM users WHERE code = ?1"),
            [code],
            row_to_user,
        )
        .optional()?)
}

/// Whether a login code is already taken.
pub fn code_exists(conn: &Connection, code: &str) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM users WHERE code = ?1",
        [code],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// All non-admin users with no team, in id order. These are the formation
/// candidates.
pub fn unassigned_participants(conn: &Connection) -> Result<Vec<User>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {USER_COLS} FROM users WHERE is_admin = 0 AND team_id IS NULL ORDER BY id ASC"
    ))?;
    let rows = stmt
        .query_map([], row_to_user)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Members of one team, in id order.
pub fn members_of(conn: &Connection, team_id: TeamId) -> Result<Vec<User>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {USER_COLS} FROM users WHERE team_id = ?1 ORDER BY id ASC"
    ))?;
    let rows = stmt
        .query_map([team_id], row_to_user)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Attach a user to a team.
pub fn set_team(conn: &Connection, user_id: UserId, team_id: TeamId) -> Result<()> {
    conn.execute(
        "UPDATE users SET team_id = ?1 WHERE id = ?2",
        rusqlite::params![team_id, user_id],
    )?;
    Ok(())
}

/// Number of non-admin users.
pub fn participant_count(conn: &Connection) -> Result<u32> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM users WHERE is_admin = 0",
        [],
        |row| row.get(0),
    )?;
    Ok(count as u32)
}
