//! IPC command handlers.
//!
//! Each submodule implements the commands for one category. Identity is
//! explicit: every authenticated method carries a `code` param that is
//! resolved to a user before any engine call.

pub mod admin;
pub mod auth;
pub mod media;
pub mod player;

use hunt_db::DbError;
use hunt_engine::EngineError;
use hunt_types::team::User;
use serde_json::Value;

use crate::rpc::RpcError;

/// Normalize a login code the way the login form does: trim + uppercase.
pub(crate) fn normalize_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Extract a required string param.
pub(crate) fn str_param<'a>(params: &'a Value, key: &str) -> Result<&'a str, RpcError> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| RpcError::invalid_params(&format!("{key} required")))
}

/// Extract a required integer param.
pub(crate) fn i64_param(params: &Value, key: &str) -> Result<i64, RpcError> {
    params
        .get(key)
        .and_then(|v| v.as_i64())
        .ok_or_else(|| RpcError::invalid_params(&format!("{key} required")))
}

/// Resolve the calling user from the `code` param.
pub(crate) fn resolve_caller(
    conn: &rusqlite::Connection,
    params: &Value,
) -> Result<User, RpcError> {
    let code = normalize_code(str_param(params, "code")?);
    hunt_db::queries::users::find_by_code(conn, &code)
        .map_err(db_error)?
        .ok_or_else(RpcError::invalid_code)
}

/// Resolve the caller and require the admin flag.
pub(crate) fn resolve_admin(
    conn: &rusqlite::Connection,
    params: &Value,
) -> Result<User, RpcError> {
    let user = resolve_caller(conn, params)?;
    if !user.is_admin {
        return Err(RpcError::forbidden());
    }
    Ok(user)
}

/// Current Unix timestamp in seconds.
pub(crate) fn now_ts() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

/// Map a database error onto the RPC taxonomy.
pub(crate) fn db_error(err: DbError) -> RpcError {
    match err {
        DbError::NotFound(what) => RpcError::not_found(&what),
        other => RpcError::internal_error(&format!("db error: {other}")),
    }
}

/// Map an engine error onto the RPC taxonomy.
pub(crate) fn engine_error(err: EngineError) -> RpcError {
    match err {
        EngineError::Db(db) => db_error(db),
        other => RpcError::internal_error(&format!("engine error: {other}")),
    }
}
