//! Organizer command handlers: content setup, team formation, standings,
//! and the photo feed. Every method requires the caller's admin flag.

use std::str::FromStr;
use std::sync::Arc;

use hunt_db::queries::{pois, routes, submissions, users};
use hunt_engine::{formation, formation::FormationOutcome, views};
use hunt_types::catalog::{CompletionMode, Difficulty};
use serde_json::Value;
use tracing::info;

use crate::commands::{
    db_error, engine_error, i64_param, normalize_code, resolve_admin, str_param,
};
use crate::rpc::RpcError;
use crate::DaemonState;

type Result = std::result::Result<Value, RpcError>;

/// Default number of entries in the photo feed.
const PHOTO_FEED_LIMIT: u32 = 30;

/// Create a POI. Text-mode POIs must carry a non-empty answer key.
pub async fn create_poi(state: &Arc<DaemonState>, params: &Value) -> Result {
    let db = state.db.lock().await;
    resolve_admin(&db, params)?;

    let title = str_param(params, "title")?.trim();
    let riddle = str_param(params, "riddle")?.trim();
    if title.is_empty() {
        return Err(RpcError::validation("title required"));
    }
    if riddle.is_empty() {
        return Err(RpcError::validation("riddle required"));
    }

    let completion_mode = CompletionMode::from_str(str_param(params, "completion_mode")?)
        .map_err(|e| RpcError::validation(&e.to_string()))?;
    let difficulty = match params.get("difficulty").and_then(Value::as_str) {
        Some(raw) => {
            Difficulty::from_str(raw).map_err(|e| RpcError::validation(&e.to_string()))?
        }
        None => Difficulty::Medium,
    };

    let answer_key = params
        .get("answer_key")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    if completion_mode == CompletionMode::Text && answer_key.is_none() {
        return Err(RpcError::validation("text POIs need an answer key"));
    }

    let points = params
        .get("points")
        .and_then(Value::as_u64)
        .ok_or_else(|| RpcError::invalid_params("points required"))? as u32;

    let hint_at = |key: &str| {
        params
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    let new = pois::NewPoi {
        title: title.to_string(),
        riddle: riddle.to_string(),
        hints: [hint_at("hint_1"), hint_at("hint_2"), hint_at("hint_3")],
        completion_mode,
        answer_key,
        points,
        difficulty,
    };
    let poi_id = pois::insert(&db, &new).map_err(db_error)?;

    info!(poi_id, title, "poi created");
    Ok(serde_json::json!({"poi_id": poi_id}))
}

/// Create an empty route.
pub async fn create_route(state: &Arc<DaemonState>, params: &Value) -> Result {
    let db = state.db.lock().await;
    resolve_admin(&db, params)?;

    let name = str_param(params, "name")?.trim();
    if name.is_empty() {
        return Err(RpcError::validation("route name required"));
    }

    let route_id = routes::insert(&db, name).map_err(db_error)?;
    info!(route_id, name, "route created");
    Ok(serde_json::json!({"route_id": route_id}))
}

/// Append a POI to a route at an explicit step index. Indices are unique
/// per route but need not be contiguous.
pub async fn add_route_step(state: &Arc<DaemonState>, params: &Value) -> Result {
    let db = state.db.lock().await;
    resolve_admin(&db, params)?;

    let route_id = i64_param(params, "route_id")?;
    let poi_id = i64_param(params, "poi_id")?;
    let step_index = params
        .get("step_index")
        .and_then(Value::as_u64)
        .ok_or_else(|| RpcError::invalid_params("step_index required"))? as u32;

    // Surface missing entities before the uniqueness check.
    routes::get(&db, route_id).map_err(db_error)?;
    pois::get(&db, poi_id).map_err(db_error)?;

    if routes::step_index_exists(&db, route_id, step_index).map_err(db_error)? {
        return Err(RpcError::validation(
            "that step index is already used in this route",
        ));
    }

    let step_id = routes::insert_step(&db, route_id, poi_id, step_index).map_err(db_error)?;
    info!(route_id, poi_id, step_index, "route step added");
    Ok(serde_json::json!({"step_id": step_id}))
}

/// Register a participant (or another admin) by login code.
pub async fn create_user(state: &Arc<DaemonState>, params: &Value) -> Result {
    let db = state.db.lock().await;
    resolve_admin(&db, params)?;

    let new_code = normalize_code(str_param(params, "new_code")?);
    if new_code.is_empty() {
        return Err(RpcError::validation("login code required"));
    }
    if users::code_exists(&db, &new_code).map_err(db_error)? {
        return Err(RpcError::validation("that login code is already taken"));
    }

    let name = params
        .get("name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let is_admin = params
        .get("is_admin")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let user_id = users::insert(&db, &new_code, name, is_admin).map_err(db_error)?;
    info!(user_id, code = %new_code, is_admin, "user created");
    Ok(serde_json::json!({"user_id": user_id, "code": new_code}))
}

/// Shuffle unassigned participants into teams and start them on routes.
pub async fn form_teams(state: &Arc<DaemonState>, params: &Value) -> Result {
    let mut db = state.db.lock().await;
    resolve_admin(&db, params)?;

    let outcome =
        formation::form_teams(&mut db, &mut rand::thread_rng()).map_err(engine_error)?;
    match outcome {
        FormationOutcome::Created { teams } => {
            info!(teams, "teams formed");
            Ok(serde_json::json!({"teams_created": teams}))
        }
        FormationOutcome::NoEligibleUsers => Err(RpcError::formation_failed(
            "no unassigned participants to place",
        )),
        FormationOutcome::NoRoutes => Err(RpcError::formation_failed(
            "create at least one route before forming teams",
        )),
    }
}

/// Leaderboard: all teams ordered by score with their live status.
pub async fn get_standings(state: &Arc<DaemonState>, params: &Value) -> Result {
    let db = state.db.lock().await;
    resolve_admin(&db, params)?;

    let rows = views::standings(&db).map_err(engine_error)?;
    Ok(serde_json::json!({"standings": rows}))
}

/// Newest photo submissions first, for the organizer's live wall.
pub async fn get_photo_feed(state: &Arc<DaemonState>, params: &Value) -> Result {
    let db = state.db.lock().await;
    resolve_admin(&db, params)?;

    let limit = params
        .get("limit")
        .and_then(Value::as_u64)
        .map_or(PHOTO_FEED_LIMIT, |n| n as u32);

    let photos = submissions::recent_photos(&db, limit).map_err(db_error)?;
    Ok(serde_json::json!({"photos": photos}))
}
