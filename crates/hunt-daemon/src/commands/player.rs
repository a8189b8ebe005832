//! Player command handlers: dashboard view, hints, proof submission.

use std::sync::Arc;

use base64::Engine as _;
use hunt_engine::progression::{self, HintOutcome, Proof, SubmitOutcome};
use hunt_engine::views;
use serde_json::Value;
use tracing::warn;

use crate::commands::{engine_error, i64_param, now_ts, resolve_caller, str_param};
use crate::rpc::RpcError;
use crate::DaemonState;

type Result = std::result::Result<Value, RpcError>;

/// Everything a player's screen needs: team summary, current challenge
/// with unlocked hints, and completed history. `team` is null while the
/// caller waits for formation.
pub async fn get_dashboard(state: &Arc<DaemonState>, params: &Value) -> Result {
    let db = state.db.lock().await;
    let user = resolve_caller(&db, params)?;

    let Some(team_id) = user.team_id else {
        return Ok(serde_json::json!({
            "user": { "code": user.code, "name": user.name },
            "team": null,
        }));
    };

    let summary = views::team_summary(&db, team_id).map_err(engine_error)?;
    let challenge = views::current_challenge(&db, team_id).map_err(engine_error)?;
    let completed = views::completed_progress(&db, team_id).map_err(engine_error)?;

    Ok(serde_json::json!({
        "user": { "code": user.code, "name": user.name },
        "team": summary,
        "challenge": challenge,
        "completed": completed,
    }))
}

/// Reveal the next hint for the caller's team. No-op (not an error) when
/// there is no active POI or the cap is reached.
pub async fn request_hint(state: &Arc<DaemonState>, params: &Value) -> Result {
    let mut db = state.db.lock().await;
    let user = resolve_caller(&db, params)?;

    let Some(team_id) = user.team_id else {
        return Ok(serde_json::json!({"revealed": false, "reason": "no_team"}));
    };

    let outcome = progression::request_hint(&mut db, team_id).map_err(engine_error)?;
    Ok(match outcome {
        HintOutcome::Revealed { hints_used, hint } => serde_json::json!({
            "revealed": true,
            "hints_used": hints_used,
            "hint": hint,
        }),
        HintOutcome::CapReached => {
            serde_json::json!({"revealed": false, "reason": "cap_reached"})
        }
        HintOutcome::NoActiveChallenge => {
            serde_json::json!({"revealed": false, "reason": "no_active_challenge"})
        }
    })
}

/// Submit a text answer for a POI.
pub async fn submit_text(state: &Arc<DaemonState>, params: &Value) -> Result {
    let poi_id = i64_param(params, "poi_id")?;
    let answer = str_param(params, "answer")?;

    let mut db = state.db.lock().await;
    let user = resolve_caller(&db, params)?;
    let Some(team_id) = user.team_id else {
        return Ok(serde_json::json!({"accepted": false, "reason": "no_team"}));
    };

    let outcome =
        progression::submit_proof(&mut db, team_id, poi_id, Proof::Text { answer }, now_ts())
            .map_err(engine_error)?;
    Ok(outcome_json(outcome))
}

/// Submit a photo proof for a POI. `data` is base64-encoded image bytes.
pub async fn submit_photo(state: &Arc<DaemonState>, params: &Value) -> Result {
    let poi_id = i64_param(params, "poi_id")?;
    let filename = str_param(params, "filename")?;
    let data = str_param(params, "data")?;

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(data)
        .map_err(|_| RpcError::invalid_params("data must be base64"))?;

    let mut db = state.db.lock().await;
    let user = resolve_caller(&db, params)?;
    let Some(team_id) = user.team_id else {
        return Ok(serde_json::json!({"accepted": false, "reason": "no_team"}));
    };

    // Persist the payload first; the engine stores only the reference.
    let now = now_ts();
    let reference = state
        .photos
        .save(team_id, poi_id, filename, &bytes, now)
        .map_err(|e| RpcError::validation(&e.to_string()))?;

    let outcome =
        progression::submit_proof(&mut db, team_id, poi_id, Proof::Photo { reference: &reference }, now)
            .map_err(engine_error)?;

    if !matches!(outcome, SubmitOutcome::Accepted { .. }) {
        // No submission row references the file; don't leave it orphaned.
        if let Err(e) = state.photos.remove(&reference) {
            warn!(team_id, poi_id, %reference, error = %e, "orphaned photo cleanup failed");
        }
    }
    Ok(outcome_json(outcome))
}

fn outcome_json(outcome: SubmitOutcome) -> Value {
    match outcome {
        SubmitOutcome::Accepted { awarded, finished } => serde_json::json!({
            "accepted": true,
            "awarded": awarded,
            "finished": finished,
        }),
        SubmitOutcome::Incorrect => {
            serde_json::json!({"accepted": false, "reason": "incorrect"})
        }
        SubmitOutcome::NotCurrent => {
            serde_json::json!({"accepted": false, "reason": "not_current"})
        }
        SubmitOutcome::WrongProofKind => {
            serde_json::json!({"accepted": false, "reason": "wrong_proof_kind"})
        }
        SubmitOutcome::NoActiveChallenge => {
            serde_json::json!({"accepted": false, "reason": "no_active_challenge"})
        }
    }
}
