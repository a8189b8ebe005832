//! Photo retrieval. Admins can fetch any photo; players only their own
//! team's.

use std::sync::Arc;

use base64::Engine as _;
use hunt_db::queries::submissions;
use hunt_media::MediaError;
use hunt_types::progress::SubmissionKind;
use serde_json::Value;

use crate::commands::{db_error, i64_param, resolve_caller};
use crate::rpc::RpcError;
use crate::DaemonState;

type Result = std::result::Result<Value, RpcError>;

/// Fetch a stored photo proof by submission id. Bytes come back
/// base64-encoded.
pub async fn get_photo(state: &Arc<DaemonState>, params: &Value) -> Result {
    let submission_id = i64_param(params, "submission_id")?;

    let db = state.db.lock().await;
    let caller = resolve_caller(&db, params)?;
    let submission = submissions::get(&db, submission_id).map_err(db_error)?;

    if !caller.is_admin && caller.team_id != Some(submission.team_id) {
        return Err(RpcError::forbidden());
    }
    if submission.kind != SubmissionKind::Photo {
        return Err(RpcError::not_found("submission is not a photo"));
    }

    let bytes = state.photos.load(&submission.content).map_err(|e| match e {
        MediaError::NotFound(_) | MediaError::InvalidFilename => {
            RpcError::not_found("photo file missing")
        }
        other => RpcError::internal_error(&other.to_string()),
    })?;

    Ok(serde_json::json!({
        "submission_id": submission.id,
        "team_id": submission.team_id,
        "poi_id": submission.poi_id,
        "filename": submission.content,
        "data": base64::engine::general_purpose::STANDARD.encode(bytes),
    }))
}
