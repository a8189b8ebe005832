//! Login command handler.
//!
//! The daemon trusts the shared code completely; there are no passwords.
//! Clients keep the code and send it with every subsequent call.

use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use crate::commands::{db_error, normalize_code, str_param};
use crate::rpc::RpcError;
use crate::DaemonState;

type Result = std::result::Result<Value, RpcError>;

/// Resolve a login code to a user summary.
pub async fn login(state: &Arc<DaemonState>, params: &Value) -> Result {
    let code = normalize_code(str_param(params, "code")?);

    let db = state.db.lock().await;
    let user = hunt_db::queries::users::find_by_code(&db, &code)
        .map_err(db_error)?
        .ok_or_else(RpcError::invalid_code)?;

    info!(user_id = user.id, "login");
    Ok(serde_json::json!({
        "user_id": user.id,
        "code": user.code,
        "name": user.name,
        "is_admin": user.is_admin,
        "team_id": user.team_id,
    }))
}
