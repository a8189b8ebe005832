//! Participant and team structures.

use serde::{Deserialize, Serialize};

use crate::{PoiId, RouteId, TeamId, UserId};

/// A participant. Logs in with an opaque shared code; may belong to at
/// most one team.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// Unique login code, stored uppercase.
    pub code: String,
    /// Optional display name; views fall back to the code.
    pub name: Option<String>,
    pub is_admin: bool,
    pub team_id: Option<TeamId>,
}

impl User {
    /// Display name with code fallback.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.code)
    }
}

/// A team and its live position on its route.
///
/// Invariant: `is_finished` is true iff `route_step_index` has reached or
/// passed the route's step count, in which case `current_poi_id` is None.
/// Otherwise exactly one of {current POI set, no route assigned} holds.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Cumulative score; never decreases.
    pub score: u32,
    /// Assigned route, None until formation runs.
    pub route_id: Option<RouteId>,
    /// Zero-based cursor into the route's sorted step list.
    pub route_step_index: u32,
    /// Convenience pointer to the active POI, None when idle or finished.
    pub current_poi_id: Option<PoiId>,
    pub is_finished: bool,
}
