//! Read-only view structs handed to the presentation boundary.
//!
//! These are value snapshots: the engine assembles them from the stores
//! and the boundary renders them without further lookups.

use serde::{Deserialize, Serialize};

use crate::catalog::{CompletionMode, Difficulty};
use crate::{PoiId, TeamId, Timestamp};

/// Header card for a team's dashboard.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TeamSummary {
    pub team_id: TeamId,
    pub name: String,
    /// Display names of all members (code fallback).
    pub members: Vec<String>,
    /// Route name, None until formation assigns one.
    pub route_name: Option<String>,
    pub score: u32,
    pub is_finished: bool,
}

/// The team's active challenge with only the hints unlocked so far.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CurrentChallenge {
    pub poi_id: PoiId,
    pub riddle: String,
    pub difficulty: Difficulty,
    pub completion_mode: CompletionMode,
    pub points: u32,
    pub hints_used: u32,
    /// The first `hints_used` hint texts, skipping unset slots.
    pub unlocked_hints: Vec<String>,
}

/// One completed POI in a team's history.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProgressItem {
    pub poi_id: PoiId,
    pub poi_title: String,
    pub hints_used: u32,
    pub completed_at: Option<Timestamp>,
}

/// Where a team sits in the event lifecycle, for the standings table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamStatus {
    /// No route or no current POI yet.
    Waiting,
    /// On a POI.
    Active,
    /// Route exhausted.
    Finished,
}

/// One row of the standings list, sorted by score descending.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StandingsRow {
    pub team_id: TeamId,
    pub name: String,
    pub member_count: u32,
    pub score: u32,
    pub route_name: Option<String>,
    pub current_poi_title: Option<String>,
    pub status: TeamStatus,
}
