//! # hunt-types
//!
//! Shared domain types used across the hunt workspace: id aliases, event
//! tuning constants, the record structs backing the database tables, and
//! the read-only view structs handed to the presentation boundary.

pub mod catalog;
pub mod progress;
pub mod team;
pub mod views;

/// Common id aliases. All ids are SQLite rowids.
pub type UserId = i64;
pub type TeamId = i64;
pub type PoiId = i64;
pub type RouteId = i64;
pub type SubmissionId = i64;

/// Unix epoch seconds.
pub type Timestamp = i64;

/// Maximum hints a team may reveal per POI.
pub const MAX_HINTS: u32 = 3;

/// Points deducted from a POI's award per hint revealed.
pub const HINT_PENALTY_POINTS: u32 = 2;

/// Target team size used by formation chunking.
pub const TEAM_CHUNK_SIZE: usize = 4;

/// A trailing formation chunk smaller than this merges into its predecessor.
pub const MIN_TAIL_TEAM_SIZE: usize = 3;

/// Maximum accepted photo proof payload in bytes (10 MiB).
pub const MAX_PHOTO_BYTES: usize = 10 * 1024 * 1024;

/// Accepted photo proof file extensions, lowercase, without the dot.
pub const ALLOWED_PHOTO_EXTS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

/// Error returned when a stored enum column holds an unknown value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} value: {value}")]
pub struct UnknownVariant {
    /// The enum being parsed (e.g. "completion_mode").
    pub kind: &'static str,
    /// The offending stored value.
    pub value: String,
}
