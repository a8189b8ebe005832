//! Per-team-per-POI progress and the append-only submission log.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{PoiId, SubmissionId, TeamId, Timestamp, UnknownVariant};

/// Lifecycle of a progress record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    Assigned,
    Completed,
}

impl ProgressStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Assigned => "assigned",
            Self::Completed => "completed",
        }
    }
}

impl FromStr for ProgressStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "assigned" => Ok(Self::Assigned),
            "completed" => Ok(Self::Completed),
            other => Err(UnknownVariant {
                kind: "progress_status",
                value: other.to_string(),
            }),
        }
    }
}

/// Audit-trail record keyed by (team, POI). One row per pair ever
/// assigned; never deleted, never duplicated.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TeamPoiProgress {
    pub id: i64,
    pub team_id: TeamId,
    pub poi_id: PoiId,
    pub status: ProgressStatus,
    /// Hints revealed so far, 0..=MAX_HINTS.
    pub hints_used: u32,
    /// Set only on completion.
    pub completed_at: Option<Timestamp>,
}

/// What kind of proof a submission carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionKind {
    Photo,
    Text,
}

impl SubmissionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Photo => "photo",
            Self::Text => "text",
        }
    }
}

impl FromStr for SubmissionKind {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "photo" => Ok(Self::Photo),
            "text" => Ok(Self::Text),
            other => Err(UnknownVariant {
                kind: "submission_kind",
                value: other.to_string(),
            }),
        }
    }
}

/// Kept for audit; this implementation auto-approves everything it records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Approved,
    Rejected,
}

impl SubmissionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl FromStr for SubmissionStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(UnknownVariant {
                kind: "submission_status",
                value: other.to_string(),
            }),
        }
    }
}

/// Immutable record of one accepted proof.
///
/// `content` is a media storage reference for photos, or the normalized
/// answer text for text proofs.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Submission {
    pub id: SubmissionId,
    pub team_id: TeamId,
    pub poi_id: PoiId,
    pub kind: SubmissionKind,
    pub content: String,
    pub status: SubmissionStatus,
    pub created_at: Timestamp,
}
