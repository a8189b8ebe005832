//! Catalog structures: POIs, routes, and the ordered route→POI binding.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{PoiId, RouteId, UnknownVariant};

/// How a POI is completed: photo proof or a graded text answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionMode {
    Photo,
    Text,
}

impl CompletionMode {
    /// Stable string form used in the database column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Photo => "photo",
            Self::Text => "text",
        }
    }
}

impl FromStr for CompletionMode {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "photo" => Ok(Self::Photo),
            "text" => Ok(Self::Text),
            other => Err(UnknownVariant {
                kind: "completion_mode",
                value: other.to_string(),
            }),
        }
    }
}

/// Organizer-facing difficulty tag. Informational only; the engine does
/// not branch on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(UnknownVariant {
                kind: "difficulty",
                value: other.to_string(),
            }),
        }
    }
}

/// A point of interest: one physical-world challenge.
///
/// Immutable for the duration of an event; the engine never edits one
/// in place.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Poi {
    pub id: PoiId,
    /// Internal organizer-facing title.
    pub title: String,
    /// The riddle shown to teams.
    pub riddle: String,
    /// Up to three progressively more explicit hints.
    pub hints: [Option<String>; 3],
    pub completion_mode: CompletionMode,
    /// Answer key, meaningful only in text mode.
    pub answer_key: Option<String>,
    pub points: u32,
    pub difficulty: Difficulty,
}

/// A named, ordered sequence of POIs.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Route {
    pub id: RouteId,
    pub name: String,
}

/// Binding of one POI to one position within a route.
///
/// Step indices are unique per route but need not be contiguous; the walk
/// order is the ascending sort.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RouteStep {
    pub id: i64,
    pub route_id: RouteId,
    pub poi_id: PoiId,
    pub step_index: u32,
}
