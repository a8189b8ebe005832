//! Per-team state transitions.
//!
//! The state machine per team, driven entirely by this module:
//!
//! ```text
//! NO_ROUTE -> (route assigned) -> AT_STEP[i] -> (valid submission)
//!          -> AT_STEP[i+1] -> ... -> FINISHED
//! ```
//!
//! `AT_STEP[i]` is re-entrant under hint requests; `FINISHED` is terminal.

use hunt_db::queries::{pois, progress, routes, submissions, teams};
use hunt_types::catalog::{CompletionMode, Poi};
use hunt_types::progress::SubmissionKind;
use hunt_types::{PoiId, TeamId, Timestamp, MAX_HINTS};
use rusqlite::Connection;

use crate::grading;
use crate::Result;

/// Outcome of a hint request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HintOutcome {
    /// A new hint was revealed.
    Revealed {
        hints_used: u32,
        /// The newly unlocked hint text, if the POI defines one at that slot.
        hint: Option<String>,
    },
    /// The cap was already reached; nothing changed.
    CapReached,
    /// The team has no route or no active POI; nothing changed.
    NoActiveChallenge,
}

/// A proof payload for the team's current POI.
///
/// Photo proofs arrive as a storage reference already persisted by the
/// media store; the engine records the reference verbatim.
#[derive(Clone, Copy, Debug)]
pub enum Proof<'a> {
    Photo { reference: &'a str },
    Text { answer: &'a str },
}

/// Outcome of a proof submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Proof accepted: submission recorded, points awarded, team advanced.
    Accepted { awarded: u32, finished: bool },
    /// Text answer did not match the key. No state change.
    Incorrect,
    /// The target POI is not the team's current POI (stale or duplicate
    /// request). No state change.
    NotCurrent,
    /// Proof kind does not match the POI's completion mode. No state change.
    WrongProofKind,
    /// The team has no route or no active POI. No state change.
    NoActiveChallenge,
}

/// Resolve the team's next POI from its route cursor, or its terminal
/// state, and persist the new position.
///
/// - No route assigned: idle state (no current POI, not finished).
/// - Cursor at or past the end of the sorted step list: finished.
/// - Otherwise: point at the step's POI and get-or-create its progress
///   record.
///
/// Idempotent: a repeat call without an intervening completion reproduces
/// the same position and creates no second progress record. Callers
/// composing this with other writes run it inside their transaction.
pub fn advance_to_next_step(conn: &Connection, team_id: TeamId) -> Result<()> {
    let team = teams::get(conn, team_id)?;

    let Some(route_id) = team.route_id else {
        teams::set_position(conn, team_id, None, false)?;
        return Ok(());
    };

    let steps = routes::steps_for_route(conn, route_id)?;
    match steps.get(team.route_step_index as usize) {
        None => {
            // Route exhausted: terminal state.
            teams::set_position(conn, team_id, None, true)?;
            tracing::info!(team_id, "team finished its route");
        }
        Some(step) => {
            teams::set_position(conn, team_id, Some(step.poi_id), false)?;
            progress::get_or_create(conn, team_id, step.poi_id)?;
            tracing::debug!(team_id, poi_id = step.poi_id, "team advanced to next POI");
        }
    }
    Ok(())
}

/// Reveal the next hint for the team's current POI.
///
/// Hints are capped at [`MAX_HINTS`]; calls beyond the cap are no-ops.
/// Each revealed hint reduces the eventual award by the flat penalty.
pub fn request_hint(conn: &mut Connection, team_id: TeamId) -> Result<HintOutcome> {
    let tx = conn.transaction()?;

    let team = teams::get(&tx, team_id)?;
    let Some(poi_id) = team.current_poi_id else {
        return Ok(HintOutcome::NoActiveChallenge);
    };

    let record = progress::get_or_create(&tx, team_id, poi_id)?;
    if record.hints_used >= MAX_HINTS {
        return Ok(HintOutcome::CapReached);
    }

    progress::increment_hints(&tx, record.id)?;
    let hints_used = record.hints_used + 1;
    let poi = pois::get(&tx, poi_id)?;
    let hint = poi
        .hints
        .get(record.hints_used as usize)
        .and_then(|h| h.clone());

    tx.commit()?;
    tracing::info!(team_id, poi_id, hints_used, "hint revealed");
    Ok(HintOutcome::Revealed { hints_used, hint })
}

/// Validate a proof for a POI and, on acceptance, record the submission
/// and run the completion transition — all in one transaction.
///
/// The target POI must be the team's *current* POI: stale or duplicate
/// requests (e.g. a replayed submission after the step already advanced)
/// return [`SubmitOutcome::NotCurrent`] without touching any state, which
/// keeps the completion transition from ever double-firing.
pub fn submit_proof(
    conn: &mut Connection,
    team_id: TeamId,
    poi_id: PoiId,
    proof: Proof<'_>,
    now: Timestamp,
) -> Result<SubmitOutcome> {
    let tx = conn.transaction()?;

    let team = teams::get(&tx, team_id)?;
    match team.current_poi_id {
        None => return Ok(SubmitOutcome::NoActiveChallenge),
        Some(current) if current != poi_id => return Ok(SubmitOutcome::NotCurrent),
        Some(_) => {}
    }

    let poi = pois::get(&tx, poi_id)?;
    let (kind, content) = match (poi.completion_mode, proof) {
        (CompletionMode::Photo, Proof::Photo { reference }) => {
            // Auto-accepted; payload validity was enforced at the boundary.
            (SubmissionKind::Photo, reference.to_string())
        }
        (CompletionMode::Text, Proof::Text { answer }) => {
            if !grading::grade_text(answer, poi.answer_key.as_deref()) {
                return Ok(SubmitOutcome::Incorrect);
            }
            (SubmissionKind::Text, grading::normalize_answer(answer))
        }
        _ => return Ok(SubmitOutcome::WrongProofKind),
    };

    submissions::insert(&tx, team_id, poi_id, kind, &content, now)?;
    let awarded = complete_current_poi(&tx, team_id, &poi, now)?;
    let finished = teams::get(&tx, team_id)?.is_finished;
    tx.commit()?;

    Ok(SubmitOutcome::Accepted { awarded, finished })
}

/// The core scoring transition: mark the POI completed, award points
/// minus the hint penalty, move the cursor, and resolve the next POI.
///
/// Must run inside the caller's transaction, at most once per accepted
/// submission per POI — [`submit_proof`]'s current-POI guard is what
/// enforces that in practice.
pub fn complete_current_poi(
    conn: &Connection,
    team_id: TeamId,
    poi: &Poi,
    now: Timestamp,
) -> Result<u32> {
    let record = progress::get_or_create(conn, team_id, poi.id)?;
    progress::mark_completed(conn, record.id, now)?;

    let awarded = grading::award(poi.points, record.hints_used);
    teams::add_score_and_advance(conn, team_id, awarded)?;
    advance_to_next_step(conn, team_id)?;

    tracing::info!(
        team_id,
        poi_id = poi.id,
        awarded,
        hints_used = record.hints_used,
        "POI completed"
    );
    Ok(awarded)
}
