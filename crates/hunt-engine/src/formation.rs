//! One-shot team formation.
//!
//! Buckets unassigned participants into new teams of about
//! [`TEAM_CHUNK_SIZE`] members and assigns each team a route round-robin.
//! Not idempotent by design: it only ever targets users with no team, so
//! rerunning after new participants register forms teams from just the
//! newcomers.

use hunt_db::queries::{routes, teams, users};
use hunt_types::{UserId, MIN_TAIL_TEAM_SIZE, TEAM_CHUNK_SIZE};
use rand::seq::SliceRandom;
use rand::Rng;
use rusqlite::Connection;

use crate::progression;
use crate::Result;

/// Outcome of a formation run. Precondition misses leave nothing mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormationOutcome {
    /// Teams were created and seeded with their first POI.
    Created { teams: u32 },
    /// No unassigned participants exist.
    NoEligibleUsers,
    /// No routes exist yet; create a route and its steps first.
    NoRoutes,
}

/// Shuffle users uniformly and partition them into groups.
///
/// Groups are [`TEAM_CHUNK_SIZE`] wide; a trailing group smaller than
/// [`MIN_TAIL_TEAM_SIZE`] merges into its predecessor so nobody ends up
/// on an orphan team of one or two. Pure over the rng, so tests seed it.
pub fn bucket_members<R: Rng + ?Sized>(mut members: Vec<UserId>, rng: &mut R) -> Vec<Vec<UserId>> {
    members.shuffle(rng);

    let mut groups: Vec<Vec<UserId>> = members
        .chunks(TEAM_CHUNK_SIZE)
        .map(<[UserId]>::to_vec)
        .collect();

    if groups.len() > 1 && groups.last().is_some_and(|g| g.len() < MIN_TAIL_TEAM_SIZE) {
        if let Some(tail) = groups.pop() {
            if let Some(prev) = groups.last_mut() {
                prev.extend(tail);
            }
        }
    }

    groups
}

/// Form teams from all unassigned non-admin users.
///
/// Runs as one transaction: team names continue the running team count,
/// routes are assigned round-robin over the id-sorted route list, members
/// are attached, and each new team's first POI is seeded via the
/// progression engine. Either every group lands or none does.
pub fn form_teams<R: Rng + ?Sized>(conn: &mut Connection, rng: &mut R) -> Result<FormationOutcome> {
    let tx = conn.transaction()?;

    let unassigned = users::unassigned_participants(&tx)?;
    if unassigned.is_empty() {
        return Ok(FormationOutcome::NoEligibleUsers);
    }
    let route_list = routes::list(&tx)?;
    if route_list.is_empty() {
        return Ok(FormationOutcome::NoRoutes);
    }

    let member_ids: Vec<UserId> = unassigned.iter().map(|u| u.id).collect();
    let groups = bucket_members(member_ids, rng);
    let existing = teams::count(&tx)?;

    for (i, (group, route)) in groups.iter().zip(route_list.iter().cycle()).enumerate() {
        let name = format!("Team {}", existing as usize + i + 1);
        let team_id = teams::insert(&tx, &name, Some(route.id))?;
        for user_id in group {
            users::set_team(&tx, *user_id, team_id)?;
        }
        progression::advance_to_next_step(&tx, team_id)?;
    }

    tx.commit()?;
    let created = groups.len() as u32;
    tracing::info!(teams = created, "formed new teams");
    Ok(FormationOutcome::Created { teams: created })
}
