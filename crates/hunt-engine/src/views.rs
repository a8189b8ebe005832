//! Read-only view assembly for the presentation boundary.
//!
//! These functions return value snapshots; nothing here mutates state.

use hunt_db::queries::{pois, progress, routes, teams, users};
use hunt_types::views::{CurrentChallenge, ProgressItem, StandingsRow, TeamStatus, TeamSummary};
use hunt_types::TeamId;
use rusqlite::Connection;

use crate::Result;

/// Header summary for a team's dashboard.
pub fn team_summary(conn: &Connection, team_id: TeamId) -> Result<TeamSummary> {
    let team = teams::get(conn, team_id)?;
    let members = users::members_of(conn, team_id)?
        .iter()
        .map(|u| u.display_name().to_string())
        .collect();
    let route_name = match team.route_id {
        Some(route_id) => Some(routes::get(conn, route_id)?.name),
        None => None,
    };

    Ok(TeamSummary {
        team_id: team.id,
        name: team.name,
        members,
        route_name,
        score: team.score,
        is_finished: team.is_finished,
    })
}

/// The team's active challenge, exposing only the hints unlocked so far.
///
/// Returns None when the team is waiting (no route) or finished.
pub fn current_challenge(conn: &Connection, team_id: TeamId) -> Result<Option<CurrentChallenge>> {
    let team = teams::get(conn, team_id)?;
    let Some(poi_id) = team.current_poi_id else {
        return Ok(None);
    };

    let poi = pois::get(conn, poi_id)?;
    let hints_used = progress::get(conn, team_id, poi_id)?
        .map_or(0, |p| p.hints_used);

    let unlocked_hints = poi
        .hints
        .iter()
        .take(hints_used as usize)
        .filter_map(|h| h.clone())
        .collect();

    Ok(Some(CurrentChallenge {
        poi_id,
        riddle: poi.riddle,
        difficulty: poi.difficulty,
        completion_mode: poi.completion_mode,
        points: poi.points,
        hints_used,
        unlocked_hints,
    }))
}

/// A team's completed history, newest completion first.
pub fn completed_progress(conn: &Connection, team_id: TeamId) -> Result<Vec<ProgressItem>> {
    let records = progress::completed_for_team(conn, team_id)?;
    let mut items = Vec::with_capacity(records.len());
    for record in records {
        let poi = pois::get(conn, record.poi_id)?;
        items.push(ProgressItem {
            poi_id: record.poi_id,
            poi_title: poi.title,
            hints_used: record.hints_used,
            completed_at: record.completed_at,
        });
    }
    Ok(items)
}

/// All teams ranked by score descending.
pub fn standings(conn: &Connection) -> Result<Vec<StandingsRow>> {
    let team_list = teams::list_by_score_desc(conn)?;
    let mut rows = Vec::with_capacity(team_list.len());
    for team in team_list {
        let route_name = match team.route_id {
            Some(route_id) => Some(routes::get(conn, route_id)?.name),
            None => None,
        };
        let current_poi_title = match team.current_poi_id {
            Some(poi_id) => Some(pois::get(conn, poi_id)?.title),
            None => None,
        };
        let status = if team.is_finished {
            TeamStatus::Finished
        } else if team.current_poi_id.is_some() {
            TeamStatus::Active
        } else {
            TeamStatus::Waiting
        };
        let member_count = users::members_of(conn, team.id)?.len() as u32;

        rows.push(StandingsRow {
            team_id: team.id,
            name: team.name,
            member_count,
            score: team.score,
            route_name,
            current_poi_title,
            status,
        });
    }
    Ok(rows)
}
