//! Integration test: team formation against a live database.
//!
//! The pure bucketing rules have unit tests next to the engine; these
//! cover what formation does to persistent state — route round-robin,
//! member attachment, first-POI seeding, and re-runs for late joiners.

use hunt_db::queries::{pois, routes, teams, users};
use hunt_engine::formation::{self, FormationOutcome};
use hunt_types::catalog::{CompletionMode, Difficulty};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rusqlite::Connection;

fn simple_poi(conn: &Connection, title: &str) -> i64 {
    pois::insert(
        conn,
        &pois::NewPoi {
            title: title.to_string(),
            riddle: "find it".to_string(),
            hints: [None, None, None],
            completion_mode: CompletionMode::Photo,
            answer_key: None,
            points: 10,
            difficulty: Difficulty::Easy,
        },
    )
    .expect("poi")
}

/// Two routes whose first steps differ, so route assignment is visible
/// through each team's seeded current POI.
fn two_routes(conn: &Connection) -> (i64, i64) {
    let first = simple_poi(conn, "First");
    let second = simple_poi(conn, "Second");

    let route_a = routes::insert(conn, "Route A").expect("route");
    routes::insert_step(conn, route_a, first, 0).expect("step");
    routes::insert_step(conn, route_a, second, 1).expect("step");

    let route_b = routes::insert(conn, "Route B").expect("route");
    routes::insert_step(conn, route_b, second, 0).expect("step");
    routes::insert_step(conn, route_b, first, 1).expect("step");

    (first, second)
}

#[test]
fn ten_players_two_routes_round_robin() {
    let mut conn = hunt_db::open_memory().expect("open db");
    let (first, second) = two_routes(&conn);

    for i in 1..=10 {
        users::insert(&conn, &format!("P{i}"), None, false).expect("user");
    }
    // Admins never get drafted.
    users::insert(&conn, "ADMIN", Some("Organizer"), true).expect("admin");

    let mut rng = StdRng::seed_from_u64(7);
    let outcome = formation::form_teams(&mut conn, &mut rng).expect("form");
    assert_eq!(outcome, FormationOutcome::Created { teams: 2 });

    // 10 players split 4 + 6 (tail of 2 merges back).
    let team_list = teams::list_by_score_desc(&conn).expect("teams");
    assert_eq!(team_list.len(), 2);
    let mut sizes: Vec<usize> = team_list
        .iter()
        .map(|t| users::members_of(&conn, t.id).expect("members").len())
        .collect();
    sizes.sort_unstable();
    assert_eq!(sizes, vec![4, 6]);

    // Names continue the running count; routes alternate A, B.
    let mut names: Vec<&str> = team_list.iter().map(|t| t.name.as_str()).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["Team 1", "Team 2"]);

    let mut seeded: Vec<Option<i64>> =
        team_list.iter().map(|t| t.current_poi_id).collect();
    seeded.sort_unstable();
    assert_eq!(seeded, vec![Some(first), Some(second)]);

    let admin = users::find_by_code(&conn, "ADMIN")
        .expect("query")
        .expect("admin");
    assert_eq!(admin.team_id, None);
    assert_eq!(users::unassigned_participants(&conn).expect("query").len(), 0);
}

#[test]
fn second_run_drafts_only_late_joiners() {
    let mut conn = hunt_db::open_memory().expect("open db");
    two_routes(&conn);

    for i in 1..=4 {
        users::insert(&conn, &format!("P{i}"), None, false).expect("user");
    }
    let mut rng = StdRng::seed_from_u64(7);
    assert_eq!(
        formation::form_teams(&mut conn, &mut rng).expect("form"),
        FormationOutcome::Created { teams: 1 }
    );

    // Nothing to do until someone new registers.
    assert_eq!(
        formation::form_teams(&mut conn, &mut rng).expect("form"),
        FormationOutcome::NoEligibleUsers
    );

    for i in 5..=7 {
        users::insert(&conn, &format!("P{i}"), None, false).expect("user");
    }
    assert_eq!(
        formation::form_teams(&mut conn, &mut rng).expect("form"),
        FormationOutcome::Created { teams: 1 }
    );

    let team_list = teams::list_by_score_desc(&conn).expect("teams");
    assert_eq!(team_list.len(), 2);
    let names: Vec<&str> = {
        let mut n: Vec<&str> = team_list.iter().map(|t| t.name.as_str()).collect();
        n.sort_unstable();
        n
    };
    assert_eq!(names, vec!["Team 1", "Team 2"]);
}

#[test]
fn formation_without_routes_mutates_nothing() {
    let mut conn = hunt_db::open_memory().expect("open db");
    users::insert(&conn, "P1", None, false).expect("user");

    let mut rng = StdRng::seed_from_u64(7);
    assert_eq!(
        formation::form_teams(&mut conn, &mut rng).expect("form"),
        FormationOutcome::NoRoutes
    );
    assert_eq!(teams::count(&conn).expect("count"), 0);
    assert_eq!(users::unassigned_participants(&conn).expect("query").len(), 1);
}
