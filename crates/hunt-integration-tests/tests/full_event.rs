//! Integration test: a full event from empty database to finished team.
//!
//! Exercises the complete organizer -> formation -> play pipeline:
//! 1. Create POIs (one text, one photo) and a route
//! 2. Register participants and form teams
//! 3. Play the route: hints, wrong answers, accepted proofs
//! 4. Verify scoring (points minus hint penalty), completion history,
//!    and the final standings

use hunt_db::queries::{pois, progress, routes, submissions, teams, users};
use hunt_engine::formation::{self, FormationOutcome};
use hunt_engine::progression::{self, HintOutcome, Proof, SubmitOutcome};
use hunt_engine::views;
use hunt_types::catalog::{CompletionMode, Difficulty};
use hunt_types::views::TeamStatus;
use hunt_types::HINT_PENALTY_POINTS;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Simulated timestamp for deterministic testing.
const TEST_TIMESTAMP: i64 = 1_700_000_000;

fn text_poi(title: &str, answer: &str, points: u32) -> pois::NewPoi {
    pois::NewPoi {
        title: title.to_string(),
        riddle: format!("riddle for {title}"),
        hints: [
            Some("first hint".to_string()),
            Some("second hint".to_string()),
            None,
        ],
        completion_mode: CompletionMode::Text,
        answer_key: Some(answer.to_string()),
        points,
        difficulty: Difficulty::Medium,
    }
}

fn photo_poi(title: &str, points: u32) -> pois::NewPoi {
    pois::NewPoi {
        title: title.to_string(),
        riddle: format!("riddle for {title}"),
        hints: [None, None, None],
        completion_mode: CompletionMode::Photo,
        answer_key: None,
        points,
        difficulty: Difficulty::Easy,
    }
}

#[test]
fn full_event_from_setup_to_finish() {
    let mut conn = hunt_db::open_memory().expect("open db");

    // ---- Organizer setup: two POIs on one route ----
    let tower = pois::insert(&conn, &text_poi("Tower", "1410", 10)).expect("poi");
    let bridge = pois::insert(&conn, &photo_poi("Bridge", 12)).expect("poi");

    let route = routes::insert(&conn, "Route A").expect("route");
    routes::insert_step(&conn, route, tower, 0).expect("step");
    routes::insert_step(&conn, route, bridge, 1).expect("step");

    for (code, name) in [("P1", "Alice"), ("P2", "Bob"), ("P3", "Carol")] {
        users::insert(&conn, code, Some(name), false).expect("user");
    }

    // ---- Formation: 3 participants -> one team on the route ----
    let mut rng = StdRng::seed_from_u64(42);
    let outcome = formation::form_teams(&mut conn, &mut rng).expect("form");
    assert_eq!(outcome, FormationOutcome::Created { teams: 1 });

    let team = &teams::list_by_score_desc(&conn).expect("teams")[0];
    let team_id = team.id;
    assert_eq!(team.current_poi_id, Some(tower));
    assert_eq!(team.score, 0);
    assert!(!team.is_finished);

    // ---- Step 1: two hints, one wrong answer, then the right one ----
    for expected in 1..=2u32 {
        let outcome = progression::request_hint(&mut conn, team_id).expect("hint");
        assert!(matches!(
            outcome,
            HintOutcome::Revealed { hints_used, .. } if hints_used == expected
        ));
    }

    let wrong = progression::submit_proof(
        &mut conn,
        team_id,
        tower,
        Proof::Text { answer: "1492" },
        TEST_TIMESTAMP,
    )
    .expect("submit");
    assert_eq!(wrong, SubmitOutcome::Incorrect);

    // Answer matching is case- and whitespace-insensitive.
    let right = progression::submit_proof(
        &mut conn,
        team_id,
        tower,
        Proof::Text { answer: "  1410 " },
        TEST_TIMESTAMP + 60,
    )
    .expect("submit");
    let tower_award = 10 - 2 * HINT_PENALTY_POINTS;
    assert_eq!(
        right,
        SubmitOutcome::Accepted {
            awarded: tower_award,
            finished: false
        }
    );

    let team = teams::get(&conn, team_id).expect("team");
    assert_eq!(team.score, tower_award);
    assert_eq!(team.current_poi_id, Some(bridge));

    // ---- Step 2: photo proof with no hints, full points, finishes ----
    let reference = format!("team{team_id}_poi{bridge}_{TEST_TIMESTAMP}.jpg");
    let outcome = progression::submit_proof(
        &mut conn,
        team_id,
        bridge,
        Proof::Photo {
            reference: &reference,
        },
        TEST_TIMESTAMP + 120,
    )
    .expect("submit");
    assert_eq!(
        outcome,
        SubmitOutcome::Accepted {
            awarded: 12,
            finished: true
        }
    );

    let team = teams::get(&conn, team_id).expect("team");
    assert!(team.is_finished);
    assert_eq!(team.current_poi_id, None);
    assert_eq!(team.score, tower_award + 12);

    // ---- History and views ----
    let completed = progress::completed_for_team(&conn, team_id).expect("history");
    assert_eq!(completed.len(), 2);
    // Newest first.
    assert_eq!(completed[0].poi_id, bridge);
    assert_eq!(completed[1].poi_id, tower);
    assert_eq!(completed[1].hints_used, 2);

    assert!(views::current_challenge(&conn, team_id)
        .expect("challenge")
        .is_none());

    let summary = views::team_summary(&conn, team_id).expect("summary");
    assert_eq!(summary.members.len(), 3);
    assert_eq!(summary.route_name.as_deref(), Some("Route A"));
    assert!(summary.is_finished);

    let standings = views::standings(&conn).expect("standings");
    assert_eq!(standings.len(), 1);
    assert_eq!(standings[0].score, tower_award + 12);
    assert_eq!(standings[0].status, TeamStatus::Finished);

    // Both accepted submissions were logged; photo feed shows only photos.
    assert_eq!(
        submissions::count_for_pair(&conn, team_id, tower).expect("count"),
        1
    );
    let photos = submissions::recent_photos(&conn, 10).expect("photos");
    assert_eq!(photos.len(), 1);
    assert_eq!(photos[0].content, reference);
}

#[test]
fn hints_never_drive_award_below_zero() {
    let mut conn = hunt_db::open_memory().expect("open db");

    // 4-point POI, three hints used: 4 - 6 floors at 0.
    let cheap = pois::insert(&conn, &text_poi("Cheap", "yes", 4)).expect("poi");
    let route = routes::insert(&conn, "Route").expect("route");
    routes::insert_step(&conn, route, cheap, 0).expect("step");
    for code in ["A1", "A2", "A3"] {
        users::insert(&conn, code, None, false).expect("user");
    }

    let mut rng = StdRng::seed_from_u64(1);
    formation::form_teams(&mut conn, &mut rng).expect("form");
    let team_id = teams::list_by_score_desc(&conn).expect("teams")[0].id;

    for _ in 0..3 {
        let outcome = progression::request_hint(&mut conn, team_id).expect("hint");
        assert!(matches!(outcome, HintOutcome::Revealed { .. }));
    }
    // Fourth request hits the cap.
    assert_eq!(
        progression::request_hint(&mut conn, team_id).expect("hint"),
        HintOutcome::CapReached
    );

    let outcome = progression::submit_proof(
        &mut conn,
        team_id,
        cheap,
        Proof::Text { answer: "YES" },
        TEST_TIMESTAMP,
    )
    .expect("submit");
    assert_eq!(
        outcome,
        SubmitOutcome::Accepted {
            awarded: 0,
            finished: true
        }
    );
    assert_eq!(teams::get(&conn, team_id).expect("team").score, 0);
}
