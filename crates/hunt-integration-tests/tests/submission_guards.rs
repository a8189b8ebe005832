//! Integration test: stale, duplicate, and mismatched submissions.
//!
//! A proof is only ever accepted for the team's current POI. Replays of
//! an already-completed step, submissions for a step further down the
//! route, and proofs of the wrong kind must all leave score, cursor, and
//! the submission log untouched.

use hunt_db::queries::{pois, routes, submissions, teams, users};
use hunt_engine::formation;
use hunt_engine::progression::{self, Proof, SubmitOutcome};
use hunt_types::catalog::{CompletionMode, Difficulty};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rusqlite::Connection;

const TS: i64 = 1_700_000_000;

struct Fixture {
    team_id: i64,
    text_poi: i64,
    photo_poi: i64,
}

/// One team, one route: text POI ("42", 10 pts) then photo POI (8 pts).
fn fixture(conn: &mut Connection) -> Fixture {
    let text_poi = pois::insert(
        conn,
        &pois::NewPoi {
            title: "Text stop".to_string(),
            riddle: "answer me".to_string(),
            hints: [None, None, None],
            completion_mode: CompletionMode::Text,
            answer_key: Some("42".to_string()),
            points: 10,
            difficulty: Difficulty::Medium,
        },
    )
    .expect("poi");
    let photo_poi = pois::insert(
        conn,
        &pois::NewPoi {
            title: "Photo stop".to_string(),
            riddle: "picture it".to_string(),
            hints: [None, None, None],
            completion_mode: CompletionMode::Photo,
            answer_key: None,
            points: 8,
            difficulty: Difficulty::Easy,
        },
    )
    .expect("poi");

    let route = routes::insert(conn, "Route").expect("route");
    routes::insert_step(conn, route, text_poi, 0).expect("step");
    routes::insert_step(conn, route, photo_poi, 1).expect("step");

    for code in ["P1", "P2", "P3"] {
        users::insert(conn, code, None, false).expect("user");
    }
    let mut rng = StdRng::seed_from_u64(3);
    formation::form_teams(conn, &mut rng).expect("form");
    let team_id = teams::list_by_score_desc(conn).expect("teams")[0].id;

    Fixture {
        team_id,
        text_poi,
        photo_poi,
    }
}

#[test]
fn replay_after_advance_is_rejected_without_mutation() {
    let mut conn = hunt_db::open_memory().expect("open db");
    let f = fixture(&mut conn);

    let first = progression::submit_proof(
        &mut conn,
        f.team_id,
        f.text_poi,
        Proof::Text { answer: "42" },
        TS,
    )
    .expect("submit");
    assert_eq!(
        first,
        SubmitOutcome::Accepted {
            awarded: 10,
            finished: false
        }
    );

    // Same request again: the cursor has moved on.
    let replay = progression::submit_proof(
        &mut conn,
        f.team_id,
        f.text_poi,
        Proof::Text { answer: "42" },
        TS + 5,
    )
    .expect("submit");
    assert_eq!(replay, SubmitOutcome::NotCurrent);

    let team = teams::get(&conn, f.team_id).expect("team");
    assert_eq!(team.score, 10);
    assert_eq!(team.current_poi_id, Some(f.photo_poi));
    assert_eq!(
        submissions::count_for_pair(&conn, f.team_id, f.text_poi).expect("count"),
        1
    );
}

#[test]
fn submission_for_future_step_is_rejected() {
    let mut conn = hunt_db::open_memory().expect("open db");
    let f = fixture(&mut conn);

    // Still on the text POI; try to skip ahead to the photo stop.
    let outcome = progression::submit_proof(
        &mut conn,
        f.team_id,
        f.photo_poi,
        Proof::Photo { reference: "x.jpg" },
        TS,
    )
    .expect("submit");
    assert_eq!(outcome, SubmitOutcome::NotCurrent);

    let team = teams::get(&conn, f.team_id).expect("team");
    assert_eq!(team.score, 0);
    assert_eq!(team.current_poi_id, Some(f.text_poi));
    assert_eq!(
        submissions::count_for_pair(&conn, f.team_id, f.photo_poi).expect("count"),
        0
    );
}

#[test]
fn wrong_proof_kind_is_rejected() {
    let mut conn = hunt_db::open_memory().expect("open db");
    let f = fixture(&mut conn);

    // Photo proof against the current text POI.
    let outcome = progression::submit_proof(
        &mut conn,
        f.team_id,
        f.text_poi,
        Proof::Photo { reference: "x.jpg" },
        TS,
    )
    .expect("submit");
    assert_eq!(outcome, SubmitOutcome::WrongProofKind);
    assert_eq!(teams::get(&conn, f.team_id).expect("team").score, 0);
}

#[test]
fn finished_team_gets_no_active_challenge() {
    let mut conn = hunt_db::open_memory().expect("open db");
    let f = fixture(&mut conn);

    progression::submit_proof(
        &mut conn,
        f.team_id,
        f.text_poi,
        Proof::Text { answer: "42" },
        TS,
    )
    .expect("submit");
    progression::submit_proof(
        &mut conn,
        f.team_id,
        f.photo_poi,
        Proof::Photo {
            reference: "done.jpg",
        },
        TS + 10,
    )
    .expect("submit");
    assert!(teams::get(&conn, f.team_id).expect("team").is_finished);

    let outcome = progression::submit_proof(
        &mut conn,
        f.team_id,
        f.photo_poi,
        Proof::Photo {
            reference: "late.jpg",
        },
        TS + 20,
    )
    .expect("submit");
    assert_eq!(outcome, SubmitOutcome::NoActiveChallenge);
    assert_eq!(teams::get(&conn, f.team_id).expect("team").score, 18);
}
