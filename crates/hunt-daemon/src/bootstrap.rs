//! First-run provisioning: organizer account and optional demo content.

use hunt_db::queries::{pois, routes, users};
use hunt_db::Result;
use hunt_types::catalog::{CompletionMode, Difficulty};
use rusqlite::Connection;
use tracing::info;

use crate::config::DaemonConfig;

/// Idempotent startup provisioning. Ensures the organizer login exists
/// and, when enabled, seeds a small demo event into an empty catalog.
pub fn run(conn: &Connection, config: &DaemonConfig) -> Result<()> {
    ensure_admin(conn, &config.event.admin_code)?;
    if config.event.seed_demo_data {
        seed_demo(conn)?;
    }
    Ok(())
}

fn ensure_admin(conn: &Connection, admin_code: &str) -> Result<()> {
    let code = admin_code.trim().to_uppercase();
    if users::code_exists(conn, &code)? {
        return Ok(());
    }
    let user_id = users::insert(conn, &code, Some("Organizer"), true)?;
    info!(user_id, code = %code, "organizer account created");
    Ok(())
}

/// Three POIs, five players, and two mirrored routes. Skipped entirely
/// once any POI exists, so a configured event is never touched.
fn seed_demo(conn: &Connection) -> Result<()> {
    if pois::count(conn)? > 0 {
        return Ok(());
    }

    let clock_tower = pois::insert(
        conn,
        &pois::NewPoi {
            title: "Old Town Clock Tower".to_string(),
            riddle: "I chime the hours above the square. In which year was I first set running?".to_string(),
            hints: [
                Some("It predates Columbus crossing the Atlantic.".to_string()),
                Some("Early fifteenth century.".to_string()),
                Some("Fourteen hundred and ten.".to_string()),
            ],
            completion_mode: CompletionMode::Text,
            answer_key: Some("1410".to_string()),
            points: 10,
            difficulty: Difficulty::Medium,
        },
    )?;

    let dancing_house = pois::insert(
        conn,
        &pois::NewPoi {
            title: "Dancing House".to_string(),
            riddle: "Find the building that looks like two dancers mid-spin and capture your whole team in front of it.".to_string(),
            hints: [
                Some("It stands on a river embankment.".to_string()),
                Some("Locals nickname it after a famous film duo.".to_string()),
                None,
            ],
            completion_mode: CompletionMode::Photo,
            answer_key: None,
            points: 12,
            difficulty: Difficulty::Hard,
        },
    )?;

    let charles_bridge = pois::insert(
        conn,
        &pois::NewPoi {
            title: "Charles Bridge".to_string(),
            riddle: "Take a team photo with the oldest stone bridge statue you can find.".to_string(),
            hints: [
                Some("Look for the saint with the five stars.".to_string()),
                None,
                None,
            ],
            completion_mode: CompletionMode::Photo,
            answer_key: None,
            points: 10,
            difficulty: Difficulty::Easy,
        },
    )?;

    let players = [
        ("PLAYER1", "Alice"),
        ("PLAYER2", "Bob"),
        ("PLAYER3", "Charlie"),
        ("PLAYER4", "David"),
        ("PLAYER5", "Eve"),
    ];
    for (code, name) in players {
        if !users::code_exists(conn, code)? {
            users::insert(conn, code, Some(name), false)?;
        }
    }

    // Two routes over the same POIs, walked in opposite directions.
    let route_a = routes::insert(conn, "Route A")?;
    routes::insert_step(conn, route_a, clock_tower, 0)?;
    routes::insert_step(conn, route_a, dancing_house, 1)?;
    routes::insert_step(conn, route_a, charles_bridge, 2)?;

    let route_b = routes::insert(conn, "Route B")?;
    routes::insert_step(conn, route_b, charles_bridge, 0)?;
    routes::insert_step(conn, route_b, dancing_house, 1)?;
    routes::insert_step(conn, route_b, clock_tower, 2)?;

    info!("demo event seeded: 3 POIs, 5 players, 2 routes");
    Ok(())
}
