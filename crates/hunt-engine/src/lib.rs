//! # hunt-engine
//!
//! The progression and scoring core of the hunt workspace.
//!
//! Each team walks an ordered route of POIs; the engine decides the
//! team's next POI, grades proofs, computes score deltas, and advances
//! state. Everything around it (login, rendering, photo bytes, admin
//! forms) is thin I/O glue in other crates.
//!
//! ## Modules
//!
//! - [`progression`] — per-team state transitions: advance, hint, submit,
//!   complete.
//! - [`formation`] — one-shot bucketing of unassigned users into teams.
//! - [`grading`] — answer normalization and penalty math.
//! - [`views`] — read-only snapshots for the presentation boundary.
//!
//! ## Transaction discipline
//!
//! Mutating operations take `&mut Connection` and run as a single SQLite
//! transaction, so a team's read-modify-write of score, step cursor,
//! current POI, and progress ledger is one logical unit. Callers that
//! serialize connection access (the daemon holds the connection behind a
//! `tokio::sync::Mutex`) get per-team serializability for free.
//! Precondition misses (no active POI, hint cap, stale submission target)
//! are returned as outcome values, not errors.

pub mod formation;
pub mod grading;
pub mod progression;
pub mod views;

/// Engine error types. Domain preconditions are outcome enums in the
/// individual modules; these are the genuine failures.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("database error: {0}")]
    Db(#[from] hunt_db::DbError),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
