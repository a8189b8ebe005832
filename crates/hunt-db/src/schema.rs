//! SQL schema definitions.

/// Complete schema for hunt v1 database.
pub const SCHEMA_V1: &str = r#"
-- ============================================================
-- Participants & Teams
-- ============================================================

CREATE TABLE IF NOT EXISTS teams (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    score INTEGER NOT NULL DEFAULT 0 CHECK (score >= 0),
    route_id INTEGER REFERENCES routes(id),
    route_step_index INTEGER NOT NULL DEFAULT 0,
    current_poi_id INTEGER REFERENCES pois(id),
    is_finished INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY,
    code TEXT NOT NULL UNIQUE,
    name TEXT,
    is_admin INTEGER NOT NULL DEFAULT 0,
    team_id INTEGER REFERENCES teams(id)
);

CREATE INDEX IF NOT EXISTS idx_users_team ON users(team_id);

-- ============================================================
-- Catalog: POIs, Routes, Route Steps
-- ============================================================

CREATE TABLE IF NOT EXISTS pois (
    id INTEGER PRIMARY KEY,
    title TEXT NOT NULL,
    riddle TEXT NOT NULL,
    hint_1 TEXT,
    hint_2 TEXT,
    hint_3 TEXT,
    completion_mode TEXT NOT NULL DEFAULT 'photo',
    answer_key TEXT,
    points INTEGER NOT NULL DEFAULT 10,
    difficulty TEXT NOT NULL DEFAULT 'medium'
);

CREATE TABLE IF NOT EXISTS routes (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS route_steps (
    id INTEGER PRIMARY KEY,
    route_id INTEGER NOT NULL REFERENCES routes(id),
    poi_id INTEGER NOT NULL REFERENCES pois(id),
    step_index INTEGER NOT NULL,
    UNIQUE (route_id, step_index)
);

CREATE INDEX IF NOT EXISTS idx_steps_route ON route_steps(route_id, step_index);

-- ============================================================
-- Progress Ledger & Submission Log
-- ============================================================

CREATE TABLE IF NOT EXISTS team_poi_progress (
    id INTEGER PRIMARY KEY,
    team_id INTEGER NOT NULL REFERENCES teams(id),
    poi_id INTEGER NOT NULL REFERENCES pois(id),
    status TEXT NOT NULL DEFAULT 'assigned',
    hints_used INTEGER NOT NULL DEFAULT 0,
    completed_at INTEGER,
    UNIQUE (team_id, poi_id)
);

CREATE INDEX IF NOT EXISTS idx_progress_team ON team_poi_progress(team_id, status);

CREATE TABLE IF NOT EXISTS submissions (
    id INTEGER PRIMARY KEY,
    team_id INTEGER NOT NULL REFERENCES teams(id),
    poi_id INTEGER NOT NULL REFERENCES pois(id),
    kind TEXT NOT NULL,
    content TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'approved',
    created_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_submissions_feed ON submissions(kind, created_at DESC);
CREATE INDEX IF NOT EXISTS idx_submissions_team ON submissions(team_id);
"#;
