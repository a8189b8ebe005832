//! Answer normalization and scoring math.
//!
//! Text answers are graded case- and whitespace-insensitively: both sides
//! are trimmed and lowercased before an exact equality check. Awards are
//! the POI's point value minus a flat penalty per revealed hint, floored
//! at zero:
//!
//! ```text
//! awarded = max(0, points - hints_used * HINT_PENALTY_POINTS)
//! ```

use hunt_types::HINT_PENALTY_POINTS;

/// Normalize a submitted or stored answer: trim and lowercase.
pub fn normalize_answer(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Grade a text answer against the POI's answer key.
///
/// A missing or empty key accepts nothing.
pub fn grade_text(submitted: &str, answer_key: Option<&str>) -> bool {
    let key = match answer_key {
        Some(k) => normalize_answer(k),
        None => return false,
    };
    !key.is_empty() && normalize_answer(submitted) == key
}

/// Points awarded for completing a POI after `hints_used` hints.
pub fn award(points: u32, hints_used: u32) -> u32 {
    points.saturating_sub(hints_used.saturating_mul(HINT_PENALTY_POINTS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grading_trims_and_lowercases() {
        assert!(grade_text(" 1410 ", Some("1410")));
        assert!(grade_text("1410", Some("1410")));
        assert!(grade_text("1410\n", Some("1410")));
        assert!(grade_text("Nepomuk", Some("  nepomuk ")));
        assert!(!grade_text("1411", Some("1410")));
    }

    #[test]
    fn test_empty_key_accepts_nothing() {
        assert!(!grade_text("anything", None));
        assert!(!grade_text("", Some("")));
        assert!(!grade_text("", Some("   ")));
    }

    #[test]
    fn test_award_floors_at_zero() {
        assert_eq!(award(10, 0), 10);
        assert_eq!(award(10, 1), 8);
        assert_eq!(award(10, 3), 4);
        assert_eq!(award(4, 3), 0);
        assert_eq!(award(0, 2), 0);
    }
}
