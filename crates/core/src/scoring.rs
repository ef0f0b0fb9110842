//! Scoring module - line-clear points, level and gravity progression
//!
//! - Clearing 1/2/3/4 rows with one lock awards 100/300/500/800 points, with no level multiplier.
//! - Level is 1 + lines / 10.
//! - Gravity starts at 900ms per row and speeds up by 70ms per level, down to 200ms.

use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_FLOOR_MS, DROP_INTERVAL_STEP_MS, LINES_PER_LEVEL, LINE_SCORES,
};

/// Points for clearing `rows` rows with a single lock
///
/// More than four rows can only come from a hand-built board; they score as four.
pub fn line_clear_score(rows: usize) -> u32 {
    LINE_SCORES[rows.min(LINE_SCORES.len() - 1)]
}

/// Level for a total number of cleared lines (levels start at 1)
pub fn level_for_lines(total_lines: u32) -> u32 {
    1 + total_lines / LINES_PER_LEVEL
}

/// Gravity interval for a level, in milliseconds
pub fn drop_interval_ms(level: u32) -> u32 {
    let speedup = level.saturating_sub(1).saturating_mul(DROP_INTERVAL_STEP_MS);
    BASE_DROP_MS
        .saturating_sub(speedup)
        .max(DROP_INTERVAL_FLOOR_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_clear_table() {
        assert_eq!(line_clear_score(0), 0);
        assert_eq!(line_clear_score(1), 100);
        assert_eq!(line_clear_score(2), 300);
        assert_eq!(line_clear_score(3), 500);
        assert_eq!(line_clear_score(4), 800);
        assert_eq!(line_clear_score(6), 800);
    }

    #[test]
    fn test_level_for_lines() {
        assert_eq!(level_for_lines(0), 1);
        assert_eq!(level_for_lines(9), 1);
        assert_eq!(level_for_lines(10), 2);
        assert_eq!(level_for_lines(25), 3);
        assert_eq!(level_for_lines(100), 11);
    }

    #[test]
    fn test_drop_interval() {
        assert_eq!(drop_interval_ms(1), 900);
        assert_eq!(drop_interval_ms(2), 830);
        assert_eq!(drop_interval_ms(3), 760);
        assert_eq!(drop_interval_ms(11), 200);
        assert_eq!(drop_interval_ms(50), 200);
    }

    #[test]
    fn test_drop_interval_extremes() {
        assert_eq!(drop_interval_ms(0), 900);
        assert_eq!(drop_interval_ms(u32::MAX), 200);
    }
}
