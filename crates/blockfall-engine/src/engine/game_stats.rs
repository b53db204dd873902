use serde::{Deserialize, Serialize};

/// Points awarded by the simulation.
///
/// `line_clear` is indexed by the number of rows removed in one pass:
///
/// - 0 lines: 0 points
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4 lines: 800 points
///
/// Drop points are awarded per row travelled by a soft or hard drop and are
/// off by default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringRule {
    pub line_clear: [usize; 5],
    pub soft_drop_per_row: usize,
    pub hard_drop_per_row: usize,
}

impl Default for ScoringRule {
    fn default() -> Self {
        Self {
            line_clear: [0, 100, 300, 500, 800],
            soft_drop_per_row: 0,
            hard_drop_per_row: 0,
        }
    }
}

impl ScoringRule {
    /// Points for clearing `lines` rows at once.
    ///
    /// Standard play clears at most 4 rows per lock. Larger counts can only
    /// come from hand-built boards and score a quad for every 4 rows plus the
    /// remainder.
    #[must_use]
    pub fn line_clear_points(&self, lines: usize) -> usize {
        let quads = lines / 4;
        let rest = lines % 4;
        let rest_points = if quads > 0 && rest == 0 {
            0
        } else {
            self.line_clear[rest]
        };
        quads
            .saturating_mul(self.line_clear[4])
            .saturating_add(rest_points)
    }
}

/// Game statistics tracking score, lines cleared, and piece count.
///
/// - **Score**: points earned from line clears and drops
/// - **Level**: derived from total lines cleared (1 level per 10 lines)
/// - **Completed pieces**: total number of pieces locked
/// - **Line clear distribution**: count of 0 to 4 line clears per lock
///
/// No combo, back-to-back or T-spin bonuses are awarded.
///
/// # Example
///
/// ```
/// use blockfall_engine::{GameStats, ScoringRule};
///
/// let mut stats = GameStats::new(ScoringRule::default());
/// stats.complete_piece_drop(4);
///
/// assert_eq!(stats.score(), 800);
/// assert_eq!(stats.total_cleared_lines(), 4);
/// assert_eq!(stats.line_cleared_counter()[4], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    rule: ScoringRule,
    score: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new(ScoringRule::default())
    }
}

impl GameStats {
    /// Creates a new tracker with all counters at zero.
    #[must_use]
    pub const fn new(rule: ScoringRule) -> Self {
        Self {
            rule,
            score: 0,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn rule(&self) -> &ScoringRule {
        &self.rule
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Returns the current level: one level per 10 cleared lines.
    #[must_use]
    pub const fn level(&self) -> usize {
        self.total_cleared_lines / 10
    }

    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of line clears by count.
    ///
    /// `[0]` counts locks that cleared nothing; `[4]` counts quads. Clears of
    /// more than 4 rows are not recorded here.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Records a locked piece and the lines it cleared; returns points gained.
    pub fn complete_piece_drop(&mut self, cleared_lines: usize) -> usize {
        self.completed_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        if let Some(count) = self.line_cleared_counter.get_mut(cleared_lines) {
            *count += 1;
        }
        let points = self.rule.line_clear_points(cleared_lines);
        self.add_points(points);
        points
    }

    /// Awards points for `rows` rows of soft drop.
    pub fn soft_drop(&mut self, rows: usize) {
        self.add_points(rows.saturating_mul(self.rule.soft_drop_per_row));
    }

    /// Awards points for `rows` rows of hard drop.
    pub fn hard_drop(&mut self, rows: usize) {
        self.add_points(rows.saturating_mul(self.rule.hard_drop_per_row));
    }

    // Pins at `usize::MAX` instead of overflowing.
    fn add_points(&mut self, points: usize) {
        self.score = self.score.saturating_add(points);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_clear_points_table() {
        let rule = ScoringRule::default();
        assert_eq!(rule.line_clear_points(0), 0);
        assert_eq!(rule.line_clear_points(1), 100);
        assert_eq!(rule.line_clear_points(2), 300);
        assert_eq!(rule.line_clear_points(3), 500);
        assert_eq!(rule.line_clear_points(4), 800);
        assert_eq!(rule.line_clear_points(5), 900);
        assert_eq!(rule.line_clear_points(8), 1600);
    }

    #[test]
    fn test_complete_piece_drop_updates_counters() {
        let mut stats = GameStats::default();
        assert_eq!(stats.complete_piece_drop(0), 0);
        assert_eq!(stats.complete_piece_drop(2), 300);
        assert_eq!(stats.complete_piece_drop(1), 100);

        assert_eq!(stats.score(), 400);
        assert_eq!(stats.completed_pieces(), 3);
        assert_eq!(stats.total_cleared_lines(), 3);
        assert_eq!(stats.line_cleared_counter(), &[1, 1, 1, 0, 0]);
    }

    #[test]
    fn test_level_every_ten_lines() {
        let mut stats = GameStats::default();
        for _ in 0..9 {
            stats.complete_piece_drop(1);
        }
        assert_eq!(stats.level(), 0);
        stats.complete_piece_drop(1);
        assert_eq!(stats.level(), 1);
    }

    #[test]
    fn test_huge_rules_saturate() {
        let rule = ScoringRule {
            line_clear: [0, 100, 300, 500, usize::MAX],
            soft_drop_per_row: usize::MAX,
            hard_drop_per_row: usize::MAX / 2,
        };
        assert_eq!(rule.line_clear_points(9), usize::MAX);

        let mut stats = GameStats::new(rule);
        stats.hard_drop(3);
        assert_eq!(stats.score(), usize::MAX);
        stats.soft_drop(2);
        stats.complete_piece_drop(4);
        assert_eq!(stats.score(), usize::MAX);
    }

    #[test]
    fn test_drop_points() {
        let mut stats = GameStats::new(ScoringRule {
            soft_drop_per_row: 1,
            hard_drop_per_row: 2,
            ..ScoringRule::default()
        });
        stats.soft_drop(3);
        stats.hard_drop(10);
        assert_eq!(stats.score(), 23);

        let mut silent = GameStats::default();
        silent.soft_drop(3);
        silent.hard_drop(10);
        assert_eq!(silent.score(), 0);
    }

    #[test]
    fn test_scoring_rule_partial_json() {
        let rule: ScoringRule = serde_json::from_str(r#"{"hard_drop_per_row": 2}"#).unwrap();
        assert_eq!(rule.hard_drop_per_row, 2);
        assert_eq!(rule.line_clear, ScoringRule::default().line_clear);
    }
}
