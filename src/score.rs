//! Line-clear scoring

/// Points for clearing 0, 1, 2, 3 or 4 lines at once
const LINE_POINTS: [u64; 5] = [0, 100, 300, 500, 800];

/// Scoring state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    /// Current score
    pub points: u64,
    /// Total lines cleared
    pub lines: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a clear of `lines` rows and return the points it was worth.
    /// Anything past four lines scores as four.
    pub fn add_clear(&mut self, lines: u32) -> u64 {
        let points = LINE_POINTS[lines.min(4) as usize];
        self.points += points;
        self.lines += lines;
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_lines_scores_nothing() {
        let mut score = Score::new();
        assert_eq!(score.add_clear(0), 0);
        assert_eq!(score, Score::default());
    }

    #[test]
    fn test_single_clear() {
        let mut score = Score::new();
        score.add_clear(1);
        assert_eq!(score.points, 100);
        assert_eq!(score.lines, 1);
    }

    #[test]
    fn test_successive_clears() {
        let mut score = Score::new();
        for lines in 1..=4 {
            score.add_clear(lines);
        }
        assert_eq!(score.points, 100 + 300 + 500 + 800);
        assert_eq!(score.lines, 10);
    }

    #[test]
    fn test_more_than_four_clamps() {
        let mut score = Score::new();
        assert_eq!(score.add_clear(5), 800);
        assert_eq!(score.lines, 5);
    }
}
