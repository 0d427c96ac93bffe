pub struct ScoreEngine;

impl ScoreEngine {
    /// Compute a score from a completed session's performance metrics.
    ///
    /// Deterministic: identical inputs always produce the identical score,
    /// and the result is never negative. The inputs are client-reported
    /// telemetry and are not cross-checked against stored session state.
    pub fn compute(
        won: bool,
        word_length: i32,
        mistakes: i32,
        duration_ms: i64,
        accuracy: f64,
        level: i32,
    ) -> i32 {
        let base: i64 = if won { 100 } else { 40 };
        let length_bonus = i64::from(word_length) * 8;
        let level_bonus = i64::from(level) * 50;
        let accuracy_bonus = accuracy.floor() as i64;
        let time_penalty = (duration_ms / 1000).min(120); // max 2 minutes penalty
        let mistake_penalty = i64::from(mistakes) * 6;

        let total =
            base + length_bonus + level_bonus + accuracy_bonus - time_penalty - mistake_penalty;
        total.clamp(0, i64::from(i32::MAX)) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_win() {
        // 100 + 5*8 + 1*50 + 100 - 10 - 0 = 280
        let score = ScoreEngine::compute(true, 5, 0, 10_000, 100.0, 1);
        assert_eq!(score, 280);
    }

    #[test]
    fn test_loss_still_scores() {
        // 40 + 3*8 + 1*50 + 33 - 5 - 4*6 = 118
        let score = ScoreEngine::compute(false, 3, 4, 5_000, 33.9, 1);
        assert_eq!(score, 118);
    }

    #[test]
    fn test_never_negative() {
        let score = ScoreEngine::compute(false, 0, 50, 600_000, 0.0, 0);
        assert_eq!(score, 0);
    }

    #[test]
    fn test_time_penalty_capped_at_two_minutes() {
        let slow = ScoreEngine::compute(true, 5, 0, 10_000_000, 100.0, 1);
        let very_slow = ScoreEngine::compute(true, 5, 0, 99_000_000, 100.0, 1);
        assert_eq!(slow, very_slow);
        assert_eq!(slow, 280 + 10 - 120);
    }

    #[test]
    fn test_level_bonus() {
        let level_one = ScoreEngine::compute(true, 5, 0, 10_000, 100.0, 1);
        let level_three = ScoreEngine::compute(true, 5, 0, 10_000, 100.0, 3);
        assert_eq!(level_three - level_one, 100);
    }

    #[test]
    fn test_accuracy_floored() {
        let a = ScoreEngine::compute(true, 5, 0, 10_000, 99.9, 1);
        let b = ScoreEngine::compute(true, 5, 0, 10_000, 99.0, 1);
        assert_eq!(a, b);
    }

    #[test]
    fn test_deterministic() {
        for _ in 0..3 {
            assert_eq!(
                ScoreEngine::compute(true, 7, 2, 42_000, 85.5, 4),
                ScoreEngine::compute(true, 7, 2, 42_000, 85.5, 4)
            );
        }
    }
}
