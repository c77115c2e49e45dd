use serde::{Deserialize, Serialize};

/// Largest reportable score: the rounded value stays strictly below 1.0
/// even when `tanh` saturates to exactly 1.0 in floating point.
pub const MAX_SCORE: f64 = 0.999;

/// Weights and calibration for the opportunity score.
///
/// The defaults are tunables with no derivation behind them; `saturation`
/// (K) is picked so that a very strong engagement ratio lands near 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Per-like weight (w_l)
    pub likes: f64,
    /// Per-comment weight (w_c)
    pub comments: f64,
    /// Per-view weight in the denominator (w_v)
    pub views: f64,
    /// Keeps the denominator non-zero when views = 0
    pub epsilon: f64,
    /// K in `tanh(raw) / tanh(K)`
    pub saturation: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            likes: 1.0,
            comments: 2.0,
            views: 0.05,
            epsilon: 1e-6,
            saturation: 5000.0,
        }
    }
}

impl ScoreWeights {
    /// Unbounded engagement-density ratio
    pub fn raw(&self, likes: u64, comments: u64, views: u64) -> f64 {
        (self.likes * likes as f64 + self.comments * comments as f64)
            / (self.views * views as f64 + self.epsilon)
    }

    /// Bounded opportunity score in [0, 1), rounded to 3 decimals
    pub fn score(&self, likes: u64, comments: u64, views: u64) -> f64 {
        let normalized = self.raw(likes, comments, views).tanh() / self.saturation.tanh();
        if !normalized.is_finite() {
            return 0.0;
        }
        round3(normalized).clamp(0.0, MAX_SCORE)
    }
}

/// Opportunity score with the default weights
pub fn score(likes: u64, comments: u64, views: u64) -> f64 {
    ScoreWeights::default().score(likes, comments, views)
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_inputs_score_zero() {
        assert_eq!(score(0, 0, 0), 0.0);
    }

    #[test]
    fn test_reference_value() {
        // raw = 70 / 50.000001 ≈ 1.4, tanh(1.4) ≈ 0.8854
        assert_eq!(score(50, 10, 1000), 0.885);
    }

    #[test]
    fn test_deterministic() {
        let first = score(100, 50, 10_000);
        for _ in 0..100 {
            assert_eq!(score(100, 50, 10_000), first);
        }
        // raw = 200 / 500 = 0.4, tanh(0.4) ≈ 0.37995
        assert_eq!(first, 0.38);
    }

    #[test]
    fn test_bounded_below_one() {
        let cases = [
            (0, 0, 1),
            (1, 0, 0),
            (0, 1, 0),
            (1_000_000, 1_000_000, 1),
            (u64::MAX, u64::MAX, 0),
            (10, 10, u64::MAX),
        ];

        for (likes, comments, views) in cases {
            let s = score(likes, comments, views);
            assert!((0.0..1.0).contains(&s), "score({likes}, {comments}, {views}) = {s}");
        }
    }

    #[test]
    fn test_comments_weigh_more_than_likes() {
        assert!(score(0, 10, 1000) > score(10, 0, 1000));
    }

    #[test]
    fn test_more_views_lowers_score() {
        assert!(score(50, 10, 1000) > score(50, 10, 100_000));
    }

    #[test]
    fn test_custom_weights() {
        let weights = ScoreWeights {
            comments: 0.0,
            ..Default::default()
        };
        assert_eq!(weights.score(0, 1000, 10), 0.0);
    }
}
