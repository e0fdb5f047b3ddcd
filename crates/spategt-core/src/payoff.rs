//! Payoff matrices and game-regime classification.
//!
//! A 2×2 evolutionary game between the sensitive and resistant
//! subpopulations is described by four payoffs: sensitive-vs-sensitive
//! (`a`), sensitive-vs-resistant (`b`), resistant-vs-sensitive (`c`), and
//! resistant-vs-resistant (`d`). The qualitative dynamics regime is fully
//! determined by the sign of `a - c` and `b - d`.

use serde::{Deserialize, Serialize};

/// Qualitative dynamics regime implied by a payoff matrix.
///
/// Ties on either axis are deliberately classified as [`GameLabel::Unknown`]
/// rather than guessed; unknown-game samples are excluded from all
/// downstream pipelines.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum GameLabel {
    #[display("sensitive_wins")]
    SensitiveWins,
    #[display("coexistence")]
    Coexistence,
    #[display("bistability")]
    Bistability,
    #[display("resistant_wins")]
    ResistantWins,
    #[display("unknown")]
    Unknown,
}

impl std::str::FromStr for GameLabel {
    type Err = InvalidGameLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sensitive_wins" => Ok(GameLabel::SensitiveWins),
            "coexistence" => Ok(GameLabel::Coexistence),
            "bistability" => Ok(GameLabel::Bistability),
            "resistant_wins" => Ok(GameLabel::ResistantWins),
            "unknown" => Ok(GameLabel::Unknown),
            other => Err(InvalidGameLabel {
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
#[display("unrecognized game label: {value:?}")]
pub struct InvalidGameLabel {
    pub value: String,
}

/// Pairwise fitness payoffs between the sensitive and resistant
/// subpopulations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayoffMatrix {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
}

impl PayoffMatrix {
    #[must_use]
    pub fn new(a: f32, b: f32, c: f32, d: f32) -> Self {
        Self { a, b, c, d }
    }

    /// Classifies the matrix into a game regime.
    ///
    /// Pure and total: any equality on either axis yields
    /// [`GameLabel::Unknown`].
    ///
    /// # Examples
    ///
    /// ```
    /// use spategt_core::{GameLabel, PayoffMatrix};
    ///
    /// let m = PayoffMatrix::new(0.03, 0.03, 0.036, 0.024);
    /// assert_eq!(m.game(), GameLabel::Coexistence);
    /// ```
    #[must_use]
    pub fn game(&self) -> GameLabel {
        if self.a > self.c && self.b > self.d {
            GameLabel::SensitiveWins
        } else if self.a < self.c && self.b > self.d {
            GameLabel::Coexistence
        } else if self.a > self.c && self.b < self.d {
            GameLabel::Bistability
        } else if self.a < self.c && self.b < self.d {
            GameLabel::ResistantWins
        } else {
            GameLabel::Unknown
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quadrant_classification() {
        let cases = [
            ((0.03, 0.03, 0.024, 0.024), GameLabel::SensitiveWins),
            ((0.03, 0.03, 0.036, 0.024), GameLabel::Coexistence),
            ((0.03, 0.012, 0.024, 0.024), GameLabel::Bistability),
            ((0.03, 0.012, 0.036, 0.024), GameLabel::ResistantWins),
        ];
        for ((a, b, c, d), expected) in cases {
            assert_eq!(PayoffMatrix::new(a, b, c, d).game(), expected, "{a} {b} {c} {d}");
        }
    }

    #[test]
    fn test_ties_are_unknown() {
        assert_eq!(
            PayoffMatrix::new(0.03, 0.03, 0.03, 0.03).game(),
            GameLabel::Unknown
        );
        // Tie on one axis only is still unknown.
        assert_eq!(
            PayoffMatrix::new(0.03, 0.05, 0.03, 0.01).game(),
            GameLabel::Unknown
        );
        assert_eq!(
            PayoffMatrix::new(0.05, 0.02, 0.01, 0.02).game(),
            GameLabel::Unknown
        );
    }

    #[test]
    fn test_label_round_trip() {
        for label in [
            GameLabel::SensitiveWins,
            GameLabel::Coexistence,
            GameLabel::Bistability,
            GameLabel::ResistantWins,
            GameLabel::Unknown,
        ] {
            assert_eq!(label.to_string().parse::<GameLabel>().unwrap(), label);
        }
    }
}
