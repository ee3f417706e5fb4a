use serde::Serialize;

/// Binary classification outcome for a hive recording.
///
/// Wire values match the original service: `"queen"` / `"no_queen"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueenLabel {
    Queen,
    NoQueen,
}

impl QueenLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueenLabel::Queen => "queen",
            QueenLabel::NoQueen => "no_queen",
        }
    }
}

/// Result of classifying one recording.
///
/// Invariant: `confidence` is the maximum class probability, so it is
/// always in [0.5, 1.0] for a binary classifier, and `label` is the
/// argmax class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub label: QueenLabel,
    pub confidence: f32,
}

impl Prediction {
    /// Builds a prediction from the probability that a queen is present.
    pub fn from_queen_probability(p: f32) -> Self {
        let p = p.clamp(0.0, 1.0);
        if p >= 0.5 {
            Self {
                label: QueenLabel::Queen,
                confidence: p,
            }
        } else {
            Self {
                label: QueenLabel::NoQueen,
                confidence: 1.0 - p,
            }
        }
    }
}
