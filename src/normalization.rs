//! Strategies that map raw link weights onto `[0, 1]`.

use crate::config::NormalizationMode;

const FALLBACK_DIVISOR: f32 = 100.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Normalization {
    /// Every weight over the maximum possible weight, 100.
    Default,
    /// Every weight over the heaviest weight of the batch.
    Maximum,
    /// `1.0` for weights strictly above `threshold`, `0.0` otherwise.
    Collapsing { threshold: f32 },
}

impl Normalization {
    pub fn from_mode(mode: NormalizationMode, threshold: u32) -> Self {
        match mode {
            NormalizationMode::None => Self::Default,
            NormalizationMode::Max => Self::Maximum,
            NormalizationMode::Collapsing => Self::Collapsing {
                threshold: threshold as f32,
            },
        }
    }

    pub fn normalize(&self, weights: &[f32]) -> Vec<f32> {
        match *self {
            Self::Default => weights
                .iter()
                .map(|weight| weight / FALLBACK_DIVISOR)
                .collect(),
            Self::Maximum => {
                // An all-zero batch has nothing to scale against.
                let divisor = weights
                    .iter()
                    .copied()
                    .reduce(f32::max)
                    .filter(|max| *max > 0.0)
                    .unwrap_or(FALLBACK_DIVISOR);
                weights.iter().map(|weight| weight / divisor).collect()
            }
            Self::Collapsing { threshold } => weights
                .iter()
                .map(|weight| if *weight > threshold { 1.0 } else { 0.0 })
                .collect(),
        }
    }
}

/// Rest length of a link: higher similarity gives a shorter distance.
pub fn target_distance(normalized_weight: f32, scale: f32, shift: f32) -> f32 {
    (1.0 - normalized_weight) * scale + shift
}
