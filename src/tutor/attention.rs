//! Simulated attention and emotion signals. No real sensor feeds these;
//! both are random, behind strategy traits so an actual estimator can be
//! plugged in later.

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Sampled attention stays in this band, matching the shipped simulation.
pub const ATTENTION_RANGE: std::ops::RangeInclusive<u8> = 70..=100;
/// Below this the UI nudges the learner to refocus.
pub const LOW_ATTENTION_THRESHOLD: u8 = 80;

/// Cadence of the timer-driven update loops.
pub const ATTENTION_UPDATE_INTERVAL: Duration = Duration::from_secs(10);
pub const EMOTION_UPDATE_INTERVAL: Duration = Duration::from_secs(5);

/// Strategy seam for attention scoring in [0,100].
pub trait AttentionEstimator: Send + Sync {
    fn estimate(&self) -> u8;
}

/// Uniform random attention in [70,100].
pub struct SimulatedAttention;

impl AttentionEstimator for SimulatedAttention {
    fn estimate(&self) -> u8 {
        rand::rng().random_range(ATTENTION_RANGE)
    }
}

pub fn is_low_attention(score: u8) -> bool {
    score < LOW_ATTENTION_THRESHOLD
}

/// Display emotion of the tutor avatar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Thinking,
    Explaining,
    Confused,
}

impl Emotion {
    pub const ALL: [Emotion; 4] = [
        Emotion::Happy,
        Emotion::Thinking,
        Emotion::Explaining,
        Emotion::Confused,
    ];
}

/// Strategy seam for the avatar emotion.
pub trait EmotionModel: Send + Sync {
    fn next_emotion(&self) -> Emotion;
}

/// Uniform random pick over the four display emotions.
pub struct SimulatedEmotion;

impl EmotionModel for SimulatedEmotion {
    fn next_emotion(&self) -> Emotion {
        let index = rand::rng().random_range(0..Emotion::ALL.len());
        Emotion::ALL[index]
    }
}
