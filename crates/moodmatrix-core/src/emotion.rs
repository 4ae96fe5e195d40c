//! Emotion state fed into the ordering engine.
//!
//! The state comes from an external classifier (or its mock fallback; both
//! are treated the same) and only biases ordering inside a matrix quadrant.
//! It is held in memory and never persisted.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Affective state used to bias in-quadrant order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionState {
    /// No scan yet, or cleared by the user
    #[default]
    None,
    Focused,
    Stressed,
    Neutral,
}

impl EmotionState {
    /// Lenient parse of an app-level label; unknown labels mean no state.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "focused" => EmotionState::Focused,
            "stressed" => EmotionState::Stressed,
            "neutral" => EmotionState::Neutral,
            _ => EmotionState::None,
        }
    }

    /// Map a raw facial-expression label onto an app-level state.
    ///
    /// Negative expressions read as stressed, positive or aroused ones as
    /// focused, everything else as neutral.
    pub fn from_classifier_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "angry" | "disgust" | "fear" | "sad" => EmotionState::Stressed,
            "happy" | "surprise" => EmotionState::Focused,
            _ => EmotionState::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionState::None => "none",
            EmotionState::Focused => "focused",
            EmotionState::Stressed => "stressed",
            EmotionState::Neutral => "neutral",
        }
    }

    /// Short hint shown next to the reordered list.
    pub fn guidance(&self) -> &'static str {
        match self {
            EmotionState::Focused => "You're in focus mode! Tackle high-effort tasks now.",
            EmotionState::Stressed => {
                "You seem stressed. Start with easier tasks to build momentum."
            }
            EmotionState::Neutral => "You're in a balanced state. Ready for any task.",
            EmotionState::None => "Scan your emotion to reorder tasks within each quadrant.",
        }
    }

    pub fn is_set(&self) -> bool {
        *self != EmotionState::None
    }
}

impl fmt::Display for EmotionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one classification: `{ emotion, confidence }`.
///
/// Deserialized readings go through [`EmotionReading::new`], so the
/// confidence range holds for classifier payloads too.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawReading")]
pub struct EmotionReading {
    pub emotion: EmotionState,
    /// 0.0 to 1.0
    pub confidence: f64,
}

#[derive(Deserialize)]
struct RawReading {
    #[serde(default)]
    emotion: EmotionState,
    #[serde(default)]
    confidence: f64,
}

impl From<RawReading> for EmotionReading {
    fn from(raw: RawReading) -> Self {
        Self::new(raw.emotion, raw.confidence)
    }
}

impl EmotionReading {
    /// Confidence is clamped to `0.0..=1.0` and rounded to two decimals.
    pub fn new(emotion: EmotionState, confidence: f64) -> Self {
        let confidence = if confidence.is_finite() {
            (confidence.clamp(0.0, 1.0) * 100.0).round() / 100.0
        } else {
            0.0
        };
        Self {
            emotion,
            confidence,
        }
    }

    /// Confidence as a whole percentage for display.
    pub fn confidence_percent(&self) -> u8 {
        (self.confidence.clamp(0.0, 1.0) * 100.0).round() as u8
    }
}

/// Holds the current emotion between renders until the user clears it.
#[derive(Debug, Clone, Default)]
pub struct EmotionTracker {
    current: Option<EmotionReading>,
}

impl EmotionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, reading: EmotionReading) {
        tracing::debug!(
            emotion = %reading.emotion,
            confidence = reading.confidence,
            "emotion reading applied"
        );
        self.current = Some(reading);
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn reading(&self) -> Option<&EmotionReading> {
        self.current.as_ref()
    }

    pub fn state(&self) -> EmotionState {
        self.current
            .map(|reading| reading.emotion)
            .unwrap_or(EmotionState::None)
    }
}
