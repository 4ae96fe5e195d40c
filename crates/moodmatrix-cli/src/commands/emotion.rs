//! `moodmatrix emotion`: inspect emotion labels.

use clap::Subcommand;
use moodmatrix_core::{EmotionReading, EmotionState};

#[derive(Subcommand)]
pub enum EmotionAction {
    /// Map a raw classifier label (angry, happy, ...) to an app emotion
    Map {
        /// Classifier label
        label: String,
        /// Classifier confidence, 0.0 to 1.0
        #[arg(long, default_value_t = 1.0)]
        confidence: f64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the guidance text for an app emotion
    Guidance {
        /// focused, stressed or neutral
        emotion: String,
    },
}

pub fn run(action: EmotionAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        EmotionAction::Map {
            label,
            confidence,
            json,
        } => {
            let reading =
                EmotionReading::new(EmotionState::from_classifier_label(&label), confidence);
            if json {
                println!("{}", serde_json::to_string_pretty(&reading)?);
            } else {
                println!(
                    "{} ({}%): {}",
                    reading.emotion,
                    reading.confidence_percent(),
                    reading.emotion.guidance()
                );
            }
        }
        EmotionAction::Guidance { emotion } => {
            let state = EmotionState::from_label(&emotion);
            if !state.is_set() {
                return Err(format!("unknown emotion: {emotion}").into());
            }
            println!("{}", state.guidance());
        }
    }
    Ok(())
}
