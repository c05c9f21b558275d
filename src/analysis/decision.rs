// Decision - labels, confidence and explanations
//
// Thresholds a probability into a label and narrates the decision from the
// summary statistics. The explanation never feeds back into the label or the
// probability.
//
// Tie-break: a probability of exactly 0.5 is labelled AI_GENERATED.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::analysis::features::Statistics;
use crate::config::ExplanationThresholds;

/// Probability at or above which a voice is labelled synthetic
pub const AI_THRESHOLD: f32 = 0.5;

/// Phrase used when no heuristic triggers
const NATURAL_DYNAMICS: &str = "natural vocal dynamics";

/// Classification label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    #[serde(rename = "AI_GENERATED")]
    AiGenerated,
    #[serde(rename = "HUMAN")]
    Human,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::AiGenerated => "AI_GENERATED",
            Label::Human => "HUMAN",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub label: Label,
    /// Probability that the voice is synthetic
    pub probability: f32,
    /// Probability mass of the chosen label, rounded to 3 decimals
    pub confidence: f32,
    pub explanation: String,
}

/// Applies the decision threshold and builds the explanation
#[derive(Debug, Clone, Copy, Default)]
pub struct DecisionEngine {
    thresholds: ExplanationThresholds,
}

impl DecisionEngine {
    pub fn new(thresholds: ExplanationThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &ExplanationThresholds {
        &self.thresholds
    }

    /// Label, confidence and explanation for a classifier probability
    pub fn decide(&self, probability: f32, stats: &Statistics) -> ClassificationResult {
        let label = if probability >= AI_THRESHOLD {
            Label::AiGenerated
        } else {
            Label::Human
        };

        let mass = match label {
            Label::AiGenerated => probability as f64,
            Label::Human => 1.0 - probability as f64,
        };

        ClassificationResult {
            label,
            probability,
            confidence: round3(mass),
            explanation: self.explain(label, stats),
        }
    }

    /// Narrate a label from the summary statistics
    pub fn explain(&self, label: Label, stats: &Statistics) -> String {
        let mut reasons = Vec::with_capacity(3);
        if stats.pitch_std < self.thresholds.pitch_std {
            reasons.push("low pitch variation");
        }
        if stats.jitter < self.thresholds.jitter {
            reasons.push("unnaturally stable pitch");
        }
        if stats.shimmer < self.thresholds.shimmer {
            reasons.push("low amplitude variation");
        }
        if reasons.is_empty() {
            reasons.push(NATURAL_DYNAMICS);
        }

        let phrases = reasons.join(", ");
        match label {
            Label::AiGenerated => {
                format!("Speech shows {}, commonly observed in synthetic voices.", phrases)
            }
            Label::Human => format!("Speech exhibits {}, typical of natural human speech.", phrases),
        }
    }
}

/// Round half away from zero to 3 decimals
fn round3(value: f64) -> f32 {
    ((value * 1000.0).round() / 1000.0) as f32
}
