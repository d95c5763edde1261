//! Event type definitions for progress reporting.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// All events emitted while comparing two signatures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Pipeline-level events
    Pipeline(PipelineEvent),
    /// Image loading events, one set per input
    Load(LoadEvent),
    /// Scoring events
    Score(ScoreEvent),
}

/// Events while loading one input image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LoadEvent {
    Started {
        comparison_id: Uuid,
        path: PathBuf,
    },
    /// Decoded and normalized
    Loaded {
        comparison_id: Uuid,
        path: PathBuf,
        source_width: u32,
        source_height: u32,
    },
    /// This input could not be decoded; the comparison stops here
    Failed {
        comparison_id: Uuid,
        path: PathBuf,
        message: String,
    },
}

/// Events from the scorer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScoreEvent {
    Computed {
        comparison_id: Uuid,
        /// Mean SSIM before scaling and rounding
        raw_ssim: f64,
        /// Rounded percentage
        score: f64,
    },
}

/// Pipeline-level events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PipelineEvent {
    Started {
        comparison_id: Uuid,
    },
    PhaseChanged {
        comparison_id: Uuid,
        phase: PipelinePhase,
    },
    Completed {
        comparison_id: Uuid,
        summary: ComparisonSummary,
    },
    /// Terminal failure; no verdict follows
    Failed {
        comparison_id: Uuid,
        message: String,
    },
}

/// Stages of a comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelinePhase {
    Loading,
    Scoring,
    Classifying,
}

/// Summary sent with `PipelineEvent::Completed`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub score: f64,
    pub threshold: f64,
    pub is_match: bool,
    pub duration_ms: u64,
}

impl std::fmt::Display for PipelinePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelinePhase::Loading => write!(f, "Loading images"),
            PipelinePhase::Scoring => write!(f, "Scoring similarity"),
            PipelinePhase::Classifying => write!(f, "Classifying"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_serializable() {
        let id = Uuid::new_v4();
        let event = Event::Load(LoadEvent::Loaded {
            comparison_id: id,
            path: PathBuf::from("/sigs/a.png"),
            source_width: 640,
            source_height: 480,
        });

        let json = serde_json::to_string(&event).unwrap();
        let deserialized: Event = serde_json::from_str(&json).unwrap();

        match deserialized {
            Event::Load(LoadEvent::Loaded {
                comparison_id,
                source_width,
                ..
            }) => {
                assert_eq!(comparison_id, id);
                assert_eq!(source_width, 640);
            }
            _ => panic!("Wrong event type"),
        }
    }

    #[test]
    fn summary_is_serializable() {
        let summary = ComparisonSummary {
            score: 91.25,
            threshold: 85.0,
            is_match: true,
            duration_ms: 12,
        };

        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("91.25"));
        assert!(json.contains("\"is_match\":true"));
    }

    #[test]
    fn phase_display() {
        assert_eq!(PipelinePhase::Scoring.to_string(), "Scoring similarity");
    }
}
