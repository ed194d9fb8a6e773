use arena_training::{GenerationReport, TrainingConfig};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-generation progress of a training run, saved next to the champion.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrainingHistory {
    pub trained_at: DateTime<Utc>,
    pub final_fitness: f32,
    pub config: TrainingConfig,
    pub generations: Vec<GenerationReport>,
}
