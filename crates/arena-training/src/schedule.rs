//! Adaptive mutation strength.
//!
//! Per-generation mean fitness is buffered by a [`StagnationTracker`]. Every
//! full window compares the mean of its newer half against its older half;
//! too little progress counts as one stagnation event, any real progress
//! clears the count. The [`MutationSchedule`] maps the event count onto a
//! table of [`MutationTier`]s, `tier_span` events per tier. The default table
//! first calms mutation down, then escalates it, and finally wipes the
//! population out.

use serde::{Deserialize, Serialize};

/// How the next generation is produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum MutationTier {
    /// Regular breeding with mutation rate and sigma scaled by the factor.
    Scaled(f32),
    /// Keep the champion, reseed everyone else.
    Genocide,
}

impl MutationTier {
    #[must_use]
    pub fn default_table() -> Vec<Self> {
        vec![
            Self::Scaled(1.0),
            Self::Scaled(0.5),
            Self::Scaled(0.25),
            Self::Scaled(2.0),
            Self::Scaled(4.0),
            Self::Scaled(8.0),
            Self::Scaled(16.0),
            Self::Genocide,
        ]
    }
}

/// Result of comparing the two halves of a full window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum WindowVerdict {
    Stagnant,
    Improving,
}

#[derive(Debug, Clone)]
pub struct StagnationTracker {
    window: usize,
    threshold: f32,
    buffer: Vec<f32>,
    count: usize,
}

impl StagnationTracker {
    /// # Panics
    ///
    /// Panics if `window` is smaller than 2.
    #[must_use]
    pub fn new(window: usize, threshold: f32) -> Self {
        assert!(window >= 2);
        Self {
            window,
            threshold,
            buffer: Vec::with_capacity(window),
            count: 0,
        }
    }

    /// Consecutive stagnation events since the last improvement or reset.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    #[must_use]
    pub fn buffered(&self) -> &[f32] {
        &self.buffer
    }

    /// Buffers one mean fitness value. Returns a verdict whenever the window
    /// fills up; the buffer is emptied afterwards either way.
    #[expect(clippy::cast_precision_loss)]
    pub fn record(&mut self, mean_fitness: f32) -> Option<WindowVerdict> {
        self.buffer.push(mean_fitness);
        if self.buffer.len() < self.window {
            return None;
        }

        let (older, newer) = self.buffer.split_at(self.window / 2);
        let mean = |values: &[f32]| values.iter().sum::<f32>() / values.len() as f32;
        let progress = mean(newer) - mean(older);
        self.buffer.clear();

        if progress < self.threshold {
            self.count += 1;
            Some(WindowVerdict::Stagnant)
        } else {
            self.count = 0;
            Some(WindowVerdict::Improving)
        }
    }

    pub fn reset(&mut self) {
        self.buffer.clear();
        self.count = 0;
    }
}

#[derive(Debug, Clone)]
pub struct MutationSchedule {
    tiers: Vec<MutationTier>,
    tier_span: usize,
    tracker: StagnationTracker,
}

impl MutationSchedule {
    /// # Panics
    ///
    /// Panics if `tiers` is empty or `tier_span` is zero.
    #[must_use]
    pub fn new(tiers: Vec<MutationTier>, tier_span: usize, tracker: StagnationTracker) -> Self {
        assert!(!tiers.is_empty());
        assert!(tier_span > 0);
        Self {
            tiers,
            tier_span,
            tracker,
        }
    }

    #[must_use]
    pub fn tracker(&self) -> &StagnationTracker {
        &self.tracker
    }

    #[must_use]
    pub fn tier_index(&self) -> usize {
        usize::min(self.tracker.count() / self.tier_span, self.tiers.len() - 1)
    }

    #[must_use]
    pub fn current_tier(&self) -> MutationTier {
        self.tiers[self.tier_index()]
    }

    /// Feeds a generation's mean fitness and returns the tier to breed with.
    pub fn record(&mut self, mean_fitness: f32) -> MutationTier {
        let before = self.tier_index();
        if let Some(verdict) = self.tracker.record(mean_fitness) {
            tracing::trace!(?verdict, count = self.tracker.count(), "stagnation window closed");
        }
        let after = self.tier_index();
        if before != after {
            tracing::debug!(from = ?self.tiers[before], to = ?self.tiers[after], "mutation tier changed");
        }
        self.current_tier()
    }

    /// Starts over from the first tier.
    pub fn reset(&mut self) {
        self.tracker.reset();
    }
}
