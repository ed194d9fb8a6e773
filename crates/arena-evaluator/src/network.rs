//! Policy network: a two-layer feed-forward scorer.
//!
//! The network maps a situational feature vector to a single unbounded score:
//!
//! ```text
//! hidden = max(0, features · W1 + B1)    (ReLU)
//! score  = hidden · W2 + B2              (linear)
//! ```
//!
//! All weights and biases live in one flat parameter vector, the *genome*,
//! laid out as `W1 (inputs × hidden, row-major by input) ++ B1 ++ W2 ++ B2`.
//! The genome length is fixed by the [`Topology`]; constructing a network
//! from a genome of any other length fails.

use serde::{Deserialize, Serialize};

use crate::features::FEATURE_COUNT;

/// Number of hidden units used unless configured otherwise.
pub const DEFAULT_HIDDEN_SIZE: usize = 8;

/// Layer sizes of a policy network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    pub inputs: usize,
    pub hidden: usize,
}

impl Default for Topology {
    fn default() -> Self {
        Self {
            inputs: FEATURE_COUNT,
            hidden: DEFAULT_HIDDEN_SIZE,
        }
    }
}

impl Topology {
    #[must_use]
    pub const fn with_hidden(hidden: usize) -> Self {
        Self {
            inputs: FEATURE_COUNT,
            hidden,
        }
    }

    /// Length of a genome for this topology:
    /// `(inputs × hidden) + hidden + (hidden × 1) + 1`.
    ///
    /// ```
    /// use arena_evaluator::network::Topology;
    ///
    /// assert_eq!(Topology { inputs: 12, hidden: 8 }.parameter_count(), 113);
    /// ```
    #[must_use]
    pub const fn parameter_count(&self) -> usize {
        self.inputs * self.hidden + self.hidden + self.hidden + 1
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("genome has {actual} parameters, topology {inputs}x{hidden} requires {expected}")]
pub struct GenomeLengthError {
    pub inputs: usize,
    pub hidden: usize,
    pub expected: usize,
    pub actual: usize,
}

/// A policy network instance backed by a genome.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyNetwork {
    topology: Topology,
    genome: Vec<f32>,
}

impl PolicyNetwork {
    pub fn new(topology: Topology, genome: Vec<f32>) -> Result<Self, GenomeLengthError> {
        let expected = topology.parameter_count();
        if genome.len() != expected {
            return Err(GenomeLengthError {
                inputs: topology.inputs,
                hidden: topology.hidden,
                expected,
                actual: genome.len(),
            });
        }
        Ok(Self { topology, genome })
    }

    #[must_use]
    pub fn topology(&self) -> Topology {
        self.topology
    }

    #[must_use]
    pub fn genome(&self) -> &[f32] {
        &self.genome
    }

    #[must_use]
    pub fn into_genome(self) -> Vec<f32> {
        self.genome
    }

    /// Scores a feature vector. Higher is more desirable.
    ///
    /// # Panics
    ///
    /// Panics if `features.len()` differs from the topology's input size.
    #[must_use]
    pub fn predict(&self, features: &[f32]) -> f32 {
        let Topology { inputs, hidden } = self.topology;
        assert_eq!(features.len(), inputs);

        let (w1, rest) = self.genome.split_at(inputs * hidden);
        let (b1, rest) = rest.split_at(hidden);
        let (w2, b2) = rest.split_at(hidden);

        let mut output = b2[0];
        for (j, (bias, weight_out)) in b1.iter().zip(w2).enumerate() {
            let z = features
                .iter()
                .enumerate()
                .map(|(i, x)| x * w1[i * hidden + j])
                .sum::<f32>()
                + bias;
            output += z.max(0.0) * weight_out;
        }
        output
    }
}
