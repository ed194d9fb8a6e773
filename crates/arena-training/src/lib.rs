//! Evolutionary training of hero policy networks.
//!
//! A [`Trainer`] owns a population of [genomes](Genome), scores it on shared
//! random encounters every generation, and breeds the next generation with
//! elitism, one-point crossover and Gaussian point mutation. Mutation strength
//! follows an adaptive [schedule](schedule) driven by fitness stagnation.

use arena_engine::BattleError;
use arena_evaluator::network::GenomeLengthError;
use rand_distr::NormalError;

pub use self::{genome::Genome, trainer::*};

pub mod genetic;
pub mod genome;
pub mod schedule;
mod trainer;

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum TrainingError {
    #[display("invalid training config: {reason}")]
    #[from(ignore)]
    InvalidConfig { reason: &'static str },
    #[display("battle failed: {_0}")]
    Battle(BattleError),
    #[display("{_0}")]
    Genome(GenomeLengthError),
    #[display("invalid mutation noise: {_0}")]
    Mutation(NormalError),
}
