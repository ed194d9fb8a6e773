use arena_engine::{Catalog, EncounterTable};
use arena_evaluator::{BattleEvaluator, Tally, network::Topology};
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::{
    TrainingError,
    genetic::{FitnessStats, Individual, Population, PopulationEvolver},
    schedule::{MutationSchedule, MutationTier, StagnationTracker},
};

/// Knobs of the evolutionary loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub population_size: usize,
    pub generations: usize,
    /// Battles played by every individual per generation.
    pub trials: usize,
    pub mutation_rate: f64,
    pub mutation_sigma: f32,
    pub elite_count: usize,
    pub parent_fraction: usize,
    pub hidden_size: usize,
    pub stagnation_window: usize,
    pub stagnation_threshold: f32,
    /// Stagnation events spent in each tier.
    pub tier_span: usize,
    pub tiers: Vec<MutationTier>,
    pub encounters: EncounterTable,
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 10_000,
            trials: 20,
            mutation_rate: 0.1,
            mutation_sigma: 0.2,
            elite_count: 3,
            parent_fraction: 2,
            hidden_size: 8,
            stagnation_window: 20,
            stagnation_threshold: 25.0,
            tier_span: 10,
            tiers: MutationTier::default_table(),
            encounters: EncounterTable::default(),
            seed: None,
        }
    }
}

impl TrainingConfig {
    pub fn validate(&self) -> Result<(), TrainingError> {
        let reason = if self.population_size == 0 {
            "population size must be positive"
        } else if self.trials == 0 {
            "trials must be positive"
        } else if self.parent_fraction == 0 {
            "parent fraction must be positive"
        } else if self.hidden_size == 0 {
            "hidden size must be positive"
        } else if self.stagnation_window < 2 {
            "stagnation window must hold at least 2 generations"
        } else if self.tier_span == 0 {
            "tier span must be positive"
        } else if self.tiers.is_empty() {
            "mutation tier table is empty"
        } else if self.mutation_rate.is_nan() {
            "mutation rate is not a number"
        } else {
            return Ok(());
        };
        Err(TrainingError::InvalidConfig { reason })
    }
}

/// Summary of one finished generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub generation: usize,
    pub max_fitness: f32,
    pub mean_fitness: f32,
    pub min_fitness: f32,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    pub win_rate: f32,
    /// Tier used to breed the following generation.
    pub tier: MutationTier,
    pub stagnation: usize,
}

/// Runs the evolutionary loop one generation at a time.
#[derive(Debug)]
pub struct Trainer<'a> {
    catalog: &'a Catalog,
    config: TrainingConfig,
    topology: Topology,
    evaluator: BattleEvaluator,
    population: Population,
    schedule: MutationSchedule,
    rng: Pcg32,
    generation: usize,
}

impl<'a> Trainer<'a> {
    pub fn new(catalog: &'a Catalog, config: TrainingConfig) -> Result<Self, TrainingError> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => Pcg32::seed_from_u64(seed),
            None => Pcg32::from_rng(&mut rand::rng()),
        };
        let topology = Topology::with_hidden(config.hidden_size);
        let population =
            Population::random(config.population_size, topology.parameter_count(), &mut rng);
        let schedule = MutationSchedule::new(
            config.tiers.clone(),
            config.tier_span,
            StagnationTracker::new(config.stagnation_window, config.stagnation_threshold),
        );
        Ok(Self {
            catalog,
            topology,
            evaluator: BattleEvaluator::new(config.encounters.clone()),
            population,
            schedule,
            rng,
            generation: 0,
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    #[must_use]
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Generations completed so far.
    #[must_use]
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Best individual of the latest evaluated generation.
    ///
    /// Elitism and genocide both keep it at the front of the population, so
    /// it stays available after breeding.
    #[must_use]
    pub fn champion(&self) -> Option<&Individual> {
        self.population.champion()
    }

    /// Evaluates the current population and breeds the next one.
    ///
    /// Every individual plays the same freshly drawn trial seeds.
    pub fn run_generation(&mut self) -> Result<GenerationReport, TrainingError> {
        let seeds = (0..self.config.trials)
            .map(|_| self.rng.random())
            .collect::<Vec<u64>>();
        self.population
            .evaluate_fitness(self.catalog, self.topology, &self.evaluator, &seeds)?;

        let stats = self
            .population
            .compute_fitness_stats()
            .unwrap_or(FitnessStats {
                min: 0.0,
                mean: 0.0,
                max: 0.0,
            });
        let tally: Tally = self.population.total_tally();
        let tier = self.schedule.record(stats.mean);
        let stagnation = self.schedule.tracker().count();

        self.population = match tier {
            MutationTier::Scaled(factor) => {
                let evolver = PopulationEvolver {
                    elite_count: self.config.elite_count,
                    parent_fraction: self.config.parent_fraction,
                    mutation_rate: self.config.mutation_rate * f64::from(factor),
                    mutation_sigma: self.config.mutation_sigma * factor,
                };
                evolver.evolve(&self.population, &mut self.rng)?
            }
            MutationTier::Genocide => {
                tracing::info!(generation = self.generation, "population stagnated, reseeding all but the champion");
                self.schedule.reset();
                self.population.genocide(&mut self.rng)
            }
        };

        let report = GenerationReport {
            generation: self.generation,
            max_fitness: stats.max,
            mean_fitness: stats.mean,
            min_fitness: stats.min,
            wins: tally.wins,
            draws: tally.draws,
            losses: tally.losses,
            win_rate: tally.win_rate(),
            tier,
            stagnation,
        };
        self.generation += 1;
        Ok(report)
    }
}
