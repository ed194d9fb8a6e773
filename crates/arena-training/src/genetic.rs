use arena_engine::Catalog;
use arena_evaluator::{
    BattleEvaluator, FitnessFunction, PolicyNetwork, Tally, network::Topology,
};
use rand::{Rng, seq::IndexedRandom as _};
use rand_distr::{Normal, NormalError};
use rayon::prelude::*;

use crate::{TrainingError, genome::Genome};

#[derive(Debug, Clone)]
pub struct Individual {
    genome: Genome,
    fitness: f32,
    tally: Tally,
}

impl Individual {
    #[must_use]
    pub fn new(genome: Genome) -> Self {
        Self {
            genome,
            fitness: f32::MIN,
            tally: Tally::default(),
        }
    }

    pub fn random<R>(genome_len: usize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::new(Genome::random(genome_len, rng))
    }

    #[must_use]
    pub fn genome(&self) -> &Genome {
        &self.genome
    }

    #[must_use]
    pub fn fitness(&self) -> f32 {
        self.fitness
    }

    /// Outcomes of the most recent evaluation.
    #[must_use]
    pub fn tally(&self) -> Tally {
        self.tally
    }
}

/// Minimum, mean and maximum fitness of a population.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitnessStats {
    pub min: f32,
    pub mean: f32,
    pub max: f32,
}

#[derive(Debug, Clone)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    pub fn random<R>(count: usize, genome_len: usize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let individuals = (0..count)
            .map(|_| Individual::random(genome_len, rng))
            .collect();
        Population { individuals }
    }

    #[must_use]
    pub fn from_individuals(individuals: Vec<Individual>) -> Self {
        Population { individuals }
    }

    #[must_use]
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// The best individual of the last evaluation.
    #[must_use]
    pub fn champion(&self) -> Option<&Individual> {
        self.individuals.first()
    }

    /// Scores every individual over the same trial seeds, in parallel, then
    /// sorts the population by fitness, best first.
    pub fn evaluate_fitness<F>(
        &mut self,
        catalog: &Catalog,
        topology: Topology,
        evaluator: &BattleEvaluator<F>,
        seeds: &[u64],
    ) -> Result<(), TrainingError>
    where
        F: FitnessFunction,
    {
        self.individuals.par_iter_mut().try_for_each(|ind| {
            let network = PolicyNetwork::new(topology, ind.genome.as_slice().to_vec())?;
            let report = evaluator.evaluate(catalog, &network, seeds)?;
            ind.fitness = report.fitness;
            ind.tally = report.tally;
            Ok::<_, TrainingError>(())
        })?;

        // sort by fitness descending
        self.individuals
            .sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
        Ok(())
    }

    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn compute_fitness_stats(&self) -> Option<FitnessStats> {
        if self.individuals.is_empty() {
            return None;
        }
        let mut min = f32::MAX;
        let mut max = f32::MIN;
        let mut sum = 0.0;
        for ind in &self.individuals {
            min = min.min(ind.fitness);
            max = max.max(ind.fitness);
            sum += ind.fitness;
        }
        Some(FitnessStats {
            min,
            mean: sum / self.individuals.len() as f32,
            max,
        })
    }

    /// Outcomes of every battle played in the last evaluation.
    #[must_use]
    pub fn total_tally(&self) -> Tally {
        let mut tally = Tally::default();
        for ind in &self.individuals {
            tally += ind.tally;
        }
        tally
    }

    /// Keeps the champion and replaces everyone else with random genomes.
    #[must_use]
    pub fn genocide<R>(&self, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut individuals = Vec::with_capacity(self.individuals.len());
        if let Some(champion) = self.champion() {
            individuals.push(champion.clone());
            let genome_len = champion.genome.len();
            individuals.extend((1..self.individuals.len()).map(|_| Individual::random(genome_len, rng)));
        }
        Population { individuals }
    }
}

#[derive(Debug)]
pub struct PopulationEvolver {
    pub elite_count: usize,
    /// Parents are drawn from the best `1 / parent_fraction` of the population.
    pub parent_fraction: usize,
    pub mutation_rate: f64,
    pub mutation_sigma: f32,
}

impl PopulationEvolver {
    /// Breeds the next generation from an evaluated (sorted) population.
    pub fn evolve<R>(&self, population: &Population, rng: &mut R) -> Result<Population, NormalError>
    where
        R: Rng + ?Sized,
    {
        let noise = Normal::new(0.0, self.mutation_sigma)?;
        let individuals = &population.individuals;
        assert!(individuals.is_sorted_by(|a, b| a.fitness >= b.fitness));

        let mut next_individuals = Vec::with_capacity(individuals.len());

        // elite selection
        let elite_count = self.elite_count.min(individuals.len());
        next_individuals.extend(individuals[..elite_count].iter().cloned());

        let pool_size = (individuals.len() / self.parent_fraction.max(1)).max(1);
        let parents = &individuals[..pool_size.min(individuals.len())];

        // generate the rest individuals
        while next_individuals.len() < individuals.len() {
            let (Some(p1), Some(p2)) = (parents.choose(rng), parents.choose(rng)) else {
                break;
            };
            let mut child = Genome::crossover(&p1.genome, &p2.genome, rng);
            child.mutate(self.mutation_rate, noise, rng);
            next_individuals.push(Individual::new(child));
        }

        Ok(Population {
            individuals: next_individuals,
        })
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn ranked(fitness: &[f32]) -> Population {
        let individuals = fitness
            .iter()
            .enumerate()
            .map(|(i, &fitness)| Individual {
                genome: vec![i as f32; 4].into(),
                fitness,
                tally: Tally::default(),
            })
            .collect();
        Population::from_individuals(individuals)
    }

    #[test]
    fn test_fitness_stats() {
        let population = ranked(&[30.0, 20.0, 10.0]);
        assert_eq!(
            population.compute_fitness_stats(),
            Some(FitnessStats {
                min: 10.0,
                mean: 20.0,
                max: 30.0,
            })
        );
        assert_eq!(Population::from_individuals(Vec::new()).compute_fitness_stats(), None);
    }

    #[test]
    fn test_evolve_keeps_elites_and_breeds_from_top_half() {
        let population = ranked(&[50.0, 40.0, 30.0, 20.0, 10.0, 0.0]);
        let evolver = PopulationEvolver {
            elite_count: 3,
            parent_fraction: 2,
            mutation_rate: 0.0,
            mutation_sigma: 0.2,
        };
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..20 {
            let next = evolver.evolve(&population, &mut rng).unwrap();
            assert_eq!(next.individuals().len(), 6);
            for (i, ind) in next.individuals()[..3].iter().enumerate() {
                assert_eq!(ind.genome(), population.individuals()[i].genome());
            }
            // without mutation, children only carry genes of the top 3
            for ind in &next.individuals()[3..] {
                assert!(ind.genome().as_slice().iter().all(|g| *g < 3.0));
            }
        }
    }

    #[test]
    fn test_evolve_rejects_invalid_sigma() {
        let population = ranked(&[1.0, 0.0]);
        let evolver = PopulationEvolver {
            elite_count: 1,
            parent_fraction: 2,
            mutation_rate: 0.1,
            mutation_sigma: f32::NAN,
        };
        let mut rng = Pcg32::seed_from_u64(0);
        assert!(evolver.evolve(&population, &mut rng).is_err());
    }

    #[test]
    fn test_genocide_keeps_champion_only() {
        let population = ranked(&[50.0, 40.0, 30.0, 20.0]);
        let mut rng = Pcg32::seed_from_u64(11);
        let next = population.genocide(&mut rng);
        assert_eq!(next.individuals().len(), 4);
        assert_eq!(next.champion().unwrap().genome(), population.individuals()[0].genome());
        assert_eq!(next.champion().unwrap().fitness(), 50.0);
        for ind in &next.individuals()[1..] {
            assert_eq!(ind.genome().len(), 4);
            assert!(ind.genome().as_slice().iter().all(|g| (-1.0..=1.0).contains(g)));
        }
    }
}
