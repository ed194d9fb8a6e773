use rand::Rng;
use rand_distr::Normal;
use serde::{Deserialize, Serialize};

/// Initial weights are drawn uniformly from `[-INIT_RANGE, INIT_RANGE]`.
pub const INIT_RANGE: f32 = 1.0;

/// Most point mutations applied to a single child.
pub const MAX_MUTATION_POINTS: usize = 3;

/// Flat policy-network parameters. Serialized as a plain list of numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Genome(Vec<f32>);

impl From<Vec<f32>> for Genome {
    fn from(values: Vec<f32>) -> Self {
        Self(values)
    }
}

impl Genome {
    pub fn random<R>(len: usize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self(
            (0..len)
                .map(|_| rng.random_range(-INIT_RANGE..=INIT_RANGE))
                .collect(),
        )
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<f32> {
        self.0
    }

    /// `p1[..cut] ++ p2[cut..]`.
    ///
    /// # Panics
    ///
    /// Panics if the parents differ in length or `cut` is past the end.
    #[must_use]
    pub fn one_point_crossover(p1: &Self, p2: &Self, cut: usize) -> Self {
        assert_eq!(p1.len(), p2.len());
        let mut child = Vec::with_capacity(p1.len());
        child.extend_from_slice(&p1.0[..cut]);
        child.extend_from_slice(&p2.0[cut..]);
        Self(child)
    }

    /// One-point crossover with a cut drawn uniformly from `[0, len - 1]`.
    pub fn crossover<R>(p1: &Self, p2: &Self, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        if p1.is_empty() {
            return p1.clone();
        }
        let cut = rng.random_range(0..p1.len());
        Self::one_point_crossover(p1, p2, cut)
    }

    /// With probability `rate`, perturbs 1 to [`MAX_MUTATION_POINTS`] random
    /// positions by `noise`. Returns whether the genome changed.
    ///
    /// Rates above 1 always mutate.
    pub fn mutate<R>(&mut self, rate: f64, noise: Normal<f32>, rng: &mut R) -> bool
    where
        R: Rng + ?Sized,
    {
        if self.is_empty() || !rng.random_bool(rate.clamp(0.0, 1.0)) {
            return false;
        }
        let points = rng.random_range(1..=MAX_MUTATION_POINTS);
        for _ in 0..points {
            let index = rng.random_range(0..self.len());
            self.0[index] += rng.sample(noise);
        }
        true
    }
}
