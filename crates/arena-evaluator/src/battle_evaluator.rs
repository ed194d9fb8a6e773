use std::{fmt, ops::AddAssign};

use arena_engine::{Battle, BattleError, BattleState, Catalog, Combatant, EncounterTable};
use rand::SeedableRng as _;
use rand_pcg::Pcg32;

use crate::{
    decision::{DecisionEngine, HeroPolicy},
    network::PolicyNetwork,
};

/// Everything the fitness function needs to know about a finished battle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BattleSummary {
    pub outcome: BattleState,
    /// Turns completed before the deciding one.
    pub turns: usize,
    pub hero_hp_fraction: f32,
    pub damage_dealt: f32,
    pub foe_max_hp_total: f32,
    pub healing: f32,
    /// The hero knew an affordable self-heal when the battle ended.
    pub heal_available: bool,
}

impl BattleSummary {
    #[must_use]
    pub fn from_battle(battle: &Battle<'_>) -> Self {
        let catalog = battle.catalog();
        let hero = battle.hero();
        let heal_available = hero.is_some_and(|hero| {
            hero.usable_moves(catalog)
                .into_iter()
                .any(|id| catalog.move_def(id).is_self_heal())
        });
        Self {
            outcome: battle.state(),
            turns: if battle.state().is_finished() {
                battle.turn().saturating_sub(1)
            } else {
                battle.turn()
            },
            hero_hp_fraction: hero.map_or(0.0, Combatant::hp_fraction),
            damage_dealt: battle.hero_damage_dealt(),
            foe_max_hp_total: battle.foe_max_hp_total(),
            healing: battle.hero_healing(),
            heal_available,
        }
    }
}

pub trait FitnessFunction: fmt::Debug + Send + Sync {
    fn battle_fitness(&self, summary: &BattleSummary) -> f32;
}

/// Rewards damage, healing and fast, healthy victories; punishes losses,
/// especially losses with an unused heal.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultFitness;

impl FitnessFunction for DefaultFitness {
    #[expect(clippy::cast_precision_loss)]
    fn battle_fitness(&self, summary: &BattleSummary) -> f32 {
        let damage_score = summary.damage_dealt / summary.foe_max_hp_total.max(100.0) * 200.0;
        let healing_score = summary.healing * 2.0;
        let outcome_score = match summary.outcome {
            BattleState::Victory => {
                800.0
                    + (50.0 - summary.turns as f32) * 20.0
                    + summary.hero_hp_fraction * 100.0
            }
            BattleState::Defeat if summary.heal_available => -800.0,
            BattleState::Defeat => -400.0,
            BattleState::Exhausted => -300.0,
            BattleState::Running => 0.0,
        };
        (damage_score + healing_score + outcome_score).max(0.0)
    }
}

/// Battle outcome counts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
}

impl Tally {
    pub fn record(&mut self, outcome: BattleState) {
        match outcome {
            BattleState::Victory => self.wins += 1,
            BattleState::Exhausted => self.draws += 1,
            BattleState::Defeat => self.losses += 1,
            BattleState::Running => {}
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.wins + self.draws + self.losses
    }

    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn win_rate(&self) -> f32 {
        if self.total() == 0 {
            return 0.0;
        }
        self.wins as f32 / self.total() as f32
    }
}

impl AddAssign for Tally {
    fn add_assign(&mut self, rhs: Self) {
        self.wins += rhs.wins;
        self.draws += rhs.draws;
        self.losses += rhs.losses;
    }
}

/// Mean fitness of one network over a set of trials.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialReport {
    pub fitness: f32,
    pub tally: Tally,
}

/// Plays seeded random encounters with a learned hero and scores them.
#[derive(Debug, Clone)]
pub struct BattleEvaluator<F = DefaultFitness> {
    encounters: EncounterTable,
    fitness: F,
}

impl BattleEvaluator {
    #[must_use]
    pub fn new(encounters: EncounterTable) -> Self {
        Self::with_fitness(encounters, DefaultFitness)
    }
}

impl<F> BattleEvaluator<F>
where
    F: FitnessFunction,
{
    #[must_use]
    pub fn with_fitness(encounters: EncounterTable, fitness: F) -> Self {
        Self {
            encounters,
            fitness,
        }
    }

    #[must_use]
    pub fn encounters(&self) -> &EncounterTable {
        &self.encounters
    }

    /// Plays the encounter rolled from `seed` to completion.
    pub fn play_battle(
        &self,
        catalog: &Catalog,
        engine: &DecisionEngine<'_>,
        seed: u64,
    ) -> Result<BattleSummary, BattleError> {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut battle = self.encounters.build_battle(catalog, &mut rng)?;
        let outcome = battle.run(engine)?;
        tracing::trace!(seed, ?outcome, turns = battle.turn(), "battle finished");
        Ok(BattleSummary::from_battle(&battle))
    }

    /// Plays one battle per seed and averages the fitness.
    #[expect(clippy::cast_precision_loss)]
    pub fn evaluate(
        &self,
        catalog: &Catalog,
        network: &PolicyNetwork,
        seeds: &[u64],
    ) -> Result<TrialReport, BattleError> {
        let engine = DecisionEngine::new(catalog, HeroPolicy::Learned(network.clone()));
        let mut total_fitness = 0.0;
        let mut tally = Tally::default();
        for &seed in seeds {
            let summary = self.play_battle(catalog, &engine, seed)?;
            total_fitness += self.fitness.battle_fitness(&summary);
            tally.record(summary.outcome);
        }
        Ok(TrialReport {
            fitness: total_fitness / seeds.len().max(1) as f32,
            tally,
        })
    }
}
