use rand::{Rng, seq::IndexedRandom as _};
use serde::{Deserialize, Serialize};

use crate::{Battle, BattleError, Catalog, CharacterId};

/// Describes how random battles are populated.
///
/// Each encounter has the hero plus either 1 to `max_foes` regular foes drawn
/// uniformly (with replacement) from `foes`, or, with probability
/// `1 / boss_odds`, the boss alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterTable {
    pub hero: CharacterId,
    pub foes: Vec<CharacterId>,
    pub boss: Option<CharacterId>,
    /// One boss encounter every `boss_odds` battles on average. `0` disables bosses.
    pub boss_odds: u32,
    pub max_foes: usize,
}

impl Default for EncounterTable {
    fn default() -> Self {
        Self {
            hero: CharacterId(0),
            foes: (1..=6).map(CharacterId).collect(),
            boss: Some(CharacterId(7)),
            boss_odds: 10,
            max_foes: 3,
        }
    }
}

impl EncounterTable {
    /// Draws the foe line-up for one battle.
    pub fn roll_foes<R>(&self, rng: &mut R) -> Result<Vec<CharacterId>, BattleError>
    where
        R: Rng + ?Sized,
    {
        let count = rng.random_range(1..=self.max_foes.max(1));
        let boss_round = self.boss_odds > 0 && rng.random_range(1..=self.boss_odds) == 1;
        if let (true, Some(boss)) = (boss_round, self.boss) {
            return Ok(vec![boss]);
        }
        (0..count)
            .map(|_| self.foes.choose(rng).copied().ok_or(BattleError::EmptyFoePool))
            .collect()
    }

    /// Builds a ready-to-run battle with a freshly rolled roster.
    pub fn build_battle<'a, R>(&self, catalog: &'a Catalog, rng: &mut R) -> Result<Battle<'a>, BattleError>
    where
        R: Rng + ?Sized,
    {
        let mut battle = Battle::new(catalog);
        battle.add_hero(self.hero)?;
        for foe in self.roll_foes(rng)? {
            battle.add_foe(foe)?;
        }
        Ok(battle)
    }
}
