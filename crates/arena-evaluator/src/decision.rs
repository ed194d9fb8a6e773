//! Move selection for every combatant.
//!
//! The [`DecisionEngine`] picks a strategy per decision from the actor's role:
//!
//! - foes always use the [scripted heuristic](scripted_action)
//! - the hero uses the configured [`HeroPolicy`]: the [learned policy](learned_action)
//!   scores every (move, target) pair with a [`PolicyNetwork`]
//!
//! Both strategies return `None` when there is nothing to target, which the
//! battle engine treats as a forfeited turn.

use arena_engine::{
    Action, ActionSelector, Catalog, CombatantView, MoveId, TargetMode,
};

use crate::{features::action_features, network::PolicyNetwork};

/// How the hero chooses its moves.
#[derive(Debug, Clone)]
pub enum HeroPolicy {
    /// The genome-free heuristic also used by foes.
    ScriptedHeuristic,
    /// Network-scored evaluation of every candidate action.
    Learned(PolicyNetwork),
    /// Operator-driven control. Not implemented; behaves like
    /// [`ScriptedHeuristic`](Self::ScriptedHeuristic).
    ManualInput,
}

/// Strategy resolved for a single decision.
#[derive(Debug, Clone, Copy)]
enum Strategy<'a> {
    Scripted,
    Learned(&'a PolicyNetwork),
}

/// Chooses actions for every combatant of a battle.
#[derive(Debug, Clone)]
pub struct DecisionEngine<'a> {
    catalog: &'a Catalog,
    hero_policy: HeroPolicy,
}

impl<'a> DecisionEngine<'a> {
    #[must_use]
    pub fn new(catalog: &'a Catalog, hero_policy: HeroPolicy) -> Self {
        Self {
            catalog,
            hero_policy,
        }
    }

    /// Shortcut for a hero driven by `network`.
    #[must_use]
    pub fn learned(catalog: &'a Catalog, network: PolicyNetwork) -> Self {
        Self::new(catalog, HeroPolicy::Learned(network))
    }

    #[must_use]
    pub fn hero_policy(&self) -> &HeroPolicy {
        &self.hero_policy
    }

    fn strategy_for(&self, actor: &CombatantView) -> Strategy<'_> {
        if actor.side.is_foe() {
            return Strategy::Scripted;
        }
        match &self.hero_policy {
            HeroPolicy::Learned(network) => Strategy::Learned(network),
            HeroPolicy::ScriptedHeuristic => Strategy::Scripted,
            HeroPolicy::ManualInput => {
                tracing::debug!("manual input is not implemented, using scripted heuristic");
                Strategy::Scripted
            }
        }
    }

    /// Selects a move and its targets for `actor`.
    #[must_use]
    pub fn choose_action(
        &self,
        actor: &CombatantView,
        snapshot: &[CombatantView],
        usable_moves: &[MoveId],
    ) -> Option<Action> {
        match self.strategy_for(actor) {
            Strategy::Scripted => scripted_action(self.catalog, actor, snapshot, usable_moves),
            Strategy::Learned(network) => {
                learned_action(self.catalog, network, actor, snapshot, usable_moves)
            }
        }
    }
}

impl ActionSelector for DecisionEngine<'_> {
    fn select_action(
        &self,
        actor: &CombatantView,
        snapshot: &[CombatantView],
        usable_moves: &[MoveId],
    ) -> Option<Action> {
        self.choose_action(actor, snapshot, usable_moves)
    }
}

fn living_opponents<'s>(
    actor: &'s CombatantView,
    snapshot: &'s [CombatantView],
) -> impl Iterator<Item = &'s CombatantView> + 's {
    snapshot
        .iter()
        .filter(move |c| c.is_living_opponent_of(actor))
}

/// Deterministic heuristic: the strongest non-self move, aimed at the weakest
/// opponent.
///
/// Picks the usable move with the highest base power among those that do not
/// target the user (first one wins ties). Multi-target moves hit every living
/// opponent; other moves hit the living opponent with the lowest absolute
/// health (first one wins ties).
///
/// When every usable move targets the user, the first move of the catalog is
/// used regardless of whether the actor knows or can afford it.
// FIXME: the first-catalog-move fallback ignores the actor's move list and costs.
#[must_use]
pub fn scripted_action(
    catalog: &Catalog,
    actor: &CombatantView,
    snapshot: &[CombatantView],
    usable_moves: &[MoveId],
) -> Option<Action> {
    let mut strongest = None;
    let mut best_power = f32::MIN;
    for &move_id in usable_moves {
        let move_def = catalog.move_def(move_id);
        if move_def.target != TargetMode::SelfTarget && move_def.base_power > best_power {
            strongest = Some(move_id);
            best_power = move_def.base_power;
        }
    }
    let move_id = strongest.unwrap_or_else(|| catalog.first_move_id());

    let targets = if catalog.move_def(move_id).target.is_multi() {
        living_opponents(actor, snapshot).map(|c| c.id).collect()
    } else {
        let mut weakest: Option<&CombatantView> = None;
        for opponent in living_opponents(actor, snapshot) {
            if weakest.is_none_or(|w| opponent.hp < w.hp) {
                weakest = Some(opponent);
            }
        }
        weakest.map(|c| c.id).into_iter().collect::<Vec<_>>()
    };

    if targets.is_empty() {
        return None;
    }
    Some(Action { move_id, targets })
}

/// Network-driven selection: scores every (move, target) candidate and keeps
/// the best.
///
/// Candidate targets per move: the actor itself for self-targeting moves,
/// each living opponent for single-target moves, and the first living opponent
/// as a stand-in for multi-target moves (the chosen action still hits every
/// living opponent). Moves without any candidate are skipped. Ties keep the
/// earliest candidate.
#[must_use]
pub fn learned_action(
    catalog: &Catalog,
    network: &PolicyNetwork,
    actor: &CombatantView,
    snapshot: &[CombatantView],
    usable_moves: &[MoveId],
) -> Option<Action> {
    let mut best: Option<(f32, Action)> = None;

    for &move_id in usable_moves {
        let move_def = catalog.move_def(move_id);
        let candidates: Vec<&CombatantView> = match move_def.target {
            TargetMode::SelfTarget => vec![actor],
            TargetMode::Multi => living_opponents(actor, snapshot).take(1).collect(),
            TargetMode::Single => living_opponents(actor, snapshot).collect(),
        };

        for target in candidates {
            let features = action_features(actor, target, move_def, snapshot);
            let score = network.predict(&features);
            if best.as_ref().is_some_and(|(best_score, _)| score <= *best_score) {
                continue;
            }
            let targets = if move_def.target.is_multi() {
                living_opponents(actor, snapshot).map(|c| c.id).collect()
            } else {
                vec![target.id]
            };
            best = Some((score, Action { move_id, targets }));
        }
    }

    best.map(|(_, action)| action)
}
