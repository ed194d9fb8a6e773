use crate::{
    BattleError, BattleId, Catalog, CharacterId, Combatant, CombatantView, DamageType,
    MoveDefinition, MoveId, Side, StatBlock, TargetMode, type_multiplier,
};

/// Completed turns after which a battle is declared a draw.
pub const TURN_LIMIT: usize = 100;

/// Fraction of max SP the hero regains at the end of each of its turns.
pub const HERO_SP_REGEN: f32 = 0.2;

/// A chosen move and the combatants it is applied to, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub move_id: MoveId,
    pub targets: Vec<BattleId>,
}

/// Decides what the acting combatant does this turn.
///
/// Returning `None` means the actor has no valid target; the battle forfeits
/// its turn.
pub trait ActionSelector {
    fn select_action(
        &self,
        actor: &CombatantView,
        snapshot: &[CombatantView],
        usable_moves: &[MoveId],
    ) -> Option<Action>;
}

impl<F> ActionSelector for F
where
    F: Fn(&CombatantView, &[CombatantView], &[MoveId]) -> Option<Action>,
{
    fn select_action(
        &self,
        actor: &CombatantView,
        snapshot: &[CombatantView],
        usable_moves: &[MoveId],
    ) -> Option<Action> {
        self(actor, snapshot, usable_moves)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum BattleState {
    Running,
    /// Every foe is dead.
    Victory,
    /// Every hero is dead.
    Defeat,
    /// The turn limit was exceeded; counts as a draw.
    Exhausted,
}

impl BattleState {
    #[must_use]
    pub fn is_finished(self) -> bool {
        !self.is_running()
    }
}

/// Effect of a move on one target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveEffect {
    Damage {
        target: BattleId,
        /// Damage rolled by the damage formula.
        damage: f32,
        /// Health actually removed from the target.
        dealt: f32,
        multiplier: f32,
    },
    Heal {
        target: BattleId,
        /// Health actually restored.
        healed: f32,
    },
}

/// What happened during one turn.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnRecord {
    Acted {
        turn: usize,
        actor: BattleId,
        move_id: MoveId,
        effects: Vec<MoveEffect>,
    },
    Forfeited {
        turn: usize,
        actor: BattleId,
    },
}

/// A single battle between heroes and foes.
///
/// Combatants act in roster order, skipping the dead. Each [`step`](Self::step)
/// resolves exactly one turn.
#[derive(Debug, Clone)]
pub struct Battle<'a> {
    catalog: &'a Catalog,
    roster: Vec<Combatant>,
    attempt: usize,
    turn: usize,
    turn_limit: usize,
    state: BattleState,
    hero_damage_dealt: f32,
    hero_healing: f32,
}

impl<'a> Battle<'a> {
    #[must_use]
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            roster: Vec::new(),
            attempt: 0,
            turn: 0,
            turn_limit: TURN_LIMIT,
            state: BattleState::Running,
            hero_damage_dealt: 0.0,
            hero_healing: 0.0,
        }
    }

    #[must_use]
    pub fn with_turn_limit(mut self, turn_limit: usize) -> Self {
        self.turn_limit = turn_limit;
        self
    }

    #[must_use]
    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn add_hero(&mut self, character: CharacterId) -> Result<BattleId, BattleError> {
        self.add_combatant(character, Side::Hero)
    }

    pub fn add_foe(&mut self, character: CharacterId) -> Result<BattleId, BattleError> {
        self.add_combatant(character, Side::Foe)
    }

    fn add_combatant(&mut self, character: CharacterId, side: Side) -> Result<BattleId, BattleError> {
        let template = self
            .catalog
            .character(character)
            .ok_or(BattleError::UnknownCharacter(character))?;
        let id = BattleId(self.roster.len());
        self.roster
            .push(Combatant::new(id, character, template, side));
        Ok(id)
    }

    #[must_use]
    pub fn roster(&self) -> &[Combatant] {
        &self.roster
    }

    #[must_use]
    pub fn combatant(&self, id: BattleId) -> &Combatant {
        &self.roster[id.0]
    }

    pub fn combatant_mut(&mut self, id: BattleId) -> &mut Combatant {
        &mut self.roster[id.0]
    }

    /// The first hero of the roster.
    #[must_use]
    pub fn hero(&self) -> Option<&Combatant> {
        self.roster.iter().find(|c| c.is_hero())
    }

    /// Public state of every combatant, in roster order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<CombatantView> {
        self.roster.iter().map(Combatant::view).collect()
    }

    #[must_use]
    pub fn state(&self) -> BattleState {
        self.state
    }

    /// Number of completed (or forfeited) turns.
    #[must_use]
    pub fn turn(&self) -> usize {
        self.turn
    }

    /// Total health removed from opponents by heroes.
    #[must_use]
    pub fn hero_damage_dealt(&self) -> f32 {
        self.hero_damage_dealt
    }

    /// Total health restored by heroes.
    #[must_use]
    pub fn hero_healing(&self) -> f32 {
        self.hero_healing
    }

    #[must_use]
    pub fn foe_max_hp_total(&self) -> f32 {
        self.roster
            .iter()
            .filter(|c| c.side().is_foe())
            .map(|c| c.stats().hp)
            .sum()
    }

    fn has_both_sides(&self) -> bool {
        self.roster.iter().any(Combatant::is_hero) && self.roster.iter().any(|c| !c.is_hero())
    }

    fn side_alive(&self, side: Side) -> bool {
        self.roster
            .iter()
            .any(|c| c.side() == side && c.is_alive())
    }

    /// Finds the next living combatant, advancing the attempt counter past
    /// dead ones.
    fn next_actor(&mut self) -> Option<BattleId> {
        for _ in 0..self.roster.len() {
            let index = self.attempt % self.roster.len();
            if self.roster[index].is_alive() {
                return Some(BattleId(index));
            }
            self.attempt += 1;
        }
        None
    }

    /// Resolves one turn.
    pub fn step<S>(&mut self, selector: &S) -> Result<TurnRecord, BattleError>
    where
        S: ActionSelector + ?Sized,
    {
        if !self.has_both_sides() {
            return Err(BattleError::IncompleteRoster);
        }
        // health may have been edited through `combatant_mut` since the last turn
        self.state = self.compute_state();
        if self.state.is_finished() {
            return Err(BattleError::Finished);
        }

        let turn = self.turn;
        let actor = self.next_actor().ok_or(BattleError::Finished)?;
        let snapshot = self.snapshot();
        let usable_moves = self.roster[actor.0].usable_moves(self.catalog);
        let action = selector.select_action(&snapshot[actor.0], &snapshot, &usable_moves);

        let record = match action {
            Some(action) => {
                let effects = action
                    .targets
                    .iter()
                    .map(|target| self.apply_move(actor, *target, action.move_id))
                    .collect();

                let move_def = self.catalog.move_def(action.move_id);
                let combatant = &mut self.roster[actor.0];
                combatant.add_sp(-move_def.sp_cost);
                combatant.add_mp(-move_def.mp_cost);
                if combatant.is_hero() {
                    combatant.add_sp(HERO_SP_REGEN * combatant.stats().sp);
                }

                TurnRecord::Acted {
                    turn,
                    actor,
                    move_id: action.move_id,
                    effects,
                }
            }
            None => {
                tracing::warn!(
                    actor = self.roster[actor.0].name(),
                    turn,
                    "no valid targets, turn forfeited"
                );
                TurnRecord::Forfeited { turn, actor }
            }
        };

        self.attempt += 1;
        self.turn += 1;
        self.state = self.compute_state();
        Ok(record)
    }

    /// Steps until the battle finishes and returns the final state.
    pub fn run<S>(&mut self, selector: &S) -> Result<BattleState, BattleError>
    where
        S: ActionSelector + ?Sized,
    {
        if !self.has_both_sides() {
            return Err(BattleError::IncompleteRoster);
        }
        self.state = self.compute_state();
        while self.state.is_running() {
            self.step(selector)?;
        }
        Ok(self.state)
    }

    fn compute_state(&self) -> BattleState {
        if !self.side_alive(Side::Hero) {
            BattleState::Defeat
        } else if !self.side_alive(Side::Foe) {
            BattleState::Victory
        } else if self.turn > self.turn_limit {
            BattleState::Exhausted
        } else {
            BattleState::Running
        }
    }

    /// Applies `move_id` used by `actor` to `target`.
    ///
    /// Self-targeting moves heal; every other move deals damage.
    pub fn apply_move(&mut self, actor: BattleId, target: BattleId, move_id: MoveId) -> MoveEffect {
        let move_def = self.catalog.move_def(move_id);
        let actor_is_hero = self.roster[actor.0].is_hero();

        if move_def.target.is_self_target() {
            let target_combatant = &mut self.roster[target.0];
            let amount = heal_amount(move_def, target_combatant.stats());
            let healed = target_combatant.add_hp(amount);
            if actor_is_hero {
                self.hero_healing += healed;
            }
            tracing::trace!(actor = %actor, move_name = %move_def.name, healed, "heal");
            return MoveEffect::Heal { target, healed };
        }

        let (damage, multiplier) = damage_amount(
            move_def,
            self.roster[actor.0].stats(),
            self.roster[target.0].stats(),
        );
        let dealt = -self.roster[target.0].add_hp(-damage);
        if actor_is_hero {
            self.hero_damage_dealt += dealt;
        }
        tracing::trace!(actor = %actor, target = %target, move_name = %move_def.name, damage, "attack");
        MoveEffect::Damage {
            target,
            damage,
            dealt,
            multiplier,
        }
    }
}

/// Damage of an offensive move and the elemental multiplier used.
///
/// `damage = max(1, trunc(power × multiplier × (100 + diff) / 100))` where `diff`
/// is the attacker's offensive stat minus the defender's defensive stat for
/// the move's damage type.
#[must_use]
pub fn damage_amount(
    move_def: &MoveDefinition,
    attacker: &StatBlock,
    defender: &StatBlock,
) -> (f32, f32) {
    let multiplier = type_multiplier(move_def.element, defender.element);
    let stat_diff = match move_def.damage_type {
        DamageType::Physical => attacker.strength - defender.defense,
        DamageType::Ranged => attacker.dexterity - defender.defense,
        DamageType::Magic => attacker.intelligence - defender.wisdom,
    };
    // divide last so integral stats give exact results before truncation
    let damage = (move_def.base_power * multiplier * (100.0 + stat_diff) / 100.0)
        .trunc()
        .max(1.0);
    (damage, multiplier)
}

/// Requested heal of a restorative move: `max_hp × power / 100`.
#[must_use]
pub fn heal_amount(move_def: &MoveDefinition, target: &StatBlock) -> f32 {
    debug_assert_eq!(move_def.target, TargetMode::SelfTarget);
    target.hp * move_def.base_power / 100.0
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::{CharacterTemplate, Element, FunctionKind};

    use super::*;

    fn move_def(target: TargetMode, damage_type: DamageType, element: Element, power: f32) -> MoveDefinition {
        MoveDefinition {
            name: format!("{target}-{power}"),
            function: FunctionKind::Attack,
            damage_type,
            target,
            element,
            base_power: power,
            sp_cost: 0.0,
            mp_cost: 0.0,
        }
    }

    fn stats(hp: f32, strength: f32, defense: f32) -> StatBlock {
        StatBlock {
            hp,
            strength,
            defense,
            ..StatBlock::default()
        }
    }

    fn catalog() -> Catalog {
        let mut moves = BTreeMap::new();
        moves.insert(
            MoveId(0),
            move_def(TargetMode::Single, DamageType::Physical, Element::Normal, 40.0),
        );
        moves.insert(
            MoveId(1),
            move_def(TargetMode::SelfTarget, DamageType::Magic, Element::Light, 30.0),
        );
        let mut heal_with_cost = move_def(TargetMode::SelfTarget, DamageType::Magic, Element::Light, 30.0);
        heal_with_cost.sp_cost = 4.0;
        heal_with_cost.mp_cost = 50.0;
        moves.insert(MoveId(2), heal_with_cost);

        let mut characters = BTreeMap::new();
        characters.insert(
            CharacterId(0),
            CharacterTemplate {
                name: "Hero".to_owned(),
                stats: stats(200.0, 30.0, 10.0),
                movelist: vec![MoveId(0), MoveId(1), MoveId(2)],
            },
        );
        characters.insert(
            CharacterId(1),
            CharacterTemplate {
                name: "Slime".to_owned(),
                stats: stats(100.0, 10.0, 10.0),
                movelist: vec![MoveId(0)],
            },
        );
        characters.insert(
            CharacterId(2),
            CharacterTemplate {
                name: "Wall".to_owned(),
                stats: stats(1_000_000.0, 0.0, 1_000.0),
                movelist: vec![MoveId(0)],
            },
        );
        Catalog::new(moves, characters).unwrap()
    }

    fn attack_first_opponent(
        actor: &CombatantView,
        snapshot: &[CombatantView],
        _usable: &[MoveId],
    ) -> Option<Action> {
        let target = snapshot.iter().find(|c| c.is_living_opponent_of(actor))?;
        Some(Action {
            move_id: MoveId(0),
            targets: vec![target.id],
        })
    }

    fn always_forfeit(_: &CombatantView, _: &[CombatantView], _: &[MoveId]) -> Option<Action> {
        None
    }

    #[test]
    fn test_damage_formula() {
        let mv = move_def(TargetMode::Single, DamageType::Physical, Element::Fire, 50.0);
        let attacker = stats(100.0, 30.0, 10.0);
        let mut defender = stats(100.0, 10.0, 10.0);
        defender.element = Element::Plant;
        assert_eq!(damage_amount(&mv, &attacker, &defender), (120.0, 2.0));
    }

    #[test]
    fn test_damage_floor_is_one() {
        let mv = move_def(TargetMode::Single, DamageType::Physical, Element::Normal, 40.0);
        let attacker = stats(100.0, 0.0, 10.0);
        let defender = stats(100.0, 10.0, 500.0);
        assert_eq!(damage_amount(&mv, &attacker, &defender).0, 1.0);
    }

    #[test]
    fn test_damage_uses_stat_pair_of_damage_type() {
        let attacker = StatBlock {
            strength: 10.0,
            dexterity: 30.0,
            intelligence: 60.0,
            ..StatBlock::default()
        };
        let defender = StatBlock {
            defense: 10.0,
            wisdom: 40.0,
            ..StatBlock::default()
        };
        let ranged = move_def(TargetMode::Single, DamageType::Ranged, Element::Normal, 50.0);
        let magic = move_def(TargetMode::Single, DamageType::Magic, Element::Normal, 50.0);
        assert_eq!(damage_amount(&ranged, &attacker, &defender).0, 60.0);
        assert_eq!(damage_amount(&magic, &attacker, &defender).0, 60.0);
    }

    #[test]
    fn test_heal_amount() {
        let mv = move_def(TargetMode::SelfTarget, DamageType::Magic, Element::Light, 30.0);
        assert_eq!(heal_amount(&mv, &stats(200.0, 0.0, 0.0)), 60.0);
        assert_eq!(heal_amount(&mv, &stats(150.0, 0.0, 0.0)), 45.0);
        let mut mv = mv;
        mv.base_power = 25.0;
        assert_eq!(heal_amount(&mv, &stats(333.0, 0.0, 0.0)), 83.25);
    }

    #[test]
    fn test_damage_is_exact_for_integral_stats() {
        let mv = move_def(TargetMode::Single, DamageType::Physical, Element::Normal, 35.0);
        // 35 × 130 / 100 = 45.5
        assert_eq!(damage_amount(&mv, &stats(100.0, 40.0, 10.0), &stats(100.0, 0.0, 10.0)).0, 45.0);
        // 70 × 70 / 100 = 49
        let mv = move_def(TargetMode::Single, DamageType::Physical, Element::Normal, 70.0);
        assert_eq!(damage_amount(&mv, &stats(100.0, 0.0, 10.0), &stats(100.0, 0.0, 30.0)).0, 49.0);
    }

    #[test]
    fn test_single_target_physical_hit() {
        let catalog = catalog();
        let mut battle = Battle::new(&catalog);
        let hero = battle.add_hero(CharacterId(0)).unwrap();
        let foe = battle.add_foe(CharacterId(1)).unwrap();

        let record = battle.step(&attack_first_opponent).unwrap();
        assert_eq!(
            record,
            TurnRecord::Acted {
                turn: 0,
                actor: hero,
                move_id: MoveId(0),
                effects: vec![MoveEffect::Damage {
                    target: foe,
                    damage: 48.0,
                    dealt: 48.0,
                    multiplier: 1.0,
                }],
            }
        );
        assert_eq!(battle.combatant(foe).hp(), 52.0);
        assert_eq!(battle.hero_damage_dealt(), 48.0);
        assert_eq!(battle.turn(), 1);
    }

    #[test]
    fn test_realized_damage_is_capped_by_remaining_health() {
        let catalog = catalog();
        let mut battle = Battle::new(&catalog);
        let hero = battle.add_hero(CharacterId(0)).unwrap();
        let foe = battle.add_foe(CharacterId(1)).unwrap();
        battle.combatant_mut(foe).set_hp(10.0);

        let effect = battle.apply_move(hero, foe, MoveId(0));
        assert!(matches!(effect, MoveEffect::Damage { dealt, .. } if dealt == 10.0));
        assert!(!battle.combatant(foe).is_alive());
        assert_eq!(battle.hero_damage_dealt(), 10.0);
    }

    #[test]
    fn test_heal_is_clamped_by_headroom() {
        let catalog = catalog();
        let mut battle = Battle::new(&catalog);
        let hero = battle.add_hero(CharacterId(0)).unwrap();
        battle.add_foe(CharacterId(1)).unwrap();
        battle.combatant_mut(hero).set_hp(170.0);

        let effect = battle.apply_move(hero, hero, MoveId(1));
        assert_eq!(effect, MoveEffect::Heal { target: hero, healed: 30.0 });
        assert_eq!(battle.combatant(hero).hp(), 200.0);
        assert_eq!(battle.hero_healing(), 30.0);
    }

    #[test]
    fn test_foe_damage_is_not_tracked() {
        let catalog = catalog();
        let mut battle = Battle::new(&catalog);
        let hero = battle.add_hero(CharacterId(0)).unwrap();
        let foe = battle.add_foe(CharacterId(1)).unwrap();
        battle.apply_move(foe, hero, MoveId(0));
        assert_eq!(battle.hero_damage_dealt(), 0.0);
        assert!(battle.combatant(hero).hp() < 200.0);
    }

    #[test]
    fn test_costs_and_hero_regen() {
        let catalog = catalog();
        let mut battle = Battle::new(&catalog);
        let hero = battle.add_hero(CharacterId(0)).unwrap();
        battle.add_foe(CharacterId(1)).unwrap();

        let heal = |actor: &CombatantView, _: &[CombatantView], _: &[MoveId]| {
            Some(Action {
                move_id: MoveId(2),
                targets: vec![actor.id],
            })
        };
        battle.step(&heal).unwrap();
        let hero = battle.combatant(hero);
        // 10 SP - 4 cost + 20% of 20 regen
        assert_eq!(hero.sp(), 10.0);
        // cost larger than the pool clamps at zero
        assert_eq!(hero.mp(), 0.0);
    }

    #[test]
    fn test_foes_pay_costs_without_regen() {
        let catalog = catalog();
        let mut battle = Battle::new(&catalog);
        battle.add_hero(CharacterId(0)).unwrap();
        let foe = battle.add_foe(CharacterId(1)).unwrap();

        let foe_heals = |actor: &CombatantView, _: &[CombatantView], _: &[MoveId]| {
            actor.side.is_foe().then(|| Action {
                move_id: MoveId(2),
                targets: vec![actor.id],
            })
        };
        // hero forfeits, then the foe acts
        battle.step(&foe_heals).unwrap();
        let record = battle.step(&foe_heals).unwrap();
        assert!(matches!(record, TurnRecord::Acted { actor, .. } if actor == foe));
        let foe = battle.combatant(foe);
        // 10 SP - 4 cost, nothing regained
        assert_eq!(foe.sp(), 6.0);
        assert_eq!(foe.mp(), 0.0);
    }

    #[test]
    fn test_step_with_everyone_dead_reports_finished() {
        let catalog = catalog();
        let mut battle = Battle::new(&catalog);
        let hero = battle.add_hero(CharacterId(0)).unwrap();
        let foe = battle.add_foe(CharacterId(1)).unwrap();
        battle.combatant_mut(hero).set_hp(0.0);
        battle.combatant_mut(foe).set_hp(0.0);

        assert!(matches!(battle.step(&always_forfeit), Err(BattleError::Finished)));
        assert_eq!(battle.state(), BattleState::Defeat);
        assert_eq!(battle.run(&always_forfeit).unwrap(), BattleState::Defeat);
        assert_eq!(battle.turn(), 0);
    }

    #[test]
    fn test_state_follows_health_edits_between_turns() {
        let catalog = catalog();
        let mut battle = Battle::new(&catalog);
        battle.add_hero(CharacterId(0)).unwrap();
        let foe = battle.add_foe(CharacterId(1)).unwrap();
        battle.combatant_mut(foe).set_hp(0.0);
        assert_eq!(battle.run(&always_forfeit).unwrap(), BattleState::Victory);
        assert_eq!(battle.turn(), 0);
    }

    #[test]
    fn test_turn_order_skips_dead() {
        let catalog = catalog();
        let mut battle = Battle::new(&catalog);
        let hero = battle.add_hero(CharacterId(0)).unwrap();
        let dead = battle.add_foe(CharacterId(1)).unwrap();
        let alive = battle.add_foe(CharacterId(1)).unwrap();
        battle.combatant_mut(dead).set_hp(0.0);

        let actors = (0..4)
            .map(|_| match battle.step(&always_forfeit).unwrap() {
                TurnRecord::Forfeited { actor, .. } | TurnRecord::Acted { actor, .. } => actor,
            })
            .collect::<Vec<_>>();
        assert_eq!(actors, vec![hero, alive, hero, alive]);
    }

    #[test]
    fn test_forfeit_changes_nothing_but_counters() {
        let catalog = catalog();
        let mut battle = Battle::new(&catalog);
        battle.add_hero(CharacterId(0)).unwrap();
        battle.add_foe(CharacterId(1)).unwrap();
        let before = battle.snapshot();
        let record = battle.step(&always_forfeit).unwrap();
        assert!(matches!(record, TurnRecord::Forfeited { turn: 0, .. }));
        assert_eq!(battle.snapshot(), before);
        assert_eq!(battle.turn(), 1);
        assert!(battle.state().is_running());
    }

    #[test]
    fn test_victory() {
        let catalog = catalog();
        let mut battle = Battle::new(&catalog);
        battle.add_hero(CharacterId(0)).unwrap();
        battle.add_foe(CharacterId(1)).unwrap();
        assert_eq!(battle.run(&attack_first_opponent).unwrap(), BattleState::Victory);
        assert!(matches!(battle.step(&attack_first_opponent), Err(BattleError::Finished)));
    }

    #[test]
    fn test_defeat() {
        let catalog = catalog();
        let mut battle = Battle::new(&catalog);
        let hero = battle.add_hero(CharacterId(0)).unwrap();
        battle.add_foe(CharacterId(1)).unwrap();
        battle.combatant_mut(hero).set_hp(1.0);
        let only_foes_attack = |actor: &CombatantView, snapshot: &[CombatantView], usable: &[MoveId]| {
            if actor.side.is_hero() {
                None
            } else {
                attack_first_opponent(actor, snapshot, usable)
            }
        };
        assert_eq!(battle.run(&only_foes_attack).unwrap(), BattleState::Defeat);
        assert_eq!(battle.turn(), 2);
    }

    #[test]
    fn test_exhaustion_ends_battle() {
        let catalog = catalog();
        let mut battle = Battle::new(&catalog);
        battle.add_hero(CharacterId(0)).unwrap();
        let wall = battle.add_foe(CharacterId(2)).unwrap();
        let only_hero_attacks = |actor: &CombatantView, snapshot: &[CombatantView], usable: &[MoveId]| {
            if actor.side.is_hero() {
                attack_first_opponent(actor, snapshot, usable)
            } else {
                None
            }
        };
        assert_eq!(battle.run(&only_hero_attacks).unwrap(), BattleState::Exhausted);
        assert!(battle.combatant(wall).is_alive());
        assert_eq!(battle.turn(), TURN_LIMIT + 1);
    }

    #[test]
    fn test_incomplete_roster() {
        let catalog = catalog();
        let mut battle = Battle::new(&catalog);
        battle.add_hero(CharacterId(0)).unwrap();
        assert!(matches!(
            battle.step(&attack_first_opponent),
            Err(BattleError::IncompleteRoster)
        ));
        assert!(matches!(
            battle.add_foe(CharacterId(42)),
            Err(BattleError::UnknownCharacter(CharacterId(42)))
        ));
    }

    #[test]
    fn test_foe_max_hp_total() {
        let catalog = catalog();
        let mut battle = Battle::new(&catalog);
        battle.add_hero(CharacterId(0)).unwrap();
        battle.add_foe(CharacterId(1)).unwrap();
        battle.add_foe(CharacterId(1)).unwrap();
        assert_eq!(battle.foe_max_hp_total(), 200.0);
    }
}
