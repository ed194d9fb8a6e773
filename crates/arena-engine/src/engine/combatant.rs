use serde::{Deserialize, Serialize};

use crate::{Catalog, CharacterId, CharacterTemplate, Element, MoveId, StatBlock};

/// Battle-scoped identifier of a combatant (its index in the roster).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct BattleId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant)]
pub enum Side {
    Hero,
    Foe,
}

/// A participant of a single battle.
///
/// Health and both resource pools are independently clamped to `[0, cap]` by
/// every mutator. Health reaching zero marks the combatant as dead; any
/// positive `set_*` call marks it alive again.
#[derive(Debug, Clone)]
pub struct Combatant {
    id: BattleId,
    character: CharacterId,
    name: String,
    side: Side,
    alive: bool,
    stats: StatBlock,
    hp: f32,
    sp: f32,
    mp: f32,
    moves: Vec<MoveId>,
}

impl Combatant {
    /// Creates a combatant with full health, half SP and full MP.
    #[must_use]
    pub fn new(id: BattleId, character: CharacterId, template: &CharacterTemplate, side: Side) -> Self {
        let stats = template.stats.clone();
        Self {
            id,
            character,
            name: template.name.clone(),
            side,
            alive: stats.hp > 0.0,
            hp: stats.hp,
            sp: 0.5 * stats.sp,
            mp: stats.mp,
            stats,
            moves: template.movelist.clone(),
        }
    }

    #[must_use]
    pub fn id(&self) -> BattleId {
        self.id
    }

    #[must_use]
    pub fn character(&self) -> CharacterId {
        self.character
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn side(&self) -> Side {
        self.side
    }

    #[must_use]
    pub fn is_hero(&self) -> bool {
        self.side.is_hero()
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    #[must_use]
    pub fn stats(&self) -> &StatBlock {
        &self.stats
    }

    #[must_use]
    pub fn hp(&self) -> f32 {
        self.hp
    }

    #[must_use]
    pub fn sp(&self) -> f32 {
        self.sp
    }

    #[must_use]
    pub fn mp(&self) -> f32 {
        self.mp
    }

    /// Every move this combatant knows, usable or not.
    #[must_use]
    pub fn moves(&self) -> &[MoveId] {
        &self.moves
    }

    /// Current health as a fraction of its cap.
    #[must_use]
    pub fn hp_fraction(&self) -> f32 {
        ratio(self.hp, self.stats.hp)
    }

    /// Adds a move to the known list. Returns `false` (and logs a warning)
    /// when the move was already known.
    pub fn add_move(&mut self, move_id: MoveId) -> bool {
        if self.moves.contains(&move_id) {
            tracing::warn!(combatant = %self.id, %move_id, "move already known, ignoring duplicate");
            return false;
        }
        self.moves.push(move_id);
        true
    }

    /// Moves whose SP and MP costs are currently affordable, in move-list order.
    #[must_use]
    pub fn usable_moves(&self, catalog: &Catalog) -> Vec<MoveId> {
        self.moves
            .iter()
            .copied()
            .filter(|id| catalog.move_def(*id).is_affordable(self.sp, self.mp))
            .collect()
    }

    pub fn set_hp(&mut self, value: f32) {
        self.hp = value.clamp(0.0, self.stats.hp);
        self.alive = self.hp > 0.0;
    }

    /// Applies a health delta and returns the realized (post-clamp) change.
    pub fn add_hp(&mut self, delta: f32) -> f32 {
        let before = self.hp;
        self.set_hp(self.hp + delta);
        self.hp - before
    }

    pub fn set_sp(&mut self, value: f32) {
        self.sp = value.clamp(0.0, self.stats.sp);
        if value > 0.0 {
            self.alive = true;
        }
    }

    pub fn add_sp(&mut self, delta: f32) {
        self.sp = (self.sp + delta).clamp(0.0, self.stats.sp);
    }

    pub fn set_mp(&mut self, value: f32) {
        self.mp = value.clamp(0.0, self.stats.mp);
        if value > 0.0 {
            self.alive = true;
        }
    }

    pub fn add_mp(&mut self, delta: f32) {
        self.mp = (self.mp + delta).clamp(0.0, self.stats.mp);
    }

    /// Public view of this combatant as exposed to decision makers.
    #[must_use]
    pub fn view(&self) -> CombatantView {
        CombatantView {
            id: self.id,
            character: self.character,
            side: self.side,
            alive: self.alive,
            element: self.stats.element,
            hp: self.hp,
            max_hp: self.stats.hp,
            sp: self.sp,
            max_sp: self.stats.sp,
            mp: self.mp,
        }
    }
}

/// Snapshot of one combatant's public state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombatantView {
    pub id: BattleId,
    pub character: CharacterId,
    pub side: Side,
    pub alive: bool,
    pub element: Element,
    pub hp: f32,
    pub max_hp: f32,
    pub sp: f32,
    pub max_sp: f32,
    pub mp: f32,
}

impl CombatantView {
    /// Whether this combatant is alive and fighting on the other side from `other`.
    #[must_use]
    pub fn is_living_opponent_of(&self, other: &CombatantView) -> bool {
        self.alive && self.side != other.side
    }
}

/// `value / max`, or `0.0` when `max` is not positive.
#[must_use]
pub fn ratio(value: f32, max: f32) -> f32 {
    if max > 0.0 { value / max } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn combatant() -> Combatant {
        let template = CharacterTemplate {
            name: "Dummy".to_owned(),
            stats: StatBlock::default(),
            movelist: vec![MoveId(0)],
        };
        Combatant::new(BattleId(0), CharacterId(0), &template, Side::Hero)
    }

    #[test]
    fn test_initial_pools() {
        let c = combatant();
        assert!(c.is_alive());
        assert_eq!(c.hp(), 100.0);
        assert_eq!(c.sp(), 10.0);
        assert_eq!(c.mp(), 20.0);
    }

    #[test]
    fn test_zero_health_cap_starts_dead() {
        let template = CharacterTemplate {
            name: "Husk".to_owned(),
            stats: StatBlock {
                hp: 0.0,
                ..StatBlock::default()
            },
            movelist: vec![MoveId(0)],
        };
        let c = Combatant::new(BattleId(0), CharacterId(0), &template, Side::Foe);
        assert_eq!(c.hp(), 0.0);
        assert!(!c.is_alive());
        assert!(!c.view().alive);
    }

    #[test]
    fn test_add_hp_clamps_and_kills() {
        let mut c = combatant();
        assert_eq!(c.add_hp(-30.0), -30.0);
        assert_eq!(c.hp(), 70.0);
        assert_eq!(c.add_hp(-1_000.0), -70.0);
        assert_eq!(c.hp(), 0.0);
        assert!(!c.is_alive());
    }

    #[test]
    fn test_add_hp_realized_heal_is_capped() {
        let mut c = combatant();
        c.add_hp(-10.0);
        assert_eq!(c.add_hp(60.0), 10.0);
        assert_eq!(c.hp(), 100.0);
    }

    #[test]
    fn test_positive_mutators_revive() {
        let mut c = combatant();
        c.set_hp(-5.0);
        assert_eq!(c.hp(), 0.0);
        assert!(!c.is_alive());
        c.add_hp(5.0);
        assert!(c.is_alive());

        c.set_hp(0.0);
        assert!(!c.is_alive());
        c.set_sp(1.0);
        assert!(c.is_alive());

        c.set_hp(0.0);
        c.set_mp(1.0);
        assert!(c.is_alive());
    }

    #[test]
    fn test_resource_pools_stay_in_range() {
        let mut c = combatant();
        for delta in [-1e9, 3.0, 1e9, -7.5, f32::MAX, -f32::MAX] {
            c.add_sp(delta);
            c.add_mp(delta);
            assert!((0.0..=20.0).contains(&c.sp()));
            assert!((0.0..=20.0).contains(&c.mp()));
            c.set_sp(delta);
            c.set_mp(delta);
            assert!((0.0..=20.0).contains(&c.sp()));
            assert!((0.0..=20.0).contains(&c.mp()));
        }
        c.add_mp(-100.0);
        assert_eq!(c.mp(), 0.0);
        assert_eq!(c.hp(), 100.0);
    }

    #[test]
    fn test_add_move_ignores_duplicates() {
        let mut c = combatant();
        assert!(!c.add_move(MoveId(0)));
        assert!(c.add_move(MoveId(1)));
        assert_eq!(c.moves(), &[MoveId(0), MoveId(1)]);
    }

    #[test]
    fn test_move_lists_are_independent() {
        let template = CharacterTemplate {
            name: "Dummy".to_owned(),
            stats: StatBlock::default(),
            movelist: Vec::new(),
        };
        let mut a = Combatant::new(BattleId(0), CharacterId(0), &template, Side::Hero);
        let b = Combatant::new(BattleId(1), CharacterId(0), &template, Side::Foe);
        a.add_move(MoveId(3));
        assert_eq!(a.moves(), &[MoveId(3)]);
        assert!(b.moves().is_empty());
    }
}
