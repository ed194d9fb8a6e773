//! Per-battle state and turn resolution.
//!
//! - [`Combatant`] - a participant with clamped health and resource pools
//! - [`Battle`] - the turn state machine (`Running` until `Victory`, `Defeat`
//!   or `Exhausted`)
//! - [`EncounterTable`] - random foe rosters for training and replay
//!
//! # Example
//!
//! ```
//! # use std::collections::BTreeMap;
//! use arena_engine::{
//!     Action, Battle, Catalog, CharacterId, CharacterTemplate, CombatantView, DamageType,
//!     Element, FunctionKind, MoveDefinition, MoveId, StatBlock, TargetMode,
//! };
//!
//! let strike = MoveDefinition {
//!     name: "Strike".to_owned(),
//!     function: FunctionKind::Attack,
//!     damage_type: DamageType::Physical,
//!     target: TargetMode::Single,
//!     element: Element::Normal,
//!     base_power: 40.0,
//!     sp_cost: 0.0,
//!     mp_cost: 0.0,
//! };
//! let fighter = CharacterTemplate {
//!     name: "Fighter".to_owned(),
//!     stats: StatBlock::default(),
//!     movelist: vec![MoveId(0)],
//! };
//! let catalog = Catalog::new(
//!     BTreeMap::from([(MoveId(0), strike)]),
//!     BTreeMap::from([(CharacterId(0), fighter)]),
//! )
//! .unwrap();
//!
//! let mut battle = Battle::new(&catalog);
//! battle.add_hero(CharacterId(0)).unwrap();
//! battle.add_foe(CharacterId(0)).unwrap();
//!
//! let hit_first_opponent = |actor: &CombatantView, snapshot: &[CombatantView], _: &[MoveId]| {
//!     let target = snapshot.iter().find(|c| c.is_living_opponent_of(actor))?;
//!     Some(Action { move_id: MoveId(0), targets: vec![target.id] })
//! };
//! let state = battle.run(&hit_first_opponent).unwrap();
//! assert!(state.is_victory());
//! ```

pub use self::{battle::*, combatant::*, encounter::*};

mod battle;
mod combatant;
mod encounter;
