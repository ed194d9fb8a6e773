//! Turn-based battle rules for the arena.
//!
//! - [`core`] - static data: the elemental [type chart](type_multiplier), move and
//!   character definitions, and the immutable [`Catalog`]
//! - [`engine`] - per-battle state: [`Combatant`], the [`Battle`] turn state machine
//!   and random [`EncounterTable`] rosters
//!
//! The engine does not decide what combatants do. Every turn it asks an
//! [`ActionSelector`] for a move and its targets, then resolves the effects.

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("unknown {kind} code: {code}")]
pub struct UnknownCodeError {
    pub kind: &'static str,
    pub code: u8,
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum CatalogError {
    #[display("move catalog is empty")]
    NoMoves,
    #[display("character {character} references unknown move {move_id}")]
    UnknownMove {
        character: CharacterId,
        move_id: MoveId,
    },
    #[display("character {character} has a negative or non-finite resource cap")]
    InvalidStats { character: CharacterId },
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum BattleError {
    #[display("unknown character {_0}")]
    UnknownCharacter(#[error(not(source))] CharacterId),
    #[display("battle needs at least one hero and one foe")]
    IncompleteRoster,
    #[display("battle already finished")]
    Finished,
    #[display("encounter table has no regular foes")]
    EmptyFoePool,
}
