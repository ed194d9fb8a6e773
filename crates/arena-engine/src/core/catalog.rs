//! Static move and character definitions.
//!
//! The [`Catalog`] is built once at process start and shared by reference with
//! every component that needs move or character lookups. It is never mutated
//! afterwards.
//!
//! The serde representation of [`MoveDefinition`] and [`CharacterTemplate`]
//! matches the catalog file format: enum-like attributes are integer codes and
//! field names use the capitalized keys of the data files (`BasePower`,
//! `SPCost`, `movelist`, ...).

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

use crate::{CatalogError, Element, UnknownCodeError};

/// Identifier of a move in the catalog.
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
pub struct MoveId(pub u32);

/// Identifier of a character template in the catalog.
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
pub struct CharacterId(pub u32);

/// Whether a move is meant as an attack or a buff.
///
/// Only kept for documentation purposes; battle logic does not read it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum FunctionKind {
    Attack,
    Buff,
}

/// Which stat pair drives the damage of a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DamageType {
    /// `Str` against `Def`.
    Physical,
    /// `Dex` against `Def`.
    Ranged,
    /// `Int` against `Wis`.
    Magic,
}

/// Who a move affects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant)]
#[serde(try_from = "u8", into = "u8")]
pub enum TargetMode {
    /// One living opponent.
    Single,
    /// The user itself (restorative).
    SelfTarget,
    /// Every living opponent.
    Multi,
}

impl TryFrom<u8> for FunctionKind {
    type Error = UnknownCodeError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Attack),
            1 => Ok(Self::Buff),
            _ => Err(UnknownCodeError {
                kind: "function",
                code,
            }),
        }
    }
}

impl From<FunctionKind> for u8 {
    fn from(kind: FunctionKind) -> Self {
        kind as u8
    }
}

impl TryFrom<u8> for DamageType {
    type Error = UnknownCodeError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Physical),
            1 => Ok(Self::Ranged),
            2 => Ok(Self::Magic),
            _ => Err(UnknownCodeError { kind: "type", code }),
        }
    }
}

impl From<DamageType> for u8 {
    fn from(ty: DamageType) -> Self {
        ty as u8
    }
}

impl TryFrom<u8> for TargetMode {
    type Error = UnknownCodeError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Single),
            1 => Ok(Self::SelfTarget),
            2 => Ok(Self::Multi),
            _ => Err(UnknownCodeError {
                kind: "target",
                code,
            }),
        }
    }
}

impl From<TargetMode> for u8 {
    fn from(mode: TargetMode) -> Self {
        mode as u8
    }
}

/// Attributes of a single move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveDefinition {
    pub name: String,
    #[serde(rename = "Function")]
    pub function: FunctionKind,
    #[serde(rename = "Type")]
    pub damage_type: DamageType,
    #[serde(rename = "Target")]
    pub target: TargetMode,
    #[serde(rename = "Element")]
    pub element: Element,
    #[serde(rename = "BasePower")]
    pub base_power: f32,
    #[serde(rename = "SPCost")]
    pub sp_cost: f32,
    #[serde(rename = "MPCost")]
    pub mp_cost: f32,
}

impl MoveDefinition {
    /// A self-targeting magic move, i.e. a heal.
    #[must_use]
    pub fn is_self_heal(&self) -> bool {
        self.target.is_self_target() && self.damage_type == DamageType::Magic
    }

    /// Whether a combatant holding `sp` and `mp` can pay for this move.
    #[must_use]
    pub fn is_affordable(&self, sp: f32, mp: f32) -> bool {
        self.sp_cost <= sp && self.mp_cost <= mp
    }
}

/// Base stats of a character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatBlock {
    #[serde(rename = "HP")]
    pub hp: f32,
    #[serde(rename = "BaseElement")]
    pub element: Element,
    #[serde(rename = "SP")]
    pub sp: f32,
    #[serde(rename = "MP")]
    pub mp: f32,
    #[serde(rename = "Str")]
    pub strength: f32,
    #[serde(rename = "Dex")]
    pub dexterity: f32,
    #[serde(rename = "Int")]
    pub intelligence: f32,
    #[serde(rename = "Def")]
    pub defense: f32,
    #[serde(rename = "Wis")]
    pub wisdom: f32,
}

impl Default for StatBlock {
    fn default() -> Self {
        Self {
            hp: 100.0,
            element: Element::Normal,
            sp: 20.0,
            mp: 20.0,
            strength: 10.0,
            dexterity: 10.0,
            intelligence: 10.0,
            defense: 10.0,
            wisdom: 10.0,
        }
    }
}

/// A character definition: display name, stats and known moves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterTemplate {
    pub name: String,
    #[serde(default)]
    pub stats: StatBlock,
    #[serde(default)]
    pub movelist: Vec<MoveId>,
}

/// Immutable lookup table of every move and character.
#[derive(Debug, Clone)]
pub struct Catalog {
    moves: BTreeMap<MoveId, MoveDefinition>,
    characters: BTreeMap<CharacterId, CharacterTemplate>,
    first_move: MoveId,
}

impl Catalog {
    /// Builds a catalog, validating cross references.
    ///
    /// Duplicate entries in a character's move list are dropped with a
    /// warning. A move list that references an unknown move is an error.
    pub fn new(
        moves: BTreeMap<MoveId, MoveDefinition>,
        mut characters: BTreeMap<CharacterId, CharacterTemplate>,
    ) -> Result<Self, CatalogError> {
        let Some(&first_move) = moves.keys().next() else {
            return Err(CatalogError::NoMoves);
        };
        for (&character, template) in &mut characters {
            let stats = &template.stats;
            if [stats.hp, stats.sp, stats.mp]
                .iter()
                .any(|cap| !cap.is_finite() || *cap < 0.0)
            {
                return Err(CatalogError::InvalidStats { character });
            }
            let mut movelist = Vec::with_capacity(template.movelist.len());
            for &move_id in &template.movelist {
                if !moves.contains_key(&move_id) {
                    return Err(CatalogError::UnknownMove { character, move_id });
                }
                if movelist.contains(&move_id) {
                    tracing::warn!(%character, %move_id, "move already assigned to character, ignoring duplicate");
                    continue;
                }
                movelist.push(move_id);
            }
            template.movelist = movelist;
        }
        Ok(Self {
            moves,
            characters,
            first_move,
        })
    }

    /// Looks up a move.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not in the catalog. Move ids handed out by the
    /// catalog itself (character move lists) are always valid.
    #[must_use]
    pub fn move_def(&self, id: MoveId) -> &MoveDefinition {
        &self.moves[&id]
    }

    #[must_use]
    pub fn get_move(&self, id: MoveId) -> Option<&MoveDefinition> {
        self.moves.get(&id)
    }

    #[must_use]
    pub fn character(&self, id: CharacterId) -> Option<&CharacterTemplate> {
        self.characters.get(&id)
    }

    /// The move with the lowest id.
    #[must_use]
    pub fn first_move_id(&self) -> MoveId {
        self.first_move
    }

    pub fn moves(&self) -> impl Iterator<Item = (MoveId, &MoveDefinition)> + '_ {
        self.moves.iter().map(|(id, m)| (*id, m))
    }

    pub fn characters(&self) -> impl Iterator<Item = (CharacterId, &CharacterTemplate)> + '_ {
        self.characters.iter().map(|(id, c)| (*id, c))
    }
}

impl fmt::Display for TargetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Single => "single",
            Self::SelfTarget => "self",
            Self::Multi => "multi",
        };
        f.write_str(s)
    }
}
