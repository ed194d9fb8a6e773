use serde::{Deserialize, Serialize};

use crate::UnknownCodeError;

/// Elemental affinity of a move or a character.
///
/// Encoded in catalog files as an integer code (`0..=5`) in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Element {
    #[default]
    Normal,
    Fire,
    Water,
    Plant,
    Light,
    Dark,
}

impl Element {
    pub const LEN: usize = 6;
    pub const ALL: [Self; Self::LEN] = [
        Self::Normal,
        Self::Fire,
        Self::Water,
        Self::Plant,
        Self::Light,
        Self::Dark,
    ];

    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Element {
    type Error = UnknownCodeError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(code))
            .copied()
            .ok_or(UnknownCodeError {
                kind: "element",
                code,
            })
    }
}

impl From<Element> for u8 {
    fn from(element: Element) -> Self {
        element.code()
    }
}

/// How a damage multiplier compares against the neutral value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Effectiveness {
    Super,
    Neutral,
    Resisted,
}

impl Effectiveness {
    #[must_use]
    pub fn from_multiplier(multiplier: f32) -> Self {
        if multiplier > 1.0 {
            Self::Super
        } else if multiplier < 1.0 {
            Self::Resisted
        } else {
            Self::Neutral
        }
    }

    /// `+1.0` for super-effective, `-1.0` for resisted, `0.0` otherwise.
    #[must_use]
    pub const fn sign(self) -> f32 {
        match self {
            Self::Super => 1.0,
            Self::Neutral => 0.0,
            Self::Resisted => -1.0,
        }
    }
}

/// Damage multiplier for a move of element `attack` hitting a defender of
/// element `defense`.
///
/// The chart is sparse and not symmetric. Every pair not listed here is
/// neutral (`1.0`).
///
/// ```
/// use arena_engine::{Element, type_multiplier};
///
/// assert_eq!(type_multiplier(Element::Fire, Element::Plant), 2.0);
/// assert_eq!(type_multiplier(Element::Plant, Element::Fire), 0.5);
/// assert_eq!(type_multiplier(Element::Normal, Element::Dark), 1.0);
/// ```
#[must_use]
pub const fn type_multiplier(attack: Element, defense: Element) -> f32 {
    use Element::{Dark, Fire, Light, Plant, Water};
    match (attack, defense) {
        (Fire, Plant) | (Water, Fire) | (Plant, Water) | (Light, Dark) | (Dark, Light) => 2.0,
        (Fire, Water | Fire)
        | (Water, Plant | Water)
        | (Plant, Fire | Plant)
        | (Light, Light)
        | (Dark, Dark) => 0.5,
        _ => 1.0,
    }
}
