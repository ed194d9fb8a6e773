//! Static battle data: elements, moves and characters.

pub use self::{catalog::*, element::*};

mod catalog;
mod element;
