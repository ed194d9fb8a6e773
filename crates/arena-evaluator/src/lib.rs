//! Hero decision making and battle scoring.
//!
//! A [`PolicyNetwork`] scores [feature vectors](features) of candidate actions;
//! the [`DecisionEngine`] turns those scores (or the scripted heuristic, for
//! foes) into actions for the battle engine, and the [`BattleEvaluator`] plays
//! seeded encounters to measure how good a network is.

pub use self::{battle_evaluator::*, decision::*, network::PolicyNetwork};

mod battle_evaluator;
mod decision;
pub mod features;
pub mod network;
