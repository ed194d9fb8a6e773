//! Situational features describing one candidate (move, target) pair.
//!
//! | #  | Feature              | Value                                         |
//! |----|----------------------|-----------------------------------------------|
//! | 0  | hurt level           | `min(1, 1 − hp / max_hp)` of the actor        |
//! | 1  | SP level             | `min(1, sp / max_sp)` of the actor            |
//! | 2  | target health        | `min(1, hp / max_hp)` of the target           |
//! | 3  | target bulk          | `min(1, max_hp / 1000)` of the target         |
//! | 4  | self target          | `1` if the target is the actor                |
//! | 5  | cost                 | move SP cost / 50                             |
//! | 6  | power                | move base power / 100                         |
//! | 7  | heal                 | `1` for self-targeting magic moves            |
//! | 8  | area                 | `1` for multi-target moves                    |
//! | 9  | elemental advantage  | `+1` super-effective, `−1` resisted, else `0` |
//! | 10 | crowd                | roster size / 4                               |
//! | 11 | foe density          | living foes / 3                               |

use arena_engine::{CombatantView, Effectiveness, MoveDefinition, ratio, type_multiplier};

pub const FEATURE_COUNT: usize = 12;

pub type ActionFeatures = [f32; FEATURE_COUNT];

/// Builds the feature vector for `actor` using `move_def` on `target`.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn action_features(
    actor: &CombatantView,
    target: &CombatantView,
    move_def: &MoveDefinition,
    snapshot: &[CombatantView],
) -> ActionFeatures {
    let hurt_level = f32::min(1.0, 1.0 - ratio(actor.hp, actor.max_hp));
    let sp_level = f32::min(1.0, ratio(actor.sp, actor.max_sp));
    let target_health = f32::min(1.0, ratio(target.hp, target.max_hp));
    let target_bulk = f32::min(1.0, target.max_hp / 1000.0);
    let is_self = flag(actor.id == target.id);

    let cost = move_def.sp_cost / 50.0;
    let power = move_def.base_power / 100.0;
    let is_heal = flag(move_def.is_self_heal());
    let is_area = flag(move_def.target.is_multi());

    let advantage =
        Effectiveness::from_multiplier(type_multiplier(move_def.element, target.element)).sign();

    let living_foes = snapshot
        .iter()
        .filter(|c| c.side.is_foe() && c.alive)
        .count();
    let crowd = snapshot.len() as f32 / 4.0;
    let foe_density = living_foes as f32 / 3.0;

    [
        hurt_level,
        sp_level,
        target_health,
        target_bulk,
        is_self,
        cost,
        power,
        is_heal,
        is_area,
        advantage,
        crowd,
        foe_density,
    ]
}

fn flag(b: bool) -> f32 {
    if b { 1.0 } else { 0.0 }
}
