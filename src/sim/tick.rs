//! Fixed timestep tick driver
//!
//! Orchestrates one simulation step per mob: in-range gate, steering,
//! constraint resolution. The driver is the only entry point the game loop
//! needs; combat and target assignment happen outside this crate.

use super::state::{MatchState, MobHandle, Side};
use super::steering::move_mob;
use crate::consts::ARRIVE_EPSILON;

/// True when the mob's target resolves and already stands within melee
/// distance (half the sum of both footprints, plus float tolerance).
/// Exposed for the AI layer; the driver uses it to suppress movement
/// while combat systems take over.
pub fn target_in_range(state: &MatchState, handle: MobHandle) -> bool {
    let Some(mob) = state.mob(handle) else {
        return false;
    };
    let Some(target) = mob.target else {
        return false;
    };
    let Some((t_pos, t_stats)) = state.resolve_entity(target) else {
        return false;
    };
    let melee = (mob.stats.size + t_stats.size) / 2.0;
    mob.pos.distance(t_pos) <= melee + ARRIVE_EPSILON
}

/// Advance one mob by one step. A mob whose target is in range holds its
/// ground; everyone else moves.
pub fn tick_mob(state: &mut MatchState, handle: MobHandle, dt: f32) {
    if !target_in_range(state, handle) {
        move_mob(state, handle, dt);
    }
}

/// Advance the whole match by one fixed timestep.
///
/// Mobs are processed north roster first, then south, in ascending id
/// order, and each mob sees every earlier mob's already-updated position.
/// This sequential read-your-writes ordering is deliberate; there is no
/// double-buffered position snapshot.
pub fn tick_match(state: &mut MatchState, dt: f32) {
    state.time_ticks += 1;
    for side in [Side::North, Side::South] {
        let ids: Vec<u32> = state.player(side).mobs.iter().map(|m| m.id).collect();
        for id in ids {
            tick_mob(state, MobHandle { side, id }, dt);
        }
    }
}
