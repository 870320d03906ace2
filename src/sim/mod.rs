//! Deterministic simulation module
//!
//! All movement logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (north roster, then south, ascending entity ID)
//! - No rendering or platform dependencies
//!
//! Each tick a mob steers toward its target or lane waypoint, dodges the
//! single most threatening nearby mob, and is then resolved against the
//! world in a fixed precedence order: other mobs, buildings, the river
//! corridor, the map edges.

pub mod arena;
pub mod collision;
pub mod state;
pub mod steering;
pub mod tick;
pub mod waypoint;

pub use arena::{Arena, Rect, RiverSpan};
pub use collision::{
    collides_with_buildings, collides_with_map_edges, collides_with_river, overlapping_mobs,
    resolve_constraints,
};
pub use state::{
    AxisFreeze, Building, EntityKind, EntityRef, MatchState, Mob, MobHandle, Player, Side, Stats,
};
pub use steering::{Threat, most_threatening, move_mob};
pub use tick::{target_in_range, tick_match, tick_mob};
pub use waypoint::pick_waypoint;
