//! Bridge Rush - movement core for a two-lane river-crossing strategy game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (steering, collisions, match state)
//!
//! Two players (north and south) push mobs across a tile grid split by a
//! river with two bridges. This crate owns per-tick steering, local
//! avoidance, and the ordered constraint passes that keep every mob out of
//! buildings, the river, and the void beyond the map edges. Target
//! selection, combat, and rendering are external collaborators.

pub mod sim;

pub use sim::{Arena, MatchState, MobHandle, Side, Stats, tick_match, tick_mob};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (30 Hz is plenty for ground mobs)
    pub const SIM_DT: f32 = 1.0 / 30.0;

    /// Arena tile grid dimensions
    pub const GRID_WIDTH: f32 = 18.0;
    pub const GRID_HEIGHT: f32 = 32.0;

    /// Screen mapping (used by embedding clients, not by the sim itself)
    pub const PIXELS_PER_TILE: f32 = 30.0;
    pub const SCREEN_WIDTH_PIXELS: f32 = GRID_WIDTH * PIXELS_PER_TILE;
    pub const SCREEN_HEIGHT_PIXELS: f32 = GRID_HEIGHT * PIXELS_PER_TILE;

    /// River band (rows the river occupies, bridges excepted)
    pub const RIVER_TOP_Y: f32 = 15.0;
    pub const RIVER_BOT_Y: f32 = 17.0;

    /// Bridge columns
    pub const LEFT_BRIDGE_CENTER_X: f32 = 3.5;
    pub const RIGHT_BRIDGE_CENTER_X: f32 = 14.5;
    pub const BRIDGE_WIDTH: f32 = 3.0;

    /// Steering lookahead distance for obstacle avoidance (tiles)
    pub const MAX_SEE_AHEAD: f32 = 5.0;

    /// Per-tick lateral shift applied while standing in the river
    pub const RIVER_SHIFT: f32 = 0.5;

    /// Waypoints closer than this along the advance axis count as "behind"
    pub const WAYPOINT_FORWARD_MIN: f32 = 1.0;

    /// Float tolerance for melee-range arrival checks
    pub const ARRIVE_EPSILON: f32 = 1e-3;
}

/// Clamp a velocity to a maximum speed, preserving direction
#[inline]
pub fn clamp_speed(velocity: Vec2, max_speed: f32) -> Vec2 {
    let speed = velocity.length();
    if speed > max_speed {
        velocity / speed * max_speed
    } else {
        velocity
    }
}
