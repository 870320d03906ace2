//! Lane waypoint selection
//!
//! A mob with no reachable target follows the shared waypoint table toward
//! a bridge. Selection is nearest-by-squared-distance among the waypoints
//! that still lie ahead of the mob along its advance direction.

use glam::Vec2;

use super::arena::Arena;
use super::state::Side;
use crate::consts::WAYPOINT_FORWARD_MIN;

/// Pick the nearest waypoint not behind the mob. North-side mobs advance
/// toward growing y, south-side mobs toward shrinking y; anything less than
/// [`WAYPOINT_FORWARD_MIN`] ahead counts as behind. Returns an index into
/// `arena.waypoints`, or `None` when no waypoint qualifies (the caller
/// holds position).
///
/// Ties on exact distance resolve to the first waypoint in table order.
pub fn pick_waypoint(arena: &Arena, pos: Vec2, side: Side) -> Option<usize> {
    let mut smallest_dist_sq = f32::MAX;
    let mut closest = None;

    for (i, wp) in arena.waypoints.iter().enumerate() {
        let y_offset = wp.y - pos.y;
        let behind = if side.is_north() {
            y_offset < WAYPOINT_FORWARD_MIN
        } else {
            y_offset > -WAYPOINT_FORWARD_MIN
        };
        if behind {
            continue;
        }

        let dist_sq = pos.distance_squared(*wp);
        if dist_sq < smallest_dist_sq {
            smallest_dist_sq = dist_sq;
            closest = Some(i);
        }
    }

    closest
}
