//! Collision resolution against mobs, buildings, the river, and map edges
//!
//! The tricky part of the sim. After steering integrates a provisional
//! position, four constraint passes run in a fixed precedence order:
//! mob-vs-mob push-back, building ejection (north then south), river
//! ejection, map-edge clamp. Each pass only guarantees its own constraint;
//! the map-edge clamp runs last and is the only exhaustive one.
//!
//! Box corrections resolve along the first violated edge pair in a fixed
//! check order (right, left, top, bottom of the other box), NOT along the
//! minimum-translation vector. Simultaneous overlaps therefore resolve
//! along x. Changing this to true MTV resolution changes observable
//! behavior and needs a design review first.

use glam::Vec2;

use super::arena::{Arena, Rect, RiverSpan};
use super::state::{AxisFreeze, MatchState, MobHandle, Player, Side};
use crate::consts::RIVER_SHIFT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

/// First violated edge pair between two overlapping boxes, in the fixed
/// check order. Returns the axis and the gap between the matched edges;
/// `None` when the boxes do not overlap.
fn first_edge_overlap(this: &Rect, other: &Rect) -> Option<(Axis, f32)> {
    if !this.overlaps(other) {
        return None;
    }
    if other.max.x >= this.min.x {
        Some((Axis::X, other.max.x - this.min.x))
    } else if other.min.x <= this.max.x {
        Some((Axis::X, this.max.x - other.min.x))
    } else if other.max.y >= this.min.y {
        Some((Axis::Y, other.max.y - this.min.y))
    } else {
        Some((Axis::Y, this.max.y - other.min.y))
    }
}

/// Unit direction along `axis` that moves `mover` away from `obstacle`.
/// An exact center tie resolves toward positive.
fn away_dir(axis: Axis, mover: Vec2, obstacle: Vec2) -> Vec2 {
    match axis {
        Axis::X => {
            if mover.x >= obstacle.x {
                Vec2::X
            } else {
                Vec2::NEG_X
            }
        }
        Axis::Y => {
            if mover.y >= obstacle.y {
                Vec2::Y
            } else {
                Vec2::NEG_Y
            }
        }
    }
}

/// Spatial query: every other mob, on either roster, whose square footprint
/// overlaps this mob's. Scan order is north roster then south, ascending id.
pub fn overlapping_mobs(state: &MatchState, handle: MobHandle) -> Vec<MobHandle> {
    let Some(mob) = state.mob(handle) else {
        return Vec::new();
    };
    let this_box = Rect::from_center_half(mob.pos, mob.stats.half_size());

    let mut hits = Vec::new();
    for side in [Side::North, Side::South] {
        for other in &state.player(side).mobs {
            if side == handle.side && other.id == handle.id {
                continue;
            }
            let other_box = Rect::from_center_half(other.pos, other.stats.half_size());
            if this_box.overlaps(&other_box) {
                hits.push(other.handle());
            }
        }
    }
    hits
}

/// Would this position (center point) leave the map rectangle?
pub fn collides_with_map_edges(arena: &Arena, pos: Vec2) -> bool {
    pos.x > arena.width || pos.x < 0.0 || pos.y > arena.height || pos.y < 0.0
}

/// Would this position (center point) stand in a forbidden river span?
pub fn collides_with_river(arena: &Arena, pos: Vec2) -> bool {
    arena.river_span_at(pos).is_some()
}

/// Would a square footprint of `size` at `pos` overlap any of this player's
/// buildings?
pub fn collides_with_buildings(player: &Player, pos: Vec2, size: f32) -> bool {
    let footprint = Rect::from_center_half(pos, size / 2.0);
    player.buildings.iter().any(|b| {
        footprint.overlaps(&Rect::from_center_half(b.pos, b.stats.half_size()))
    })
}

/// Rollback guard for mob push-back: a candidate position is rejected when
/// it violates the map edges, the river, or either player's buildings.
fn blocked_elsewhere(state: &MatchState, pos: Vec2, size: f32) -> bool {
    collides_with_map_edges(&state.arena, pos)
        || collides_with_river(&state.arena, pos)
        || collides_with_buildings(state.player(Side::North), pos, size)
        || collides_with_buildings(state.player(Side::South), pos, size)
}

/// Mob-vs-mob pass. The heavier of an overlapping pair pushes the lighter
/// back (ties: self yields); the displacement is the first-edge correction
/// clamped to one step, and is skipped entirely when it would land the
/// pushed mob in a building, the river, or off the map.
fn resolve_mob_overlaps(state: &mut MatchState, handle: MobHandle, dt: f32) {
    let Some(mob) = state.mob(handle) else {
        return;
    };
    let self_stats = mob.stats;
    let max_step = self_stats.speed * dt;

    for other_handle in overlapping_mobs(state, handle) {
        // Re-read both positions: earlier iterations may have moved either box.
        let Some(mob) = state.mob(handle) else {
            return;
        };
        let self_pos = mob.pos;
        let Some(other) = state.mob(other_handle) else {
            continue;
        };
        let (other_pos, other_stats) = (other.pos, other.stats);

        let this_box = Rect::from_center_half(self_pos, self_stats.half_size());
        let other_box = Rect::from_center_half(other_pos, other_stats.half_size());
        let Some((axis, overlap)) = first_edge_overlap(&this_box, &other_box) else {
            continue;
        };
        let shift = overlap.min(max_step);

        if self_stats.mass > other_stats.mass {
            let candidate = other_pos + away_dir(axis, other_pos, self_pos) * shift;
            if blocked_elsewhere(state, candidate, other_stats.size) {
                log::trace!("push-back of mob {} skipped, candidate blocked", other_handle.id);
            } else if let Some(other) = state.mob_mut(other_handle) {
                other.pos = candidate;
            }
        } else {
            let candidate = self_pos + away_dir(axis, self_pos, other_pos) * shift;
            if blocked_elsewhere(state, candidate, self_stats.size) {
                log::trace!("yield of mob {} skipped, candidate blocked", handle.id);
            } else if let Some(mob) = state.mob_mut(handle) {
                mob.pos = candidate;
            }
        }
    }
}

/// Building pass for one side: eject the mob along the first violated edge,
/// clamped to one step. Building pushes always apply, no rollback guard.
fn resolve_buildings(state: &mut MatchState, handle: MobHandle, side: Side, dt: f32) {
    let Some(mob) = state.mob(handle) else {
        return;
    };
    let stats = mob.stats;
    let max_step = stats.speed * dt;
    let mut pos = mob.pos;

    let buildings: Vec<(Vec2, f32)> = state
        .player(side)
        .buildings
        .iter()
        .map(|b| (b.pos, b.stats.half_size()))
        .collect();

    for (b_pos, b_half) in buildings {
        let this_box = Rect::from_center_half(pos, stats.half_size());
        let b_box = Rect::from_center_half(b_pos, b_half);
        if let Some((axis, overlap)) = first_edge_overlap(&this_box, &b_box) {
            pos += away_dir(axis, pos, b_pos) * overlap.min(max_step);
        }
    }

    if let Some(mob) = state.mob_mut(handle) {
        mob.pos = pos;
    }
}

/// River pass: a mob standing in a forbidden span is shifted laterally
/// toward the nearest bridge by a fixed amount per tick, and its x axis is
/// frozen for the next steering pass.
fn resolve_river(state: &mut MatchState, handle: MobHandle, dt: f32, freeze: &mut AxisFreeze) {
    let Some(mob) = state.mob(handle) else {
        return;
    };
    let (pos, stats) = (mob.pos, mob.stats);
    let Some((span, rect)) = state.arena.river_span_at(pos) else {
        return;
    };

    let dir_x = match span {
        // The bridge gap bounds each outer span on one side only
        RiverSpan::Left => 1.0,
        RiverSpan::Right => -1.0,
        RiverSpan::Middle => {
            if pos.x > rect.center().x {
                1.0
            } else {
                -1.0
            }
        }
    };

    let max_step = stats.speed * dt;
    let shift = RIVER_SHIFT.min(max_step);
    freeze.x = true;

    if let Some(mob) = state.mob_mut(handle) {
        mob.pos.x += dir_x * shift;
    }
}

/// Map-edge pass: four independent overflow checks at the footprint edges.
/// Shifts are accumulated and applied as one displacement. This clamp is
/// exhaustive, not step-limited; a mob never ends a tick off the map.
fn resolve_map_edges(state: &mut MatchState, handle: MobHandle, freeze: &mut AxisFreeze) {
    let Some(mob) = state.mob(handle) else {
        return;
    };
    let pos = mob.pos;
    let half = mob.stats.half_size();
    let (width, height) = (state.arena.width, state.arena.height);

    let mut shift = Vec2::ZERO;
    if pos.x + half > width {
        shift.x -= pos.x + half - width;
        freeze.x = true;
    }
    if pos.x - half < 0.0 {
        shift.x += half - pos.x;
        freeze.x = true;
    }
    if pos.y + half > height {
        shift.y -= pos.y + half - height;
        freeze.y = true;
    }
    if pos.y - half < 0.0 {
        shift.y += half - pos.y;
        freeze.y = true;
    }

    if shift != Vec2::ZERO {
        if let Some(mob) = state.mob_mut(handle) {
            mob.pos += shift;
        }
    }
}

/// Run every constraint pass in the fixed precedence order and store the
/// resulting axis freezes on the mob for the next tick's steering pass.
pub fn resolve_constraints(state: &mut MatchState, handle: MobHandle, dt: f32) {
    resolve_mob_overlaps(state, handle, dt);
    resolve_buildings(state, handle, Side::North, dt);
    resolve_buildings(state, handle, Side::South, dt);

    let mut freeze = AxisFreeze::default();
    resolve_river(state, handle, dt, &mut freeze);
    resolve_map_edges(state, handle, &mut freeze);

    if let Some(mob) = state.mob_mut(handle) {
        mob.freeze = freeze;
    }
}
