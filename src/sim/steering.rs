//! Per-tick steering: goal-seeking velocity plus single-threat avoidance
//!
//! A mob moves straight at its target when the target is on its side of the
//! river, and lane-follows the waypoint table otherwise. The desired-path
//! velocity is perturbed by at most one avoidance force, from the nearest
//! mob whose bounding circle crosses the travel lookahead.

use glam::Vec2;

use super::collision::resolve_constraints;
use super::state::{MatchState, MobHandle, Side, Stats};
use super::waypoint::pick_waypoint;
use crate::clamp_speed;
use crate::consts::MAX_SEE_AHEAD;

/// The nearest mob threatening the travel path
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Threat {
    pub handle: MobHandle,
    pub pos: Vec2,
    pub bounding_radius: f32,
}

/// Find the nearest mob (by distance to self) whose bounding circle contains
/// either lookahead sample point. Both rosters are scanned, self excluded;
/// ties keep the first mob found in scan order (north roster then south,
/// ascending id). `None` means the path ahead is clear.
pub fn most_threatening(
    state: &MatchState,
    handle: MobHandle,
    look: Vec2,
    look2: Vec2,
) -> Option<Threat> {
    let self_pos = state.mob(handle)?.pos;

    let mut best: Option<(f32, Threat)> = None;
    for side in [Side::North, Side::South] {
        for other in &state.player(side).mobs {
            if side == handle.side && other.id == handle.id {
                continue;
            }
            let radius = other.stats.bounding_radius();
            if other.pos.distance(look) > radius && other.pos.distance(look2) > radius {
                continue;
            }
            let dist = self_pos.distance(other.pos);
            if best.is_none_or(|(best_dist, _)| dist < best_dist) {
                best = Some((
                    dist,
                    Threat {
                        handle: other.handle(),
                        pos: other.pos,
                        bounding_radius: radius,
                    },
                ));
            }
        }
    }
    best.map(|(_, threat)| threat)
}

/// One movement step: pick a destination, steer toward it with avoidance,
/// integrate, then run the constraint passes.
pub fn move_mob(state: &mut MatchState, handle: MobHandle, dt: f32) {
    let Some(mob) = state.mob(handle) else {
        return;
    };
    let (pos, stats, side, freeze) = (mob.pos, mob.stats, mob.side, mob.freeze);
    let mut waypoint = mob.waypoint;
    let mut target = mob.target;

    // A live target on our side of the river is approached directly;
    // anything else means lane-following.
    let mut direct_target: Option<(Vec2, Stats)> = None;
    if let Some(t) = target {
        match state.resolve_entity(t) {
            Some((t_pos, t_stats)) if state.arena.same_side(pos, t_pos) => {
                direct_target = Some((t_pos, t_stats));
            }
            Some(_) => {} // across the river: keep the ref, head for a bridge
            None => target = None, // roster no longer has it
        }
    }

    let dest = if let Some((t_pos, _)) = direct_target {
        waypoint = None;
        t_pos
    } else {
        if waypoint.is_none() {
            waypoint = pick_waypoint(&state.arena, pos, side);
        }
        waypoint
            .and_then(|i| state.arena.waypoints.get(i).copied())
            .unwrap_or(pos)
    };

    let to_dest = dest - pos;
    let mut dist_remaining = to_dest.length();
    let dir = to_dest.normalize_or_zero();
    if let Some((_, t_stats)) = direct_target {
        // Stop at melee range, never past it
        dist_remaining = (dist_remaining - (stats.size + t_stats.size) / 2.0).max(0.0);
    }
    let max_step = stats.speed * dt;

    let mut vel = Vec2::ZERO;
    if max_step <= dist_remaining {
        let desired = dir * stats.speed;
        let look = pos + dir * MAX_SEE_AHEAD;
        let look2 = pos + dir * (MAX_SEE_AHEAD / 2.0);

        vel = match most_threatening(state, handle, look, look2) {
            Some(threat) => {
                let force = (look - threat.pos).normalize_or_zero() * threat.bounding_radius;
                let accel = force / stats.mass;
                clamp_speed(desired + accel * dt, stats.speed)
            }
            None => clamp_speed(desired, stats.speed),
        };

        // Axis freezes produced by the previous tick's constraint pass
        if freeze.x {
            vel.x = 0.0;
        }
        if freeze.y {
            vel.y = 0.0;
        }
    } else if waypoint.is_some() {
        // Arrived at the waypoint: line up the next one for the coming tick
        waypoint = pick_waypoint(&state.arena, pos, side);
        log::debug!("mob {} advanced to waypoint {:?}", handle.id, waypoint);
    }
    // Target-direct overshoot holds position: attack logic outside this
    // crate takes over once the mob is in range.

    if let Some(mob) = state.mob_mut(handle) {
        mob.target = target;
        mob.waypoint = waypoint;
        mob.vel = vel;
        mob.pos += vel * dt;
    }

    resolve_constraints(state, handle, dt);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::arena::Arena;
    use crate::sim::state::{AxisFreeze, EntityKind, EntityRef};

    fn mob_ref(handle: MobHandle) -> EntityRef {
        EntityRef {
            side: handle.side,
            kind: EntityKind::Mob,
            id: handle.id,
        }
    }

    fn light_raider() -> Stats {
        Stats {
            speed: 2.0,
            size: 1.0,
            mass: 1.0,
        }
    }

    #[test]
    fn test_direct_approach_advances_one_step_per_tick() {
        let mut state = MatchState::new(Arena::default());
        let runner = state.spawn_mob(Side::North, light_raider(), Vec2::new(2.0, 8.0));
        let victim = state.spawn_mob(Side::South, light_raider(), Vec2::new(12.0, 8.0));
        state.mob_mut(runner).unwrap().target = Some(mob_ref(victim));

        move_mob(&mut state, runner, 1.0);
        assert_eq!(state.mob(runner).unwrap().pos, Vec2::new(4.0, 8.0));

        move_mob(&mut state, runner, 1.0);
        assert_eq!(state.mob(runner).unwrap().pos, Vec2::new(6.0, 8.0));
    }

    #[test]
    fn test_direct_approach_stops_at_melee_range() {
        let mut state = MatchState::new(Arena::default());
        let runner = state.spawn_mob(Side::North, light_raider(), Vec2::new(2.0, 8.0));
        let victim = state.spawn_mob(Side::South, light_raider(), Vec2::new(12.0, 8.0));
        state.mob_mut(runner).unwrap().target = Some(mob_ref(victim));

        for _ in 0..20 {
            move_mob(&mut state, runner, 1.0);
        }

        let pos = state.mob(runner).unwrap().pos;
        let melee_range = 1.0; // half the sum of both sizes
        let dist = pos.distance(Vec2::new(12.0, 8.0));
        // Within one step of melee range, and never past it
        assert!(dist >= melee_range - 1e-4);
        assert!(dist <= melee_range + 2.0 + 1e-4);

        // Holding: further ticks produce zero displacement
        move_mob(&mut state, runner, 1.0);
        assert_eq!(state.mob(runner).unwrap().pos, pos);
        assert_eq!(state.mob(runner).unwrap().vel, Vec2::ZERO);
    }

    #[test]
    fn test_avoidance_deflects_around_threat() {
        let mut state = MatchState::new(Arena::default());
        let runner = state.spawn_mob(Side::North, Stats::raider(), Vec2::new(5.0, 8.0));
        let victim = state.spawn_mob(Side::South, light_raider(), Vec2::new(15.0, 8.0));
        // Blocker sits just off the full-lookahead sample point (10, 8)
        state.spawn_mob(Side::North, light_raider(), Vec2::new(9.7, 8.2));
        state.mob_mut(runner).unwrap().target = Some(mob_ref(victim));

        move_mob(&mut state, runner, 1.0);

        let mob = state.mob(runner).unwrap();
        // Deflected away from the blocker (negative y) without losing the goal
        assert!(mob.vel.y < 0.0);
        assert!(mob.vel.x > 0.0);
        assert!(mob.vel.length() <= mob.stats.speed + 1e-4);
    }

    #[test]
    fn test_most_threatening_picks_nearest() {
        let mut state = MatchState::new(Arena::default());
        let runner = state.spawn_mob(Side::North, Stats::raider(), Vec2::new(5.0, 8.0));
        let far = state.spawn_mob(Side::South, light_raider(), Vec2::new(10.2, 8.0));
        let near = state.spawn_mob(Side::North, light_raider(), Vec2::new(7.4, 8.0));

        // Both bounding circles contain one of the sample points
        let threat = most_threatening(&state, runner, Vec2::new(10.0, 8.0), Vec2::new(7.5, 8.0));
        let threat = threat.expect("both candidates intersect the lookahead");
        assert_eq!(threat.handle, near);
        assert_ne!(threat.handle, far);
    }

    #[test]
    fn test_most_threatening_excludes_self_and_clear_paths() {
        let mut state = MatchState::new(Arena::default());
        let runner = state.spawn_mob(Side::North, Stats::raider(), Vec2::new(5.0, 8.0));

        // Sample points on top of the runner itself: still no threat
        assert!(most_threatening(&state, runner, Vec2::new(5.0, 8.0), Vec2::new(5.2, 8.0)).is_none());
    }

    #[test]
    fn test_frozen_axis_zeroes_velocity_component() {
        let mut state = MatchState::new(Arena::default());
        let runner = state.spawn_mob(Side::North, light_raider(), Vec2::new(5.0, 8.0));
        let victim = state.spawn_mob(Side::South, light_raider(), Vec2::new(15.0, 8.0));
        {
            let mob = state.mob_mut(runner).unwrap();
            mob.target = Some(mob_ref(victim));
            mob.freeze = AxisFreeze { x: true, y: false };
        }

        move_mob(&mut state, runner, 1.0);

        let mob = state.mob(runner).unwrap();
        // The frozen x axis ate the whole step
        assert_eq!(mob.pos, Vec2::new(5.0, 8.0));
        // Fresh constraint pass found nothing limiting: freeze clears
        assert_eq!(mob.freeze, AxisFreeze::default());
    }

    #[test]
    fn test_no_target_no_waypoint_pure_hold() {
        let mut state = MatchState::new(Arena::default());
        // South-most corner of the north advance: every waypoint is behind
        let runner = state.spawn_mob(Side::North, light_raider(), Vec2::new(3.5, 30.5));

        move_mob(&mut state, runner, 1.0);

        let mob = state.mob(runner).unwrap();
        assert_eq!(mob.pos, Vec2::new(3.5, 30.5));
        assert_eq!(mob.vel, Vec2::ZERO);
        assert!(mob.waypoint.is_none());
    }

    #[test]
    fn test_cross_river_target_falls_back_to_waypoints() {
        let mut state = MatchState::new(Arena::default());
        let runner = state.spawn_mob(Side::North, light_raider(), Vec2::new(3.5, 10.0));
        let victim = state.spawn_mob(Side::South, light_raider(), Vec2::new(3.5, 25.0));
        state.mob_mut(runner).unwrap().target = Some(mob_ref(victim));

        move_mob(&mut state, runner, 1.0);

        let mob = state.mob(runner).unwrap();
        // Target is across the river: the ref stays but movement lane-follows
        assert!(mob.target.is_some());
        assert!(mob.waypoint.is_some());
        assert!(mob.pos.y > 10.0);
        assert_eq!(mob.pos.x, 3.5);
    }

    #[test]
    fn test_dangling_target_is_dropped() {
        let mut state = MatchState::new(Arena::default());
        let runner = state.spawn_mob(Side::North, light_raider(), Vec2::new(3.5, 10.0));
        state.mob_mut(runner).unwrap().target = Some(EntityRef {
            side: Side::South,
            kind: EntityKind::Mob,
            id: 999,
        });

        move_mob(&mut state, runner, 1.0);

        assert!(state.mob(runner).unwrap().target.is_none());
    }
}
