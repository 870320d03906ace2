//! Bridge Rush headless demo
//!
//! Runs a seeded one-minute match of the movement core: both players field
//! a few squads that lane-follow across the bridges toward the opposing
//! towers. Progress is logged and the final match state is printed as JSON.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use bridge_rush::consts::SIM_DT;
use bridge_rush::sim::{Arena, EntityRef, MatchState, Side, Stats, tick_match};

const DEMO_SEED: u64 = 0xB21D6E55;
const DEMO_TICKS: u64 = 30 * 60; // one minute of simulated time

fn spawn_squad(
    state: &mut MatchState,
    rng: &mut Pcg32,
    side: Side,
    lane_x: f32,
    target: EntityRef,
) {
    let base_y = if side.is_north() { 3.0 } else { 29.0 };
    let step_y = if side.is_north() { 1.2 } else { -1.2 };

    for (i, stats) in [Stats::brute(), Stats::raider(), Stats::swarmling()]
        .into_iter()
        .enumerate()
    {
        let jitter = rng.random_range(-0.8..=0.8);
        let pos = Vec2::new(lane_x + jitter, base_y + step_y * i as f32);
        let mob = state.spawn_mob(side, stats, pos);
        if let Some(mob) = state.mob_mut(mob) {
            mob.target = Some(target);
        }
    }
}

fn main() {
    env_logger::init();

    let mut state = MatchState::new(Arena::default());
    let left_x = state.arena.left_bridge_x;
    let right_x = state.arena.right_bridge_x;

    // Towers guard each bridge exit
    let north_left = state.spawn_building(Side::North, Stats::tower(), Vec2::new(left_x, 4.0));
    let north_right = state.spawn_building(Side::North, Stats::tower(), Vec2::new(right_x, 4.0));
    let south_left = state.spawn_building(Side::South, Stats::tower(), Vec2::new(left_x, 28.0));
    let south_right = state.spawn_building(Side::South, Stats::tower(), Vec2::new(right_x, 28.0));

    let mut rng = Pcg32::seed_from_u64(DEMO_SEED);
    spawn_squad(&mut state, &mut rng, Side::North, left_x, south_left);
    spawn_squad(&mut state, &mut rng, Side::North, right_x, south_right);
    spawn_squad(&mut state, &mut rng, Side::South, left_x, north_left);
    spawn_squad(&mut state, &mut rng, Side::South, right_x, north_right);
    state.normalize_order();

    log::info!(
        "demo match seeded with {} mobs per side",
        state.player(Side::North).mobs.len()
    );

    for _ in 0..DEMO_TICKS {
        tick_match(&mut state, SIM_DT);

        if state.time_ticks % 150 == 0 {
            let north_front = state
                .player(Side::North)
                .mobs
                .iter()
                .map(|m| m.pos.y)
                .fold(f32::MIN, f32::max);
            let south_front = state
                .player(Side::South)
                .mobs
                .iter()
                .map(|m| m.pos.y)
                .fold(f32::MAX, f32::min);
            log::info!(
                "tick {}: north front at y={:.1}, south front at y={:.1}",
                state.time_ticks,
                north_front,
                south_front
            );
        }
    }

    let snapshot = serde_json::to_string_pretty(&state).expect("match state serializes");
    println!("{snapshot}");
}
