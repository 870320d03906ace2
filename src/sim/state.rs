//! Match state and core simulation types
//!
//! Everything needed to replay a match deterministically lives here. Two
//! players own their mob and building rosters; mobs hold weak references
//! (ids and indices, never owning pointers) to their target entity and
//! current lane waypoint.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arena::Arena;

/// Which player an entity belongs to. North deploys at low y and advances
/// southward; south advances northward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    North,
    South,
}

impl Side {
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::North => 0,
            Side::South => 1,
        }
    }

    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::North => Side::South,
            Side::South => Side::North,
        }
    }

    pub fn is_north(self) -> bool {
        self == Side::North
    }
}

/// Immutable stat block shared by mobs and buildings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    /// Movement speed in tiles per second (zero for buildings)
    pub speed: f32,
    /// Footprint edge length; entities occupy a size x size square
    pub size: f32,
    /// Collision mass; the heavier of two overlapping mobs pushes the lighter
    pub mass: f32,
}

impl Stats {
    /// Radius of the circle circumscribing the square footprint
    #[inline]
    pub fn bounding_radius(&self) -> f32 {
        std::f32::consts::SQRT_2 * self.size / 2.0
    }

    #[inline]
    pub fn half_size(&self) -> f32 {
        self.size / 2.0
    }

    /// Standard line infantry
    pub fn raider() -> Self {
        Self {
            speed: 2.0,
            size: 1.0,
            mass: 3.0,
        }
    }

    /// Slow, heavy frontliner; shoves everything lighter out of its lane
    pub fn brute() -> Self {
        Self {
            speed: 1.0,
            size: 2.0,
            mass: 8.0,
        }
    }

    /// Fast, fragile, easily displaced
    pub fn swarmling() -> Self {
        Self {
            speed: 3.0,
            size: 0.6,
            mass: 1.0,
        }
    }

    /// Stationary defensive tower
    pub fn tower() -> Self {
        Self {
            speed: 0.0,
            size: 3.0,
            mass: 100.0,
        }
    }
}

/// Entity category a weak reference points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Mob,
    Building,
}

/// Non-owning handle to an entity in either player's roster. Resolution can
/// fail (the entity died); callers fall back to waypoint guidance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub side: Side,
    pub kind: EntityKind,
    pub id: u32,
}

/// Per-axis movement freezes produced by one tick's constraint pass and
/// consumed by the NEXT tick's steering pass. The one-tick lag is part of
/// the design, not an accident.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisFreeze {
    pub x: bool,
    pub y: bool,
}

/// Addresses one mob within the match (roster side + entity id)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MobHandle {
    pub side: Side,
    pub id: u32,
}

/// A mobile ground unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mob {
    pub id: u32,
    pub side: Side,
    pub pos: Vec2,
    pub vel: Vec2,
    pub stats: Stats,
    /// Current attack target, assigned by the AI layer outside this crate
    pub target: Option<EntityRef>,
    /// Index into the arena waypoint table while lane-following
    pub waypoint: Option<usize>,
    /// Constraint output of the previous tick
    pub freeze: AxisFreeze,
}

impl Mob {
    pub fn new(id: u32, side: Side, stats: Stats, pos: Vec2) -> Self {
        Self {
            id,
            side,
            pos,
            vel: Vec2::ZERO,
            stats,
            target: None,
            waypoint: None,
            freeze: AxisFreeze::default(),
        }
    }

    pub fn handle(&self) -> MobHandle {
        MobHandle {
            side: self.side,
            id: self.id,
        }
    }
}

/// A stationary structure. Read-only from the movement core's perspective.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Building {
    pub id: u32,
    pub side: Side,
    pub pos: Vec2,
    pub stats: Stats,
}

/// One player's rosters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub side: Side,
    /// Sorted by id for deterministic iteration
    pub mobs: Vec<Mob>,
    pub buildings: Vec<Building>,
}

impl Player {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            mobs: Vec::new(),
            buildings: Vec::new(),
        }
    }

    pub fn mob(&self, id: u32) -> Option<&Mob> {
        self.mobs.iter().find(|m| m.id == id)
    }

    pub fn mob_mut(&mut self, id: u32) -> Option<&mut Mob> {
        self.mobs.iter_mut().find(|m| m.id == id)
    }

    pub fn building(&self, id: u32) -> Option<&Building> {
        self.buildings.iter().find(|b| b.id == id)
    }
}

/// Complete match state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    pub arena: Arena,
    /// North at index 0, south at index 1
    pub players: [Player; 2],
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Next entity ID
    next_id: u32,
}

impl MatchState {
    pub fn new(arena: Arena) -> Self {
        Self {
            arena,
            players: [Player::new(Side::North), Player::new(Side::South)],
            time_ticks: 0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[inline]
    pub fn player(&self, side: Side) -> &Player {
        &self.players[side.index()]
    }

    #[inline]
    pub fn player_mut(&mut self, side: Side) -> &mut Player {
        &mut self.players[side.index()]
    }

    pub fn mob(&self, handle: MobHandle) -> Option<&Mob> {
        self.player(handle.side).mob(handle.id)
    }

    pub fn mob_mut(&mut self, handle: MobHandle) -> Option<&mut Mob> {
        self.player_mut(handle.side).mob_mut(handle.id)
    }

    pub fn spawn_mob(&mut self, side: Side, stats: Stats, pos: Vec2) -> MobHandle {
        let id = self.next_entity_id();
        self.player_mut(side).mobs.push(Mob::new(id, side, stats, pos));
        MobHandle { side, id }
    }

    pub fn spawn_building(&mut self, side: Side, stats: Stats, pos: Vec2) -> EntityRef {
        let id = self.next_entity_id();
        self.player_mut(side).buildings.push(Building {
            id,
            side,
            pos,
            stats,
        });
        EntityRef {
            side,
            kind: EntityKind::Building,
            id,
        }
    }

    /// Resolve a weak entity reference to its current position and stats.
    /// `None` means the entity is gone from its roster.
    pub fn resolve_entity(&self, entity: EntityRef) -> Option<(Vec2, Stats)> {
        let player = self.player(entity.side);
        match entity.kind {
            EntityKind::Mob => player.mob(entity.id).map(|m| (m.pos, m.stats)),
            EntityKind::Building => player.building(entity.id).map(|b| (b.pos, b.stats)),
        }
    }

    /// Ensure rosters are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        for player in &mut self.players {
            player.mobs.sort_by_key(|m| m.id);
            player.buildings.sort_by_key(|b| b.id);
        }
    }
}
