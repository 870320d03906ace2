//! Arena geometry: tile grid, river corridor, bridges, lane waypoints
//!
//! The map is a [0, width] x [0, height] grid with the origin at the top-left
//! corner and y increasing southward (the north player sits at low y). A
//! river band crosses the middle rows, passable only at two bridge columns;
//! the band minus the bridge gaps yields three forbidden rectangles that the
//! collision pass pushes mobs out of.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// An axis-aligned rectangle, closed on all four edges
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Square footprint centered on a position
    pub fn from_center_half(center: Vec2, half: f32) -> Self {
        Self {
            min: center - Vec2::splat(half),
            max: center + Vec2::splat(half),
        }
    }

    /// Point containment, edges inclusive
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Closed-interval box overlap (touching edges count as overlapping)
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.max.x >= other.min.x
            && self.min.x <= other.max.x
            && self.max.y >= other.min.y
            && self.min.y <= other.max.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }
}

/// Which forbidden river rectangle a position falls in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiverSpan {
    /// West bank to the left bridge
    Left,
    /// Between the two bridges
    Middle,
    /// Right bridge to the east bank
    Right,
}

/// Static match geometry, built once at match setup and shared read-only
/// by the steering and collision passes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    pub river_top_y: f32,
    pub river_bot_y: f32,
    pub left_bridge_x: f32,
    pub right_bridge_x: f32,
    pub bridge_width: f32,
    /// Lane guidance points, one run of them down each bridge column
    pub waypoints: Vec<Vec2>,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
            river_top_y: RIVER_TOP_Y,
            river_bot_y: RIVER_BOT_Y,
            left_bridge_x: LEFT_BRIDGE_CENTER_X,
            right_bridge_x: RIGHT_BRIDGE_CENTER_X,
            bridge_width: BRIDGE_WIDTH,
            waypoints: default_waypoints(),
        }
    }
}

impl Arena {
    /// The y coordinate splitting the map into north and south halves
    #[inline]
    pub fn mid_y(&self) -> f32 {
        self.height / 2.0
    }

    /// Full map rectangle
    pub fn bounds(&self) -> Rect {
        Rect::new(Vec2::ZERO, Vec2::new(self.width, self.height))
    }

    /// True if both positions are on the same side of the river
    #[inline]
    pub fn same_side(&self, a: Vec2, b: Vec2) -> bool {
        (a.y < self.mid_y()) == (b.y < self.mid_y())
    }

    /// The three forbidden river rectangles, west to east. Bridge columns
    /// are the gaps between them.
    pub fn river_spans(&self) -> [Rect; 3] {
        let half_bridge = self.bridge_width / 2.0;
        let top = self.river_top_y;
        let bot = self.river_bot_y;
        [
            Rect::new(
                Vec2::new(0.0, top),
                Vec2::new(self.left_bridge_x - half_bridge, bot),
            ),
            Rect::new(
                Vec2::new(self.left_bridge_x + half_bridge, top),
                Vec2::new(self.right_bridge_x - half_bridge, bot),
            ),
            Rect::new(
                Vec2::new(self.right_bridge_x + half_bridge, top),
                Vec2::new(self.width, bot),
            ),
        ]
    }

    /// Classify a position against the river. `None` means dry land or a
    /// bridge.
    pub fn river_span_at(&self, pos: Vec2) -> Option<(RiverSpan, Rect)> {
        let [left, middle, right] = self.river_spans();
        if left.contains(pos) {
            Some((RiverSpan::Left, left))
        } else if middle.contains(pos) {
            Some((RiverSpan::Middle, middle))
        } else if right.contains(pos) {
            Some((RiverSpan::Right, right))
        } else {
            None
        }
    }
}

/// Default lane waypoints: a run of points down each bridge column, crossing
/// the river at the bridge itself.
fn default_waypoints() -> Vec<Vec2> {
    let lane_ys = [2.0, 6.0, 10.0, 14.0, 16.0, 18.0, 22.0, 26.0, 30.0];
    let mut points = Vec::with_capacity(lane_ys.len() * 2);
    for &x in &[LEFT_BRIDGE_CENTER_X, RIGHT_BRIDGE_CENTER_X] {
        for &y in &lane_ys {
            points.push(Vec2::new(x, y));
        }
    }
    points
}
