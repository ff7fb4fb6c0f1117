//! Value-type shapes used by the collision routines
//!
//! Everything here is `Copy` and built per query from live game state:
//! - `Box2D`: axis-aligned box stored as center + half extents
//! - `Circle`: center + radius
//! - `Line2D`: oriented segment, used internally for box edges and swept paths
//!
//! Screen convention: +y points down, so a box's top edge is at `center.y - extents.y`.
//! Negative radii or extents are not rejected; callers are expected to pass valid shapes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Box2D {
    pub center: Vec2,
    /// Half width / half height
    pub extents: Vec2,
}

impl Box2D {
    pub fn new(center: Vec2, extents: Vec2) -> Self {
        Self { center, extents }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.extents
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.extents
    }

    /// The four faces of the box, each stretched by `extra` past both corners
    /// along its own axis.
    ///
    /// Sweeping a point on the circle's rim against these edges covers the
    /// rounded corners of the Minkowski sum with a square overhang.
    pub fn inflated_edges(&self, extra: f32) -> BoxEdges {
        let c = self.center;
        let e = self.extents;
        BoxEdges {
            top: Line2D::new(
                c + Vec2::new(-e.x - extra, -e.y),
                c + Vec2::new(e.x + extra, -e.y),
            ),
            bottom: Line2D::new(
                c + Vec2::new(-e.x - extra, e.y),
                c + Vec2::new(e.x + extra, e.y),
            ),
            left: Line2D::new(
                c + Vec2::new(-e.x, -e.y - extra),
                c + Vec2::new(-e.x, e.y + extra),
            ),
            right: Line2D::new(
                c + Vec2::new(e.x, -e.y - extra),
                c + Vec2::new(e.x, e.y + extra),
            ),
        }
    }
}

/// Faces of a `Box2D`, see [`Box2D::inflated_edges`]
#[derive(Debug, Clone, Copy)]
pub struct BoxEdges {
    pub top: Line2D,
    pub bottom: Line2D,
    pub left: Line2D,
    pub right: Line2D,
}

/// A circle, represented by a center and radius
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn translate(self, offset: Vec2) -> Self {
        Self {
            center: self.center + offset,
            ..self
        }
    }

    /// Point on the rim furthest along `dir` (axis-aligned unit directions only)
    #[inline]
    pub fn rim_point(&self, dir: Vec2) -> Vec2 {
        self.center + dir * self.radius
    }
}

/// Line segment from `start` to `end`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Line2D {
    pub start: Vec2,
    pub end: Vec2,
}

impl Line2D {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    /// Segment covering a point's travel over one step
    pub fn swept(start: Vec2, displacement: Vec2) -> Self {
        Self {
            start,
            end: start + displacement,
        }
    }

    #[inline]
    pub fn delta(&self) -> Vec2 {
        self.end - self.start
    }
}
