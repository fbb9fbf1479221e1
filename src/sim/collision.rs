//! Collision primitives and predicates
//!
//! Two tiers: a cheap circle/circle broad phase, then a triangle/circle
//! narrow phase that only runs when the broad phase reports a hit.

use glam::Vec2;

use crate::distance;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub p1: Vec2,
    pub p2: Vec2,
    pub p3: Vec2,
}

impl Triangle {
    pub fn new(p1: Vec2, p2: Vec2, p3: Vec2) -> Self {
        Self { p1, p2, p3 }
    }

    pub fn vertices(&self) -> [Vec2; 3] {
        [self.p1, self.p2, self.p3]
    }
}

/// Axis-aligned rectangle (top-left corner, width, height)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
}

/// Strictly inside: a point on the circle boundary does not count
#[inline]
pub fn point_in_circle(p: Vec2, c: &Circle) -> bool {
    distance(p, c.center) < c.radius
}

/// Boundary-inclusive, compared on squared distances
#[inline]
pub fn circles_overlap(c1: &Circle, c2: &Circle) -> bool {
    let dx = c2.center.x - c1.center.x;
    let dy = c2.center.y - c1.center.y;
    let r_sum = c1.radius + c2.radius;
    dx * dx + dy * dy <= r_sum * r_sum
}

#[inline]
pub fn rect_contains_point(r: &Rect, p: Vec2) -> bool {
    p.x >= r.x && p.x <= r.x + r.w && p.y >= r.y && p.y <= r.y + r.h
}

#[inline]
pub fn rects_overlap(r1: &Rect, r2: &Rect) -> bool {
    !(r1.x > r2.x + r2.w || r1.x + r1.w < r2.x || r1.y > r2.y + r2.h || r1.y + r1.h < r2.y)
}

/// Vertex test only. The ship triangle is small next to a rock, so an edge
/// crossing the circle with no vertex inside is not considered a hit.
#[inline]
pub fn triangle_collides_circle(t: &Triangle, c: &Circle) -> bool {
    t.vertices().iter().any(|&p| point_in_circle(p, c))
}
