//! Axis-aligned rectangle and segment geometry
//!
//! Shared by every actor's collision and perception queries. Walls, actor
//! bounding boxes and the exit zone are all plain `Rect`s with the origin at
//! the top-left corner (screen coordinates, y grows downward).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned, non-rotated rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of the given size with its top-left corner at `pos`
    #[inline]
    pub fn at(pos: Vec2, w: f32, h: f32) -> Self {
        Self::new(pos.x, pos.y, w, h)
    }

    /// Rectangle of the given size centred on `center`
    #[inline]
    pub fn from_center(center: Vec2, w: f32, h: f32) -> Self {
        Self::new(center.x - w / 2.0, center.y - h / 2.0, w, h)
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Copy moved by (dx, dy)
    #[inline]
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.w, self.h)
    }

    /// Width and height are both strictly positive and finite
    pub fn is_valid(&self) -> bool {
        self.w > 0.0
            && self.h > 0.0
            && self.x.is_finite()
            && self.y.is_finite()
            && self.w.is_finite()
            && self.h.is_finite()
    }

    /// The four edges as segments: top, right, bottom, left
    pub fn edges(&self) -> [(Vec2, Vec2); 4] {
        let tl = Vec2::new(self.x, self.y);
        let tr = Vec2::new(self.right(), self.y);
        let br = Vec2::new(self.right(), self.bottom());
        let bl = Vec2::new(self.x, self.bottom());
        [(tl, tr), (tr, br), (bl, br), (tl, bl)]
    }
}

/// Strict overlap test. Rectangles that only share an edge do NOT overlap.
///
/// This is the collision predicate used by movement, pickups, the exit zone
/// and enemy contact.
#[inline]
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}

/// Inclusive point containment (validation and diagnostics only)
#[inline]
pub fn point_in_rect(p: Vec2, r: &Rect) -> bool {
    p.x >= r.x && p.x <= r.right() && p.y >= r.y && p.y <= r.bottom()
}

/// Parametric segment/segment intersection (endpoints inclusive)
///
/// Parallel and collinear segments report no intersection, including the
/// collinear-overlap case. Line of sight along a wall face is therefore
/// never blocked by that face alone.
pub fn segments_intersect(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> bool {
    let den = (p1.x - p2.x) * (p3.y - p4.y) - (p1.y - p2.y) * (p3.x - p4.x);
    if den == 0.0 {
        return false;
    }

    let t = ((p1.x - p3.x) * (p3.y - p4.y) - (p1.y - p3.y) * (p3.x - p4.x)) / den;
    let u = -((p1.x - p2.x) * (p1.y - p3.y) - (p1.y - p2.y) * (p1.x - p3.x)) / den;

    (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u)
}

/// True if the segment crosses any of the rectangle's four edges
///
/// A segment lying entirely inside the rectangle touches no edge and is not
/// reported.
pub fn segment_intersects_rect(p1: Vec2, p2: Vec2, rect: &Rect) -> bool {
    rect.edges()
        .iter()
        .any(|&(a, b)| segments_intersect(p1, p2, a, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_basic() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(rects_overlap(&a, &b));
        assert!(rects_overlap(&b, &a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        let corner = Rect::new(10.0, 10.0, 5.0, 5.0);
        assert!(!rects_overlap(&a, &right));
        assert!(!rects_overlap(&a, &below));
        assert!(!rects_overlap(&a, &corner));
        assert!(!rects_overlap(&right, &a));
    }

    #[test]
    fn test_contained_rect_overlaps() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 5.0, 5.0);
        assert!(rects_overlap(&outer, &inner));
    }

    #[test]
    fn test_point_in_rect_inclusive() {
        let r = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(point_in_rect(Vec2::new(10.0, 10.0), &r));
        assert!(point_in_rect(Vec2::new(30.0, 30.0), &r));
        assert!(point_in_rect(Vec2::new(20.0, 15.0), &r));
        assert!(!point_in_rect(Vec2::new(30.1, 15.0), &r));
    }

    #[test]
    fn test_segments_cross() {
        assert!(segments_intersect(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
            Vec2::new(10.0, 0.0),
        ));
        assert!(!segments_intersect(
            Vec2::new(0.0, 0.0),
            Vec2::new(4.0, 4.0),
            Vec2::new(0.0, 10.0),
            Vec2::new(10.0, 0.0),
        ));
    }

    #[test]
    fn test_parallel_segments_never_intersect() {
        // Collinear and overlapping, still reported as a miss
        assert!(!segments_intersect(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(5.0, 0.0),
            Vec2::new(15.0, 0.0),
        ));
        assert!(!segments_intersect(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(10.0, 1.0),
        ));
    }

    #[test]
    fn test_segment_through_rect() {
        let wall = Rect::new(40.0, 0.0, 20.0, 100.0);
        assert!(segment_intersects_rect(
            Vec2::new(0.0, 50.0),
            Vec2::new(100.0, 50.0),
            &wall
        ));
        assert!(!segment_intersects_rect(
            Vec2::new(0.0, 150.0),
            Vec2::new(100.0, 150.0),
            &wall
        ));
    }

    #[test]
    fn test_segment_grazing_wall_face_is_not_blocked() {
        // Sightline lies on the top face without reaching either corner
        let wall = Rect::new(40.0, 0.0, 20.0, 100.0);
        assert!(!segment_intersects_rect(
            Vec2::new(45.0, 0.0),
            Vec2::new(55.0, 0.0),
            &wall
        ));
        // Reaching a corner touches the perpendicular edge
        assert!(segment_intersects_rect(
            Vec2::new(0.0, 0.0),
            Vec2::new(45.0, 0.0),
            &wall
        ));
    }

    #[test]
    fn test_edges_and_center() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.center(), Vec2::new(25.0, 40.0));
        assert_eq!(Rect::from_center(r.center(), 30.0, 40.0), r);
        let [top, right, bottom, left] = r.edges();
        assert_eq!(top.1, Vec2::new(40.0, 20.0));
        assert_eq!(right.1, Vec2::new(40.0, 60.0));
        assert_eq!(bottom.0, Vec2::new(10.0, 60.0));
        assert_eq!(left.1, Vec2::new(10.0, 60.0));
        assert!(r.is_valid());
        assert!(!Rect::new(0.0, 0.0, 0.0, 5.0).is_valid());
    }
}
