//! Movement resolution against static walls
//!
//! Axis-separated, not swept: each axis is tried on its own and reverted if
//! it would put the box inside a wall. Player and enemies share this path.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, rects_overlap};
use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};

/// The rectangular play field every actor is clamped into
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

impl Arena {
    /// Clamp a box's top-left corner so the whole box stays on the field
    pub fn clamp(&self, rect: Rect) -> Rect {
        let max_x = (self.width - rect.w).max(0.0);
        let max_y = (self.height - rect.h).max(0.0);
        Rect::new(rect.x.clamp(0.0, max_x), rect.y.clamp(0.0, max_y), rect.w, rect.h)
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// Result of a resolved move
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveOutcome {
    /// Final top-left corner after collision and clamping
    pub pos: Vec2,
    /// x displacement was reverted by a wall
    pub blocked_x: bool,
    /// y displacement was reverted by a wall
    pub blocked_y: bool,
}

impl MoveOutcome {
    /// Both axes hit something, the actor did not move this tick
    #[inline]
    pub fn blocked(&self) -> bool {
        self.blocked_x && self.blocked_y
    }
}

/// True if the box overlaps any obstacle
#[inline]
pub fn overlaps_any(rect: &Rect, obstacles: &[Rect]) -> bool {
    obstacles.iter().any(|wall| rects_overlap(rect, wall))
}

/// Apply a desired displacement, one axis at a time
///
/// 1. x is moved, clamped into the arena, and reverted on any overlap.
/// 2. y is moved (from the x result), clamped, and reverted on any overlap.
/// 3. Both reverted means no movement.
///
/// Every tentative position is clamped before its wall test, so a box that
/// starts clear of every obstacle ends clear of every obstacle and on the
/// field, however many moves are chained.
pub fn resolve_move(rect: Rect, dx: f32, dy: f32, obstacles: &[Rect], arena: &Arena) -> MoveOutcome {
    let mut current = rect;

    let moved_x = arena.clamp(current.translated(dx, 0.0));
    let blocked_x = dx != 0.0 && overlaps_any(&moved_x, obstacles);
    if !blocked_x {
        current = moved_x;
    }

    let moved_y = arena.clamp(current.translated(0.0, dy));
    let blocked_y = dy != 0.0 && overlaps_any(&moved_y, obstacles);
    if !blocked_y {
        current = moved_y;
    }

    if blocked_x && blocked_y {
        current = rect;
    }

    MoveOutcome {
        pos: current.pos(),
        blocked_x,
        blocked_y,
    }
}

/// Push two overlapping boxes apart along the axis of least penetration
///
/// Each box moves half the penetration depth in opposite directions, is
/// re-clamped to the arena, and keeps its old position if the push would
/// embed it in a wall. Returns true if the boxes overlapped.
pub fn separate(a: &mut Rect, b: &mut Rect, obstacles: &[Rect], arena: &Arena) -> bool {
    if !rects_overlap(a, b) {
        return false;
    }

    let delta = b.center() - a.center();
    let pen_x = (a.w + b.w) / 2.0 - delta.x.abs();
    let pen_y = (a.h + b.h) / 2.0 - delta.y.abs();

    // Coincident centres: pick a fixed direction so the pair still splits
    let (push_a, push_b) = if pen_x <= pen_y {
        let dir = if delta.x >= 0.0 { 1.0 } else { -1.0 };
        let half = pen_x / 2.0 * dir;
        (Vec2::new(-half, 0.0), Vec2::new(half, 0.0))
    } else {
        let dir = if delta.y >= 0.0 { 1.0 } else { -1.0 };
        let half = pen_y / 2.0 * dir;
        (Vec2::new(0.0, -half), Vec2::new(0.0, half))
    };

    *a = push_if_clear(*a, push_a, obstacles, arena);
    *b = push_if_clear(*b, push_b, obstacles, arena);
    true
}

fn push_if_clear(rect: Rect, push: Vec2, obstacles: &[Rect], arena: &Arena) -> Rect {
    let pushed = arena.clamp(rect.translated(push.x, push.y));
    if overlaps_any(&pushed, obstacles) {
        rect
    } else {
        pushed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(x: f32, y: f32) -> Rect {
        Rect::new(x, y, 20.0, 20.0)
    }

    #[test]
    fn test_free_move() {
        let out = resolve_move(actor(100.0, 100.0), 3.0, -2.0, &[], &Arena::default());
        assert_eq!(out.pos, Vec2::new(103.0, 98.0));
        assert!(!out.blocked_x && !out.blocked_y);
    }

    #[test]
    fn test_slides_along_wall() {
        // Wall directly to the right, diagonal input keeps the y component
        let wall = Rect::new(121.0, 0.0, 20.0, 400.0);
        let out = resolve_move(actor(100.0, 100.0), 4.0, 4.0, &[wall], &Arena::default());
        assert!(out.blocked_x);
        assert!(!out.blocked_y);
        assert_eq!(out.pos, Vec2::new(100.0, 104.0));
    }

    #[test]
    fn test_both_axes_blocked_is_noop() {
        // Inside a corner formed by two walls
        let right = Rect::new(121.0, 50.0, 20.0, 100.0);
        let below = Rect::new(50.0, 121.0, 100.0, 20.0);
        let out = resolve_move(actor(100.0, 100.0), 2.0, 2.0, &[right, below], &Arena::default());
        assert!(out.blocked());
        assert_eq!(out.pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_touching_wall_is_allowed() {
        let wall = Rect::new(120.0, 0.0, 20.0, 400.0);
        let out = resolve_move(actor(99.0, 100.0), 1.0, 0.0, &[wall], &Arena::default());
        assert!(!out.blocked_x);
        assert_eq!(out.pos.x, 100.0);
    }

    #[test]
    fn test_clamped_to_arena() {
        let arena = Arena::default();
        let out = resolve_move(actor(790.0, -5.0), 50.0, -50.0, &[], &arena);
        assert_eq!(out.pos, Vec2::new(780.0, 0.0));
    }

    #[test]
    fn test_wall_near_border_keeps_actor_on_field() {
        // Wall hugging the right border below the actor; the clamp must not
        // be traded away for wall clearance
        let arena = Arena::default();
        let wall = Rect::new(770.0, 110.0, 12.0, 40.0);
        let mut rect = actor(780.0, 88.0);
        for _ in 0..20 {
            let out = resolve_move(rect, 4.0, 4.0, &[wall], &arena);
            rect = Rect::at(out.pos, rect.w, rect.h);
            assert!(rect.right() <= arena.width, "left the field: {rect:?}");
            assert!(rect.bottom() <= arena.height);
            assert!(!overlaps_any(&rect, &[wall]));
        }
    }

    #[test]
    fn test_separate_pushes_symmetrically() {
        let mut a = actor(100.0, 100.0);
        let mut b = actor(110.0, 102.0);
        assert!(separate(&mut a, &mut b, &[], &Arena::default()));
        assert!(!rects_overlap(&a, &b));
        assert_eq!(a.x, 95.0);
        assert_eq!(b.x, 115.0);
        assert_eq!(a.y, 100.0);
    }

    #[test]
    fn test_separate_rejects_push_into_wall() {
        let wall = Rect::new(80.0, 0.0, 20.0, 400.0);
        let mut a = actor(100.0, 100.0);
        let mut b = actor(110.0, 100.0);
        separate(&mut a, &mut b, &[wall], &Arena::default());
        // a would have gone into the wall, it stays put; b still moves away
        assert_eq!(a.x, 100.0);
        assert_eq!(b.x, 115.0);
        assert!(!overlaps_any(&a, &[wall]));
    }

    #[test]
    fn test_separate_ignores_disjoint() {
        let mut a = actor(0.0, 0.0);
        let mut b = actor(20.0, 0.0);
        assert!(!separate(&mut a, &mut b, &[], &Arena::default()));
        assert_eq!(b.x, 20.0);
    }
}
