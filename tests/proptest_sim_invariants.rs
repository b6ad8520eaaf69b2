//! Property-based invariant tests for the simulation primitives.
//!
//! 1. Rectangle overlap is symmetric.
//! 2. Rectangles that only share an edge never overlap.
//! 3. The movement resolver never ends a clear box inside a wall.
//! 4. Without walls the resolver keeps boxes on the field.
//! 4b. Chained moves stay clear of walls and on the field.
//! 5. Separation never pushes a clear box into a wall.
//! 6. Angle normalization lands in (-π, π] and is 2π-periodic.
//! 7. Vision never reaches past its range.
//! 8. The detection meter stays within 0..=100.

use covert_ops::consts::DETECTION_MAX;
use covert_ops::normalize_angle;
use covert_ops::sim::collision::{Arena, overlaps_any, resolve_move, separate};
use covert_ops::sim::geometry::{Rect, rects_overlap};
use covert_ops::sim::perception::can_see;
use covert_ops::sim::state::DetectionMeter;
use glam::Vec2;
use proptest::prelude::*;
use std::f32::consts::{PI, TAU};

// ── Helpers ─────────────────────────────────────────────────────────────

fn rect_strategy() -> impl Strategy<Value = Rect> {
    (-100.0f32..900.0, -100.0f32..600.0, 1.0f32..200.0, 1.0f32..200.0)
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

fn wall_strategy() -> impl Strategy<Value = Rect> {
    (0.0f32..780.0, 0.0f32..480.0, 5.0f32..120.0, 5.0f32..120.0)
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

fn actor_strategy() -> impl Strategy<Value = Rect> {
    (0.0f32..780.0, 0.0f32..480.0).prop_map(|(x, y)| Rect::new(x, y, 20.0, 20.0))
}

fn on_field(rect: &Rect, arena: &Arena) -> bool {
    rect.x >= 0.0 && rect.y >= 0.0 && rect.right() <= arena.width && rect.bottom() <= arena.height
}

/// Distance between two angles on the circle
fn circular_distance(a: f32, b: f32) -> f32 {
    let d = (a - b).abs() % TAU;
    d.min(TAU - d)
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Overlap is symmetric
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn overlap_symmetric(a in rect_strategy(), b in rect_strategy()) {
        prop_assert_eq!(
            rects_overlap(&a, &b),
            rects_overlap(&b, &a),
            "overlap is not symmetric: a={:?}, b={:?}",
            a, b
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Shared edges are not overlap
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn touching_edges_do_not_overlap(a in rect_strategy(), w in 1.0f32..200.0, h in 1.0f32..200.0, offset in -50.0f32..50.0) {
        let right = Rect::new(a.right(), a.y + offset, w, h);
        let below = Rect::new(a.x + offset, a.bottom(), w, h);
        prop_assert!(!rects_overlap(&a, &right), "right neighbour overlaps: {:?} {:?}", a, right);
        prop_assert!(!rects_overlap(&right, &a));
        prop_assert!(!rects_overlap(&a, &below), "lower neighbour overlaps: {:?} {:?}", a, below);
        prop_assert!(!rects_overlap(&below, &a));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Resolver safety
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn resolver_never_embeds_in_walls(
        walls in prop::collection::vec(wall_strategy(), 0..12),
        start in actor_strategy(),
        dx in -30.0f32..30.0,
        dy in -30.0f32..30.0,
    ) {
        prop_assume!(!overlaps_any(&start, &walls));
        let arena = Arena::default();

        let outcome = resolve_move(start, dx, dy, &walls, &arena);
        let end = Rect::at(outcome.pos, start.w, start.h);
        prop_assert!(
            !overlaps_any(&end, &walls),
            "moved into a wall: start={:?} d=({}, {}) end={:?}",
            start, dx, dy, end
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Open field keeps actors inside
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn resolver_clamps_to_field(start in actor_strategy(), dx in -900.0f32..900.0, dy in -900.0f32..900.0) {
        let arena = Arena::default();
        let outcome = resolve_move(start, dx, dy, &[], &arena);
        let end = Rect::at(outcome.pos, start.w, start.h);
        prop_assert!(on_field(&end, &arena), "left the field: {:?}", end);
        prop_assert!(!outcome.blocked());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4b. Chained moves through walls
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn chained_moves_stay_clear_and_on_field(
        walls in prop::collection::vec(wall_strategy(), 0..12),
        start in actor_strategy(),
        moves in prop::collection::vec((-30.0f32..30.0, -30.0f32..30.0), 1..60),
    ) {
        prop_assume!(!overlaps_any(&start, &walls));
        let arena = Arena::default();

        let mut rect = start;
        for (step, (dx, dy)) in moves.into_iter().enumerate() {
            let outcome = resolve_move(rect, dx, dy, &walls, &arena);
            rect = Rect::at(outcome.pos, rect.w, rect.h);
            prop_assert!(
                !overlaps_any(&rect, &walls),
                "step {} moved into a wall: d=({}, {}) end={:?}",
                step, dx, dy, rect
            );
            prop_assert!(on_field(&rect, &arena), "step {} left the field: {:?}", step, rect);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Separation respects walls
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn separation_never_embeds_in_walls(
        walls in prop::collection::vec(wall_strategy(), 0..8),
        a in actor_strategy(),
        ox in -19.0f32..19.0,
        oy in -19.0f32..19.0,
    ) {
        let b = a.translated(ox, oy);
        prop_assume!(!overlaps_any(&a, &walls) && !overlaps_any(&b, &walls));
        let arena = Arena::default();
        prop_assume!(on_field(&b, &arena));

        let (mut a2, mut b2) = (a, b);
        prop_assert!(separate(&mut a2, &mut b2, &walls, &arena));
        prop_assert!(!overlaps_any(&a2, &walls), "a pushed into a wall: {:?}", a2);
        prop_assert!(!overlaps_any(&b2, &walls), "b pushed into a wall: {:?}", b2);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Angle normalization
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn normalize_in_range(angle in -1000.0f32..1000.0) {
        let n = normalize_angle(angle);
        prop_assert!(n > -PI && n <= PI, "normalize({}) = {} out of range", angle, n);
    }

    #[test]
    fn normalize_is_periodic(angle in -50.0f32..50.0, k in -5i32..=5) {
        let a = normalize_angle(angle);
        let b = normalize_angle(angle + TAU * k as f32);
        // Compare on the circle: ±π are the same direction
        prop_assert!(
            circular_distance(a, b) < 1e-3,
            "normalize({}) = {} but shifted by {}·2π gives {}",
            angle, a, k, b
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Vision range is a hard limit
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn never_seen_beyond_range(
        facing in -PI..PI,
        bearing in -PI..PI,
        range in 10.0f32..300.0,
        extra in 1.0f32..200.0,
    ) {
        let observer = Vec2::new(400.0, 250.0);
        let target = observer + Vec2::from_angle(bearing) * (range + extra);
        prop_assert!(!can_see(observer, facing, target, range, PI, &[]));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 8. Meter saturation
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn meter_stays_bounded(steps in prop::collection::vec((any::<bool>(), 0.0f32..80.0), 0..200)) {
        let mut meter = DetectionMeter::default();
        for (up, amount) in steps {
            if up {
                meter.raise(amount);
            } else {
                meter.decay(amount);
            }
            prop_assert!(meter.value() >= 0.0 && meter.value() <= DETECTION_MAX);
        }
    }
}
