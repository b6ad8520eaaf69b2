//! Vision cone checks: range, cone angle and wall occlusion

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, segment_intersects_rect};
use crate::{angle_diff, bearing};

/// Range and half-angle of an observer's field of view
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisionCone {
    /// Maximum sighting distance
    pub range: f32,
    /// Half of the cone's opening angle (radians)
    pub half_angle: f32,
}

impl Default for VisionCone {
    fn default() -> Self {
        Self {
            range: 150.0,
            half_angle: std::f32::consts::FRAC_PI_6, // 60° cone
        }
    }
}

impl VisionCone {
    pub fn new(range: f32, half_angle: f32) -> Self {
        Self { range, half_angle }
    }

    /// Same cone with the range scaled (vigilance boost)
    pub fn boosted(&self, range_multiplier: f32) -> Self {
        Self {
            range: self.range * range_multiplier,
            half_angle: self.half_angle,
        }
    }

    /// Whether `target` falls inside this cone seen from `observer` facing `facing`
    pub fn sees(&self, observer: Vec2, facing: f32, target: Vec2, walls: &[Rect]) -> bool {
        can_see(observer, facing, target, self.range, self.half_angle, walls)
    }
}

/// Nothing in `walls` crosses the straight segment between the two points
///
/// Partial occlusion and actor width are ignored; the sightline is a single ray.
pub fn has_line_of_sight(from: Vec2, to: Vec2, walls: &[Rect]) -> bool {
    !walls
        .iter()
        .any(|wall| segment_intersects_rect(from, to, wall))
}

/// Full perception test
///
/// Fails when the target is farther than `range`, when the bearing to it
/// differs from `facing` by more than `half_angle` (wraparound aware), or when
/// a wall blocks the line of sight.
pub fn can_see(
    observer: Vec2,
    facing: f32,
    target: Vec2,
    range: f32,
    half_angle: f32,
    walls: &[Rect],
) -> bool {
    if observer.distance(target) > range {
        return false;
    }

    let delta = angle_diff(facing, bearing(observer, target));
    if delta.abs() > half_angle {
        return false;
    }

    has_line_of_sight(observer, target, walls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_6, PI};

    #[test]
    fn test_sees_target_straight_ahead() {
        assert!(can_see(Vec2::ZERO, 0.0, Vec2::new(100.0, 0.0), 150.0, FRAC_PI_6, &[]));
    }

    #[test]
    fn test_target_outside_cone() {
        assert!(!can_see(Vec2::ZERO, 0.0, Vec2::new(0.0, 100.0), 150.0, FRAC_PI_6, &[]));
    }

    #[test]
    fn test_target_out_of_range() {
        assert!(!can_see(Vec2::ZERO, 0.0, Vec2::new(151.0, 0.0), 150.0, FRAC_PI_6, &[]));
        assert!(can_see(Vec2::ZERO, 0.0, Vec2::new(150.0, 0.0), 150.0, FRAC_PI_6, &[]));
    }

    #[test]
    fn test_cone_wraps_around_pi() {
        // Facing almost exactly left; target slightly below-left sits across the ±π seam
        let facing = PI - 0.05;
        let target = Vec2::new(-100.0, 5.0);
        assert!(can_see(Vec2::ZERO, facing, target, 150.0, FRAC_PI_6, &[]));
        let target = Vec2::new(-100.0, -5.0);
        assert!(can_see(Vec2::ZERO, facing, target, 150.0, FRAC_PI_6, &[]));
    }

    #[test]
    fn test_wall_blocks_sight() {
        let wall = Rect::new(40.0, -50.0, 20.0, 100.0);
        assert!(!can_see(Vec2::ZERO, 0.0, Vec2::new(100.0, 0.0), 150.0, FRAC_PI_6, &[wall]));
        assert!(!has_line_of_sight(Vec2::ZERO, Vec2::new(100.0, 0.0), &[wall]));
    }

    #[test]
    fn test_boosted_range() {
        let cone = VisionCone::default();
        let target = Vec2::new(200.0, 0.0);
        assert!(!cone.sees(Vec2::ZERO, 0.0, target, &[]));
        assert!(cone.boosted(1.5).sees(Vec2::ZERO, 0.0, target, &[]));
    }
}
