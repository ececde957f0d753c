//! Off-path detection
//!
//! The runner is "on path" while it stays within half the path width plus a
//! margin of the segment it is traversing. Leaving that band forfeits the attempt.

use glam::Vec2;

use super::path::PathSegment;

/// Result of an off-path check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffPathCheck {
    /// Distance from the segment centerline
    pub distance: f32,
    /// Maximum tolerated distance
    pub allowed: f32,
}

impl OffPathCheck {
    #[inline]
    pub fn in_bounds(&self) -> bool {
        self.distance <= self.allowed
    }
}

/// Shortest distance from `point` to the segment `start..end`
///
/// Projects the point onto the segment, clamping to the endpoints. A zero-length
/// segment degenerates to point distance.
pub fn distance_to_segment(point: Vec2, start: Vec2, end: Vec2) -> f32 {
    let d = end - start;
    let length_sq = d.length_squared();
    if length_sq == 0.0 {
        return point.distance(start);
    }

    let t = ((point - start).dot(d) / length_sq).clamp(0.0, 1.0);
    let projected = start + d * t;
    point.distance(projected)
}

/// Tolerated distance from a segment's centerline
#[inline]
pub fn allowed_distance(path_width: f32, margin: f32) -> f32 {
    path_width * 0.5 + margin
}

/// Measure how far `pos` strays from `segment`
pub fn measure_off_path(
    pos: Vec2,
    segment: &PathSegment,
    path_width: f32,
    margin: f32,
) -> OffPathCheck {
    OffPathCheck {
        distance: distance_to_segment(pos, segment.start, segment.end),
        allowed: allowed_distance(path_width, margin),
    }
}

/// True while `pos` is on the path
#[inline]
pub fn check_off_path(pos: Vec2, segment: &PathSegment, path_width: f32, margin: f32) -> bool {
    measure_off_path(pos, segment, path_width, margin).in_bounds()
}
