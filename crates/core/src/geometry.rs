//! Angle convention shared by every renderer and by the resolver.
//!
//! Angles are degrees, measured clockwise from 12 o'clock. Segment `i` of
//! `n` occupies `[i * 360/n, (i + 1) * 360/n)` in the wheel's unrotated
//! frame. Rotating the wheel clockwise by `r` moves an unrotated angle `a`
//! to screen angle `a + r`.

use std::num::NonZeroUsize;

use serde::Serialize;

use crate::palette::{segment_color, Rgb};

pub const FULL_TURN: f64 = 360.0;

/// Screen angle of the fixed pointer.
pub const POINTER_SCREEN_ANGLE: f64 = 0.0;

/// Radial position of segment labels as a fraction of the wheel radius.
pub const LABEL_RADIUS_FRACTION: f64 = 0.72;

/// Degrees covered by one segment.
pub fn segment_span(count: NonZeroUsize) -> f64 {
    FULL_TURN / count.get() as f64
}

/// Folds any angle into `[0, 360)`.
pub fn normalize_degrees(angle: f64) -> f64 {
    let folded = ((angle % FULL_TURN) + FULL_TURN) % FULL_TURN;
    // -1e-15 + 360.0 rounds to exactly 360.0
    if folded >= FULL_TURN {
        0.0
    } else {
        folded
    }
}

/// Index of the segment occupying `angle` in the unrotated frame.
///
/// Intervals are lower-closed: an angle sitting exactly on an edge belongs
/// to the segment that starts there.
pub fn segment_index_at(angle: f64, count: NonZeroUsize) -> usize {
    let n = count.get();
    // a * n / 360 keeps integer angles on integer edges exact, unlike a / (360 / n)
    let raw = (normalize_degrees(angle) * n as f64 / FULL_TURN).floor() as i64;
    let n = n as i64;
    (((raw % n) + n) % n) as usize
}

/// Unrotated angle that sits under the pointer once the wheel is rotated
/// clockwise by `rotation`.
pub fn pointer_angle(rotation: f64) -> f64 {
    normalize_degrees(FULL_TURN - normalize_degrees(rotation))
}

/// Segment drawn at `screen_angle` while the wheel is rotated by `rotation`.
pub fn segment_at_screen_angle(screen_angle: f64, rotation: f64, count: NonZeroUsize) -> usize {
    segment_index_at(screen_angle - rotation, count)
}

/// Segment under the pointer for a given rotation.
pub fn segment_under_pointer(rotation: f64, count: NonZeroUsize) -> usize {
    segment_index_at(pointer_angle(rotation), count)
}

/// Where a single segment is painted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub index: usize,
    pub start_angle: f64,
    pub span: f64,
    /// Angular midpoint, where the label goes.
    pub mid_angle: f64,
    pub color: Rgb,
}

impl Segment {
    pub fn new(index: usize, count: NonZeroUsize) -> Self {
        let span = segment_span(count);
        let start_angle = index as f64 * span;
        Self {
            index,
            start_angle,
            span,
            mid_angle: start_angle + span / 2.0,
            color: segment_color(index),
        }
    }

    pub fn end_angle(&self) -> f64 {
        self.start_angle + self.span
    }

    /// Text orientation for a label read along the rim.
    pub fn label_rotation(&self) -> f64 {
        normalize_degrees(self.mid_angle + 90.0)
    }

    /// Screen angle of the label midpoint under `rotation`.
    pub fn screen_mid_angle(&self, rotation: f64) -> f64 {
        normalize_degrees(self.mid_angle + rotation)
    }
}

/// Layout of every segment of an `count`-entry wheel, in entry order.
pub fn segment_layout(count: NonZeroUsize) -> Vec<Segment> {
    (0..count.get())
        .map(|index| Segment::new(index, count))
        .collect()
}

/// Converts a screen angle and radius to canvas coordinates (y grows up).
pub fn screen_point(center: (f64, f64), radius: f64, screen_angle: f64) -> (f64, f64) {
    let radians = screen_angle.to_radians();
    (
        radians.sin().mul_add(radius, center.0),
        radians.cos().mul_add(radius, center.1),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn assert_close(actual: f64, expected: f64) {
        let diff = (actual - expected).abs();
        assert!(diff < 1e-9, "expected {expected}, got {actual}, diff {diff}");
    }

    #[test]
    fn normalize_handles_negative_and_large_angles() {
        assert_close(normalize_degrees(-90.0), 270.0);
        assert_close(normalize_degrees(720.0), 0.0);
        assert_close(normalize_degrees(1900.0), 100.0);
        assert_close(normalize_degrees(-1e-15), 0.0);
        assert!(normalize_degrees(-1e-13) < FULL_TURN);
    }

    #[test]
    fn span_covers_full_turn_for_single_entry() {
        assert_close(segment_span(count(1)), 360.0);
        assert_close(segment_span(count(4)), 90.0);
    }

    #[test]
    fn edges_belong_to_the_segment_starting_there() {
        for n in [2, 3, 4, 5, 6, 8, 9, 10, 12, 36, 37] {
            let span = segment_span(count(n));
            for i in 0..n {
                let edge = i as f64 * span;
                assert_eq!(segment_index_at(edge, count(n)), i, "n={n} i={i}");
            }
        }
    }

    #[test]
    fn integer_edges_stay_exact_for_awkward_counts() {
        assert_eq!(segment_index_at(180.0, count(2)), 1);
        assert_eq!(segment_index_at(120.0, count(3)), 1);
        assert_eq!(segment_index_at(359.999_999, count(7)), 6);
    }

    #[test]
    fn index_never_escapes_range() {
        for n in 1..=100 {
            for tenth in -7200..7200 {
                let angle = f64::from(tenth) / 10.0;
                assert!(segment_index_at(angle, count(n)) < n);
            }
            assert!(segment_index_at(-f64::EPSILON, count(n)) < n);
            assert!(segment_index_at(360.0 - 1e-12, count(n)) < n);
        }
    }

    #[test]
    fn coverage_gives_every_index_an_equal_arc() {
        // sweep in 1/100 degree steps; n divides 36000 so arcs are exact
        for n in [1_usize, 2, 3, 4, 5, 6, 8, 9, 10, 12, 15, 16, 18, 20, 24, 36, 40] {
            let mut hits = vec![0_u32; n];
            for step in 0..36_000 {
                let rotation = f64::from(step) / 100.0;
                hits[segment_under_pointer(rotation, count(n))] += 1;
            }
            let expected = 36_000 / n as u32;
            assert!(hits.iter().all(|&h| h == expected), "n={n} hits={hits:?}");
        }
    }

    #[test]
    fn pointer_angle_inverts_clockwise_rotation() {
        assert_close(pointer_angle(0.0), 0.0);
        assert_close(pointer_angle(1800.0), 0.0);
        assert_close(pointer_angle(1900.0), 200.0);
        assert_close(pointer_angle(90.0), 270.0);
    }

    #[test]
    fn painted_segment_under_pointer_matches_resolver() {
        for n in 1..=60 {
            for degrees in 0..720 {
                let rotation = f64::from(degrees) + 0.25;
                let painted = segment_at_screen_angle(POINTER_SCREEN_ANGLE, rotation, count(n));
                assert_eq!(painted, segment_under_pointer(rotation, count(n)));

                // the segment's own unrotated span, moved by the rotation, contains the pointer
                let segment = Segment::new(painted, count(n));
                let offset = normalize_degrees(POINTER_SCREEN_ANGLE - rotation - segment.start_angle);
                assert!(offset < segment.span + 1e-9, "n={n} rotation={rotation}");
            }
        }
    }

    #[test]
    fn layout_places_labels_at_midpoints() {
        let layout = segment_layout(count(4));
        assert_eq!(layout.len(), 4);
        assert_close(layout[2].start_angle, 180.0);
        assert_close(layout[2].end_angle(), 270.0);
        assert_close(layout[2].mid_angle, 225.0);
        assert_close(layout[0].label_rotation(), 135.0);
        for segment in &layout {
            assert_eq!(segment_index_at(segment.mid_angle, count(4)), segment.index);
        }
    }

    #[test]
    fn serialized_segment_carries_midpoint() {
        let json = serde_json::to_value(Segment::new(0, count(4))).unwrap();
        assert_eq!(json["mid_angle"], 45.0);
        assert_eq!(json["span"], 90.0);
    }

    #[test]
    fn label_screen_position_follows_rotation() {
        let segment = Segment::new(1, count(4));
        assert_close(segment.screen_mid_angle(0.0), 135.0);
        assert_close(segment.screen_mid_angle(1900.0), 235.0);
    }

    #[test]
    fn screen_point_uses_top_as_zero() {
        let (x, y) = screen_point((10.0, 10.0), 5.0, 0.0);
        assert_close(x, 10.0);
        assert_close(y, 15.0);
        let (x, y) = screen_point((10.0, 10.0), 5.0, 90.0);
        assert_close(x, 15.0);
        assert_close(y, 10.0);
    }
}
