//! Robot pose and bounded trail history.

use std::collections::VecDeque;

use crate::geometry::{Point, SURFACE_SIZE};

/// Maximum number of trail points retained; oldest are evicted first.
pub const TRAIL_CAP: usize = 500;

/// Fixed starting pose — the center of the drawing surface.
pub const ORIGIN: Point = Point {
    x: SURFACE_SIZE / 2.0,
    y: SURFACE_SIZE / 2.0,
};

/// Owns the robot position and a bounded history of past positions.
///
/// The position advances once per accepted telemetry frame, not on a timer,
/// so the trail's density reflects how fast telemetry actually arrives.
/// "Forward" is constant-direction motion toward the top of the surface;
/// heading is not integrated — this mirrors the robot's own simulated
/// odometry and is a display aid, not a pose estimate.
#[derive(Debug, Clone)]
pub struct TrailTracker {
    pose: Point,
    trail: VecDeque<Point>,
}

impl TrailTracker {
    pub fn new() -> Self {
        Self {
            pose: ORIGIN,
            trail: VecDeque::new(),
        }
    }

    /// Move one tick forward along the fixed vertical axis and record the
    /// new pose, evicting the oldest trail point past [`TRAIL_CAP`].
    pub fn advance(&mut self, speed: f64) {
        self.pose.y -= speed;
        self.trail.push_back(self.pose);
        while self.trail.len() > TRAIL_CAP {
            self.trail.pop_front();
        }
    }

    /// Restore the pose to the origin and clear the trail.
    pub fn reset(&mut self) {
        self.pose = ORIGIN;
        self.trail.clear();
    }

    pub fn pose(&self) -> Point {
        self.pose
    }

    /// Past positions, oldest first, for line-strip rendering.
    pub fn trail(&self) -> impl Iterator<Item = Point> + '_ {
        self.trail.iter().copied()
    }

    pub fn trail_len(&self) -> usize {
        self.trail.len()
    }
}

impl Default for TrailTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_origin_with_empty_trail() {
        let tracker = TrailTracker::new();
        assert_eq!(tracker.pose(), ORIGIN);
        assert_eq!(tracker.trail_len(), 0);
    }

    #[test]
    fn advance_moves_up_and_records() {
        let mut tracker = TrailTracker::new();
        tracker.advance(2.0);
        assert_eq!(tracker.pose(), Point::new(ORIGIN.x, ORIGIN.y - 2.0));
        tracker.advance(2.0);
        assert_eq!(tracker.pose(), Point::new(ORIGIN.x, ORIGIN.y - 4.0));
        assert_eq!(tracker.trail_len(), 2);
    }

    #[test]
    fn zero_speed_still_records_a_point() {
        // A tick at speed 0 leaves the pose in place but marks the tick.
        let mut tracker = TrailTracker::new();
        tracker.advance(0.0);
        assert_eq!(tracker.pose(), ORIGIN);
        assert_eq!(tracker.trail_len(), 1);
    }

    #[test]
    fn trail_is_chronological_and_matches_poses() {
        let mut tracker = TrailTracker::new();
        for _ in 0..5 {
            tracker.advance(1.0);
        }
        let ys: Vec<f64> = tracker.trail().map(|p| p.y).collect();
        let expected: Vec<f64> = (1..=5).map(|i| ORIGIN.y - i as f64).collect();
        assert_eq!(ys, expected);
    }

    #[test]
    fn trail_caps_at_limit_evicting_oldest() {
        let mut tracker = TrailTracker::new();
        let n = TRAIL_CAP + 37;
        for _ in 0..n {
            tracker.advance(1.0);
        }
        assert_eq!(tracker.trail_len(), TRAIL_CAP);

        // Remaining points are the most recent TRAIL_CAP ticks, oldest first.
        let first = tracker.trail().next().unwrap();
        let expected_first_tick = (n - TRAIL_CAP + 1) as f64;
        assert_eq!(first.y, ORIGIN.y - expected_first_tick);

        let last = tracker.trail().last().unwrap();
        assert_eq!(last, tracker.pose());
    }

    #[test]
    fn trail_length_is_min_of_ticks_and_cap() {
        for n in [1usize, 7, TRAIL_CAP, TRAIL_CAP + 1, TRAIL_CAP * 2] {
            let mut tracker = TrailTracker::new();
            for _ in 0..n {
                tracker.advance(1.0);
            }
            assert_eq!(tracker.trail_len(), n.min(TRAIL_CAP), "after {n} ticks");
        }
    }

    #[test]
    fn reset_is_idempotent() {
        let mut tracker = TrailTracker::new();
        for _ in 0..10 {
            tracker.advance(3.0);
        }
        for _ in 0..3 {
            tracker.reset();
            assert_eq!(tracker.pose(), ORIGIN);
            assert_eq!(tracker.trail_len(), 0);
        }
    }
}
