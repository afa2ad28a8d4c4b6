//! Control state and command dispatch.
//!
//! [`MapSession`] owns the tracker and the user-adjustable control state.
//! Each user intent maps to one operation: a local state change plus, for
//! most intents, an outbound [`Command`] the caller hands to the link.
//! Inbound telemetry passes through the mapping gate here — frames received
//! while mapping is stopped touch nothing.

use crate::command::Command;
use crate::pose::TrailTracker;
use crate::telemetry::TelemetryFrame;

/// Speed slider bounds; the reference controller steps in integers.
pub const SPEED_MIN: f64 = 0.0;
pub const SPEED_MAX: f64 = 5.0;

/// User-adjustable control state, read by the tracker tick and the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlState {
    /// Gate for inbound telemetry: when false, frames are ignored entirely.
    pub mapping_active: bool,
    /// Whether the trail polyline is drawn.
    pub show_trail: bool,
    /// Per-tick displacement, 0..=5.
    pub speed: f64,
}

impl Default for ControlState {
    fn default() -> Self {
        Self {
            mapping_active: true,
            show_trail: true,
            speed: 1.0,
        }
    }
}

/// The dashboard's world state: tracker + control surface.
#[derive(Debug, Clone, Default)]
pub struct MapSession {
    tracker: TrailTracker,
    control: ControlState,
}

impl MapSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a specific initial speed (clamped to 0..=5).
    pub fn with_speed(speed: f64) -> Self {
        let mut session = Self::default();
        session.control.speed = speed.clamp(SPEED_MIN, SPEED_MAX);
        session
    }

    /// Process one inbound telemetry frame.
    ///
    /// When mapping is active, advances the pose by the current speed and
    /// records the trail point; the frame itself drives the tick, it does
    /// not steer. Returns false when the gate is closed and nothing changed.
    pub fn handle_frame(&mut self, _frame: &TelemetryFrame) -> bool {
        if !self.control.mapping_active {
            return false;
        }
        self.tracker.advance(self.control.speed);
        true
    }

    /// Resume mapping. Stop/start only toggles the gate; the trail and pose
    /// accumulated so far are untouched.
    pub fn start(&mut self) -> Command {
        self.control.mapping_active = true;
        Command::Start
    }

    /// Pause mapping. Does not close the connection or clear the trail.
    pub fn stop(&mut self) -> Command {
        self.control.mapping_active = false;
        Command::Stop
    }

    /// Clear the local map and notify the robot. Purely local plus notify —
    /// no acknowledgment is awaited.
    pub fn reset(&mut self) -> Command {
        self.tracker.reset();
        Command::Reset
    }

    /// Set the movement speed, clamped to 0..=5.
    pub fn set_speed(&mut self, speed: f64) -> Command {
        self.control.speed = speed.clamp(SPEED_MIN, SPEED_MAX);
        Command::Speed(self.control.speed)
    }

    /// Nudge the speed by `delta` (the dashboard's ↑/↓ keys).
    pub fn step_speed(&mut self, delta: f64) -> Command {
        self.set_speed(self.control.speed + delta)
    }

    /// Trail visibility is local-only; no command goes out.
    pub fn set_trail_visible(&mut self, on: bool) {
        self.control.show_trail = on;
    }

    pub fn toggle_trail(&mut self) {
        self.control.show_trail = !self.control.show_trail;
    }

    pub fn tracker(&self) -> &TrailTracker {
        &self.tracker
    }

    pub fn control(&self) -> ControlState {
        self.control
    }
}
