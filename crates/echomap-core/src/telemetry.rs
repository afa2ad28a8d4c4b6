//! Inbound telemetry protocol.

use serde::Deserialize;

use crate::geometry::Bearing;

/// One inbound sensor-readings message from the robot.
///
/// Each field is a distance in the sensor's native unit (centimeters on the
/// reference hardware). A negative value means "no valid reading for that
/// sensor this frame" — the ultrasonic sensor timed out or the echo was out
/// of range. All four fields are required on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TelemetryFrame {
    pub front: f64,
    pub right: f64,
    pub back: f64,
    pub left: f64,
}

impl TelemetryFrame {
    /// Reading for a given bearing.
    pub fn reading(&self, bearing: Bearing) -> f64 {
        match bearing {
            Bearing::Front => self.front,
            Bearing::Right => self.right,
            Bearing::Back => self.back,
            Bearing::Left => self.left,
        }
    }
}
