//! Outbound command protocol.

use serde_json::{Value, json};

/// A control message for the robot.
///
/// Commands are fire-and-forget with at-most-once delivery: the link drops
/// them silently while disconnected, and the robot sends no acknowledgment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Resume mapping sweeps on the robot.
    Start,
    /// Pause mapping sweeps; the connection stays up.
    Stop,
    /// Clear the robot's onboard map and pose.
    Reset,
    /// Set the movement speed, 0..=5 in integer steps.
    Speed(f64),
}

impl Command {
    /// Wire encoding. Mode commands use the `{"cmd": ...}` shape, speed uses
    /// its own `{"speed": ...}` shape; exactly one shape per message.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Start => json!({"cmd": "start"}),
            Self::Stop => json!({"cmd": "stop"}),
            Self::Reset => json!({"cmd": "reset"}),
            Self::Speed(v) => json!({"speed": v}),
        }
    }
}
