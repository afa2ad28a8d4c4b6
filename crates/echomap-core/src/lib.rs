//! # echomap-core
//!
//! **The world model behind the echomap dashboard.**
//!
//! `echomap-core` turns a live stream of ultrasonic distance readings into a
//! continuously updated 2D picture: the robot's estimated position, a bounded
//! trail of where it has been, and the four echo rays around it. It also owns
//! the control surface (start/stop/reset/speed/trail) and the connection
//! lifecycle state machine the WebSocket driver feeds.
//!
//! ## Quick start
//!
//! ```
//! use echomap_core::{MapSession, TelemetryFrame, build_scene};
//!
//! let mut session = MapSession::new();
//!
//! // One inbound sensor-readings message advances the world by one tick.
//! let frame = TelemetryFrame { front: 50.0, right: -1.0, back: 30.0, left: 100.0 };
//! session.handle_frame(&frame);
//!
//! // Full redraw: grid, trail, robot marker, echo rays — in paint order.
//! let shapes = build_scene(
//!     session.tracker(),
//!     session.control().show_trail,
//!     Some(&frame),
//! );
//! assert!(!shapes.is_empty());
//! ```
//!
//! ## Architecture
//!
//! Telemetry frame → mapping gate → tracker advance → ray projection → scene
//!
//! The position advances once per accepted telemetry frame rather than on a
//! timer, so the trail's visual density reflects actual telemetry throughput.
//! That coupling is deliberate: this is a display aid, not corrected odometry.
//!
//! Everything here is synchronous and allocation-light. The async WebSocket
//! driver lives in `echomap-link`; terminal drawing lives in the CLI.

pub mod command;
pub mod geometry;
pub mod link;
pub mod pose;
pub mod scene;
pub mod session;
pub mod telemetry;

pub use command::Command;
pub use geometry::{Bearing, Point, SURFACE_SIZE, project_ray};
pub use link::{LinkState, LinkStateMachine};
pub use pose::{ORIGIN, TRAIL_CAP, TrailTracker};
pub use scene::{GRID_SPACING, Shape, build_scene};
pub use session::{ControlState, MapSession, SPEED_MAX, SPEED_MIN};
pub use telemetry::TelemetryFrame;

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
