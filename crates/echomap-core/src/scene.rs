//! Frame scene construction — world state to an ordered draw list.
//!
//! The scene is a retained-mode list of primitives in paint order: grid,
//! trail, robot marker, echo rays. Keeping it as data means the core never
//! touches a drawing backend and the render contract is testable; the CLI
//! maps shapes onto the terminal canvas. Every frame is a full redraw.

use crate::geometry::{Bearing, Point, SURFACE_SIZE, project_ray};
use crate::pose::TrailTracker;
use crate::telemetry::TelemetryFrame;

/// Grid cell size on the drawing surface. Cosmetic, not data-dependent.
pub const GRID_SPACING: f64 = 30.0;

/// One drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Full-length grid rule at `offset`, vertical or horizontal.
    GridLine { vertical: bool, offset: f64 },
    /// Connected polyline through past poses, oldest first.
    Trail(Vec<Point>),
    /// Filled marker at the robot pose.
    Robot(Point),
    /// Ray from the robot to a detected obstacle.
    Echo { from: Point, to: Point },
    /// Filled marker at a detected obstacle.
    Obstacle(Point),
}

/// Build the full redraw for one frame.
///
/// Paint order: background grid, trail polyline (when visible and at least
/// two points long), robot marker, then per-bearing echo ray plus obstacle
/// marker. Bearings whose reading is the no-echo sentinel draw nothing.
/// `frame` is `None` before the first telemetry arrives.
pub fn build_scene(
    tracker: &TrailTracker,
    show_trail: bool,
    frame: Option<&TelemetryFrame>,
) -> Vec<Shape> {
    let mut shapes = Vec::new();

    let mut offset = 0.0;
    while offset < SURFACE_SIZE {
        shapes.push(Shape::GridLine {
            vertical: true,
            offset,
        });
        offset += GRID_SPACING;
    }
    let mut offset = 0.0;
    while offset < SURFACE_SIZE {
        shapes.push(Shape::GridLine {
            vertical: false,
            offset,
        });
        offset += GRID_SPACING;
    }

    if show_trail {
        let points: Vec<Point> = tracker.trail().collect();
        if points.len() >= 2 {
            shapes.push(Shape::Trail(points));
        }
    }

    let pose = tracker.pose();
    shapes.push(Shape::Robot(pose));

    if let Some(frame) = frame {
        for bearing in Bearing::ALL {
            if let Some(end) = project_ray(pose, frame.reading(bearing), bearing) {
                shapes.push(Shape::Echo { from: pose, to: end });
                shapes.push(Shape::Obstacle(end));
            }
        }
    }

    shapes
}
