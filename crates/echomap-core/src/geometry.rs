//! Sensor-ray geometry — polar readings to world-space endpoints.
//!
//! Coordinates are canvas units on a fixed square surface: origin at the
//! top-left, x grows right, y grows down. Bearings are measured clockwise
//! with 0° pointing "up" (away from the viewer), so the conversion rotates
//! by −90° before the usual polar-to-cartesian step.

/// Side length of the square drawing surface, in world units.
pub const SURFACE_SIZE: f64 = 600.0;

/// A position on the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Sensor mounting direction relative to the robot body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bearing {
    Front,
    Right,
    Back,
    Left,
}

impl Bearing {
    /// All four bearings in protocol order (front, right, back, left).
    pub const ALL: [Bearing; 4] = [Self::Front, Self::Right, Self::Back, Self::Left];

    /// Clockwise bearing angle in degrees, 0° = front.
    pub fn degrees(self) -> f64 {
        match self {
            Self::Front => 0.0,
            Self::Right => 90.0,
            Self::Back => 180.0,
            Self::Left => 270.0,
        }
    }
}

impl std::fmt::Display for Bearing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Front => write!(f, "front"),
            Self::Right => write!(f, "right"),
            Self::Back => write!(f, "back"),
            Self::Left => write!(f, "left"),
        }
    }
}

/// Project a sensor reading into a world-space ray endpoint.
///
/// Returns `None` when `distance` is negative — the sensor's "no echo"
/// sentinel — which means "draw nothing for this bearing" rather than an
/// error. Otherwise the endpoint lies exactly `distance` units from `pose`
/// along the bearing, with 0° pointing up on screen.
pub fn project_ray(pose: Point, distance: f64, bearing: Bearing) -> Option<Point> {
    if distance < 0.0 {
        return None;
    }
    let angle = (bearing.degrees() - 90.0).to_radians();
    Some(Point {
        x: pose.x + distance * angle.cos(),
        y: pose.y + distance * angle.sin(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn endpoint_lies_at_requested_distance() {
        let pose = Point::new(300.0, 300.0);
        for bearing in Bearing::ALL {
            for d in [0.0, 1.0, 42.5, 400.0] {
                let end = project_ray(pose, d, bearing).unwrap();
                assert!(
                    (pose.distance_to(end) - d).abs() < EPS,
                    "{bearing} at {d} landed at wrong distance"
                );
            }
        }
    }

    #[test]
    fn endpoint_angle_is_bearing_minus_ninety() {
        let pose = Point::new(100.0, 200.0);
        for bearing in Bearing::ALL {
            let end = project_ray(pose, 50.0, bearing).unwrap();
            let angle = (end.y - pose.y).atan2(end.x - pose.x).to_degrees();
            let expected = bearing.degrees() - 90.0;
            // atan2 returns (-180, 180]; normalize both before comparing.
            let diff = (angle - expected).rem_euclid(360.0);
            assert!(
                diff < EPS || (360.0 - diff) < EPS,
                "{bearing}: got {angle}, expected {expected}"
            );
        }
    }

    #[test]
    fn front_points_up_on_screen() {
        // y grows downward, so "up" means decreasing y.
        let pose = Point::new(300.0, 300.0);
        let end = project_ray(pose, 50.0, Bearing::Front).unwrap();
        assert!((end.x - 300.0).abs() < EPS);
        assert!((end.y - 250.0).abs() < EPS);
    }

    #[test]
    fn right_points_along_positive_x() {
        let pose = Point::new(300.0, 300.0);
        let end = project_ray(pose, 50.0, Bearing::Right).unwrap();
        assert!((end.x - 350.0).abs() < EPS);
        assert!((end.y - 300.0).abs() < EPS);
    }

    #[test]
    fn negative_distance_is_no_echo() {
        let pose = Point::new(300.0, 300.0);
        for bearing in Bearing::ALL {
            assert_eq!(project_ray(pose, -1.0, bearing), None);
            assert_eq!(project_ray(pose, -0.001, bearing), None);
            assert_eq!(project_ray(pose, f64::NEG_INFINITY, bearing), None);
        }
    }

    #[test]
    fn zero_distance_is_a_valid_echo_at_the_pose() {
        let pose = Point::new(10.0, 20.0);
        assert_eq!(project_ray(pose, 0.0, Bearing::Back), Some(pose));
    }

    #[test]
    fn bearings_cover_protocol_order() {
        let degrees: Vec<f64> = Bearing::ALL.iter().map(|b| b.degrees()).collect();
        assert_eq!(degrees, vec![0.0, 90.0, 180.0, 270.0]);
    }
}
