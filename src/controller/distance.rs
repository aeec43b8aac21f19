//! Magnitude helpers for mouse emulation.
//!
//! All helpers work on one snapshot of a stick ([`StickGeometry`]) and return a
//! normalized magnitude in 0.0..=1.0 unless noted otherwise.
//!
//! # Deadzone shapes
//!
//! - **Radial**: one circular deadzone around the center.
//! - **Cursor**: per-axis distance. The deadzone radius is projected onto the
//!   current bearing (sin for X, cos for Y) so the deadzone stays circular.
//! - **Spring**: like cursor, but the axis value is first stretched towards the
//!   edge of the square spanned by the axes. Diagonals reach full deflection
//!   which fills a rectangular spring region.

use crate::controller::axis::AXIS_MAX;
use crate::controller::zones::bearing;

/// Spring mode stretches the direction vector by this factor before capping it
const SPRING_STRETCH: f64 = 1.25;

/// Raw axis values plus the zone settings of a stick at one instant
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StickGeometry {
    pub x: i32,
    pub y: i32,
    pub dead_zone: i32,
    pub max_zone: i32,
}

impl StickGeometry {
    pub fn new(x: i32, y: i32, dead_zone: i32, max_zone: i32) -> Self {
        Self {
            x,
            y,
            dead_zone,
            max_zone,
        }
    }

    /// x² + y² without overflow
    pub fn square_distance(&self) -> i64 {
        let x = self.x as i64;
        let y = self.y as i64;
        x * x + y * y
    }

    /// Circular deadzone test, boundary counts as inside
    pub fn in_dead_zone(&self) -> bool {
        let dead = self.dead_zone as i64;
        self.square_distance() <= dead * dead
    }

    /// Unrounded bearing in [0, 360)
    pub fn bearing(&self) -> f64 {
        bearing(self.x, self.y, self.max_zone)
    }

    /// `(|v| - dead) / (max - dead)`
    pub fn radial_distance(&self) -> f64 {
        let magnitude = (self.square_distance() as f64).sqrt();
        normalize(magnitude, self.dead_zone, self.max_zone)
    }

    /// Horizontal distance for cursor mode
    pub fn x_distance(&self) -> f64 {
        normalize(self.x.abs() as f64, self.dead_x(), self.max_zone)
    }

    /// Vertical distance for cursor mode
    pub fn y_distance(&self) -> f64 {
        normalize(self.y.abs() as f64, self.dead_y(), self.max_zone)
    }

    /// Horizontal distance for spring mode
    pub fn spring_x_distance(&self) -> f64 {
        normalize(self.square_axis(self.x), self.dead_x(), self.max_zone)
    }

    /// Vertical distance for spring mode
    pub fn spring_y_distance(&self) -> f64 {
        normalize(self.square_axis(self.y), self.dead_y(), self.max_zone)
    }

    /// Distance for a discrete diagonal target.
    ///
    /// Radial distance weighted by how close the bearing is to the 45° line of
    /// its quadrant: full weight on the diagonal, zero on the cardinal axes.
    pub fn diagonal_distance(&self) -> f64 {
        let relative = (self.bearing().round() as i32) % 90;
        let angle = if relative > 45 { 90 - relative } else { relative };
        self.radial_distance() * (angle as f64 / 45.0)
    }

    /// Euclidean norm clamped to [0, max_zone]
    pub fn absolute_distance(&self) -> f64 {
        let magnitude = (self.square_distance() as f64).sqrt();
        magnitude.clamp(0.0, self.max_zone.max(0) as f64)
    }

    /// Euclidean norm divided by max_zone, clamped to [0, 1]
    pub fn normalized_absolute_distance(&self) -> f64 {
        let magnitude = (self.square_distance() as f64).sqrt();
        (magnitude / self.max_zone.max(1) as f64).clamp(0.0, 1.0)
    }

    // Bearing folded into [0, 180]; sin/cos projections only need one half circle
    fn relative_angle(&self) -> f64 {
        let angle = self.bearing();
        if angle > 180.0 {
            angle - 180.0
        } else {
            angle
        }
    }

    fn dead_x(&self) -> i32 {
        (self.dead_zone as f64 * self.relative_angle().to_radians().sin()).round() as i32
    }

    fn dead_y(&self) -> i32 {
        (self.dead_zone as f64 * self.relative_angle().to_radians().cos())
            .round()
            .abs() as i32
    }

    fn square_axis(&self, axis: i32) -> f64 {
        let direction_length =
            ((self.square_distance() as f64).sqrt() * SPRING_STRETCH).min(AXIS_MAX as f64);
        let scale = self.x.abs().max(self.y.abs()).max(1) as f64;
        axis.abs() as f64 * direction_length / scale
    }
}

fn normalize(value: f64, dead: i32, max: i32) -> f64 {
    let span = (max - dead).max(1) as f64;
    ((value - dead as f64) / span).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::axis::AXIS_MAX_ZONE;
    use proptest::prelude::*;

    fn geometry(x: i32, y: i32) -> StickGeometry {
        StickGeometry::new(x, y, 8000, AXIS_MAX_ZONE)
    }

    #[test]
    fn test_radial_distance_right() {
        let g = geometry(30000, 0);
        let expected = (30000.0 - 8000.0) / (32767.0 - 8000.0);
        assert!((g.radial_distance() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_centered_is_zero() {
        let g = geometry(0, 0);
        assert!(g.in_dead_zone());
        assert_eq!(g.radial_distance(), 0.0);
        assert_eq!(g.x_distance(), 0.0);
        assert_eq!(g.y_distance(), 0.0);
        assert_eq!(g.absolute_distance(), 0.0);
    }

    #[test]
    fn test_dead_zone_boundary_is_inside() {
        assert!(geometry(8000, 0).in_dead_zone());
        assert!(!geometry(8001, 0).in_dead_zone());
        assert!(!geometry(-5700, -5700).in_dead_zone());
    }

    #[test]
    fn test_cursor_axes_follow_bearing() {
        // Pure right: X gets the whole deadzone, Y none
        let g = geometry(20000, 0);
        assert!((g.x_distance() - (12000.0 / 24767.0)).abs() < 1e-9);
        assert_eq!(g.y_distance(), 0.0);

        // Pure up: mirrored
        let g = geometry(0, -20000);
        assert!((g.y_distance() - (12000.0 / 24767.0)).abs() < 1e-9);
        assert_eq!(g.x_distance(), 0.0);
    }

    #[test]
    fn test_spring_fills_square() {
        let g = geometry(30000, 0);
        assert_eq!(g.spring_x_distance(), 1.0);
        assert_eq!(g.spring_y_distance(), 0.0);

        // A diagonal that only reaches ~0.8 radially saturates both spring axes
        let g = geometry(20000, -20000);
        assert_eq!(g.spring_x_distance(), 1.0);
        assert_eq!(g.spring_y_distance(), 1.0);
        assert!(g.x_distance() < 1.0);
    }

    #[test]
    fn test_diagonal_distance_peaks_on_diagonal() {
        let g = geometry(20000, -20000);
        assert!((g.diagonal_distance() - g.radial_distance()).abs() < 1e-9);

        let g = geometry(30000, 0);
        assert_eq!(g.diagonal_distance(), 0.0);
    }

    #[test]
    fn test_absolute_distances() {
        let g = geometry(32767, 32767);
        assert_eq!(g.absolute_distance(), 32767.0);
        assert_eq!(g.normalized_absolute_distance(), 1.0);

        let g = geometry(3000, 4000);
        assert_eq!(g.absolute_distance(), 5000.0);
        assert!((g.normalized_absolute_distance() - 5000.0 / 32767.0).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn prop_helpers_stay_normalized(
            x in -32767i32..=32767,
            y in -32767i32..=32767,
            dead in 0i32..20000,
        ) {
            let g = StickGeometry::new(x, y, dead, AXIS_MAX_ZONE);
            for value in [
                g.radial_distance(),
                g.x_distance(),
                g.y_distance(),
                g.spring_x_distance(),
                g.spring_y_distance(),
                g.diagonal_distance(),
                g.normalized_absolute_distance(),
            ] {
                prop_assert!((0.0..=1.0).contains(&value));
            }
        }

        #[test]
        fn prop_dead_zone_means_no_radial_distance(
            x in -8000i32..=8000,
            y in -8000i32..=8000,
        ) {
            let g = geometry(x, y);
            prop_assume!(g.in_dead_zone());
            prop_assert_eq!(g.radial_distance(), 0.0);
        }
    }
}
