//! Bearing computation and diagonal zone partitioning
//!
//! The circle around the stick is split into eight sectors. Cardinal sectors
//! share whatever is left after the four diagonal sectors (`diagonal_range`
//! degrees each) have been carved out. The Up sector straddles 0° and is split
//! into two halves around it.
//!
//! ```text
//!              Up
//!       LeftUp  |  RightUp
//!   Left -------+------- Right
//!     LeftDown  |  RightDown
//!             Down
//! ```

use crate::controller::direction::StickDirection;

pub const MIN_DIAGONAL_RANGE: i32 = 1;
pub const MAX_DIAGONAL_RANGE: i32 = 89;
pub const DEFAULT_DIAGONAL_RANGE: i32 = 45;

/// Stick bearing in degrees: 0° is Up, angles grow clockwise, result in [0, 360).
///
/// `y` grows downwards like raw joystick axes do. A centered stick has bearing 0.
pub fn bearing(x: i32, y: i32, max_zone: i32) -> f64 {
    if x == 0 && y == 0 {
        return 0.0;
    }

    let max_zone = max_zone.max(1) as f64;
    let angle = (x as f64 / max_zone).atan2(-(y as f64) / max_zone).to_degrees();

    // atan2 gives (-180, 180]; the left half comes back negative
    let angle = if angle < 0.0 { angle + 360.0 } else { angle };
    if angle >= 360.0 {
        0.0
    } else {
        angle
    }
}

/// Sector boundaries derived from a diagonal range.
///
/// All bounds are whole degrees. Classification works on a rounded bearing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiagonalZones {
    pub diagonal: i32,
    pub cardinal: i32,
    pub initial_left: i32,
    pub initial_right: i32,
    pub up_right: i32,
    pub right: i32,
    pub down_right: i32,
    pub down: i32,
    pub down_left: i32,
    pub left: i32,
    pub up_left: i32,
}

impl DiagonalZones {
    pub fn new(diagonal_range: i32) -> Self {
        let diagonal = diagonal_range.clamp(MIN_DIAGONAL_RANGE, MAX_DIAGONAL_RANGE);
        let cardinal = (360 - diagonal * 4) / 4;

        let remainder = cardinal - 1;
        let (initial_left, initial_right) = if remainder % 2 != 0 {
            (360 - cardinal / 2, cardinal / 2 - 1)
        } else {
            (360 - remainder / 2, remainder / 2)
        };

        let up_right = initial_right + 1;
        let right = up_right + diagonal;
        let down_right = right + cardinal;
        let down = down_right + diagonal;
        let down_left = down + cardinal;
        let left = down_left + diagonal;
        let up_left = left + cardinal;

        Self {
            diagonal,
            cardinal,
            initial_left,
            initial_right,
            up_right,
            right,
            down_right,
            down,
            down_left,
            left,
            up_left,
        }
    }

    /// Sector containing an already rounded bearing (0..=360)
    pub fn classify(&self, bearing: i32) -> StickDirection {
        if bearing <= self.initial_right || bearing >= self.initial_left {
            StickDirection::Up
        } else if bearing >= self.up_right && bearing < self.right {
            StickDirection::RightUp
        } else if bearing >= self.right && bearing < self.down_right {
            StickDirection::Right
        } else if bearing >= self.down_right && bearing < self.down {
            StickDirection::RightDown
        } else if bearing >= self.down && bearing < self.down_left {
            StickDirection::Down
        } else if bearing >= self.down_left && bearing < self.left {
            StickDirection::LeftDown
        } else if bearing >= self.left && bearing < self.up_left {
            StickDirection::Left
        } else {
            StickDirection::LeftUp
        }
    }

    /// Rounds a raw bearing (half away from zero) and classifies it
    pub fn classify_bearing(&self, bearing: f64) -> StickDirection {
        self.classify(bearing.round() as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::axis::AXIS_MAX;
    use proptest::prelude::*;

    fn sector_widths(zones: &DiagonalZones) -> [(StickDirection, u32); 8] {
        let mut widths = [
            (StickDirection::Up, 0),
            (StickDirection::RightUp, 0),
            (StickDirection::Right, 0),
            (StickDirection::RightDown, 0),
            (StickDirection::Down, 0),
            (StickDirection::LeftDown, 0),
            (StickDirection::Left, 0),
            (StickDirection::LeftUp, 0),
        ];
        for degree in 0..360 {
            let sector = zones.classify(degree);
            if let Some(entry) = widths.iter_mut().find(|(d, _)| *d == sector) {
                entry.1 += 1;
            }
        }
        widths
    }

    #[test]
    fn test_bearing_cardinals() {
        assert_eq!(bearing(0, -AXIS_MAX, AXIS_MAX), 0.0);
        assert!((bearing(AXIS_MAX, 0, AXIS_MAX) - 90.0).abs() < 1e-9);
        assert!((bearing(0, AXIS_MAX, AXIS_MAX) - 180.0).abs() < 1e-9);
        assert!((bearing(-AXIS_MAX, 0, AXIS_MAX) - 270.0).abs() < 1e-9);
        assert_eq!(bearing(0, 0, AXIS_MAX), 0.0);
    }

    #[test]
    fn test_default_zone_table() {
        let zones = DiagonalZones::new(45);
        assert_eq!(zones.cardinal, 45);
        assert_eq!((zones.initial_left, zones.initial_right), (338, 22));
        assert_eq!(zones.up_right, 23);
        assert_eq!(zones.right, 68);
        assert_eq!(zones.down_right, 113);
        assert_eq!(zones.down, 158);
        assert_eq!(zones.down_left, 203);
        assert_eq!(zones.left, 248);
        assert_eq!(zones.up_left, 293);
    }

    #[test]
    fn test_odd_remainder_split() {
        // cardinal = 46, remainder 45 is odd
        let zones = DiagonalZones::new(44);
        assert_eq!(zones.cardinal, 46);
        assert_eq!((zones.initial_left, zones.initial_right), (337, 22));
        let widths = sector_widths(&zones);
        assert_eq!(widths[0], (StickDirection::Up, 46));
        assert_eq!(widths[1], (StickDirection::RightUp, 44));
    }

    #[test]
    fn test_extreme_ranges() {
        let narrow = DiagonalZones::new(1);
        assert_eq!(narrow.classify(45), StickDirection::RightUp);
        assert_eq!(narrow.classify(46), StickDirection::Right);

        let wide = DiagonalZones::new(89);
        assert_eq!(wide.classify(0), StickDirection::Up);
        assert_eq!(wide.classify(1), StickDirection::RightUp);
        assert_eq!(wide.classify(90), StickDirection::Right);
        assert_eq!(wide.classify(91), StickDirection::RightDown);
        assert_eq!(wide.classify(359), StickDirection::LeftUp);
    }

    #[test]
    fn test_rounded_bearing_of_360_is_up() {
        let zones = DiagonalZones::new(45);
        assert_eq!(zones.classify_bearing(359.7), StickDirection::Up);
        assert_eq!(zones.classify_bearing(22.5), StickDirection::RightUp);
        assert_eq!(zones.classify_bearing(22.4), StickDirection::Up);
    }

    proptest! {
        #[test]
        fn prop_sectors_cover_circle(range in 1i32..=89) {
            let zones = DiagonalZones::new(range);
            let widths = sector_widths(&zones);
            let total: u32 = widths.iter().map(|(_, w)| *w).sum();
            prop_assert_eq!(total, 360);
            for (direction, width) in widths {
                prop_assert!(width > 0, "{:?} is empty for range {}", direction, range);
            }
            for diagonal in [1, 3, 5, 7] {
                prop_assert_eq!(widths[diagonal].1 as i32, zones.diagonal);
            }
            for cardinal in [0, 2, 4, 6] {
                prop_assert_eq!(widths[cardinal].1 as i32, zones.cardinal);
            }
        }

        #[test]
        fn prop_sectors_are_contiguous(range in 1i32..=89) {
            let zones = DiagonalZones::new(range);
            // Walking clockwise, every sector change moves to the next sector
            let order = [
                StickDirection::Up,
                StickDirection::RightUp,
                StickDirection::Right,
                StickDirection::RightDown,
                StickDirection::Down,
                StickDirection::LeftDown,
                StickDirection::Left,
                StickDirection::LeftUp,
            ];
            let mut changes = 0;
            let mut previous = zones.classify(0);
            for degree in 1..=360 {
                let current = zones.classify(degree % 360);
                if current != previous {
                    let prev_pos = order.iter().position(|d| *d == previous).unwrap();
                    prop_assert_eq!(current, order[(prev_pos + 1) % 8]);
                    changes += 1;
                }
                previous = current;
            }
            prop_assert_eq!(changes, 8);
        }

        #[test]
        fn prop_bearing_in_range(x in -32767i32..=32767, y in -32767i32..=32767) {
            let b = bearing(x, y, AXIS_MAX);
            prop_assert!((0.0..360.0).contains(&b));
        }
    }
}
