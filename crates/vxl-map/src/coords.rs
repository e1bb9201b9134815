//! Conversion between caller coordinate conventions and map coordinates.

use serde::{Deserialize, Serialize};

/// Axis convention used by a caller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoordSystem {
    /// Native map coordinates: z points down, water level at `z = depth - 1`.
    #[default]
    Voxlap,
    /// y points up with `y = 0` at water level; z is the second horizontal
    /// axis.
    YUp,
}

impl CoordSystem {
    /// Converts a position in this convention to native map coordinates.
    pub fn to_map(self, x: i32, y: i32, z: i32, depth: u32) -> (i32, i32, i32) {
        match self {
            Self::Voxlap => (x, y, z),
            Self::YUp => (x, z, depth as i32 - 1 - y),
        }
    }

    /// Converts native map coordinates to this convention.
    pub fn from_map(self, x: i32, y: i32, z: i32, depth: u32) -> (i32, i32, i32) {
        match self {
            Self::Voxlap => (x, y, z),
            Self::YUp => (x, depth as i32 - 1 - z, y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_water_level_is_y_zero() {
        assert_eq!(CoordSystem::YUp.to_map(5, 0, 9, 64), (5, 9, 63));
        assert_eq!(CoordSystem::YUp.to_map(5, 63, 9, 64), (5, 9, 0));
    }

    #[test]
    fn test_conversions_invert() {
        for system in [CoordSystem::Voxlap, CoordSystem::YUp] {
            let (x, y, z) = system.to_map(12, 30, 7, 64);
            assert_eq!(system.from_map(x, y, z, 64), (12, 30, 7));
        }
    }
}
