//! Map dimensions and tile footprint.

use serde::{Deserialize, Serialize};

use crate::chunk::CHUNK_SIZE;
use crate::error::VxlError;
use crate::key::MAX_EDGE;

/// Largest supported depth.
///
/// Span headers store depths in a single byte and must be able to name the
/// one-past-the-bottom position of a column that ends in air.
pub const MAX_DEPTH: u32 = 255;

/// Dimensions of a map and the footprint of its storage tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    /// Voxel count along x.
    pub width: u32,
    /// Voxel count along y.
    pub height: u32,
    /// Voxel count along z, which points down from the sky.
    pub depth: u32,
    /// Edge length of a storage tile in columns.
    pub chunk_size: u32,
}

impl Layout {
    /// A layout with the default tile footprint.
    pub const fn new(width: u32, height: u32, depth: u32) -> Self {
        Self {
            width,
            height,
            depth,
            chunk_size: CHUNK_SIZE,
        }
    }

    /// The classic 512×512×64 map.
    pub const fn classic() -> Self {
        Self::new(512, 512, 64)
    }

    /// Replaces the tile footprint.
    pub const fn with_chunk_size(mut self, chunk_size: u32) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Checks that every dimension can be addressed by keys and span headers.
    pub fn validate(&self) -> Result<(), VxlError> {
        let edge_ok = |n: u32| (1..=MAX_EDGE).contains(&n);
        if edge_ok(self.width)
            && edge_ok(self.height)
            && (1..=MAX_DEPTH).contains(&self.depth)
            && self.chunk_size >= 1
        {
            Ok(())
        } else {
            Err(VxlError::InvalidLayout {
                width: self.width,
                height: self.height,
                depth: self.depth,
                chunk_size: self.chunk_size,
            })
        }
    }

    /// Number of tiles along x.
    pub fn chunks_x(&self) -> usize {
        self.width.div_ceil(self.chunk_size) as usize
    }

    /// Number of tiles along y.
    pub fn chunks_y(&self) -> usize {
        self.height.div_ceil(self.chunk_size) as usize
    }

    /// Number of columns, which is also the number of columns in the
    /// compressed format.
    pub fn columns(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns `true` if `(x, y, z)` lies inside the volume.
    #[inline]
    pub fn contains(&self, x: i32, y: i32, z: i32) -> bool {
        x >= 0
            && y >= 0
            && z >= 0
            && (x as u32) < self.width
            && (y as u32) < self.height
            && (z as u32) < self.depth
    }

    /// Column `(x, y)` for a position in the fixed column order (y outer,
    /// x inner).
    #[inline]
    pub fn column_at(&self, index: usize) -> (u32, u32) {
        let width = self.width as usize;
        ((index % width) as u32, (index / width) as u32)
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::classic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_is_valid() {
        let layout = Layout::classic();
        layout.validate().unwrap();
        assert_eq!(layout.chunks_x(), 32);
        assert_eq!(layout.chunks_y(), 32);
        assert_eq!(layout.columns(), 512 * 512);
    }

    #[test]
    fn test_partial_tiles_round_up() {
        let layout = Layout::new(33, 17, 8).with_chunk_size(16);
        assert_eq!(layout.chunks_x(), 3);
        assert_eq!(layout.chunks_y(), 2);
    }

    #[test]
    fn test_rejects_unaddressable_dimensions() {
        assert!(Layout::new(0, 512, 64).validate().is_err());
        assert!(Layout::new(4097, 512, 64).validate().is_err());
        assert!(Layout::new(512, 512, 256).validate().is_err());
        assert!(Layout::new(512, 512, 0).validate().is_err());
        assert!(Layout::new(512, 512, 64).with_chunk_size(0).validate().is_err());
        assert!(Layout::new(4096, 4096, 255).validate().is_ok());
    }

    #[test]
    fn test_contains() {
        let layout = Layout::new(4, 4, 4);
        assert!(layout.contains(0, 0, 0));
        assert!(layout.contains(3, 3, 3));
        assert!(!layout.contains(-1, 0, 0));
        assert!(!layout.contains(0, 4, 0));
        assert!(!layout.contains(0, 0, 4));
    }

    #[test]
    fn test_column_order_is_y_major() {
        let layout = Layout::new(3, 2, 1);
        let order: Vec<_> = (0..layout.columns()).map(|i| layout.column_at(i)).collect();
        assert_eq!(order, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
    }
}
