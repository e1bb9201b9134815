//! One-bit-per-voxel solidity bitmap packed into a `Vec<u64>`.
//!
//! The bitmap answers "is this voxel solid?" independently of color storage.
//! Voxels are linearised column by column, so every column occupies a
//! contiguous run of `depth` bits: index = `(x * height + y) * depth + z`.

use std::ops::Range;

/// A packed solid/air bitmap covering a whole map volume.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolidityBitmap {
    /// Raw storage, 64 voxels per word.
    words: Vec<u64>,
    height: usize,
    depth: usize,
    /// Total number of voxels.
    len: usize,
}

impl SolidityBitmap {
    /// Creates an all-air bitmap for a `width × height × depth` volume.
    pub fn new(width: usize, height: usize, depth: usize) -> Self {
        let len = width * height * depth;
        Self {
            words: vec![0u64; len.div_ceil(64)],
            height,
            depth,
            len,
        }
    }

    #[inline]
    fn index(&self, x: usize, y: usize, z: usize) -> usize {
        (x * self.height + y) * self.depth + z
    }

    /// Returns `true` if the voxel is solid.
    ///
    /// Coordinates must be in range; the caller performs bounds checks.
    #[inline]
    pub fn test(&self, x: usize, y: usize, z: usize) -> bool {
        let index = self.index(x, y, z);
        debug_assert!(index < self.len, "bitmap index out of bounds");
        (self.words[index / 64] >> (index % 64)) & 1 != 0
    }

    /// Marks the voxel as solid.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize) {
        let index = self.index(x, y, z);
        debug_assert!(index < self.len, "bitmap index out of bounds");
        self.words[index / 64] |= 1u64 << (index % 64);
    }

    /// Marks the voxel as air.
    #[inline]
    pub fn clear(&mut self, x: usize, y: usize, z: usize) {
        let index = self.index(x, y, z);
        debug_assert!(index < self.len, "bitmap index out of bounds");
        self.words[index / 64] &= !(1u64 << (index % 64));
    }

    /// Marks every voxel of column `(x, y)` within `depths` as solid.
    pub fn fill_column(&mut self, x: usize, y: usize, depths: Range<usize>) {
        for z in depths {
            self.set(x, y, z);
        }
    }

    /// Number of solid voxels in the whole volume.
    pub fn count_solid(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Total number of voxels covered.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the bitmap covers no voxels.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Size of the backing storage in bytes.
    pub fn storage_bytes(&self) -> usize {
        self.words.len() * 8
    }
}
