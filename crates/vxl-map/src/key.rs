//! Packed 32-bit block positions.
//!
//! Keys use the layout `0xYYYXXXZZ`: 12 bits of y, 12 bits of x and 8 bits
//! of z. Ordering keys orders blocks by column first and depth second, and
//! masking off the low byte yields a column identity.

/// Largest x/y extent a key can address.
pub const MAX_EDGE: u32 = 1 << 12;

/// Largest z extent a key can address.
pub const MAX_KEY_DEPTH: u32 = 1 << 8;

const COLUMN_MASK: u32 = 0xFFFF_FF00;

/// A block position packed into a single `u32`.
///
/// No range checks happen here: x and y must be below 4096 and z below 256,
/// otherwise neighbouring fields are corrupted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockKey(pub u32);

impl BlockKey {
    /// Packs `(x, y, z)` into a key.
    #[inline]
    pub const fn new(x: u32, y: u32, z: u32) -> Self {
        Self((y << 20) | (x << 8) | z)
    }

    /// The key with its z field cleared, identifying the whole column.
    #[inline]
    pub const fn column(self) -> Self {
        Self(self.0 & COLUMN_MASK)
    }

    /// Returns `true` if both keys lie in the same `(x, y)` column.
    #[inline]
    pub const fn same_column(self, other: Self) -> bool {
        self.0 & COLUMN_MASK == other.0 & COLUMN_MASK
    }

    #[inline]
    pub const fn x(self) -> u32 {
        (self.0 >> 8) & 0xFFF
    }

    #[inline]
    pub const fn y(self) -> u32 {
        (self.0 >> 20) & 0xFFF
    }

    #[inline]
    pub const fn z(self) -> u32 {
        self.0 & 0xFF
    }
}
