//! Per-tile storage of explicitly colored blocks.
//!
//! A map's footprint is split into square tiles of `chunk_size × chunk_size`
//! columns. Each tile keeps an unordered list of `(key, color)` records for
//! the solid voxels that carry an explicit color. Lookups are linear scans,
//! so smaller tiles make point access faster at the cost of more tiles and
//! more per-tile overhead.

use crate::error::VxlError;
use crate::key::BlockKey;

/// Default tile edge length in columns.
pub const CHUNK_SIZE: u32 = 16;

/// Number of records a full block list grows by.
pub const CHUNK_GROWTH: usize = 512;

/// Color reported for solid voxels without an explicit record.
///
/// Typically underground voxels that cannot be seen from the surface.
pub const DEFAULT_COLOR: u32 = 0x67_40_28;

/// Channel mask applied to colors; the alpha byte is not stored.
pub const COLOR_MASK: u32 = 0x00FF_FFFF;

/// An explicitly colored voxel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Block {
    /// Packed position.
    pub key: BlockKey,
    /// Color as `0x00RRGGBB`.
    pub color: u32,
}

/// An append-only, unordered list of [`Block`] records.
///
/// Capacity grows in steps of [`CHUNK_GROWTH`] records and never shrinks;
/// removal swaps the last record into the freed slot.
#[derive(Clone, Debug, Default)]
pub struct Chunk {
    blocks: Vec<Block>,
}

impl Chunk {
    /// Creates an empty chunk without allocating.
    pub fn new() -> Self {
        Self { blocks: Vec::new() }
    }

    /// Index of the record with exactly this key.
    pub fn find(&self, key: BlockKey) -> Option<usize> {
        self.blocks.iter().position(|b| b.key == key)
    }

    /// Color of the record with exactly this key.
    pub fn color(&self, key: BlockKey) -> Option<u32> {
        self.find(key).map(|i| self.blocks[i].color)
    }

    /// All records lying in the same column as `key`, in storage order.
    pub fn column(&self, key: BlockKey) -> impl Iterator<Item = &Block> + '_ {
        self.blocks.iter().filter(move |b| b.key.same_column(key))
    }

    /// Inserts a record or overwrites the color of an existing one.
    ///
    /// Storage is grown before the write, so on allocation failure the chunk
    /// is left exactly as it was.
    pub fn upsert(&mut self, key: BlockKey, color: u32) -> Result<(), VxlError> {
        if let Some(i) = self.find(key) {
            self.blocks[i].color = color;
            return Ok(());
        }
        self.push(Block { key, color })
    }

    /// Appends a record without checking for an existing key.
    pub fn push(&mut self, block: Block) -> Result<(), VxlError> {
        if self.blocks.len() == self.blocks.capacity() {
            self.blocks.try_reserve_exact(CHUNK_GROWTH)?;
        }
        self.blocks.push(block);
        Ok(())
    }

    /// Removes the record with this key, returning its color.
    pub fn remove(&mut self, key: BlockKey) -> Option<u32> {
        self.find(key).map(|i| self.blocks.swap_remove(i).color)
    }

    /// Drops every record but keeps the allocation.
    pub fn clear(&mut self) {
        self.blocks.clear();
    }

    /// Records currently stored.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Mutable access to the stored records, for in-place reordering.
    pub(crate) fn blocks_mut(&mut self) -> &mut [Block] {
        &mut self.blocks
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns `true` if no records are stored.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Number of records that fit without growing.
    pub fn capacity(&self) -> usize {
        self.blocks.capacity()
    }
}
