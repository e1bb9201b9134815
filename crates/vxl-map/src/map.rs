//! The in-memory map and its bounds-checked point API.
//!
//! [`Map`] combines a [`SolidityBitmap`] with a grid of [`Chunk`]s holding
//! explicit colors. Solid voxels without a record report [`DEFAULT_COLOR`].
//! Coordinates are `i32`; anything outside the volume reads as air and is
//! ignored by mutations.

use crate::chunk::{COLOR_MASK, Chunk, DEFAULT_COLOR};
use crate::error::VxlError;
use crate::geometry::SolidityBitmap;
use crate::key::BlockKey;
use crate::layout::Layout;

/// Offsets of the six axis neighbours.
const NEIGHBOURS: [(i32, i32, i32); 6] = [
    (-1, 0, 0),
    (1, 0, 0),
    (0, -1, 0),
    (0, 1, 0),
    (0, 0, -1),
    (0, 0, 1),
];

/// A decoded voxel map.
///
/// z points down: `z = 0` is the sky and `z = depth - 1` is the water level.
#[derive(Clone, Debug)]
pub struct Map {
    pub(crate) layout: Layout,
    pub(crate) chunks: Vec<Chunk>,
    pub(crate) geometry: SolidityBitmap,
    /// Scratch records of the column being encoded.
    pub(crate) queue: Chunk,
}

impl Map {
    /// Allocates an all-air map.
    pub(crate) fn blank(layout: Layout) -> Result<Self, VxlError> {
        layout.validate()?;
        Ok(Self {
            layout,
            chunks: vec![Chunk::new(); layout.chunks_x() * layout.chunks_y()],
            geometry: SolidityBitmap::new(
                layout.width as usize,
                layout.height as usize,
                layout.depth as usize,
            ),
            queue: Chunk::new(),
        })
    }

    /// Creates an empty map: only the water level at `z = depth - 1` is
    /// solid, in the default color.
    pub fn new(layout: Layout) -> Result<Self, VxlError> {
        let mut map = Self::blank(layout)?;
        let water = layout.depth as usize - 1;
        for x in 0..layout.width as usize {
            for y in 0..layout.height as usize {
                map.geometry.set(x, y, water);
            }
        }
        Ok(map)
    }

    /// Decodes `data`, or creates an empty map when no data is given.
    pub fn load(data: Option<&[u8]>, layout: Layout) -> Result<Self, VxlError> {
        match data {
            Some(data) => Self::decode(data, layout),
            None => Self::new(layout),
        }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn width(&self) -> u32 {
        self.layout.width
    }

    pub fn height(&self) -> u32 {
        self.layout.height
    }

    pub fn depth(&self) -> u32 {
        self.layout.depth
    }

    /// Number of explicitly colored voxels.
    pub fn block_count(&self) -> usize {
        self.chunks.iter().map(Chunk::len).sum()
    }

    /// Number of solid voxels.
    pub fn solid_count(&self) -> usize {
        self.geometry.count_solid()
    }

    #[inline]
    pub(crate) fn chunk_index(&self, x: u32, y: u32) -> usize {
        let size = self.layout.chunk_size;
        (y / size) as usize * self.layout.chunks_x() + (x / size) as usize
    }

    /// Tile holding the records of column `(x, y)`.
    pub(crate) fn chunk(&self, x: u32, y: u32) -> &Chunk {
        &self.chunks[self.chunk_index(x, y)]
    }

    /// Returns `true` if the voxel is solid. Out of bounds is never solid.
    pub fn is_solid(&self, x: i32, y: i32, z: i32) -> bool {
        self.layout.contains(x, y, z) && self.geometry.test(x as usize, y as usize, z as usize)
    }

    /// Returns `true` if the voxel is solid and touches air or the edge of
    /// the map on at least one side.
    pub fn on_surface(&self, x: i32, y: i32, z: i32) -> bool {
        self.is_solid(x, y, z)
            && NEIGHBOURS
                .iter()
                .any(|&(dx, dy, dz)| !self.is_solid(x + dx, y + dy, z + dz))
    }

    /// Color of the voxel, or `None` for air and out-of-bounds positions.
    pub fn get(&self, x: i32, y: i32, z: i32) -> Option<u32> {
        if !self.is_solid(x, y, z) {
            return None;
        }
        let (x, y, z) = (x as u32, y as u32, z as u32);
        let color = self
            .chunk(x, y)
            .color(BlockKey::new(x, y, z))
            .unwrap_or(DEFAULT_COLOR);
        Some(color)
    }

    /// Makes the voxel solid with an explicit color; the alpha byte is
    /// discarded. Out-of-bounds positions are ignored.
    ///
    /// On allocation failure the map is left unchanged.
    pub fn set(&mut self, x: i32, y: i32, z: i32, color: u32) -> Result<(), VxlError> {
        if !self.layout.contains(x, y, z) {
            return Ok(());
        }
        let (x, y, z) = (x as u32, y as u32, z as u32);
        let index = self.chunk_index(x, y);
        self.chunks[index].upsert(BlockKey::new(x, y, z), color & COLOR_MASK)?;
        self.geometry.set(x as usize, y as usize, z as usize);
        Ok(())
    }

    /// Turns the voxel into air and drops its color. Out-of-bounds positions
    /// are ignored.
    pub fn set_air(&mut self, x: i32, y: i32, z: i32) {
        if !self.layout.contains(x, y, z) {
            return;
        }
        let (x, y, z) = (x as u32, y as u32, z as u32);
        let index = self.chunk_index(x, y);
        self.chunks[index].remove(BlockKey::new(x, y, z));
        self.geometry.clear(x as usize, y as usize, z as usize);
    }

    /// Color and depth of the first solid voxel seen from the sky.
    ///
    /// `None` for an all-air column or a column outside the map; callers
    /// holding a previous result should keep it unchanged in that case.
    pub fn top(&self, x: i32, y: i32) -> Option<(u32, u32)> {
        (0..self.layout.depth as i32)
            .find(|&z| self.is_solid(x, y, z))
            .and_then(|z| self.get(x, y, z).map(|color| (color, z as u32)))
    }
}
