//! Encoding of a [`Map`] back into compressed VXL data.
//!
//! A voxel needs a stored color if it is solid and either visible (on the
//! surface) or explicitly colored. Each column is cut into spans of
//!
//! 1. an air run,
//! 2. top colors: colored voxels directly below the air,
//! 3. an interior run of uncolored solid voxels (written implicitly),
//! 4. bottom colors: colored voxels directly above the next air run.
//!
//! Colored voxels that reach the bottom of the column cannot be bottom
//! colors, because the last span of a column has no bottom colors; they are
//! left for the next span's top colors instead.

use std::ops::Range;

use crate::chunk::DEFAULT_COLOR;
use crate::error::VxlError;
use crate::key::BlockKey;
use crate::map::Map;
use crate::span::{Span, WORD, write_color};

/// Where one encoded span's parts lie along its column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct SpanPlan {
    air_start: usize,
    top: Range<usize>,
    bottom: Range<usize>,
    terminal: bool,
}

impl SpanPlan {
    fn header(&self) -> Span {
        debug_assert!(self.top.end > 0, "top colors end above the column");
        let length = if self.terminal {
            0
        } else {
            1 + self.top.len() + self.bottom.len()
        };
        Span {
            length: length as u8,
            color_start: self.top.start as u8,
            color_end: (self.top.end - 1) as u8,
            air_start: self.air_start as u8,
        }
    }

    fn byte_len(&self) -> usize {
        (1 + self.top.len() + self.bottom.len()) * WORD
    }
}

/// Reusable span scratch for encoding columns one at a time.
#[derive(Debug, Default)]
pub(crate) struct ColumnEncoder {
    plans: Vec<SpanPlan>,
}

impl ColumnEncoder {
    /// Cuts column `(x, y)` into spans and returns its encoded size.
    ///
    /// Leaves the column's records in the map's queue for [`Self::encode`].
    pub(crate) fn plan(&mut self, map: &mut Map, x: u32, y: u32) -> Result<usize, VxlError> {
        map.queue_column(x, y)?;
        self.plans.clear();

        let depth = map.layout.depth as usize;
        let (cx, cy) = (x as usize, y as usize);
        let solid = |z: usize| map.geometry.test(cx, cy, z);
        let colored = |z: usize| solid(z) && map.is_colored(x, y, z);

        let mut k = 0;
        loop {
            let air_start = k;
            while k < depth && !solid(k) {
                k += 1;
            }
            let top_start = k;
            while k < depth && colored(k) {
                k += 1;
            }
            let top = top_start..k;
            while k < depth && solid(k) && !colored(k) {
                k += 1;
            }
            let bottom_start = k;
            let mut end = k;
            while end < depth && colored(end) {
                end += 1;
            }
            if end < depth {
                k = end;
            }
            let terminal = k == depth;
            self.plans.push(SpanPlan {
                air_start,
                top,
                bottom: bottom_start..k,
                terminal,
            });
            if terminal {
                break;
            }
        }
        Ok(self.plans.iter().map(SpanPlan::byte_len).sum())
    }

    /// Appends the encoded column `(x, y)` to `out`, returning its size.
    pub(crate) fn encode(&mut self, map: &mut Map, x: u32, y: u32, out: &mut Vec<u8>) -> Result<usize, VxlError> {
        let len = self.plan(map, x, y)?;
        out.reserve(len);
        for plan in &self.plans {
            plan.header().write(out);
            for z in plan.top.clone().chain(plan.bottom.clone()) {
                write_color(map.queued_color(z).unwrap_or(DEFAULT_COLOR), out);
            }
        }
        Ok(len)
    }
}

impl Map {
    /// Loads the records of column `(x, y)` into the queue, sorted by depth.
    pub(crate) fn queue_column(&mut self, x: u32, y: u32) -> Result<(), VxlError> {
        let index = self.chunk_index(x, y);
        let column = BlockKey::new(x, y, 0);
        self.queue.clear();
        for block in self.chunks[index].column(column) {
            self.queue.push(*block)?;
        }
        self.queue.blocks_mut().sort_unstable_by_key(|b| b.key);
        Ok(())
    }

    /// Color of the queued record at depth `z`.
    fn queued_color(&self, z: usize) -> Option<u32> {
        let blocks = self.queue.blocks();
        blocks
            .binary_search_by_key(&z, |b| b.key.z() as usize)
            .ok()
            .map(|i| blocks[i].color)
    }

    /// Whether a solid voxel of the queued column must be written with a color.
    fn is_colored(&self, x: u32, y: u32, z: usize) -> bool {
        self.on_surface(x as i32, y as i32, z as i32) || self.queued_color(z).is_some()
    }

    /// Exact size of the encoded map in bytes.
    pub fn encoded_len(&mut self) -> Result<usize, VxlError> {
        let mut encoder = ColumnEncoder::default();
        let mut total = 0;
        for index in 0..self.layout.columns() {
            let (x, y) = self.layout.column_at(index);
            total += encoder.plan(self, x, y)?;
        }
        Ok(total)
    }

    /// Encodes the whole map.
    pub fn write(&mut self) -> Result<Vec<u8>, VxlError> {
        let mut out = Vec::new();
        self.write_into(&mut out)?;
        Ok(out)
    }

    /// Appends the encoded map to `out`, returning the number of bytes added.
    pub fn write_into(&mut self, out: &mut Vec<u8>) -> Result<usize, VxlError> {
        let mut encoder = ColumnEncoder::default();
        let mut total = 0;
        for index in 0..self.layout.columns() {
            let (x, y) = self.layout.column_at(index);
            total += encoder.encode(self, x, y, out)?;
        }
        tracing::debug!("encoded {} columns into {} bytes", self.layout.columns(), total);
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Layout;

    fn column_bytes(map: &mut Map, x: u32, y: u32) -> Vec<u8> {
        let mut out = Vec::new();
        ColumnEncoder::default().encode(map, x, y, &mut out).unwrap();
        out
    }

    #[test]
    fn test_empty_map_columns() {
        let mut map = Map::new(Layout::new(2, 2, 64)).unwrap();
        let bytes = map.write().unwrap();
        // Every column: terminal span with the water level as its only color.
        let column = [0, 63, 63, 0, 0x28, 0x40, 0x67, 0xFF];
        assert_eq!(bytes, column.repeat(4));
        assert_eq!(map.encoded_len().unwrap(), bytes.len());
    }

    #[test]
    fn test_all_air_column() {
        let mut map = Map::new(Layout::new(1, 1, 8)).unwrap();
        map.set_air(0, 0, 7);
        assert_eq!(column_bytes(&mut map, 0, 0), vec![0, 8, 7, 0]);
    }

    #[test]
    fn test_floating_block_splits_column() {
        let mut map = Map::new(Layout::new(1, 1, 8)).unwrap();
        map.set(0, 0, 2, 0x0000FF).unwrap();
        let bytes = column_bytes(&mut map, 0, 0);
        assert_eq!(
            bytes,
            vec![
                2, 2, 2, 0, 0xFF, 0x00, 0x00, 0xFF, // block at z=2
                0, 7, 7, 3, 0x28, 0x40, 0x67, 0xFF, // water level, air from z=3
            ]
        );
    }

    #[test]
    fn test_enclosed_voxels_are_implicit() {
        // A 3x3 pillar from z=2 down; the centre column's interior is hidden.
        let mut map = Map::new(Layout::new(3, 3, 8)).unwrap();
        for x in 0..3 {
            for y in 0..3 {
                for z in 2..8 {
                    map.geometry.set(x, y, z);
                }
            }
        }
        let bytes = column_bytes(&mut map, 1, 1);
        // Top color at z=2, interior 3..7, bottom of column at z=7 is on the
        // map edge and becomes the top color of the final span.
        assert_eq!(&bytes[..4], &[2, 2, 2, 0]);
        assert_eq!(&bytes[8..12], &[0, 7, 7, 7]);
        assert_eq!(bytes.len(), 16);
    }

    #[test]
    fn test_explicit_hidden_color_is_kept() {
        let mut map = Map::new(Layout::new(3, 3, 8)).unwrap();
        for x in 0..3 {
            for y in 0..3 {
                for z in 2..8 {
                    map.geometry.set(x, y, z);
                }
            }
        }
        map.set(1, 1, 4, 0xABCDEF).unwrap();
        let bytes = map.write().unwrap();
        let decoded = Map::decode(&bytes, map.layout()).unwrap();
        assert_eq!(decoded.get(1, 1, 4), Some(0xABCDEF));
        assert_eq!(decoded.get(1, 1, 3), Some(DEFAULT_COLOR));
        assert!(!decoded.on_surface(1, 1, 4));
    }

    #[test]
    fn test_bottom_colors_above_air() {
        // Solid 1..5 then air 5..7 then water level at 7, in a 3x3 slab so
        // the centre column has hidden voxels.
        let mut map = Map::new(Layout::new(3, 3, 8)).unwrap();
        for x in 0..3 {
            for y in 0..3 {
                for z in 1..5 {
                    map.geometry.set(x, y, z);
                }
            }
        }
        map.set(1, 1, 4, 0x102030).unwrap();
        let bytes = column_bytes(&mut map, 1, 1);
        // Top color z=1, interior 2..4, bottom color z=4, air 5..7.
        assert_eq!(&bytes[..4], &[3, 1, 1, 0]);
        assert_eq!(&bytes[8..12], &[0x30, 0x20, 0x10, 0xFF]);
        assert_eq!(&bytes[12..16], &[0, 7, 7, 5]);
    }
}
