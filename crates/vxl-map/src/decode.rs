//! Decoding of compressed VXL data into a [`Map`].
//!
//! Columns are stored in y-major order (y outer, x inner). Every column is a
//! chain of spans terminated by a span of length 0; see [`crate::span`] for
//! the header layout. Decoding either succeeds as a whole or returns an error
//! without producing a map.

use crate::chunk::{Block, DEFAULT_COLOR};
use crate::error::VxlError;
use crate::key::BlockKey;
use crate::layout::Layout;
use crate::map::Map;
use crate::span::{Span, WORD, read_color};

impl Map {
    /// Decodes a compressed map with the given dimensions.
    ///
    /// Fails if the data ends before every column has been read or if a span
    /// header does not fit the column. Bytes after the last column are
    /// ignored.
    pub fn decode(data: &[u8], layout: Layout) -> Result<Self, VxlError> {
        let mut map = Self::blank(layout)?;
        let mut offset = 0;
        for index in 0..layout.columns() {
            let (x, y) = layout.column_at(index);
            offset = map.decode_column(data, offset, x, y)?;
        }

        if offset < data.len() {
            tracing::debug!("ignoring {} trailing bytes after last column", data.len() - offset);
        }
        tracing::debug!(
            "decoded {}x{}x{} map: {} bytes, {} solid voxels, {} colored",
            layout.width,
            layout.height,
            layout.depth,
            offset,
            map.solid_count(),
            map.block_count(),
        );
        Ok(map)
    }

    /// Decodes one column starting at `offset`, returning the offset of the
    /// next column.
    fn decode_column(&mut self, data: &[u8], mut offset: usize, x: u32, y: u32) -> Result<usize, VxlError> {
        let depth = self.layout.depth as usize;
        let chunk = self.chunk_index(x, y);
        let (cx, cy) = (x as usize, y as usize);
        let malformed = |offset, reason| VxlError::MalformedSpan { x, y, offset, reason };

        // Next z not yet accounted for.
        let mut z = 0usize;
        loop {
            let span = read_span(data, offset)?;
            let top = span.top_len().ok_or_else(|| malformed(offset, "top colors end before they start"))?;
            let start = usize::from(span.color_start);
            if start < z {
                return Err(malformed(offset, "top colors overlap the previous span"));
            }
            if start + top > depth {
                return Err(malformed(offset, "top colors extend below the map"));
            }
            // Colors always precede the next header, so checking the span's
            // color words up front covers both kinds of span.
            let colors = offset + WORD;
            require(data, colors, top * WORD)?;

            for i in 0..top {
                self.put(chunk, cx, cy, start + i, read_color(data, colors + i * WORD))?;
            }
            z = start + top;

            if span.is_terminal() {
                self.geometry.fill_column(cx, cy, z..depth);
                return Ok(colors + top * WORD);
            }

            let words = usize::from(span.length);
            let bottom = words
                .checked_sub(1 + top)
                .ok_or_else(|| malformed(offset, "span shorter than its top colors"))?;
            let next = offset + words * WORD;
            let air_start = usize::from(read_span(data, next)?.air_start);
            let bottom_start = air_start
                .checked_sub(bottom)
                .filter(|&s| s >= z && air_start <= depth)
                .ok_or_else(|| malformed(next, "bottom colors do not fit below the top colors"))?;
            // The bottom colors sit between the top colors and the next header.
            let bottom_colors = colors + top * WORD;

            self.geometry.fill_column(cx, cy, z..bottom_start);
            for i in 0..bottom {
                self.put(chunk, cx, cy, bottom_start + i, read_color(data, bottom_colors + i * WORD))?;
            }
            z = air_start;
            offset = next;
        }
    }

    /// Marks a decoded colored voxel solid, keeping a record only when the
    /// color differs from the default.
    fn put(&mut self, chunk: usize, x: usize, y: usize, z: usize, color: u32) -> Result<(), VxlError> {
        if color != DEFAULT_COLOR {
            // Columns are decoded once, so no existing record can match.
            self.chunks[chunk].push(Block {
                key: BlockKey::new(x as u32, y as u32, z as u32),
                color,
            })?;
        }
        self.geometry.set(x, y, z);
        Ok(())
    }
}

fn read_span(data: &[u8], offset: usize) -> Result<Span, VxlError> {
    Span::read(data, offset).ok_or_else(|| {
        tracing::warn!("span header at offset {offset} runs past the end of the data");
        VxlError::Truncated {
            offset,
            needed: WORD,
            len: data.len(),
        }
    })
}

fn require(data: &[u8], offset: usize, needed: usize) -> Result<(), VxlError> {
    if offset.saturating_add(needed) > data.len() {
        tracing::warn!("span colors at offset {offset} run past the end of the data");
        return Err(VxlError::Truncated {
            offset,
            needed,
            len: data.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(length: u8, color_start: u8, color_end: u8, air_start: u8) -> Vec<u8> {
        vec![length, color_start, color_end, air_start]
    }

    fn color(rgb: u32) -> Vec<u8> {
        ((rgb & 0xFFFFFF) | 0x7F00_0000).to_le_bytes().to_vec()
    }

    #[test]
    fn test_single_terminal_span() {
        // Air to z=5, two top colors, then implicit solid to the bottom.
        let data = [header(0, 5, 6, 0), color(0xAA0000), color(0x00BB00)].concat();
        let map = Map::decode(&data, Layout::new(1, 1, 16)).unwrap();

        assert!(!map.is_solid(0, 0, 4));
        assert_eq!(map.get(0, 0, 5), Some(0xAA0000));
        assert_eq!(map.get(0, 0, 6), Some(0x00BB00));
        for z in 7..16 {
            assert_eq!(map.get(0, 0, z), Some(DEFAULT_COLOR), "z={z}");
        }
        assert_eq!(map.block_count(), 2);
    }

    #[test]
    fn test_interior_run_without_colors_is_default() {
        // Span with one top color at z=2, implicit solid 3..9, one bottom
        // color at z=9; air 10..12; terminal span with one color at 12.
        let data = [
            header(3, 2, 2, 0),
            color(0x010203),
            color(0x040506),
            header(0, 12, 12, 10),
            color(0x070809),
        ]
        .concat();
        let map = Map::decode(&data, Layout::new(1, 1, 16)).unwrap();

        assert!(!map.is_solid(0, 0, 1));
        assert_eq!(map.get(0, 0, 2), Some(0x010203));
        for z in 3..9 {
            assert_eq!(map.get(0, 0, z), Some(DEFAULT_COLOR), "z={z}");
        }
        assert_eq!(map.get(0, 0, 9), Some(0x040506));
        assert!(!map.is_solid(0, 0, 10));
        assert!(!map.is_solid(0, 0, 11));
        assert_eq!(map.get(0, 0, 12), Some(0x070809));
        assert_eq!(map.get(0, 0, 15), Some(DEFAULT_COLOR));
    }

    #[test]
    fn test_all_air_column() {
        let data = header(0, 16, 15, 0);
        let map = Map::decode(&data, Layout::new(1, 1, 16)).unwrap();
        assert_eq!(map.solid_count(), 0);
    }

    #[test]
    fn test_default_colored_voxels_are_not_recorded() {
        let data = [header(0, 14, 15, 0), color(DEFAULT_COLOR), color(0x000001)].concat();
        let map = Map::decode(&data, Layout::new(1, 1, 16)).unwrap();
        assert_eq!(map.block_count(), 1);
        assert_eq!(map.get(0, 0, 14), Some(DEFAULT_COLOR));
    }

    #[test]
    fn test_columns_are_y_major() {
        // 2x1 map: column (0,0) solid from 3, column (1,0) solid from 7.
        let data = [header(0, 3, 3, 0), color(1), header(0, 7, 7, 0), color(2)].concat();
        let map = Map::decode(&data, Layout::new(2, 1, 8)).unwrap();
        assert_eq!(map.top(0, 0), Some((1, 3)));
        assert_eq!(map.top(1, 0), Some((2, 7)));
    }

    #[test]
    fn test_truncated_header() {
        let data = [header(2, 0, 0, 0), color(1)].concat();
        let result = Map::decode(&data, Layout::new(1, 1, 8));
        assert!(
            matches!(result, Err(VxlError::Truncated { offset: 8, .. })),
            "expected Truncated, got {result:?}"
        );
    }

    #[test]
    fn test_truncated_colors() {
        let data = [header(0, 0, 3, 0), color(1)].concat();
        let result = Map::decode(&data, Layout::new(1, 1, 8));
        assert!(matches!(result, Err(VxlError::Truncated { .. })), "got {result:?}");
    }

    #[test]
    fn test_missing_columns() {
        let data = [header(0, 0, 0, 0), color(1)].concat();
        let result = Map::decode(&data, Layout::new(2, 2, 8));
        assert!(matches!(result, Err(VxlError::Truncated { .. })), "got {result:?}");
    }

    #[test]
    fn test_malformed_spans() {
        let layout = Layout::new(1, 1, 8);

        // Top colors past the bottom of the column.
        let data = [header(0, 7, 8, 0), color(1), color(2)].concat();
        assert!(matches!(Map::decode(&data, layout), Err(VxlError::MalformedSpan { .. })));

        // color_end before color_start.
        let data = header(0, 5, 2, 0);
        assert!(matches!(Map::decode(&data, layout), Err(VxlError::MalformedSpan { .. })));

        // Word count smaller than the header plus its top colors.
        let data = [header(1, 0, 1, 0), color(1), color(2), header(0, 8, 7, 2)].concat();
        assert!(matches!(Map::decode(&data, layout), Err(VxlError::MalformedSpan { .. })));

        // Next span's air start lies above the current top colors.
        let data = [header(2, 3, 3, 0), color(1), header(0, 8, 7, 1)].concat();
        assert!(matches!(Map::decode(&data, layout), Err(VxlError::MalformedSpan { .. })));
    }

    #[test]
    fn test_trailing_bytes_are_ignored() {
        let data = [header(0, 0, 0, 0), color(5), vec![1, 2, 3]].concat();
        let map = Map::decode(&data, Layout::new(1, 1, 4)).unwrap();
        assert_eq!(map.get(0, 0, 0), Some(5));
    }

    #[test]
    fn test_load_without_data_is_empty_map() {
        let map = Map::load(None, Layout::new(4, 4, 8)).unwrap();
        assert_eq!(map.solid_count(), 16);
        assert!(map.is_solid(1, 1, 7));
    }
}
