//! Guessing map dimensions from compressed data.
//!
//! The compressed format does not record its dimensions. Walking the span
//! headers alone (skipping all color data) counts the columns and finds the
//! deepest column bottom, which is usually enough to recover the size of a
//! square map.

use serde::{Deserialize, Serialize};

use crate::error::VxlError;
use crate::layout::MAX_DEPTH;
use crate::span::{Span, WORD};

/// Best-effort dimensions of a compressed map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeEstimate {
    /// Edge length, assuming width equals height.
    pub edge: u32,
    /// Depth, rounded up to a power of two and capped at [`MAX_DEPTH`].
    pub depth: u32,
}

/// Estimates the edge length and depth of compressed map data.
///
/// The map is assumed to be square. Depth is derived from the last span of
/// each column and may come out too small for maps whose deepest voxels are
/// all implicit. Malformed data stops the walk early rather than failing.
pub fn estimate_size(data: &[u8]) -> Result<SizeEstimate, VxlError> {
    if data.len() < WORD {
        return Err(VxlError::TooShort { len: data.len() });
    }

    let mut offset = 0;
    let mut columns: usize = 0;
    let mut depth = 0u32;
    while let Some(span) = Span::read(data, offset) {
        let Some(len) = span.byte_len() else {
            tracing::warn!("stopping size estimate at malformed span (offset {offset})");
            break;
        };
        if span.is_terminal() {
            columns += 1;
            depth = depth.max(u32::from(span.color_end) + 1);
        }
        offset += len;
    }

    let estimate = SizeEstimate {
        edge: columns.isqrt() as u32,
        depth: depth.next_power_of_two().min(MAX_DEPTH),
    };
    tracing::debug!("estimated {} columns: {:?}", columns, estimate);
    Ok(estimate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Layout;
    use crate::map::Map;

    #[test]
    fn test_empty_map_size() {
        let mut map = Map::new(Layout::new(64, 64, 64)).unwrap();
        let data = map.write().unwrap();
        assert_eq!(estimate_size(&data).unwrap(), SizeEstimate { edge: 64, depth: 64 });
    }

    #[test]
    fn test_depth_rounds_up() {
        let mut map = Map::new(Layout::new(8, 8, 48)).unwrap();
        let data = map.write().unwrap();
        assert_eq!(estimate_size(&data).unwrap(), SizeEstimate { edge: 8, depth: 64 });
    }

    #[test]
    fn test_deep_map_guess_is_decodable() {
        let mut map = Map::new(Layout::new(8, 8, 200)).unwrap();
        map.set(3, 4, 150, 0x00AA00).unwrap();
        let data = map.write().unwrap();

        let estimate = estimate_size(&data).unwrap();
        assert_eq!(estimate, SizeEstimate { edge: 8, depth: MAX_DEPTH });

        let decoded = Map::decode(&data, Layout::new(estimate.edge, estimate.edge, estimate.depth)).unwrap();
        assert_eq!(decoded.get(3, 4, 150), Some(0x00AA00));
        assert!(decoded.is_solid(0, 0, 199));
        assert!(!decoded.is_solid(0, 0, 198));
    }

    #[test]
    fn test_too_short() {
        assert!(matches!(estimate_size(&[0, 1]), Err(VxlError::TooShort { len: 2 })));
        assert!(matches!(estimate_size(&[]), Err(VxlError::TooShort { len: 0 })));
    }

    #[test]
    fn test_malformed_stops_early() {
        // One valid column, then a header whose colors end before they start.
        let data = [0, 7, 7, 0, 1, 2, 3, 4, 0, 9, 2, 0];
        assert_eq!(estimate_size(&data).unwrap(), SizeEstimate { edge: 1, depth: 8 });
    }
}
