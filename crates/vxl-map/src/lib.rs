//! Reading, editing and writing VXL voxel maps.
//!
//! Compressed data is decoded into a [`Map`] made of a one-bit-per-voxel
//! solidity bitmap plus tiles of explicit block colors, and encoded back
//! either in one go ([`Map::write`]) or in bounded pieces ([`Stream`]).

pub mod chunk;
pub mod coords;
mod decode;
mod encode;
pub mod error;
pub mod geometry;
pub mod key;
pub mod layout;
pub mod map;
pub mod size;
pub mod span;
pub mod stream;

pub use chunk::{Block, CHUNK_GROWTH, CHUNK_SIZE, Chunk, DEFAULT_COLOR};
pub use coords::CoordSystem;
pub use error::VxlError;
pub use key::BlockKey;
pub use layout::{Layout, MAX_DEPTH};
pub use map::Map;
pub use size::{SizeEstimate, estimate_size};
pub use stream::Stream;
