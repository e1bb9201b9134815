//! Incremental encoding with a bounded number of bytes per call.
//!
//! A [`Stream`] walks the map's columns in file order and hands out at most
//! `quota` bytes per [`Stream::read`] call, which suits fixed-size network
//! packets. Column sizes are computed when the stream opens, so the total
//! length is known before any byte is produced. The stream borrows its map
//! mutably, so the map cannot change while a stream is open.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::encode::ColumnEncoder;
use crate::error::VxlError;
use crate::map::Map;

/// A resumable encoder over one map.
#[derive(Debug)]
pub struct Stream<'a> {
    map: &'a mut Map,
    encoder: ColumnEncoder,
    /// Byte offset of every column; the last entry is the total length.
    column_offsets: Vec<usize>,
    quota: usize,
    /// Encoded bytes not yet handed out.
    pending: Vec<u8>,
    pending_offset: usize,
    /// Next column to encode.
    column: usize,
    /// Bytes handed out so far.
    position: usize,
}

impl<'a> Stream<'a> {
    /// Opens a stream producing at most `quota` bytes per read.
    pub fn new(map: &'a mut Map, quota: usize) -> Result<Self, VxlError> {
        if quota == 0 {
            return Err(VxlError::ZeroQuota);
        }
        let mut encoder = ColumnEncoder::default();
        let columns = map.layout.columns();
        let mut column_offsets = Vec::with_capacity(columns + 1);
        let mut offset = 0;
        column_offsets.push(offset);
        for index in 0..columns {
            let (x, y) = map.layout.column_at(index);
            offset += encoder.plan(map, x, y)?;
            column_offsets.push(offset);
        }
        tracing::debug!("opened map stream: {} bytes in {} columns, quota {}", offset, columns, quota);

        Ok(Self {
            map,
            encoder,
            column_offsets,
            quota,
            pending: Vec::new(),
            pending_offset: 0,
            column: 0,
            position: 0,
        })
    }

    /// Total encoded size of the map.
    pub fn total_len(&self) -> usize {
        self.column_offsets.last().copied().unwrap_or(0)
    }

    /// Byte offset of a column in the encoded output.
    pub fn column_offset(&self, column: usize) -> Option<usize> {
        self.column_offsets.get(column).copied()
    }

    /// Bytes handed out so far.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Maximum bytes produced per read.
    pub fn quota(&self) -> usize {
        self.quota
    }

    /// Returns `true` once every byte has been handed out.
    pub fn is_finished(&self) -> bool {
        self.column == self.column_offsets.len() - 1 && self.pending_offset == self.pending.len()
    }

    /// Encodes up to `min(quota, out.len())` bytes into `out`.
    ///
    /// Returns the number of bytes written; 0 means the stream has ended.
    /// An empty `out` is rejected while bytes remain.
    pub fn read(&mut self, out: &mut [u8]) -> Result<usize, VxlError> {
        if out.is_empty() && !self.is_finished() {
            return Err(VxlError::EmptyBuffer);
        }
        let limit = self.quota.min(out.len());
        let mut written = self.drain(&mut out[..limit]);

        let columns = self.column_offsets.len() - 1;
        while written < limit && self.column < columns {
            let (x, y) = self.map.layout.column_at(self.column);
            self.pending.clear();
            self.pending_offset = 0;
            self.encoder.encode(self.map, x, y, &mut self.pending)?;
            self.column += 1;
            written += self.drain(&mut out[written..limit]);
        }

        self.position += written;
        tracing::trace!("stream read {} bytes ({}/{})", written, self.position, self.total_len());
        Ok(written)
    }

    /// Copies pending bytes into `out`, returning how many were copied.
    fn drain(&mut self, out: &mut [u8]) -> usize {
        let available = &self.pending[self.pending_offset..];
        let n = available.len().min(out.len());
        out[..n].copy_from_slice(&available[..n]);
        self.pending_offset += n;
        n
    }
}

impl io::Read for Stream<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        Stream::read(self, buf).map_err(io::Error::other)
    }
}

impl Map {
    /// Writes the encoded map to `path` through a [`Stream`] producing at most
    /// `quota` bytes per read, returning the number of bytes written.
    pub fn write_file(&mut self, path: impl AsRef<Path>, quota: usize) -> Result<u64, VxlError> {
        let path = path.as_ref();
        let mut stream = Stream::new(self, quota)?;
        let mut file = BufWriter::new(File::create(path)?);
        let written = io::copy(&mut stream, &mut file)?;
        file.flush()?;
        tracing::debug!("wrote {} bytes to {}", written, path.display());
        Ok(written)
    }
}
