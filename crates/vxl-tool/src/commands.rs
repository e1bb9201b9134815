//! Implementations of the tool's subcommands.
//!
//! Every command writes its report to `out` so it can be exercised without a
//! terminal.

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;
use vxl_config::Config;
use vxl_map::{Layout, Map, SizeEstimate, estimate_size};

use crate::error::ToolError;

/// Summary printed by `info`.
#[derive(Debug, Serialize)]
pub struct MapReport {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub file_bytes: usize,
    pub encoded_bytes: usize,
    pub solid_voxels: usize,
    pub colored_voxels: usize,
}

fn read_bytes(path: &Path) -> Result<Vec<u8>, ToolError> {
    std::fs::read(path).map_err(ToolError::file(path))
}

/// Layout for `data`: guessed from the data or taken from the config.
fn layout_for(data: &[u8], config: &Config) -> Result<Layout, ToolError> {
    let configured = config.map.layout()?;
    if !config.map.guess_size {
        return Ok(configured);
    }
    let SizeEstimate { edge, depth } = estimate_size(data)?;
    let layout = Layout::new(edge, edge, depth).with_chunk_size(configured.chunk_size);
    info!("guessed map size {}x{}x{}", edge, edge, depth);
    Ok(layout)
}

/// Reads and decodes a map file.
pub fn load_map(path: &Path, config: &Config) -> Result<(Map, usize), ToolError> {
    let data = read_bytes(path)?;
    let layout = layout_for(&data, config)?;
    let map = Map::decode(&data, layout)?;
    Ok((map, data.len()))
}

/// Streams `map` into `path` using the configured quota.
pub fn save_map(map: &mut Map, path: &Path, config: &Config) -> Result<u64, ToolError> {
    Ok(map.write_file(path, config.stream.quota)?)
}

pub fn info(path: &Path, json: bool, config: &Config, out: &mut impl Write) -> Result<(), ToolError> {
    let (mut map, file_bytes) = load_map(path, config)?;
    let report = MapReport {
        width: map.width(),
        height: map.height(),
        depth: map.depth(),
        file_bytes,
        encoded_bytes: map.encoded_len()?,
        solid_voxels: map.solid_count(),
        colored_voxels: map.block_count(),
    };
    let text = if json {
        serde_json::to_string_pretty(&report)?
    } else {
        format!(
            "size:     {}x{}x{}\nbytes:    {} (re-encoded {})\nsolid:    {}\ncolored:  {}",
            report.width,
            report.height,
            report.depth,
            report.file_bytes,
            report.encoded_bytes,
            report.solid_voxels,
            report.colored_voxels,
        )
    };
    writeln!(out, "{text}").map_err(ToolError::file("<stdout>"))
}

pub fn size(path: &Path, out: &mut impl Write) -> Result<(), ToolError> {
    let estimate = estimate_size(&read_bytes(path)?)?;
    writeln!(out, "{}x{}x{}", estimate.edge, estimate.edge, estimate.depth)
        .map_err(ToolError::file("<stdout>"))
}

pub fn recompress(input: &Path, output: &Path, config: &Config, out: &mut impl Write) -> Result<(), ToolError> {
    let (mut map, before) = load_map(input, config)?;
    let after = save_map(&mut map, output, config)?;
    info!("recompressed {} -> {}", input.display(), output.display());
    writeln!(out, "{before} -> {after} bytes").map_err(ToolError::file("<stdout>"))
}

/// Prints the color and height of a column's top voxel in the configured
/// coordinate convention.
pub fn top(path: &Path, a: i32, b: i32, config: &Config, out: &mut impl Write) -> Result<(), ToolError> {
    let (map, _) = load_map(path, config)?;
    let coords = config.map.coords;
    let (x, y, _) = coords.to_map(a, 0, b, map.depth());
    let line = match map.top(x, y) {
        Some((color, z)) => {
            let (_, height, _) = coords.from_map(x, y, z as i32, map.depth());
            match coords {
                vxl_map::CoordSystem::Voxlap => format!("#{color:06x} at z={z}"),
                vxl_map::CoordSystem::YUp => format!("#{color:06x} at y={height}"),
            }
        }
        None => "no solid voxel".to_string(),
    };
    writeln!(out, "{line}").map_err(ToolError::file("<stdout>"))
}

pub fn new_map(output: &Path, config: &Config, out: &mut impl Write) -> Result<(), ToolError> {
    let mut map = Map::new(config.map.layout()?)?;
    let written = save_map(&mut map, output, config)?;
    writeln!(out, "wrote {written} bytes").map_err(ToolError::file("<stdout>"))
}
