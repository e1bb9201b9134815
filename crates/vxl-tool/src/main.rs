//! Command-line tool for inspecting and rewriting VXL voxel maps.
//!
//! Settings come from `config.ron` in the platform config directory and can be
//! overridden with flags, e.g. `vxl-tool --depth 128 info map.vxl`.

mod commands;
mod error;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::error;
use vxl_config::{CliOverrides, Config};

use crate::error::ToolError;

#[derive(Parser, Debug)]
#[command(name = "vxl-tool", about = "Inspect and rewrite VXL voxel maps")]
struct Args {
    #[command(flatten)]
    overrides: CliOverrides,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode a map and report its size and contents.
    Info {
        file: PathBuf,
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Guess a map's dimensions without decoding it.
    Size { file: PathBuf },
    /// Decode a map and write it back through the streaming encoder.
    Recompress { input: PathBuf, output: PathBuf },
    /// Show the color and height of a column's top voxel.
    Top {
        file: PathBuf,
        /// First horizontal coordinate.
        #[arg(allow_negative_numbers = true)]
        a: i32,
        /// Second horizontal coordinate.
        #[arg(allow_negative_numbers = true)]
        b: i32,
    },
    /// Write an empty map with the configured dimensions.
    New { output: PathBuf },
}

fn load_config(overrides: &CliOverrides) -> Result<Config, ToolError> {
    let dir = match &overrides.config {
        Some(dir) => dir.clone(),
        None => Config::default_dir()?,
    };
    let mut config = Config::load_or_create(&dir)?;
    config.apply_cli_overrides(overrides);
    Ok(config)
}

fn run(args: Args, config: &Config) -> Result<(), ToolError> {
    let mut out = std::io::stdout().lock();
    match args.command {
        Command::Info { file, json } => commands::info(&file, json, config, &mut out),
        Command::Size { file } => commands::size(&file, &mut out),
        Command::Recompress { input, output } => commands::recompress(&input, &output, config, &mut out),
        Command::Top { file, a, b } => commands::top(&file, a, b, config, &mut out),
        Command::New { output } => commands::new_map(&output, config, &mut out),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match load_config(&args.overrides) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("vxl-tool: {e}");
            return ExitCode::FAILURE;
        }
    };
    vxl_log::init_logging(&config.debug, cfg!(debug_assertions));

    match run(args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
