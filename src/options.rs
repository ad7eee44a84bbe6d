use std::{path::PathBuf, str::FromStr};

use structopt::StructOpt;
use thiserror::Error;

#[derive(Debug, StructOpt)]
#[structopt(about = "A tool to pack named rectangles into fixed-size bins")]
pub struct Options {
    #[structopt(flatten)]
    pub global: GlobalOptions,

    #[structopt(subcommand)]
    pub command: Subcommand,
}

#[derive(Debug, StructOpt)]
pub struct GlobalOptions {
    /// Sets verbosity level. Can be specified multiple times. RUST_LOG, if
    /// set, takes precedence.
    #[structopt(long = "verbose", short, global = true, parse(from_occurrences))]
    pub verbosity: u8,
}

#[derive(Debug, StructOpt)]
pub enum Subcommand {
    /// Pack the rectangles listed in a binpack project and write the
    /// resulting layout as JSON.
    Pack(PackOptions),

    /// Check that a layout file has no overlapping or out-of-bounds
    /// rectangles.
    Verify(VerifyOptions),
}

#[derive(Debug, StructOpt)]
pub struct PackOptions {
    /// The path to a binpack.toml file, or a folder containing one. Defaults
    /// to the current working directory.
    pub project_path: Option<PathBuf>,

    /// Where to write the layout. Defaults to binpack-layout.json next to the
    /// project file.
    #[structopt(long, short)]
    pub output: Option<PathBuf>,

    /// Overrides the bin size from the project file, written as WIDTHxHEIGHT.
    #[structopt(long)]
    pub bin_size: Option<BinSize>,

    /// Double the bin size and try again whenever the rectangles don't fit,
    /// up to the project's max-bin-size.
    #[structopt(long)]
    pub grow: bool,

    /// Spread the rectangles over as many bins as needed instead of failing
    /// when one bin is full.
    #[structopt(long)]
    pub multi_bin: bool,
}

#[derive(Debug, StructOpt)]
pub struct VerifyOptions {
    /// The layout file to check.
    pub layout: PathBuf,
}

/// A bin size given on the command line, like `512x256`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinSize(pub u32, pub u32);

impl From<BinSize> for (u32, u32) {
    fn from(size: BinSize) -> Self {
        (size.0, size.1)
    }
}

impl FromStr for BinSize {
    type Err = BinSizeParseError;

    fn from_str(value: &str) -> Result<BinSize, Self::Err> {
        let mut parts = value.splitn(2, |c| c == 'x' || c == 'X');

        let width = parts.next().and_then(|part| part.trim().parse().ok());
        let height = parts.next().and_then(|part| part.trim().parse().ok());

        match (width, height) {
            (Some(width), Some(height)) if width > 0 && height > 0 => Ok(BinSize(width, height)),
            _ => Err(BinSizeParseError(value.to_owned())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Invalid bin size '{0}'. Expected WIDTHxHEIGHT with non-zero dimensions, like 512x512.")]
pub struct BinSizeParseError(String);
