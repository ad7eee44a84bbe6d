use std::{
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use binpacker::Rect;
use fs_err as fs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub static LAYOUT_FILENAME: &str = "binpack-layout.json";

/// The result of packing a project: where every rectangle ended up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Layout {
    pub name: String,

    /// The size of every bin in this layout. After growing, this is the size
    /// that finally worked, not the one from the project file.
    pub bin_size: (u32, u32),

    pub bin_count: usize,

    #[serde(default)]
    pub allow_rotation: bool,

    /// One entry per rectangle, in project order.
    pub rects: Vec<LayoutRect>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LayoutRect {
    pub name: String,

    /// Zero-based index of the bin this rectangle was placed in.
    pub bin: usize,

    /// Lower-left corner.
    pub min: (u32, u32),

    /// Upper-right corner.
    pub max: (u32, u32),
}

impl LayoutRect {
    /// Malformed rectangles, with `max` below `min`, come back as `None`.
    pub fn rect(&self) -> Option<Rect> {
        let width = self.max.0.checked_sub(self.min.0)?;
        let height = self.max.1.checked_sub(self.min.1)?;

        Some(Rect::new(self.min, (width, height)))
    }
}

impl Layout {
    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self, LayoutError> {
        let path = path.as_ref();
        let contents = fs::read(path)?;

        serde_json::from_slice(&contents).map_err(|source| LayoutError::Json {
            path: path.to_owned(),
            source,
        })
    }

    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), LayoutError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut file = BufWriter::new(fs::File::create(path)?);
        serde_json::to_writer_pretty(&mut file, self).map_err(|source| LayoutError::Json {
            path: path.to_owned(),
            source,
        })?;
        writeln!(file)?;
        file.flush()?;

        log::trace!("Saved layout to {}", path.display());

        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("{source} in {}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}
