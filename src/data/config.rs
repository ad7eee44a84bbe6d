use std::{
    collections::HashSet,
    io,
    path::{Path, PathBuf},
};

use fs_err as fs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static CONFIG_FILENAME: &str = "binpack.toml";

/// A binpack project, contained in a binpack.toml file.
///
/// Describes the bin to pack into and the named rectangles that should go in
/// it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct Config {
    /// The name of the project, copied into the layout.
    pub name: String,

    /// The size of each bin.
    #[serde(default = "default_bin_size")]
    pub bin_size: (u32, u32),

    /// Recorded in the layout. Rectangles are never rotated.
    #[serde(default)]
    pub allow_rotation: bool,

    /// Whether rectangles that don't fit in one bin should spill over into
    /// additional bins instead of failing the pack.
    #[serde(default)]
    pub multi_bin: bool,

    /// Whether a failed single-bin pack should be retried with a bin twice as
    /// large.
    #[serde(default)]
    pub grow: bool,

    /// The largest bin that growing is allowed to reach.
    #[serde(default = "default_max_bin_size")]
    pub max_bin_size: (u32, u32),

    /// The rectangles to pack, in the order their placements are reported.
    #[serde(default)]
    pub rects: Vec<RectConfig>,

    /// The path that this config came from. Relative output paths are resolved
    /// against the folder containing this file.
    #[serde(skip)]
    pub file_path: PathBuf,
}

impl Config {
    pub fn read_from_folder_or_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let meta = fs::metadata(path)?;

        if meta.is_file() {
            Self::read_from_file(path)
        } else {
            Self::read_from_folder(path)
        }
    }

    pub fn read_from_folder<P: AsRef<Path>>(folder_path: P) -> Result<Self, ConfigError> {
        let folder_path = folder_path.as_ref();
        let file_path = &folder_path.join(CONFIG_FILENAME);

        Self::read_from_file(file_path)
    }

    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read(path)?;

        let mut config: Self = toml::from_slice(&contents).map_err(|source| ConfigError::Toml {
            path: path.to_owned(),
            source,
        })?;
        config.file_path = path.to_owned();
        config.validate()?;

        log::trace!(
            "Read config \"{}\" with {} rects from {}",
            config.name,
            config.rects.len(),
            path.display()
        );

        Ok(config)
    }

    /// The path that paths in this Config should be considered relative to.
    pub fn folder(&self) -> &Path {
        match self.file_path.parent() {
            Some(parent) => parent,
            None => Path::new("."),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let zero_size = |what: String| ConfigError::ZeroSize {
            what,
            path: self.file_path.clone(),
        };

        if self.bin_size.0 == 0 || self.bin_size.1 == 0 {
            return Err(zero_size("bin-size".to_owned()));
        }

        if self.max_bin_size.0 == 0 || self.max_bin_size.1 == 0 {
            return Err(zero_size("max-bin-size".to_owned()));
        }

        let mut seen = HashSet::new();
        for rect in &self.rects {
            if rect.size.0 == 0 || rect.size.1 == 0 {
                return Err(zero_size(format!("rect \"{}\"", rect.name)));
            }

            if !seen.insert(rect.name.as_str()) {
                return Err(ConfigError::DuplicateName {
                    name: rect.name.clone(),
                    path: self.file_path.clone(),
                });
            }
        }

        Ok(())
    }
}

fn default_bin_size() -> (u32, u32) {
    (1024, 1024)
}

fn default_max_bin_size() -> (u32, u32) {
    (4096, 4096)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct RectConfig {
    /// Identifies the rectangle in the layout. Must be unique within a
    /// project.
    pub name: String,

    pub size: (u32, u32),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{source} in {}", .path.display())]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("{what} has a zero dimension in {}", .path.display())]
    ZeroSize { what: String, path: PathBuf },

    #[error("rect name \"{name}\" is used more than once in {}", .path.display())]
    DuplicateName { name: String, path: PathBuf },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ConfigError {
    /// Tells whether this ConfigError originated because of a path not
    /// existing.
    pub fn is_not_found(&self) -> bool {
        match self {
            ConfigError::Io(source) => source.kind() == io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, contents).unwrap();

        (dir, path)
    }

    #[test]
    fn defaults() {
        let (dir, path) = write_config(r#"name = "empty""#);

        let config = Config::read_from_folder(dir.path()).unwrap();

        assert_eq!(config.name, "empty");
        assert_eq!(config.bin_size, (1024, 1024));
        assert_eq!(config.max_bin_size, (4096, 4096));
        assert!(!config.allow_rotation);
        assert!(!config.multi_bin);
        assert!(!config.grow);
        assert!(config.rects.is_empty());
        assert_eq!(config.file_path, path);
        assert_eq!(config.folder(), dir.path());
    }

    #[test]
    fn full_project() {
        let (_dir, path) = write_config(
            r#"
            name = "icons"
            bin-size = [256, 128]
            allow-rotation = true
            multi-bin = true
            grow = true
            max-bin-size = [512, 512]

            [[rects]]
            name = "play"
            size = [32, 16]

            [[rects]]
            name = "stop"
            size = [16, 16]
            "#,
        );

        let config = Config::read_from_folder_or_file(&path).unwrap();

        assert_eq!(config.bin_size, (256, 128));
        assert_eq!(config.max_bin_size, (512, 512));
        assert!(config.allow_rotation && config.multi_bin && config.grow);
        assert_eq!(
            config.rects,
            vec![
                RectConfig {
                    name: "play".to_owned(),
                    size: (32, 16),
                },
                RectConfig {
                    name: "stop".to_owned(),
                    size: (16, 16),
                },
            ]
        );
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let (dir, _path) = write_config("name = \"x\"\nbin-sise = [1, 1]\n");

        match Config::read_from_folder(dir.path()) {
            Err(ConfigError::Toml { .. }) => {}
            other => panic!("expected a TOML error, got {:?}", other),
        }
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let (dir, _path) = write_config(
            r#"
            name = "x"

            [[rects]]
            name = "a"
            size = [1, 1]

            [[rects]]
            name = "a"
            size = [2, 2]
            "#,
        );

        match Config::read_from_folder(dir.path()) {
            Err(ConfigError::DuplicateName { name, .. }) => assert_eq!(name, "a"),
            other => panic!("expected a duplicate name error, got {:?}", other),
        }
    }

    #[test]
    fn zero_sizes_are_rejected() {
        let (dir, _path) = write_config("name = \"x\"\nbin-size = [0, 10]\n");

        match Config::read_from_folder(dir.path()) {
            Err(ConfigError::ZeroSize { what, .. }) => assert_eq!(what, "bin-size"),
            other => panic!("expected a zero size error, got {:?}", other),
        }
    }

    #[test]
    fn missing_config_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::read_from_folder(dir.path()).unwrap_err();

        assert!(err.is_not_found());
    }
}
