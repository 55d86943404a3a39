//! Configuration - file locations and rendering parameters
//!
//! Every path an operation touches comes from here; nothing reads a
//! process-wide default on its own.

use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::HeartError;
use crate::export::RasterHints;
use crate::flag::StripeLayout;
use crate::geometry::{read_json, HeartOutline, LayoutTable};
use crate::scene::SceneAssembler;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_outline_path")]
    pub outline_path: PathBuf,
    #[serde(default = "default_layout_path")]
    pub layout_path: PathBuf,
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,
    #[serde(default = "default_png_dir")]
    pub png_dir: PathBuf,
    #[serde(default)]
    pub raster: RasterHints,
    #[serde(default)]
    pub stripes: StripeLayout,
}

fn default_outline_path() -> PathBuf { PathBuf::from("data/heart_quads.json") }
fn default_layout_path() -> PathBuf { PathBuf::from("data/heart_coords.json") }
fn default_catalog_path() -> PathBuf { PathBuf::from("data/flag_spec.json") }
fn default_png_dir() -> PathBuf { Path::new("images").join("pngs") }

impl Default for Config {
    fn default() -> Self {
        Self {
            outline_path: default_outline_path(),
            layout_path: default_layout_path(),
            catalog_path: default_catalog_path(),
            png_dir: default_png_dir(),
            raster: RasterHints::default(),
            stripes: StripeLayout::default(),
        }
    }
}

impl Config {
    /// Read a JSON config; absent keys take their defaults.
    pub fn load(path: &Path) -> Result<Self, HeartError> {
        let config = read_json(path)?;
        info!(path = path.display().to_string(); "Loaded configuration");
        Ok(config)
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self, HeartError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn outline(&self) -> Result<HeartOutline, HeartError> {
        HeartOutline::load(&self.outline_path)
    }

    pub fn layout(&self) -> Result<LayoutTable, HeartError> {
        LayoutTable::load(&self.layout_path)
    }

    pub fn catalog(&self) -> Result<Catalog, HeartError> {
        Catalog::load(&self.catalog_path)
    }

    pub fn assembler(&self) -> Result<SceneAssembler, HeartError> {
        Ok(SceneAssembler::new(self.outline()?, self.stripes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.png_dir, Path::new("images").join("pngs"));
        assert_eq!(config.raster.dpi, 300.0);
        assert_eq!(config.raster.parent_width, 400.0);
        assert_eq!(config.stripes.height_perc, 73.0);
        assert_eq!(config.stripes.shift, 5.0);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"catalogPath": "mine.json", "stripes": {{"shift": 0}}}}"#).unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.catalog_path, PathBuf::from("mine.json"));
        assert_eq!(config.stripes.shift, 0.0);
        assert_eq!(config.stripes.height_perc, 73.0);
        assert_eq!(config.outline_path, default_outline_path());
    }

    #[test]
    fn test_missing_config_file() {
        let err = Config::load_or_default(Some(Path::new("/no/such/config.json"))).unwrap_err();
        assert!(matches!(err, HeartError::MissingFile(_)));
        assert!(Config::load_or_default(None).is_ok());
    }
}
