//! Raster Exporter - PNG output for finished scenes
//!
//! Rasterization sits behind [`Rasterizer`]; [`ResvgRasterizer`] is the
//! bundled implementation. Converter failures are returned, never retried.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, info};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg;
use serde::{Deserialize, Serialize};

use crate::error::HeartError;
use crate::flag::FlagSpec;
use crate::hashing::sha256_hex;
use crate::markup;
use crate::node::Node;
use crate::scene::SceneAssembler;

pub const DEFAULT_SUFFIX: &str = "heart";

/// Size hints handed to the rasterizer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RasterHints {
    #[serde(default = "default_dpi")]
    pub dpi: f32,
    #[serde(default = "default_parent")]
    pub parent_width: f32,
    #[serde(default = "default_parent")]
    pub parent_height: f32,
}

fn default_dpi() -> f32 { 300.0 }
fn default_parent() -> f32 { 400.0 }

impl Default for RasterHints {
    fn default() -> Self {
        Self {
            dpi: default_dpi(),
            parent_width: default_parent(),
            parent_height: default_parent(),
        }
    }
}

pub trait Rasterizer {
    /// Turn SVG markup into PNG bytes.
    fn rasterize(&self, markup: &[u8], hints: &RasterHints) -> Result<Vec<u8>, HeartError>;
}

/// Renders with resvg, scaling the document to fit the parent box.
pub struct ResvgRasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl ResvgRasterizer {
    pub fn new() -> Self {
        let mut fontdb = usvg::fontdb::Database::new();
        fontdb.load_system_fonts();
        debug!(faces = fontdb.len(); "Loaded system fonts");
        Self {
            fontdb: Arc::new(fontdb),
        }
    }
}

impl Default for ResvgRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer for ResvgRasterizer {
    fn rasterize(&self, markup: &[u8], hints: &RasterHints) -> Result<Vec<u8>, HeartError> {
        let mut opt = usvg::Options::default();
        opt.dpi = hints.dpi;
        opt.fontdb = self.fontdb.clone();
        opt.default_size = usvg::Size::from_wh(hints.parent_width, hints.parent_height)
            .ok_or_else(|| {
                HeartError::Raster(format!(
                    "unsupported parent size {}x{}",
                    hints.parent_width, hints.parent_height
                ))
            })?;

        let tree = usvg::Tree::from_data(markup, &opt)
            .map_err(|e| HeartError::Raster(e.to_string()))?;

        let size = tree.size();
        let scale = (hints.parent_width / size.width()).min(hints.parent_height / size.height());
        let width = (size.width() * scale).round() as u32;
        let height = (size.height() * scale).round() as u32;
        let mut pixmap = Pixmap::new(width, height)
            .ok_or_else(|| HeartError::Raster(format!("cannot allocate {width}x{height} pixmap")))?;

        resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());
        pixmap
            .encode_png()
            .map_err(|e| HeartError::Raster(e.to_string()))
    }
}

/// Which scene each flag is exported as.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoder {
    #[default]
    Heart,
    Flag,
}

impl Encoder {
    pub fn encode(&self, assembler: &SceneAssembler, spec: &FlagSpec) -> Vec<u8> {
        match self {
            Encoder::Heart => assembler.encode_heart(spec),
            Encoder::Flag => assembler.encode_flag(spec),
        }
    }
}

/// Record of one written file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedFile {
    pub flag: String,
    pub path: PathBuf,
    pub bytes: usize,
    pub sha256: String,
}

pub fn png_path(dir: &Path, flag_name: &str, suffix: &str) -> PathBuf {
    dir.join(format!("{flag_name}-{suffix}.png"))
}

pub struct PngExporter<'a> {
    assembler: &'a SceneAssembler,
    rasterizer: &'a dyn Rasterizer,
    hints: RasterHints,
}

impl<'a> PngExporter<'a> {
    pub fn new(assembler: &'a SceneAssembler, rasterizer: &'a dyn Rasterizer, hints: RasterHints) -> Self {
        Self {
            assembler,
            rasterizer,
            hints,
        }
    }

    /// Write `{name}-{suffix}.png` for every flag into `dir`, which must
    /// already exist.
    pub fn write_pngs(
        &self,
        specs: &[FlagSpec],
        dir: &Path,
        suffix: &str,
        encoder: Encoder,
    ) -> Result<Vec<ExportedFile>, HeartError> {
        if !dir.is_dir() {
            return Err(HeartError::MissingFile(dir.to_path_buf()));
        }

        let mut exported = Vec::with_capacity(specs.len());
        for spec in specs {
            let markup = encoder.encode(self.assembler, spec);
            let png = self.rasterizer.rasterize(&markup, &self.hints)?;
            let path = png_path(dir, &spec.name, suffix);
            fs::write(&path, &png).map_err(|e| HeartError::from_io(&path, e))?;
            debug!(path = path.display().to_string(), bytes = png.len(); "Wrote PNG");
            exported.push(ExportedFile {
                flag: spec.name.clone(),
                path,
                bytes: png.len(),
                sha256: sha256_hex(&png),
            });
        }

        info!(count = exported.len(), dir = dir.display().to_string(); "Exported PNGs");
        Ok(exported)
    }
}

/// Write a scene as an `.svg` file.
pub fn write_svg(node: &Node, path: &Path) -> Result<(), HeartError> {
    fs::write(path, markup::to_markup(node)).map_err(|e| HeartError::from_io(path, e))?;
    info!(path = path.display().to_string(); "Wrote SVG");
    Ok(())
}
