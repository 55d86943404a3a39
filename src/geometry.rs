//! Geometry Loader - heart outline and gallery coordinates

use std::fs;
use std::path::Path;

use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::HeartError;
use crate::node::Node;
use crate::shapes::{CurvePath, Point, Quad};

/// Flips the outline upright and fills the 50-unit square.
pub const HEART_TRANSFORM: &str = "scale(1.25 -1.25)";
pub const HEART_STROKE_WIDTH: &str = ".5";

/// One closed quadratic curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartOutline {
    pub initial_point: Point,
    pub quad_points: Vec<Quad>,
}

impl HeartOutline {
    pub fn load(path: &Path) -> Result<Self, HeartError> {
        let outline: Self = read_json(path)?;
        debug!(
            path = path.display().to_string(),
            segments = outline.quad_points.len();
            "Loaded heart outline"
        );
        Ok(outline)
    }

    /// The outline as an unfilled, stroked path with the given id.
    pub fn path(&self, id: &str, stroke: &str) -> Node {
        let mut path = CurvePath::new(self.initial_point, self.quad_points.clone());
        path.id = Some(id.to_string());
        path.fill = Some("none".into());
        path.stroke = Some(stroke.to_string());
        path.transform = Some(HEART_TRANSFORM.into());
        path.stroke_width = Some(HEART_STROKE_WIDTH.into());
        path.into()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
}

/// Positional gallery slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutTable {
    pub heart_coords: Vec<Coord>,
}

impl LayoutTable {
    pub fn load(path: &Path) -> Result<Self, HeartError> {
        let table: Self = read_json(path)?;
        debug!(
            path = path.display().to_string(),
            slots = table.heart_coords.len();
            "Loaded gallery layout"
        );
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.heart_coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heart_coords.is_empty()
    }
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, HeartError> {
    let content = fs::read_to_string(path).map_err(|e| HeartError::from_io(path, e))?;
    Ok(serde_json::from_str(&content)?)
}
