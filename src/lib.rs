//! HeartFlags Core - flag-in-heart icon generator
//!
//! # Flow
//! 1. Geometry and flag specifications are loaded from JSON
//! 2. Flags become striped banners, clipped to the heart outline
//! 3. Scenes are written as SVG markup or rasterized to PNG
//! 4. The flag catalog round-trips through one JSON document

pub mod error;
pub mod node;
pub mod markup;
pub mod shapes;
pub mod geometry;
pub mod flag;
pub mod ids;
pub mod clip;
pub mod scene;
pub mod hashing;
pub mod catalog;
pub mod export;
pub mod config;

pub use error::HeartError;
pub use node::{Node, Tag, Child, Attributes};
pub use flag::{FlagSpec, Symbol, StripeLayout};
pub use geometry::{HeartOutline, LayoutTable, Coord};
pub use clip::Clip;
pub use ids::{IdAllocator, RandomIds, SequentialIds};
pub use scene::SceneAssembler;
pub use catalog::Catalog;
pub use export::{Encoder, PngExporter, RasterHints, Rasterizer, ResvgRasterizer};
pub use config::Config;

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
