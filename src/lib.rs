//! Procedural hex-island terrain
//!
//! A standalone library that turns a seed into a hexagonal island map:
//! layered-noise elevation, a cleaned land/water mask, smooth closed
//! coastline polygons and a classified river network. Rendering is left to
//! the caller; everything here is plain data in pixel space.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use hex_island::*;
//!
//! let config = MapConfigBuilder::new()
//!     .seed(42)
//!     .grid(64, 48).unwrap()
//!     .sea_level(0.45)
//!     .build().unwrap();
//!
//! let map = HexMap::generate(config).unwrap();
//!
//! for ring in map.coastline() {
//!     println!("coast with {} vertices", ring.len());
//! }
//! for river in &map.rivers().polylines {
//!     println!("{:?} river, width {}", river.order, river.width);
//! }
//! ```
//!
//! Each stage can also be run on its own: [`ElevationField`], [`classify_all`],
//! [`CoastRefiner`], [`CoastlineTracer`] and [`RiverNetwork::trace`].
//!
//! # Features
//!
//! - `spatial-index` (default): KD-tree endpoint matching in the coastline tracer and
//!   O(log n) position-to-hex lookups
//! - `serde`: Enables serialization support for configuration, hexes and outputs

// Modules
pub mod error;
pub mod config;
pub mod grid;
pub mod hex;
pub mod geometry;
pub mod noise;
pub mod terrain;
pub mod coast;
pub mod rivers;
pub mod map;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use error::{TerrainError, Result};
pub use config::{CoastConfig, ElevationConfig, MapConfig, MapConfigBuilder, RiverConfig};
pub use grid::HexGrid;
pub use hex::Hex;
pub use geometry::Point;
pub use noise::{NoiseSource, PerlinNoise};
pub use terrain::{classify, classify_all, label_regions, remove_specks, Classification, ElevationField, ElevationStats};
pub use coast::{CoastRefiner, CoastlineLoop, CoastlineTracer, LoopPolicy, RefinedCoast};
pub use rivers::{RiverNetwork, RiverOrder, RiverPolyline};
pub use map::HexMap;

#[cfg(feature = "spatial-index")]
pub use spatial::SpatialIndex;
