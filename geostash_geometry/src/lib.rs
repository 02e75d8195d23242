//! Geometry model of geostash.
//!
//! This crate holds everything that does not need a database:
//! - the [`Geometry`] sum type and its per-variant coordinate types,
//! - [`GeoFeature`], [`GeoProperties`] and [`GeoCollection`],
//! - GeoJSON interchange ([`geojson`]),
//! - shapefile decoding ([`decode`]) and feature normalization ([`normalize`]).

pub mod decode;
mod geo;
pub mod geojson;
pub mod normalize;
#[cfg(any(test, feature = "test"))]
pub mod testing;

pub use geo::*;
