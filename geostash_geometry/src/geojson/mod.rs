//! GeoJSON interchange: parsing `serde_json` geometry objects into the geometry model.
//!
//! Writing goes the other way through the `to_json` methods on [`Geometry`](crate::Geometry),
//! [`GeoFeature`](crate::GeoFeature) and [`GeoCollection`](crate::GeoCollection).

mod parse;

pub use parse::parse_geojson_geometry;
