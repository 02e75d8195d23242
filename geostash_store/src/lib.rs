//! Spatially indexed feature store on SQLite.
//!
//! [`FeatureStore`] owns the connection pool and the schema. It is handed to a
//! [`FeatureWriter`] for atomic bulk inserts and to a [`FeatureRepository`] for everything
//! else. Geometries cross the store boundary as WKB ([`wkb`]) and come back out as
//! [`geostash_geometry::Geometry`].

mod assembler;
mod bbox;
mod error;
mod repository;
mod row;
mod store;
pub mod wkb;
mod writer;

pub use assembler::*;
pub use bbox::BBox;
pub use error::StoreError;
pub use repository::{FeatureRepository, UpdateFields};
pub use row::StoredFeatureRow;
pub use store::{FeatureStore, SRID};
pub use writer::FeatureWriter;
