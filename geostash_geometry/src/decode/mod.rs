//! Shapefile decoding.
//!
//! [`ShapefileSource`] opens a `.shp` file with its `.shx` index and `.dbf` sidecar. Its
//! [`ShapefileDecoder`] pairs the geometry stream with the attribute stream through [`LockStep`]
//! and yields one [`RawRecord`] per index. Any failure, including the two streams disagreeing on
//! their length, ends the sequence.

mod attributes;
mod lockstep;
mod reader;
mod shapes;

pub use attributes::record_to_properties;
pub use lockstep::LockStep;
pub use reader::{RawRecord, ShapefileDecoder, ShapefileSource};
pub use shapes::shape_to_geometry;
