//! Shapefile ingestion.
//!
//! An archive is stored in a [`ScratchSpace`], unpacked ([`extract`]), checked for a complete
//! shapefile ([`locate_components`]), decoded, normalized and inserted in one transaction by the
//! [`Ingestor`].

mod archive;
mod error;
#[cfg(test)]
pub(crate) mod fixtures;
mod pipeline;
mod scratch;
mod validator;

pub use archive::{ArchiveKind, extract};
pub use error::IngestError;
pub use pipeline::{IngestSummary, Ingestor};
pub use scratch::ScratchSpace;
pub use validator::{ShapefileComponents, locate_components};
