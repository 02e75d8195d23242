use super::{LockStep, record_to_properties, shape_to_geometry};
use crate::{GeoProperties, Geometry};
use anyhow::{Context, Result};
use geostash_derive::context;
use shapefile::{Shape, ShapeReader, dbase, reader::ShapeIterator};
use std::{
	fs::File,
	io::BufReader,
	path::{Path, PathBuf},
};

/// One decoded record: the geometry and the untouched attribute row of the same index.
#[derive(Clone, Debug, PartialEq)]
pub struct RawRecord {
	pub geometry: Geometry,
	pub attributes: GeoProperties,
}

/// The opened geometry, index and attribute files of one shapefile.
///
/// Opening reads only the headers and the `.shx` index. Records are read one pair at a time by
/// the [`ShapefileDecoder`] returned from [`ShapefileSource::decode`].
pub struct ShapefileSource {
	path: PathBuf,
	shapes: ShapeReader<BufReader<File>>,
	table: dbase::Reader<BufReader<File>>,
	columns: Vec<String>,
	decoded: bool,
}

impl ShapefileSource {
	#[context("opening shapefile '{}'", shp_path.display())]
	pub fn open(shp_path: &Path, shx_path: &Path, dbf_path: &Path) -> Result<Self> {
		let shapes = open_shapes(shp_path, shx_path)?;
		let table = dbase::Reader::from_path(dbf_path)
			.with_context(|| format!("reading attribute table '{}'", dbf_path.display()))?;
		let columns = table.fields().iter().map(|field| field.name().to_string()).collect();
		log::debug!(
			"opened '{}' with {} shapes and {} attribute rows",
			shp_path.display(),
			shapes.shape_count().unwrap_or_default(),
			table.header().num_records
		);
		Ok(Self {
			path: shp_path.to_path_buf(),
			shapes,
			table,
			columns,
			decoded: false,
		})
	}

	/// The record sequence. It is a single pass: a second call yields nothing.
	pub fn decode(&mut self) -> ShapefileDecoder<'_> {
		if self.decoded {
			log::warn!("'{}' was already decoded", self.path.display());
		}
		let done = self.decoded;
		self.decoded = true;
		ShapefileDecoder {
			pairs: LockStep::new(self.shapes.iter_shapes(), self.table.iter_records()).with_names("geometry", "attribute"),
			columns: &self.columns,
			done,
		}
	}
}

fn open_shapes(shp_path: &Path, shx_path: &Path) -> Result<ShapeReader<BufReader<File>>> {
	let shp = File::open(shp_path)?;
	let shx = File::open(shx_path).with_context(|| format!("reading index '{}'", shx_path.display()))?;
	Ok(ShapeReader::with_shx(BufReader::new(shp), BufReader::new(shx))?)
}

type ShapeStream<'a> = ShapeIterator<'a, BufReader<File>, Shape>;
type RecordStream<'a> = dbase::RecordIterator<'a, BufReader<File>, dbase::Record>;

/// Reads geometry and attribute records in lock-step.
///
/// Nothing is buffered: each call to `next` reads one shape and one attribute row. The first
/// failure, whether unreadable bytes, an unsupported shape or one stream ending before the
/// other, is yielded with the record index and ends the sequence.
pub struct ShapefileDecoder<'a> {
	pairs: LockStep<ShapeStream<'a>, RecordStream<'a>>,
	columns: &'a [String],
	done: bool,
}

impl Iterator for ShapefileDecoder<'_> {
	type Item = Result<RawRecord>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.done {
			return None;
		}
		let index = self.pairs.position();
		let result = self.pairs.next()?.and_then(|(shape, record)| {
			let decoded = shape
				.map_err(anyhow::Error::from)
				.and_then(|shape| shape_to_geometry(&shape))
				.and_then(|geometry| Ok((geometry, record?)));
			let (geometry, record) = decoded.with_context(|| format!("decoding record {index}"))?;
			Ok(RawRecord {
				geometry,
				attributes: record_to_properties(record, self.columns),
			})
		});
		self.done = result.is_err();
		Some(result)
	}
}
