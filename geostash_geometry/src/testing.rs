//! Fixture writers producing real shapefiles (`.shp`, `.shx`, `.dbf`) for tests.
//!
//! Every dataset has a single character column `name`.

use anyhow::{Result, anyhow};
use shapefile::{
	Point, Polygon, PolygonRing, Writer,
	dbase::{FieldName, FieldValue, Record, TableWriterBuilder},
};
use std::path::{Path, PathBuf};

fn table_builder() -> Result<TableWriterBuilder> {
	let name = FieldName::try_from("name").map_err(|e| anyhow!("invalid field name: {e:?}"))?;
	Ok(TableWriterBuilder::new().add_character_field(name, 50))
}

fn name_record(name: &str) -> Record {
	let mut record = Record::default();
	record.insert("name".to_string(), FieldValue::Character(Some(name.to_string())));
	record
}

/// Writes `<dir>/<stem>.shp` with one point per entry and returns the `.shp` path.
pub fn write_points(dir: &Path, stem: &str, points: &[([f64; 2], &str)]) -> Result<PathBuf> {
	let path = dir.join(format!("{stem}.shp"));
	let mut writer = Writer::from_path(&path, table_builder()?)?;
	for ([x, y], name) in points {
		writer.write_shape_and_record(&Point::new(*x, *y), &name_record(name))?;
	}
	drop(writer);
	Ok(path)
}

/// Writes `<dir>/<stem>.shp` with one single-ring polygon per entry and returns the `.shp` path.
/// Rings should be closed and clockwise.
pub fn write_polygons(dir: &Path, stem: &str, polygons: &[(Vec<[f64; 2]>, &str)]) -> Result<PathBuf> {
	let path = dir.join(format!("{stem}.shp"));
	let mut writer = Writer::from_path(&path, table_builder()?)?;
	for (ring, name) in polygons {
		let points = ring.iter().map(|[x, y]| Point::new(*x, *y)).collect();
		writer.write_shape_and_record(&Polygon::new(PolygonRing::Outer(points)), &name_record(name))?;
	}
	drop(writer);
	Ok(path)
}
