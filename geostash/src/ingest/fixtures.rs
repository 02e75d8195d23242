//! In-memory archives for tests.

use geostash_geometry::testing::write_points;
use std::{
	fs,
	io::{Cursor, Write},
};

pub fn zip_archive<S: AsRef<str>>(entries: &[(S, Vec<u8>)]) -> Vec<u8> {
	let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
	let options = zip::write::SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
	for (name, data) in entries {
		writer.start_file(name.as_ref(), options).unwrap();
		writer.write_all(data).unwrap();
	}
	writer.finish().unwrap().into_inner()
}

pub fn tar_archive<S: AsRef<str>>(entries: &[(S, Vec<u8>)]) -> Vec<u8> {
	let mut builder = tar::Builder::new(Vec::new());
	for (name, data) in entries {
		let mut header = tar::Header::new_gnu();
		header.set_size(data.len() as u64);
		header.set_mode(0o644);
		builder.append_data(&mut header, name.as_ref(), data.as_slice()).unwrap();
	}
	builder.into_inner().unwrap()
}

/// The files of a point shapefile called `stem`, limited to `extensions`, as archive entries
/// below `folder` (empty for the archive root).
pub fn point_entries(folder: &str, stem: &str, points: &[([f64; 2], &str)], extensions: &[&str]) -> Vec<(String, Vec<u8>)> {
	let dir = tempfile::tempdir().unwrap();
	let shp = write_points(dir.path(), stem, points).unwrap();
	extensions
		.iter()
		.map(|extension| {
			let name = format!("{stem}.{extension}");
			let data = fs::read(shp.with_extension(extension)).unwrap();
			if folder.is_empty() {
				(name, data)
			} else {
				(format!("{folder}/{name}"), data)
			}
		})
		.collect()
}
