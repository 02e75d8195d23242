//! Locating the files of one shapefile inside an unpacked archive.

use super::IngestError;
use anyhow::Context;
use std::{
	ffi::OsStr,
	fs, io,
	path::{Path, PathBuf},
};

/// The three files a shapefile cannot be decoded without.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShapefileComponents {
	pub shp: PathBuf,
	pub shx: PathBuf,
	pub dbf: PathBuf,
}

/// Finds the `.shp` file below `root` and its `.shx` and `.dbf` sidecars.
///
/// Extensions are compared case-insensitively. Sidecars must sit in the same directory and share
/// the base name. With several `.shp` files the shallowest one wins, ties going to the first path
/// in sorted order. macOS resource forks (`__MACOSX/`, `._*`) are ignored.
pub fn locate_components(root: &Path) -> Result<ShapefileComponents, IngestError> {
	let files = list_files(root)
		.with_context(|| format!("listing '{}'", root.display()))
		.map_err(IngestError::Archive)?;

	let mut candidates: Vec<&PathBuf> = files.iter().filter(|path| has_extension(path, "shp")).collect();
	candidates.sort_by_key(|path| path.components().count());
	let shp = (*candidates.first().ok_or(IngestError::MissingPrimaryFile)?).clone();
	if candidates.len() > 1 {
		log::warn!("archive holds {} shapefiles, using '{}'", candidates.len(), shp.display());
	}

	let stem = shp.file_stem().unwrap_or_default();
	let sidecar = |extension: &str| {
		files
			.iter()
			.find(|path| path.parent() == shp.parent() && same_stem(path, stem) && has_extension(path, extension))
			.cloned()
	};

	let shx = sidecar("shx");
	let dbf = sidecar("dbf");
	match (shx, dbf) {
		(Some(shx), Some(dbf)) => Ok(ShapefileComponents { shp, shx, dbf }),
		(shx, dbf) => {
			let stem = stem.to_string_lossy();
			let mut missing = Vec::new();
			if shx.is_none() {
				missing.push(format!("{stem}.shx"));
			}
			if dbf.is_none() {
				missing.push(format!("{stem}.dbf"));
			}
			Err(IngestError::IncompleteComponentSet { missing })
		}
	}
}

fn has_extension(path: &Path, extension: &str) -> bool {
	path
		.extension()
		.is_some_and(|e| e.to_string_lossy().eq_ignore_ascii_case(extension))
}

fn same_stem(path: &Path, stem: &OsStr) -> bool {
	path
		.file_stem()
		.is_some_and(|s| s.to_string_lossy().eq_ignore_ascii_case(&stem.to_string_lossy()))
}

fn is_resource_fork(name: &OsStr) -> bool {
	let name = name.to_string_lossy();
	name == "__MACOSX" || name.starts_with("._")
}

/// All regular files below `root`, sorted, without macOS resource forks.
fn list_files(root: &Path) -> io::Result<Vec<PathBuf>> {
	let mut files = Vec::new();
	let mut pending = vec![root.to_path_buf()];
	while let Some(dir) = pending.pop() {
		for entry in fs::read_dir(&dir)? {
			let entry = entry?;
			if is_resource_fork(&entry.file_name()) {
				continue;
			}
			let file_type = entry.file_type()?;
			if file_type.is_dir() {
				pending.push(entry.path());
			} else if file_type.is_file() {
				files.push(entry.path());
			}
		}
	}
	files.sort();
	Ok(files)
}
