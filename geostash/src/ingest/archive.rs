//! Unpacking uploaded archives.

use super::IngestError;
use anyhow::Result;
use geostash_derive::context;
use std::{
	fs::{self, File},
	io::{self, BufReader},
	path::Path,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArchiveKind {
	Zip,
	Tar,
}

impl ArchiveKind {
	/// Picks the archive kind from the extension of a client supplied file name.
	pub fn from_file_name(name: &str) -> Result<ArchiveKind, IngestError> {
		let extension = Path::new(name)
			.extension()
			.map(|e| e.to_string_lossy().to_ascii_lowercase());
		match extension.as_deref() {
			Some("zip") => Ok(ArchiveKind::Zip),
			Some("tar") => Ok(ArchiveKind::Tar),
			_ => Err(IngestError::UnsupportedArchive(name.to_string())),
		}
	}

	pub fn extension(self) -> &'static str {
		match self {
			ArchiveKind::Zip => "zip",
			ArchiveKind::Tar => "tar",
		}
	}
}

/// Unpacks `archive` into the existing directory `target` and returns the number of files
/// written. Entries that would land outside `target` are skipped.
#[context("unpacking {} archive '{}'", kind.extension(), archive.display())]
pub fn extract(kind: ArchiveKind, archive: &Path, target: &Path) -> Result<usize> {
	let count = match kind {
		ArchiveKind::Zip => extract_zip(archive, target)?,
		ArchiveKind::Tar => extract_tar(archive, target)?,
	};
	log::debug!("unpacked {count} files into '{}'", target.display());
	Ok(count)
}

fn extract_zip(archive: &Path, target: &Path) -> Result<usize> {
	let mut zip = zip::ZipArchive::new(BufReader::new(File::open(archive)?))?;
	let mut count = 0;
	for index in 0..zip.len() {
		let mut entry = zip.by_index(index)?;
		let relative = match entry.enclosed_name() {
			Some(path) => path,
			None => {
				log::warn!("skipping archive entry with unsafe path '{}'", entry.name());
				continue;
			}
		};
		let path = target.join(relative);
		if entry.is_dir() {
			fs::create_dir_all(&path)?;
			continue;
		}
		if let Some(parent) = path.parent() {
			fs::create_dir_all(parent)?;
		}
		io::copy(&mut entry, &mut File::create(&path)?)?;
		count += 1;
	}
	Ok(count)
}

fn extract_tar(archive: &Path, target: &Path) -> Result<usize> {
	let mut tar = tar::Archive::new(BufReader::new(File::open(archive)?));
	let mut count = 0;
	for entry in tar.entries()? {
		let mut entry = entry?;
		let is_file = entry.header().entry_type().is_file();
		let name = entry.path()?.display().to_string();
		if !entry.unpack_in(target)? {
			log::warn!("skipping archive entry with unsafe path '{name}'");
			continue;
		}
		if is_file {
			count += 1;
		}
	}
	Ok(count)
}
