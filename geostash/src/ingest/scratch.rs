use super::ArchiveKind;
use anyhow::Result;
use geostash_derive::context;
use std::{
	fs, io,
	path::{Path, PathBuf},
};
use uuid::Uuid;

/// Temporary files of one ingest: the stored archive and the directory it is unpacked into.
///
/// Both live in the upload directory under a random id and are removed when the value is
/// dropped, whichever way the ingest ends.
#[derive(Debug)]
pub struct ScratchSpace {
	archive: PathBuf,
	extract_dir: PathBuf,
}

impl ScratchSpace {
	#[context("preparing scratch space in '{}'", upload_dir.display())]
	pub fn create(upload_dir: &Path, kind: ArchiveKind) -> Result<ScratchSpace> {
		fs::create_dir_all(upload_dir)?;
		let id = Uuid::new_v4();
		let extract_dir = upload_dir.join(format!("extracted-{id}"));
		fs::create_dir(&extract_dir)?;
		Ok(ScratchSpace {
			archive: upload_dir.join(format!("upload-{id}.{}", kind.extension())),
			extract_dir,
		})
	}

	pub fn archive_path(&self) -> &Path {
		&self.archive
	}

	pub fn extract_dir(&self) -> &Path {
		&self.extract_dir
	}

	#[context("storing uploaded archive as '{}'", self.archive.display())]
	pub fn write_archive(&self, bytes: &[u8]) -> Result<()> {
		fs::write(&self.archive, bytes)?;
		Ok(())
	}

	#[context("copying '{}' into scratch space", source.display())]
	pub fn copy_archive(&self, source: &Path) -> Result<()> {
		fs::copy(source, &self.archive)?;
		Ok(())
	}
}

impl Drop for ScratchSpace {
	fn drop(&mut self) {
		report_removal(&self.archive, fs::remove_file(&self.archive));
		report_removal(&self.extract_dir, fs::remove_dir_all(&self.extract_dir));
	}
}

fn report_removal(path: &Path, result: io::Result<()>) {
	match result {
		Ok(()) => log::debug!("removed '{}'", path.display()),
		Err(err) if err.kind() == io::ErrorKind::NotFound => {}
		Err(err) => log::warn!("failed to remove '{}': {err}", path.display()),
	}
}
