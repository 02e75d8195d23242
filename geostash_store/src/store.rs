use anyhow::Result;
use geostash_derive::context;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use std::{fmt::Debug, fs, path::Path, time::Duration};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

/// Spatial reference identifier of every stored geometry (WGS 84).
pub const SRID: i64 = 4326;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS features (
	id INTEGER PRIMARY KEY AUTOINCREMENT,
	properties TEXT NOT NULL,
	geometry BLOB NOT NULL,
	srid INTEGER NOT NULL DEFAULT 4326 CHECK (srid = 4326),
	min_x REAL,
	min_y REAL,
	max_x REAL,
	max_y REAL,
	created_at TEXT NOT NULL,
	updated_at TEXT NOT NULL
);
CREATE VIRTUAL TABLE IF NOT EXISTS features_index USING rtree(id, min_x, max_x, min_y, max_y);
CREATE TRIGGER IF NOT EXISTS features_index_insert AFTER INSERT ON features
WHEN NEW.min_x IS NOT NULL BEGIN
	INSERT INTO features_index VALUES (NEW.id, NEW.min_x, NEW.max_x, NEW.min_y, NEW.max_y);
END;
CREATE TRIGGER IF NOT EXISTS features_index_update AFTER UPDATE OF min_x, min_y, max_x, max_y ON features BEGIN
	DELETE FROM features_index WHERE id = OLD.id;
	INSERT INTO features_index SELECT NEW.id, NEW.min_x, NEW.max_x, NEW.min_y, NEW.max_y WHERE NEW.min_x IS NOT NULL;
END;
CREATE TRIGGER IF NOT EXISTS features_index_delete AFTER DELETE ON features BEGIN
	DELETE FROM features_index WHERE id = OLD.id;
END;
";

/// Handle to the SQLite database holding the features.
///
/// Cloning is cheap and shares the connection pool, so the same store can be passed to a
/// [`FeatureWriter`](crate::FeatureWriter) and a [`FeatureRepository`](crate::FeatureRepository).
#[derive(Clone)]
pub struct FeatureStore {
	pool: Pool<SqliteConnectionManager>,
	name: String,
}

impl FeatureStore {
	/// Opens (or creates) the database at `path` and makes sure the schema exists.
	#[context("opening feature store '{}'", path.display())]
	pub fn open(path: &Path, pool_size: u32) -> Result<FeatureStore> {
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent)?;
		}
		let manager = SqliteConnectionManager::file(path).with_init(|conn| conn.busy_timeout(Duration::from_secs(5)));
		let pool = Pool::builder().max_size(pool_size.max(1)).build(manager)?;
		pool.get()?.execute_batch(SCHEMA)?;
		log::debug!("opened feature store '{}' with {pool_size} connections", path.display());

		Ok(FeatureStore {
			pool,
			name: path.to_string_lossy().to_string(),
		})
	}

	#[context("getting a connection to '{}'", self.name)]
	pub(crate) fn connection(&self) -> Result<PooledConnection<SqliteConnectionManager>> {
		Ok(self.pool.get()?)
	}

	pub fn name(&self) -> &str {
		&self.name
	}
}

impl Debug for FeatureStore {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FeatureStore").field("name", &self.name).finish()
	}
}

/// Current time as stored in `created_at` / `updated_at`.
pub(crate) fn timestamp() -> Result<String> {
	Ok(OffsetDateTime::now_utc().format(&Rfc3339)?)
}

pub(crate) fn parse_timestamp(text: &str) -> Result<OffsetDateTime> {
	Ok(OffsetDateTime::parse(text, &Rfc3339)?)
}
