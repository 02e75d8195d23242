use crate::{store::parse_timestamp, wkb::decode_geometry};
use anyhow::{Context, Result};
use geostash_geometry::{GeoProperties, Geometry};
use r2d2_sqlite::rusqlite::Row;
use time::OffsetDateTime;

/// Column list matching [`RawRow::from_row`].
pub(crate) const ROW_COLUMNS: &str = "id, properties, geometry, created_at, updated_at";

/// A persisted feature as it lives in the `features` table, with its geometry already
/// decoded into the interchange model.
#[derive(Clone, Debug, PartialEq)]
pub struct StoredFeatureRow {
	pub id: i64,
	pub properties: GeoProperties,
	pub geometry: Geometry,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}

/// Column values exactly as SQLite returns them.
pub(crate) struct RawRow {
	id: i64,
	properties: String,
	geometry: Vec<u8>,
	created_at: String,
	updated_at: String,
}

impl RawRow {
	pub(crate) fn from_row(row: &Row<'_>) -> r2d2_sqlite::rusqlite::Result<RawRow> {
		Ok(RawRow {
			id: row.get(0)?,
			properties: row.get(1)?,
			geometry: row.get(2)?,
			created_at: row.get(3)?,
			updated_at: row.get(4)?,
		})
	}
}

impl TryFrom<RawRow> for StoredFeatureRow {
	type Error = anyhow::Error;

	fn try_from(raw: RawRow) -> Result<Self> {
		let id = raw.id;
		let decode = || -> Result<StoredFeatureRow> {
			Ok(StoredFeatureRow {
				id,
				properties: GeoProperties::from_json(serde_json::from_str(&raw.properties)?)?,
				geometry: decode_geometry(&raw.geometry)?,
				created_at: parse_timestamp(&raw.created_at)?,
				updated_at: parse_timestamp(&raw.updated_at)?,
			})
		};
		decode().with_context(|| format!("decoding stored feature {id}"))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::wkb::encode_geometry;

	fn raw(properties: &str, geometry: Vec<u8>) -> RawRow {
		RawRow {
			id: 5,
			properties: properties.to_string(),
			geometry,
			created_at: "2024-03-01T12:00:00Z".to_string(),
			updated_at: "2024-03-02T08:30:00.5Z".to_string(),
		}
	}

	#[test]
	fn decodes_columns() {
		let geometry = Geometry::new_point([1.0, 2.0]);
		let row = StoredFeatureRow::try_from(raw(r#"{"name":"A"}"#, encode_geometry(&geometry).unwrap())).unwrap();
		assert_eq!(row.id, 5);
		assert_eq!(row.geometry, geometry);
		assert_eq!(row.properties.get("name"), Some(&serde_json::json!("A")));
		assert!(row.created_at < row.updated_at);
	}

	#[test]
	fn broken_columns_name_the_row() {
		let err = StoredFeatureRow::try_from(raw("[1]", vec![])).unwrap_err();
		assert!(err.to_string().contains("decoding stored feature 5"));
	}
}
