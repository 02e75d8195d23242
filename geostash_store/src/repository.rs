use crate::{
	BBox, FeatureStore, StoreError, StoredFeatureRow, assemble_collection, assemble_feature,
	row::{ROW_COLUMNS, RawRow},
	store::timestamp,
	wkb::encode_geometry,
};
use anyhow::Result;
use geostash_derive::context;
use geostash_geometry::{GeoCollection, GeoFeature, GeoProperties, Geometry};
use r2d2_sqlite::rusqlite::{Connection, Params, params};

/// Which fields an update replaces. Each case runs one fixed statement.
#[derive(Clone, Debug, PartialEq)]
pub enum UpdateFields {
	PropertiesOnly(GeoProperties),
	GeometryOnly(Geometry),
	Both(GeoProperties, Geometry),
}

impl UpdateFields {
	/// Fails with [`StoreError::NoUpdateFields`] when neither field is supplied.
	pub fn new(properties: Option<GeoProperties>, geometry: Option<Geometry>) -> Result<UpdateFields, StoreError> {
		match (properties, geometry) {
			(Some(p), None) => Ok(UpdateFields::PropertiesOnly(p)),
			(None, Some(g)) => Ok(UpdateFields::GeometryOnly(g)),
			(Some(p), Some(g)) => Ok(UpdateFields::Both(p, g)),
			(None, None) => Err(StoreError::NoUpdateFields),
		}
	}

	fn statement(&self) -> &'static str {
		match self {
			UpdateFields::PropertiesOnly(_) => {
				"UPDATE features SET properties = ?2, updated_at = ?3
				WHERE id = ?1 RETURNING id, properties, geometry, created_at, updated_at"
			}
			UpdateFields::GeometryOnly(_) => {
				"UPDATE features SET geometry = ?2, min_x = ?3, min_y = ?4, max_x = ?5, max_y = ?6, updated_at = ?7
				WHERE id = ?1 RETURNING id, properties, geometry, created_at, updated_at"
			}
			UpdateFields::Both(..) => {
				"UPDATE features SET properties = ?2, geometry = ?3, min_x = ?4, min_y = ?5, max_x = ?6, max_y = ?7, updated_at = ?8
				WHERE id = ?1 RETURNING id, properties, geometry, created_at, updated_at"
			}
		}
	}
}

/// Reads, updates and deletes stored features. Every method is a single statement
/// in its own transaction.
#[derive(Clone, Debug)]
pub struct FeatureRepository {
	store: FeatureStore,
}

impl FeatureRepository {
	pub fn new(store: FeatureStore) -> Self {
		Self { store }
	}

	/// All features in ascending id order.
	pub fn list_all(&self) -> Result<GeoCollection, StoreError> {
		let sql = format!("SELECT {ROW_COLUMNS} FROM features ORDER BY id ASC");
		Ok(assemble_collection(self.query_rows(&sql, [])?))
	}

	/// Features whose bounding box intersects `bbox`, in ascending id order.
	pub fn find_in_bbox(&self, bbox: &BBox) -> Result<GeoCollection, StoreError> {
		let sql = format!(
			"SELECT {ROW_COLUMNS} FROM features WHERE id IN (
				SELECT id FROM features_index WHERE max_x >= ?1 AND min_x <= ?3 AND max_y >= ?2 AND min_y <= ?4
			) AND max_x >= ?1 AND min_x <= ?3 AND max_y >= ?2 AND min_y <= ?4
			ORDER BY id ASC"
		);
		let rows = self.query_rows(&sql, params![bbox.x_min, bbox.y_min, bbox.x_max, bbox.y_max])?;
		Ok(assemble_collection(rows))
	}

	pub fn get_by_id(&self, id: i64) -> Result<Option<GeoFeature>, StoreError> {
		Ok(self.get_row(id)?.map(assemble_feature))
	}

	/// The full row including timestamps, or `None`.
	pub fn get_row(&self, id: i64) -> Result<Option<StoredFeatureRow>, StoreError> {
		let sql = format!("SELECT {ROW_COLUMNS} FROM features WHERE id = ?1");
		Ok(self.query_rows(&sql, [id])?.pop())
	}

	/// Replaces the supplied fields wholesale and refreshes `updated_at`.
	///
	/// Properties are overwritten as a whole mapping, not merged per key. Returns `None` if no
	/// row has this id. Without any field this fails with [`StoreError::NoUpdateFields`] before
	/// touching the database; a geometry that cannot be encoded fails with
	/// [`StoreError::GeometryConstruction`] and leaves the row unchanged.
	pub fn update(
		&self,
		id: i64,
		properties: Option<GeoProperties>,
		geometry: Option<Geometry>,
	) -> Result<Option<GeoFeature>, StoreError> {
		let fields = UpdateFields::new(properties, geometry)?;
		self.apply_update(id, &fields)
	}

	pub fn apply_update(&self, id: i64, fields: &UpdateFields) -> Result<Option<GeoFeature>, StoreError> {
		let now = timestamp()?;
		let sql = fields.statement();
		let row = match fields {
			UpdateFields::PropertiesOnly(properties) => {
				let properties = properties_json(properties)?;
				self.query_rows(sql, params![id, properties, now])?
			}
			UpdateFields::GeometryOnly(geometry) => {
				let (blob, [min_x, min_y, max_x, max_y]) = encode_geometry_update(geometry)?;
				self.query_rows(sql, params![id, blob, min_x, min_y, max_x, max_y, now])?
			}
			UpdateFields::Both(properties, geometry) => {
				let properties = properties_json(properties)?;
				let (blob, [min_x, min_y, max_x, max_y]) = encode_geometry_update(geometry)?;
				self.query_rows(sql, params![id, properties, blob, min_x, min_y, max_x, max_y, now])?
			}
		}
		.pop();

		match &row {
			Some(_) => log::debug!("updated feature {id}"),
			None => log::debug!("update of missing feature {id}"),
		}
		Ok(row.map(assemble_feature))
	}

	/// `true` if a row was removed.
	#[context("deleting feature {id}")]
	fn delete_row(&self, id: i64) -> Result<bool> {
		let conn = self.store.connection()?;
		Ok(conn.execute("DELETE FROM features WHERE id = ?1", [id])? > 0)
	}

	pub fn delete_by_id(&self, id: i64) -> Result<bool, StoreError> {
		Ok(self.delete_row(id)?)
	}

	/// Removes every row and returns how many there were.
	pub fn delete_all(&self) -> Result<usize, StoreError> {
		let count = delete_everything(&*self.store.connection()?)?;
		log::info!("deleted all {count} features from '{}'", self.store.name());
		Ok(count)
	}

	pub fn count(&self) -> Result<u64, StoreError> {
		Ok(count_rows(&*self.store.connection()?)?)
	}

	#[context("querying features")]
	fn query_rows<P: Params>(&self, sql: &str, params: P) -> Result<Vec<StoredFeatureRow>> {
		let conn = self.store.connection()?;
		let mut statement = conn.prepare_cached(sql)?;
		let raw_rows = statement
			.query_map(params, RawRow::from_row)?
			.collect::<Result<Vec<_>, _>>()?;
		raw_rows.into_iter().map(StoredFeatureRow::try_from).collect()
	}
}

#[context("deleting all features")]
fn delete_everything(conn: &Connection) -> Result<usize> {
	Ok(conn.execute("DELETE FROM features", [])?)
}

#[context("counting features")]
fn count_rows(conn: &Connection) -> Result<u64> {
	let count: i64 = conn.query_row("SELECT COUNT(*) FROM features", [], |row| row.get(0))?;
	Ok(count as u64)
}

fn properties_json(properties: &GeoProperties) -> Result<String> {
	Ok(serde_json::to_string(&properties.to_json())?)
}

/// WKB blob and bounding box columns of a replacement geometry.
fn encode_geometry_update(geometry: &Geometry) -> Result<(Vec<u8>, [Option<f64>; 4]), StoreError> {
	let blob = encode_geometry(geometry).map_err(StoreError::GeometryConstruction)?;
	let bounds = geometry.compute_bounds().map_or([None; 4], |b| b.map(Some));
	Ok((blob, bounds))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{FeatureWriter, store::tests::temporary_store};
	use pretty_assertions::assert_eq;
	use serde_json::json;

	fn feature(name: &str, geometry: Geometry) -> GeoFeature {
		let mut feature = GeoFeature::new(geometry);
		feature.set_property("name", name);
		feature
	}

	fn seeded(features: &[GeoFeature]) -> (tempfile::TempDir, FeatureRepository) {
		let (dir, store) = temporary_store();
		FeatureWriter::new(store.clone()).bulk_insert(features).unwrap();
		(dir, FeatureRepository::new(store))
	}

	#[test]
	fn update_fields_state_machine() {
		let p = GeoProperties::new();
		let g = Geometry::new_point([0.0, 0.0]);
		assert_eq!(
			UpdateFields::new(Some(p.clone()), None).unwrap(),
			UpdateFields::PropertiesOnly(p.clone())
		);
		assert_eq!(
			UpdateFields::new(None, Some(g.clone())).unwrap(),
			UpdateFields::GeometryOnly(g.clone())
		);
		assert_eq!(
			UpdateFields::new(Some(p.clone()), Some(g.clone())).unwrap(),
			UpdateFields::Both(p, g)
		);
		assert!(matches!(UpdateFields::new(None, None), Err(StoreError::NoUpdateFields)));
	}

	#[test]
	fn list_all_on_empty_store() {
		let (_dir, repository) = seeded(&[]);
		assert!(repository.list_all().unwrap().is_empty());
		assert_eq!(repository.count().unwrap(), 0);
	}

	#[test]
	fn list_all_round_trips_features() {
		let input = vec![
			feature("A", Geometry::new_point([1.0, 2.0])),
			feature("B", Geometry::new_example()),
			feature("C", Geometry::new_line_string(vec![[0.0, 0.0], [1.0, 1.0]])),
		];
		let (_dir, repository) = seeded(&input);
		let stored = repository.list_all().unwrap().features;
		assert_eq!(stored.len(), 3);
		for (i, (stored, original)) in stored.iter().zip(&input).enumerate() {
			assert_eq!(stored.id, Some(i as i64 + 1));
			assert_eq!(stored.geometry, original.geometry);
			assert_eq!(stored.properties, original.properties);
		}
	}

	#[test]
	fn get_by_id() {
		let (_dir, repository) = seeded(&[feature("A", Geometry::new_point([1.0, 2.0]))]);
		let found = repository.get_by_id(1).unwrap().unwrap();
		assert_eq!(
			found.to_json(),
			json!({
				"type": "Feature",
				"id": 1,
				"properties": {"name": "A"},
				"geometry": {"type": "Point", "coordinates": [1.0, 2.0]}
			})
		);
		assert_eq!(repository.get_by_id(2).unwrap(), None);
		assert_eq!(repository.get_by_id(-1).unwrap(), None);
	}

	#[test]
	fn update_properties_replaces_whole_mapping() {
		let mut original = feature("A", Geometry::new_point([1.0, 2.0]));
		original.set_property("keep", "me?");
		let (_dir, repository) = seeded(&[original]);

		let properties = GeoProperties::from(vec![("other", json!(3))]);
		let updated = repository.update(1, Some(properties.clone()), None).unwrap().unwrap();
		assert_eq!(updated.properties, properties);
		assert_eq!(updated.geometry, Geometry::new_point([1.0, 2.0]));
		assert_eq!(repository.get_by_id(1).unwrap().unwrap().properties, properties);
	}

	#[test]
	fn update_geometry_keeps_properties_and_moves_index() {
		let (_dir, repository) = seeded(&[feature("A", Geometry::new_point([1.0, 2.0]))]);
		let moved = Geometry::new_point([50.0, 50.0]);
		let updated = repository.update(1, None, Some(moved.clone())).unwrap().unwrap();
		assert_eq!(updated.geometry, moved);
		assert_eq!(updated.properties.get("name"), Some(&json!("A")));

		let old_area = BBox::new(0.0, 0.0, 5.0, 5.0).unwrap();
		let new_area = BBox::new(49.0, 49.0, 51.0, 51.0).unwrap();
		assert!(repository.find_in_bbox(&old_area).unwrap().is_empty());
		assert_eq!(repository.find_in_bbox(&new_area).unwrap().len(), 1);
	}

	#[test]
	fn update_both_fields() {
		let (_dir, repository) = seeded(&[feature("A", Geometry::new_point([1.0, 2.0]))]);
		let properties = GeoProperties::from(vec![("name", json!("B"))]);
		let geometry = Geometry::new_line_string(vec![[0.0, 0.0], [3.0, 3.0]]);
		let updated = repository
			.update(1, Some(properties.clone()), Some(geometry.clone()))
			.unwrap()
			.unwrap();
		assert_eq!(updated.properties, properties);
		assert_eq!(updated.geometry, geometry);
	}

	#[test]
	fn update_refreshes_updated_at_only() {
		let (_dir, repository) = seeded(&[feature("A", Geometry::new_point([1.0, 2.0]))]);
		let before = repository.get_row(1).unwrap().unwrap();
		std::thread::sleep(std::time::Duration::from_millis(5));
		repository.update(1, Some(GeoProperties::new()), None).unwrap();
		let after = repository.get_row(1).unwrap().unwrap();
		assert_eq!(after.created_at, before.created_at);
		assert!(after.updated_at > before.updated_at);
	}

	#[test]
	fn update_without_fields_changes_nothing() {
		let (_dir, repository) = seeded(&[feature("A", Geometry::new_point([1.0, 2.0]))]);
		let before = repository.get_row(1).unwrap().unwrap();
		let err = repository.update(1, None, None).unwrap_err();
		assert!(matches!(err, StoreError::NoUpdateFields));
		assert_eq!(repository.get_row(1).unwrap().unwrap(), before);
	}

	#[test]
	fn update_with_malformed_geometry_leaves_row_unchanged() {
		let (_dir, repository) = seeded(&[feature("A", Geometry::new_point([1.0, 2.0]))]);
		let before = repository.get_row(1).unwrap().unwrap();
		let open_ring = Geometry::new_polygon(vec![vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]]);
		let err = repository
			.update(1, Some(GeoProperties::new()), Some(open_ring))
			.unwrap_err();
		assert!(matches!(err, StoreError::GeometryConstruction(_)));
		assert_eq!(repository.get_row(1).unwrap().unwrap(), before);
	}

	#[test]
	fn update_missing_id_is_none() {
		let (_dir, repository) = seeded(&[]);
		let result = repository.update(9, Some(GeoProperties::new()), None).unwrap();
		assert_eq!(result, None);
		assert_eq!(repository.count().unwrap(), 0);
	}

	#[test]
	fn delete_by_id() {
		let (_dir, repository) = seeded(&[
			feature("A", Geometry::new_point([1.0, 2.0])),
			feature("B", Geometry::new_point([3.0, 4.0])),
		]);
		assert!(repository.delete_by_id(1).unwrap());
		assert!(!repository.delete_by_id(1).unwrap());
		assert!(!repository.delete_by_id(42).unwrap());
		assert_eq!(repository.count().unwrap(), 1);
		assert_eq!(repository.list_all().unwrap().features[0].id, Some(2));
	}

	#[test]
	fn delete_all_then_count_is_zero() {
		let (_dir, repository) = seeded(&[
			feature("A", Geometry::new_point([1.0, 2.0])),
			feature("B", Geometry::new_point([3.0, 4.0])),
		]);
		assert_eq!(repository.delete_all().unwrap(), 2);
		assert_eq!(repository.count().unwrap(), 0);
		assert_eq!(repository.delete_all().unwrap(), 0);
		assert!(repository.find_in_bbox(&BBox::new(-180.0, -90.0, 180.0, 90.0).unwrap()).unwrap().is_empty());
	}

	#[test]
	fn ids_are_not_reused_after_delete() {
		let (_dir, store) = temporary_store();
		let writer = FeatureWriter::new(store.clone());
		let repository = FeatureRepository::new(store);
		writer.bulk_insert(&[feature("A", Geometry::new_point([0.0, 0.0]))]).unwrap();
		repository.delete_all().unwrap();
		writer.bulk_insert(&[feature("B", Geometry::new_point([0.0, 0.0]))]).unwrap();
		assert_eq!(repository.list_all().unwrap().features[0].id, Some(2));
	}

	#[test]
	fn find_in_bbox_filters_and_orders() {
		let (_dir, repository) = seeded(&[
			feature("in", Geometry::new_point([1.0, 1.0])),
			feature("out", Geometry::new_point([10.0, 10.0])),
			feature("crossing", Geometry::new_line_string(vec![[-5.0, 0.5], [5.0, 0.5]])),
			feature("touching", Geometry::new_point([2.0, 2.0])),
		]);
		let found = repository.find_in_bbox(&BBox::new(0.0, 0.0, 2.0, 2.0).unwrap()).unwrap();
		let names: Vec<_> = found
			.features
			.iter()
			.map(|f| f.properties.get("name").and_then(|v| v.as_str()).unwrap().to_string())
			.collect();
		assert_eq!(names, vec!["in", "crossing", "touching"]);
	}
}
