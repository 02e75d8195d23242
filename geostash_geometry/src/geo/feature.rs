use super::*;
use serde_json::{Map, Value};

/// One geometry with its attributes. `id` is assigned by the store.
#[derive(Clone, Debug, PartialEq)]
pub struct GeoFeature {
	pub id: Option<i64>,
	pub geometry: Geometry,
	pub properties: GeoProperties,
}

impl GeoFeature {
	pub fn new(geometry: Geometry) -> Self {
		Self {
			id: None,
			geometry,
			properties: GeoProperties::new(),
		}
	}

	pub fn set_id(&mut self, id: i64) {
		self.id = Some(id);
	}

	pub fn set_properties(&mut self, properties: GeoProperties) {
		self.properties = properties;
	}

	pub fn set_property<T: Into<Value>>(&mut self, key: &str, value: T) {
		self.properties.insert(key.to_string(), value.into());
	}

	/// The GeoJSON feature object; `id` is omitted while unassigned.
	pub fn to_json(&self) -> Value {
		let mut object = Map::new();
		object.insert("type".to_string(), Value::from("Feature"));
		if let Some(id) = self.id {
			object.insert("id".to_string(), Value::from(id));
		}
		object.insert("properties".to_string(), self.properties.to_json());
		object.insert("geometry".to_string(), self.geometry.to_json());
		Value::Object(object)
	}

	#[cfg(any(test, feature = "test"))]
	pub fn new_example() -> Self {
		Self {
			id: Some(13),
			geometry: Geometry::new_example(),
			properties: GeoProperties::from(vec![
				("name", Value::from("Nice")),
				("population", Value::from(348_085)),
				("is_nice", Value::from(true)),
			]),
		}
	}
}
