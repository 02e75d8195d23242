use anyhow::{Result, bail};
use serde_json::{Map, Value};
use std::fmt::Debug;

/// Attribute mapping of a feature: string keys to arbitrary JSON values.
#[derive(Clone, Default, PartialEq)]
pub struct GeoProperties(Map<String, Value>);

impl GeoProperties {
	#[must_use]
	pub fn new() -> GeoProperties {
		GeoProperties(Map::new())
	}

	/// Accepts a JSON object; anything else is rejected.
	pub fn from_json(value: Value) -> Result<GeoProperties> {
		match value {
			Value::Object(map) => Ok(GeoProperties(map)),
			other => bail!("properties must be a JSON object, got {other}"),
		}
	}

	pub fn insert(&mut self, key: String, value: Value) {
		self.0.insert(key, value);
	}
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.0.get(key)
	}
	pub fn remove(&mut self, key: &str) -> Option<Value> {
		self.0.remove(key)
	}
	pub fn len(&self) -> usize {
		self.0.len()
	}
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
	pub fn iter(&self) -> serde_json::map::Iter<'_> {
		self.0.iter()
	}

	/// Drops every top-level key whose value is `null`. Other keys, including nested
	/// objects that themselves contain nulls, are left untouched.
	#[must_use]
	pub fn sanitized(mut self) -> GeoProperties {
		self.0.retain(|_, value| !value.is_null());
		self
	}

	#[must_use]
	pub fn to_json(&self) -> Value {
		Value::Object(self.0.clone())
	}

	#[must_use]
	pub fn into_json(self) -> Value {
		Value::Object(self.0)
	}
}

impl Debug for GeoProperties {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_map().entries(self.0.iter()).finish()
	}
}

impl FromIterator<(String, Value)> for GeoProperties {
	fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
		GeoProperties(iter.into_iter().collect())
	}
}

impl From<Vec<(&str, Value)>> for GeoProperties {
	fn from(value: Vec<(&str, Value)>) -> Self {
		value.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
	}
}

impl IntoIterator for GeoProperties {
	type Item = (String, Value);
	type IntoIter = serde_json::map::IntoIter;
	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}
