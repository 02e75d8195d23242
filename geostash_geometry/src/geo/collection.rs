use super::GeoFeature;
use serde_json::{Value, json};

/// Ordered features; order is preserved through every conversion.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeoCollection {
	pub features: Vec<GeoFeature>,
}

impl GeoCollection {
	#[must_use]
	pub fn len(&self) -> usize {
		self.features.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.features.is_empty()
	}

	/// The GeoJSON `FeatureCollection` object.
	#[must_use]
	pub fn to_json(&self) -> Value {
		json!({
			"type": "FeatureCollection",
			"features": self.features.iter().map(GeoFeature::to_json).collect::<Vec<_>>(),
		})
	}
}

impl From<Vec<GeoFeature>> for GeoCollection {
	fn from(features: Vec<GeoFeature>) -> Self {
		Self { features }
	}
}

impl IntoIterator for GeoCollection {
	type Item = GeoFeature;
	type IntoIter = std::vec::IntoIter<GeoFeature>;
	fn into_iter(self) -> Self::IntoIter {
		self.features.into_iter()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::Geometry;

	#[test]
	fn empty_collection() {
		let collection = GeoCollection::default();
		assert!(collection.is_empty());
		assert_eq!(collection.to_json(), json!({"type": "FeatureCollection", "features": []}));
	}

	#[test]
	fn preserves_order() {
		let features: Vec<GeoFeature> = (1..=3)
			.map(|i| {
				let mut f = GeoFeature::new(Geometry::new_point([f64::from(i), 0.0]));
				f.set_id(i64::from(i));
				f
			})
			.collect();
		let collection = GeoCollection::from(features);
		assert_eq!(collection.len(), 3);
		let ids: Vec<_> = collection.to_json()["features"]
			.as_array()
			.unwrap()
			.iter()
			.map(|f| f["id"].as_i64().unwrap())
			.collect();
		assert_eq!(ids, vec![1, 2, 3]);
		assert_eq!(collection.into_iter().map(|f| f.id).collect::<Vec<_>>(), vec![Some(1), Some(2), Some(3)]);
	}
}
