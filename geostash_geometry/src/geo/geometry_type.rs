use anyhow::{Result, bail};
use serde::Serialize;
use std::{fmt, str::FromStr};

/// The `type` tag of a [`Geometry`](super::Geometry).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum GeometryType {
	Point,
	MultiPoint,
	LineString,
	MultiLineString,
	Polygon,
	MultiPolygon,
	GeometryCollection,
}

impl GeometryType {
	pub const ALL: [GeometryType; 7] = [
		GeometryType::Point,
		GeometryType::MultiPoint,
		GeometryType::LineString,
		GeometryType::MultiLineString,
		GeometryType::Polygon,
		GeometryType::MultiPolygon,
		GeometryType::GeometryCollection,
	];

	#[must_use]
	pub fn as_str(&self) -> &'static str {
		match self {
			GeometryType::Point => "Point",
			GeometryType::MultiPoint => "MultiPoint",
			GeometryType::LineString => "LineString",
			GeometryType::MultiLineString => "MultiLineString",
			GeometryType::Polygon => "Polygon",
			GeometryType::MultiPolygon => "MultiPolygon",
			GeometryType::GeometryCollection => "GeometryCollection",
		}
	}
}

impl fmt::Display for GeometryType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for GeometryType {
	type Err = anyhow::Error;

	fn from_str(s: &str) -> Result<Self> {
		match GeometryType::ALL.into_iter().find(|t| t.as_str() == s) {
			Some(t) => Ok(t),
			None => bail!("unknown geometry type '{s}'"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn names_round_trip() {
		for t in GeometryType::ALL {
			assert_eq!(t.as_str().parse::<GeometryType>().unwrap(), t);
			assert_eq!(t.to_string(), t.as_str());
		}
	}

	#[test]
	fn tags_are_case_sensitive() {
		assert!("point".parse::<GeometryType>().is_err());
		assert!("Circle".parse::<GeometryType>().is_err());
	}

	#[test]
	fn serializes_as_name() {
		assert_eq!(serde_json::to_string(&GeometryType::MultiPolygon).unwrap(), "\"MultiPolygon\"");
	}
}
