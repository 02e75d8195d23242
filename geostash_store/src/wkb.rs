//! ISO WKB, the store-native geometry representation.
//!
//! Only 2D geometries exist in the store. Blobs are written little-endian; both byte orders
//! are accepted when reading.

use anyhow::{Result, bail, ensure};
use byteorder::{BigEndian, LittleEndian, ReadBytesExt, WriteBytesExt};
use geostash_geometry::{
	Coordinates, Geometry, GeometryType, LineStringGeometry, MultiLineStringGeometry, MultiPointGeometry,
	MultiPolygonGeometry, PointGeometry, PolygonGeometry, RingGeometry,
};
use std::io::Cursor;

const LITTLE_ENDIAN: u8 = 1;
const BIG_ENDIAN: u8 = 0;

fn type_code(geometry_type: GeometryType) -> u32 {
	match geometry_type {
		GeometryType::Point => 1,
		GeometryType::LineString => 2,
		GeometryType::Polygon => 3,
		GeometryType::MultiPoint => 4,
		GeometryType::MultiLineString => 5,
		GeometryType::MultiPolygon => 6,
		GeometryType::GeometryCollection => 7,
	}
}

fn geometry_type(code: u32) -> Result<GeometryType> {
	Ok(match code {
		1 => GeometryType::Point,
		2 => GeometryType::LineString,
		3 => GeometryType::Polygon,
		4 => GeometryType::MultiPoint,
		5 => GeometryType::MultiLineString,
		6 => GeometryType::MultiPolygon,
		7 => GeometryType::GeometryCollection,
		_ => bail!("unsupported WKB geometry type {code}"),
	})
}

/// Interchange → store-native. The geometry is verified first, so anything that comes back
/// out of the store is well-formed.
pub fn encode_geometry(geometry: &Geometry) -> Result<Vec<u8>> {
	geometry.verify()?;
	let mut buffer = Vec::new();
	write_geometry(&mut buffer, geometry)?;
	Ok(buffer)
}

fn write_header(buffer: &mut Vec<u8>, geometry_type: GeometryType) -> Result<()> {
	buffer.write_u8(LITTLE_ENDIAN)?;
	buffer.write_u32::<LittleEndian>(type_code(geometry_type))?;
	Ok(())
}

fn write_count(buffer: &mut Vec<u8>, count: usize) -> Result<()> {
	buffer.write_u32::<LittleEndian>(u32::try_from(count)?)?;
	Ok(())
}

fn write_positions(buffer: &mut Vec<u8>, coords: &[Coordinates]) -> Result<()> {
	write_count(buffer, coords.len())?;
	for c in coords {
		buffer.write_f64::<LittleEndian>(c.x())?;
		buffer.write_f64::<LittleEndian>(c.y())?;
	}
	Ok(())
}

fn write_geometry(buffer: &mut Vec<u8>, geometry: &Geometry) -> Result<()> {
	write_header(buffer, geometry.get_type())?;
	match geometry {
		Geometry::Point(p) => {
			buffer.write_f64::<LittleEndian>(p.x())?;
			buffer.write_f64::<LittleEndian>(p.y())?;
		}
		Geometry::LineString(line) => write_positions(buffer, &line.0)?,
		Geometry::Polygon(polygon) => write_rings(buffer, polygon)?,
		Geometry::MultiPoint(multi) => {
			write_count(buffer, multi.0.len())?;
			for point in &multi.0 {
				write_header(buffer, GeometryType::Point)?;
				buffer.write_f64::<LittleEndian>(point.x())?;
				buffer.write_f64::<LittleEndian>(point.y())?;
			}
		}
		Geometry::MultiLineString(multi) => {
			write_count(buffer, multi.0.len())?;
			for line in &multi.0 {
				write_header(buffer, GeometryType::LineString)?;
				write_positions(buffer, &line.0)?;
			}
		}
		Geometry::MultiPolygon(multi) => {
			write_count(buffer, multi.0.len())?;
			for polygon in &multi.0 {
				write_header(buffer, GeometryType::Polygon)?;
				write_rings(buffer, polygon)?;
			}
		}
		Geometry::GeometryCollection(members) => {
			write_count(buffer, members.len())?;
			for member in members {
				write_geometry(buffer, member)?;
			}
		}
	}
	Ok(())
}

fn write_rings(buffer: &mut Vec<u8>, polygon: &PolygonGeometry) -> Result<()> {
	write_count(buffer, polygon.0.len())?;
	for ring in &polygon.0 {
		write_positions(buffer, &ring.0)?;
	}
	Ok(())
}

/// Store-native → interchange. Rejects truncated blobs, trailing bytes and unknown type codes.
pub fn decode_geometry(blob: &[u8]) -> Result<Geometry> {
	let mut reader = WkbReader {
		cursor: Cursor::new(blob),
		big_endian: false,
	};
	let geometry = reader.read_geometry()?;
	ensure!(
		reader.cursor.position() == blob.len() as u64,
		"{} trailing bytes after WKB geometry",
		blob.len() as u64 - reader.cursor.position()
	);
	Ok(geometry)
}

struct WkbReader<'a> {
	cursor: Cursor<&'a [u8]>,
	big_endian: bool,
}

impl WkbReader<'_> {
	fn read_header(&mut self) -> Result<GeometryType> {
		self.big_endian = match self.cursor.read_u8()? {
			LITTLE_ENDIAN => false,
			BIG_ENDIAN => true,
			other => bail!("invalid WKB byte order marker {other}"),
		};
		let code = self.read_u32()?;
		geometry_type(code)
	}

	fn read_u32(&mut self) -> Result<u32> {
		Ok(if self.big_endian {
			self.cursor.read_u32::<BigEndian>()?
		} else {
			self.cursor.read_u32::<LittleEndian>()?
		})
	}

	fn read_f64(&mut self) -> Result<f64> {
		Ok(if self.big_endian {
			self.cursor.read_f64::<BigEndian>()?
		} else {
			self.cursor.read_f64::<LittleEndian>()?
		})
	}

	/// Element count, bounded by what the remaining bytes could possibly hold.
	fn read_count(&mut self, min_element_size: usize) -> Result<usize> {
		let count = self.read_u32()? as usize;
		let remaining = self.cursor.get_ref().len() - self.cursor.position() as usize;
		ensure!(
			count.saturating_mul(min_element_size) <= remaining,
			"WKB count {count} exceeds the remaining {remaining} bytes"
		);
		Ok(count)
	}

	fn read_coordinates(&mut self) -> Result<Coordinates> {
		let x = self.read_f64()?;
		let y = self.read_f64()?;
		Ok(Coordinates::new(x, y))
	}

	fn read_positions(&mut self) -> Result<Vec<Coordinates>> {
		let count = self.read_count(16)?;
		(0..count).map(|_| self.read_coordinates()).collect()
	}

	fn read_rings(&mut self) -> Result<PolygonGeometry> {
		let count = self.read_count(4)?;
		let rings = (0..count)
			.map(|_| self.read_positions().map(RingGeometry))
			.collect::<Result<_>>()?;
		Ok(PolygonGeometry(rings))
	}

	/// Reads a member of a multi geometry, which must carry its own header of the given type.
	fn read_member(&mut self, expected: GeometryType) -> Result<Geometry> {
		let geometry = self.read_geometry()?;
		ensure!(
			geometry.get_type() == expected,
			"expected {expected} member, found {}",
			geometry.get_type()
		);
		Ok(geometry)
	}

	fn read_geometry(&mut self) -> Result<Geometry> {
		let geometry_type = self.read_header()?;
		Ok(match geometry_type {
			GeometryType::Point => Geometry::Point(PointGeometry(self.read_coordinates()?)),
			GeometryType::LineString => Geometry::LineString(LineStringGeometry(self.read_positions()?)),
			GeometryType::Polygon => Geometry::Polygon(self.read_rings()?),
			GeometryType::MultiPoint => {
				let count = self.read_count(21)?;
				let mut points = Vec::with_capacity(count);
				for _ in 0..count {
					if let Geometry::Point(p) = self.read_member(GeometryType::Point)? {
						points.push(p);
					}
				}
				Geometry::MultiPoint(MultiPointGeometry(points))
			}
			GeometryType::MultiLineString => {
				let count = self.read_count(9)?;
				let mut lines = Vec::with_capacity(count);
				for _ in 0..count {
					if let Geometry::LineString(l) = self.read_member(GeometryType::LineString)? {
						lines.push(l);
					}
				}
				Geometry::MultiLineString(MultiLineStringGeometry(lines))
			}
			GeometryType::MultiPolygon => {
				let count = self.read_count(9)?;
				let mut polygons = Vec::with_capacity(count);
				for _ in 0..count {
					if let Geometry::Polygon(p) = self.read_member(GeometryType::Polygon)? {
						polygons.push(p);
					}
				}
				Geometry::MultiPolygon(MultiPolygonGeometry(polygons))
			}
			GeometryType::GeometryCollection => {
				let count = self.read_count(5)?;
				let members = (0..count).map(|_| self.read_geometry()).collect::<Result<_>>()?;
				Geometry::GeometryCollection(members)
			}
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	#[test]
	fn point_layout() {
		let blob = encode_geometry(&Geometry::new_point([1.0, 2.0])).unwrap();
		let mut expected = vec![1, 1, 0, 0, 0];
		expected.extend_from_slice(&1.0f64.to_le_bytes());
		expected.extend_from_slice(&2.0f64.to_le_bytes());
		assert_eq!(blob, expected);
	}

	#[rstest]
	#[case::point(Geometry::new_point([1.0, 2.0]))]
	#[case::multi_point(Geometry::new_multi_point(vec![[1.0, 2.0], [3.0, 4.0]]))]
	#[case::line_string(Geometry::new_line_string(vec![[0.0, 0.0], [1.0, 1.0], [2.0, 0.5]]))]
	#[case::multi_line_string(Geometry::new_multi_line_string(vec![vec![[0.0, 0.0], [1.0, 1.0]], vec![[2.0, 2.0], [3.0, 3.0]]]))]
	#[case::polygon(Geometry::new_polygon(vec![vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]))]
	#[case::multi_polygon(Geometry::new_example())]
	#[case::nested_collection(Geometry::new_collection(vec![
		Geometry::new_point([1.0, 2.0]),
		Geometry::new_collection(vec![Geometry::new_example()]),
	]))]
	fn stored_geometry_reads_back(#[case] geometry: Geometry) {
		let blob = encode_geometry(&geometry).unwrap();
		assert_eq!(decode_geometry(&blob).unwrap(), geometry);
	}

	#[test]
	fn reads_big_endian() {
		let mut blob = vec![0, 0, 0, 0, 2, 0, 0, 0, 2];
		for v in [0.0f64, 1.0, 2.0, 3.0] {
			blob.extend_from_slice(&v.to_be_bytes());
		}
		assert_eq!(
			decode_geometry(&blob).unwrap(),
			Geometry::new_line_string(vec![[0.0, 1.0], [2.0, 3.0]])
		);
	}

	#[test]
	fn encode_rejects_invalid_geometry() {
		let open_ring = Geometry::new_polygon(vec![vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]]);
		let err = encode_geometry(&open_ring).unwrap_err();
		assert!(format!("{err:#}").contains("ring must be closed"));
	}

	#[rstest]
	#[case::empty(vec![], "failed to fill whole buffer")]
	#[case::bad_marker(vec![7, 1, 0, 0, 0], "byte order marker")]
	#[case::unknown_type(vec![1, 17, 0, 0, 0], "unsupported WKB geometry type 17")]
	#[case::truncated_point(vec![1, 1, 0, 0, 0, 0, 0, 0, 0], "failed to fill whole buffer")]
	#[case::huge_count(vec![1, 2, 0, 0, 0, 255, 255, 255, 255], "exceeds the remaining")]
	fn decode_rejects_malformed_blobs(#[case] blob: Vec<u8>, #[case] message: &str) {
		let err = decode_geometry(&blob).unwrap_err().to_string();
		assert!(err.contains(message), "'{err}' does not contain '{message}'");
	}

	#[test]
	fn decode_rejects_mismatched_members() {
		// a MultiPoint whose only member is a one-position LineString
		let mut blob = vec![1, 4, 0, 0, 0, 1, 0, 0, 0, 1, 2, 0, 0, 0, 1, 0, 0, 0];
		blob.extend_from_slice(&[0u8; 16]);
		let err = decode_geometry(&blob).unwrap_err().to_string();
		assert_eq!(err, "expected Point member, found LineString");
	}

	#[test]
	fn decode_rejects_trailing_bytes() {
		let mut blob = encode_geometry(&Geometry::new_point([1.0, 2.0])).unwrap();
		blob.push(0);
		assert!(decode_geometry(&blob).unwrap_err().to_string().contains("1 trailing bytes"));
	}
}
