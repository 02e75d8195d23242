use crate::GeoProperties;
use serde_json::Value;
use shapefile::dbase::{FieldValue, Record};
use std::collections::HashMap;

/// Converts one attribute-table row, keeping the order of `columns`. Empty fields become `null`;
/// they are kept here and stripped later by the normalizer.
pub fn record_to_properties(mut record: Record, columns: &[String]) -> GeoProperties {
	let mut properties: GeoProperties = columns
		.iter()
		.filter_map(|name| record.remove(name).map(|value| (name.clone(), field_to_json(value))))
		.collect();
	for (name, value) in HashMap::<String, FieldValue>::from(record) {
		properties.insert(name, field_to_json(value));
	}
	properties
}

fn field_to_json(value: FieldValue) -> Value {
	match value {
		FieldValue::Character(text) => text.map_or(Value::Null, Value::from),
		FieldValue::Memo(text) => Value::from(text),
		FieldValue::Numeric(number) => number.map_or(Value::Null, number_to_json),
		FieldValue::Float(number) => number.map_or(Value::Null, |n| number_to_json(f64::from(n))),
		FieldValue::Double(number) => number_to_json(number),
		FieldValue::Currency(number) => Value::from(number),
		FieldValue::Integer(number) => Value::from(number),
		FieldValue::Logical(flag) => flag.map_or(Value::Null, Value::from),
		FieldValue::Date(date) => date.map_or(Value::Null, |d| {
			Value::from(format!("{:04}-{:02}-{:02}", d.year(), d.month(), d.day()))
		}),
		FieldValue::DateTime(datetime) => {
			let (d, t) = (datetime.date(), datetime.time());
			Value::from(format!(
				"{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
				d.year(),
				d.month(),
				d.day(),
				t.hours(),
				t.minutes(),
				t.seconds()
			))
		}
		#[allow(unreachable_patterns)]
		other => Value::from(format!("{other:?}")),
	}
}

/// Whole numbers within the exactly representable range come out as JSON integers,
/// so a numeric column holding `5` reads back as `5`, not `5.0`. Non-finite values become `null`.
fn number_to_json(number: f64) -> Value {
	const EXACT: f64 = 9_007_199_254_740_992.0;
	if number.fract() == 0.0 && number.abs() < EXACT {
		Value::from(number as i64)
	} else {
		Value::from(number)
	}
}
