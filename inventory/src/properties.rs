use crate::error::{InventoryError, InventoryResult};
use crate::operations::PropertyInput;
use crate::types::{LocationType, PropertyKind, PropertyValue};
use chrono::NaiveDate;
use std::collections::HashMap;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Converts caller supplied property values into mutation inputs for
/// `location_type`, sorted by property name.
pub fn properties_to_inputs(
    location_type: &LocationType,
    values: &HashMap<String, PropertyValue>,
) -> InventoryResult<Vec<PropertyInput>> {
    let mut names: Vec<&String> = values.keys().collect();
    names.sort();

    names
        .into_iter()
        .map(|name| {
            let property_type = location_type.property_type(name).ok_or_else(|| {
                InventoryError::UnknownProperty {
                    property: name.clone(),
                    location_type: location_type.name.clone(),
                }
            })?;
            property_input(name, property_type.id.clone(), property_type.kind, &values[name])
        })
        .collect()
}

fn property_input(
    name: &str,
    property_type_id: String,
    kind: PropertyKind,
    value: &PropertyValue,
) -> InventoryResult<PropertyInput> {
    let mut input = PropertyInput {
        property_type_id,
        ..Default::default()
    };

    match (kind, value) {
        (PropertyKind::String | PropertyKind::Email | PropertyKind::Enum, PropertyValue::String(s)) => {
            input.string_value = Some(s.clone());
        }
        (PropertyKind::Int, PropertyValue::Int(i)) => input.int_value = Some(*i),
        (PropertyKind::Float, PropertyValue::Float(f)) => input.float_value = Some(*f),
        (PropertyKind::Float, PropertyValue::Int(i)) => input.float_value = Some(*i as f64),
        (PropertyKind::Bool, PropertyValue::Bool(b)) => input.boolean_value = Some(*b),
        (PropertyKind::Date, PropertyValue::Date(d)) => {
            input.string_value = Some(d.format(DATE_FORMAT).to_string());
        }
        (PropertyKind::GpsLocation, PropertyValue::LatLng(lat, lng)) => {
            input.latitude_value = Some(*lat);
            input.longitude_value = Some(*lng);
        }
        (PropertyKind::Range, PropertyValue::Range(from, to)) => {
            input.range_from_value = Some(*from);
            input.range_to_value = Some(*to);
        }
        _ => {
            return Err(InventoryError::PropertyTypeMismatch {
                property: name.to_string(),
                expected: kind,
            })
        }
    }

    Ok(input)
}

fn parse_pair(raw: &str) -> Option<(f64, f64)> {
    let (first, second) = raw.split_once(',')?;
    Some((first.trim().parse().ok()?, second.trim().parse().ok()?))
}

impl PropertyKind {
    /// Parses textual input into a value of this kind.
    ///
    /// Coordinates and ranges are written as two comma separated numbers.
    pub fn parse_value(&self, raw: &str) -> InventoryResult<PropertyValue> {
        let invalid = || InventoryError::InvalidPropertyValue {
            kind: *self,
            value: raw.to_string(),
        };
        let trimmed = raw.trim();

        match self {
            PropertyKind::String | PropertyKind::Email | PropertyKind::Enum => {
                Ok(PropertyValue::String(raw.to_string()))
            }
            PropertyKind::Int => trimmed.parse().map(PropertyValue::Int).map_err(|_| invalid()),
            PropertyKind::Float => trimmed
                .parse()
                .map(PropertyValue::Float)
                .map_err(|_| invalid()),
            PropertyKind::Bool => match trimmed.to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" => Ok(PropertyValue::Bool(true)),
                "false" | "no" | "0" => Ok(PropertyValue::Bool(false)),
                _ => Err(invalid()),
            },
            PropertyKind::Date => NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
                .map(PropertyValue::Date)
                .map_err(|_| invalid()),
            PropertyKind::GpsLocation => parse_pair(trimmed)
                .map(|(lat, lng)| PropertyValue::LatLng(lat, lng))
                .ok_or_else(invalid),
            PropertyKind::Range => parse_pair(trimmed)
                .map(|(from, to)| PropertyValue::Range(from, to))
                .ok_or_else(invalid),
            PropertyKind::Unsupported => Err(invalid()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PropertyType;

    fn site_type() -> LocationType {
        let property = |id: &str, name: &str, kind| PropertyType {
            id: id.to_string(),
            name: name.to_string(),
            kind,
        };
        LocationType {
            id: "t-site".to_string(),
            name: "Site".to_string(),
            property_types: vec![
                property("p1", "Owner", PropertyKind::Email),
                property("p2", "Floors", PropertyKind::Int),
                property("p3", "Height", PropertyKind::Float),
                property("p4", "Opened", PropertyKind::Date),
                property("p5", "Position", PropertyKind::GpsLocation),
                property("p6", "Active", PropertyKind::Bool),
                property("p7", "Signal", PropertyKind::Range),
            ],
        }
    }

    #[test]
    fn test_properties_are_converted_and_sorted() {
        let mut values = HashMap::new();
        values.insert("Position".to_string(), PropertyValue::LatLng(51.99, -0.74));
        values.insert("Floors".to_string(), PropertyValue::Int(3));
        values.insert(
            "Opened".to_string(),
            PropertyValue::Date(NaiveDate::from_ymd_opt(1938, 5, 1).unwrap()),
        );
        values.insert("Height".to_string(), PropertyValue::Int(12));

        let inputs = properties_to_inputs(&site_type(), &values).unwrap();
        let ids: Vec<_> = inputs.iter().map(|i| i.property_type_id.as_str()).collect();
        assert_eq!(ids, vec!["p2", "p3", "p4", "p5"]);

        assert_eq!(inputs[0].int_value, Some(3));
        assert_eq!(inputs[1].float_value, Some(12.0));
        assert_eq!(inputs[2].string_value, Some("1938-05-01".to_string()));
        assert_eq!(inputs[3].latitude_value, Some(51.99));
        assert_eq!(inputs[3].longitude_value, Some(-0.74));
    }

    #[test]
    fn test_unknown_property_is_rejected() {
        let mut values = HashMap::new();
        values.insert("Color".to_string(), PropertyValue::from("red"));

        let err = properties_to_inputs(&site_type(), &values).unwrap_err();
        assert!(matches!(
            err,
            InventoryError::UnknownProperty { ref property, ref location_type }
                if property == "Color" && location_type == "Site"
        ));
    }

    #[test]
    fn test_mismatched_value_is_rejected() {
        let mut values = HashMap::new();
        values.insert("Floors".to_string(), PropertyValue::from("three"));

        let err = properties_to_inputs(&site_type(), &values).unwrap_err();
        assert!(matches!(
            err,
            InventoryError::PropertyTypeMismatch {
                expected: PropertyKind::Int,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(
            PropertyKind::Int.parse_value("42").unwrap(),
            PropertyValue::Int(42)
        );
        assert_eq!(
            PropertyKind::Bool.parse_value("Yes").unwrap(),
            PropertyValue::Bool(true)
        );
        assert_eq!(
            PropertyKind::GpsLocation.parse_value("51.99, -0.74").unwrap(),
            PropertyValue::LatLng(51.99, -0.74)
        );
        assert_eq!(
            PropertyKind::Range.parse_value("1,5").unwrap(),
            PropertyValue::Range(1.0, 5.0)
        );
        assert_eq!(
            PropertyKind::Date.parse_value("2020-02-29").unwrap(),
            PropertyValue::Date(NaiveDate::from_ymd_opt(2020, 2, 29).unwrap())
        );

        assert!(PropertyKind::Int.parse_value("4.5").is_err());
        assert!(PropertyKind::GpsLocation.parse_value("51.99").is_err());
        assert!(PropertyKind::Unsupported.parse_value("x").is_err());
    }
}
