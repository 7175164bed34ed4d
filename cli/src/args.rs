use inventory::{InventoryConfig, InventoryError, InventoryResult, LocationType, PropertyValue};
use std::collections::HashMap;
use std::path::Path;

/// Parses a `Key=Value` argument.
pub fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in '{}'", raw));
    }

    Ok((key.to_string(), value.to_string()))
}

pub fn as_hierarchy(path: &[(String, String)]) -> Vec<(&str, &str)> {
    path.iter()
        .map(|(location_type, name)| (location_type.as_str(), name.as_str()))
        .collect()
}

/// Parses raw `--property` values according to the property kinds of
/// `location_type`.
pub fn parse_properties(
    location_type: &LocationType,
    raw: &[(String, String)],
) -> InventoryResult<HashMap<String, PropertyValue>> {
    raw.iter()
        .map(|(name, value)| {
            let property_type =
                location_type
                    .property_type(name)
                    .ok_or_else(|| InventoryError::UnknownProperty {
                        property: name.clone(),
                        location_type: location_type.name.clone(),
                    })?;
            Ok((name.clone(), property_type.kind.parse_value(value)?))
        })
        .collect()
}

/// Reads the configuration file if one is given, then applies the
/// endpoint override.
pub fn load_config(
    path: Option<&Path>,
    endpoint: Option<String>,
) -> Result<InventoryConfig, Box<dyn std::error::Error>> {
    let mut config = match path {
        Some(path) => {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str(&contents)?
        }
        None => InventoryConfig::default(),
    };

    if let Some(endpoint) = endpoint {
        config.endpoint = endpoint;
    }

    config.validate()?;
    Ok(config)
}
