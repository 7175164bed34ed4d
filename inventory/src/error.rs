use crate::types::PropertyKind;
use std::fmt;
use thiserror::Error;

/// Dependency category that prevents a location from being removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationDependency {
    Files,
    Children,
    Surveys,
    Equipment,
}

impl LocationDependency {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationDependency::Files => "files",
            LocationDependency::Children => "children",
            LocationDependency::Surveys => "surveys",
            LocationDependency::Equipment => "equipment",
        }
    }
}

impl fmt::Display for LocationDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn describe_location(name: &Option<String>, location_type: &Option<String>) -> String {
    match (location_type, name) {
        (Some(location_type), Some(name)) => format!("of type {location_type} named {name}"),
        (None, Some(name)) => format!("named {name}"),
        (Some(location_type), None) => format!("of type {location_type}"),
        (None, None) => "for an empty hierarchy".to_string(),
    }
}

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("Location not found {}", describe_location(.name, .location_type))]
    LocationNotFound {
        name: Option<String>,
        location_type: Option<String>,
    },

    #[error("More than one location of type {location_type} named {name}")]
    LocationNotUnique { name: String, location_type: String },

    #[error("Location {name} cannot be deleted because it has {dependency}")]
    LocationCannotBeDeleted {
        name: String,
        dependency: LocationDependency,
    },

    #[error("Operation {operation} failed: {message} (error id: {error_id})")]
    FailedOperation {
        message: String,
        error_id: String,
        operation: String,
        payload: serde_json::Value,
    },

    #[error("No {entity} with id {id}")]
    EntityNotFound { entity: &'static str, id: String },

    #[error("Unknown location type: {name}")]
    UnknownLocationType { name: String },

    #[error("Location type {location_type} has no property named {property}")]
    UnknownProperty {
        property: String,
        location_type: String,
    },

    #[error("Property {property} expects a value of kind {expected}")]
    PropertyTypeMismatch {
        property: String,
        expected: PropertyKind,
    },

    #[error("Invalid {kind} value: {value}")]
    InvalidPropertyValue { kind: PropertyKind, value: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Service unavailable: {message}")]
    ServiceUnavailable { message: String },

    #[error("Authentication failed")]
    Authentication,

    #[error("Inventory API returned {status}: {body}")]
    Http { status: u16, body: String },

    #[error("GraphQL error: {message}")]
    GraphQl { message: String, error_id: String },

    #[error("Response to {operation} carried no data")]
    MissingData { operation: String },
}

pub type InventoryResult<T> = Result<T, InventoryError>;
