//! GraphQL documents understood by the inventory service.
//!
//! Every operation is a zero-sized marker type implementing [`Operation`],
//! pairing its document with the shape of its variables and of its `data`
//! object.

use crate::types::{Location, LocationType};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub trait Operation {
    /// Operation name sent as `operationName`.
    const NAME: &'static str;
    /// Root field selected by the document, used when reporting.
    const ROOT_FIELD: &'static str;
    const DOCUMENT: &'static str;

    type Variables: Serialize + Send + Sync;
    type Response: DeserializeOwned;
}

#[derive(Debug, Clone, Serialize)]
pub struct IdVariables {
    pub id: String,
}

impl IdVariables {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdRef {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationTypeRef {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationNode {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub location_type: Option<LocationTypeRef>,
}

impl LocationNode {
    pub fn type_name(&self) -> Option<&str> {
        self.location_type.as_ref().map(|t| t.name.as_str())
    }
}

impl From<LocationNode> for Location {
    fn from(node: LocationNode) -> Self {
        Location {
            name: node.name,
            id: node.id,
            external_id: node.external_id,
        }
    }
}

/// Value assigned to one property of a location.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyInput {
    #[serde(rename = "propertyTypeID")]
    pub property_type_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub string_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub int_value: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boolean_value: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub float_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range_from_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range_to_value: Option<f64>,
}

// Search

pub struct SearchQuery;

#[derive(Debug, Clone, Serialize)]
pub struct SearchVariables {
    pub name: String,
    pub first: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchData {
    pub search_for_entity: SearchConnection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchConnection {
    #[serde(default)]
    pub edges: Vec<SearchEdge>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchEdge {
    pub node: Option<SearchNode>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchNode {
    pub entity_id: String,
    pub entity_type: String,
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

impl SearchNode {
    pub fn is_location(&self) -> bool {
        self.entity_type == "location"
    }
}

impl Operation for SearchQuery {
    const NAME: &'static str = "SearchQuery";
    const ROOT_FIELD: &'static str = "searchForEntity";
    const DOCUMENT: &'static str = r#"query SearchQuery($name: String!, $first: Int) {
  searchForEntity(name: $name, first: $first) {
    edges {
      node {
        entityId
        entityType
        name
        type
      }
    }
  }
}"#;

    type Variables = SearchVariables;
    type Response = SearchData;
}

// Location details

pub struct LocationDetailsQuery;

#[derive(Debug, Clone, Deserialize)]
pub struct LocationDetailsData {
    pub location: Option<LocationNode>,
}

impl Operation for LocationDetailsQuery {
    const NAME: &'static str = "LocationDetailsQuery";
    const ROOT_FIELD: &'static str = "location";
    const DOCUMENT: &'static str = r#"query LocationDetailsQuery($id: ID!) {
  location: node(id: $id) {
    ... on Location {
      id
      name
      externalId
      locationType {
        name
      }
    }
  }
}"#;

    type Variables = IdVariables;
    type Response = LocationDetailsData;
}

// Location children

pub struct LocationChildrenQuery;

#[derive(Debug, Clone, Deserialize)]
pub struct LocationChildrenData {
    pub location: Option<LocationChildren>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationChildren {
    #[serde(default)]
    pub children: Vec<LocationNode>,
}

impl Operation for LocationChildrenQuery {
    const NAME: &'static str = "LocationChildrenQuery";
    const ROOT_FIELD: &'static str = "location";
    const DOCUMENT: &'static str = r#"query LocationChildrenQuery($id: ID!) {
  location: node(id: $id) {
    ... on Location {
      children {
        id
        name
        externalId
        locationType {
          name
        }
      }
    }
  }
}"#;

    type Variables = IdVariables;
    type Response = LocationChildrenData;
}

// Location dependencies

pub struct LocationDepsQuery;

#[derive(Debug, Clone, Deserialize)]
pub struct LocationDepsData {
    pub location: Option<LocationDeps>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationDeps {
    #[serde(default)]
    pub files: Vec<IdRef>,
    #[serde(default)]
    pub children: Vec<IdRef>,
    #[serde(default)]
    pub surveys: Vec<IdRef>,
    #[serde(default)]
    pub equipments: Vec<IdRef>,
}

impl Operation for LocationDepsQuery {
    const NAME: &'static str = "LocationDepsQuery";
    const ROOT_FIELD: &'static str = "location";
    const DOCUMENT: &'static str = r#"query LocationDepsQuery($id: ID!) {
  location: node(id: $id) {
    ... on Location {
      files {
        id
      }
      children {
        id
      }
      surveys {
        id
      }
      equipments {
        id
      }
    }
  }
}"#;

    type Variables = IdVariables;
    type Response = LocationDepsData;
}

// Location documents

pub struct LocationDocumentsQuery;

#[derive(Debug, Clone, Deserialize)]
pub struct LocationDocumentsData {
    pub location: Option<LocationFiles>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationFiles {
    #[serde(default)]
    pub files: Vec<FileNode>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileNode {
    pub id: String,
    pub file_name: String,
}

impl Operation for LocationDocumentsQuery {
    const NAME: &'static str = "LocationDocumentsQuery";
    const ROOT_FIELD: &'static str = "location";
    const DOCUMENT: &'static str = r#"query LocationDocumentsQuery($id: ID!) {
  location: node(id: $id) {
    ... on Location {
      files {
        id
        fileName
      }
    }
  }
}"#;

    type Variables = IdVariables;
    type Response = LocationDocumentsData;
}

// Location types

pub struct LocationTypesQuery;

#[derive(Debug, Clone, Serialize)]
pub struct LocationTypesVariables {
    pub first: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationTypesData {
    pub location_types: Option<LocationTypeConnection>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationTypeConnection {
    #[serde(default)]
    pub edges: Vec<LocationTypeEdge>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationTypeEdge {
    pub node: Option<LocationType>,
}

impl Operation for LocationTypesQuery {
    const NAME: &'static str = "LocationTypesQuery";
    const ROOT_FIELD: &'static str = "locationTypes";
    const DOCUMENT: &'static str = r#"query LocationTypesQuery($first: Int) {
  locationTypes(first: $first) {
    edges {
      node {
        id
        name
        propertyTypes {
          id
          name
          type
        }
      }
    }
  }
}"#;

    type Variables = LocationTypesVariables;
    type Response = LocationTypesData;
}

// Mutations

#[derive(Debug, Clone, Serialize)]
pub struct InputVariables<T> {
    pub input: T,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddLocationInput {
    pub name: String,
    #[serde(rename = "type")]
    pub location_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    pub properties: Vec<PropertyInput>,
    #[serde(rename = "externalID", skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

pub struct AddLocationMutation;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddLocationData {
    pub add_location: LocationNode,
}

impl Operation for AddLocationMutation {
    const NAME: &'static str = "AddLocationMutation";
    const ROOT_FIELD: &'static str = "addLocation";
    const DOCUMENT: &'static str = r#"mutation AddLocationMutation($input: AddLocationInput!) {
  addLocation(input: $input) {
    id
    name
    externalId
    locationType {
      name
    }
  }
}"#;

    type Variables = InputVariables<AddLocationInput>;
    type Response = AddLocationData;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditLocationInput {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub properties: Vec<PropertyInput>,
    #[serde(rename = "externalID")]
    pub external_id: Option<String>,
}

pub struct EditLocationMutation;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditLocationData {
    pub edit_location: LocationNode,
}

impl Operation for EditLocationMutation {
    const NAME: &'static str = "EditLocationMutation";
    const ROOT_FIELD: &'static str = "editLocation";
    const DOCUMENT: &'static str = r#"mutation EditLocationMutation($input: EditLocationInput!) {
  editLocation(input: $input) {
    id
    name
    externalId
  }
}"#;

    type Variables = InputVariables<EditLocationInput>;
    type Response = EditLocationData;
}

pub struct MoveLocationMutation;

#[derive(Debug, Clone, Serialize)]
pub struct MoveLocationVariables {
    #[serde(rename = "locationID")]
    pub location_id: String,
    #[serde(rename = "parentLocationID")]
    pub parent_location_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveLocationData {
    pub move_location: LocationNode,
}

impl Operation for MoveLocationMutation {
    const NAME: &'static str = "MoveLocationMutation";
    const ROOT_FIELD: &'static str = "moveLocation";
    const DOCUMENT: &'static str = r#"mutation MoveLocationMutation($locationID: ID!, $parentLocationID: ID) {
  moveLocation(locationID: $locationID, parentLocationID: $parentLocationID) {
    id
    name
    externalId
  }
}"#;

    type Variables = MoveLocationVariables;
    type Response = MoveLocationData;
}

pub struct RemoveLocationMutation;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveLocationData {
    pub remove_location: String,
}

impl Operation for RemoveLocationMutation {
    const NAME: &'static str = "RemoveLocationMutation";
    const ROOT_FIELD: &'static str = "removeLocation";
    const DOCUMENT: &'static str = r#"mutation RemoveLocationMutation($id: ID!) {
  removeLocation(id: $id)
}"#;

    type Variables = IdVariables;
    type Response = RemoveLocationData;
}
