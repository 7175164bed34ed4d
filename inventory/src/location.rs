//! Location operations: hierarchy lookups, creation, edits, moves,
//! guarded deletes and attached documents.
//!
//! A hierarchy is a list of `(location type, location name)` pairs, from
//! the outermost location down, e.g.
//! `[("Country", "England"), ("City", "Milton Keynes"), ("Site", "Bletchley Park")]`.
//! The first pair is resolved with a global search; each following pair
//! among the children of the previous location.

use crate::client::InventoryClient;
use crate::error::{InventoryError, InventoryResult, LocationDependency};
use crate::operations::{
    AddLocationInput, AddLocationMutation, EditLocationInput, EditLocationMutation, IdVariables,
    InputVariables, LocationChildrenQuery, LocationDepsQuery, LocationDetailsQuery,
    LocationDocumentsQuery, LocationNode, MoveLocationMutation, MoveLocationVariables,
    RemoveLocationMutation, SearchNode, SearchQuery, SearchVariables,
};
use crate::properties::properties_to_inputs;
use crate::types::{Document, ImageEntity, Location, PropertyValue};
use std::collections::HashMap;
use tracing::{debug, info};

fn not_found(id: &str) -> InventoryError {
    InventoryError::EntityNotFound {
        entity: "location",
        id: id.to_string(),
    }
}

impl InventoryClient {
    /// Resolves the location at the end of `hierarchy`.
    ///
    /// The hierarchy may be partial, `[("Site", "Bletchley Park")]` works as
    /// long as exactly one site of that name exists.
    pub async fn get_location(&self, hierarchy: &[(&str, &str)]) -> InventoryResult<Location> {
        let mut last: Option<Location> = None;

        for (location_type, name) in hierarchy {
            let found = self.find_unique(last.as_ref(), location_type, name).await?;
            last = Some(found.ok_or_else(|| InventoryError::LocationNotFound {
                name: Some(name.to_string()),
                location_type: Some(location_type.to_string()),
            })?);
        }

        last.ok_or(InventoryError::LocationNotFound {
            name: None,
            location_type: None,
        })
    }

    /// Returns the direct children of a location.
    pub async fn get_location_children(&self, location_id: &str) -> InventoryResult<Vec<Location>> {
        let children = self.child_nodes(location_id).await?;
        Ok(children.into_iter().map(Location::from).collect())
    }

    /// Resolves `hierarchy`, creating every missing location along the way.
    ///
    /// Properties, coordinates and the external id only apply to the last
    /// element, and only when it gets created. An existing location is
    /// returned unchanged.
    pub async fn add_location(
        &self,
        hierarchy: &[(&str, &str)],
        properties: &HashMap<String, PropertyValue>,
        latitude: Option<f64>,
        longitude: Option<f64>,
        external_id: Option<&str>,
    ) -> InventoryResult<Location> {
        let Some(((last_type, _), _)) = hierarchy.split_last() else {
            return Err(InventoryError::LocationNotFound {
                name: None,
                location_type: None,
            });
        };
        let mut final_properties = properties_to_inputs(self.location_type(last_type)?, properties)?;

        let mut last: Option<Location> = None;
        for (index, (location_type, name)) in hierarchy.iter().enumerate() {
            if let Some(existing) = self.find_unique(last.as_ref(), location_type, name).await? {
                last = Some(existing);
                continue;
            }

            let is_final = index + 1 == hierarchy.len();
            let input = AddLocationInput {
                name: name.to_string(),
                location_type: self.location_type(location_type)?.id.clone(),
                parent: last.as_ref().map(|parent| parent.id.clone()),
                latitude: latitude.filter(|_| is_final),
                longitude: longitude.filter(|_| is_final),
                properties: if is_final {
                    std::mem::take(&mut final_properties)
                } else {
                    Vec::new()
                },
                external_id: external_id.filter(|_| is_final).map(str::to_string),
            };

            debug!("Creating {} {}", location_type, name);
            let created = self
                .execute::<AddLocationMutation>(InputVariables { input })
                .await?;
            last = Some(created.add_location.into());
        }

        last.ok_or(InventoryError::LocationNotFound {
            name: None,
            location_type: None,
        })
    }

    pub async fn edit_location(
        &self,
        location: &Location,
        new_name: &str,
        new_latitude: f64,
        new_longitude: f64,
        new_external_id: Option<&str>,
    ) -> InventoryResult<Location> {
        let input = EditLocationInput {
            id: location.id.clone(),
            name: new_name.to_string(),
            latitude: new_latitude,
            longitude: new_longitude,
            properties: Vec::new(),
            external_id: new_external_id.map(str::to_string),
        };

        let edited = self
            .execute::<EditLocationMutation>(InputVariables { input })
            .await?;
        Ok(edited.edit_location.into())
    }

    /// Removes a location that has no files, children, surveys or equipment.
    pub async fn delete_location(&self, location: &Location) -> InventoryResult<()> {
        let deps = self
            .execute::<LocationDepsQuery>(IdVariables::new(&location.id))
            .await?
            .location
            .ok_or_else(|| not_found(&location.id))?;

        let blocking = [
            (LocationDependency::Files, deps.files.len()),
            (LocationDependency::Children, deps.children.len()),
            (LocationDependency::Surveys, deps.surveys.len()),
            (LocationDependency::Equipment, deps.equipments.len()),
        ]
        .into_iter()
        .find(|(_, count)| *count > 0);

        if let Some((dependency, _)) = blocking {
            return Err(InventoryError::LocationCannotBeDeleted {
                name: location.name.clone(),
                dependency,
            });
        }

        self.execute::<RemoveLocationMutation>(IdVariables::new(&location.id))
            .await?;
        info!("Removed location {} ({})", location.name, location.id);
        Ok(())
    }

    /// Moves a location under a new parent, or to the top level when
    /// `new_parent_id` is `None`.
    pub async fn move_location(
        &self,
        location_id: &str,
        new_parent_id: Option<&str>,
    ) -> InventoryResult<Location> {
        let variables = MoveLocationVariables {
            location_id: location_id.to_string(),
            parent_location_id: new_parent_id.map(str::to_string),
        };

        let moved = self.execute::<MoveLocationMutation>(variables).await?;
        Ok(moved.move_location.into())
    }

    pub async fn get_locations_by_external_id(
        &self,
        external_id: &str,
    ) -> InventoryResult<Vec<Location>> {
        let mut locations = Vec::new();

        for node in self.search_location_nodes(external_id).await? {
            let details = self.location_details(&node.entity_id).await?;
            if details.external_id.as_deref() == Some(external_id) {
                locations.push(details);
            }
        }

        Ok(locations)
    }

    pub async fn get_location_documents(&self, location: &Location) -> InventoryResult<Vec<Document>> {
        let files = self
            .execute::<LocationDocumentsQuery>(IdVariables::new(&location.id))
            .await?
            .location
            .ok_or_else(|| not_found(&location.id))?
            .files;

        Ok(files
            .into_iter()
            .map(|file| Document {
                name: file.file_name,
                id: file.id,
                parent_id: location.id.clone(),
                parent_entity: ImageEntity::Location,
            })
            .collect())
    }

    /// Looks up the single location of `location_type` named `name`, either
    /// globally or among the children of `parent`.
    ///
    /// No match is `Ok(None)`; more than one is an error.
    async fn find_unique(
        &self,
        parent: Option<&Location>,
        location_type: &str,
        name: &str,
    ) -> InventoryResult<Option<Location>> {
        let not_unique = || InventoryError::LocationNotUnique {
            name: name.to_string(),
            location_type: location_type.to_string(),
        };

        match parent {
            None => {
                debug!("Searching for {} {}", location_type, name);
                let mut matches: Vec<SearchNode> = self
                    .search_location_nodes(name)
                    .await?
                    .into_iter()
                    .filter(|node| node.type_name == location_type && node.name == name)
                    .collect();

                match matches.len() {
                    0 => Ok(None),
                    1 => {
                        let node = matches.remove(0);
                        self.location_details(&node.entity_id).await.map(Some)
                    }
                    _ => Err(not_unique()),
                }
            }
            Some(parent) => {
                debug!("Looking for {} {} under {}", location_type, name, parent.id);
                let mut matches: Vec<LocationNode> = self
                    .child_nodes(&parent.id)
                    .await?
                    .into_iter()
                    .filter(|child| child.type_name() == Some(location_type) && child.name == name)
                    .collect();

                match matches.len() {
                    0 => Ok(None),
                    1 => Ok(Some(matches.remove(0).into())),
                    _ => Err(not_unique()),
                }
            }
        }
    }

    async fn search_location_nodes(&self, text: &str) -> InventoryResult<Vec<SearchNode>> {
        let data = self
            .execute::<SearchQuery>(SearchVariables {
                name: text.to_string(),
                first: self.search_page_size(),
            })
            .await?;

        Ok(data
            .search_for_entity
            .edges
            .into_iter()
            .filter_map(|edge| edge.node)
            .filter(SearchNode::is_location)
            .collect())
    }

    async fn location_details(&self, id: &str) -> InventoryResult<Location> {
        self.execute::<LocationDetailsQuery>(IdVariables::new(id))
            .await?
            .location
            .map(Location::from)
            .ok_or_else(|| not_found(id))
    }

    async fn child_nodes(&self, id: &str) -> InventoryResult<Vec<LocationNode>> {
        Ok(self
            .execute::<LocationChildrenQuery>(IdVariables::new(id))
            .await?
            .location
            .ok_or_else(|| not_found(id))?
            .children)
    }
}
