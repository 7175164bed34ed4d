use crate::config::InventoryConfig;
use crate::error::{InventoryError, InventoryResult};
use crate::http::HttpTransport;
use crate::operations::{LocationTypesQuery, LocationTypesVariables, Operation};
use crate::transport::{GraphQlRequest, GraphQlTransport};
use crate::types::LocationType;
use std::collections::HashMap;
use tracing::{debug, error, info};

const LOCATION_TYPES_PAGE_SIZE: u32 = 500;

/// Handle over one inventory service.
///
/// Holds the transport and the registry of location types the service
/// knows about, which is needed to create locations.
pub struct InventoryClient {
    transport: Box<dyn GraphQlTransport>,
    location_types: HashMap<String, LocationType>,
    search_page_size: u32,
}

impl InventoryClient {
    pub fn new(transport: Box<dyn GraphQlTransport>) -> Self {
        Self {
            transport,
            location_types: HashMap::new(),
            search_page_size: InventoryConfig::default().search_page_size,
        }
    }

    /// Connects over HTTP and loads the location type registry.
    pub async fn connect(config: InventoryConfig) -> InventoryResult<Self> {
        let search_page_size = config.search_page_size;
        let transport = HttpTransport::new(config)?;

        let mut client = Self::new(Box::new(transport)).with_search_page_size(search_page_size);
        let loaded = client.refresh_location_types().await?;
        info!("Connected to {} ({} location types)", client.endpoint(), loaded);

        Ok(client)
    }

    pub fn with_search_page_size(mut self, search_page_size: u32) -> Self {
        self.search_page_size = search_page_size;
        self
    }

    pub fn with_location_types(mut self, location_types: impl IntoIterator<Item = LocationType>) -> Self {
        self.location_types = location_types
            .into_iter()
            .map(|t| (t.name.clone(), t))
            .collect();
        self
    }

    pub fn endpoint(&self) -> &str {
        self.transport.endpoint()
    }

    pub(crate) fn search_page_size(&self) -> u32 {
        self.search_page_size
    }

    /// Replaces the location type registry with the service's current types.
    pub async fn refresh_location_types(&mut self) -> InventoryResult<usize> {
        let data = self
            .execute::<LocationTypesQuery>(LocationTypesVariables {
                first: LOCATION_TYPES_PAGE_SIZE,
            })
            .await?;

        self.location_types = data
            .location_types
            .map(|connection| connection.edges)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|edge| edge.node)
            .map(|t| (t.name.clone(), t))
            .collect();

        debug!("Loaded {} location types", self.location_types.len());
        Ok(self.location_types.len())
    }

    pub fn location_type(&self, name: &str) -> InventoryResult<&LocationType> {
        self.location_types
            .get(name)
            .ok_or_else(|| InventoryError::UnknownLocationType {
                name: name.to_string(),
            })
    }

    pub fn location_types(&self) -> Vec<&LocationType> {
        let mut types: Vec<_> = self.location_types.values().collect();
        types.sort_by(|a, b| a.name.cmp(&b.name));
        types
    }

    /// Runs one operation and decodes its `data` object.
    ///
    /// Errors reported by the service are returned as
    /// [`InventoryError::FailedOperation`] carrying the variables sent.
    pub async fn execute<O: Operation>(&self, variables: O::Variables) -> InventoryResult<O::Response> {
        let payload = serde_json::to_value(&variables)?;
        let is_mutation = O::DOCUMENT.starts_with("mutation");

        debug!("Executing {}", O::NAME);
        let request = GraphQlRequest::new(O::DOCUMENT, O::NAME).with_variables(payload.clone());

        let data = match self.transport.execute(request).await {
            Ok(data) => data,
            Err(InventoryError::GraphQl { message, error_id }) => {
                error!(
                    operation = O::ROOT_FIELD,
                    error_id = %error_id,
                    payload = %payload,
                    "Operation failed: {}",
                    message
                );
                return Err(InventoryError::FailedOperation {
                    message,
                    error_id,
                    operation: O::ROOT_FIELD.to_string(),
                    payload,
                });
            }
            Err(e) => return Err(e),
        };

        let response: O::Response = serde_json::from_value(data)?;

        if is_mutation {
            info!(operation = O::ROOT_FIELD, payload = %payload, "Operation succeeded");
        }

        Ok(response)
    }
}
