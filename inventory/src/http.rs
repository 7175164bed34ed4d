use crate::config::InventoryConfig;
use crate::error::{InventoryError, InventoryResult};
use crate::transport::{GraphQlRequest, GraphQlResponse, GraphQlTransport};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

/// GraphQL transport that POSTs JSON to the inventory endpoint.
pub struct HttpTransport {
    client: reqwest::Client,
    config: InventoryConfig,
}

impl HttpTransport {
    pub fn new(config: InventoryConfig) -> InventoryResult<Self> {
        config
            .validate()
            .map_err(|msg| InventoryError::InvalidConfig { message: msg })?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| InventoryError::InvalidConfig {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self { client, config })
    }

    pub fn with_default_config() -> InventoryResult<Self> {
        Self::new(InventoryConfig::default())
    }

    pub fn config(&self) -> &InventoryConfig {
        &self.config
    }

    fn handle_http_error(err: reqwest::Error) -> InventoryError {
        if err.is_timeout() {
            InventoryError::ServiceUnavailable {
                message: "Request timeout".to_string(),
            }
        } else if err.is_connect() {
            InventoryError::ServiceUnavailable {
                message: "Cannot connect to inventory service".to_string(),
            }
        } else {
            InventoryError::Network(err)
        }
    }
}

#[async_trait]
impl GraphQlTransport for HttpTransport {
    async fn execute(&self, request: GraphQlRequest) -> InventoryResult<Value> {
        debug!("Sending {} to {}", request.operation_name, self.config.endpoint);

        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(Self::handle_http_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("{} returned {}", request.operation_name, status);
            return match status.as_u16() {
                401 | 403 => Err(InventoryError::Authentication),
                code => Err(InventoryError::Http { status: code, body }),
            };
        }

        let body = response.text().await.map_err(Self::handle_http_error)?;
        let envelope: GraphQlResponse = serde_json::from_str(&body)?;
        envelope.into_data(&request.operation_name)
    }

    fn endpoint(&self) -> &str {
        &self.config.endpoint
    }
}
