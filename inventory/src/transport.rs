use crate::error::{InventoryError, InventoryResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of a GraphQL POST request.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlRequest {
    pub query: String,
    pub operation_name: String,
    pub variables: Value,
}

impl GraphQlRequest {
    pub fn new(query: impl Into<String>, operation_name: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            operation_name: operation_name.into(),
            variables: Value::Object(Default::default()),
        }
    }

    pub fn with_variables(mut self, variables: Value) -> Self {
        self.variables = variables;
        self
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(default)]
    pub extensions: Option<serde_json::Map<String, Value>>,
}

impl GraphQlError {
    /// Identifier the service attached to this error, if any.
    pub fn error_id(&self) -> String {
        let Some(extensions) = &self.extensions else {
            return String::new();
        };

        ["errorId", "code"]
            .iter()
            .find_map(|key| match extensions.get(*key) {
                Some(Value::String(s)) => Some(s.clone()),
                Some(Value::Number(n)) => Some(n.to_string()),
                _ => None,
            })
            .unwrap_or_default()
    }
}

impl GraphQlResponse {
    /// Returns the `data` object, turning the first reported error into
    /// [`InventoryError::GraphQl`].
    pub fn into_data(self, operation: &str) -> InventoryResult<Value> {
        if let Some(error) = self.errors.as_ref().and_then(|errors| errors.first()) {
            return Err(InventoryError::GraphQl {
                message: error.message.clone(),
                error_id: error.error_id(),
            });
        }

        match self.data {
            Some(Value::Null) | None => Err(InventoryError::MissingData {
                operation: operation.to_string(),
            }),
            Some(data) => Ok(data),
        }
    }
}

/// Sends GraphQL documents to the inventory service.
#[async_trait]
pub trait GraphQlTransport: Send + Sync {
    /// Executes one request and returns its `data` object.
    async fn execute(&self, request: GraphQlRequest) -> InventoryResult<Value>;

    fn endpoint(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serialization() {
        let request = GraphQlRequest::new("query Q { x }", "Q").with_variables(json!({"id": "1"}));
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"query": "query Q { x }", "operationName": "Q", "variables": {"id": "1"}})
        );
    }

    #[test]
    fn test_into_data_returns_data() {
        let response: GraphQlResponse =
            serde_json::from_value(json!({"data": {"removeLocation": "1"}})).unwrap();
        let data = response.into_data("RemoveLocationMutation").unwrap();
        assert_eq!(data, json!({"removeLocation": "1"}));
    }

    #[test]
    fn test_into_data_surfaces_first_error() {
        let response: GraphQlResponse = serde_json::from_value(json!({
            "data": null,
            "errors": [
                {"message": "location name already exists", "extensions": {"errorId": "E42"}},
                {"message": "second"}
            ]
        }))
        .unwrap();

        match response.into_data("AddLocationMutation") {
            Err(InventoryError::GraphQl { message, error_id }) => {
                assert_eq!(message, "location name already exists");
                assert_eq!(error_id, "E42");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_into_data_without_data() {
        let response: GraphQlResponse = serde_json::from_value(json!({"data": null})).unwrap();
        assert!(matches!(
            response.into_data("SearchQuery"),
            Err(InventoryError::MissingData { .. })
        ));
    }

    #[test]
    fn test_error_id_fallbacks() {
        let error: GraphQlError = serde_json::from_value(json!({
            "message": "boom",
            "extensions": {"code": "INTERNAL"}
        }))
        .unwrap();
        assert_eq!(error.error_id(), "INTERNAL");

        let error: GraphQlError = serde_json::from_value(json!({"message": "boom"})).unwrap();
        assert_eq!(error.error_id(), "");
    }
}
