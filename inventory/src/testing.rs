use crate::error::{InventoryError, InventoryResult};
use crate::transport::{GraphQlRequest, GraphQlTransport};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Script {
    responses: VecDeque<(String, InventoryResult<Value>)>,
    requests: Vec<GraphQlRequest>,
}

/// Transport replaying canned responses in order.
///
/// Panics when a request arrives for a different operation than the next
/// scripted one, or when the script is exhausted.
#[derive(Clone, Default)]
pub(crate) struct ScriptedTransport {
    script: Arc<Mutex<Script>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(self, operation: &str, data: Value) -> Self {
        self.push(operation, Ok(data))
    }

    pub(crate) fn fail(self, operation: &str, error: InventoryError) -> Self {
        self.push(operation, Err(error))
    }

    fn push(self, operation: &str, result: InventoryResult<Value>) -> Self {
        self.script
            .lock()
            .unwrap()
            .responses
            .push_back((operation.to_string(), result));
        self
    }

    pub(crate) fn requests(&self) -> Vec<GraphQlRequest> {
        self.script.lock().unwrap().requests.clone()
    }

    pub(crate) fn remaining(&self) -> usize {
        self.script.lock().unwrap().responses.len()
    }
}

#[async_trait]
impl GraphQlTransport for ScriptedTransport {
    async fn execute(&self, request: GraphQlRequest) -> InventoryResult<Value> {
        let mut script = self.script.lock().unwrap();
        let (expected, result) = script
            .responses
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected request: {}", request.operation_name));
        assert_eq!(expected, request.operation_name, "operation out of order");
        script.requests.push(request);
        result
    }

    fn endpoint(&self) -> &str {
        "scripted"
    }
}
