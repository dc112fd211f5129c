//! Recording fake gateway shared by the use case tests

use crate::ports::dataset_gateway::{DatasetGateway, GatewayError};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

/// Answers every request with the same canned response and records it
pub struct FakeGateway {
    response: Result<Value, GatewayError>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeGateway {
    pub fn responding(response: Value) -> Self {
        Self {
            response: Ok(response),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: GatewayError) -> Self {
        Self {
            response: Err(error),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_body(&self) -> Option<Value> {
        self.calls.lock().unwrap().last().and_then(|c| c.body.clone())
    }

    fn record(&self, method: &'static str, path: &str, body: Option<&Value>) -> Result<Value, GatewayError> {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            path: path.to_string(),
            body: body.cloned(),
        });
        self.response.clone()
    }
}

#[async_trait]
impl DatasetGateway for FakeGateway {
    async fn get_json(&self, path: &str) -> Result<Value, GatewayError> {
        self.record("GET", path, None)
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, GatewayError> {
        self.record("POST", path, Some(body))
    }
}
