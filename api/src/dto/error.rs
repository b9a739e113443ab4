//! Error response body shared by all endpoints.

use actix_web::{http::StatusCode, HttpResponse};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Unified error response structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Field-level details, if available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Vec<String>>>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Attach field-level details
    pub fn with_details(mut self, details: HashMap<String, Vec<String>>) -> Self {
        self.details = Some(details);
        self
    }

    /// Render as an HTTP response with the given status
    pub fn to_response(&self, status: StatusCode) -> HttpResponse {
        HttpResponse::build(status).json(self)
    }
}
