use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const YEAR_PARAMETER: &str = "year";
pub const MISSING_YEAR_MESSAGE: &str = "Year parameter is missing or invalid";
pub const DEFAULT_TABLE_NAME: &str = "movies";
pub const DEFAULT_YEAR_INDEX: &str = "year-index";
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Inbound HTTP-style event. Only the query string is read.
///
/// Parameter values are kept as raw JSON so one malformed entry does not
/// hide the others.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct QueryRequest {
    #[serde(rename = "queryStringParameters", default)]
    pub query_string_parameters: Option<HashMap<String, Value>>,
}

impl QueryRequest {
    /// Decodes a raw trigger event. Anything that does not look like an
    /// HTTP event decodes to a request without parameters.
    pub fn from_event(event: Value) -> Self {
        serde_json::from_value(event).unwrap_or_default()
    }

    pub fn with_year(year: impl Into<String>) -> Self {
        Self {
            query_string_parameters: Some(HashMap::from([(
                YEAR_PARAMETER.to_string(),
                Value::String(year.into()),
            )])),
        }
    }

    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.query_string_parameters
            .as_ref()
            .and_then(|params| params.get(name))
            .and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Value>,
    pub body: String,
}

impl ApiGatewayResponse {
    pub fn new(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            status_code,
            headers: None,
            body: body.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: &str) -> Self {
        self.headers = Some(serde_json::json!({ "Content-Type": content_type }));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn missing_year() -> Self {
        Self::new(MISSING_YEAR_MESSAGE)
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Reads the `year` query parameter.
///
/// Absent, unparseable and zero values are all rejected: zero doubles as
/// the "missing" sentinel, so year 0 cannot be queried.
pub fn parse_year(request: &QueryRequest) -> Result<i64, ValidationError> {
    let raw = request.parameter(YEAR_PARAMETER).unwrap_or("0");
    match raw.trim().parse::<i64>() {
        Ok(0) | Err(_) => Err(ValidationError::missing_year()),
        Ok(year) => Ok(year),
    }
}
