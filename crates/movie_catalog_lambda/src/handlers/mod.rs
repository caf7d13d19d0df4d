pub mod catalog_scan;
pub mod year_query;

use crate::runtime::body_format::encode_body;
use crate::runtime::contract::ApiGatewayResponse;
use crate::runtime::error::StoreError;
use crate::runtime::normalize::{normalize_records, NormalizeError, Rendering};
use crate::runtime::record::MovieRecord;

/// Failures that are not turned into an HTTP response and instead fail the
/// invocation.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("failed to serialize records: {0}")]
    Normalize(#[from] NormalizeError),
    #[error("failed to encode response body: {0}")]
    Encode(#[from] serde_json::Error),
}

fn records_response(
    records: &[MovieRecord],
    rendering: Rendering,
) -> Result<ApiGatewayResponse, HandlerError> {
    let body = encode_body(&normalize_records(records, rendering)?)?;
    Ok(ApiGatewayResponse::new(200, body))
}
