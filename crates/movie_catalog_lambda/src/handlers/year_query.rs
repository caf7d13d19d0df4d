use serde_json::{json, Value};
use tracing::{info, warn};

use crate::adapters::movie_store::MovieStore;
use crate::runtime::body_format::encode_body;
use crate::runtime::contract::{parse_year, ApiGatewayResponse, QueryRequest, YEAR_PARAMETER};
use crate::runtime::normalize::Rendering;
use crate::runtime::pagination::{collect_pages, PageLimit};

use super::{records_response, HandlerError};

/// Answers `GET ?year=<year>` with every movie released that year.
///
/// A missing, zero or non-numeric year yields a 400 without touching the
/// store. Store and serialization failures are returned as errors.
pub fn handle_year_query_event(
    event: Value,
    store: &dyn MovieStore,
    page_limit: PageLimit,
) -> Result<ApiGatewayResponse, HandlerError> {
    let request = QueryRequest::from_event(event);
    let year = match parse_year(&request) {
        Ok(value) => value,
        Err(error) => {
            warn!(
                raw_year = ?request.parameter(YEAR_PARAMETER),
                "rejecting year query: {error}"
            );
            let body = encode_body(&json!({ "message": error.message() }))?;
            return Ok(ApiGatewayResponse::new(400, body));
        }
    };

    info!(year, "querying movies by year");
    let collected = collect_pages(page_limit, |start| store.query_year_page(year, start))?;
    let response = records_response(&collected.records, Rendering::Truncating)?;
    info!(
        year,
        pages = collected.pages,
        records = collected.records.len(),
        "year query completed"
    );
    Ok(response)
}
