use tracing::info;

use crate::adapters::movie_store::MovieStore;
use crate::runtime::contract::{ApiGatewayResponse, JSON_CONTENT_TYPE};
use crate::runtime::normalize::Rendering;
use crate::runtime::pagination::{collect_pages, PageLimit};

use super::{records_response, HandlerError};

/// Returns the whole catalog. Numbers keep their stored values and binary
/// attributes are written as base64.
pub fn handle_catalog_scan_event(
    store: &dyn MovieStore,
    page_limit: PageLimit,
) -> Result<ApiGatewayResponse, HandlerError> {
    info!("scanning movie catalog");
    let collected = collect_pages(page_limit, |start| store.scan_page(start))?;
    let response = records_response(&collected.records, Rendering::Exact)?
        .with_content_type(JSON_CONTENT_TYPE);
    info!(
        pages = collected.pages,
        records = collected.records.len(),
        "catalog scan completed"
    );
    Ok(response)
}
