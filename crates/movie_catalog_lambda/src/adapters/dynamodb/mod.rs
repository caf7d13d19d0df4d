//! DynamoDB-backed `MovieStore`.
//!
//! The SDK is async while handlers are not, so each request blocks the
//! current worker with `block_in_place`. This needs the multi-threaded
//! tokio runtime.

mod conversions;
mod error;

use std::future::Future;

use aws_sdk_dynamodb::types::AttributeValue;
use tracing::debug;

use conversions::{
    item_to_record, last_evaluated_key_to_token, token_to_exclusive_start_key, Item,
};

use crate::adapters::movie_store::MovieStore;
use crate::config::CatalogConfig;
use crate::runtime::contract::YEAR_PARAMETER;
use crate::runtime::error::StoreError;
use crate::runtime::record::{ContinuationToken, ResultPage};

use error::{map_query_error, map_scan_error, QUERY_OPERATION, SCAN_OPERATION};

const YEAR_KEY_CONDITION: &str = "#year = :year";
const YEAR_NAME_PLACEHOLDER: &str = "#year";
const YEAR_VALUE_PLACEHOLDER: &str = ":year";

#[derive(Debug, Clone)]
pub struct DynamoMovieStore {
    client: aws_sdk_dynamodb::Client,
    table_name: String,
    year_index: String,
}

impl DynamoMovieStore {
    pub fn new(client: aws_sdk_dynamodb::Client, config: &CatalogConfig) -> Self {
        Self {
            client,
            table_name: config.table_name.clone(),
            year_index: config.year_index.clone(),
        }
    }
}

impl MovieStore for DynamoMovieStore {
    fn query_year_page(
        &self,
        year: i64,
        start: Option<&ContinuationToken>,
    ) -> Result<ResultPage, StoreError> {
        let exclusive_start_key = start.map(token_to_exclusive_start_key).transpose()?;
        let request = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name(&self.year_index)
            .key_condition_expression(YEAR_KEY_CONDITION)
            .expression_attribute_names(YEAR_NAME_PLACEHOLDER, YEAR_PARAMETER)
            .expression_attribute_values(
                YEAR_VALUE_PLACEHOLDER,
                AttributeValue::N(year.to_string()),
            )
            .set_exclusive_start_key(exclusive_start_key);

        let output = block_on_store(request.send()).map_err(map_query_error)?;
        let page = build_page(output.items, output.last_evaluated_key)?;
        debug!(
            operation = QUERY_OPERATION,
            table = %self.table_name,
            index = %self.year_index,
            year,
            items = page.records.len(),
            has_more = page.has_more(),
            "fetched page"
        );
        Ok(page)
    }

    fn scan_page(&self, start: Option<&ContinuationToken>) -> Result<ResultPage, StoreError> {
        let exclusive_start_key = start.map(token_to_exclusive_start_key).transpose()?;
        let request = self
            .client
            .scan()
            .table_name(&self.table_name)
            .set_exclusive_start_key(exclusive_start_key);

        let output = block_on_store(request.send()).map_err(map_scan_error)?;
        let page = build_page(output.items, output.last_evaluated_key)?;
        debug!(
            operation = SCAN_OPERATION,
            table = %self.table_name,
            items = page.records.len(),
            has_more = page.has_more(),
            "fetched page"
        );
        Ok(page)
    }
}

fn build_page(
    items: Option<Vec<Item>>,
    last_evaluated_key: Option<Item>,
) -> Result<ResultPage, StoreError> {
    let records = items
        .unwrap_or_default()
        .into_iter()
        .map(item_to_record)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ResultPage {
        records,
        continuation: last_evaluated_key_to_token(last_evaluated_key)?,
    })
}

fn block_on_store<F: Future>(request: F) -> F::Output {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(request))
}
