use lambda_runtime::{service_fn, Error, LambdaEvent};
use movie_catalog_lambda::adapters::dynamodb::DynamoMovieStore;
use movie_catalog_lambda::config::CatalogConfig;
use movie_catalog_lambda::handlers::year_query::handle_year_query_event;
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_runtime::tracing::init_default_subscriber();

    let config = CatalogConfig::from_env()?;
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let store = DynamoMovieStore::new(aws_sdk_dynamodb::Client::new(&aws_config), &config);
    tracing::info!(
        table = %config.table_name,
        index = %config.year_index,
        page_limit = ?config.page_limit,
        "year query function ready"
    );

    let store = &store;
    let page_limit = config.page_limit;
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        handle_year_query_event(event.payload, store, page_limit).map_err(Error::from)
    }))
    .await
}
