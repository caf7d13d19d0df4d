pub mod dynamodb;
pub mod movie_store;
