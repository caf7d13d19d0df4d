//! Store-agnostic building blocks for the movie catalog functions.
//!
//! This crate owns the request/response contract, the record model, value
//! normalization, response body encoding and the pagination loop. It
//! intentionally excludes AWS SDK and Lambda runtime concerns.

pub mod body_format;
pub mod contract;
pub mod error;
pub mod normalize;
pub mod pagination;
pub mod record;
