//! Store-agnostic primitives shared by handlers and adapters.

pub use movie_catalog_core::{body_format, contract, error, normalize, pagination, record};
