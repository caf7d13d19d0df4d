//! AWS-oriented adapters and handlers for the movie catalog functions.
//!
//! This crate owns runtime integration details (Lambda handlers, the
//! DynamoDB adapter and environment configuration) and exposes a single
//! runtime module boundary for contract, record and normalization
//! primitives.

pub mod adapters;
pub mod config;
pub mod handlers;
pub mod runtime;
