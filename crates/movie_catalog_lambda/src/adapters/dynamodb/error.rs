//! Maps AWS SDK errors to `StoreError`.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::{DisplayErrorContext, SdkError};
use aws_sdk_dynamodb::operation::query::QueryError;
use aws_sdk_dynamodb::operation::scan::ScanError;

use crate::runtime::error::StoreError;

pub(crate) const QUERY_OPERATION: &str = "Query";
pub(crate) const SCAN_OPERATION: &str = "Scan";

pub(crate) fn map_query_error<R>(err: SdkError<QueryError, R>) -> StoreError
where
    R: Debug + Send + Sync + 'static,
{
    let mapped = match err.into_service_error() {
        QueryError::ResourceNotFoundException(_) => StoreError::ResourceNotFound {
            operation: QUERY_OPERATION,
        },
        QueryError::ProvisionedThroughputExceededException(_) => StoreError::Throttled {
            operation: QUERY_OPERATION,
            reason: "provisioned throughput exceeded".to_string(),
        },
        QueryError::RequestLimitExceeded(_) => StoreError::Throttled {
            operation: QUERY_OPERATION,
            reason: "request limit exceeded".to_string(),
        },
        QueryError::InternalServerError(_) => StoreError::InternalServerError {
            operation: QUERY_OPERATION,
        },
        err => StoreError::RequestFailed {
            operation: QUERY_OPERATION,
            reason: DisplayErrorContext(&err).to_string(),
        },
    };
    tracing::error!(operation = QUERY_OPERATION, error = %mapped, "store request failed");
    mapped
}

pub(crate) fn map_scan_error<R>(err: SdkError<ScanError, R>) -> StoreError
where
    R: Debug + Send + Sync + 'static,
{
    let mapped = match err.into_service_error() {
        ScanError::ResourceNotFoundException(_) => StoreError::ResourceNotFound {
            operation: SCAN_OPERATION,
        },
        ScanError::ProvisionedThroughputExceededException(_) => StoreError::Throttled {
            operation: SCAN_OPERATION,
            reason: "provisioned throughput exceeded".to_string(),
        },
        ScanError::RequestLimitExceeded(_) => StoreError::Throttled {
            operation: SCAN_OPERATION,
            reason: "request limit exceeded".to_string(),
        },
        ScanError::InternalServerError(_) => StoreError::InternalServerError {
            operation: SCAN_OPERATION,
        },
        err => StoreError::RequestFailed {
            operation: SCAN_OPERATION,
            reason: DisplayErrorContext(&err).to_string(),
        },
    };
    tracing::error!(operation = SCAN_OPERATION, error = %mapped, "store request failed");
    mapped
}
