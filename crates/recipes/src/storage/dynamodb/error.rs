//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `RepositoryError` from `recipes_core::storage`.
//! Client-side timeouts become `TimedOut`; conditional check failures carry
//! the meaning of the condition they guarded.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::scan::ScanError;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use recipes_core::storage::{RepositoryError, RECIPE_ENTITY};

fn timed_out<E, R>(err: &SdkError<E, R>, operation: &str) -> Option<RepositoryError> {
    match err {
        SdkError::TimeoutError(_) => Some(RepositoryError::TimedOut(format!(
            "{operation} exceeded the client timeout"
        ))),
        _ => None,
    }
}

/// Map a GetItem SDK error to RepositoryError.
pub fn map_get_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetItemError, R>,
) -> RepositoryError {
    if let Some(timeout) = timed_out(&err, "GetItem") {
        return timeout;
    }
    match err.into_service_error() {
        GetItemError::ResourceNotFoundException(_) => {
            RepositoryError::Persistence("Table not found".to_string())
        }
        GetItemError::ProvisionedThroughputExceededException(_) => {
            RepositoryError::Persistence("Throughput exceeded, please retry".to_string())
        }
        GetItemError::RequestLimitExceeded(_) => {
            RepositoryError::Persistence("Request limit exceeded, please retry".to_string())
        }
        GetItemError::InternalServerError(_) => {
            RepositoryError::Persistence("DynamoDB internal server error".to_string())
        }
        err => RepositoryError::Persistence(format!("GetItem failed: {:?}", err)),
    }
}

/// Map a Scan SDK error to RepositoryError.
pub fn map_scan_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<ScanError, R>,
) -> RepositoryError {
    if let Some(timeout) = timed_out(&err, "Scan") {
        return timeout;
    }
    match err.into_service_error() {
        ScanError::ResourceNotFoundException(_) => {
            RepositoryError::Persistence("Table not found".to_string())
        }
        ScanError::ProvisionedThroughputExceededException(_) => {
            RepositoryError::Persistence("Throughput exceeded, please retry".to_string())
        }
        ScanError::RequestLimitExceeded(_) => {
            RepositoryError::Persistence("Request limit exceeded, please retry".to_string())
        }
        ScanError::InternalServerError(_) => {
            RepositoryError::Persistence("DynamoDB internal server error".to_string())
        }
        err => RepositoryError::Persistence(format!("Scan failed: {:?}", err)),
    }
}

/// Map a PutItem SDK error to RepositoryError.
pub fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
    id: impl Into<String>,
) -> RepositoryError {
    if let Some(timeout) = timed_out(&err, "PutItem") {
        return timeout;
    }
    match err.into_service_error() {
        PutItemError::ConditionalCheckFailedException(_) => RepositoryError::Conflict {
            entity_type: RECIPE_ENTITY,
            id: id.into(),
        },
        PutItemError::ResourceNotFoundException(_) => {
            RepositoryError::Persistence("Table not found".to_string())
        }
        PutItemError::ProvisionedThroughputExceededException(_) => {
            RepositoryError::Persistence("Throughput exceeded, please retry".to_string())
        }
        PutItemError::RequestLimitExceeded(_) => {
            RepositoryError::Persistence("Request limit exceeded, please retry".to_string())
        }
        PutItemError::TransactionConflictException(_) => {
            RepositoryError::Persistence("Transaction conflict, please retry".to_string())
        }
        PutItemError::InternalServerError(_) => {
            RepositoryError::Persistence("DynamoDB internal server error".to_string())
        }
        err => RepositoryError::Persistence(format!("PutItem failed: {:?}", err)),
    }
}

/// Map an UpdateItem SDK error to RepositoryError.
pub fn map_update_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<UpdateItemError, R>,
    id: impl Into<String>,
) -> RepositoryError {
    if let Some(timeout) = timed_out(&err, "UpdateItem") {
        return timeout;
    }
    match err.into_service_error() {
        UpdateItemError::ConditionalCheckFailedException(_) => {
            RepositoryError::recipe_not_found(id)
        }
        UpdateItemError::ResourceNotFoundException(_) => {
            RepositoryError::Persistence("Table not found".to_string())
        }
        UpdateItemError::ProvisionedThroughputExceededException(_) => {
            RepositoryError::Persistence("Throughput exceeded, please retry".to_string())
        }
        UpdateItemError::RequestLimitExceeded(_) => {
            RepositoryError::Persistence("Request limit exceeded, please retry".to_string())
        }
        UpdateItemError::TransactionConflictException(_) => {
            RepositoryError::Persistence("Transaction conflict, please retry".to_string())
        }
        UpdateItemError::InternalServerError(_) => {
            RepositoryError::Persistence("DynamoDB internal server error".to_string())
        }
        err => RepositoryError::Persistence(format!("UpdateItem failed: {:?}", err)),
    }
}

/// Map a DeleteItem SDK error to RepositoryError.
pub fn map_delete_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DeleteItemError, R>,
    id: impl Into<String>,
) -> RepositoryError {
    if let Some(timeout) = timed_out(&err, "DeleteItem") {
        return timeout;
    }
    match err.into_service_error() {
        DeleteItemError::ConditionalCheckFailedException(_) => {
            RepositoryError::recipe_not_found(id)
        }
        DeleteItemError::ResourceNotFoundException(_) => {
            RepositoryError::Persistence("Table not found".to_string())
        }
        DeleteItemError::ProvisionedThroughputExceededException(_) => {
            RepositoryError::Persistence("Throughput exceeded, please retry".to_string())
        }
        DeleteItemError::RequestLimitExceeded(_) => {
            RepositoryError::Persistence("Request limit exceeded, please retry".to_string())
        }
        DeleteItemError::TransactionConflictException(_) => {
            RepositoryError::Persistence("Transaction conflict, please retry".to_string())
        }
        DeleteItemError::InternalServerError(_) => {
            RepositoryError::Persistence("DynamoDB internal server error".to_string())
        }
        err => RepositoryError::Persistence(format!("DeleteItem failed: {:?}", err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_dynamodb::types::error::ConditionalCheckFailedException;

    fn conditional_failure() -> ConditionalCheckFailedException {
        ConditionalCheckFailedException::builder()
            .message("The conditional request failed")
            .build()
    }

    #[test]
    fn test_timeout_maps_to_timed_out() {
        let err = SdkError::<GetItemError, ()>::timeout_error("slow network");
        let mapped = map_get_item_error(err);

        assert!(matches!(mapped, RepositoryError::TimedOut(_)));
        assert!(mapped.is_retryable());
    }

    #[test]
    fn test_construction_failure_maps_to_persistence() {
        let err = SdkError::<ScanError, ()>::construction_failure("bad request");
        assert!(matches!(
            map_scan_error(err),
            RepositoryError::Persistence(_)
        ));
    }

    #[test]
    fn test_put_conditional_failure_is_conflict() {
        let err = SdkError::service_error(
            PutItemError::ConditionalCheckFailedException(conditional_failure()),
            (),
        );

        assert_eq!(
            map_put_item_error(err, "abc"),
            RepositoryError::Conflict {
                entity_type: RECIPE_ENTITY,
                id: "abc".to_string(),
            }
        );
    }

    #[test]
    fn test_update_conditional_failure_is_not_found() {
        let err = SdkError::service_error(
            UpdateItemError::ConditionalCheckFailedException(conditional_failure()),
            (),
        );

        assert_eq!(
            map_update_item_error(err, "abc"),
            RepositoryError::recipe_not_found("abc")
        );
    }

    #[test]
    fn test_delete_conditional_failure_is_not_found() {
        let err = SdkError::service_error(
            DeleteItemError::ConditionalCheckFailedException(conditional_failure()),
            (),
        );

        assert!(map_delete_item_error(err, "abc").is_not_found());
    }
}
