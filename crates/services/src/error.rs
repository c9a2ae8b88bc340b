//! Shared error types for the services crate.

use thiserror::Error;

use prep_core::attempt::AttemptError;
use storage::repository::StorageError;

/// Errors emitted by `ProgressService`.
///
/// Only the write path can fail; corrupt or missing stored data on the read
/// path degrades to empty defaults instead of erroring.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("could not serialize statistics document: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors emitted by `AttemptFlowService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AttemptFlowError {
    #[error(transparent)]
    Attempt(#[from] AttemptError),
    #[error(transparent)]
    Progress(#[from] ProgressServiceError),
}

/// Errors emitted by `PlansService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PlansServiceError {
    #[error("no study plan with id {id}")]
    NotFound { id: prep_core::model::PlanId },
    #[error(transparent)]
    Plan(#[from] prep_core::model::PlanError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("could not serialize study plans: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors emitted by `ProfileService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProfileServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("could not serialize profile: {0}")]
    Serialization(#[from] serde_json::Error),
}
