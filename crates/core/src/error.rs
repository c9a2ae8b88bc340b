use thiserror::Error;

use crate::attempt::AttemptError;
use crate::model::BandScoreError;
use crate::validator::ValidationError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    BandScore(#[from] BandScoreError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Attempt(#[from] AttemptError),
}
