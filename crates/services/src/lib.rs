#![forbid(unsafe_code)]

pub mod attempt_flow;
pub mod error;
pub mod plans_service;
pub mod profile_service;
pub mod progress_service;

pub use prep_core::Clock;

pub use attempt_flow::{AttemptFlowService, CompletedAttempt};
pub use error::{AttemptFlowError, PlansServiceError, ProfileServiceError, ProgressServiceError};
pub use plans_service::{PLANS_KEY, PlansService};
pub use profile_service::{PROFILE_KEY, ProfileService};
pub use progress_service::{ProgressService, STATS_KEY};
