//! Service layer: business logic orchestrating storage reads around the
//! pure computation core.
//!
//! Services are repository-agnostic free functions that work with any
//! [`SwimRepository`](crate::db::SwimRepository) implementation. The
//! computations themselves (personal bests, standards comparison, progress
//! flags, batch sequencing) are pure synchronous functions over
//! already-loaded data, so they can be tested without a repository at all.

pub mod comparison;
pub mod meets;
pub mod personal_best;
pub mod progress;
pub mod standards;
pub mod swimmer;
pub mod times;

use crate::db::RepositoryError;
use crate::models::{EventCode, ValidationError};

pub use comparison::{
    compare, compare_standard, ComparisonResult, ComparisonStatus, ComparisonSummary,
    EventComparison,
};
pub use personal_best::{best_by_event, is_personal_best, PersonalBest, PersonalBestList};
pub use progress::{progress_data, ProgressData, ProgressPoint};
pub use swimmer::SwimmerProfile;
pub use times::{BatchInput, BatchResult, RecordedTime};

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Error type for service operations.
///
/// The two duplicate-event conditions are deliberately distinct: one batch
/// naming the same event twice is a caller mistake, while colliding with a
/// time already stored for the meet is a conflict with existing state.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("validation: {0}")]
    Validation(#[from] ValidationError),

    #[error("duplicate event in batch: {0}")]
    DuplicateEventInBatch(EventCode),

    #[error("event already recorded for this meet: {0}")]
    DuplicateEvent(EventCode),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
