//! Repository trait for abstracting storage operations.
//!
//! This trait defines the interface the service layer depends on, allowing
//! different implementations (SQL-backed, in-memory, etc.) to be swapped
//! via dependency injection. The services never touch storage directly and
//! the storage layer never computes: personal bests, comparisons and
//! progress flags are all derived in the service layer from the plain rows
//! returned here.

use async_trait::async_trait;

use crate::models::{
    CourseType, EventCode, Meet, MeetId, MeetInput, Standard, StandardId, StandardInput,
    StandardTime, StandardTimeInput, Swimmer, SwimmerId, SwimmerInput, TimeInput, TimeRecord,
    TimeRecordId, TimeWithMeet,
};

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<String> for RepositoryError {
    fn from(s: String) -> Self {
        RepositoryError::Internal(s)
    }
}

impl From<&str> for RepositoryError {
    fn from(s: &str) -> Self {
        RepositoryError::Internal(s.to_string())
    }
}

/// Filter for listing time records. `swimmer_id` is always required; the
/// remaining fields narrow the result when present.
#[derive(Debug, Clone, Default)]
pub struct TimeFilter {
    pub course_type: Option<CourseType>,
    pub event: Option<EventCode>,
    pub meet_id: Option<MeetId>,
}

/// Repository trait for swim data storage.
///
/// Implementations must be `Send + Sync` so they can be shared across
/// async tasks. Inputs are assumed to be already validated by the service
/// layer; implementations still enforce structural invariants (such as the
/// one-record-per-meet-and-event rule) and report violations as
/// [`RepositoryError::Conflict`].
#[async_trait]
pub trait SwimRepository: Send + Sync {
    // ==================== Swimmers ====================

    async fn create_swimmer(&self, input: &SwimmerInput) -> RepositoryResult<Swimmer>;

    async fn get_swimmer(&self, id: SwimmerId) -> RepositoryResult<Swimmer>;

    /// Full-replace update of a swimmer profile.
    async fn update_swimmer(&self, id: SwimmerId, input: &SwimmerInput)
        -> RepositoryResult<Swimmer>;

    // ==================== Meets ====================

    async fn create_meet(&self, input: &MeetInput) -> RepositoryResult<Meet>;

    async fn get_meet(&self, id: MeetId) -> RepositoryResult<Meet>;

    /// List meets, optionally restricted to one course type, most recent
    /// start date first.
    async fn list_meets(&self, course_type: Option<CourseType>) -> RepositoryResult<Vec<Meet>>;

    async fn update_meet(&self, id: MeetId, input: &MeetInput) -> RepositoryResult<Meet>;

    /// Delete a meet and all time records attached to it.
    async fn delete_meet(&self, id: MeetId) -> RepositoryResult<()>;

    // ==================== Time records ====================

    async fn create_time(
        &self,
        swimmer_id: SwimmerId,
        input: &TimeInput,
    ) -> RepositoryResult<TimeRecord>;

    async fn get_time(&self, id: TimeRecordId) -> RepositoryResult<TimeRecord>;

    async fn update_time(&self, id: TimeRecordId, input: &TimeInput)
        -> RepositoryResult<TimeRecord>;

    async fn delete_time(&self, id: TimeRecordId) -> RepositoryResult<()>;

    /// List a swimmer's time records joined with their meets.
    async fn list_times(
        &self,
        swimmer_id: SwimmerId,
        filter: &TimeFilter,
    ) -> RepositoryResult<Vec<TimeWithMeet>>;

    /// Whether the swimmer already has a record for this event at this meet.
    async fn event_exists(
        &self,
        swimmer_id: SwimmerId,
        meet_id: MeetId,
        event: EventCode,
    ) -> RepositoryResult<bool>;

    // ==================== Standards ====================

    /// Create a standard together with its qualifying times.
    async fn create_standard(
        &self,
        input: &StandardInput,
        times: &[StandardTimeInput],
    ) -> RepositoryResult<Standard>;

    async fn get_standard(&self, id: StandardId) -> RepositoryResult<Standard>;

    async fn list_standards(&self) -> RepositoryResult<Vec<Standard>>;

    async fn list_standard_times(&self, id: StandardId) -> RepositoryResult<Vec<StandardTime>>;

    async fn delete_standard(&self, id: StandardId) -> RepositoryResult<()>;
}
