//! Meet operations.

use crate::db::SwimRepository;
use crate::models::{CourseType, Meet, MeetId, MeetInput};

use super::ServiceResult;

/// Create a meet after validating its input.
pub async fn create_meet<R: SwimRepository>(repo: &R, input: &MeetInput) -> ServiceResult<Meet> {
    input.validate()?;
    Ok(repo.create_meet(input).await?)
}

/// Fetch a meet by ID.
pub async fn get_meet<R: SwimRepository>(repo: &R, id: MeetId) -> ServiceResult<Meet> {
    Ok(repo.get_meet(id).await?)
}

/// List meets, optionally restricted to one course type.
pub async fn list_meets<R: SwimRepository>(
    repo: &R,
    course_type: Option<CourseType>,
) -> ServiceResult<Vec<Meet>> {
    Ok(repo.list_meets(course_type).await?)
}

/// Update a meet in place.
pub async fn update_meet<R: SwimRepository>(
    repo: &R,
    id: MeetId,
    input: &MeetInput,
) -> ServiceResult<Meet> {
    input.validate()?;
    Ok(repo.update_meet(id, input).await?)
}

/// Delete a meet and the time records attached to it.
pub async fn delete_meet<R: SwimRepository>(repo: &R, id: MeetId) -> ServiceResult<()> {
    Ok(repo.delete_meet(id).await?)
}
