//! In-memory local repository implementation.
//!
//! Stores all data in `HashMap`s behind a single `RwLock`, suitable for
//! unit tests and local development: fast, deterministic and isolated.
//! IDs are assigned from monotonic counters, so insertion order is
//! reproducible across runs.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::db::repository::{
    RepositoryError, RepositoryResult, SwimRepository, TimeFilter,
};
use crate::models::{
    CourseType, EventCode, Meet, MeetId, MeetInput, Standard, StandardId, StandardInput,
    StandardTime, StandardTimeInput, Swimmer, SwimmerId, SwimmerInput, TimeInput, TimeRecord,
    TimeRecordId, TimeWithMeet,
};

/// In-memory repository holding all entities in process memory.
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

#[derive(Default)]
struct LocalData {
    swimmers: HashMap<SwimmerId, Swimmer>,
    meets: HashMap<MeetId, Meet>,
    times: HashMap<TimeRecordId, TimeRecord>,
    standards: HashMap<StandardId, Standard>,
    standard_times: HashMap<StandardId, Vec<StandardTime>>,

    next_swimmer_id: i64,
    next_meet_id: i64,
    next_time_id: i64,
    next_standard_id: i64,
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Remove all stored data, resetting ID counters.
    pub fn clear(&self) {
        let mut data = self.data.write().unwrap();
        *data = LocalData::default();
    }

    /// Number of time records currently stored.
    pub fn time_count(&self) -> usize {
        self.data.read().unwrap().times.len()
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalData {
    fn duplicate_event(
        &self,
        swimmer_id: SwimmerId,
        meet_id: MeetId,
        event: EventCode,
        exclude: Option<TimeRecordId>,
    ) -> bool {
        self.times.values().any(|t| {
            t.swimmer_id == swimmer_id
                && t.meet_id == meet_id
                && t.event == event
                && Some(t.id) != exclude
        })
    }
}

#[async_trait]
impl SwimRepository for LocalRepository {
    async fn create_swimmer(&self, input: &SwimmerInput) -> RepositoryResult<Swimmer> {
        let mut data = self.data.write().unwrap();
        data.next_swimmer_id += 1;
        let swimmer = Swimmer {
            id: SwimmerId::new(data.next_swimmer_id),
            name: input.name.trim().to_string(),
            birth_date: input.birth_date,
            gender: input.gender,
            threshold_percent: input.threshold_or_default(),
        };
        data.swimmers.insert(swimmer.id, swimmer.clone());
        Ok(swimmer)
    }

    async fn get_swimmer(&self, id: SwimmerId) -> RepositoryResult<Swimmer> {
        self.data
            .read()
            .unwrap()
            .swimmers
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("swimmer {id}")))
    }

    async fn update_swimmer(
        &self,
        id: SwimmerId,
        input: &SwimmerInput,
    ) -> RepositoryResult<Swimmer> {
        let mut data = self.data.write().unwrap();
        let swimmer = data
            .swimmers
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::NotFound(format!("swimmer {id}")))?;
        swimmer.name = input.name.trim().to_string();
        swimmer.birth_date = input.birth_date;
        swimmer.gender = input.gender;
        swimmer.threshold_percent = input.threshold_or_default();
        Ok(swimmer.clone())
    }

    async fn create_meet(&self, input: &MeetInput) -> RepositoryResult<Meet> {
        let mut data = self.data.write().unwrap();
        data.next_meet_id += 1;
        let meet = Meet {
            id: MeetId::new(data.next_meet_id),
            name: input.name.trim().to_string(),
            city: input.city.trim().to_string(),
            country: input.country.clone(),
            start_date: input.start_date,
            end_date: input.resolved_end_date(),
            course_type: input.course_type,
        };
        data.meets.insert(meet.id, meet.clone());
        Ok(meet)
    }

    async fn get_meet(&self, id: MeetId) -> RepositoryResult<Meet> {
        self.data
            .read()
            .unwrap()
            .meets
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("meet {id}")))
    }

    async fn list_meets(&self, course_type: Option<CourseType>) -> RepositoryResult<Vec<Meet>> {
        let data = self.data.read().unwrap();
        let mut meets: Vec<Meet> = data
            .meets
            .values()
            .filter(|m| course_type.is_none_or(|c| m.course_type == c))
            .cloned()
            .collect();
        meets.sort_by(|a, b| b.start_date.cmp(&a.start_date).then(a.id.cmp(&b.id)));
        Ok(meets)
    }

    async fn update_meet(&self, id: MeetId, input: &MeetInput) -> RepositoryResult<Meet> {
        let mut data = self.data.write().unwrap();
        let meet = data
            .meets
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::NotFound(format!("meet {id}")))?;
        meet.name = input.name.trim().to_string();
        meet.city = input.city.trim().to_string();
        meet.country = input.country.clone();
        meet.start_date = input.start_date;
        meet.end_date = input.resolved_end_date();
        meet.course_type = input.course_type;
        Ok(meet.clone())
    }

    async fn delete_meet(&self, id: MeetId) -> RepositoryResult<()> {
        let mut data = self.data.write().unwrap();
        if data.meets.remove(&id).is_none() {
            return Err(RepositoryError::NotFound(format!("meet {id}")));
        }
        // Times cascade with their meet.
        data.times.retain(|_, t| t.meet_id != id);
        Ok(())
    }

    async fn create_time(
        &self,
        swimmer_id: SwimmerId,
        input: &TimeInput,
    ) -> RepositoryResult<TimeRecord> {
        let mut data = self.data.write().unwrap();
        if !data.swimmers.contains_key(&swimmer_id) {
            return Err(RepositoryError::NotFound(format!("swimmer {swimmer_id}")));
        }
        if !data.meets.contains_key(&input.meet_id) {
            return Err(RepositoryError::NotFound(format!("meet {}", input.meet_id)));
        }
        if data.duplicate_event(swimmer_id, input.meet_id, input.event, None) {
            return Err(RepositoryError::Conflict(format!(
                "event {} already recorded for meet {}",
                input.event, input.meet_id
            )));
        }
        data.next_time_id += 1;
        let record = TimeRecord {
            id: TimeRecordId::new(data.next_time_id),
            swimmer_id,
            meet_id: input.meet_id,
            event: input.event,
            time_ms: input.time_ms,
            event_date: input.event_date,
            notes: input.notes.clone(),
        };
        data.times.insert(record.id, record.clone());
        Ok(record)
    }

    async fn get_time(&self, id: TimeRecordId) -> RepositoryResult<TimeRecord> {
        self.data
            .read()
            .unwrap()
            .times
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("time {id}")))
    }

    async fn update_time(
        &self,
        id: TimeRecordId,
        input: &TimeInput,
    ) -> RepositoryResult<TimeRecord> {
        let mut data = self.data.write().unwrap();
        if !data.meets.contains_key(&input.meet_id) {
            return Err(RepositoryError::NotFound(format!("meet {}", input.meet_id)));
        }
        let swimmer_id = data
            .times
            .get(&id)
            .map(|t| t.swimmer_id)
            .ok_or_else(|| RepositoryError::NotFound(format!("time {id}")))?;
        if data.duplicate_event(swimmer_id, input.meet_id, input.event, Some(id)) {
            return Err(RepositoryError::Conflict(format!(
                "event {} already recorded for meet {}",
                input.event, input.meet_id
            )));
        }
        let record = data
            .times
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::NotFound(format!("time {id}")))?;
        record.meet_id = input.meet_id;
        record.event = input.event;
        record.time_ms = input.time_ms;
        record.event_date = input.event_date;
        record.notes = input.notes.clone();
        Ok(record.clone())
    }

    async fn delete_time(&self, id: TimeRecordId) -> RepositoryResult<()> {
        let mut data = self.data.write().unwrap();
        if data.times.remove(&id).is_none() {
            return Err(RepositoryError::NotFound(format!("time {id}")));
        }
        Ok(())
    }

    async fn list_times(
        &self,
        swimmer_id: SwimmerId,
        filter: &TimeFilter,
    ) -> RepositoryResult<Vec<TimeWithMeet>> {
        let data = self.data.read().unwrap();
        let mut rows: Vec<TimeWithMeet> = data
            .times
            .values()
            .filter(|t| t.swimmer_id == swimmer_id)
            .filter(|t| filter.event.is_none_or(|e| t.event == e))
            .filter(|t| filter.meet_id.is_none_or(|m| t.meet_id == m))
            .filter_map(|t| {
                let meet = data.meets.get(&t.meet_id)?;
                if filter.course_type.is_none_or(|c| meet.course_type == c) {
                    Some(TimeWithMeet {
                        record: t.clone(),
                        meet: meet.clone(),
                    })
                } else {
                    None
                }
            })
            .collect();
        rows.sort_by(|a, b| {
            a.record
                .event_date
                .cmp(&b.record.event_date)
                .then(a.record.id.cmp(&b.record.id))
        });
        Ok(rows)
    }

    async fn event_exists(
        &self,
        swimmer_id: SwimmerId,
        meet_id: MeetId,
        event: EventCode,
    ) -> RepositoryResult<bool> {
        let data = self.data.read().unwrap();
        Ok(data.duplicate_event(swimmer_id, meet_id, event, None))
    }

    async fn create_standard(
        &self,
        input: &StandardInput,
        times: &[StandardTimeInput],
    ) -> RepositoryResult<Standard> {
        let mut data = self.data.write().unwrap();
        data.next_standard_id += 1;
        let standard = Standard {
            id: StandardId::new(data.next_standard_id),
            name: input.name.trim().to_string(),
            description: input.description.clone(),
            course_type: input.course_type,
            gender: input.gender,
        };
        let rows: Vec<StandardTime> = times
            .iter()
            .map(|t| StandardTime {
                event: t.event,
                age_group: t.age_group,
                time_ms: t.time_ms,
            })
            .collect();
        data.standard_times.insert(standard.id, rows);
        data.standards.insert(standard.id, standard.clone());
        Ok(standard)
    }

    async fn get_standard(&self, id: StandardId) -> RepositoryResult<Standard> {
        self.data
            .read()
            .unwrap()
            .standards
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("standard {id}")))
    }

    async fn list_standards(&self) -> RepositoryResult<Vec<Standard>> {
        let data = self.data.read().unwrap();
        let mut standards: Vec<Standard> = data.standards.values().cloned().collect();
        standards.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(standards)
    }

    async fn list_standard_times(&self, id: StandardId) -> RepositoryResult<Vec<StandardTime>> {
        let data = self.data.read().unwrap();
        if !data.standards.contains_key(&id) {
            return Err(RepositoryError::NotFound(format!("standard {id}")));
        }
        Ok(data.standard_times.get(&id).cloned().unwrap_or_default())
    }

    async fn delete_standard(&self, id: StandardId) -> RepositoryResult<()> {
        let mut data = self.data.write().unwrap();
        if data.standards.remove(&id).is_none() {
            return Err(RepositoryError::NotFound(format!("standard {id}")));
        }
        data.standard_times.remove(&id);
        Ok(())
    }
}
