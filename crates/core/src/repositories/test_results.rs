//! In-memory test-result store.

use super::next_record_id;
use crate::error::{StoreError, StoreResult};
use crate::models::{NewTestResult, TestResult};
use crate::scheduling::TestResultLookup;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use testreg_types::PatientId;

/// `RwLock`-guarded map of test results keyed by generated id.
///
/// Results are written by the test-result intake endpoints and read by the
/// booking flow through [`TestResultLookup`].
#[derive(Default)]
pub struct InMemoryTestResultStore {
    records: RwLock<HashMap<String, TestResult>>,
}

impl InMemoryTestResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, HashMap<String, TestResult>>> {
        self.records.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, HashMap<String, TestResult>>> {
        self.records.write().map_err(|_| StoreError::LockPoisoned)
    }

    /// Stores a result, stamping `created = now()` when the caller did not
    /// supply a recording time.
    pub fn create(&self, record: NewTestResult) -> StoreResult<TestResult> {
        let result = TestResult {
            id: next_record_id(),
            patient_id: record.patient_id,
            action: record.action,
            created: record.created.unwrap_or_else(Utc::now),
        };
        self.write()?.insert(result.id.clone(), result.clone());
        Ok(result)
    }

    /// Results, newest first, optionally constrained to one patient.
    pub fn find(&self, patient_id: Option<&str>) -> StoreResult<Vec<TestResult>> {
        let records = self.read()?;
        let mut matching: Vec<TestResult> = records
            .values()
            .filter(|r| patient_id.is_none_or(|p| r.patient_id.as_str() == p))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created.cmp(&a.created).then_with(|| b.id.cmp(&a.id)));
        Ok(matching)
    }

    pub fn count(&self, patient_id: Option<&str>) -> StoreResult<u64> {
        let records = self.read()?;
        Ok(records
            .values()
            .filter(|r| patient_id.is_none_or(|p| r.patient_id.as_str() == p))
            .count() as u64)
    }
}

impl TestResultLookup for InMemoryTestResultStore {
    fn find_latest_by_patient(&self, patient_id: &PatientId) -> StoreResult<Option<TestResult>> {
        Ok(self
            .find(Some(patient_id.as_str()))?
            .into_iter()
            .next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TestAction;
    use chrono::TimeZone;

    fn patient(id: &str) -> PatientId {
        PatientId::new(id).expect("valid patient id")
    }

    fn result_at(patient_id: &str, hour: u32, action: Option<&str>) -> NewTestResult {
        NewTestResult {
            patient_id: patient(patient_id),
            action: action.map(str::to_owned),
            created: Some(Utc.with_ymd_and_hms(2026, 8, 28, hour, 0, 0).unwrap()),
        }
    }

    #[test]
    fn latest_by_patient_picks_greatest_created() {
        let store = InMemoryTestResultStore::new();
        store
            .create(result_at(
                "p1",
                8,
                Some(TestAction::ScheduleTestAppointmentAtHome.as_str()),
            ))
            .expect("create");
        let newest = store
            .create(result_at(
                "p1",
                12,
                Some(TestAction::ScheduleTestAppointmentAtHealthCenter.as_str()),
            ))
            .expect("create");
        store
            .create(result_at(
                "p2",
                23,
                Some(TestAction::ScheduleTestAppointmentAtHome.as_str()),
            ))
            .expect("create");

        let latest = store
            .find_latest_by_patient(&patient("p1"))
            .expect("lookup")
            .expect("present");
        assert_eq!(latest, newest);
    }

    #[test]
    fn latest_tie_breaks_by_descending_id() {
        let store = InMemoryTestResultStore::new();
        let a = store.create(result_at("p1", 8, None)).expect("create");
        let b = store.create(result_at("p1", 8, None)).expect("create");

        let latest = store
            .find_latest_by_patient(&patient("p1"))
            .expect("lookup")
            .expect("present");
        let expected = if a.id > b.id { a } else { b };
        assert_eq!(latest, expected);
    }

    #[test]
    fn missing_patient_yields_none() {
        let store = InMemoryTestResultStore::new();
        assert!(store
            .find_latest_by_patient(&patient("ghost"))
            .expect("lookup")
            .is_none());
    }

    #[test]
    fn unstamped_results_are_created_now() {
        let store = InMemoryTestResultStore::new();
        let before = Utc::now();
        let result = store
            .create(NewTestResult {
                patient_id: patient("p1"),
                action: None,
                created: None,
            })
            .expect("create");
        assert!(result.created >= before);
        assert!(result.created <= Utc::now());
    }

    #[test]
    fn recorded_actions_are_stored_verbatim() {
        let store = InMemoryTestResultStore::new();
        store
            .create(result_at("p1", 8, Some("REPEAT_TEST")))
            .expect("create");

        let latest = store
            .find_latest_by_patient(&patient("p1"))
            .expect("lookup")
            .expect("present");
        assert_eq!(latest.action.as_deref(), Some("REPEAT_TEST"));
    }

    #[test]
    fn count_honours_patient_constraint() {
        let store = InMemoryTestResultStore::new();
        store.create(result_at("p1", 8, None)).expect("create");
        store.create(result_at("p1", 9, None)).expect("create");
        store.create(result_at("p2", 9, None)).expect("create");

        assert_eq!(store.count(None).expect("count"), 3);
        assert_eq!(store.count(Some("p1")).expect("count"), 2);
        assert_eq!(store.count(Some("ghost")).expect("count"), 0);
    }
}
