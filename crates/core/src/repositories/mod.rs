//! Document stores for appointments, test results, and health centers.
//!
//! Storage here is an in-process document store: `RwLock`-guarded maps keyed
//! by generated identifiers, queried through equality where-clauses and
//! skip/limit filters. The store contracts are traits so that the booking
//! flow and the REST layer never depend on a concrete backend.

pub mod health_centers;
pub mod test_appointments;
pub mod test_results;

pub use health_centers::InMemoryHealthCenterDirectory;
pub use test_appointments::InMemoryTestAppointmentStore;
pub use test_results::InMemoryTestResultStore;

use crate::error::StoreResult;
use crate::filter::{AppointmentFilter, AppointmentWhere};
use crate::models::{AppointmentType, NewTestAppointment, TestAppointment};
use crate::scheduling::AppointmentSink;
use chrono::{DateTime, Utc};
use testreg_types::PatientId;

/// Partial update of an appointment record.
///
/// Only fields carrying `Some` are written; the rest stay untouched. There
/// is no way to clear an already-set health center through a patch; use
/// replace for that.
#[derive(Debug, Clone, Default)]
pub struct TestAppointmentPatch {
    pub kind: Option<AppointmentType>,
    pub health_center_id: Option<String>,
    pub appointment_date: Option<DateTime<Utc>>,
}

/// Full CRUD contract for appointment records.
///
/// Everything except `create` is pass-through persistence consumed by the
/// generic REST endpoints; `create` (via [`AppointmentSink`]) is the only
/// operation the booking flow touches.
pub trait TestAppointmentStore: AppointmentSink {
    fn count(&self, constraints: &AppointmentWhere) -> StoreResult<u64>;

    /// Matching records, newest `created` first (ties broken by descending
    /// id), honouring the filter's `skip`/`limit`.
    fn find(&self, filter: &AppointmentFilter) -> StoreResult<Vec<TestAppointment>>;

    fn find_by_id(&self, id: &str) -> StoreResult<TestAppointment>;

    /// The patient's most recently created appointment, if any.
    fn find_latest_by_patient(&self, patient_id: &PatientId)
        -> StoreResult<Option<TestAppointment>>;

    /// Applies `patch` to every matching record, returning how many changed.
    fn update_all(
        &self,
        patch: &TestAppointmentPatch,
        constraints: &AppointmentWhere,
    ) -> StoreResult<u64>;

    fn update_by_id(&self, id: &str, patch: &TestAppointmentPatch) -> StoreResult<()>;

    /// Replaces the record body, keeping the identifier.
    fn replace_by_id(&self, id: &str, record: NewTestAppointment) -> StoreResult<()>;

    fn delete_by_id(&self, id: &str) -> StoreResult<()>;
}

/// Generates a store identifier: a simple-format v4 UUID.
pub(crate) fn next_record_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
