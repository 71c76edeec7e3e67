//! In-memory appointment store.

use super::{next_record_id, TestAppointmentPatch, TestAppointmentStore};
use crate::error::{StoreError, StoreResult};
use crate::filter::{AppointmentFilter, AppointmentWhere};
use crate::models::{NewTestAppointment, TestAppointment};
use crate::scheduling::AppointmentSink;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use testreg_types::PatientId;

/// `RwLock`-guarded map of appointment records keyed by generated id.
#[derive(Default)]
pub struct InMemoryTestAppointmentStore {
    records: RwLock<HashMap<String, TestAppointment>>,
}

impl InMemoryTestAppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, HashMap<String, TestAppointment>>> {
        self.records.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, HashMap<String, TestAppointment>>> {
        self.records.write().map_err(|_| StoreError::LockPoisoned)
    }
}

impl AppointmentSink for InMemoryTestAppointmentStore {
    fn create(&self, record: NewTestAppointment) -> StoreResult<TestAppointment> {
        let appointment = TestAppointment {
            id: next_record_id(),
            patient_id: record.patient_id,
            kind: record.kind,
            health_center_id: record.health_center_id,
            appointment_date: record.appointment_date,
            created: record.created,
        };
        self.write()?
            .insert(appointment.id.clone(), appointment.clone());
        Ok(appointment)
    }
}

impl TestAppointmentStore for InMemoryTestAppointmentStore {
    fn count(&self, constraints: &AppointmentWhere) -> StoreResult<u64> {
        let records = self.read()?;
        Ok(records.values().filter(|a| constraints.matches(a)).count() as u64)
    }

    fn find(&self, filter: &AppointmentFilter) -> StoreResult<Vec<TestAppointment>> {
        let records = self.read()?;
        let mut matching: Vec<TestAppointment> = records
            .values()
            .filter(|a| filter.constraints.matches(a))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created.cmp(&a.created).then_with(|| b.id.cmp(&a.id)));

        let skip = filter.skip.unwrap_or(0);
        let limit = filter.limit.unwrap_or(usize::MAX);
        Ok(matching.into_iter().skip(skip).take(limit).collect())
    }

    fn find_by_id(&self, id: &str) -> StoreResult<TestAppointment> {
        self.read()?
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_owned()))
    }

    fn find_latest_by_patient(
        &self,
        patient_id: &PatientId,
    ) -> StoreResult<Option<TestAppointment>> {
        let mut filter =
            AppointmentFilter::with_constraints(AppointmentWhere::for_patient(patient_id.as_str()));
        filter.limit = Some(1);
        Ok(self.find(&filter)?.into_iter().next())
    }

    fn update_all(
        &self,
        patch: &TestAppointmentPatch,
        constraints: &AppointmentWhere,
    ) -> StoreResult<u64> {
        let mut records = self.write()?;
        let mut changed = 0u64;
        for appointment in records.values_mut() {
            if constraints.matches(appointment) {
                apply_patch(appointment, patch);
                changed += 1;
            }
        }
        Ok(changed)
    }

    fn update_by_id(&self, id: &str, patch: &TestAppointmentPatch) -> StoreResult<()> {
        let mut records = self.write()?;
        let appointment = records
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_owned()))?;
        apply_patch(appointment, patch);
        Ok(())
    }

    fn replace_by_id(&self, id: &str, record: NewTestAppointment) -> StoreResult<()> {
        let mut records = self.write()?;
        let appointment = records
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_owned()))?;
        *appointment = TestAppointment {
            id: id.to_owned(),
            patient_id: record.patient_id,
            kind: record.kind,
            health_center_id: record.health_center_id,
            appointment_date: record.appointment_date,
            created: record.created,
        };
        Ok(())
    }

    fn delete_by_id(&self, id: &str) -> StoreResult<()> {
        let mut records = self.write()?;
        records
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(id.to_owned()))
    }
}

fn apply_patch(appointment: &mut TestAppointment, patch: &TestAppointmentPatch) {
    if let Some(kind) = patch.kind {
        appointment.kind = kind;
    }
    if let Some(health_center_id) = &patch.health_center_id {
        appointment.health_center_id = Some(health_center_id.clone());
    }
    if let Some(appointment_date) = patch.appointment_date {
        appointment.appointment_date = appointment_date;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppointmentType;
    use chrono::{TimeZone, Utc};

    fn patient(id: &str) -> PatientId {
        PatientId::new(id).expect("valid patient id")
    }

    fn record(patient_id: &str, hour: u32) -> NewTestAppointment {
        NewTestAppointment {
            patient_id: patient(patient_id),
            kind: AppointmentType::AtHealthCenter,
            health_center_id: Some("hc1".into()),
            appointment_date: Utc.with_ymd_and_hms(2026, 9, 1, hour, 0, 0).unwrap(),
            created: Utc.with_ymd_and_hms(2026, 8, 29, hour, 0, 0).unwrap(),
        }
    }

    #[test]
    fn create_assigns_distinct_ids_and_find_by_id_round_trips() {
        let store = InMemoryTestAppointmentStore::new();
        let a = store.create(record("p1", 8)).expect("create");
        let b = store.create(record("p1", 9)).expect("create");

        assert_ne!(a.id, b.id);
        assert_eq!(store.find_by_id(&a.id).expect("found"), a);
        assert!(matches!(
            store.find_by_id("missing"),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn find_orders_newest_first_and_paginates() {
        let store = InMemoryTestAppointmentStore::new();
        store.create(record("p1", 8)).expect("create");
        let newest = store.create(record("p1", 11)).expect("create");
        let middle = store.create(record("p1", 9)).expect("create");
        store.create(record("p2", 23)).expect("create");

        let mut filter =
            AppointmentFilter::with_constraints(AppointmentWhere::for_patient("p1"));
        filter.limit = Some(2);
        let found = store.find(&filter).expect("find");

        assert_eq!(found.len(), 2);
        assert_eq!(found[0], newest);
        assert_eq!(found[1], middle);

        filter.skip = Some(2);
        let rest = store.find(&filter).expect("find");
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].created, Utc.with_ymd_and_hms(2026, 8, 29, 8, 0, 0).unwrap());
    }

    #[test]
    fn equal_created_breaks_ties_by_descending_id() {
        let store = InMemoryTestAppointmentStore::new();
        let a = store.create(record("p1", 8)).expect("create");
        let b = store.create(record("p1", 8)).expect("create");

        let latest = store
            .find_latest_by_patient(&patient("p1"))
            .expect("find")
            .expect("present");
        let expected = if a.id > b.id { a } else { b };
        assert_eq!(latest, expected);
    }

    #[test]
    fn count_honours_where() {
        let store = InMemoryTestAppointmentStore::new();
        store.create(record("p1", 8)).expect("create");
        store.create(record("p1", 9)).expect("create");
        store.create(record("p2", 9)).expect("create");

        assert_eq!(
            store.count(&AppointmentWhere::default()).expect("count"),
            3
        );
        assert_eq!(
            store
                .count(&AppointmentWhere::for_patient("p1"))
                .expect("count"),
            2
        );
    }

    #[test]
    fn update_by_id_applies_only_set_fields() {
        let store = InMemoryTestAppointmentStore::new();
        let a = store.create(record("p1", 8)).expect("create");

        let patch = TestAppointmentPatch {
            appointment_date: Some(Utc.with_ymd_and_hms(2026, 9, 3, 10, 0, 0).unwrap()),
            ..TestAppointmentPatch::default()
        };
        store.update_by_id(&a.id, &patch).expect("update");

        let updated = store.find_by_id(&a.id).expect("found");
        assert_eq!(
            updated.appointment_date,
            Utc.with_ymd_and_hms(2026, 9, 3, 10, 0, 0).unwrap()
        );
        assert_eq!(updated.kind, a.kind);
        assert_eq!(updated.health_center_id, a.health_center_id);

        assert!(matches!(
            store.update_by_id("missing", &patch),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn update_all_reports_changed_count() {
        let store = InMemoryTestAppointmentStore::new();
        store.create(record("p1", 8)).expect("create");
        store.create(record("p1", 9)).expect("create");
        store.create(record("p2", 9)).expect("create");

        let patch = TestAppointmentPatch {
            kind: Some(AppointmentType::AtHome),
            ..TestAppointmentPatch::default()
        };
        let changed = store
            .update_all(&patch, &AppointmentWhere::for_patient("p1"))
            .expect("update all");
        assert_eq!(changed, 2);

        let kinds = AppointmentWhere {
            kind: Some(AppointmentType::AtHome),
            ..AppointmentWhere::default()
        };
        assert_eq!(store.count(&kinds).expect("count"), 2);
    }

    #[test]
    fn replace_keeps_the_identifier() {
        let store = InMemoryTestAppointmentStore::new();
        let a = store.create(record("p1", 8)).expect("create");

        let mut replacement = record("p1", 9);
        replacement.kind = AppointmentType::AtHome;
        replacement.health_center_id = None;
        store.replace_by_id(&a.id, replacement).expect("replace");

        let replaced = store.find_by_id(&a.id).expect("found");
        assert_eq!(replaced.id, a.id);
        assert_eq!(replaced.kind, AppointmentType::AtHome);
        assert_eq!(replaced.health_center_id, None);
    }

    #[test]
    fn delete_removes_the_record() {
        let store = InMemoryTestAppointmentStore::new();
        let a = store.create(record("p1", 8)).expect("create");

        store.delete_by_id(&a.id).expect("delete");
        assert!(matches!(
            store.find_by_id(&a.id),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.delete_by_id(&a.id),
            Err(StoreError::NotFound(_))
        ));
    }
}
