//! In-memory health-center directory.

use super::next_record_id;
use crate::error::{StoreError, StoreResult};
use crate::models::HealthCenter;
use crate::scheduling::HealthCenterLookup;
use std::collections::HashMap;
use std::sync::RwLock;
use testreg_types::PatientId;

/// Health centers plus patient-to-center assignments.
///
/// A patient is assigned to at most one center; re-assigning overwrites the
/// previous assignment.
#[derive(Default)]
pub struct InMemoryHealthCenterDirectory {
    centers: RwLock<HashMap<String, HealthCenter>>,
    assignments: RwLock<HashMap<String, String>>,
}

impl InMemoryHealthCenterDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, name: String, address: Option<String>) -> StoreResult<HealthCenter> {
        let center = HealthCenter {
            id: next_record_id(),
            name,
            address,
        };
        self.centers
            .write()
            .map_err(|_| StoreError::LockPoisoned)?
            .insert(center.id.clone(), center.clone());
        Ok(center)
    }

    /// All centers, ordered by name for stable listings.
    pub fn list(&self) -> StoreResult<Vec<HealthCenter>> {
        let centers = self.centers.read().map_err(|_| StoreError::LockPoisoned)?;
        let mut all: Vec<HealthCenter> = centers.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(all)
    }

    /// Assigns `patient_id` to the center with `center_id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the center does not exist.
    pub fn assign_patient(&self, center_id: &str, patient_id: &PatientId) -> StoreResult<()> {
        let centers = self.centers.read().map_err(|_| StoreError::LockPoisoned)?;
        if !centers.contains_key(center_id) {
            return Err(StoreError::NotFound(center_id.to_owned()));
        }
        self.assignments
            .write()
            .map_err(|_| StoreError::LockPoisoned)?
            .insert(patient_id.as_str().to_owned(), center_id.to_owned());
        Ok(())
    }
}

impl HealthCenterLookup for InMemoryHealthCenterDirectory {
    fn patient_health_center(&self, patient_id: &PatientId) -> StoreResult<Option<HealthCenter>> {
        let assignments = self
            .assignments
            .read()
            .map_err(|_| StoreError::LockPoisoned)?;
        let Some(center_id) = assignments.get(patient_id.as_str()) else {
            return Ok(None);
        };

        let centers = self.centers.read().map_err(|_| StoreError::LockPoisoned)?;
        let center = centers.get(center_id).cloned();
        if center.is_none() {
            // Assignment pointing at a deleted center; treat as unassigned.
            tracing::warn!(
                patient_id = %patient_id,
                center_id = %center_id,
                "patient assigned to unknown health center"
            );
        }
        Ok(center)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patient(id: &str) -> PatientId {
        PatientId::new(id).expect("valid patient id")
    }

    #[test]
    fn assignment_resolves_to_the_center() {
        let directory = InMemoryHealthCenterDirectory::new();
        let center = directory
            .create("Centro Norte".into(), Some("Calle Mayor 1".into()))
            .expect("create");
        directory
            .assign_patient(&center.id, &patient("p1"))
            .expect("assign");

        let found = directory
            .patient_health_center(&patient("p1"))
            .expect("lookup")
            .expect("assigned");
        assert_eq!(found, center);
    }

    #[test]
    fn unassigned_patient_resolves_to_none() {
        let directory = InMemoryHealthCenterDirectory::new();
        assert!(directory
            .patient_health_center(&patient("p1"))
            .expect("lookup")
            .is_none());
    }

    #[test]
    fn assigning_to_unknown_center_fails() {
        let directory = InMemoryHealthCenterDirectory::new();
        assert!(matches!(
            directory.assign_patient("missing", &patient("p1")),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn reassignment_overwrites() {
        let directory = InMemoryHealthCenterDirectory::new();
        let first = directory.create("Norte".into(), None).expect("create");
        let second = directory.create("Sur".into(), None).expect("create");

        directory
            .assign_patient(&first.id, &patient("p1"))
            .expect("assign");
        directory
            .assign_patient(&second.id, &patient("p1"))
            .expect("reassign");

        let found = directory
            .patient_health_center(&patient("p1"))
            .expect("lookup")
            .expect("assigned");
        assert_eq!(found.id, second.id);
    }

    #[test]
    fn list_is_ordered_by_name() {
        let directory = InMemoryHealthCenterDirectory::new();
        directory.create("Sur".into(), None).expect("create");
        directory.create("Norte".into(), None).expect("create");

        let names: Vec<String> = directory
            .list()
            .expect("list")
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Norte".to_string(), "Sur".to_string()]);
    }
}
