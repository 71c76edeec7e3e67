//! Query filters for the appointment store.
//!
//! Listing endpoints accept a filter with an equality `where` clause plus
//! `limit`/`skip`; count endpoints accept the `where` clause alone. Ordering
//! is fixed: newest `created` first, ties broken by descending record id so
//! that "latest" is deterministic even when two records carry the same
//! timestamp.

use crate::models::{AppointmentType, TestAppointment};

/// Equality constraints on appointment fields.
///
/// Empty constraints match every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentWhere {
    pub patient_id: Option<String>,
    pub kind: Option<AppointmentType>,
    pub health_center_id: Option<String>,
}

impl AppointmentWhere {
    /// Constrain to a single patient.
    pub fn for_patient(patient_id: impl Into<String>) -> Self {
        Self {
            patient_id: Some(patient_id.into()),
            ..Self::default()
        }
    }

    pub fn matches(&self, appointment: &TestAppointment) -> bool {
        if let Some(patient_id) = &self.patient_id {
            if appointment.patient_id.as_str() != patient_id {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if appointment.kind != kind {
                return false;
            }
        }
        if let Some(health_center_id) = &self.health_center_id {
            if appointment.health_center_id.as_deref() != Some(health_center_id.as_str()) {
                return false;
            }
        }
        true
    }
}

/// A listing filter: `where` constraints plus pagination.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentFilter {
    pub constraints: AppointmentWhere,
    pub skip: Option<usize>,
    pub limit: Option<usize>,
}

impl AppointmentFilter {
    pub fn with_constraints(constraints: AppointmentWhere) -> Self {
        Self {
            constraints,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use testreg_types::PatientId;

    fn appointment(patient: &str, kind: AppointmentType, center: Option<&str>) -> TestAppointment {
        TestAppointment {
            id: "a1".into(),
            patient_id: PatientId::new(patient).expect("valid patient id"),
            kind,
            health_center_id: center.map(str::to_owned),
            appointment_date: Utc::now(),
            created: Utc::now(),
        }
    }

    #[test]
    fn empty_where_matches_everything() {
        let constraints = AppointmentWhere::default();
        assert!(constraints.matches(&appointment("p1", AppointmentType::AtHome, None)));
        assert!(constraints.matches(&appointment(
            "p2",
            AppointmentType::AtHealthCenter,
            Some("hc1")
        )));
    }

    #[test]
    fn where_constrains_each_field() {
        let record = appointment("p1", AppointmentType::AtHealthCenter, Some("hc1"));

        assert!(AppointmentWhere::for_patient("p1").matches(&record));
        assert!(!AppointmentWhere::for_patient("p2").matches(&record));

        let by_kind = AppointmentWhere {
            kind: Some(AppointmentType::AtHome),
            ..AppointmentWhere::default()
        };
        assert!(!by_kind.matches(&record));

        let by_center = AppointmentWhere {
            health_center_id: Some("hc2".into()),
            ..AppointmentWhere::default()
        };
        assert!(!by_center.matches(&record));
    }

    #[test]
    fn center_constraint_does_not_match_absent_center() {
        let record = appointment("p1", AppointmentType::AtHome, None);
        let by_center = AppointmentWhere {
            health_center_id: Some("hc1".into()),
            ..AppointmentWhere::default()
        };
        assert!(!by_center.matches(&record));
    }
}
