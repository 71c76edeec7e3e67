//! Appointment-type resolution and booking.
//!
//! `AppointmentService` turns a caller-supplied draft into a persisted
//! appointment in four strictly sequential steps:
//!
//! 1. classify — map the patient's latest test-result action to an
//!    appointment type, falling back to the configured default when there is
//!    no result, the lookup fails, or the action is unrecognised;
//! 2. stamp — set `created = now()`, after classification;
//! 3. route — resolve the assigned health center (center visits only) and
//!    the appointment date through the date resolver;
//! 4. persist — store the populated record and return it with its id.
//!
//! Classification and health-center lookup failures are recovered locally.
//! Date-resolution and persistence failures fail the request. No call is
//! retried here; retry policy belongs to the collaborators.

use crate::error::{AppointmentError, AppointmentResult, DateResolutionError, StoreResult};
use crate::models::{
    AppointmentType, HealthCenter, NewTestAppointment, TestAction, TestAppointment,
    TestAppointmentDraft, TestResult,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use testreg_types::PatientId;

/// Read access to a patient's test results.
pub trait TestResultLookup: Send + Sync {
    /// Most recently created result for the patient, if any.
    ///
    /// "Most recent" means greatest `created`; equal timestamps are broken
    /// by descending record id.
    fn find_latest_by_patient(&self, patient_id: &PatientId) -> StoreResult<Option<TestResult>>;
}

/// Read access to patient health-center assignments.
pub trait HealthCenterLookup: Send + Sync {
    fn patient_health_center(&self, patient_id: &PatientId) -> StoreResult<Option<HealthCenter>>;
}

/// Computes appointment dates for both appointment types.
pub trait AppointmentDateResolver: Send + Sync {
    /// Date of a visit at a health center. `health_center_id` is `None` when
    /// the patient has no assigned center.
    fn date_at_health_center(
        &self,
        patient_id: &PatientId,
        health_center_id: Option<&str>,
    ) -> Result<DateTime<Utc>, DateResolutionError>;

    /// Date of a home visit.
    fn date_at_home(&self, patient_id: &PatientId) -> Result<DateTime<Utc>, DateResolutionError>;
}

/// Persistence for appointment records, as seen by the booking flow.
///
/// The full CRUD contract lives in [`crate::repositories::TestAppointmentStore`];
/// booking only ever creates.
pub trait AppointmentSink: Send + Sync {
    /// Stores the record and returns it with its generated identifier.
    fn create(&self, record: NewTestAppointment) -> StoreResult<TestAppointment>;
}

/// Books test appointments from caller-supplied drafts.
#[derive(Clone)]
pub struct AppointmentService {
    results: Arc<dyn TestResultLookup>,
    centers: Arc<dyn HealthCenterLookup>,
    dates: Arc<dyn AppointmentDateResolver>,
    sink: Arc<dyn AppointmentSink>,
    default_type: AppointmentType,
}

impl AppointmentService {
    /// Creates a new `AppointmentService`.
    ///
    /// `default_type` is the appointment type used when classification cannot
    /// decide; it comes from [`crate::CoreConfig`] rather than living as
    /// mutable service state.
    pub fn new(
        results: Arc<dyn TestResultLookup>,
        centers: Arc<dyn HealthCenterLookup>,
        dates: Arc<dyn AppointmentDateResolver>,
        sink: Arc<dyn AppointmentSink>,
        default_type: AppointmentType,
    ) -> Self {
        Self {
            results,
            centers,
            dates,
            sink,
            default_type,
        }
    }

    /// Books an appointment for the patient named in `draft`.
    ///
    /// Creates exactly one appointment record per invocation and reads the
    /// patient's test results at most once.
    ///
    /// # Errors
    ///
    /// Returns [`AppointmentError::DateResolution`] when the date resolver
    /// fails and [`AppointmentError::Persistence`] when the store rejects the
    /// record. Test-result and health-center lookup failures do not fail the
    /// request; they classify the appointment as `default_type` and leave the
    /// center unset respectively.
    pub fn create(&self, draft: TestAppointmentDraft) -> AppointmentResult<TestAppointment> {
        let kind = self.classify(&draft.patient_id);

        // Stamped after classification, whichever way classification went.
        let created = Utc::now();

        let (health_center_id, appointment_date) = match kind {
            AppointmentType::AtHealthCenter => {
                let health_center_id = self.assigned_center(&draft.patient_id);
                let date = self
                    .dates
                    .date_at_health_center(&draft.patient_id, health_center_id.as_deref())?;
                (health_center_id, date)
            }
            AppointmentType::AtHome => {
                let date = self.dates.date_at_home(&draft.patient_id)?;
                (None, date)
            }
        };

        let record = NewTestAppointment {
            patient_id: draft.patient_id,
            kind,
            health_center_id,
            appointment_date,
            created,
        };

        let appointment = self
            .sink
            .create(record)
            .map_err(AppointmentError::Persistence)?;

        tracing::info!(
            appointment_id = %appointment.id,
            patient_id = %appointment.patient_id,
            kind = %appointment.kind,
            "booked test appointment"
        );

        Ok(appointment)
    }

    /// Maps the patient's latest test-result action to an appointment type.
    ///
    /// Absorbs lookup failures: a patient with an unreadable result history
    /// still gets an appointment of the default type.
    fn classify(&self, patient_id: &PatientId) -> AppointmentType {
        match self.results.find_latest_by_patient(patient_id) {
            Ok(Some(result)) => {
                match result.action.as_deref().and_then(TestAction::parse_recorded) {
                    Some(TestAction::ScheduleTestAppointmentAtHealthCenter) => {
                        AppointmentType::AtHealthCenter
                    }
                    Some(TestAction::ScheduleTestAppointmentAtHome) => AppointmentType::AtHome,
                    None => self.default_type,
                }
            }
            Ok(None) => self.default_type,
            Err(err) => {
                tracing::warn!(
                    patient_id = %patient_id,
                    error = %err,
                    "test-result lookup failed, using default appointment type"
                );
                self.default_type
            }
        }
    }

    /// Assigned health center id, treating lookup failure as "no center".
    fn assigned_center(&self, patient_id: &PatientId) -> Option<String> {
        match self.centers.patient_health_center(patient_id) {
            Ok(center) => center.map(|c| c.id),
            Err(err) => {
                tracing::warn!(
                    patient_id = %patient_id,
                    error = %err,
                    "health-center lookup failed, booking without a center"
                );
                None
            }
        }
    }
}
