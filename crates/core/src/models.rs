//! Domain models for test results, test appointments, and health centers.
//!
//! These are pure data types with no API or storage concerns. Wire
//! representations (JSON request/response bodies) live in `api-shared`;
//! handlers in `api-rest` map between the two.

use chrono::{DateTime, Utc};
use testreg_types::PatientId;

/// Whether a test appointment takes place at a health center or at the
/// patient's home.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentType {
    AtHealthCenter,
    AtHome,
}

impl AppointmentType {
    /// Canonical wire name of this appointment type.
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentType::AtHealthCenter => "AT_HEALTH_CENTER",
            AppointmentType::AtHome => "AT_HOME",
        }
    }
}

impl std::fmt::Display for AppointmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AppointmentType {
    type Err = crate::ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AT_HEALTH_CENTER" => Ok(AppointmentType::AtHealthCenter),
            "AT_HOME" => Ok(AppointmentType::AtHome),
            other => Err(crate::ConfigError::UnknownAppointmentType(other.into())),
        }
    }
}

/// Follow-up scheduling action recorded on a test result.
///
/// Only the two scheduling actions are meaningful to appointment creation;
/// any other recorded action classifies as the configured default type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestAction {
    ScheduleTestAppointmentAtHealthCenter,
    ScheduleTestAppointmentAtHome,
}

impl TestAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestAction::ScheduleTestAppointmentAtHealthCenter => {
                "SCHEDULE_TEST_APPOINTMENT_AT_HEALTH_CENTER"
            }
            TestAction::ScheduleTestAppointmentAtHome => "SCHEDULE_TEST_APPOINTMENT_AT_HOME",
        }
    }

    /// Parses a recorded action, returning `None` for values outside the
    /// closed scheduling enumeration.
    pub fn parse_recorded(value: &str) -> Option<Self> {
        match value {
            "SCHEDULE_TEST_APPOINTMENT_AT_HEALTH_CENTER" => {
                Some(TestAction::ScheduleTestAppointmentAtHealthCenter)
            }
            "SCHEDULE_TEST_APPOINTMENT_AT_HOME" => Some(TestAction::ScheduleTestAppointmentAtHome),
            _ => None,
        }
    }
}

impl std::fmt::Display for TestAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A test result recorded for a patient.
///
/// Read-only from the appointment service's point of view. The `action`
/// field holds the recorded value verbatim; only the two scheduling values
/// (see [`TestAction::parse_recorded`]) are meaningful to appointment-type
/// classification, but other recorded actions are preserved as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestResult {
    pub id: String,
    pub patient_id: PatientId,
    pub action: Option<String>,
    pub created: DateTime<Utc>,
}

/// A test result before the store has assigned it an identifier.
#[derive(Debug, Clone)]
pub struct NewTestResult {
    pub patient_id: PatientId,
    /// Recorded action, stored verbatim.
    pub action: Option<String>,
    /// Recording time; stamped with `now()` by the store when unset.
    pub created: Option<DateTime<Utc>>,
}

/// A scheduled test appointment.
///
/// Invariant: `kind == AtHome` implies `health_center_id` is `None`;
/// `kind == AtHealthCenter` carries the assigned center when the lookup
/// found one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestAppointment {
    pub id: String,
    pub patient_id: PatientId,
    pub kind: AppointmentType,
    pub health_center_id: Option<String>,
    pub appointment_date: DateTime<Utc>,
    pub created: DateTime<Utc>,
}

/// A fully populated appointment record before the store has assigned it an
/// identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTestAppointment {
    pub patient_id: PatientId,
    pub kind: AppointmentType,
    pub health_center_id: Option<String>,
    pub appointment_date: DateTime<Utc>,
    pub created: DateTime<Utc>,
}

/// A caller-supplied appointment draft.
///
/// Identifier, type, center, and dates are computed by the appointment
/// service; the draft deliberately cannot carry them.
#[derive(Debug, Clone)]
pub struct TestAppointmentDraft {
    pub patient_id: PatientId,
}

/// A health center patients can be assigned to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthCenter {
    pub id: String,
    pub name: String,
    pub address: Option<String>,
}
