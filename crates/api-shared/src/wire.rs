//! JSON wire types for the REST API.
//!
//! Timestamps travel as RFC 3339 strings and enumerations as their wire
//! names (`AT_HEALTH_CENTER`, `SCHEDULE_TEST_APPOINTMENT_AT_HOME`, ...);
//! handlers convert to and from core types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Count response for `/count` endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CountRes {
    pub count: u64,
}

/// Success envelope for operations without a payload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SuccessRes {
    pub success: bool,
}

/// Appointment draft accepted by `POST /test-appointments`.
///
/// Identifier, type, center, and dates are computed server-side; unknown
/// fields (including attempts to pre-set them) are rejected.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateTestAppointmentReq {
    #[serde(rename = "patientId")]
    pub patient_id: String,
}

/// A persisted test appointment.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TestAppointmentRes {
    pub id: String,
    #[serde(rename = "patientId")]
    pub patient_id: String,
    /// `AT_HEALTH_CENTER` or `AT_HOME`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "healthCenterId", skip_serializing_if = "Option::is_none")]
    pub health_center_id: Option<String>,
    /// RFC 3339 timestamp.
    #[serde(rename = "appointmentDate")]
    pub appointment_date: String,
    /// RFC 3339 timestamp.
    pub created: String,
}

/// Partial appointment update accepted by `PATCH` endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateTestAppointmentReq {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(rename = "healthCenterId")]
    pub health_center_id: Option<String>,
    #[serde(rename = "appointmentDate")]
    pub appointment_date: Option<String>,
}

/// Full appointment body accepted by `PUT /test-appointments/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReplaceTestAppointmentReq {
    #[serde(rename = "patientId")]
    pub patient_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "healthCenterId")]
    pub health_center_id: Option<String>,
    #[serde(rename = "appointmentDate")]
    pub appointment_date: String,
    pub created: String,
}

/// Where clause for appointment count/updateAll endpoints, also the `where`
/// member of [`TestAppointmentFilterReq`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct TestAppointmentWhereReq {
    #[serde(rename = "patientId")]
    pub patient_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(rename = "healthCenterId")]
    pub health_center_id: Option<String>,
}

/// Listing filter accepted (JSON-encoded) by `GET /test-appointments`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct TestAppointmentFilterReq {
    #[serde(rename = "where", default)]
    pub constraints: Option<TestAppointmentWhereReq>,
    pub skip: Option<usize>,
    pub limit: Option<usize>,
}

/// Test result accepted by `POST /test-results`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateTestResultReq {
    #[serde(rename = "patientId")]
    pub patient_id: String,
    /// Recorded follow-up action, stored verbatim; values outside the
    /// scheduling enumeration classify as the default appointment type.
    pub action: Option<String>,
    /// RFC 3339 timestamp; stamped with the current time when omitted.
    pub created: Option<String>,
}

/// A recorded test result.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TestResultRes {
    pub id: String,
    #[serde(rename = "patientId")]
    pub patient_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    /// RFC 3339 timestamp.
    pub created: String,
}

/// Health center accepted by `POST /health-centers`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateHealthCenterReq {
    pub name: String,
    pub address: Option<String>,
}

/// A registered health center.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthCenterRes {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}
