//! # testreg core
//!
//! Core business logic for the testreg patient test-appointment system:
//!
//! - appointment-type resolution and booking (`scheduling`)
//! - lead-time appointment-date resolution (`dates`)
//! - in-memory document stores with equality where/filter queries
//!   (`repositories`, `filter`)
//! - startup configuration (`config`)
//!
//! **No API concerns**: HTTP servers, wire types, and OpenAPI documentation
//! belong in `api-rest` and `api-shared`.

pub mod config;
pub mod dates;
pub mod error;
pub mod filter;
pub mod models;
pub mod repositories;
pub mod scheduling;

pub use config::{
    appointment_type_from_env_value, lead_hours_from_env_value, CoreConfig,
    DEFAULT_APPOINTMENT_TYPE, DEFAULT_HEALTH_CENTER_LEAD_HOURS, DEFAULT_HOME_LEAD_HOURS,
};
pub use dates::LeadTimeDateResolver;
pub use error::{
    AppointmentError, AppointmentResult, ConfigError, ConfigResult, DateResolutionError,
    StoreError, StoreResult,
};
pub use filter::{AppointmentFilter, AppointmentWhere};
pub use models::{
    AppointmentType, HealthCenter, NewTestAppointment, NewTestResult, TestAction,
    TestAppointment, TestAppointmentDraft, TestResult,
};
pub use repositories::{
    InMemoryHealthCenterDirectory, InMemoryTestAppointmentStore, InMemoryTestResultStore,
    TestAppointmentPatch, TestAppointmentStore,
};
pub use scheduling::{
    AppointmentDateResolver, AppointmentService, AppointmentSink, HealthCenterLookup,
    TestResultLookup,
};
pub use testreg_types::{NonEmptyText, PatientId};
