//! Error taxonomy for the testreg core.
//!
//! Errors are split by concern so that callers can tell recoverable
//! anomalies apart from request failures. The appointment service absorbs
//! classification and health-center lookup failures into defaulted fields;
//! date-resolution and persistence failures surface to the caller.

/// Errors raised by document stores.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no record with id {0}")]
    NotFound(String),
    #[error("store lock poisoned")]
    LockPoisoned,
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors raised while resolving an appointment date.
#[derive(Debug, thiserror::Error)]
pub enum DateResolutionError {
    #[error("no appointment capacity: {0}")]
    NoCapacity(String),
    #[error("date resolution failed: {0}")]
    Backend(String),
}

/// Errors surfaced by `AppointmentService::create`.
///
/// Classification and health-center lookup failures never appear here; they
/// are recovered locally by the service.
#[derive(Debug, thiserror::Error)]
pub enum AppointmentError {
    #[error("failed to resolve appointment date: {0}")]
    DateResolution(#[from] DateResolutionError),
    #[error("failed to persist appointment: {0}")]
    Persistence(#[source] StoreError),
}

pub type AppointmentResult<T> = std::result::Result<T, AppointmentError>;

/// Errors raised while building core configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown appointment type: {0}")]
    UnknownAppointmentType(String),
    #[error("{name} must be a whole number of hours: {value}")]
    InvalidLeadTime { name: &'static str, value: String },
    #[error("{name} must be positive, got {hours}")]
    NonPositiveLeadTime { name: &'static str, hours: i64 },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
