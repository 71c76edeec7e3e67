//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into
//! core services. Helpers here take already-read environment values rather
//! than reading process-wide environment variables themselves, which keeps
//! request handling and test harnesses free of hidden environment access.

use crate::error::{ConfigError, ConfigResult};
use crate::models::AppointmentType;
use chrono::Duration;

/// Appointment type used when classification cannot decide.
pub const DEFAULT_APPOINTMENT_TYPE: AppointmentType = AppointmentType::AtHealthCenter;

/// Default lead time before a health-center appointment, in hours.
pub const DEFAULT_HEALTH_CENTER_LEAD_HOURS: i64 = 24;

/// Default lead time before a home-visit appointment, in hours.
pub const DEFAULT_HOME_LEAD_HOURS: i64 = 48;

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    default_appointment_type: AppointmentType,
    health_center_lead: Duration,
    home_lead: Duration,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// Lead times must be positive; a zero or negative lead time would place
    /// appointments in the past.
    pub fn new(
        default_appointment_type: AppointmentType,
        health_center_lead_hours: i64,
        home_lead_hours: i64,
    ) -> ConfigResult<Self> {
        if health_center_lead_hours <= 0 {
            return Err(ConfigError::NonPositiveLeadTime {
                name: "health_center_lead_hours",
                hours: health_center_lead_hours,
            });
        }
        if home_lead_hours <= 0 {
            return Err(ConfigError::NonPositiveLeadTime {
                name: "home_lead_hours",
                hours: home_lead_hours,
            });
        }

        Ok(Self {
            default_appointment_type,
            health_center_lead: Duration::hours(health_center_lead_hours),
            home_lead: Duration::hours(home_lead_hours),
        })
    }

    pub fn default_appointment_type(&self) -> AppointmentType {
        self.default_appointment_type
    }

    pub fn health_center_lead(&self) -> Duration {
        self.health_center_lead
    }

    pub fn home_lead(&self) -> Duration {
        self.home_lead
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            default_appointment_type: DEFAULT_APPOINTMENT_TYPE,
            health_center_lead: Duration::hours(DEFAULT_HEALTH_CENTER_LEAD_HOURS),
            home_lead: Duration::hours(DEFAULT_HOME_LEAD_HOURS),
        }
    }
}

/// Parse the default appointment type from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns
/// [`DEFAULT_APPOINTMENT_TYPE`].
pub fn appointment_type_from_env_value(value: Option<String>) -> ConfigResult<AppointmentType> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    let parsed = value.map(|v| v.parse::<AppointmentType>()).transpose()?;

    Ok(parsed.unwrap_or(DEFAULT_APPOINTMENT_TYPE))
}

/// Parse a lead time in hours from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns `fallback_hours`.
pub fn lead_hours_from_env_value(
    name: &'static str,
    value: Option<String>,
    fallback_hours: i64,
) -> ConfigResult<i64> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value {
        Some(v) => v
            .parse::<i64>()
            .map_err(|_| ConfigError::InvalidLeadTime { name, value: v }),
        None => Ok(fallback_hours),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_env_values_are_unset_or_blank() {
        assert_eq!(
            appointment_type_from_env_value(None).expect("default"),
            AppointmentType::AtHealthCenter
        );
        assert_eq!(
            appointment_type_from_env_value(Some("   ".into())).expect("blank falls back"),
            AppointmentType::AtHealthCenter
        );
        assert_eq!(
            lead_hours_from_env_value("home_lead_hours", None, 48).expect("default"),
            48
        );
    }

    #[test]
    fn parses_explicit_env_values() {
        assert_eq!(
            appointment_type_from_env_value(Some("AT_HOME".into())).expect("valid type"),
            AppointmentType::AtHome
        );
        assert_eq!(
            lead_hours_from_env_value("home_lead_hours", Some(" 12 ".into()), 48)
                .expect("valid hours"),
            12
        );
    }

    #[test]
    fn rejects_invalid_env_values() {
        assert!(appointment_type_from_env_value(Some("SOMEWHERE".into())).is_err());
        assert!(
            lead_hours_from_env_value("home_lead_hours", Some("soon".into()), 48).is_err()
        );
    }

    #[test]
    fn rejects_non_positive_lead_times() {
        let err = CoreConfig::new(AppointmentType::AtHome, 0, 24).expect_err("zero lead");
        assert!(matches!(
            err,
            ConfigError::NonPositiveLeadTime {
                name: "health_center_lead_hours",
                hours: 0
            }
        ));
        assert!(CoreConfig::new(AppointmentType::AtHome, 24, -1).is_err());
    }

    #[test]
    fn default_config_uses_documented_constants() {
        let cfg = CoreConfig::default();
        assert_eq!(cfg.default_appointment_type(), DEFAULT_APPOINTMENT_TYPE);
        assert_eq!(
            cfg.health_center_lead(),
            Duration::hours(DEFAULT_HEALTH_CENTER_LEAD_HOURS)
        );
        assert_eq!(cfg.home_lead(), Duration::hours(DEFAULT_HOME_LEAD_HOURS));
    }
}
