//! Lead-time appointment-date resolution.
//!
//! The default [`AppointmentDateResolver`] implementation: an appointment is
//! offered at the first whole hour at least one configured lead time away.
//! Health-center visits and home visits carry separate lead times because
//! home visits need a mobile team routed to the patient.

use crate::config::CoreConfig;
use crate::error::DateResolutionError;
use crate::scheduling::AppointmentDateResolver;
use chrono::{DateTime, Duration, Timelike, Utc};
use testreg_types::PatientId;

/// Resolves appointment dates by adding a configured lead time to the
/// booking time and rounding up to the next whole hour.
#[derive(Clone, Debug)]
pub struct LeadTimeDateResolver {
    health_center_lead: Duration,
    home_lead: Duration,
}

impl LeadTimeDateResolver {
    pub fn new(health_center_lead: Duration, home_lead: Duration) -> Self {
        Self {
            health_center_lead,
            home_lead,
        }
    }

    pub fn from_config(cfg: &CoreConfig) -> Self {
        Self::new(cfg.health_center_lead(), cfg.home_lead())
    }

    fn offer(&self, lead: Duration) -> Result<DateTime<Utc>, DateResolutionError> {
        round_up_to_hour(Utc::now() + lead)
    }
}

impl AppointmentDateResolver for LeadTimeDateResolver {
    fn date_at_health_center(
        &self,
        _patient_id: &PatientId,
        _health_center_id: Option<&str>,
    ) -> Result<DateTime<Utc>, DateResolutionError> {
        self.offer(self.health_center_lead)
    }

    fn date_at_home(&self, _patient_id: &PatientId) -> Result<DateTime<Utc>, DateResolutionError> {
        self.offer(self.home_lead)
    }
}

/// Next whole hour at or after `t`.
fn round_up_to_hour(t: DateTime<Utc>) -> Result<DateTime<Utc>, DateResolutionError> {
    let floored = t
        .with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .ok_or_else(|| DateResolutionError::Backend("timestamp out of range".into()))?;

    if floored == t {
        Ok(t)
    } else {
        Ok(floored + Duration::hours(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn rounds_up_to_the_next_whole_hour() {
        let t = Utc.with_ymd_and_hms(2026, 8, 29, 14, 25, 31).unwrap();
        assert_eq!(
            round_up_to_hour(t).expect("in range"),
            Utc.with_ymd_and_hms(2026, 8, 29, 15, 0, 0).unwrap()
        );
    }

    #[test]
    fn whole_hours_are_left_alone() {
        let t = Utc.with_ymd_and_hms(2026, 8, 29, 14, 0, 0).unwrap();
        assert_eq!(round_up_to_hour(t).expect("in range"), t);
    }

    #[test]
    fn offers_respect_the_configured_leads() {
        let resolver = LeadTimeDateResolver::new(Duration::hours(24), Duration::hours(48));
        let patient = PatientId::new("p1").expect("valid patient id");

        let now = Utc::now();
        let center = resolver
            .date_at_health_center(&patient, Some("hc1"))
            .expect("resolved");
        let home = resolver.date_at_home(&patient).expect("resolved");

        assert!(center >= now + Duration::hours(24));
        assert!(center < now + Duration::hours(25) + Duration::minutes(1));
        assert!(home >= now + Duration::hours(48));
        assert_eq!(center.minute(), 0);
        assert_eq!(home.second(), 0);
    }
}
