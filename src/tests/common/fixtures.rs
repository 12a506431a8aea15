use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;

use crate::client::EmailRelay;
use crate::models::form::{Attendance, FormUpdate};
use crate::services::countdown::Clock;
use crate::services::effects::{NoEffects, VisualEffects};
use crate::services::rsvp::{InvitationSession, RelayTarget};

pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn fixed_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock(Utc.with_ymd_and_hms(2025, 11, 20, 14, 5, 9).unwrap()))
}

pub fn relay_target() -> RelayTarget {
    RelayTarget {
        service_id: "service_test".to_string(),
        template_id: "template_test".to_string(),
        to_email: "host@example.com".to_string(),
        from_name: "Birthday Invitation".to_string(),
    }
}

pub fn session_with(relay: Arc<dyn EmailRelay>, effects: Arc<dyn VisualEffects>) -> InvitationSession {
    InvitationSession::new(relay, effects, fixed_clock(), relay_target())
}

pub fn headless_session(relay: Arc<dyn EmailRelay>) -> InvitationSession {
    session_with(relay, Arc::new(NoEffects))
}

/// A form edit that passes validation
pub fn valid_form(name: &str, attendance: Attendance) -> FormUpdate {
    FormUpdate {
        name: Some(name.to_string()),
        attendance: Some(attendance),
        note: Some("Bringing a cake".to_string()),
    }
}
