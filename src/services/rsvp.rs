use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::client::{EmailRelay, TemplateParams, RELAY_TIMEOUT};
use crate::error::DeliveryError;
use crate::models::feedback::UiFeedbackState;
use crate::models::form::{Attendance, FormUpdate, RsvpForm};
use crate::models::guests::{Counter, GuestCounts};
use crate::models::payload::SubmissionPayload;
use crate::services::countdown::Clock;
use crate::services::effects::{ToastKind, VisualEffects};

pub const INVALID_FORM_MESSAGE: &str = "Please fill in your full name!";
pub const DELIVERY_FAILED_MESSAGE: &str = "Oops! Something went wrong. Please try again!";
pub const CONFIRMED_MESSAGE: &str = "Your presence is confirmed! See you at the party!";
pub const DECLINED_MESSAGE: &str = "Thanks for letting us know. We will miss you!";

/// Where confirmation emails go and which relay template renders them
#[derive(Debug, Clone)]
pub struct RelayTarget {
    pub service_id: String,
    pub template_id: String,
    pub to_email: String,
    pub from_name: String,
}

#[derive(Debug, Default)]
struct SessionState {
    form: RsvpForm,
    guests: GuestCounts,
    feedback: UiFeedbackState,
}

/// Read-only view of the session, with the guest total derived on read
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub form: RsvpForm,
    pub guests: GuestCounts,
    pub total_guests: u32,
    pub feedback: UiFeedbackState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmitOutcome {
    Sent { attending: bool },
    Invalid { message: String },
    Busy,
    DeliveryFailed { message: String },
}

/// One guest's RSVP session: form, headcount and submission feedback.
///
/// The state lock is not held across the relay call, so a submit that
/// arrives while another is in flight sees `is_submitting` and is turned
/// away instead of queueing a second email.
///
/// Delivery runs on its own task and is bounded by [`RELAY_TIMEOUT`]. If the
/// caller stops waiting, the task still clears `is_submitting` and applies
/// the result.
pub struct InvitationSession {
    state: Arc<Mutex<SessionState>>,
    relay: Arc<dyn EmailRelay>,
    effects: Arc<dyn VisualEffects>,
    clock: Arc<dyn Clock>,
    target: RelayTarget,
}

impl InvitationSession {
    pub fn new(
        relay: Arc<dyn EmailRelay>,
        effects: Arc<dyn VisualEffects>,
        clock: Arc<dyn Clock>,
        target: RelayTarget,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(SessionState::default())),
            relay,
            effects,
            clock,
            target,
        }
    }

    pub async fn snapshot(&self) -> SessionView {
        let state = self.state.lock().await;
        SessionView {
            form: state.form.clone(),
            guests: state.guests,
            total_guests: state.guests.total(),
            feedback: state.feedback.clone(),
        }
    }

    pub async fn increment(&self, counter: Counter) -> GuestCounts {
        let mut state = self.state.lock().await;
        if !state.guests.increment(counter) {
            debug!("{} already at maximum", counter);
        }
        state.guests
    }

    pub async fn decrement(&self, counter: Counter) -> GuestCounts {
        let mut state = self.state.lock().await;
        if !state.guests.decrement(counter) {
            debug!("{} already at minimum", counter);
        }
        state.guests
    }

    pub async fn update_form(&self, update: FormUpdate) -> RsvpForm {
        let mut state = self.state.lock().await;
        state.form.apply(update);
        state.form.clone()
    }

    pub async fn close_modal(&self) {
        self.state.lock().await.feedback.close_modal();
    }

    /// Validates the form, sends the confirmation through the relay and
    /// applies the success or failure feedback.
    pub async fn submit(&self) -> SubmitOutcome {
        let (params, attendance) = {
            let mut state = self.state.lock().await;

            if state.feedback.is_submitting {
                warn!("Submission already in progress, ignoring duplicate submit");
                return SubmitOutcome::Busy;
            }

            if let Err(err) = state.form.validate_form() {
                info!("Rejected RSVP form: {}", err);
                self.effects.toast(INVALID_FORM_MESSAGE, ToastKind::Error);
                return SubmitOutcome::Invalid {
                    message: INVALID_FORM_MESSAGE.to_string(),
                };
            }

            state.feedback.is_submitting = true;

            let payload = SubmissionPayload::new(&state.form, &state.guests, self.clock.now());
            let params =
                TemplateParams::from_payload(&payload, &self.target.to_email, &self.target.from_name);
            (params, payload.attendance)
        };

        info!(
            "Submitting RSVP for '{}' ({} guest(s))",
            params.guest_name, params.total_guests
        );

        let delivery = tokio::spawn({
            let state = Arc::clone(&self.state);
            let relay = Arc::clone(&self.relay);
            let effects = Arc::clone(&self.effects);
            let target = self.target.clone();
            async move {
                let send = relay.send(&target.service_id, &target.template_id, &params);
                let result = match tokio::time::timeout(RELAY_TIMEOUT, send).await {
                    Ok(result) => result,
                    Err(_) => Err(DeliveryError::TimedOut(RELAY_TIMEOUT)),
                };

                let mut state = state.lock().await;
                finish_submission(
                    &mut state,
                    effects.as_ref(),
                    &params.guest_name,
                    attendance,
                    result,
                )
            }
        });

        match delivery.await {
            Ok(outcome) => outcome,
            Err(err) => {
                error!("RSVP delivery task failed: {}", err);
                self.state.lock().await.feedback.is_submitting = false;
                self.effects.toast(DELIVERY_FAILED_MESSAGE, ToastKind::Error);
                SubmitOutcome::DeliveryFailed {
                    message: DELIVERY_FAILED_MESSAGE.to_string(),
                }
            }
        }
    }
}

fn finish_submission(
    state: &mut SessionState,
    effects: &dyn VisualEffects,
    guest_name: &str,
    attendance: Attendance,
    result: Result<(), DeliveryError>,
) -> SubmitOutcome {
    state.feedback.is_submitting = false;

    match result {
        Ok(()) => {
            info!("RSVP confirmation sent for '{}'", guest_name);
            let attending = attendance == Attendance::Yes;

            state.feedback.is_confirmed = attending;
            state.feedback.show_success_modal = true;
            state.feedback.success_message = if attending {
                CONFIRMED_MESSAGE.to_string()
            } else {
                DECLINED_MESSAGE.to_string()
            };
            state.form.reset();
            state.guests.reset();

            effects.confetti();
            SubmitOutcome::Sent { attending }
        }
        Err(err) => {
            error!("Failed to send RSVP confirmation: {}", err);
            effects.toast(DELIVERY_FAILED_MESSAGE, ToastKind::Error);
            SubmitOutcome::DeliveryFailed {
                message: DELIVERY_FAILED_MESSAGE.to_string(),
            }
        }
    }
}
