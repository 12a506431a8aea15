use axum::{
    extract::{Json as ExtractJson, Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::models::countdown::CountdownValue;
use crate::models::form::{FormUpdate, RsvpForm};
use crate::models::gallery::{Photo, PHOTOS};
use crate::models::guests::{Counter, GuestCounts};
use crate::services::rsvp::{InvitationSession, SessionView, SubmitOutcome};
use crate::services::surface::InMemorySurface;

// AppState struct containing shared resources
pub struct AppState {
    pub session: Arc<InvitationSession>,
    pub countdown: watch::Receiver<CountdownValue>,
    pub surface: Arc<InMemorySurface>,
}

#[derive(Debug, Serialize)]
pub struct CountdownResponse {
    #[serde(flatten)]
    pub countdown: CountdownValue,
    pub display: [String; 4],
    pub party_started: bool,
}

#[derive(Debug, Serialize)]
pub struct GuestsResponse {
    pub guests: GuestCounts,
    pub total_guests: u32,
}

impl From<GuestCounts> for GuestsResponse {
    fn from(guests: GuestCounts) -> Self {
        Self {
            total_guests: guests.total(),
            guests,
        }
    }
}

// Current countdown value, as last published by the ticker
pub async fn get_countdown(State(state): State<Arc<AppState>>) -> Json<CountdownResponse> {
    let countdown = *state.countdown.borrow();
    Json(CountdownResponse {
        display: countdown.padded(),
        party_started: countdown.is_zero(),
        countdown,
    })
}

pub async fn get_gallery() -> Json<Vec<Photo>> {
    Json(PHOTOS.to_vec())
}

pub async fn get_rsvp(State(state): State<Arc<AppState>>) -> Json<SessionView> {
    Json(state.session.snapshot().await)
}

pub async fn update_form(
    State(state): State<Arc<AppState>>,
    ExtractJson(update): ExtractJson<FormUpdate>,
) -> Json<RsvpForm> {
    Json(state.session.update_form(update).await)
}

fn parse_counter(raw: &str) -> Result<Counter, StatusCode> {
    raw.parse::<Counter>().map_err(|err| {
        warn!("{}", err);
        StatusCode::NOT_FOUND
    })
}

pub async fn increment_guests(
    State(state): State<Arc<AppState>>,
    Path(counter): Path<String>,
) -> Result<Json<GuestsResponse>, StatusCode> {
    let counter = parse_counter(&counter)?;
    Ok(Json(state.session.increment(counter).await.into()))
}

pub async fn decrement_guests(
    State(state): State<Arc<AppState>>,
    Path(counter): Path<String>,
) -> Result<Json<GuestsResponse>, StatusCode> {
    let counter = parse_counter(&counter)?;
    Ok(Json(state.session.decrement(counter).await.into()))
}

// RSVP submission; every outcome carries a JSON body for the front end
pub async fn submit_rsvp(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<SubmitOutcome>) {
    info!("Received RSVP submission");

    let outcome = state.session.submit().await;
    let status = match &outcome {
        SubmitOutcome::Sent { .. } => StatusCode::OK,
        SubmitOutcome::Invalid { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        SubmitOutcome::Busy => StatusCode::CONFLICT,
        SubmitOutcome::DeliveryFailed { .. } => StatusCode::BAD_GATEWAY,
    };

    (status, Json(outcome))
}

pub async fn close_modal(State(state): State<Arc<AppState>>) -> StatusCode {
    state.session.close_modal().await;
    StatusCode::NO_CONTENT
}
