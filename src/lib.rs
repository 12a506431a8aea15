//! Party Invitation Service
//!
//! Headless backend for a single-page party invitation: a countdown to the
//! party, an RSVP form with a guest headcount, confirmation emails through a
//! third-party relay, and the cosmetic effects the page shows around them.
//!
//! # Modules
//!
//! - `models`: countdown arithmetic, guest counters, the RSVP form and the
//!   submission payload
//! - `client`: the `EmailRelay` capability and its EmailJS implementation
//! - `services`: the countdown ticker, the RSVP submission coordinator and
//!   the visual effects drawn on a `Surface`
//! - `handlers` / `routes`: the axum HTTP surface
//!
//! # Email relay
//!
//! The coordinator only depends on `EmailRelay::init` and `EmailRelay::send`,
//! so tests and simulation mode can swap the real relay out.

pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

#[cfg(test)]
mod client_mock;
#[cfg(test)]
mod tests;

// Re-export the main API types for ease of use
pub use client::{EmailJsClient, EmailRelay, SimulatedRelay, TemplateParams, UnavailableRelay};
pub use config::Settings;
pub use handlers::api::AppState;
pub use routes::create_router;
pub use services::rsvp::{InvitationSession, RelayTarget, SubmitOutcome};
