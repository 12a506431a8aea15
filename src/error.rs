use thiserror::Error;

/// The RSVP form failed its field rules.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("invalid RSVP form: {0}")]
    Fields(#[from] validator::ValidationErrors),
}

/// The email relay could not deliver a confirmation.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("email relay used before init() was called")]
    NotInitialized,

    #[error("no email relay is configured")]
    Unavailable,

    #[error("email relay request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("email relay rejected the message with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("email relay did not answer within {0:?}")]
    TimedOut(std::time::Duration),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set when any email relay setting is provided")]
    Missing(&'static str),

    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}
