use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::DeliveryError;
use crate::models::payload::SubmissionPayload;

/// Upper bound on one relay call, kept below the server's request timeout
pub const RELAY_TIMEOUT: Duration = Duration::from_secs(8);

/// Template variables for one RSVP confirmation email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateParams {
    pub to_email: String,
    pub from_name: String,
    pub guest_name: String,
    pub attendance: String,
    pub adults: u8,
    pub children_0_4: u8,
    pub children_5_plus: u8,
    pub total_guests: u32,
    pub note: String,
    pub confirmed_at: String,
    pub message: String,
}

impl TemplateParams {
    pub fn from_payload(payload: &SubmissionPayload, to_email: &str, from_name: &str) -> Self {
        Self {
            to_email: to_email.to_string(),
            from_name: from_name.to_string(),
            guest_name: payload.name.clone(),
            attendance: payload.attendance.label().to_string(),
            adults: payload.adults,
            children_0_4: payload.children_0_to_4,
            children_5_plus: payload.children_5_plus,
            total_guests: payload.total,
            note: payload.note.clone(),
            confirmed_at: payload.submitted_at_label(),
            message: payload.summary(),
        }
    }
}

/// Request body of the relay's send endpoint
#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a TemplateParams,
}

/// Capability surface of the email relay: initialise once with a public key,
/// then send one templated message per RSVP.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailRelay: Send + Sync {
    fn init(&self, public_key: &str) -> Result<(), DeliveryError>;

    async fn send(
        &self,
        service_id: &str,
        template_id: &str,
        params: &TemplateParams,
    ) -> Result<(), DeliveryError>;
}

/// Client for the EmailJS REST API
pub struct EmailJsClient {
    client: Client,
    endpoint: String,
    public_key: OnceLock<String>,
}

impl EmailJsClient {
    pub fn new(endpoint: &str) -> Result<Self, DeliveryError> {
        Self::with_timeout(endpoint, RELAY_TIMEOUT)
    }

    pub fn with_timeout(endpoint: &str, timeout: Duration) -> Result<Self, DeliveryError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            public_key: OnceLock::new(),
        })
    }

    pub fn send_url(&self) -> String {
        format!("{}/api/v1.0/email/send", self.endpoint)
    }
}

#[async_trait]
impl EmailRelay for EmailJsClient {
    fn init(&self, public_key: &str) -> Result<(), DeliveryError> {
        if self.public_key.set(public_key.to_string()).is_err() {
            warn!("Email relay already initialized, keeping the first public key");
        } else {
            info!("Email relay initialized");
        }
        Ok(())
    }

    async fn send(
        &self,
        service_id: &str,
        template_id: &str,
        params: &TemplateParams,
    ) -> Result<(), DeliveryError> {
        let public_key = self.public_key.get().ok_or(DeliveryError::NotInitialized)?;

        let url = self.send_url();
        let body = SendEmailRequest {
            service_id,
            template_id,
            user_id: public_key,
            template_params: params,
        };

        info!("Sending RSVP email for guest '{}'", params.guest_name);
        debug!("Relay URL: {}", url);

        let res = self.client.post(&url).json(&body).send().await?;
        let status = res.status();
        info!("Relay responded with status: {}", status);

        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(DeliveryError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

/// Relay that logs the message instead of sending it
#[derive(Debug, Default)]
pub struct SimulatedRelay;

#[async_trait]
impl EmailRelay for SimulatedRelay {
    fn init(&self, _public_key: &str) -> Result<(), DeliveryError> {
        info!("Simulated email relay initialized, no email will be sent");
        Ok(())
    }

    async fn send(
        &self,
        service_id: &str,
        template_id: &str,
        params: &TemplateParams,
    ) -> Result<(), DeliveryError> {
        info!(
            "Simulated send via {}/{} to {}:\n{}",
            service_id, template_id, params.to_email, params.message
        );
        Ok(())
    }
}

/// Stand-in used when no relay credentials are configured
#[derive(Debug, Default)]
pub struct UnavailableRelay;

#[async_trait]
impl EmailRelay for UnavailableRelay {
    fn init(&self, _public_key: &str) -> Result<(), DeliveryError> {
        Err(DeliveryError::Unavailable)
    }

    async fn send(
        &self,
        _service_id: &str,
        _template_id: &str,
        _params: &TemplateParams,
    ) -> Result<(), DeliveryError> {
        Err(DeliveryError::Unavailable)
    }
}
