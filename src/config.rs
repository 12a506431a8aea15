use dotenv::dotenv;
use std::collections::HashMap;
use std::env;
use std::net::SocketAddr;

use crate::error::ConfigError;
use crate::services::rsvp::RelayTarget;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_RELAY_ENDPOINT: &str = "https://api.emailjs.com";
pub const DEFAULT_FROM_NAME: &str = "Birthday Party Invitation";

/// Credentials for the EmailJS relay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelaySettings {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub to_email: String,
    pub endpoint: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub bind_addr: SocketAddr,
    pub is_production: bool,
    pub relay: Option<RelaySettings>,
    pub from_name: String,
    pub simulate_delivery: bool,
}

impl Settings {
    /// Load settings from the process environment, reading `.env` first
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_vars(&env::vars().collect())
    }

    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |key: &str| vars.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());
        let flag = |key: &str| get(key).map(|v| v.eq_ignore_ascii_case("true")).unwrap_or(false);

        let bind_raw = get("BIND_ADDR").unwrap_or(DEFAULT_BIND_ADDR);
        let bind_addr = bind_raw.parse::<SocketAddr>().map_err(|_| ConfigError::Invalid {
            key: "BIND_ADDR",
            value: bind_raw.to_string(),
        })?;

        let is_production = get("ENVIRONMENT")
            .map(|v| v.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        // Relay credentials are all-or-nothing
        let required = [
            "EMAILJS_SERVICE_ID",
            "EMAILJS_TEMPLATE_ID",
            "EMAILJS_PUBLIC_KEY",
            "RSVP_DESTINATION_EMAIL",
        ];
        let require = |key: &'static str| {
            get(key)
                .map(str::to_string)
                .ok_or(ConfigError::Missing(key))
        };
        let relay = if required.iter().all(|key| get(key).is_none()) {
            None
        } else {
            Some(RelaySettings {
                service_id: require("EMAILJS_SERVICE_ID")?,
                template_id: require("EMAILJS_TEMPLATE_ID")?,
                public_key: require("EMAILJS_PUBLIC_KEY")?,
                to_email: require("RSVP_DESTINATION_EMAIL")?,
                endpoint: get("EMAILJS_API_ENDPOINT")
                    .unwrap_or(DEFAULT_RELAY_ENDPOINT)
                    .to_string(),
            })
        };

        Ok(Self {
            bind_addr,
            is_production,
            relay,
            from_name: get("RSVP_FROM_NAME").unwrap_or(DEFAULT_FROM_NAME).to_string(),
            simulate_delivery: flag("SIMULATE_EMAIL_DELIVERY"),
        })
    }

    pub fn relay_target(&self) -> RelayTarget {
        match &self.relay {
            Some(relay) => RelayTarget {
                service_id: relay.service_id.clone(),
                template_id: relay.template_id.clone(),
                to_email: relay.to_email.clone(),
                from_name: self.from_name.clone(),
            },
            None => RelayTarget {
                service_id: "unconfigured".to_string(),
                template_id: "unconfigured".to_string(),
                to_email: String::new(),
                from_name: self.from_name.clone(),
            },
        }
    }
}
