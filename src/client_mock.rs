use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use crate::client::{EmailRelay, MockEmailRelay, TemplateParams};
use crate::error::DeliveryError;

/// Relay that records every message and succeeds
#[derive(Default)]
pub struct RecordingRelay {
    sent: Mutex<Vec<TemplateParams>>,
}

impl RecordingRelay {
    pub fn sent(&self) -> Vec<TemplateParams> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailRelay for RecordingRelay {
    fn init(&self, _public_key: &str) -> Result<(), DeliveryError> {
        Ok(())
    }

    async fn send(
        &self,
        _service_id: &str,
        _template_id: &str,
        params: &TemplateParams,
    ) -> Result<(), DeliveryError> {
        self.sent.lock().unwrap().push(params.clone());
        Ok(())
    }
}

/// Relay whose sends block until `release()` is called
#[derive(Default)]
pub struct GatedRelay {
    gate: Notify,
    calls: AtomicUsize,
}

impl GatedRelay {
    pub fn release(&self) {
        self.gate.notify_one();
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmailRelay for GatedRelay {
    fn init(&self, _public_key: &str) -> Result<(), DeliveryError> {
        Ok(())
    }

    async fn send(
        &self,
        _service_id: &str,
        _template_id: &str,
        _params: &TemplateParams,
    ) -> Result<(), DeliveryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.gate.notified().await;
        Ok(())
    }
}

/// Mock relay whose sends all fail with `Unavailable`
pub fn setup_failing_relay() -> Arc<MockEmailRelay> {
    let mut relay = MockEmailRelay::new();
    relay.expect_init().returning(|_| Ok(()));
    relay
        .expect_send()
        .times(1)
        .returning(|_, _, _| Err(DeliveryError::Unavailable));
    Arc::new(relay)
}

/// Mock relay that must never be asked to send
pub fn setup_silent_relay() -> Arc<MockEmailRelay> {
    let mut relay = MockEmailRelay::new();
    relay.expect_send().never();
    Arc::new(relay)
}
