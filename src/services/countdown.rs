use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::models::countdown::CountdownValue;

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Recomputes the countdown once per second and publishes it on a watch
/// channel. The background task stops when the ticker is dropped.
pub struct CountdownTicker {
    receiver: watch::Receiver<CountdownValue>,
    handle: JoinHandle<()>,
}

impl CountdownTicker {
    /// Must be called from inside a tokio runtime.
    pub fn spawn(target_ms: i64, clock: Arc<dyn Clock>) -> Self {
        let initial = CountdownValue::between(target_ms, clock.now().timestamp_millis());
        let (sender, receiver) = watch::channel(initial);

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(TICK_INTERVAL);
            loop {
                interval.tick().await;
                let value = CountdownValue::between(target_ms, clock.now().timestamp_millis());
                sender.send_if_modified(|current| {
                    if *current == value {
                        return false;
                    }
                    *current = value;
                    true
                });
            }
        });

        info!("Countdown ticker started, initial value {:?}", initial);
        Self { receiver, handle }
    }

    pub fn current(&self) -> CountdownValue {
        *self.receiver.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<CountdownValue> {
        self.receiver.clone()
    }

    /// Tears the ticker down; same as dropping it.
    pub fn stop(self) {
        drop(self);
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for CountdownTicker {
    fn drop(&mut self) {
        self.handle.abort();
        debug!("Countdown ticker stopped");
    }
}
