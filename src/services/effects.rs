use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::services::surface::{Element, NodeId, Parent, Surface};

pub const PARTICLES_CONTAINER: &str = "particles";
pub const SPARKLE_COUNT: usize = 80;
pub const CONFETTI_COUNT: usize = 60;
pub const CONFETTI_LIFETIME: Duration = Duration::from_millis(5_000);
pub const TOAST_LIFETIME: Duration = Duration::from_millis(3_000);

const SPARKLE_STYLE_ID: &str = "particle-animation";
const CONFETTI_STYLE_ID: &str = "confetti-style";
const CONFETTI_COLORS: [&str; 6] = ["#FF99CC", "#FFB3D9", "#FFC0DD", "#FFD4E8", "#FF80BF", "#E066A3"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    fn as_str(self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
        }
    }
}

/// Cosmetic side effects the submission flow can trigger.
#[cfg_attr(test, mockall::automock)]
pub trait VisualEffects: Send + Sync {
    fn confetti(&self);
    fn toast(&self, message: &str, kind: ToastKind);
}

/// Effects sink for headless runs.
#[derive(Debug, Default)]
pub struct NoEffects;

impl VisualEffects for NoEffects {
    fn confetti(&self) {}

    fn toast(&self, message: &str, kind: ToastKind) {
        debug!("Toast ({}) suppressed: {}", kind.as_str(), message);
    }
}

/// Draws sparkles, confetti and toasts onto a `Surface`.
pub struct SurfaceEffects {
    surface: Arc<dyn Surface>,
}

impl SurfaceEffects {
    pub fn new(surface: Arc<dyn Surface>) -> Self {
        Self { surface }
    }

    /// Fills the particles container with looping sparkles.
    /// Returns how many were attached; zero when the container is missing.
    pub fn sparkles(&self) -> usize {
        if !self.surface.has_container(PARTICLES_CONTAINER) {
            warn!("No '{}' container on the surface, skipping sparkles", PARTICLES_CONTAINER);
            return 0;
        }

        let mut rng = rand::thread_rng();
        for i in 0..SPARKLE_COUNT {
            // First half starts within 3s, second half within 3-6s
            let delay = if i < SPARKLE_COUNT / 2 {
                rng.gen_range(0.0..3.0)
            } else {
                rng.gen_range(3.0..6.0)
            };
            let style = format!(
                "position: fixed; left: {:.2}%; top: {:.2}%; \
                 animation: sparklefall {:.2}s linear {:.2}s infinite; \
                 will-change: transform, opacity;",
                rng.gen_range(0.0..100.0),
                -rng.gen_range(50.0..150.0),
                rng.gen_range(6.0..14.0),
                delay,
            );
            let node = self.surface.create_element(Element {
                class: "sparkle".to_string(),
                style,
                text: None,
            });
            self.surface
                .append(Parent::Container(PARTICLES_CONTAINER.to_string()), node);
        }

        let sway_in: f64 = rng.gen_range(-15.0..15.0);
        let sway_out: f64 = rng.gen_range(-30.0..30.0);
        self.register_style(SPARKLE_STYLE_ID, || sparkle_css(sway_in, sway_out));

        SPARKLE_COUNT
    }

    fn register_style(&self, id: &str, css: impl FnOnce() -> String) {
        if !self.surface.has_style(id) {
            self.surface.insert_style(id, &css());
        }
    }

    fn remove_after(&self, node: NodeId, delay: Duration) {
        let surface = Arc::clone(&self.surface);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    tokio::time::sleep(delay).await;
                    surface.remove(node);
                });
            }
            Err(_) => {
                warn!("No async runtime to schedule removal of node {}", node);
            }
        }
    }
}

impl VisualEffects for SurfaceEffects {
    fn confetti(&self) {
        let mut rng = rand::thread_rng();
        for _ in 0..CONFETTI_COUNT {
            let size_w: f64 = rng.gen_range(5.0..15.0);
            let size_h: f64 = rng.gen_range(5.0..15.0);
            let color = CONFETTI_COLORS.choose(&mut rng).copied().unwrap_or("#FF99CC");
            let style = format!(
                "position: fixed; top: -10px; left: {:.2}%; width: {:.1}px; height: {:.1}px; \
                 background: {}; opacity: 0.8; animation: confettiFall {:.2}s linear; \
                 z-index: 9999; border-radius: 50%;",
                rng.gen_range(0.0..100.0),
                size_w,
                size_h,
                color,
                rng.gen_range(2.0..5.0),
            );
            let node = self.surface.create_element(Element {
                class: "confetti".to_string(),
                style,
                text: None,
            });
            self.surface.append(Parent::Body, node);
            self.remove_after(node, CONFETTI_LIFETIME);
        }

        self.register_style(CONFETTI_STYLE_ID, confetti_css);
        debug!("Launched {} confetti pieces", CONFETTI_COUNT);
    }

    fn toast(&self, message: &str, kind: ToastKind) {
        let node = self.surface.create_element(Element {
            class: format!("toast-message toast-{}", kind.as_str()),
            style: String::new(),
            text: Some(message.to_string()),
        });
        self.surface.append(Parent::Body, node);
        self.remove_after(node, TOAST_LIFETIME);
    }
}

fn sparkle_css(sway_in: f64, sway_out: f64) -> String {
    format!(
        r#".sparkle {{
  width: 4px;
  height: 4px;
  background: radial-gradient(circle, #fff, transparent);
  border-radius: 50%;
  box-shadow: 0 0 6px #fff, 0 0 12px #fff, 0 0 18px #ffd700, 0 0 24px #ffd700;
  pointer-events: none;
  z-index: 1;
}}
.sparkle::before,
.sparkle::after {{
  content: '';
  position: absolute;
  background: #fff;
}}
.sparkle::before {{
  width: 8px;
  height: 1px;
  top: 50%;
  left: 50%;
  transform: translate(-50%, -50%);
  box-shadow: 0 0 8px #ffd700;
}}
.sparkle::after {{
  width: 1px;
  height: 8px;
  top: 50%;
  left: 50%;
  transform: translate(-50%, -50%);
  box-shadow: 0 0 8px #ffd700;
}}
@keyframes sparklefall {{
  0% {{ transform: translateY(0) translateX(0) scale(0); opacity: 0; }}
  5% {{ opacity: 1; transform: translateY(5vh) translateX({:.1}px) scale(1); }}
  95% {{ opacity: 1; }}
  100% {{ transform: translateY(150vh) translateX({:.1}px) scale(0.5); opacity: 0; }}
}}"#,
        sway_in, sway_out
    )
}

fn confetti_css() -> String {
    "@keyframes confettiFall { to { transform: translateY(100vh) rotate(360deg); opacity: 0; } }"
        .to_string()
}
