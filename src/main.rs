use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use party_invite_service::{
    create_router,
    models::countdown::PARTY_STARTS_AT_MS,
    routes::{with_middleware, REQUEST_TIMEOUT},
    services::{
        countdown::{CountdownTicker, SystemClock},
        effects::{SurfaceEffects, PARTICLES_CONTAINER},
        surface::{InMemorySurface, Surface},
    },
    AppState, EmailJsClient, EmailRelay, InvitationSession, Settings, SimulatedRelay,
    UnavailableRelay,
};

/// Resolves on Ctrl+C, or SIGTERM on unix
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!("Failed to listen for SIGTERM: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Interrupted, shutting down"),
        _ = terminate => info!("Terminated, shutting down"),
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::from_env().expect("Invalid configuration");

    // Pick the email relay
    let relay: Arc<dyn EmailRelay> = if settings.simulate_delivery {
        info!("Running in simulation mode: RSVP emails will be logged, not sent");
        Arc::new(SimulatedRelay)
    } else if let Some(relay_settings) = &settings.relay {
        let client = EmailJsClient::new(&relay_settings.endpoint)
            .expect("Failed to build email relay client");
        client
            .init(&relay_settings.public_key)
            .expect("Failed to initialize email relay");
        Arc::new(client)
    } else {
        warn!("No email relay configured - RSVP submissions will fail until EMAILJS_* is set");
        Arc::new(UnavailableRelay)
    };

    // Effects surface with the background sparkles already running
    let surface = Arc::new(InMemorySurface::new().with_container(PARTICLES_CONTAINER));
    let effects = Arc::new(SurfaceEffects::new(Arc::clone(&surface) as Arc<dyn Surface>));
    let sparkles = effects.sparkles();
    info!("Attached {} sparkles to the effects surface", sparkles);

    let session = Arc::new(InvitationSession::new(
        relay,
        effects,
        Arc::new(SystemClock),
        settings.relay_target(),
    ));

    // Start the countdown; it stops when the ticker is dropped at shutdown
    let ticker = CountdownTicker::spawn(PARTY_STARTS_AT_MS, Arc::new(SystemClock));

    // Create shared application state
    let app_state = Arc::new(AppState {
        session,
        countdown: ticker.subscribe(),
        surface,
    });

    if settings.is_production {
        info!("Running in PRODUCTION mode - restricting available endpoints");
    } else {
        info!("Running in DEVELOPMENT mode - all endpoints will be available");
    }

    // Create router with appropriate routes based on environment
    let app = with_middleware(
        create_router(app_state, settings.is_production),
        REQUEST_TIMEOUT,
    );

    info!("Server listening on {}", settings.bind_addr);

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr)
        .await
        .expect("Failed to bind to address");

    info!("Server is ready to accept connections");
    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", err);
    }

    ticker.stop();
    info!("Server has been gracefully shut down");
}
