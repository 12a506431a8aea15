#[cfg(test)]
mod api_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tokio::sync::watch;

    use crate::client::EmailRelay;
    use crate::client_mock::{setup_failing_relay, RecordingRelay};
    use crate::handlers::api::AppState;
    use crate::models::countdown::CountdownValue;
    use crate::routes::create_router;
    use crate::services::effects::{SurfaceEffects, CONFETTI_COUNT};
    use crate::services::rsvp::{InvitationSession, DELIVERY_FAILED_MESSAGE, INVALID_FORM_MESSAGE};
    use crate::services::surface::{InMemorySurface, Surface};
    use crate::tests::fixtures::{fixed_clock, relay_target};

    // Helper function to set up a test server around one session
    fn setup_test_server(
        relay: Arc<dyn EmailRelay>,
        is_production: bool,
    ) -> (TestServer, Arc<InMemorySurface>) {
        let surface = Arc::new(InMemorySurface::new());
        let effects = Arc::new(SurfaceEffects::new(Arc::clone(&surface) as Arc<dyn Surface>));
        let session = Arc::new(InvitationSession::new(
            relay,
            effects,
            fixed_clock(),
            relay_target(),
        ));

        let (_sender, countdown) = watch::channel(CountdownValue {
            days: 12,
            hours: 3,
            minutes: 7,
            seconds: 45,
        });

        let app_state = Arc::new(AppState {
            session,
            countdown,
            surface: Arc::clone(&surface),
        });

        let server = TestServer::new(create_router(app_state, is_production)).unwrap();
        (server, surface)
    }

    #[tokio::test]
    async fn test_health_check() {
        let (server, _) = setup_test_server(Arc::new(RecordingRelay::default()), true);
        let response = server.get("/health").await;
        response.assert_status_ok();
        response.assert_text("OK");
    }

    #[tokio::test]
    async fn test_countdown_endpoint() {
        let (server, _) = setup_test_server(Arc::new(RecordingRelay::default()), false);
        let body: Value = server.get("/countdown").await.json();

        assert_eq!(body["days"], 12);
        assert_eq!(body["seconds"], 45);
        assert_eq!(body["display"], json!(["12", "03", "07", "45"]));
        assert_eq!(body["party_started"], false);
    }

    #[tokio::test]
    async fn test_gallery_lists_four_photos() {
        let (server, _) = setup_test_server(Arc::new(RecordingRelay::default()), false);
        let body: Value = server.get("/gallery").await.json();
        assert_eq!(body.as_array().unwrap().len(), 4);
        assert_eq!(body[0]["src"], "images/1.jpg");
    }

    #[tokio::test]
    async fn test_guest_counters() {
        let (server, _) = setup_test_server(Arc::new(RecordingRelay::default()), false);

        let body: Value = server.post("/guests/adults/decrement").await.json();
        assert_eq!(body["guests"]["adults"], 1);

        server.post("/guests/children-0-4/increment").await.assert_status_ok();
        let body: Value = server.post("/guests/children-5-plus/increment").await.json();
        assert_eq!(body["guests"]["children_5_plus"], 1);
        assert_eq!(body["total_guests"], 3);

        server
            .post("/guests/babies/increment")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_short_name_is_rejected() {
        let relay = Arc::new(RecordingRelay::default());
        let (server, surface) = setup_test_server(relay.clone(), false);

        server
            .patch("/rsvp/form")
            .json(&json!({ "name": "Al", "attendance": "yes" }))
            .await
            .assert_status_ok();

        let response = server.post("/rsvp/submit").await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = response.json();
        assert_eq!(body["status"], "invalid");
        assert_eq!(body["message"], INVALID_FORM_MESSAGE);

        assert!(relay.sent().is_empty());
        assert_eq!(surface.count_with_class("toast-error"), 1);
    }

    #[tokio::test]
    async fn test_successful_submission_flow() {
        let relay = Arc::new(RecordingRelay::default());
        let (server, surface) = setup_test_server(relay.clone(), false);

        server
            .patch("/rsvp/form")
            .json(&json!({ "name": "Beatriz", "attendance": "no", "note": "Sorry!" }))
            .await
            .assert_status_ok();
        server.post("/guests/adults/increment").await.assert_status_ok();

        let response = server.post("/rsvp/submit").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body, json!({ "status": "sent", "attending": false }));

        let sent = relay.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].adults, 2);
        assert_eq!(sent[0].attendance, "No");

        let view: Value = server.get("/rsvp").await.json();
        assert_eq!(view["form"]["name"], "");
        assert_eq!(view["form"]["attendance"], "yes");
        assert_eq!(view["guests"]["adults"], 1);
        assert_eq!(view["total_guests"], 1);
        assert_eq!(view["feedback"]["show_success_modal"], true);
        assert_eq!(view["feedback"]["is_submitting"], false);
        assert_eq!(surface.count_with_class("confetti"), CONFETTI_COUNT);

        server
            .post("/rsvp/modal/close")
            .await
            .assert_status(StatusCode::NO_CONTENT);
        let view: Value = server.get("/rsvp").await.json();
        assert_eq!(view["feedback"]["show_success_modal"], false);
    }

    #[tokio::test]
    async fn test_delivery_failure_keeps_form() {
        let (server, _) = setup_test_server(setup_failing_relay(), false);

        server
            .patch("/rsvp/form")
            .json(&json!({ "name": "Beatriz" }))
            .await
            .assert_status_ok();

        let response = server.post("/rsvp/submit").await;
        response.assert_status(StatusCode::BAD_GATEWAY);
        let body: Value = response.json();
        assert_eq!(body["status"], "delivery_failed");
        assert_eq!(body["message"], DELIVERY_FAILED_MESSAGE);

        let view: Value = server.get("/rsvp").await.json();
        assert_eq!(view["form"]["name"], "Beatriz");
        assert_eq!(view["feedback"]["is_submitting"], false);
    }

    #[tokio::test]
    async fn test_inspection_routes_hidden_in_production() {
        let (server, _) = setup_test_server(Arc::new(RecordingRelay::default()), true);
        server
            .get("/effects")
            .await
            .assert_status(StatusCode::NOT_FOUND);

        let (server, _) = setup_test_server(Arc::new(RecordingRelay::default()), false);
        server.get("/effects").await.assert_status_ok();
        let sample: Value = server.get("/test/sample-payload").await.json();
        assert_eq!(sample["total_guests"], 3);
    }
}
