// Shared fixtures for the test modules below
#[path = "tests/common/fixtures.rs"]
pub mod fixtures;

// Include coordinator tests
#[path = "services/rsvp_test.rs"]
mod rsvp_tests;

// Include HTTP handler tests
#[path = "handlers/api_test.rs"]
mod api_tests;

// Include client tests
#[path = "client_test.rs"]
mod client_tests;
