//! Shared test infrastructure

pub mod test_data;

use lifelink::config::Settings;
use lifelink::http::{create_router, AppState};

/// Settings suitable for tests: valid secret, quiet logging
pub fn test_settings() -> Settings {
    let mut settings = Settings::default();
    settings.auth.jwt_secret = "integration-test-secret-0123456789abcdef".to_string();
    settings.auth.login_attempts_per_minute = 100;
    settings
}

/// Application state over a lazily-connected pool.
///
/// No connection is attempted until a query runs, so tests that only
/// exercise routing, extraction and rejection paths work without a
/// database.
pub fn test_state(settings: Settings) -> AppState {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .connect_lazy("postgresql://postgres@localhost/lifelink_test")
        .expect("lazy pool construction");

    AppState::new(pool, settings)
}

/// Router over test state
pub fn test_router(settings: Settings) -> axum::Router {
    create_router(test_state(settings))
}
