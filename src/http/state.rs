//! Shared application state for the HTTP layer.

use crate::config::settings::Settings;
use crate::database::{DatabasePool, DatabaseService};
use crate::middleware::rate_limit::LoginRateLimiter;
use crate::services::ServiceFactory;

/// State handed to every handler via axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub pool: DatabasePool,
    pub db: DatabaseService,
    pub services: ServiceFactory,
    pub login_limiter: LoginRateLimiter,
    pub settings: Settings,
}

impl AppState {
    pub fn new(pool: DatabasePool, settings: Settings) -> Self {
        let db = DatabaseService::new(pool.clone());
        let services = ServiceFactory::new(db.clone(), settings.clone());
        let login_limiter = LoginRateLimiter::new(settings.auth.login_attempts_per_minute);

        Self {
            pool,
            db,
            services,
            login_limiter,
            settings,
        }
    }
}
