//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{admin, auth, bank, donor, hospital, notifications, public};
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS is permissive; the API carries no cookies, only bearer tokens
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let auth_routes = Router::new()
        .route("/auth/register/{role}", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
        .route("/auth/me", put(auth::update_me));

    let mut public_routes = Router::new()
        .route("/drives", get(public::list_drives))
        .route("/drives/{id}", get(public::drive_detail))
        .route("/inventory", get(public::inventory_overview));
    if state.settings.features.emergency_board {
        public_routes = public_routes.route("/requests/urgent", get(public::urgent_requests));
    }

    let donor_routes = Router::new()
        .route("/donor/dashboard", get(donor::dashboard))
        .route("/donor/donations", get(donor::donation_history))
        .route("/donor/donations", post(donor::submit_donation))
        .route("/donor/donations/{id}/cancel", post(donor::cancel_donation))
        .route("/donor/drives/{id}/register", post(donor::register_for_drive))
        .route(
            "/donor/registrations/{id}/cancel",
            post(donor::cancel_registration),
        );

    let hospital_routes = Router::new()
        .route("/hospital/dashboard", get(hospital::dashboard))
        .route("/hospital/requests", get(hospital::list_requests))
        .route("/hospital/requests", post(hospital::create_request))
        .route("/hospital/requests/{id}", get(hospital::request_detail))
        .route("/hospital/requests/{id}", put(hospital::update_request))
        .route(
            "/hospital/requests/{id}/cancel",
            post(hospital::cancel_request),
        );

    let bank_routes = Router::new()
        .route("/bank/dashboard", get(bank::dashboard))
        .route("/bank/inventory", get(bank::inventory))
        .route("/bank/inventory", put(bank::set_inventory))
        .route("/bank/drives", get(bank::list_drives))
        .route("/bank/drives", post(bank::create_drive))
        .route("/bank/drives/{id}", get(bank::drive_detail))
        .route("/bank/drives/{id}", put(bank::update_drive))
        .route("/bank/drives/{id}", delete(bank::delete_drive))
        .route(
            "/bank/registrations/{id}/confirm",
            post(bank::confirm_registration),
        );

    let admin_routes = Router::new()
        .route("/admin/dashboard", get(admin::dashboard))
        .route("/admin/stats", get(admin::stats))
        .route("/admin/requests/{id}/accept", post(admin::accept_request))
        .route("/admin/requests/{id}/reject", post(admin::reject_request))
        .route("/admin/requests/{id}/fulfill", post(admin::fulfill_request))
        .route("/admin/donations/{id}/accept", post(admin::accept_donation))
        .route("/admin/donations/{id}/reject", post(admin::reject_donation))
        .route(
            "/admin/donations/{id}/complete",
            post(admin::complete_donation),
        )
        .route("/admin/drives", post(admin::create_drive))
        .route("/admin/drives/{id}", put(admin::update_drive))
        .route("/admin/drives/{id}", delete(admin::delete_drive))
        .route("/admin/users", get(admin::list_users))
        .route("/admin/users/{id}/activate", post(admin::activate_user))
        .route("/admin/users/{id}/deactivate", post(admin::deactivate_user));

    let notification_routes = Router::new()
        .route("/notifications", get(notifications::list))
        .route("/notifications/{id}/read", post(notifications::mark_read));

    let api_v1 = auth_routes
        .merge(public_routes)
        .merge(donor_routes)
        .merge(hospital_routes)
        .merge(bank_routes)
        .merge(admin_routes)
        .merge(notification_routes);

    Router::new()
        .route("/health", get(public::health_check))
        .nest("/v1", api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
