//! Route-Definitionen fuer die REST-API

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::rest::{handlers, server::health, AppState};

/// Erstellt den vollstaendigen Router ohne Layer
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        // Session-Ausstellung
        .route("/r/auth/login", post(handlers::auth::login))
        .route("/r/auth/refresh", post(handlers::auth::refresh))
        .route("/r/auth/logout", post(handlers::auth::logout))
        // Kontoverwaltung (Admin)
        .route("/r/admin/accounts", post(handlers::konten::create_account))
        .route(
            "/r/admin/accounts/:id/lock",
            post(handlers::konten::lock_account),
        )
        .route(
            "/r/admin/accounts/:id/unlock",
            post(handlers::konten::unlock_account),
        )
        // Verknuepfungen
        .route("/r/accounts/:id/links", post(handlers::konten::link_account))
        .route(
            "/r/accounts/:id/links/:ziel",
            delete(handlers::konten::unlink_account),
        )
        // API-Schluessel
        .route(
            "/r/accounts/:id/keys",
            get(handlers::schluessel::list_keys).post(handlers::schluessel::create_key),
        )
        .route(
            "/r/accounts/:id/keys/:key_id",
            delete(handlers::schluessel::delete_key),
        )
        // Veranstaltungen (Session)
        .route("/r/events", post(handlers::ereignisse::create_event))
        .route(
            "/r/events/:slug",
            put(handlers::ereignisse::update_event).delete(handlers::ereignisse::delete_event),
        )
        // Veranstaltungen (API-Schluessel)
        .route(
            "/api/v1/events/:slug",
            get(handlers::ereignisse::api_get_event)
                .put(handlers::ereignisse::api_update_event)
                .delete(handlers::ereignisse::api_delete_event),
        )
}
