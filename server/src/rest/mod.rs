//! REST-Interface fuer Zielzeit
//!
//! Jeder geschuetzte Handler loest zuerst die Identitaet ueber genau einen
//! Autorisierer auf (Session oder API-Schluessel) und prueft danach das
//! Eigentum an der Ressource. Erst dann folgt die eigentliche Logik.

pub mod handlers;
pub mod routes;
pub mod server;

use std::sync::Arc;

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use zielzeit_auth::{Anfrage, AuthError, AuthService};
use zielzeit_core::ZielzeitError;
use zielzeit_db::{DbError, SpeicherDb};

/// Axum-State fuer den REST-Server
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService<SpeicherDb>>,
    /// Veranstaltungen und ihre Besitzer
    pub ereignisse: Arc<SpeicherDb>,
}

impl AppState {
    pub fn neu(auth: Arc<AuthService<SpeicherDb>>, ereignisse: Arc<SpeicherDb>) -> Self {
        Self { auth, ereignisse }
    }
}

/// Baut den Anfrage-Kontext aus den HTTP-Headern
///
/// Herkunft ist `Origin`, sonst `Referer`.
pub fn anfrage_aus_headers(headers: &HeaderMap) -> Anfrage {
    let wert = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let mut anfrage = Anfrage::neu();
    if let Some(authorization) = wert(header::AUTHORIZATION) {
        anfrage = anfrage.mit_authorization(authorization);
    }
    if let Some(herkunft) = wert(header::ORIGIN).or_else(|| wert(header::REFERER)) {
        anfrage = anfrage.mit_herkunft(herkunft);
    }
    anfrage
}

/// Fehler eines Handlers, wird zur JSON-Fehlerantwort
#[derive(Debug)]
pub struct ApiFehler(pub ZielzeitError);

pub type ApiResult<T> = Result<T, ApiFehler>;

impl From<AuthError> for ApiFehler {
    fn from(e: AuthError) -> Self {
        if e.ist_ablehnung() {
            tracing::debug!(grund = %e, "Anfrage abgelehnt");
        }
        Self(e.into())
    }
}

impl From<DbError> for ApiFehler {
    fn from(e: DbError) -> Self {
        Self::from(AuthError::from(e))
    }
}

impl From<ZielzeitError> for ApiFehler {
    fn from(e: ZielzeitError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiFehler {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if self.0.ist_serverfehler() {
            tracing::error!(fehler = %self.0, "Serverfehler bei REST-Anfrage");
        }
        fehler_antwort(status, &self.0.oeffentliche_nachricht())
    }
}

/// Fehlerantwort fuer REST-API
pub fn fehler_antwort(status: StatusCode, nachricht: &str) -> Response {
    (
        status,
        Json(json!({
            "error": {
                "code": status.as_u16(),
                "message": nachricht
            }
        })),
    )
        .into_response()
}

pub use server::RestServer;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn origin_vor_referer() {
        let mut headers = HeaderMap::new();
        headers.insert(header::ORIGIN, HeaderValue::from_static("https://a.example.org"));
        headers.insert(header::REFERER, HeaderValue::from_static("https://b.example.org/x"));
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));

        let anfrage = anfrage_aus_headers(&headers);
        assert_eq!(anfrage.herkunft.as_deref(), Some("https://a.example.org"));
        assert_eq!(anfrage.bearer_token(), Some("abc"));
    }

    #[test]
    fn referer_als_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert(header::REFERER, HeaderValue::from_static("https://b.example.org/x"));

        let anfrage = anfrage_aus_headers(&headers);
        assert_eq!(anfrage.herkunft.as_deref(), Some("https://b.example.org/x"));
        assert_eq!(anfrage.bearer_token(), None);
    }

    #[test]
    fn ablehnungen_werden_401() {
        let antwort = ApiFehler::from(AuthError::SessionInaktiv).into_response();
        assert_eq!(antwort.status(), StatusCode::UNAUTHORIZED);

        let antwort = ApiFehler::from(AuthError::EigentumVerweigert).into_response();
        assert_eq!(antwort.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn store_ausfall_wird_500() {
        let antwort =
            ApiFehler::from(DbError::NichtVerfuegbar("timeout".into())).into_response();
        assert_eq!(antwort.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
