//! Axum HTTP-Server fuer Zielzeit

use std::net::SocketAddr;

use anyhow::Result;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Json};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::rest::{routes::router, AppState};

/// REST-Server-Konfiguration
#[derive(Debug, Clone)]
pub struct RestServerKonfig {
    pub bind_addr: SocketAddr,
    /// Erlaubte CORS-Origins. Leer = alle Origins erlaubt (nur fuer Entwicklung).
    pub cors_origins: Vec<String>,
}

/// Axum HTTP-Server
pub struct RestServer {
    konfig: RestServerKonfig,
}

impl RestServer {
    pub fn neu(konfig: RestServerKonfig) -> Self {
        Self { konfig }
    }

    /// Router mit allen Layern und State, ohne Listener
    pub fn app(&self, state: AppState) -> Router {
        router()
            .layer(TraceLayer::new_for_http())
            .layer(self.cors_layer())
            .with_state(state)
    }

    fn cors_layer(&self) -> CorsLayer {
        if self.konfig.cors_origins.is_empty() {
            return CorsLayer::permissive();
        }
        let origins: Vec<HeaderValue> = self
            .konfig
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers(tower_http::cors::Any)
    }

    /// Startet den REST-Server und laeuft bis Ctrl-C
    pub async fn starten(self, state: AppState) -> Result<()> {
        let app = self.app(state);

        let listener = tokio::net::TcpListener::bind(self.konfig.bind_addr).await?;
        tracing::info!(addr = %self.konfig.bind_addr, "REST-Server gestartet");

        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Shutdown-Signal empfangen, Server wird beendet");
            })
            .await?;
        Ok(())
    }
}

/// GET /health – Health-Check-Endpunkt
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}
