//! zielzeit-server – Bibliotheks-Root
//!
//! Deklariert alle Server-Module und stellt den oeffentlichen Einstiegspunkt
//! fuer Integrationstests bereit.

pub mod config;
pub mod rest;

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Duration;

use config::ServerConfig;
use rest::{server::RestServerKonfig, AppState, RestServer};
use zielzeit_auth::{schluessel_generieren, AuthService, TokenSigner};
use zielzeit_db::{models::KontoTyp, SpeicherDb};

/// Haelt den Server-Zustand zusammen
pub struct Server {
    pub config: ServerConfig,
}

impl Server {
    /// Erstellt einen neuen Server aus der gegebenen Konfiguration
    pub fn neu(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Baut Store, Signer und Auth-Service auf und legt das Bootstrap-Konto an
    pub async fn zustand_aufbauen(&self) -> Result<AppState> {
        let secret = match self.config.jwt_secret() {
            Some(secret) => secret,
            None => {
                tracing::warn!(
                    "Kein JWT-Secret konfiguriert, verwende fluechtiges Secret (Sessions enden mit dem Prozess)"
                );
                schluessel_generieren()
            }
        };
        let signer = TokenSigner::mit_lebensdauer(
            secret.as_bytes(),
            Duration::seconds(self.config.auth.access_ttl_sekunden),
            Duration::seconds(self.config.auth.refresh_ttl_sekunden),
        );

        let db = Arc::new(SpeicherDb::neu());
        let auth = Arc::new(AuthService::neu(Arc::clone(&db), Arc::new(signer)));

        if let (Some(email), Some(passwort)) = (
            self.config.bootstrap.admin_email.as_deref(),
            self.config.bootstrap.admin_passwort.as_deref(),
        ) {
            if db.anzahl_konten() == 0 {
                let admin = auth
                    .konto_anlegen(email, passwort, KontoTyp::Admin)
                    .await
                    .context("Bootstrap-Admin konnte nicht angelegt werden")?;
                tracing::info!(konto_id = %admin.id, "Bootstrap-Admin angelegt");
            }
        } else {
            tracing::warn!("Kein Bootstrap-Admin konfiguriert, Konten koennen nicht angelegt werden");
        }

        Ok(AppState::neu(auth, db))
    }

    /// Startet die REST-API und laeuft bis zum Shutdown-Signal
    pub async fn starten(self) -> Result<()> {
        let bind_addr: std::net::SocketAddr = self
            .config
            .rest_bind_adresse()
            .parse()
            .with_context(|| format!("Ungueltige Bind-Adresse '{}'", self.config.rest_bind_adresse()))?;

        let state = self.zustand_aufbauen().await?;

        tracing::info!(
            adresse = %bind_addr,
            access_ttl = self.config.auth.access_ttl_sekunden,
            "Zielzeit-Server startet"
        );

        RestServer::neu(RestServerKonfig {
            bind_addr,
            cors_origins: self.config.server.cors_origins.clone(),
        })
        .starten(state)
        .await
    }
}
