//! Server-Konfiguration
//!
//! Wird beim Start aus einer TOML-Datei geladen. Alle Felder haben
//! Standardwerte, sodass der Server ohne Konfigurationsdatei startet.

use serde::{Deserialize, Serialize};

use zielzeit_auth::token::{ACCESS_TTL_SEKUNDEN, REFRESH_TTL_SEKUNDEN};

/// Umgebungsvariable, die das JWT-Secret aus der Datei ueberschreibt
pub const JWT_SECRET_ENV: &str = "ZIELZEIT_JWT_SECRET";

/// Vollstaendige Server-Konfiguration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Netzwerk und CORS
    pub server: ServerEinstellungen,
    /// Token-Signatur und Lebensdauern
    pub auth: AuthEinstellungen,
    /// Logging-Einstellungen
    pub logging: LoggingEinstellungen,
    /// Erstes Admin-Konto beim Start
    pub bootstrap: BootstrapEinstellungen,
}

/// Allgemeine Server-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerEinstellungen {
    pub bind_adresse: String,
    pub port: u16,
    /// CORS-Origins fuer REST (leer = alle erlaubt)
    pub cors_origins: Vec<String>,
}

impl Default for ServerEinstellungen {
    fn default() -> Self {
        Self {
            bind_adresse: "0.0.0.0".into(),
            port: 8080,
            cors_origins: vec![],
        }
    }
}

/// Einstellungen fuer Session-Tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthEinstellungen {
    /// HS256-Secret (leer = aus Umgebung oder fluechtig generiert)
    pub jwt_secret: Option<String>,
    pub access_ttl_sekunden: i64,
    pub refresh_ttl_sekunden: i64,
}

impl Default for AuthEinstellungen {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            access_ttl_sekunden: ACCESS_TTL_SEKUNDEN,
            refresh_ttl_sekunden: REFRESH_TTL_SEKUNDEN,
        }
    }
}

/// Logging-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingEinstellungen {
    /// Log-Level: "trace", "debug", "info", "warn", "error"
    pub level: String,
    /// Format: "json" oder "text"
    pub format: String,
}

impl Default for LoggingEinstellungen {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "text".into(),
        }
    }
}

/// Admin-Konto, das beim Start angelegt wird, falls der Store leer ist
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapEinstellungen {
    pub admin_email: Option<String>,
    pub admin_passwort: Option<String>,
}

impl ServerConfig {
    /// Laedt die Konfiguration aus einer TOML-Datei.
    /// Gibt die Standardkonfiguration zurueck wenn die Datei nicht existiert.
    pub fn laden(pfad: &str) -> anyhow::Result<Self> {
        match std::fs::read_to_string(pfad) {
            Ok(inhalt) => Self::aus_toml(&inhalt)
                .map_err(|e| anyhow::anyhow!("Konfigurationsfehler in '{pfad}': {e}")),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(
                    pfad = pfad,
                    "Konfigurationsdatei nicht gefunden, verwende Standardwerte"
                );
                Ok(Self::default())
            }
            Err(e) => Err(anyhow::anyhow!(
                "Konfigurationsdatei '{pfad}' nicht lesbar: {e}"
            )),
        }
    }

    pub fn aus_toml(inhalt: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(inhalt)?;
        config.pruefen()?;
        Ok(config)
    }

    fn pruefen(&self) -> anyhow::Result<()> {
        if self.auth.access_ttl_sekunden <= 0 || self.auth.refresh_ttl_sekunden <= 0 {
            anyhow::bail!("Token-Lebensdauern muessen positiv sein");
        }
        if self.bootstrap.admin_email.is_some() != self.bootstrap.admin_passwort.is_some() {
            anyhow::bail!("bootstrap braucht admin_email und admin_passwort zusammen");
        }
        Ok(())
    }

    /// Gibt die vollstaendige Bind-Adresse fuer die REST-API zurueck
    pub fn rest_bind_adresse(&self) -> String {
        format!("{}:{}", self.server.bind_adresse, self.server.port)
    }

    /// JWT-Secret: Umgebung vor Datei; `None` wenn beides fehlt
    pub fn jwt_secret(&self) -> Option<String> {
        Self::secret_waehlen(
            std::env::var(JWT_SECRET_ENV).ok(),
            self.auth.jwt_secret.clone(),
        )
    }

    fn secret_waehlen(umgebung: Option<String>, datei: Option<String>) -> Option<String> {
        umgebung
            .filter(|s| !s.is_empty())
            .or(datei.filter(|s| !s.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_config_ist_valide() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.auth.access_ttl_sekunden, 900);
        assert_eq!(cfg.logging.level, "info");
        assert!(cfg.bootstrap.admin_email.is_none());
        assert!(cfg.pruefen().is_ok());
    }

    #[test]
    fn bind_adresse() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.rest_bind_adresse(), "0.0.0.0:8080");
    }

    #[test]
    fn config_aus_toml_string() {
        let toml = r#"
            [server]
            port = 9000

            [auth]
            jwt_secret = "geheim"
            access_ttl_sekunden = 60

            [bootstrap]
            admin_email = "admin@example.org"
            admin_passwort = "start"
        "#;
        let cfg = ServerConfig::aus_toml(toml).unwrap();
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.auth.access_ttl_sekunden, 60);
        assert_eq!(cfg.auth.jwt_secret.as_deref(), Some("geheim"));
        // Nicht angegebene Felder behalten Standardwerte
        assert_eq!(cfg.server.bind_adresse, "0.0.0.0");
        assert_eq!(cfg.auth.refresh_ttl_sekunden, REFRESH_TTL_SEKUNDEN);
    }

    #[test]
    fn unvollstaendiger_bootstrap_wird_abgelehnt() {
        let toml = r#"
            [bootstrap]
            admin_email = "admin@example.org"
        "#;
        assert!(ServerConfig::aus_toml(toml).is_err());
    }

    #[test]
    fn negative_lebensdauer_wird_abgelehnt() {
        let toml = r#"
            [auth]
            access_ttl_sekunden = -1
        "#;
        assert!(ServerConfig::aus_toml(toml).is_err());
    }

    #[test]
    fn umgebung_schlaegt_datei() {
        assert_eq!(
            ServerConfig::secret_waehlen(Some("env".into()), Some("datei".into())).as_deref(),
            Some("env")
        );
        assert_eq!(
            ServerConfig::secret_waehlen(Some(String::new()), Some("datei".into())).as_deref(),
            Some("datei")
        );
        assert_eq!(ServerConfig::secret_waehlen(None, None), None);
    }

    #[test]
    fn fehlende_datei_liefert_standard() {
        let cfg = ServerConfig::laden("/gibt/es/nicht/config.toml").unwrap();
        assert_eq!(cfg.server.port, 8080);
    }
}
