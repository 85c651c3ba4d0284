//! Session-Autorisierung
//!
//! Ein Session-Token ist nur gueltig, solange es byte-genau dem im Konto
//! gespeicherten Token entspricht. Jede neue Anmeldung ueberschreibt das
//! gespeicherte Paar und entwertet damit alle frueheren Tokens, auch wenn
//! deren eigene Signatur noch nicht abgelaufen ist.
//!
//! Reihenfolge: Header -> Signatur/Ablauf -> Identitaet -> aktive Session -> Sperre.
//! Die Sperre wird zuletzt geprueft, damit ein veraltetes Token eines
//! gesperrten Kontos denselben Grund liefert wie bei einem offenen Konto.

use std::sync::Arc;

use zielzeit_db::{models::KontoRecord, repository::KontoRepository};

use crate::anfrage::Anfrage;
use crate::error::{AuthError, AuthResult};
use crate::token::{TokenArt, TokenSigner};

/// Autorisierer fuer Session-Tokens
pub struct SessionAutorisierer<K: KontoRepository> {
    repo: Arc<K>,
    signer: Arc<TokenSigner>,
}

impl<K: KontoRepository> SessionAutorisierer<K> {
    pub fn neu(repo: Arc<K>, signer: Arc<TokenSigner>) -> Self {
        Self { repo, signer }
    }

    /// Loest das Bearer-Token zum Konto der aktiven Session auf
    pub async fn autorisieren(&self, anfrage: &Anfrage) -> AuthResult<KontoRecord> {
        let token = anfrage.bearer_token().ok_or(AuthError::AnmeldedatenFehlen)?;
        self.token_autorisieren(token, TokenArt::Access).await
    }

    /// Prueft ein Refresh-Token nach denselben Regeln wie ein Access-Token
    pub async fn refresh_autorisieren(&self, refresh_token: &str) -> AuthResult<KontoRecord> {
        if refresh_token.is_empty() {
            return Err(AuthError::AnmeldedatenFehlen);
        }
        self.token_autorisieren(refresh_token, TokenArt::Refresh).await
    }

    async fn token_autorisieren(&self, token: &str, art: TokenArt) -> AuthResult<KontoRecord> {
        let claims = self.signer.pruefen(token, art)?;

        // Unbekannte E-Mail ist ein Anmeldefehler, kein 404
        let konto = self
            .repo
            .konto_laden_nach_email(&claims.email)
            .await?
            .ok_or(AuthError::AnmeldedatenUngueltig("unknown identity"))?;

        let aktiv = match art {
            TokenArt::Access => konto.ist_aktives_token(token),
            TokenArt::Refresh => konto.ist_aktives_refresh_token(token),
        };
        if !aktiv {
            tracing::debug!(konto_id = %konto.id, ?art, "Token gehoert nicht zur aktiven Session");
            return Err(AuthError::SessionInaktiv);
        }

        if konto.gesperrt {
            tracing::warn!(konto_id = %konto.id, "Zugriff mit gesperrtem Konto");
            return Err(AuthError::KontoGesperrt);
        }

        Ok(konto)
    }
}
