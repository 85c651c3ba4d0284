//! Signierte Session-Tokens (HS256-JWT)
//!
//! Access- und Refresh-Token tragen die E-Mail als Identitaet und eine
//! zufaellige `jti`, damit zwei in derselben Sekunde ausgestellte Paare
//! nie identisch sind. Gueltigkeit wird ohne Toleranz geprueft.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AuthError, AuthResult};

/// Standard-Lebensdauer Access-Token: 15 Minuten
pub const ACCESS_TTL_SEKUNDEN: i64 = 15 * 60;

/// Standard-Lebensdauer Refresh-Token: 30 Tage
pub const REFRESH_TTL_SEKUNDEN: i64 = 30 * 24 * 60 * 60;

/// Art des Tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenArt {
    Access,
    Refresh,
}

/// Claims eines Session-Tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub email: String,
    pub art: TokenArt,
    /// Issued at (Unix-Zeit)
    pub iat: i64,
    /// Ablauf (Unix-Zeit)
    pub exp: i64,
    pub jti: String,
}

/// Ein frisch ausgestelltes Token-Paar
#[derive(Debug, Clone, Serialize)]
pub struct TokenPaar {
    pub token: String,
    pub refresh_token: String,
    /// Lebensdauer des Access-Tokens in Sekunden
    pub laeuft_ab_in: i64,
}

/// Stellt Tokens aus und prueft sie
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish_non_exhaustive()
    }
}

impl TokenSigner {
    /// Erstellt einen Signer mit den Standard-Lebensdauern
    pub fn neu(secret: &[u8]) -> Self {
        Self::mit_lebensdauer(
            secret,
            Duration::seconds(ACCESS_TTL_SEKUNDEN),
            Duration::seconds(REFRESH_TTL_SEKUNDEN),
        )
    }

    pub fn mit_lebensdauer(secret: &[u8], access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            access_ttl,
            refresh_ttl,
        }
    }

    fn ausstellen(&self, email: &str, art: TokenArt, ttl: Duration) -> AuthResult<String> {
        let jetzt = Utc::now();
        let claims = TokenClaims {
            email: email.to_string(),
            art,
            iat: jetzt.timestamp(),
            exp: (jetzt + ttl).timestamp(),
            jti: Uuid::new_v4().to_string(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::intern(format!("JWT-Kodierung fehlgeschlagen: {e}")))
    }

    /// Stellt ein neues Access-/Refresh-Paar fuer eine E-Mail aus
    pub fn paar_ausstellen(&self, email: &str) -> AuthResult<TokenPaar> {
        Ok(TokenPaar {
            token: self.ausstellen(email, TokenArt::Access, self.access_ttl)?,
            refresh_token: self.ausstellen(email, TokenArt::Refresh, self.refresh_ttl)?,
            laeuft_ab_in: self.access_ttl.num_seconds(),
        })
    }

    /// Prueft Signatur, Struktur, Ablauf und Token-Art
    pub fn pruefen(&self, token: &str, erwartet: TokenArt) -> AuthResult<TokenClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;

        let claims = decode::<TokenClaims>(token, &self.decoding, &validation)
            .map(|daten| daten.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::AnmeldedatenAbgelaufen("expired token"),
                _ => AuthError::AnmeldedatenUngueltig("invalid token"),
            })?;

        if claims.art != erwartet {
            return Err(AuthError::AnmeldedatenUngueltig("invalid token"));
        }
        Ok(claims)
    }
}
