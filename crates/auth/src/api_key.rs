//! API-Schluessel-Autorisierung
//!
//! Langlebige Schluessel fuer Zeitmess- und Anzeigesysteme. Ein Schluessel
//! hat einen Typ (read/write/delete), einen Ablaufzeitpunkt und optional
//! eine Liste erlaubter Hosts.
//!
//! Pruefreihenfolge: Header -> Aufloesung -> Ablauf -> Herkunft -> Scope.

use std::sync::Arc;

use base64::Engine;
use chrono::{DateTime, Utc};
use rand::RngCore;

use zielzeit_db::{
    models::{KontoRecord, SchluesselRecord, SchluesselTyp},
    repository::SchluesselRepository,
};

use crate::anfrage::Anfrage;
use crate::error::{AuthError, AuthResult};

/// Praefix aller generierten Schluesselwerte
pub const SCHLUESSEL_PRAEFIX: &str = "zz_";

/// Prueft die Herkunft gegen die gespeicherten Muster.
///
/// Leere Liste erlaubt alles. Sonst muss die deklarierte Herkunft ein Muster
/// als Teilstring enthalten (ohne Beachtung der Gross-/Kleinschreibung).
/// Leere Muster passen nie, eine fehlende Herkunft passt nie.
pub fn herkunft_erlaubt(erlaubte_hosts: &[String], herkunft: Option<&str>) -> bool {
    if erlaubte_hosts.is_empty() {
        return true;
    }
    let Some(herkunft) = herkunft.map(str::to_ascii_lowercase) else {
        return false;
    };

    erlaubte_hosts
        .iter()
        .map(|muster| muster.trim())
        .filter(|muster| !muster.is_empty())
        .any(|muster| herkunft.contains(&muster.to_ascii_lowercase()))
}

/// Prueft einen bereits aufgeloesten Schluessel (Schritte 3 bis 5)
pub fn schluessel_pruefen(
    schluessel: &SchluesselRecord,
    herkunft: Option<&str>,
    benoetigt: SchluesselTyp,
    jetzt: DateTime<Utc>,
) -> AuthResult<()> {
    if schluessel.ist_abgelaufen(jetzt) {
        return Err(AuthError::AnmeldedatenAbgelaufen("expired credential"));
    }

    if !herkunft_erlaubt(&schluessel.erlaubte_hosts, herkunft) {
        return Err(AuthError::HerkunftNichtErlaubt);
    }

    if !schluessel.typ.erfuellt(benoetigt) {
        return Err(AuthError::ScopeUnzureichend {
            benoetigt,
            vorhanden: schluessel.typ,
        });
    }

    Ok(())
}

/// Autorisierer fuer API-Schluessel. Liest nur, schreibt nie.
pub struct ApiKeyAutorisierer<S: SchluesselRepository> {
    repo: Arc<S>,
}

impl<S: SchluesselRepository> ApiKeyAutorisierer<S> {
    pub fn neu(repo: Arc<S>) -> Self {
        Self { repo }
    }

    /// Loest den Bearer-Schluessel auf und prueft ihn gegen den benoetigten Scope
    pub async fn autorisieren(
        &self,
        anfrage: &Anfrage,
        benoetigt: SchluesselTyp,
    ) -> AuthResult<(KontoRecord, SchluesselRecord)> {
        self.autorisieren_zum(anfrage, benoetigt, Utc::now()).await
    }

    /// Wie [`Self::autorisieren`], aber mit explizitem Pruefzeitpunkt
    pub async fn autorisieren_zum(
        &self,
        anfrage: &Anfrage,
        benoetigt: SchluesselTyp,
        jetzt: DateTime<Utc>,
    ) -> AuthResult<(KontoRecord, SchluesselRecord)> {
        let wert = anfrage.bearer_token().ok_or(AuthError::AnmeldedatenFehlen)?;

        // Fehlender Schluessel und fehlendes Konto sind nicht unterscheidbar
        let (schluessel, konto) = self
            .repo
            .schluessel_mit_konto_laden(wert)
            .await?
            .ok_or(AuthError::AnmeldedatenUngueltig("credential not found"))?;

        if let Err(e) = schluessel_pruefen(&schluessel, anfrage.herkunft.as_deref(), benoetigt, jetzt)
        {
            tracing::debug!(
                schluessel_id = %schluessel.id,
                konto_id = %konto.id,
                benoetigt = %benoetigt,
                grund = %e,
                "API-Schluessel abgelehnt"
            );
            return Err(e);
        }

        Ok((konto, schluessel))
    }
}

/// Generiert einen kryptografisch sicheren Schluesselwert
///
/// Format: "zz_" + 43 Zeichen URL-sicheres Base64 (256 Bit Entropie)
pub fn schluessel_generieren() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    let encoded = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes);
    format!("{SCHLUESSEL_PRAEFIX}{encoded}")
}
