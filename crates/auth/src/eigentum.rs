//! Eigentumsentscheidung
//!
//! Reine Funktion ohne Seiteneffekte. Wird genau einmal pro geschuetzter
//! Operation aufgerufen, nachdem die Identitaet bereits aufgeloest wurde.
//!
//! Regeln (erste passende gewinnt):
//! 1. Admin
//! 2. direkter Besitzer
//! 3. mit dem Besitzer verknuepftes Konto
//! 4. nur lesend: nicht eingeschraenkte Ressource
//! 5. sonst verweigert

use zielzeit_core::KontoId;
use zielzeit_db::models::{KontoRecord, RessourcenBesitz};

use crate::error::{AuthError, AuthResult};

/// Ergebnis der Eigentumsentscheidung
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entscheidung {
    Erlaubt(Grund),
    Verweigert,
}

/// Welche Regel den Zugriff erlaubt hat (fuer Logs)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grund {
    Admin,
    Besitzer,
    Verknuepft,
    Oeffentlich,
}

impl Entscheidung {
    pub fn ist_erlaubt(&self) -> bool {
        matches!(self, Self::Erlaubt(_))
    }

    /// Wandelt eine Ablehnung in `AuthError::EigentumVerweigert`
    pub fn pruefen(self) -> AuthResult<Grund> {
        match self {
            Self::Erlaubt(grund) => Ok(grund),
            Self::Verweigert => Err(AuthError::EigentumVerweigert),
        }
    }
}

/// Regeln 1 bis 3: Admin, Besitzer, Delegation
fn delegierte_autoritaet(konto: &KontoRecord, besitzer: KontoId) -> Option<Grund> {
    if konto.ist_admin() {
        Some(Grund::Admin)
    } else if konto.id == besitzer {
        Some(Grund::Besitzer)
    } else if konto.ist_verknuepft_mit(besitzer) {
        Some(Grund::Verknuepft)
    } else {
        None
    }
}

/// Sichtbarkeitsentscheidung fuer lesende Zugriffe.
///
/// Eine nicht eingeschraenkte Ressource ist fuer jedes authentifizierte Konto
/// sichtbar; eine eingeschraenkte nur ueber Regel 1 bis 3.
pub fn eigentum_autorisieren(
    konto: &KontoRecord,
    besitzer: KontoId,
    eingeschraenkt: bool,
) -> Entscheidung {
    match delegierte_autoritaet(konto, besitzer) {
        Some(grund) => Entscheidung::Erlaubt(grund),
        None if !eingeschraenkt => Entscheidung::Erlaubt(Grund::Oeffentlich),
        None => Entscheidung::Verweigert,
    }
}

/// Entscheidung fuer aendernde Zugriffe: Sichtbarkeit zaehlt hier nie.
pub fn aenderung_autorisieren(konto: &KontoRecord, besitzer: KontoId) -> Entscheidung {
    eigentum_autorisieren(konto, besitzer, true)
}

/// Nur Regel 1 und 2: fuer Verknuepfungen und Schluessel eines Kontos.
///
/// Verknuepfte Konten duerfen die Delegation weder weitergeben noch
/// eigene Schluessel im Namen des Besitzers erzeugen.
pub fn admin_oder_besitzer(konto: &KontoRecord, besitzer: KontoId) -> Entscheidung {
    match delegierte_autoritaet(konto, besitzer) {
        Some(grund @ (Grund::Admin | Grund::Besitzer)) => Entscheidung::Erlaubt(grund),
        _ => Entscheidung::Verweigert,
    }
}

/// Bequemer Aufruf mit einem `RessourcenBesitz`
pub fn lesen_autorisieren(konto: &KontoRecord, besitz: &RessourcenBesitz) -> Entscheidung {
    eigentum_autorisieren(konto, besitz.besitzer, besitz.zugriff_eingeschraenkt)
}

/// Art des Zugriffs auf eine Ressource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zugriff {
    Lesen,
    Aendern,
}

/// Entscheidung fuer eine Ressource, die eventuell nicht existiert
///
/// Eine fehlende Ressource liefert denselben Fehler wie eine Ablehnung.
/// `RessourceNichtGefunden` entsteht erst spaeter, nach bestandener Pruefung.
pub fn ressource_autorisieren(
    konto: &KontoRecord,
    besitz: Option<&RessourcenBesitz>,
    zugriff: Zugriff,
) -> AuthResult<Grund> {
    let Some(besitz) = besitz else {
        tracing::debug!(konto_id = %konto.id, ?zugriff, "Ressource fehlt, als Ablehnung behandelt");
        return Err(AuthError::EigentumVerweigert);
    };

    let entscheidung = match zugriff {
        Zugriff::Lesen => lesen_autorisieren(konto, besitz),
        Zugriff::Aendern => aenderung_autorisieren(konto, besitz.besitzer),
    };
    if !entscheidung.ist_erlaubt() {
        tracing::debug!(
            konto_id = %konto.id,
            besitzer = %besitz.besitzer,
            ?zugriff,
            "Eigentum verweigert"
        );
    }
    entscheidung.pruefen()
}
