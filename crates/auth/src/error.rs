//! Fehlertypen fuer den Auth-Kern
//!
//! Die Varianten unterscheiden den genauen Ablehnungsgrund fuer Logs und
//! Tests. Nach aussen werden sie ueber [`AuthError::klasse`] zu wenigen
//! groben Klassen zusammengefasst.

use thiserror::Error;

use zielzeit_core::ZielzeitError;
use zielzeit_db::{models::SchluesselTyp, DbError};

/// Alle moeglichen Fehler im Auth-Kern
#[derive(Debug, Error)]
pub enum AuthError {
    // --- Anmeldedaten ---
    #[error("Anmeldedaten fehlen")]
    AnmeldedatenFehlen,

    /// Schluessel unbekannt, Signatur ungueltig, Identitaet unbekannt, Passwort falsch
    #[error("Anmeldedaten ungueltig: {0}")]
    AnmeldedatenUngueltig(&'static str),

    #[error("Anmeldedaten abgelaufen: {0}")]
    AnmeldedatenAbgelaufen(&'static str),

    // --- Session ---
    #[error("Nicht die aktive Session")]
    SessionInaktiv,

    #[error("Konto gesperrt")]
    KontoGesperrt,

    // --- API-Schluessel ---
    #[error("Scope unzureichend: benoetigt {benoetigt}, vorhanden {vorhanden}")]
    ScopeUnzureichend {
        benoetigt: SchluesselTyp,
        vorhanden: SchluesselTyp,
    },

    #[error("Herkunft nicht erlaubt")]
    HerkunftNichtErlaubt,

    // --- Eigentum ---
    #[error("Zugriff auf Ressource verweigert")]
    EigentumVerweigert,

    #[error("Ressource nicht gefunden: {0}")]
    RessourceNichtGefunden(String),

    // --- Verwaltung ---
    #[error("Ungueltige Eingabe: {0}")]
    UngueltigeEingabe(String),

    #[error("Bereits vorhanden: {0}")]
    BereitsVorhanden(String),

    // --- Infrastruktur ---
    #[error("Store nicht verfuegbar: {0}")]
    StoreNichtVerfuegbar(String),

    #[error("Passwort-Hashing fehlgeschlagen: {0}")]
    PasswortHashing(String),

    #[error("Interner Fehler: {0}")]
    Intern(String),
}

/// Grobe, nach aussen sichtbare Fehlerklasse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FehlerKlasse {
    /// Jede Zugriffsablehnung, gleich aus welchem Grund
    NichtAutorisiert,
    /// Nur nach bestandener Eigentums-/Sichtbarkeitspruefung
    NichtGefunden,
    UngueltigeEingabe,
    Konflikt,
    /// Store-Ausfall: "kann nicht entscheiden" ist kein "nein"
    Serverfehler,
}

impl AuthError {
    pub fn intern(msg: impl Into<String>) -> Self {
        Self::Intern(msg.into())
    }

    pub fn klasse(&self) -> FehlerKlasse {
        match self {
            Self::AnmeldedatenFehlen
            | Self::AnmeldedatenUngueltig(_)
            | Self::AnmeldedatenAbgelaufen(_)
            | Self::SessionInaktiv
            | Self::KontoGesperrt
            | Self::ScopeUnzureichend { .. }
            | Self::HerkunftNichtErlaubt
            | Self::EigentumVerweigert => FehlerKlasse::NichtAutorisiert,
            Self::RessourceNichtGefunden(_) => FehlerKlasse::NichtGefunden,
            Self::UngueltigeEingabe(_) => FehlerKlasse::UngueltigeEingabe,
            Self::BereitsVorhanden(_) => FehlerKlasse::Konflikt,
            Self::StoreNichtVerfuegbar(_) | Self::PasswortHashing(_) | Self::Intern(_) => {
                FehlerKlasse::Serverfehler
            }
        }
    }

    /// Gibt true zurueck wenn es sich um eine Zugriffsablehnung handelt
    pub fn ist_ablehnung(&self) -> bool {
        self.klasse() == FehlerKlasse::NichtAutorisiert
    }
}

impl From<DbError> for AuthError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::Eindeutigkeit(msg) => Self::BereitsVorhanden(msg),
            DbError::UngueltigeDaten(msg) => Self::UngueltigeEingabe(msg),
            DbError::NichtGefunden(msg) => Self::RessourceNichtGefunden(msg),
            other => Self::StoreNichtVerfuegbar(other.to_string()),
        }
    }
}

impl From<AuthError> for ZielzeitError {
    fn from(e: AuthError) -> Self {
        match e.klasse() {
            FehlerKlasse::NichtAutorisiert => ZielzeitError::NichtAutorisiert,
            FehlerKlasse::NichtGefunden => ZielzeitError::NichtGefunden(match e {
                AuthError::RessourceNichtGefunden(msg) => msg,
                other => other.to_string(),
            }),
            FehlerKlasse::UngueltigeEingabe => ZielzeitError::UngueltigeEingabe(match e {
                AuthError::UngueltigeEingabe(msg) => msg,
                other => other.to_string(),
            }),
            FehlerKlasse::Konflikt => ZielzeitError::Konflikt(e.to_string()),
            FehlerKlasse::Serverfehler => match e {
                AuthError::StoreNichtVerfuegbar(msg) => ZielzeitError::SpeicherNichtVerfuegbar(msg),
                other => ZielzeitError::Intern(other.to_string()),
            },
        }
    }
}

/// Result-Alias fuer den Auth-Kern
pub type AuthResult<T> = Result<T, AuthError>;
