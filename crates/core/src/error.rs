//! Fehlertypen fuer Zielzeit
//!
//! `ZielzeitError` ist die grobe, nach aussen sichtbare Fehlerklasse. Die
//! Crates darunter definieren feinere Fehler und konvertieren via `From`.
//! Autorisierungsfehler werden hier bewusst ohne Grund zusammengefasst.

use thiserror::Error;

/// Alle nach aussen sichtbaren Fehlerklassen
#[derive(Debug, Error)]
pub enum ZielzeitError {
    // --- Autorisierung ---
    #[error("Nicht autorisiert")]
    NichtAutorisiert,

    // --- Ressourcen ---
    #[error("Ressource nicht gefunden: {0}")]
    NichtGefunden(String),

    #[error("Ungueltige Eingabe: {0}")]
    UngueltigeEingabe(String),

    #[error("Konflikt: {0}")]
    Konflikt(String),

    // --- Infrastruktur ---
    #[error("Speicher nicht verfuegbar: {0}")]
    SpeicherNichtVerfuegbar(String),

    // --- Intern ---
    #[error("Interner Fehler: {0}")]
    Intern(String),
}

impl ZielzeitError {
    /// Erstellt einen internen Fehler aus einer beliebigen Nachricht
    pub fn intern(msg: impl Into<String>) -> Self {
        Self::Intern(msg.into())
    }

    /// HTTP-Statuscode fuer REST-Antworten
    pub fn http_status(&self) -> u16 {
        match self {
            Self::NichtAutorisiert => 401,
            Self::NichtGefunden(_) => 404,
            Self::UngueltigeEingabe(_) => 400,
            Self::Konflikt(_) => 409,
            Self::SpeicherNichtVerfuegbar(_) | Self::Intern(_) => 500,
        }
    }

    /// Gibt true zurueck wenn der Fehler serverseitig ist (kein Zugriffsproblem)
    pub fn ist_serverfehler(&self) -> bool {
        self.http_status() >= 500
    }

    /// Nachricht fuer den Aufrufer; interne Details bleiben im Log
    pub fn oeffentliche_nachricht(&self) -> String {
        if self.ist_serverfehler() {
            "Interner Fehler".to_string()
        } else {
            self.to_string()
        }
    }
}
