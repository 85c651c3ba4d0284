//! Fehlertypen fuer das Store-Crate

use thiserror::Error;

/// Store-Fehlertypen
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Datensatz nicht gefunden: {0}")]
    NichtGefunden(String),

    #[error("Eindeutigkeitsverletzung: {0}")]
    Eindeutigkeit(String),

    #[error("Ungueltige Daten: {0}")]
    UngueltigeDaten(String),

    /// Backend nicht erreichbar oder Zeitlimit ueberschritten
    #[error("Store nicht verfuegbar: {0}")]
    NichtVerfuegbar(String),
}

impl DbError {
    pub fn nicht_gefunden(msg: impl Into<String>) -> Self {
        Self::NichtGefunden(msg.into())
    }
}
