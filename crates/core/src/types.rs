//! Gemeinsame Identifikationstypen fuer Zielzeit
//!
//! Alle IDs verwenden das Newtype-Pattern um Verwechslungen zwischen
//! Konto- und Schluessel-IDs zur Compilezeit auszuschliessen.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Eindeutige Konto-ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KontoId(pub Uuid);

impl KontoId {
    /// Erstellt eine neue zufaellige KontoId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for KontoId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for KontoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "konto:{}", self.0)
    }
}

impl From<Uuid> for KontoId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// Eindeutige Schluessel-ID (nicht der geheime Schluesselwert)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchluesselId(pub Uuid);

impl SchluesselId {
    /// Erstellt eine neue zufaellige SchluesselId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SchluesselId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SchluesselId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "schluessel:{}", self.0)
    }
}

impl From<Uuid> for SchluesselId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}
