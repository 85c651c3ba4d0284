//! zielzeit-core – Gemeinsame Typen und Fehlertypen
//!
//! Dieses Crate stellt die Bausteine bereit, die von Store, Auth-Kern und
//! Server gemeinsam genutzt werden.

pub mod error;
pub mod types;

// Re-Exporte fuer bequemen Zugriff
pub use error::ZielzeitError;
pub use types::{KontoId, SchluesselId};
