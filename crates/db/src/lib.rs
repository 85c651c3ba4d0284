//! zielzeit-db – Credential-Store-Abstraktion
//!
//! Dieses Crate stellt die Repository-Traits bereit, ueber die der Auth-Kern
//! Konten, API-Schluessel und Ressourcen-Besitz liest. `SpeicherDb` ist das
//! mitgelieferte In-Memory-Backend.

pub mod error;
pub mod models;
pub mod repository;
pub mod speicher;

pub use error::DbError;
pub use repository::{DbResult, EreignisRepository, KontoRepository, SchluesselRepository};
pub use speicher::SpeicherDb;
