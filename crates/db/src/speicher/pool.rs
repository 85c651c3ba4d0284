//! Gemeinsamer Zustand des In-Memory-Stores
//!
//! Alle Datensaetze liegen hinter genau einem `RwLock`. Jeder Schreibzugriff
//! ist damit fuer alle spaeteren Lesezugriffe sichtbar, was die
//! Konsistenzanforderung der Single-Session-Pruefung erfuellt.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use zielzeit_core::{KontoId, SchluesselId};

use crate::models::{EreignisRecord, KontoRecord, SchluesselRecord};

#[derive(Debug, Default)]
pub(crate) struct Zustand {
    pub(crate) konten: HashMap<KontoId, KontoRecord>,
    /// email -> konto_id
    pub(crate) email_index: HashMap<String, KontoId>,
    pub(crate) schluessel: HashMap<SchluesselId, SchluesselRecord>,
    /// schluesselwert -> schluessel_id
    pub(crate) wert_index: HashMap<String, SchluesselId>,
    /// slug -> ereignis
    pub(crate) ereignisse: HashMap<String, EreignisRecord>,
}

/// Wrapper um den geteilten Store-Zustand
#[derive(Debug, Clone, Default)]
pub struct SpeicherDb {
    pub(crate) zustand: Arc<RwLock<Zustand>>,
}

impl SpeicherDb {
    /// Erstellt einen leeren Store
    pub fn neu() -> Self {
        info!("In-Memory-Store geoeffnet");
        Self::default()
    }

    /// Anzahl gespeicherter Konten
    pub fn anzahl_konten(&self) -> usize {
        self.zustand.read().konten.len()
    }
}
