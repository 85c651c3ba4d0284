//! In-Memory-Implementierung des SchluesselRepository

use async_trait::async_trait;
use chrono::Utc;

use zielzeit_core::{KontoId, SchluesselId};

use crate::error::DbError;
use crate::models::{KontoRecord, NeuerSchluessel, SchluesselRecord};
use crate::repository::{DbResult, SchluesselRepository};
use crate::speicher::pool::SpeicherDb;

#[async_trait]
impl SchluesselRepository for SpeicherDb {
    async fn schluessel_erstellen(&self, daten: NeuerSchluessel) -> DbResult<SchluesselRecord> {
        if daten.wert.is_empty() {
            return Err(DbError::UngueltigeDaten("Schluesselwert darf nicht leer sein".into()));
        }

        let mut zustand = self.zustand.write();
        if !zustand.konten.contains_key(&daten.konto_id) {
            return Err(DbError::nicht_gefunden(format!("Konto {}", daten.konto_id)));
        }
        if zustand.wert_index.contains_key(&daten.wert) {
            return Err(DbError::Eindeutigkeit("Schluesselwert bereits vergeben".into()));
        }

        let record = SchluesselRecord {
            id: SchluesselId::new(),
            konto_id: daten.konto_id,
            name: daten.name,
            wert: daten.wert,
            typ: daten.typ,
            laeuft_ab_am: daten.laeuft_ab_am,
            erlaubte_hosts: daten.erlaubte_hosts,
            created_at: Utc::now(),
        };

        zustand.wert_index.insert(record.wert.clone(), record.id);
        zustand.schluessel.insert(record.id, record.clone());
        Ok(record)
    }

    async fn schluessel_mit_konto_laden(
        &self,
        wert: &str,
    ) -> DbResult<Option<(SchluesselRecord, KontoRecord)>> {
        let zustand = self.zustand.read();
        let Some(schluessel) = zustand
            .wert_index
            .get(wert)
            .and_then(|id| zustand.schluessel.get(id))
        else {
            return Ok(None);
        };
        Ok(zustand
            .konten
            .get(&schluessel.konto_id)
            .map(|konto| (schluessel.clone(), konto.clone())))
    }

    async fn schluessel_laden(&self, id: SchluesselId) -> DbResult<Option<SchluesselRecord>> {
        Ok(self.zustand.read().schluessel.get(&id).cloned())
    }

    async fn schluessel_fuer_konto(&self, konto_id: KontoId) -> DbResult<Vec<SchluesselRecord>> {
        let zustand = self.zustand.read();
        let mut liste: Vec<SchluesselRecord> = zustand
            .schluessel
            .values()
            .filter(|s| s.konto_id == konto_id)
            .cloned()
            .collect();
        liste.sort_by_key(|s| s.created_at);
        Ok(liste)
    }

    async fn schluessel_loeschen(&self, id: SchluesselId) -> DbResult<bool> {
        let mut zustand = self.zustand.write();
        match zustand.schluessel.remove(&id) {
            Some(record) => {
                zustand.wert_index.remove(&record.wert);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
