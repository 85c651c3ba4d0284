//! In-Memory-Implementierung des EreignisRepository

use async_trait::async_trait;
use chrono::Utc;

use crate::error::DbError;
use crate::models::{EreignisRecord, EreignisUpdate, NeuesEreignis};
use crate::repository::{DbResult, EreignisRepository};
use crate::speicher::pool::SpeicherDb;

/// Slugs: Kleinbuchstaben, Ziffern und Bindestriche
fn slug_gueltig(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[async_trait]
impl EreignisRepository for SpeicherDb {
    async fn ereignis_erstellen(&self, daten: NeuesEreignis<'_>) -> DbResult<EreignisRecord> {
        if !slug_gueltig(daten.slug) {
            return Err(DbError::UngueltigeDaten(format!(
                "Ungueltiger Slug '{}'",
                daten.slug
            )));
        }

        let mut zustand = self.zustand.write();
        if zustand.ereignisse.contains_key(daten.slug) {
            return Err(DbError::Eindeutigkeit(format!(
                "Slug '{}' bereits vergeben",
                daten.slug
            )));
        }

        let record = EreignisRecord {
            slug: daten.slug.to_string(),
            name: daten.name.to_string(),
            besitzer: daten.besitzer,
            zugriff_eingeschraenkt: daten.zugriff_eingeschraenkt,
            created_at: Utc::now(),
        };
        zustand.ereignisse.insert(record.slug.clone(), record.clone());
        Ok(record)
    }

    async fn ereignis_laden(&self, slug: &str) -> DbResult<Option<EreignisRecord>> {
        Ok(self.zustand.read().ereignisse.get(slug).cloned())
    }

    async fn ereignis_aktualisieren(
        &self,
        slug: &str,
        daten: EreignisUpdate,
    ) -> DbResult<EreignisRecord> {
        let mut zustand = self.zustand.write();
        let ereignis = zustand
            .ereignisse
            .get_mut(slug)
            .ok_or_else(|| DbError::nicht_gefunden(format!("Ereignis {slug}")))?;

        if let Some(name) = daten.name {
            ereignis.name = name;
        }
        if let Some(eingeschraenkt) = daten.zugriff_eingeschraenkt {
            ereignis.zugriff_eingeschraenkt = eingeschraenkt;
        }
        Ok(ereignis.clone())
    }

    async fn ereignis_loeschen(&self, slug: &str) -> DbResult<bool> {
        Ok(self.zustand.write().ereignisse.remove(slug).is_some())
    }
}
