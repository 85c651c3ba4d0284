//! In-Memory-Implementierung des KontoRepository

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use zielzeit_core::KontoId;

use crate::error::DbError;
use crate::models::{KontoRecord, NeuesKonto};
use crate::repository::{DbResult, KontoRepository};
use crate::speicher::pool::{SpeicherDb, Zustand};

fn konto_mut(zustand: &mut Zustand, id: KontoId) -> DbResult<&mut KontoRecord> {
    zustand
        .konten
        .get_mut(&id)
        .ok_or_else(|| DbError::nicht_gefunden(format!("Konto {id}")))
}

#[async_trait]
impl KontoRepository for SpeicherDb {
    async fn konto_erstellen(&self, daten: NeuesKonto<'_>) -> DbResult<KontoRecord> {
        if daten.email.trim().is_empty() {
            return Err(DbError::UngueltigeDaten("E-Mail darf nicht leer sein".into()));
        }

        let mut zustand = self.zustand.write();
        if zustand.email_index.contains_key(daten.email) {
            return Err(DbError::Eindeutigkeit(format!(
                "E-Mail '{}' bereits vergeben",
                daten.email
            )));
        }

        let record = KontoRecord {
            id: KontoId::new(),
            email: daten.email.to_string(),
            typ: daten.typ,
            gesperrt: false,
            password_hash: daten.password_hash.to_string(),
            token: None,
            refresh_token: None,
            verknuepfte_konten: BTreeSet::new(),
            created_at: Utc::now(),
        };

        zustand.email_index.insert(record.email.clone(), record.id);
        zustand.konten.insert(record.id, record.clone());
        Ok(record)
    }

    async fn konto_laden(&self, id: KontoId) -> DbResult<Option<KontoRecord>> {
        Ok(self.zustand.read().konten.get(&id).cloned())
    }

    async fn konto_laden_nach_email(&self, email: &str) -> DbResult<Option<KontoRecord>> {
        let zustand = self.zustand.read();
        Ok(zustand
            .email_index
            .get(email)
            .and_then(|id| zustand.konten.get(id))
            .cloned())
    }

    async fn session_setzen(
        &self,
        id: KontoId,
        token: &str,
        refresh_token: &str,
    ) -> DbResult<()> {
        let mut zustand = self.zustand.write();
        let konto = konto_mut(&mut zustand, id)?;
        konto.token = Some(token.to_string());
        konto.refresh_token = Some(refresh_token.to_string());
        debug!(konto_id = %id, "Session-Paar ueberschrieben");
        Ok(())
    }

    async fn session_loeschen(&self, id: KontoId) -> DbResult<()> {
        let mut zustand = self.zustand.write();
        let konto = konto_mut(&mut zustand, id)?;
        konto.token = None;
        konto.refresh_token = None;
        Ok(())
    }

    async fn sperre_setzen(&self, id: KontoId, gesperrt: bool) -> DbResult<KontoRecord> {
        let mut zustand = self.zustand.write();
        let konto = konto_mut(&mut zustand, id)?;
        konto.gesperrt = gesperrt;
        Ok(konto.clone())
    }

    async fn verknuepfen(&self, id: KontoId, ziel: KontoId) -> DbResult<KontoRecord> {
        if id == ziel {
            return Err(DbError::UngueltigeDaten(
                "Konto kann nicht mit sich selbst verknuepft werden".into(),
            ));
        }

        let mut zustand = self.zustand.write();
        if !zustand.konten.contains_key(&ziel) {
            return Err(DbError::nicht_gefunden(format!("Konto {ziel}")));
        }
        let konto = konto_mut(&mut zustand, id)?;
        konto.verknuepfte_konten.insert(ziel);
        Ok(konto.clone())
    }

    async fn verknuepfung_loesen(&self, id: KontoId, ziel: KontoId) -> DbResult<bool> {
        let mut zustand = self.zustand.write();
        let konto = konto_mut(&mut zustand, id)?;
        Ok(konto.verknuepfte_konten.remove(&ziel))
    }
}
