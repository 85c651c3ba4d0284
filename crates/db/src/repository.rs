//! Repository-Trait-Definitionen
//!
//! Das Repository-Pattern entkoppelt den Auth-Kern vom konkreten Store.
//! Der Kern liest nur ueber diese Traits; jede Implementierung muss
//! garantieren, dass ein geschriebenes Session-Token von allen spaeteren
//! Lesezugriffen auf dasselbe Konto gesehen wird.

use async_trait::async_trait;

use zielzeit_core::{KontoId, SchluesselId};

use crate::error::DbError;
use crate::models::{
    EreignisRecord, EreignisUpdate, KontoRecord, NeuerSchluessel, NeuesEreignis, NeuesKonto,
    SchluesselRecord,
};

/// Result-Alias fuer Store-Operationen
pub type DbResult<T> = Result<T, DbError>;

/// Repository fuer Konten
#[async_trait]
pub trait KontoRepository: Send + Sync {
    /// Ein neues Konto anlegen (E-Mail muss eindeutig sein)
    async fn konto_erstellen(&self, daten: NeuesKonto<'_>) -> DbResult<KontoRecord>;

    /// Ein Konto anhand seiner ID laden
    async fn konto_laden(&self, id: KontoId) -> DbResult<Option<KontoRecord>>;

    /// Ein Konto anhand seiner E-Mail laden (exakter Vergleich)
    async fn konto_laden_nach_email(&self, email: &str) -> DbResult<Option<KontoRecord>>;

    /// Ueberschreibt das Session-Paar atomar; das vorherige Paar ist sofort ungueltig
    async fn session_setzen(&self, id: KontoId, token: &str, refresh_token: &str)
        -> DbResult<()>;

    /// Entfernt das Session-Paar (Abmeldung)
    async fn session_loeschen(&self, id: KontoId) -> DbResult<()>;

    /// Setzt oder entfernt die Sperre eines Kontos
    async fn sperre_setzen(&self, id: KontoId, gesperrt: bool) -> DbResult<KontoRecord>;

    /// `id` darf danach im Namen von `ziel` handeln
    async fn verknuepfen(&self, id: KontoId, ziel: KontoId) -> DbResult<KontoRecord>;

    /// Entfernt eine Verknuepfung; gibt false zurueck wenn keine bestand
    async fn verknuepfung_loesen(&self, id: KontoId, ziel: KontoId) -> DbResult<bool>;
}

/// Repository fuer API-Schluessel
#[async_trait]
pub trait SchluesselRepository: Send + Sync {
    async fn schluessel_erstellen(&self, daten: NeuerSchluessel) -> DbResult<SchluesselRecord>;

    /// Loest einen Schluesselwert zu (Schluessel, Konto) auf.
    ///
    /// `None` wenn der Schluessel fehlt ODER sein Konto fehlt.
    async fn schluessel_mit_konto_laden(
        &self,
        wert: &str,
    ) -> DbResult<Option<(SchluesselRecord, KontoRecord)>>;

    async fn schluessel_laden(&self, id: SchluesselId) -> DbResult<Option<SchluesselRecord>>;

    /// Alle Schluessel eines Kontos, aelteste zuerst
    async fn schluessel_fuer_konto(&self, konto_id: KontoId) -> DbResult<Vec<SchluesselRecord>>;

    async fn schluessel_loeschen(&self, id: SchluesselId) -> DbResult<bool>;
}

/// Repository fuer Veranstaltungen (nur Besitz-relevante Felder)
#[async_trait]
pub trait EreignisRepository: Send + Sync {
    async fn ereignis_erstellen(&self, daten: NeuesEreignis<'_>) -> DbResult<EreignisRecord>;

    async fn ereignis_laden(&self, slug: &str) -> DbResult<Option<EreignisRecord>>;

    async fn ereignis_aktualisieren(
        &self,
        slug: &str,
        daten: EreignisUpdate,
    ) -> DbResult<EreignisRecord>;

    async fn ereignis_loeschen(&self, slug: &str) -> DbResult<bool>;
}
