//! Integration-Tests: ein ausgefallener Store ist kein "Zugriff verweigert"

use std::sync::Arc;

use async_trait::async_trait;

use zielzeit_auth::{Anfrage, AuthError, AuthService, FehlerKlasse, TokenSigner};
use zielzeit_core::{KontoId, SchluesselId, ZielzeitError};
use zielzeit_db::{
    models::{KontoRecord, NeuerSchluessel, NeuesKonto, SchluesselRecord, SchluesselTyp},
    DbError, DbResult, KontoRepository, SchluesselRepository,
};

/// Store, dessen Zugriffe alle mit einem Timeout scheitern
struct AusfallStore;

fn ausfall<T>() -> DbResult<T> {
    Err(DbError::NichtVerfuegbar("Zeitueberschreitung".into()))
}

#[async_trait]
impl KontoRepository for AusfallStore {
    async fn konto_erstellen(&self, _: NeuesKonto<'_>) -> DbResult<KontoRecord> {
        ausfall()
    }
    async fn konto_laden(&self, _: KontoId) -> DbResult<Option<KontoRecord>> {
        ausfall()
    }
    async fn konto_laden_nach_email(&self, _: &str) -> DbResult<Option<KontoRecord>> {
        ausfall()
    }
    async fn session_setzen(&self, _: KontoId, _: &str, _: &str) -> DbResult<()> {
        ausfall()
    }
    async fn session_loeschen(&self, _: KontoId) -> DbResult<()> {
        ausfall()
    }
    async fn sperre_setzen(&self, _: KontoId, _: bool) -> DbResult<KontoRecord> {
        ausfall()
    }
    async fn verknuepfen(&self, _: KontoId, _: KontoId) -> DbResult<KontoRecord> {
        ausfall()
    }
    async fn verknuepfung_loesen(&self, _: KontoId, _: KontoId) -> DbResult<bool> {
        ausfall()
    }
}

#[async_trait]
impl SchluesselRepository for AusfallStore {
    async fn schluessel_erstellen(&self, _: NeuerSchluessel) -> DbResult<SchluesselRecord> {
        ausfall()
    }
    async fn schluessel_mit_konto_laden(
        &self,
        _: &str,
    ) -> DbResult<Option<(SchluesselRecord, KontoRecord)>> {
        ausfall()
    }
    async fn schluessel_laden(&self, _: SchluesselId) -> DbResult<Option<SchluesselRecord>> {
        ausfall()
    }
    async fn schluessel_fuer_konto(&self, _: KontoId) -> DbResult<Vec<SchluesselRecord>> {
        ausfall()
    }
    async fn schluessel_loeschen(&self, _: SchluesselId) -> DbResult<bool> {
        ausfall()
    }
}

fn service() -> (AuthService<AusfallStore>, TokenSigner) {
    let signer = TokenSigner::neu(b"ausfall-secret");
    let service = AuthService::neu(Arc::new(AusfallStore), Arc::new(signer.clone()));
    (service, signer)
}

fn ist_store_ausfall(e: &AuthError) -> bool {
    matches!(e, AuthError::StoreNichtVerfuegbar(_)) && e.klasse() == FehlerKlasse::Serverfehler
}

#[tokio::test]
async fn api_schluessel_bei_ausfall() {
    let (service, _) = service();
    let e = service
        .api_key_autorisieren(&Anfrage::neu().mit_bearer("zz_irgendwas"), SchluesselTyp::Read)
        .await
        .unwrap_err();
    assert!(ist_store_ausfall(&e), "unerwartet: {e}");
    assert!(!e.ist_ablehnung());
}

#[tokio::test]
async fn session_bei_ausfall() {
    let (service, signer) = service();
    let paar = signer.paar_ausstellen("a@example.org").unwrap();

    let e = service
        .session_autorisieren(&Anfrage::neu().mit_bearer(&paar.token))
        .await
        .unwrap_err();
    assert!(ist_store_ausfall(&e), "unerwartet: {e}");

    let status = ZielzeitError::from(e).http_status();
    assert_eq!(status, 500);
}

#[tokio::test]
async fn anmeldung_bei_ausfall() {
    let (service, _) = service();
    let e = service.anmelden("a@example.org", "pw").await.unwrap_err();
    assert!(ist_store_ausfall(&e), "unerwartet: {e}");
}

#[tokio::test]
async fn fehlender_header_braucht_keinen_store() {
    let (service, _) = service();
    let e = service.session_autorisieren(&Anfrage::neu()).await.unwrap_err();
    assert!(matches!(e, AuthError::AnmeldedatenFehlen));
}
