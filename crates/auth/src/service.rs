//! Auth-Service fuer Zielzeit
//!
//! Zentraler Einstiegspunkt fuer Anmeldung, Token-Erneuerung, Abmeldung
//! sowie die Verwaltung von Konten, Verknuepfungen und API-Schluesseln.
//! Die eigentlichen Pruefungen liegen in den Autorisierern; der Service
//! verdrahtet sie mit dem Store.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use zielzeit_core::{KontoId, SchluesselId};
use zielzeit_db::{
    models::{KontoRecord, KontoTyp, NeuerSchluessel, NeuesKonto, SchluesselRecord, SchluesselTyp},
    repository::{KontoRepository, SchluesselRepository},
};

use crate::{
    anfrage::Anfrage,
    api_key::{schluessel_generieren, ApiKeyAutorisierer},
    eigentum::admin_oder_besitzer,
    error::{AuthError, AuthResult},
    password::{passwort_hashen, passwort_verifizieren, platzhalter_verifizieren},
    session::SessionAutorisierer,
    token::{TokenPaar, TokenSigner},
};

/// Daten fuer einen neuen API-Schluessel (Wert wird generiert)
#[derive(Debug, Clone)]
pub struct SchluesselAntrag {
    pub name: String,
    pub typ: SchluesselTyp,
    pub laeuft_ab_am: DateTime<Utc>,
    pub erlaubte_hosts: Vec<String>,
}

/// Auth-Service ueber einem Store, der Konten und Schluessel haelt
pub struct AuthService<R: KontoRepository + SchluesselRepository> {
    repo: Arc<R>,
    signer: Arc<TokenSigner>,
    sessions: SessionAutorisierer<R>,
    api_keys: ApiKeyAutorisierer<R>,
}

impl<R: KontoRepository + SchluesselRepository> AuthService<R> {
    pub fn neu(repo: Arc<R>, signer: Arc<TokenSigner>) -> Self {
        Self {
            sessions: SessionAutorisierer::neu(Arc::clone(&repo), Arc::clone(&signer)),
            api_keys: ApiKeyAutorisierer::neu(Arc::clone(&repo)),
            repo,
            signer,
        }
    }

    // -----------------------------------------------------------------------
    // Autorisierung
    // -----------------------------------------------------------------------

    pub async fn session_autorisieren(&self, anfrage: &Anfrage) -> AuthResult<KontoRecord> {
        self.sessions.autorisieren(anfrage).await
    }

    pub async fn api_key_autorisieren(
        &self,
        anfrage: &Anfrage,
        benoetigt: SchluesselTyp,
    ) -> AuthResult<(KontoRecord, SchluesselRecord)> {
        self.api_keys.autorisieren(anfrage, benoetigt).await
    }

    // -----------------------------------------------------------------------
    // Session-Ausstellung
    // -----------------------------------------------------------------------

    /// Meldet ein Konto an und ersetzt dessen aktive Session
    ///
    /// Unbekannte E-Mail und falsches Passwort liefern denselben Fehler.
    pub async fn anmelden(
        &self,
        email: &str,
        passwort: &str,
    ) -> AuthResult<(KontoRecord, TokenPaar)> {
        let Some(konto) = self.repo.konto_laden_nach_email(email).await? else {
            platzhalter_verifizieren(passwort);
            return Err(AuthError::AnmeldedatenUngueltig("invalid credentials"));
        };

        if !passwort_verifizieren(passwort, &konto.password_hash)? {
            tracing::debug!(konto_id = %konto.id, "Anmeldung mit falschem Passwort");
            return Err(AuthError::AnmeldedatenUngueltig("invalid credentials"));
        }

        if konto.gesperrt {
            tracing::warn!(konto_id = %konto.id, "Anmeldeversuch fuer gesperrtes Konto");
            return Err(AuthError::KontoGesperrt);
        }

        let paar = self.paar_ausstellen(&konto).await?;
        tracing::info!(konto_id = %konto.id, "Konto angemeldet");
        Ok((konto, paar))
    }

    /// Tauscht das aktive Refresh-Token gegen ein neues Paar
    pub async fn erneuern(&self, refresh_token: &str) -> AuthResult<TokenPaar> {
        let konto = self.sessions.refresh_autorisieren(refresh_token).await?;
        let paar = self.paar_ausstellen(&konto).await?;
        tracing::debug!(konto_id = %konto.id, "Session erneuert");
        Ok(paar)
    }

    /// Beendet die aktive Session des anfragenden Kontos
    pub async fn abmelden(&self, anfrage: &Anfrage) -> AuthResult<KontoRecord> {
        let konto = self.sessions.autorisieren(anfrage).await?;
        self.repo.session_loeschen(konto.id).await?;
        tracing::info!(konto_id = %konto.id, "Konto abgemeldet");
        Ok(konto)
    }

    async fn paar_ausstellen(&self, konto: &KontoRecord) -> AuthResult<TokenPaar> {
        let paar = self.signer.paar_ausstellen(&konto.email)?;
        self.repo
            .session_setzen(konto.id, &paar.token, &paar.refresh_token)
            .await?;
        Ok(paar)
    }

    // -----------------------------------------------------------------------
    // Kontoverwaltung
    // -----------------------------------------------------------------------

    /// Legt ein Konto ohne Rechtepruefung an (Bootstrap beim Serverstart)
    pub async fn konto_anlegen(
        &self,
        email: &str,
        passwort: &str,
        typ: KontoTyp,
    ) -> AuthResult<KontoRecord> {
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(AuthError::UngueltigeEingabe("invalid email".into()));
        }
        let hash = passwort_hashen(passwort)?;

        let konto = self
            .repo
            .konto_erstellen(NeuesKonto {
                email,
                password_hash: &hash,
                typ,
            })
            .await?;

        tracing::info!(konto_id = %konto.id, typ = konto.typ.als_str(), "Konto angelegt");
        Ok(konto)
    }

    /// Legt ein Konto an; nur fuer Admins
    pub async fn konto_erstellen(
        &self,
        akteur: &KontoRecord,
        email: &str,
        passwort: &str,
        typ: KontoTyp,
    ) -> AuthResult<KontoRecord> {
        admin_pruefen(akteur)?;
        self.konto_anlegen(email, passwort, typ).await
    }

    /// Sperrt oder entsperrt ein Konto; nur fuer Admins
    ///
    /// Die gespeicherte Session bleibt stehen, das aktuelle Token scheitert
    /// danach an der Sperre.
    pub async fn sperre_setzen(
        &self,
        akteur: &KontoRecord,
        ziel: KontoId,
        gesperrt: bool,
    ) -> AuthResult<KontoRecord> {
        admin_pruefen(akteur)?;
        let konto = self.repo.sperre_setzen(ziel, gesperrt).await?;
        tracing::info!(admin = %akteur.id, konto_id = %ziel, gesperrt, "Sperre gesetzt");
        Ok(konto)
    }

    /// Erlaubt `konto`, im Namen von `ziel` zu handeln
    ///
    /// Die Delegation vergibt `ziel` (oder ein Admin), nie der Empfaenger
    /// und nie ein anderes Konto, das bereits fuer `ziel` handeln darf.
    pub async fn verknuepfen(
        &self,
        akteur: &KontoRecord,
        konto: KontoId,
        ziel: KontoId,
    ) -> AuthResult<KontoRecord> {
        admin_oder_besitzer(akteur, ziel).pruefen()?;
        let record = self.repo.verknuepfen(konto, ziel).await?;
        tracing::info!(konto_id = %konto, ziel = %ziel, "Konto verknuepft");
        Ok(record)
    }

    /// Entfernt eine Verknuepfung; `false` wenn keine bestand
    ///
    /// Beide Seiten duerfen loesen.
    pub async fn verknuepfung_loesen(
        &self,
        akteur: &KontoRecord,
        konto: KontoId,
        ziel: KontoId,
    ) -> AuthResult<bool> {
        if !admin_oder_besitzer(akteur, konto).ist_erlaubt() {
            admin_oder_besitzer(akteur, ziel).pruefen()?;
        }
        let entfernt = self.repo.verknuepfung_loesen(konto, ziel).await?;
        if entfernt {
            tracing::info!(konto_id = %konto, ziel = %ziel, "Verknuepfung geloest");
        }
        Ok(entfernt)
    }

    // -----------------------------------------------------------------------
    // API-Schluessel
    // -----------------------------------------------------------------------

    /// Erstellt einen Schluessel fuer `konto`
    ///
    /// Der zurueckgegebene Record enthaelt den Klartextwert. Er wird nur
    /// dieses eine Mal ausgeliefert.
    pub async fn schluessel_erstellen(
        &self,
        akteur: &KontoRecord,
        konto: KontoId,
        antrag: SchluesselAntrag,
    ) -> AuthResult<SchluesselRecord> {
        admin_oder_besitzer(akteur, konto).pruefen()?;

        if antrag.laeuft_ab_am <= Utc::now() {
            return Err(AuthError::UngueltigeEingabe(
                "expiration must be in the future".into(),
            ));
        }
        let erlaubte_hosts = antrag
            .erlaubte_hosts
            .into_iter()
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .collect();

        let record = self
            .repo
            .schluessel_erstellen(NeuerSchluessel {
                konto_id: konto,
                name: antrag.name.trim().to_string(),
                wert: schluessel_generieren(),
                typ: antrag.typ,
                laeuft_ab_am: antrag.laeuft_ab_am,
                erlaubte_hosts,
            })
            .await?;

        tracing::info!(
            konto_id = %konto,
            schluessel_id = %record.id,
            typ = %record.typ,
            praefix = %record.wert_praefix(),
            "API-Schluessel erstellt"
        );
        Ok(record)
    }

    /// Alle Schluessel eines Kontos, aelteste zuerst
    pub async fn schluessel_auflisten(
        &self,
        akteur: &KontoRecord,
        konto: KontoId,
    ) -> AuthResult<Vec<SchluesselRecord>> {
        admin_oder_besitzer(akteur, konto).pruefen()?;
        Ok(self.repo.schluessel_fuer_konto(konto).await?)
    }

    /// Loescht einen Schluessel; fremde Schluessel gelten als nicht vorhanden
    pub async fn schluessel_loeschen(
        &self,
        akteur: &KontoRecord,
        konto: KontoId,
        schluessel_id: SchluesselId,
    ) -> AuthResult<()> {
        admin_oder_besitzer(akteur, konto).pruefen()?;

        let gehoert_konto = self
            .repo
            .schluessel_laden(schluessel_id)
            .await?
            .is_some_and(|s| s.konto_id == konto);
        if !gehoert_konto || !self.repo.schluessel_loeschen(schluessel_id).await? {
            return Err(AuthError::RessourceNichtGefunden(schluessel_id.to_string()));
        }

        tracing::info!(konto_id = %konto, schluessel_id = %schluessel_id, "API-Schluessel geloescht");
        Ok(())
    }
}

fn admin_pruefen(akteur: &KontoRecord) -> AuthResult<()> {
    if akteur.ist_admin() {
        Ok(())
    } else {
        tracing::debug!(konto_id = %akteur.id, "Admin-Aktion ohne Admin-Rechte");
        Err(AuthError::EigentumVerweigert)
    }
}
