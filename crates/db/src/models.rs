//! Datenmodelle fuer den Credential Store
//!
//! Diese Typen repraesentieren Datensaetze aus dem Store. Geheime Felder
//! (Passwort-Hash, Session-Tokens, Schluesselwerte) werden nie serialisiert.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use zielzeit_core::{KontoId, SchluesselId};

// ---------------------------------------------------------------------------
// Konten
// ---------------------------------------------------------------------------

/// Konto-Typ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KontoTyp {
    Admin,
    User,
}

impl KontoTyp {
    pub fn als_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

impl std::str::FromStr for KontoTyp {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            other => Err(format!("Unbekannter Konto-Typ: {other}")),
        }
    }
}

/// Konto-Datensatz aus dem Store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KontoRecord {
    pub id: KontoId,
    /// Eindeutig, Gross-/Kleinschreibung wird beachtet
    pub email: String,
    pub typ: KontoTyp,
    pub gesperrt: bool,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Das einzige gueltige Access-Token (None = abgemeldet)
    #[serde(skip_serializing, default)]
    pub token: Option<String>,
    #[serde(skip_serializing, default)]
    pub refresh_token: Option<String>,
    /// Konten, in deren Namen dieses Konto handeln darf
    pub verknuepfte_konten: BTreeSet<KontoId>,
    pub created_at: DateTime<Utc>,
}

impl KontoRecord {
    pub fn ist_admin(&self) -> bool {
        self.typ == KontoTyp::Admin
    }

    /// Mitgliedschaftstest fuer delegierten Zugriff
    pub fn ist_verknuepft_mit(&self, besitzer: KontoId) -> bool {
        self.verknuepfte_konten.contains(&besitzer)
    }

    /// Byte-genauer Vergleich mit dem aktuell gespeicherten Access-Token
    pub fn ist_aktives_token(&self, token: &str) -> bool {
        self.token
            .as_deref()
            .is_some_and(|gespeichert| !gespeichert.is_empty() && gespeichert.as_bytes() == token.as_bytes())
    }

    /// Byte-genauer Vergleich mit dem aktuell gespeicherten Refresh-Token
    pub fn ist_aktives_refresh_token(&self, token: &str) -> bool {
        self.refresh_token
            .as_deref()
            .is_some_and(|gespeichert| !gespeichert.is_empty() && gespeichert.as_bytes() == token.as_bytes())
    }
}

/// Daten zum Erstellen eines neuen Kontos
#[derive(Debug, Clone)]
pub struct NeuesKonto<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
    pub typ: KontoTyp,
}

// ---------------------------------------------------------------------------
// API-Schluessel
// ---------------------------------------------------------------------------

/// Faehigkeitsstufe eines API-Schluessels
///
/// `Write` und `Delete` erlauben beide Aenderungen, nur `Read` ist rein lesend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchluesselTyp {
    Read,
    Write,
    Delete,
}

impl SchluesselTyp {
    pub fn als_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Delete => "delete",
        }
    }

    /// Erlaubt dieser Typ Aenderungen?
    pub fn ist_aendernd(&self) -> bool {
        !matches!(self, Self::Read)
    }

    /// Einziges Praedikat fuer die Scope-Pruefung
    pub fn erfuellt(&self, benoetigt: SchluesselTyp) -> bool {
        match benoetigt {
            Self::Read => true,
            Self::Write | Self::Delete => self.ist_aendernd(),
        }
    }
}

impl std::fmt::Display for SchluesselTyp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.als_str())
    }
}

impl std::str::FromStr for SchluesselTyp {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read" => Ok(Self::Read),
            "write" => Ok(Self::Write),
            "delete" => Ok(Self::Delete),
            other => Err(format!("Unbekannter Schluessel-Typ: {other}")),
        }
    }
}

/// API-Schluessel-Datensatz
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchluesselRecord {
    pub id: SchluesselId,
    pub konto_id: KontoId,
    /// Anzeigename (z.B. "Zeitmessung Ziel")
    pub name: String,
    #[serde(skip_serializing, default)]
    pub wert: String,
    pub typ: SchluesselTyp,
    pub laeuft_ab_am: DateTime<Utc>,
    /// Erlaubte Host-Muster (leer = keine Einschraenkung)
    pub erlaubte_hosts: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl SchluesselRecord {
    /// Abgelaufen erst wenn `jetzt` echt nach dem Ablaufzeitpunkt liegt
    pub fn ist_abgelaufen(&self, jetzt: DateTime<Utc>) -> bool {
        jetzt > self.laeuft_ab_am
    }

    /// Praefix des Schluesselwerts zur Anzeige (erste 8 Zeichen)
    pub fn wert_praefix(&self) -> String {
        self.wert.chars().take(8).collect()
    }
}

/// Daten zum Erstellen eines neuen API-Schluessels
#[derive(Debug, Clone)]
pub struct NeuerSchluessel {
    pub konto_id: KontoId,
    pub name: String,
    pub wert: String,
    pub typ: SchluesselTyp,
    pub laeuft_ab_am: DateTime<Utc>,
    pub erlaubte_hosts: Vec<String>,
}

// ---------------------------------------------------------------------------
// Ressourcen-Besitz
// ---------------------------------------------------------------------------

/// Einzige Information, die die Eigentumsentscheidung ueber eine Ressource braucht
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RessourcenBesitz {
    pub besitzer: KontoId,
    pub zugriff_eingeschraenkt: bool,
}

/// Veranstaltungs-Datensatz (nur die fuer die Zugriffskontrolle relevanten Felder)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EreignisRecord {
    pub slug: String,
    pub name: String,
    pub besitzer: KontoId,
    pub zugriff_eingeschraenkt: bool,
    pub created_at: DateTime<Utc>,
}

impl EreignisRecord {
    pub fn besitz(&self) -> RessourcenBesitz {
        RessourcenBesitz {
            besitzer: self.besitzer,
            zugriff_eingeschraenkt: self.zugriff_eingeschraenkt,
        }
    }
}

/// Daten zum Erstellen einer neuen Veranstaltung
#[derive(Debug, Clone)]
pub struct NeuesEreignis<'a> {
    pub slug: &'a str,
    pub name: &'a str,
    pub besitzer: KontoId,
    pub zugriff_eingeschraenkt: bool,
}

/// Daten zum Aktualisieren einer Veranstaltung
#[derive(Debug, Clone, Default)]
pub struct EreignisUpdate {
    pub name: Option<String>,
    pub zugriff_eingeschraenkt: Option<bool>,
}
