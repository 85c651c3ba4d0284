//! zielzeit-auth – Zugriffskontrolle
//!
//! Dieses Crate implementiert:
//! - API-Schluessel-Autorisierung (Ablauf, Herkunft, Scope)
//! - Session-Autorisierung mit genau einer aktiven Session pro Konto
//! - Eigentumsentscheidung (Admin, Besitzer, verknuepfte Konten, Sichtbarkeit)
//! - AuthService (Anmeldung, Erneuerung, Abmeldung, Konto- und Schluesselverwaltung)
//! - Passwort-Hashing mit Argon2id

pub mod anfrage;
pub mod api_key;
pub mod eigentum;
pub mod error;
pub mod password;
pub mod service;
pub mod session;
pub mod token;

// Bequeme Re-Exporte
pub use anfrage::Anfrage;
pub use api_key::{schluessel_generieren, ApiKeyAutorisierer};
pub use eigentum::{
    admin_oder_besitzer, aenderung_autorisieren, eigentum_autorisieren, lesen_autorisieren,
    ressource_autorisieren, Entscheidung, Grund, Zugriff,
};
pub use error::{AuthError, AuthResult, FehlerKlasse};
pub use password::{passwort_hashen, passwort_verifizieren};
pub use service::{AuthService, SchluesselAntrag};
pub use session::SessionAutorisierer;
pub use token::{TokenArt, TokenPaar, TokenSigner};
