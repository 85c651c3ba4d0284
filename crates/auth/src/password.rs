//! Passwort-Hashing mit Argon2id
//!
//! Gespeichert wird der PHC-String (Algorithmus, Parameter und Salt).
//! Fuer unbekannte E-Mails wird gegen einen Platzhalter-Hash verifiziert,
//! damit eine fehlgeschlagene Anmeldung immer gleich lange dauert.

use std::sync::OnceLock;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use crate::error::{AuthError, AuthResult};

/// Speicher 64 MiB, 3 Iterationen, 1 Thread
fn argon2_instanz() -> AuthResult<Argon2<'static>> {
    let params = Params::new(64 * 1024, 3, 1, None)
        .map_err(|e| AuthError::PasswortHashing(e.to_string()))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hasht ein Passwort mit zufaelligem Salt
pub fn passwort_hashen(passwort: &str) -> AuthResult<String> {
    if passwort.is_empty() {
        return Err(AuthError::UngueltigeEingabe("password must not be empty".into()));
    }
    let salt = SaltString::generate(&mut OsRng);

    argon2_instanz()?
        .hash_password(passwort.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::PasswortHashing(e.to_string()))
}

/// Verifiziert ein Passwort gegen einen gespeicherten PHC-Hash
pub fn passwort_verifizieren(passwort: &str, hash: &str) -> AuthResult<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| AuthError::PasswortHashing(format!("ungueltiges Hash-Format: {e}")))?;

    match argon2_instanz()?.verify_password(passwort.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::PasswortHashing(e.to_string())),
    }
}

/// Verifiziert gegen einen festen Platzhalter und liefert immer `false`
pub fn platzhalter_verifizieren(passwort: &str) {
    static PLATZHALTER: OnceLock<Option<String>> = OnceLock::new();

    let hash = PLATZHALTER.get_or_init(|| passwort_hashen("zielzeit-platzhalter").ok());
    if let Some(hash) = hash {
        let _ = passwort_verifizieren(passwort, hash);
    }
}
