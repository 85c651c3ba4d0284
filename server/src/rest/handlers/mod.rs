//! REST-Handler, gruppiert nach Ressource

pub mod auth;
pub mod ereignisse;
pub mod konten;
pub mod schluessel;
