//! In-Memory-Backend fuer alle Repository-Traits

pub mod ereignisse;
pub mod konten;
pub mod pool;
pub mod schluessel;

pub use pool::SpeicherDb;
