//! Anfrage-Kontext fuer die Autorisierer
//!
//! Der Kern kennt kein HTTP-Framework. Die REST-Schicht kopiert die beiden
//! relevanten Header in eine `Anfrage` und reicht diese weiter.

/// Die fuer die Zugriffskontrolle relevanten Teile einer eingehenden Anfrage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Anfrage {
    /// Roher Wert des `Authorization`-Headers
    pub authorization: Option<String>,
    /// Deklarierte Herkunft (`Origin`, sonst `Referer`), ungeprueft
    pub herkunft: Option<String>,
}

impl Anfrage {
    pub fn neu() -> Self {
        Self::default()
    }

    pub fn mit_authorization(mut self, wert: impl Into<String>) -> Self {
        self.authorization = Some(wert.into());
        self
    }

    /// Kurzform fuer `Authorization: Bearer <token>`
    pub fn mit_bearer(self, token: &str) -> Self {
        self.mit_authorization(format!("Bearer {token}"))
    }

    pub fn mit_herkunft(mut self, herkunft: impl Into<String>) -> Self {
        self.herkunft = Some(herkunft.into());
        self
    }

    /// Extrahiert den Bearer-Wert.
    ///
    /// Fehlender Header, fehlendes `Bearer `-Praefix und leerer Wert werden
    /// identisch als `None` behandelt.
    pub fn bearer_token(&self) -> Option<&str> {
        self.authorization
            .as_deref()
            .and_then(|s| s.strip_prefix("Bearer "))
            .filter(|token| !token.is_empty())
    }
}
