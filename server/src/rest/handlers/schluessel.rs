//! REST-Handler fuer API-Schluessel eines Kontos
//!
//! Der Klartextwert wird genau einmal, in der Antwort auf das Erstellen,
//! ausgeliefert. Listen zeigen nur die ersten acht Zeichen.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use zielzeit_auth::SchluesselAntrag;
use zielzeit_core::{KontoId, SchluesselId};
use zielzeit_db::models::{SchluesselRecord, SchluesselTyp};

use crate::rest::{anfrage_aus_headers, ApiResult, AppState};

/// Schluessel wie er in Listen erscheint
#[derive(Debug, Serialize)]
pub struct SchluesselAnsicht {
    pub id: SchluesselId,
    pub name: String,
    #[serde(rename = "type")]
    pub typ: SchluesselTyp,
    pub praefix: String,
    pub laeuft_ab_am: DateTime<Utc>,
    pub erlaubte_hosts: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&SchluesselRecord> for SchluesselAnsicht {
    fn from(s: &SchluesselRecord) -> Self {
        Self {
            id: s.id,
            name: s.name.clone(),
            typ: s.typ,
            praefix: s.wert_praefix(),
            laeuft_ab_am: s.laeuft_ab_am,
            erlaubte_hosts: s.erlaubte_hosts.clone(),
            created_at: s.created_at,
        }
    }
}

/// Antwort auf das Erstellen, einziges Mal mit Klartextwert
#[derive(Debug, Serialize)]
pub struct ErstellterSchluessel {
    #[serde(flatten)]
    pub ansicht: SchluesselAnsicht,
    pub wert: String,
}

#[derive(Debug, Deserialize)]
pub struct SchluesselErstellenBody {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub typ: SchluesselTyp,
    pub laeuft_ab_am: DateTime<Utc>,
    #[serde(default)]
    pub erlaubte_hosts: Vec<String>,
}

/// GET /r/accounts/:id/keys
pub async fn list_keys(
    State(state): State<AppState>,
    Path(id): Path<KontoId>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    let akteur = state.auth.session_autorisieren(&anfrage_aus_headers(&headers)).await?;
    let liste: Vec<SchluesselAnsicht> = state
        .auth
        .schluessel_auflisten(&akteur, id)
        .await?
        .iter()
        .map(SchluesselAnsicht::from)
        .collect();
    Ok((StatusCode::OK, Json(liste)).into_response())
}

/// POST /r/accounts/:id/keys
pub async fn create_key(
    State(state): State<AppState>,
    Path(id): Path<KontoId>,
    headers: HeaderMap,
    Json(body): Json<SchluesselErstellenBody>,
) -> ApiResult<Response> {
    let akteur = state.auth.session_autorisieren(&anfrage_aus_headers(&headers)).await?;
    let record = state
        .auth
        .schluessel_erstellen(
            &akteur,
            id,
            SchluesselAntrag {
                name: body.name,
                typ: body.typ,
                laeuft_ab_am: body.laeuft_ab_am,
                erlaubte_hosts: body.erlaubte_hosts,
            },
        )
        .await?;

    let antwort = ErstellterSchluessel {
        ansicht: SchluesselAnsicht::from(&record),
        wert: record.wert,
    };
    Ok((StatusCode::CREATED, Json(antwort)).into_response())
}

/// DELETE /r/accounts/:id/keys/:key_id
pub async fn delete_key(
    State(state): State<AppState>,
    Path((id, schluessel_id)): Path<(KontoId, SchluesselId)>,
    headers: HeaderMap,
) -> ApiResult<StatusCode> {
    let akteur = state.auth.session_autorisieren(&anfrage_aus_headers(&headers)).await?;
    state.auth.schluessel_loeschen(&akteur, id, schluessel_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
