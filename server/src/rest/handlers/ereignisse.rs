//! REST-Handler fuer Veranstaltungen
//!
//! Unter `/r/` authentifiziert eine Session, unter `/api/v1/` ein
//! API-Schluessel mit passendem Scope. Eine fehlende Veranstaltung wird
//! wie eine verweigerte behandelt.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;

use zielzeit_auth::{ressource_autorisieren, Zugriff};
use zielzeit_db::{
    models::{EreignisRecord, EreignisUpdate, KontoRecord, NeuesEreignis, SchluesselTyp},
    EreignisRepository,
};

use crate::rest::{anfrage_aus_headers, ApiResult, AppState};

#[derive(Debug, Deserialize)]
pub struct EreignisErstellenBody {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub zugriff_eingeschraenkt: bool,
}

#[derive(Debug, Deserialize)]
pub struct EreignisBearbeitenBody {
    pub name: Option<String>,
    pub zugriff_eingeschraenkt: Option<bool>,
}

impl From<EreignisBearbeitenBody> for EreignisUpdate {
    fn from(body: EreignisBearbeitenBody) -> Self {
        Self {
            name: body.name,
            zugriff_eingeschraenkt: body.zugriff_eingeschraenkt,
        }
    }
}

/// Laedt die Veranstaltung und prueft das Recht des Kontos darauf
async fn ereignis_mit_recht(
    state: &AppState,
    konto: &KontoRecord,
    slug: &str,
    zugriff: Zugriff,
) -> ApiResult<EreignisRecord> {
    let ereignis = state.ereignisse.ereignis_laden(slug).await?;
    let besitz = ereignis.as_ref().map(EreignisRecord::besitz);
    let grund = ressource_autorisieren(konto, besitz.as_ref(), zugriff)?;
    tracing::debug!(konto_id = %konto.id, slug, ?grund, ?zugriff, "Zugriff auf Veranstaltung");

    // ressource_autorisieren lehnt None ab, hier also immer Some
    ereignis.ok_or_else(|| zielzeit_auth::AuthError::EigentumVerweigert.into())
}

async fn aktualisieren(
    state: &AppState,
    konto: &KontoRecord,
    slug: &str,
    body: EreignisBearbeitenBody,
) -> ApiResult<Response> {
    ereignis_mit_recht(state, konto, slug, Zugriff::Aendern).await?;
    let ereignis = state
        .ereignisse
        .ereignis_aktualisieren(slug, body.into())
        .await?;
    Ok((StatusCode::OK, Json(ereignis)).into_response())
}

async fn loeschen(state: &AppState, konto: &KontoRecord, slug: &str) -> ApiResult<StatusCode> {
    ereignis_mit_recht(state, konto, slug, Zugriff::Aendern).await?;
    if !state.ereignisse.ereignis_loeschen(slug).await? {
        return Err(zielzeit_auth::AuthError::RessourceNichtGefunden(slug.to_string()).into());
    }
    tracing::info!(konto_id = %konto.id, slug, "Veranstaltung geloescht");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Session (/r/events)
// ---------------------------------------------------------------------------

/// POST /r/events – Besitzer ist das anfragende Konto
pub async fn create_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<EreignisErstellenBody>,
) -> ApiResult<Response> {
    let konto = state.auth.session_autorisieren(&anfrage_aus_headers(&headers)).await?;
    let ereignis = state
        .ereignisse
        .ereignis_erstellen(NeuesEreignis {
            slug: &body.slug,
            name: &body.name,
            besitzer: konto.id,
            zugriff_eingeschraenkt: body.zugriff_eingeschraenkt,
        })
        .await?;
    tracing::info!(konto_id = %konto.id, slug = %ereignis.slug, "Veranstaltung erstellt");
    Ok((StatusCode::CREATED, Json(ereignis)).into_response())
}

/// PUT /r/events/:slug
pub async fn update_event(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
    Json(body): Json<EreignisBearbeitenBody>,
) -> ApiResult<Response> {
    let konto = state.auth.session_autorisieren(&anfrage_aus_headers(&headers)).await?;
    aktualisieren(&state, &konto, &slug, body).await
}

/// DELETE /r/events/:slug
pub async fn delete_event(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> ApiResult<StatusCode> {
    let konto = state.auth.session_autorisieren(&anfrage_aus_headers(&headers)).await?;
    loeschen(&state, &konto, &slug).await
}

// ---------------------------------------------------------------------------
// API-Schluessel (/api/v1/events)
// ---------------------------------------------------------------------------

/// GET /api/v1/events/:slug – Scope `read`, Sichtbarkeit entscheidet
pub async fn api_get_event(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    let (konto, _) = state
        .auth
        .api_key_autorisieren(&anfrage_aus_headers(&headers), SchluesselTyp::Read)
        .await?;
    let ereignis = ereignis_mit_recht(&state, &konto, &slug, Zugriff::Lesen).await?;
    Ok((StatusCode::OK, Json(ereignis)).into_response())
}

/// PUT /api/v1/events/:slug – Scope `write`
pub async fn api_update_event(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
    Json(body): Json<EreignisBearbeitenBody>,
) -> ApiResult<Response> {
    let (konto, _) = state
        .auth
        .api_key_autorisieren(&anfrage_aus_headers(&headers), SchluesselTyp::Write)
        .await?;
    aktualisieren(&state, &konto, &slug, body).await
}

/// DELETE /api/v1/events/:slug – Scope `delete`
pub async fn api_delete_event(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> ApiResult<StatusCode> {
    let (konto, _) = state
        .auth
        .api_key_autorisieren(&anfrage_aus_headers(&headers), SchluesselTyp::Delete)
        .await?;
    loeschen(&state, &konto, &slug).await
}
