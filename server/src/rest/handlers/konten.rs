//! REST-Handler fuer Konten und Verknuepfungen

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;

use zielzeit_auth::AuthError;
use zielzeit_core::KontoId;
use zielzeit_db::models::KontoTyp;

use crate::rest::{anfrage_aus_headers, ApiResult, AppState};

#[derive(Debug, Deserialize)]
pub struct KontoErstellenBody {
    pub email: String,
    pub password: String,
    #[serde(rename = "type", default = "standard_typ")]
    pub typ: KontoTyp,
}

fn standard_typ() -> KontoTyp {
    KontoTyp::User
}

/// POST /r/admin/accounts
pub async fn create_account(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<KontoErstellenBody>,
) -> ApiResult<Response> {
    let admin = state.auth.session_autorisieren(&anfrage_aus_headers(&headers)).await?;
    let konto = state
        .auth
        .konto_erstellen(&admin, &body.email, &body.password, body.typ)
        .await?;
    Ok((StatusCode::CREATED, Json(konto)).into_response())
}

/// POST /r/admin/accounts/:id/lock
pub async fn lock_account(
    State(state): State<AppState>,
    Path(id): Path<KontoId>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    sperre_setzen(state, id, headers, true).await
}

/// POST /r/admin/accounts/:id/unlock
pub async fn unlock_account(
    State(state): State<AppState>,
    Path(id): Path<KontoId>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    sperre_setzen(state, id, headers, false).await
}

async fn sperre_setzen(
    state: AppState,
    id: KontoId,
    headers: HeaderMap,
    gesperrt: bool,
) -> ApiResult<Response> {
    let admin = state.auth.session_autorisieren(&anfrage_aus_headers(&headers)).await?;
    let konto = state.auth.sperre_setzen(&admin, id, gesperrt).await?;
    Ok((StatusCode::OK, Json(konto)).into_response())
}

#[derive(Debug, Deserialize)]
pub struct VerknuepfenBody {
    /// Konto, in dessen Namen `:id` handeln darf
    pub ziel: KontoId,
}

/// POST /r/accounts/:id/links
pub async fn link_account(
    State(state): State<AppState>,
    Path(id): Path<KontoId>,
    headers: HeaderMap,
    Json(body): Json<VerknuepfenBody>,
) -> ApiResult<Response> {
    let akteur = state.auth.session_autorisieren(&anfrage_aus_headers(&headers)).await?;
    let konto = state.auth.verknuepfen(&akteur, id, body.ziel).await?;
    Ok((StatusCode::OK, Json(konto)).into_response())
}

/// DELETE /r/accounts/:id/links/:ziel
pub async fn unlink_account(
    State(state): State<AppState>,
    Path((id, ziel)): Path<(KontoId, KontoId)>,
    headers: HeaderMap,
) -> ApiResult<StatusCode> {
    let akteur = state.auth.session_autorisieren(&anfrage_aus_headers(&headers)).await?;
    if state.auth.verknuepfung_loesen(&akteur, id, ziel).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AuthError::RessourceNichtGefunden(format!("Verknuepfung {id} -> {ziel}")).into())
    }
}
