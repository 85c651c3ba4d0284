//! REST-Handler fuer Anmeldung, Erneuerung und Abmeldung

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use serde_json::json;

use crate::rest::{anfrage_aus_headers, ApiResult, AppState};

#[derive(Debug, Deserialize)]
pub struct AnmeldenBody {
    pub email: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<AnmeldenBody>,
) -> ApiResult<Response> {
    let (konto, paar) = state.auth.anmelden(&body.email, &body.password).await?;
    Ok((
        StatusCode::OK,
        Json(json!({
            "token": paar.token,
            "refresh_token": paar.refresh_token,
            "expires_in": paar.laeuft_ab_in,
            "account": konto,
        })),
    )
        .into_response())
}

#[derive(Debug, Deserialize)]
pub struct ErneuernBody {
    pub refresh_token: String,
}

pub async fn refresh(
    State(state): State<AppState>,
    Json(body): Json<ErneuernBody>,
) -> ApiResult<Response> {
    let paar = state.auth.erneuern(&body.refresh_token).await?;
    Ok((
        StatusCode::OK,
        Json(json!({
            "token": paar.token,
            "refresh_token": paar.refresh_token,
            "expires_in": paar.laeuft_ab_in,
        })),
    )
        .into_response())
}

pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<StatusCode> {
    state.auth.abmelden(&anfrage_aus_headers(&headers)).await?;
    Ok(StatusCode::NO_CONTENT)
}
