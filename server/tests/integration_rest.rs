//! Integration-Tests fuer die REST-API (Router ohne Listener)

use std::net::SocketAddr;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::util::ServiceExt;

use zielzeit_server::{
    config::ServerConfig,
    rest::{server::RestServerKonfig, RestServer},
    Server,
};

const ADMIN_EMAIL: &str = "admin@example.org";
const ADMIN_PASSWORT: &str = "start";

async fn app() -> Router {
    let mut config = ServerConfig::default();
    config.auth.jwt_secret = Some("rest-test-secret".into());
    config.bootstrap.admin_email = Some(ADMIN_EMAIL.into());
    config.bootstrap.admin_passwort = Some(ADMIN_PASSWORT.into());

    let state = Server::neu(config).zustand_aufbauen().await.unwrap();
    let bind_addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
    RestServer::neu(RestServerKonfig {
        bind_addr,
        cors_origins: vec![],
    })
    .app(state)
}

struct Antwort {
    status: StatusCode,
    body: Value,
}

async fn senden(
    app: &Router,
    methode: Method,
    uri: &str,
    token: Option<&str>,
    herkunft: Option<&str>,
    body: Option<Value>,
) -> Antwort {
    let mut builder = Request::builder().method(methode).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    if let Some(herkunft) = herkunft {
        builder = builder.header(header::ORIGIN, herkunft);
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    Antwort { status, body }
}

/// Meldet an und gibt (Konto-ID, Token, Refresh-Token) zurueck
async fn anmelden(app: &Router, email: &str, passwort: &str) -> (String, String, String) {
    let antwort = senden(
        app,
        Method::POST,
        "/r/auth/login",
        None,
        None,
        Some(json!({ "email": email, "password": passwort })),
    )
    .await;
    assert_eq!(antwort.status, StatusCode::OK, "Login fehlgeschlagen: {}", antwort.body);
    (
        antwort.body["account"]["id"].as_str().unwrap().to_string(),
        antwort.body["token"].as_str().unwrap().to_string(),
        antwort.body["refresh_token"].as_str().unwrap().to_string(),
    )
}

async fn konto_anlegen(app: &Router, admin_token: &str, email: &str) -> String {
    let antwort = senden(
        app,
        Method::POST,
        "/r/admin/accounts",
        Some(admin_token),
        None,
        Some(json!({ "email": email, "password": "passwort" })),
    )
    .await;
    assert_eq!(antwort.status, StatusCode::CREATED, "{}", antwort.body);
    assert!(antwort.body.get("password_hash").is_none());
    antwort.body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_check() {
    let app = app().await;
    let antwort = senden(&app, Method::GET, "/health", None, None, None).await;
    assert_eq!(antwort.status, StatusCode::OK);
    assert_eq!(antwort.body["status"], "ok");
}

#[tokio::test]
async fn verknuepftes_konto_aendert_fremdes_nicht() {
    let app = app().await;
    let (_, admin, _) = anmelden(&app, ADMIN_EMAIL, ADMIN_PASSWORT).await;
    let a_id = konto_anlegen(&app, &admin, "a@example.org").await;
    let b_id = konto_anlegen(&app, &admin, "b@example.org").await;
    konto_anlegen(&app, &admin, "c@example.org").await;

    let (_, a, _) = anmelden(&app, "a@example.org", "passwort").await;
    let (_, b, _) = anmelden(&app, "b@example.org", "passwort").await;
    let (_, c, _) = anmelden(&app, "c@example.org", "passwort").await;

    let antwort = senden(
        &app,
        Method::POST,
        "/r/events",
        Some(&a),
        None,
        Some(json!({ "slug": "stadtlauf", "name": "Stadtlauf", "zugriff_eingeschraenkt": true })),
    )
    .await;
    assert_eq!(antwort.status, StatusCode::CREATED);
    assert_eq!(antwort.body["besitzer"], a_id.as_str());

    // b kann sich die Delegation nicht selbst geben, a schon
    let verknuepfung = json!({ "ziel": a_id });
    let link_uri = format!("/r/accounts/{b_id}/links");
    let antwort = senden(&app, Method::POST, &link_uri, Some(&b), None, Some(verknuepfung.clone())).await;
    assert_eq!(antwort.status, StatusCode::UNAUTHORIZED);
    let antwort = senden(&app, Method::POST, &link_uri, Some(&a), None, Some(verknuepfung)).await;
    assert_eq!(antwort.status, StatusCode::OK);

    let aenderung = json!({ "name": "Stadtlauf 2024" });
    let antwort = senden(&app, Method::PUT, "/r/events/stadtlauf", Some(&b), None, Some(aenderung.clone())).await;
    assert_eq!(antwort.status, StatusCode::OK);
    assert_eq!(antwort.body["name"], "Stadtlauf 2024");

    // Schluessel von a verwaltet nur a selbst
    let schluessel_uri = format!("/r/accounts/{a_id}/keys");
    let antrag = json!({ "name": "Dauerzugang", "type": "delete", "laeuft_ab_am": "2999-01-01T00:00:00Z" });
    let antwort = senden(&app, Method::POST, &schluessel_uri, Some(&b), None, Some(antrag)).await;
    assert_eq!(antwort.status, StatusCode::UNAUTHORIZED);
    let antwort = senden(&app, Method::GET, &schluessel_uri, Some(&b), None, None).await;
    assert_eq!(antwort.status, StatusCode::UNAUTHORIZED);

    let fremd = senden(&app, Method::PUT, "/r/events/stadtlauf", Some(&c), None, Some(aenderung.clone())).await;
    let fehlt = senden(&app, Method::PUT, "/r/events/gibt-es-nicht", Some(&c), None, Some(aenderung)).await;
    assert_eq!(fremd.status, StatusCode::UNAUTHORIZED);
    assert_eq!(fremd.status, fehlt.status);
    assert_eq!(fremd.body, fehlt.body);

    let antwort = senden(&app, Method::DELETE, "/r/events/stadtlauf", Some(&a), None, None).await;
    assert_eq!(antwort.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn zweite_anmeldung_und_abmeldung() {
    let app = app().await;
    let (_, admin, _) = anmelden(&app, ADMIN_EMAIL, ADMIN_PASSWORT).await;
    konto_anlegen(&app, &admin, "a@example.org").await;

    let (_, erstes, erstes_refresh) = anmelden(&app, "a@example.org", "passwort").await;
    let (_, zweites, _) = anmelden(&app, "a@example.org", "passwort").await;

    let ereignis = json!({ "slug": "lauf", "name": "Lauf" });
    let antwort = senden(&app, Method::POST, "/r/events", Some(&erstes), None, Some(ereignis.clone())).await;
    assert_eq!(antwort.status, StatusCode::UNAUTHORIZED);

    let antwort = senden(
        &app,
        Method::POST,
        "/r/auth/refresh",
        None,
        None,
        Some(json!({ "refresh_token": erstes_refresh })),
    )
    .await;
    assert_eq!(antwort.status, StatusCode::UNAUTHORIZED);

    let antwort = senden(&app, Method::POST, "/r/events", Some(&zweites), None, Some(ereignis)).await;
    assert_eq!(antwort.status, StatusCode::CREATED);

    let antwort = senden(&app, Method::POST, "/r/auth/logout", Some(&zweites), None, None).await;
    assert_eq!(antwort.status, StatusCode::NO_CONTENT);
    let antwort = senden(&app, Method::POST, "/r/auth/logout", Some(&zweites), None, None).await;
    assert_eq!(antwort.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn erneuern_liefert_neues_paar() {
    let app = app().await;
    let (_, _, refresh) = anmelden(&app, ADMIN_EMAIL, ADMIN_PASSWORT).await;

    let antwort = senden(
        &app,
        Method::POST,
        "/r/auth/refresh",
        None,
        None,
        Some(json!({ "refresh_token": refresh })),
    )
    .await;
    assert_eq!(antwort.status, StatusCode::OK);
    assert_eq!(antwort.body["expires_in"], 900);
    let neues_token = antwort.body["token"].as_str().unwrap();

    let antwort = senden(
        &app,
        Method::POST,
        "/r/admin/accounts",
        Some(neues_token),
        None,
        Some(json!({ "email": "x@example.org", "password": "pw", "type": "user" })),
    )
    .await;
    assert_eq!(antwort.status, StatusCode::CREATED);
}

#[tokio::test]
async fn gesperrtes_konto() {
    let app = app().await;
    let (_, admin, _) = anmelden(&app, ADMIN_EMAIL, ADMIN_PASSWORT).await;
    let a_id = konto_anlegen(&app, &admin, "a@example.org").await;
    let (_, a, _) = anmelden(&app, "a@example.org", "passwort").await;

    let antwort = senden(&app, Method::POST, &format!("/r/admin/accounts/{a_id}/lock"), Some(&admin), None, None).await;
    assert_eq!(antwort.status, StatusCode::OK);
    assert_eq!(antwort.body["gesperrt"], true);

    let ereignis = json!({ "slug": "lauf", "name": "Lauf" });
    let antwort = senden(&app, Method::POST, "/r/events", Some(&a), None, Some(ereignis.clone())).await;
    assert_eq!(antwort.status, StatusCode::UNAUTHORIZED);

    // Nur Admins duerfen sperren
    let antwort = senden(&app, Method::POST, &format!("/r/admin/accounts/{a_id}/unlock"), Some(&a), None, None).await;
    assert_eq!(antwort.status, StatusCode::UNAUTHORIZED);

    let antwort = senden(&app, Method::POST, &format!("/r/admin/accounts/{a_id}/unlock"), Some(&admin), None, None).await;
    assert_eq!(antwort.status, StatusCode::OK);
    let antwort = senden(&app, Method::POST, "/r/events", Some(&a), None, Some(ereignis)).await;
    assert_eq!(antwort.status, StatusCode::CREATED);
}

#[tokio::test]
async fn api_schluessel_scope_und_herkunft() {
    let app = app().await;
    let (_, admin, _) = anmelden(&app, ADMIN_EMAIL, ADMIN_PASSWORT).await;
    let a_id = konto_anlegen(&app, &admin, "a@example.org").await;
    let (_, a, _) = anmelden(&app, "a@example.org", "passwort").await;

    senden(
        &app,
        Method::POST,
        "/r/events",
        Some(&a),
        None,
        Some(json!({ "slug": "lauf", "name": "Lauf", "zugriff_eingeschraenkt": true })),
    )
    .await;

    let antwort = senden(
        &app,
        Method::POST,
        &format!("/r/accounts/{a_id}/keys"),
        Some(&a),
        None,
        Some(json!({
            "name": "Anzeige",
            "type": "read",
            "laeuft_ab_am": "2999-01-01T00:00:00Z",
            "erlaubte_hosts": ["results.example.org"],
        })),
    )
    .await;
    assert_eq!(antwort.status, StatusCode::CREATED, "{}", antwort.body);
    let wert = antwort.body["wert"].as_str().unwrap().to_string();
    let schluessel_id = antwort.body["id"].as_str().unwrap().to_string();
    assert!(wert.starts_with("zz_"));

    let passend = Some("https://results.example.org");
    let antwort = senden(&app, Method::GET, "/api/v1/events/lauf", Some(&wert), passend, None).await;
    assert_eq!(antwort.status, StatusCode::OK);
    assert_eq!(antwort.body["slug"], "lauf");

    let antwort = senden(&app, Method::GET, "/api/v1/events/lauf", Some(&wert), Some("https://evil.example.com"), None).await;
    assert_eq!(antwort.status, StatusCode::UNAUTHORIZED);

    let antwort = senden(&app, Method::GET, "/api/v1/events/lauf", Some(&wert), None, None).await;
    assert_eq!(antwort.status, StatusCode::UNAUTHORIZED);

    let antwort = senden(&app, Method::DELETE, "/api/v1/events/lauf", Some(&wert), passend, None).await;
    assert_eq!(antwort.status, StatusCode::UNAUTHORIZED);

    // Liste zeigt nur den Praefix
    let antwort = senden(&app, Method::GET, &format!("/r/accounts/{a_id}/keys"), Some(&a), None, None).await;
    assert_eq!(antwort.status, StatusCode::OK);
    let eintrag = &antwort.body[0];
    assert!(eintrag.get("wert").is_none());
    assert_eq!(eintrag["praefix"].as_str().unwrap(), &wert[..8]);

    let antwort = senden(
        &app,
        Method::DELETE,
        &format!("/r/accounts/{a_id}/keys/{schluessel_id}"),
        Some(&a),
        None,
        None,
    )
    .await;
    assert_eq!(antwort.status, StatusCode::NO_CONTENT);

    let antwort = senden(&app, Method::GET, "/api/v1/events/lauf", Some(&wert), passend, None).await;
    assert_eq!(antwort.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn schreibschluessel_aendert_und_loescht_nicht() {
    let app = app().await;
    let (_, admin, _) = anmelden(&app, ADMIN_EMAIL, ADMIN_PASSWORT).await;
    let a_id = konto_anlegen(&app, &admin, "a@example.org").await;
    let (_, a, _) = anmelden(&app, "a@example.org", "passwort").await;

    senden(&app, Method::POST, "/r/events", Some(&a), None, Some(json!({ "slug": "lauf", "name": "Lauf" }))).await;

    let antwort = senden(
        &app,
        Method::POST,
        &format!("/r/accounts/{a_id}/keys"),
        Some(&a),
        None,
        Some(json!({ "type": "write", "laeuft_ab_am": "2999-01-01T00:00:00Z" })),
    )
    .await;
    let wert = antwort.body["wert"].as_str().unwrap().to_string();

    let antwort = senden(
        &app,
        Method::PUT,
        "/api/v1/events/lauf",
        Some(&wert),
        None,
        Some(json!({ "zugriff_eingeschraenkt": true })),
    )
    .await;
    assert_eq!(antwort.status, StatusCode::OK);
    assert_eq!(antwort.body["zugriff_eingeschraenkt"], true);

    // write erfuellt auch delete
    let antwort = senden(&app, Method::DELETE, "/api/v1/events/lauf", Some(&wert), None, None).await;
    assert_eq!(antwort.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn ohne_anmeldedaten() {
    let app = app().await;
    let antwort = senden(&app, Method::GET, "/api/v1/events/lauf", None, None, None).await;
    assert_eq!(antwort.status, StatusCode::UNAUTHORIZED);
    assert_eq!(antwort.body["error"]["code"], 401);

    let antwort = senden(&app, Method::POST, "/r/auth/logout", Some(""), None, None).await;
    assert_eq!(antwort.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn slug_konflikt_verraet_nichts_ueber_den_besitzer() {
    let app = app().await;
    let (_, admin, _) = anmelden(&app, ADMIN_EMAIL, ADMIN_PASSWORT).await;
    konto_anlegen(&app, &admin, "a@example.org").await;
    konto_anlegen(&app, &admin, "c@example.org").await;
    let (_, a, _) = anmelden(&app, "a@example.org", "passwort").await;
    let (_, c, _) = anmelden(&app, "c@example.org", "passwort").await;

    let ereignis = json!({ "slug": "geheimlauf", "name": "Interner Lauf", "zugriff_eingeschraenkt": true });
    let antwort = senden(&app, Method::POST, "/r/events", Some(&a), None, Some(ereignis.clone())).await;
    assert_eq!(antwort.status, StatusCode::CREATED);

    let eigen = senden(&app, Method::POST, "/r/events", Some(&a), None, Some(ereignis.clone())).await;
    let fremd = senden(&app, Method::POST, "/r/events", Some(&c), None, Some(ereignis)).await;
    assert_eq!(fremd.status, StatusCode::CONFLICT);
    assert_eq!(fremd.body, eigen.body);
    let nachricht = fremd.body["error"]["message"].as_str().unwrap();
    assert!(!nachricht.contains("Interner Lauf"));
    assert!(!nachricht.contains("a@example.org"));

    let aenderung = json!({ "name": "Uebernommen" });
    let antwort = senden(&app, Method::PUT, "/r/events/geheimlauf", Some(&c), None, Some(aenderung)).await;
    assert_eq!(antwort.status, StatusCode::UNAUTHORIZED);
}
