use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::Serialize;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use prontuario_api::app;
use prontuario_api::config::{AuthConfig, TokenKey, parse_flag};
use prontuario_api::middleware::auth::TokenVerifier;
use prontuario_api::state::AppState;
use prontuario_export::styles::DocumentStyles;
use prontuario_storage::store::MemoryObjectStore;

const SECRET: &[u8] = b"test-signing-secret";
const ISSUER: &str = "https://auth.prontuario.test";

#[derive(Serialize)]
struct Claims {
    sub: String,
    iss: String,
    exp: i64,
}

fn claims(user: Uuid) -> Claims {
    Claims {
        sub: user.to_string(),
        iss: ISSUER.to_string(),
        exp: jiff::Timestamp::now().as_second() + 3600,
    }
}

fn sign(claims: &Claims, secret: &[u8]) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret),
    )
    .unwrap()
}

fn token_for(user: Uuid) -> String {
    sign(&claims(user), SECRET)
}

fn verifier() -> TokenVerifier {
    TokenVerifier::hs256(SECRET, ISSUER)
}

fn router(store: &MemoryObjectStore) -> Router {
    app(AppState::new(
        store.clone(),
        DocumentStyles::default(),
        verifier(),
    ))
}

fn request(method: &str, uri: &str, user: Uuid, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token_for(user)));
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(store: &MemoryObjectStore, req: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = router(store).oneshot(req).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

async fn send_json(store: &MemoryObjectStore, req: Request<Body>) -> (StatusCode, Value) {
    let (status, body) = send(store, req).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, value)
}

async fn create_patient(store: &MemoryObjectStore, user: Uuid) -> Uuid {
    let (status, patient) = send_json(
        store,
        request(
            "POST",
            "/patients",
            user,
            Some(json!({
                "name": "Ana Souza",
                "cpf": "123.456.789-01",
                "birth_date": "1990-05-10",
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    patient["id"].as_str().unwrap().parse().unwrap()
}

async fn create_intake(store: &MemoryObjectStore, user: Uuid, patient_id: Uuid) -> Uuid {
    let (status, session) = send_json(
        store,
        request(
            "POST",
            &format!("/patients/{patient_id}/sessions"),
            user,
            Some(json!({
                "session_type": "intake",
                "date": "2026-10-01",
                "time": "14:30:00",
                "main_complaint": "Insomnia",
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    session["id"].as_str().unwrap().parse().unwrap()
}

#[tokio::test]
async fn health_is_public_and_records_need_a_token() {
    let store = MemoryObjectStore::new();

    let req = Request::get("/health").body(Body::empty()).unwrap();
    let (status, _) = send(&store, req).await;
    assert_eq!(status, StatusCode::OK);

    let req = Request::get("/patients").body(Body::empty()).unwrap();
    let (status, _) = send(&store, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn reference_tables_are_served() {
    let store = MemoryObjectStore::new();
    let req = Request::get("/reference").body(Body::empty()).unwrap();
    let (status, body) = send_json(&store, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["default_duration"], 50);
    assert_eq!(body["moods"].as_array().unwrap().len(), 9);
}

#[tokio::test]
async fn invalid_patient_returns_every_field_error() {
    let store = MemoryObjectStore::new();
    let user = Uuid::new_v4();
    let (status, body) = send_json(
        &store,
        request("POST", "/patients", user, Some(json!({ "cpf": "123" }))),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["fields"]["name"], "Name is required");
    assert_eq!(body["fields"]["cpf"], "CPF must have 11 digits");
    assert_eq!(body["fields"]["birth_date"], "Birth date is required");
    assert!(store.keys().is_empty());
}

#[tokio::test]
async fn narrative_is_downloaded_with_file_name() {
    let store = MemoryObjectStore::new();
    let user = Uuid::new_v4();
    let patient_id = create_patient(&store, user).await;
    let session_id = create_intake(&store, user, patient_id).await;

    let response = router(&store)
        .oneshot(request(
            "GET",
            &format!("/sessions/{session_id}/narrative"),
            user,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"session_Ana_Souza_2026-10-01.txt\""
    );
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.starts_with("SESSION RECORD - INTAKE"));
    assert!(text.contains("MAIN COMPLAINT\n\nInsomnia"));

    let (status, docx) = send(
        &store,
        request(
            "GET",
            &format!("/sessions/{session_id}/narrative?format=docx"),
            user,
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(docx.starts_with(b"PK"));

    let (status, report) = send(
        &store,
        request(
            "GET",
            &format!("/sessions/{session_id}/report?format=docx"),
            user,
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(report.starts_with(b"PK"));
}

#[tokio::test]
async fn dossier_needs_a_profile() {
    let store = MemoryObjectStore::new();
    let user = Uuid::new_v4();
    let patient_id = create_patient(&store, user).await;
    create_intake(&store, user, patient_id).await;

    let uri = format!("/patients/{patient_id}/dossier");
    let (status, _) = send(&store, request("GET", &uri, user, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &store,
        request(
            "PUT",
            "/profile",
            user,
            Some(json!({ "full_name": "Helena Prado", "crp": "06/123456" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, pdf) = send(&store, request("GET", &uri, user, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(pdf.starts_with(b"%PDF"));

    let (status, summary) = send_json(
        &store,
        request("GET", &format!("{uri}/summary"), user, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["session_count"], 1);
}

#[tokio::test]
async fn records_are_scoped_to_their_owner() {
    let store = MemoryObjectStore::new();
    let owner = Uuid::new_v4();
    let stranger = Uuid::new_v4();
    let patient_id = create_patient(&store, owner).await;

    let uri = format!("/patients/{patient_id}");
    let (status, _) = send(&store, request("GET", &uri, owner, None)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send_json(&store, request("GET", &uri, stranger, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("reload the patient list"));

    let (_, listing) = send_json(&store, request("GET", "/patients", stranger, None)).await;
    assert_eq!(listing, json!([]));
}

#[tokio::test]
async fn status_change_requires_reason() {
    let store = MemoryObjectStore::new();
    let user = Uuid::new_v4();
    let patient_id = create_patient(&store, user).await;
    let uri = format!("/patients/{patient_id}/status");

    let (status, _) = send(
        &store,
        request("POST", &uri, user, Some(json!({ "status": "discharged", "reason": " " }))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &store,
        request(
            "POST",
            &uri,
            user,
            Some(json!({ "status": "discharged", "reason": "Goals reached" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, history) = send_json(&store, request("GET", &uri, user, None)).await;
    assert_eq!(history.as_array().unwrap().len(), 1);
    assert_eq!(history[0]["status"], "discharged");
}

#[tokio::test]
async fn uploaded_document_downloads_unchanged() {
    let store = MemoryObjectStore::new();
    let user = Uuid::new_v4();
    let patient_id = create_patient(&store, user).await;
    let session_id = create_intake(&store, user, patient_id).await;

    let req = Request::builder()
        .method("POST")
        .uri(format!(
            "/sessions/{session_id}/documents?file_name=consent.PDF&document_type=consent_form"
        ))
        .header(header::AUTHORIZATION, format!("Bearer {}", token_for(user)))
        .header(header::CONTENT_TYPE, "application/pdf")
        .body(Body::from(b"%PDF-1.4 signed".to_vec()))
        .unwrap();
    let (status, document) = send_json(&store, req).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(document["document_type"], "consent_form");
    assert_eq!(document["description"], "consent.PDF");
    let document_id = document["id"].as_str().unwrap();

    let (status, body) = send(
        &store,
        request(
            "GET",
            &format!("/sessions/{session_id}/documents/{document_id}"),
            user,
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"%PDF-1.4 signed");

    let (status, _) = send(
        &store,
        request(
            "DELETE",
            &format!("/sessions/{session_id}/documents/{document_id}"),
            user,
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(!store.keys().iter().any(|k| k.ends_with(".pdf")));
}

async fn list_with_token(store: &MemoryObjectStore, token: &str) -> (StatusCode, Value) {
    let req = Request::get("/patients")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send_json(store, req).await
}

#[tokio::test]
async fn forged_and_unsigned_tokens_are_rejected() {
    let store = MemoryObjectStore::new();
    let owner = Uuid::new_v4();
    create_patient(&store, owner).await;

    let (status, listing) = list_with_token(&store, &token_for(owner)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing.as_array().unwrap().len(), 1);

    let forged = sign(&claims(owner), b"someone-else");
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"{owner}","iss":"{ISSUER}"}}"#));
    let unsigned = format!("{header}.{payload}.");
    let tampered = {
        let valid = token_for(Uuid::new_v4());
        let signature = valid.rsplit('.').next().unwrap().to_string();
        let header = valid.split('.').next().unwrap().to_string();
        let payload = URL_SAFE_NO_PAD.encode(
            serde_json::to_string(&claims(owner)).unwrap(),
        );
        format!("{header}.{payload}.{signature}")
    };

    for token in [forged, unsigned, tampered, owner.to_string()] {
        let (status, body) = list_with_token(&store, &token).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "accepted {token}");
        assert_eq!(body, Value::Null);
    }
}

#[test]
fn token_needs_issuer_and_expiry() {
    let id = Uuid::new_v4();
    assert_eq!(verifier().user_id(&token_for(id)), Some(id));

    let expired = Claims {
        exp: jiff::Timestamp::now().as_second() - 3600,
        ..claims(id)
    };
    assert_eq!(verifier().user_id(&sign(&expired, SECRET)), None);

    let foreign = Claims {
        iss: "https://elsewhere.test".to_string(),
        ..claims(id)
    };
    assert_eq!(verifier().user_id(&sign(&foreign, SECRET)), None);

    let not_a_uuid = Claims {
        sub: "helena".to_string(),
        ..claims(id)
    };
    assert_eq!(verifier().user_id(&sign(&not_a_uuid, SECRET)), None);

    assert_eq!(verifier().user_id(""), None);
    assert_eq!(verifier().user_id("not-a-token"), None);
}

#[test]
fn bare_user_ids_only_when_enabled() {
    let id = Uuid::new_v4();
    assert_eq!(verifier().user_id(&id.to_string()), None);
    assert_eq!(
        verifier().accept_bare_user_ids(true).user_id(&id.to_string()),
        Some(id)
    );

    let config = AuthConfig {
        issuer: ISSUER.to_string(),
        key: TokenKey::Secret("test-signing-secret".to_string()),
        dev_user_ids: parse_flag("TRUE"),
    };
    let configured = config.verifier().unwrap();
    assert_eq!(configured.user_id(&id.to_string()), Some(id));
    assert_eq!(configured.user_id(&token_for(id)), Some(id));

    assert!(!parse_flag("false"));
    assert!(!parse_flag(""));
}

#[tokio::test]
async fn unchecked_minor_survives_edit_with_same_birth_date() {
    let store = MemoryObjectStore::new();
    let user = Uuid::new_v4();
    let body = json!({
        "name": "Pedro Lima",
        "cpf": "987.654.321-00",
        "birth_date": "2015-01-01",
        "guardian_name": "Maria Lima",
    });
    let (status, patient) =
        send_json(&store, request("POST", "/patients", user, Some(body.clone()))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(patient["is_minor"], true);
    let uri = format!("/patients/{}", patient["id"].as_str().unwrap());

    let mut unchecked = body.clone();
    unchecked["is_minor"] = json!(false);
    let (status, patient) = send_json(&store, request("PUT", &uri, user, Some(unchecked))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patient["is_minor"], false);

    let mut moved = body;
    moved["is_minor"] = json!(false);
    moved["birth_date"] = json!("2015-06-01");
    let (status, patient) = send_json(&store, request("PUT", &uri, user, Some(moved))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patient["is_minor"], true);
}

#[tokio::test]
async fn unknown_document_type_is_a_bad_request() {
    let store = MemoryObjectStore::new();
    let user = Uuid::new_v4();
    let patient_id = create_patient(&store, user).await;
    let session_id = create_intake(&store, user, patient_id).await;

    let req = Request::builder()
        .method("POST")
        .uri(format!(
            "/sessions/{session_id}/documents?file_name=bill.pdf&document_type=invoice"
        ))
        .header(header::AUTHORIZATION, format!("Bearer {}", token_for(user)))
        .header(header::CONTENT_TYPE, "application/pdf")
        .body(Body::from(b"%PDF-1.4".to_vec()))
        .unwrap();
    let (status, body) = send_json(&store, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("invoice"));
    assert!(!store.keys().iter().any(|k| k.ends_with(".pdf")));
}
