//! Login/registration/logout against a mock server.

use lectern_core::api::auth::{AuthFlow, NavIntent};
use lectern_core::api::{ApiClient, ApiErrorKind};
use lectern_core::forms::RegisterForm;
use lectern_core::session::SessionStore;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn store_in(dir: &tempfile::TempDir) -> SessionStore {
    SessionStore::open_at(dir.path().join("session.json")).unwrap()
}

#[tokio::test]
async fn login_success_stores_and_persists_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(json!({"email": "ana@example.com", "password": "pw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "tok-1"})))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut store = store_in(&dir);
    let api = ApiClient::with_base_url(server.uri());

    let nav = AuthFlow::new(&api)
        .login(&mut store, "ana@example.com", "pw")
        .await
        .unwrap();

    assert_eq!(nav, NavIntent::Home);
    assert_eq!(store.get().unwrap().token(), "tok-1");

    // Survives a "page reload".
    let reopened = store_in(&dir);
    assert_eq!(reopened.get().unwrap().token(), "tok-1");
}

#[tokio::test]
async fn login_failure_surfaces_detail_and_leaves_session_unset() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Wrong password"})))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut store = store_in(&dir);
    let api = ApiClient::with_base_url(server.uri());

    let err = AuthFlow::new(&api)
        .login(&mut store, "ana@example.com", "nope")
        .await
        .unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Auth);
    assert_eq!(err.message, "Wrong password");
    assert!(store.get().is_none());
    assert!(!dir.path().join("session.json").exists());
}

#[tokio::test]
async fn login_failure_without_detail_uses_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut store = store_in(&dir);
    let api = ApiClient::with_base_url(server.uri());

    let err = AuthFlow::new(&api)
        .login(&mut store, "a@b.c", "pw")
        .await
        .unwrap_err();

    assert_eq!(err.message, "Could not sign in");
    assert!(store.get().is_none());
}

#[tokio::test]
async fn login_malformed_success_body_is_shape_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut store = store_in(&dir);
    let api = ApiClient::with_base_url(server.uri());

    let err = AuthFlow::new(&api)
        .login(&mut store, "a@b.c", "pw")
        .await
        .unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Shape);
    assert!(store.get().is_none());
}

#[tokio::test]
async fn register_success_clears_form_without_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/register"))
        .and(body_json(json!({
            "username": "ana",
            "email": "ana@example.com",
            "password": "pw",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Account created"})))
        .mount(&server)
        .await;

    let api = ApiClient::with_base_url(server.uri());
    let mut form = RegisterForm {
        username: "ana".to_string(),
        email: "ana@example.com".to_string(),
        password: "pw".to_string(),
    };

    let message = AuthFlow::new(&api).register(&mut form).await.unwrap();

    assert_eq!(message, "Account created");
    assert_eq!(form, RegisterForm::default());
}

#[tokio::test]
async fn register_failure_preserves_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/register"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "Email already registered"})),
        )
        .mount(&server)
        .await;

    let api = ApiClient::with_base_url(server.uri());
    let mut form = RegisterForm {
        username: "ana".to_string(),
        email: "taken@example.com".to_string(),
        password: "pw".to_string(),
    };
    let before = form.clone();

    let err = AuthFlow::new(&api).register(&mut form).await.unwrap_err();

    assert_eq!(err.message, "Email already registered");
    assert_eq!(form, before);
}

#[tokio::test]
async fn logout_clears_persisted_session() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = store_in(&dir);
    store.set(lectern_types::Session::new("tok")).unwrap();

    let api = ApiClient::with_base_url("http://localhost:0");
    let nav = AuthFlow::new(&api).logout(&mut store).unwrap();

    assert_eq!(nav, NavIntent::Entry);
    assert!(store.get().is_none());
    assert!(!dir.path().join("session.json").exists());
}
