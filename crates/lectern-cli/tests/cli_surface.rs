use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn test_help_lists_subcommands() {
    cargo_bin_cmd!("lectern")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("books"))
        .stdout(predicate::str::contains("view"));
}

#[test]
fn test_books_mine_without_session_prompts_for_login() {
    let dir = tempdir().unwrap();

    // No session stored; the command answers locally without a server.
    cargo_bin_cmd!("lectern")
        .env("LECTERN_HOME", dir.path())
        .env("LECTERN_API_URL", "http://127.0.0.1:1")
        .args(["books", "mine"])
        .assert()
        .success()
        .stdout(predicate::str::contains("must log in"));
}

#[test]
fn test_profile_show_without_session_fails() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("lectern")
        .env("LECTERN_HOME", dir.path())
        .env("LECTERN_API_URL", "http://127.0.0.1:1")
        .args(["profile", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not logged in"));
}

#[test]
fn test_books_rm_declined_confirmation_aborts() {
    let dir = tempdir().unwrap();
    std::fs::write(
        dir.path().join("session.json"),
        r#"{"token": "tok"}"#,
    )
    .unwrap();

    // Declining the prompt must not touch the network at all.
    cargo_bin_cmd!("lectern")
        .env("LECTERN_HOME", dir.path())
        .env("LECTERN_API_URL", "http://127.0.0.1:1")
        .args(["books", "rm", "b1"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Aborted."));
}

#[tokio::test]
async fn test_login_then_logout_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"access_token": "tok-e2e"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let session_path = dir.path().join("session.json");
    let home = dir.path().to_path_buf();
    let uri = server.uri();

    tokio::task::spawn_blocking(move || {
        cargo_bin_cmd!("lectern")
            .env("LECTERN_HOME", &home)
            .env("LECTERN_API_URL", &uri)
            .args(["login", "--email", "ana@example.com", "--password", "pw"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Signed in as ana@example.com"));

        assert!(session_path.exists());
        let stored = std::fs::read_to_string(&session_path).unwrap();
        assert!(stored.contains("tok-e2e"));

        cargo_bin_cmd!("lectern")
            .env("LECTERN_HOME", &home)
            .args(["logout"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Signed out."));

        assert!(!session_path.exists());
    })
    .await
    .unwrap();
}
