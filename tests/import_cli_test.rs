//! `padron import` end-to-end tests against a mock Supabase

use assert_cmd::prelude::*;
use predicates::prelude::*;
use serde_json::json;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn roster_file(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn padron() -> Command {
    let mut cmd = Command::cargo_bin("padron").unwrap();
    cmd.env_remove("SUPABASE_URL")
        .env_remove("SUPABASE_SERVICE_ROLE_KEY")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_dry_run_needs_no_credentials() {
    let roster = roster_file(
        r#"[
            {"dni": "11111111", "nombre": "SOCIO PRUEBA UNO"},
            {"dni": "22222222", "nombre": "SOCIO DOS", "email": "real@example.com"}
        ]"#,
    );

    padron()
        .args(["import", "--dry-run", "--roster"])
        .arg(roster.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run: 2 member(s)"))
        .stdout(predicate::str::contains("11111111@padron.votacion"))
        .stdout(predicate::str::contains("real@example.com"));
}

#[test]
fn test_dry_run_synthesize_all() {
    let roster = roster_file(r#"[{"dni": "22222222", "nombre": "SOCIO DOS", "email": "real@example.com"}]"#);

    padron()
        .args(["import", "--dry-run", "--synthesize-all", "--roster"])
        .arg(roster.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("22222222@padron.votacion"))
        .stdout(predicate::str::contains("real@example.com").not());
}

#[test]
fn test_missing_service_key_fails_before_import() {
    let roster = roster_file(r#"[{"dni": "11111111", "nombre": "SOCIO PRUEBA UNO"}]"#);

    padron()
        .args(["import", "--url", "http://127.0.0.1:9", "--roster"])
        .arg(roster.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("SUPABASE_SERVICE_ROLE_KEY"))
        .stdout(predicate::str::contains("Starting import").not());
}

#[test]
fn test_unsupported_roster_format_fails() {
    padron()
        .args([
            "import",
            "--url",
            "http://127.0.0.1:9",
            "--service-key",
            "k",
            "--roster",
            "padron.csv",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported roster format"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_import_continues_after_failures_and_exits_zero() {
    let server = MockServer::start().await;

    // 11111111: fully synced
    Mock::given(method("POST"))
        .and(path("/auth/v1/admin/users"))
        .and(body_partial_json(json!({"email": "11111111@padron.votacion"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "uid-1",
            "email": "11111111@padron.votacion",
            "email_confirmed_at": "2026-10-14T10:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    // 22222222: account creation rejected
    Mock::given(method("POST"))
        .and(path("/auth/v1/admin/users"))
        .and(body_partial_json(json!({"email": "real@example.com"})))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "msg": "A user with this email address has already been registered"
        })))
        .expect(1)
        .mount(&server)
        .await;

    // 33333333: account created, profile rejected
    Mock::given(method("POST"))
        .and(path("/auth/v1/admin/users"))
        .and(body_partial_json(json!({"email": "33333333@padron.votacion"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "uid-3",
            "email": "33333333@padron.votacion",
            "email_confirmed_at": "2026-10-14T10:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/perfiles"))
        .and(body_partial_json(json!({"id": "uid-1"})))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/perfiles"))
        .and(body_partial_json(json!({"id": "uid-3"})))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "code": "42501",
            "message": "permission denied for table perfiles"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let roster = roster_file(
        r#"[
            {"dni": "11111111", "nombre": "SOCIO UNO"},
            {"dni": "22222222", "nombre": "SOCIO DOS", "email": "real@example.com"},
            {"dni": "33333333", "nombre": "SOCIO TRES"}
        ]"#,
    );
    let roster_path = roster.path().to_path_buf();
    let uri = server.uri();

    let output = tokio::task::spawn_blocking(move || {
        padron()
            .args(["import", "--service-key", "service-role-key", "--url"])
            .arg(&uri)
            .arg("--roster")
            .arg(&roster_path)
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success(), "stderr: {stderr}");
    assert!(stdout.contains("Starting import of 3 member(s)..."));
    assert!(stdout.contains("Account created. ID: uid-1"));
    assert!(stdout.contains("Account created. ID: uid-3"));
    assert!(stdout.contains("--- Process finished ---"));
    // 件数サマリーは -v のときだけ
    assert!(!stdout.contains("without profile"));
    assert!(stderr.contains("Error creating account for 22222222"));
    assert!(stderr.contains("Error syncing profile for 33333333"));
    assert!(stderr.contains("permission denied for table perfiles"));
}
