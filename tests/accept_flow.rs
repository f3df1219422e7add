#![allow(deprecated)]

//! End-to-end runs of the binary against a local stub of the invitations API.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use assert_cmd::Command;
use axum::extract::{Path as UrlPath, RawQuery, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, patch};
use axum::Router;
use predicates::prelude::*;
use tempfile::TempDir;
use tokio::runtime::Runtime;

#[derive(Clone, Default)]
struct Stub {
    listing_status: u16,
    listing_body: String,
    accept_statuses: HashMap<u64, u16>,
    calls: Arc<Mutex<Calls>>,
}

#[derive(Default)]
struct Calls {
    listings: usize,
    accepted: Vec<u64>,
    authorization: Vec<String>,
    accept_media_types: Vec<String>,
    queries: Vec<String>,
}

fn header(headers: &HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

async fn list_invitations(
    State(stub): State<Stub>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> (StatusCode, String) {
    {
        let mut calls = stub.calls.lock().unwrap();
        calls.listings += 1;
        calls.authorization.push(header(&headers, "authorization"));
        calls.queries.push(query.unwrap_or_default());
    }
    (
        StatusCode::from_u16(stub.listing_status).unwrap(),
        stub.listing_body.clone(),
    )
}

async fn accept_invitation(
    State(stub): State<Stub>,
    UrlPath(id): UrlPath<u64>,
    headers: HeaderMap,
) -> StatusCode {
    {
        let mut calls = stub.calls.lock().unwrap();
        calls.accepted.push(id);
        calls.authorization.push(header(&headers, "authorization"));
        calls.accept_media_types.push(header(&headers, "accept"));
    }
    StatusCode::from_u16(*stub.accept_statuses.get(&id).unwrap_or(&500)).unwrap()
}

struct Server {
    // keeps the stub alive for the duration of the test
    _rt: Runtime,
    url: String,
    calls: Arc<Mutex<Calls>>,
}

fn serve(stub: Stub) -> Server {
    let rt = Runtime::new().unwrap();
    let listener = rt
        .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
        .unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    let calls = stub.calls.clone();

    let app = Router::new()
        .route("/user/repository_invitations", get(list_invitations))
        .route("/user/repository_invitations/{id}", patch(accept_invitation))
        .with_state(stub);
    rt.spawn(async move { axum::serve(listener, app).await.unwrap() });

    Server {
        _rt: rt,
        url,
        calls,
    }
}

fn invitation(id: u64, owner: &str, repo: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "node_id": format!("MDIwOlJlcG9zaXRvcnlJbnZpdGF0aW9u{}", id),
        "repository": {
            "full_name": format!("{}/{}", owner, repo),
            "owner": { "login": owner }
        },
        "inviter": { "login": "octocat" },
        "permissions": "write",
        "created_at": "2024-03-01T10:00:00Z",
        "expired": false,
        "html_url": format!("https://github.com/{}/{}/invitations", owner, repo)
    })
}

fn stub(listing: Vec<serde_json::Value>, accepts: &[(u64, u16)]) -> Stub {
    Stub {
        listing_status: 200,
        listing_body: serde_json::Value::Array(listing).to_string(),
        accept_statuses: accepts.iter().copied().collect(),
        ..Default::default()
    }
}

fn cmd(server: &Server, state: &Path) -> Command {
    let mut cmd = Command::cargo_bin("invite-accept").unwrap();
    cmd.env("INVITE_ACCEPT_API_URL", &server.url)
        .env("INVITE_ACCEPT_STATE_DIR", state)
        .env("XDG_CONFIG_HOME", state)
        .env("HOME", state)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn state_with_token(token: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(".gh-token"), token).unwrap();
    dir
}

#[test]
fn accepts_only_the_chosen_organization() {
    let server = serve(stub(
        vec![invitation(1, "acme", "api"), invitation(2, "other", "web")],
        &[(1, 204)],
    ));
    let state = state_with_token("ghp_test\n");

    cmd(&server, state.path())
        .write_stdin("acme\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Org name to accept invitations from []"))
        .stdout(predicate::str::contains("Processing 2 invitations"))
        .stdout(predicate::str::contains(
            "Invitation accepted for repository: acme/api",
        ))
        .stdout(predicate::str::contains("other/web").not())
        .stdout(predicate::str::contains("Accepted invitations: 1"))
        .stdout(predicate::str::contains("Skipped invitations: 1"))
        .stdout(predicate::str::contains("Failed invitations: 0"));

    let calls = server.calls.lock().unwrap();
    assert_eq!(calls.accepted, vec![1]);
    assert!(calls.authorization.iter().all(|a| a == "token ghp_test"));
    assert_eq!(calls.queries, vec!["per_page=100".to_string()]);
    assert_eq!(calls.accept_media_types, vec!["application/vnd.github.v3+json"]);
    assert_eq!(
        fs::read_to_string(state.path().join(".last-repo")).unwrap(),
        "acme"
    );
}

#[test]
fn status_codes_map_to_summary() {
    let server = serve(stub(
        vec![
            invitation(1, "acme", "new"),
            invitation(2, "acme", "old"),
            invitation(3, "acme", "gone"),
            invitation(4, "acme", "broken"),
        ],
        &[(1, 204), (2, 304), (3, 404), (4, 422)],
    ));
    let state = state_with_token("ghp_test");

    cmd(&server, state.path())
        .args(["--org", "acme"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Invitation was already accepted for repository: acme/old",
        ))
        .stdout(predicate::str::contains(
            "Invitation has expired or removed: acme/gone",
        ))
        .stdout(predicate::str::contains(
            "Invitation for acme/broken can't be processed at this time.",
        ))
        .stdout(predicate::str::contains("Accepted invitations: 1"))
        .stdout(predicate::str::contains("Skipped invitations: 1"))
        .stdout(predicate::str::contains("Failed invitations: 2"));

    assert_eq!(server.calls.lock().unwrap().accepted, vec![1, 2, 3, 4]);
}

#[test]
fn empty_answer_reuses_last_organization() {
    let server = serve(stub(vec![invitation(9, "acme", "api")], &[(9, 204)]));
    let state = state_with_token("ghp_test");
    fs::write(state.path().join(".last-repo"), "acme\n").unwrap();

    cmd(&server, state.path())
        .write_stdin("\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Org name to accept invitations from [acme]",
        ))
        .stdout(predicate::str::contains("Accepted invitations: 1"));

    assert_eq!(server.calls.lock().unwrap().accepted, vec![9]);
}

#[test]
fn missing_token_is_prompted_and_saved() {
    let server = serve(stub(vec![], &[]));
    let state = tempfile::tempdir().unwrap();

    cmd(&server, state.path())
        .write_stdin("ghp_typed\nacme\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Paste your github token"));

    assert_eq!(
        fs::read_to_string(state.path().join(".gh-token")).unwrap(),
        "ghp_typed"
    );
    assert_eq!(
        server.calls.lock().unwrap().authorization,
        vec!["token ghp_typed"]
    );
}

#[test]
fn stored_token_is_not_prompted() {
    let server = serve(stub(vec![], &[]));
    let state = state_with_token("ghp_test");

    cmd(&server, state.path())
        .write_stdin("acme\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Paste your github token").not());
}

#[test]
fn empty_listing_reports_zero_counts() {
    let server = serve(stub(vec![], &[]));
    let state = state_with_token("ghp_test");

    cmd(&server, state.path())
        .args(["--org", "acme"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Processing 0 invitations"))
        .stdout(predicate::str::contains("Accepted invitations: 0"))
        .stdout(predicate::str::contains("Skipped invitations: 0"))
        .stdout(predicate::str::contains("Failed invitations: 0"));
}

#[test]
fn unauthorized_listing_discards_token() {
    let server = serve(Stub {
        listing_status: 401,
        listing_body: r#"{"message":"Bad credentials"}"#.into(),
        ..Default::default()
    });
    let state = state_with_token("ghp_revoked");

    cmd(&server, state.path())
        .args(["--org", "acme"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Unexpected HTTP results when getting data from user/repository_invitations: 401",
        ));

    assert!(!state.path().join(".gh-token").exists());
    assert!(server.calls.lock().unwrap().accepted.is_empty());
}

#[test]
fn server_error_keeps_token() {
    let server = serve(Stub {
        listing_status: 503,
        ..Default::default()
    });
    let state = state_with_token("ghp_test");

    cmd(&server, state.path())
        .args(["--org", "acme"])
        .assert()
        .code(1);

    assert!(state.path().join(".gh-token").exists());
}

#[test]
fn empty_token_fails_before_any_request() {
    let server = serve(stub(vec![], &[]));
    let state = tempfile::tempdir().unwrap();

    cmd(&server, state.path())
        .write_stdin("")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Token not defined"));

    assert_eq!(server.calls.lock().unwrap().listings, 0);
}

#[test]
fn empty_organization_fails_before_any_request() {
    let server = serve(stub(vec![], &[]));
    let state = state_with_token("ghp_test");

    cmd(&server, state.path())
        .write_stdin("\n")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Only one organization"));

    assert_eq!(server.calls.lock().unwrap().listings, 0);
}

#[test]
fn dry_run_accepts_nothing() {
    let server = serve(stub(vec![invitation(1, "acme", "api")], &[(1, 204)]));
    let state = state_with_token("ghp_test");

    cmd(&server, state.path())
        .args(["--org", "acme", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Would accept invitation for repository: acme/api",
        ))
        .stdout(predicate::str::contains("Skipped invitations: 1"));

    assert!(server.calls.lock().unwrap().accepted.is_empty());
}

#[test]
fn list_prints_json() {
    let server = serve(stub(
        vec![invitation(1, "acme", "api"), invitation(2, "other", "web")],
        &[],
    ));
    let state = state_with_token("ghp_test");

    let output = cmd(&server, state.path())
        .args(["list", "--org", "acme", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["repository"], "acme/api");
    assert_eq!(rows[0]["inviter"], "octocat");
    assert_eq!(rows[0]["expired"], false);
    assert_eq!(rows[0]["url"], "https://github.com/acme/api/invitations");
    assert!(server.calls.lock().unwrap().accepted.is_empty());
}

#[test]
fn full_page_warns_about_more_invitations() {
    let listing = (1..=100).map(|id| invitation(id, "other", "repo")).collect();
    let server = serve(stub(listing, &[]));
    let state = state_with_token("ghp_test");

    cmd(&server, state.path())
        .args(["--org", "acme"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipped invitations: 100"))
        .stderr(predicate::str::contains("more may be pending"));
}

#[test]
fn partial_page_does_not_warn() {
    let server = serve(stub(vec![invitation(1, "acme", "api")], &[(1, 204)]));
    let state = state_with_token("ghp_test");

    cmd(&server, state.path())
        .args(["--org", "acme"])
        .assert()
        .success()
        .stderr(predicate::str::contains("more may be pending").not());
}
