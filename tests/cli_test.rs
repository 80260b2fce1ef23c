//! End-to-end tests of the binary against a mocked Launchpad

use serde_json::json;
use std::path::PathBuf;
use std::process::Output;
use tempfile::TempDir;
use tokio::process::Command;
use ubuntu_bug_triage::bug::BugSummary;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Write a config pointing at the mock server
fn write_config(dir: &TempDir, server: &MockServer, blacklist: &str) -> PathBuf {
    let path = dir.path().join("config.yaml");
    let yaml = format!(
        "service_root: {}/devel/\ncredentials_path: {}\nblacklist:\n{}",
        server.uri(),
        dir.path().join("lp_creds").display(),
        blacklist
    );
    std::fs::write(&path, yaml).unwrap();
    path
}

async fn run(dir: &TempDir, config: &PathBuf, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ubuntu-bug-triage"))
        .args(args)
        .arg("--config")
        .arg(config)
        .env_remove("RUST_LOG")
        .env("HOME", dir.path())
        .output()
        .await
        .unwrap()
}

fn task(server: &MockServer, bug: u64, package: &str) -> serde_json::Value {
    json!({
        "bug_link": format!("{}/devel/bugs/{}", server.uri(), bug),
        "bug_target_name": format!("{} (Ubuntu)", package),
        "target_link": format!("{}/devel/ubuntu/+source/{}", server.uri(), package),
    })
}

async fn mount_bug(server: &MockServer, id: u64, title: &str, packages: &[&str]) {
    Mock::given(method("GET"))
        .and(path(format!("/devel/bugs/{}", id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": id,
            "title": title,
            "self_link": format!("{}/devel/bugs/{}", server.uri(), id),
            "bug_tasks_collection_link": format!("{}/devel/bugs/{}/bug_tasks", server.uri(), id),
        })))
        .mount(server)
        .await;

    let entries: Vec<_> = packages.iter().map(|p| task(server, id, p)).collect();
    Mock::given(method("GET"))
        .and(path(format!("/devel/bugs/{}/bug_tasks", id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_size": entries.len(),
            "start": 0,
            "entries": entries,
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_unknown_package_exits_nonzero() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/devel/ubuntu"))
        .and(query_param("ws.op", "getSourcePackage"))
        .and(query_param("name", "no-such-package"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, &server, "  {}\n");
    let output = run(&dir, &config, &["-p", "no-such-package", "--anon", "--json"]).await;

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Oops: No package with that name exists"));
    assert!(!stderr.contains("panicked"));
}

#[tokio::test]
async fn test_unknown_team_exits_nonzero() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/devel/~no-such-team"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Object: no-such-team"))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, &server, "  {}\n");
    let output = run(&dir, &config, &["no-such-team", "--anon"]).await;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Team not found: no-such-team"));
}

#[tokio::test]
async fn test_team_json_output() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/devel/~ubuntu-server"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "ubuntu-server",
            "self_link": format!("{}/devel/~ubuntu-server", server.uri()),
            "is_team": true,
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/devel/ubuntu"))
        .and(query_param("ws.op", "searchTasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_size": 4,
            "start": 0,
            "entries": [
                task(&server, 5, "pkg-x"),
                task(&server, 20, "nginx"),
                task(&server, 20, "apache2"),
                task(&server, 100, "nginx"),
            ],
        })))
        .mount(&server)
        .await;

    mount_bug(&server, 5, "only in a blacklisted package", &["pkg-x"]).await;
    mount_bug(&server, 20, "proxy drops connections", &["nginx", "apache2"]).await;
    mount_bug(&server, 100, "crash on reload", &["nginx"]).await;

    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, &server, "  ubuntu-server:\n    - pkg-x\n");
    let output = run(&dir, &config, &["ubuntu-server", "3", "--anon", "--json"]).await;

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let bugs: Vec<BugSummary> = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<&str> = bugs.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, vec!["100", "20"]);
    assert_eq!(bugs[1].affects, vec!["nginx (Ubuntu)", "apache2 (Ubuntu)"]);
    assert_eq!(bugs[1].title, "proxy drops connections");
}

#[tokio::test]
async fn test_lookback_out_of_range_exits_nonzero() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, &server, "  {}\n");
    let output = run(&dir, &config, &["ubuntu-server", "100000000", "--anon", "--json"]).await;

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("lookback of 100000000 days is out of range"));
    assert!(!stderr.contains("panicked"));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}
