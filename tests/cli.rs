//! CLI behavior tests: exit codes, output formats, init.
//!
//! Audits run against a local HTTP responder standing in for the GitHub API.

use assert_cmd::Command;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use predicates::prelude::*;
use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

const MANIFEST: &str = r#"{"name":"shop","dependencies":{"posthog-js":"1.0.0","stripe":"2.0.0"}}"#;

fn growthos_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_growthos"));
    cmd.env_remove("GITHUB_TOKEN").env("NO_COLOR", "1");
    cmd
}

/// A request seen by the local API: path plus `name: value` header lines
/// with lowercased names
#[derive(Debug, Clone)]
struct SeenRequest {
    path: String,
    headers: Vec<String>,
}

impl SeenRequest {
    fn has_header(&self, line: &str) -> bool {
        self.headers.iter().any(|h| h == line)
    }

    fn has_header_named(&self, name: &str) -> bool {
        let prefix = format!("{}:", name);
        self.headers.iter().any(|h| h.starts_with(&prefix))
    }
}

/// Local stand-in for the GitHub API
struct LocalApi {
    url: String,
    requests: Arc<Mutex<Vec<SeenRequest>>>,
}

impl LocalApi {
    fn requests(&self) -> Vec<SeenRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// Serve every request with `respond(path) -> (status, body)` until the test exits
fn serve<F>(respond: F) -> LocalApi
where
    F: Fn(&str) -> (u16, String) + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&requests);

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut request_line = String::new();
            if reader.read_line(&mut request_line).is_err() {
                continue;
            }
            let mut headers = Vec::new();
            let mut line = String::new();
            while reader.read_line(&mut line).is_ok() && line != "\r\n" && !line.is_empty() {
                if let Some((name, value)) = line.trim_end().split_once(':') {
                    headers.push(format!("{}: {}", name.to_lowercase(), value.trim()));
                }
                line.clear();
            }

            let path = request_line.split_whitespace().nth(1).unwrap_or("/").to_string();
            let (status, body) = respond(&path);
            seen.lock().unwrap().push(SeenRequest { path, headers });

            let response = format!(
                "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });

    LocalApi {
        url: format!("http://{}", addr),
        requests,
    }
}

fn encoded_contents(manifest: &str) -> String {
    let content = STANDARD.encode(manifest);
    let (head, tail) = content.split_at(16.min(content.len()));
    format!(r#"{{"encoding":"base64","content":"{}\n{}\n"}}"#, head, tail)
}

/// API stand-in: the shop repo exists, `track(` has hits, `gtag(` errors
fn shop_api() -> LocalApi {
    serve(|path| {
        if path.starts_with("/repos/acme/shop/contents/package.json") {
            (200, encoded_contents(MANIFEST))
        } else if path.starts_with("/repos/acme/empty/contents/package.json") {
            (200, encoded_contents("null"))
        } else if path.starts_with("/repos/") {
            (404, r#"{"message":"Not Found"}"#.to_string())
        } else if path.contains("q=track%28") {
            (200, r#"{"total_count":7,"items":[]}"#.to_string())
        } else if path.contains("q=gtag%28") {
            (500, r#"{"message":"Server Error"}"#.to_string())
        } else {
            (200, r#"{"total_count":0,"items":[]}"#.to_string())
        }
    })
}

#[test]
fn no_args_returns_error_not_panic() {
    let mut cmd = growthos_cmd();
    cmd.assert().failure().code(2);
}

#[test]
fn help_lists_commands() {
    let mut cmd = growthos_cmd();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("audit").and(predicate::str::contains("init")));
}

#[test]
fn audit_scores_repo() {
    let api = shop_api();
    let mut cmd = growthos_cmd();
    cmd.env("GROWTHOS_API_URL", &api.url).arg("audit").arg("acme/shop");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Growth Score: 55/100"))
        .stdout(predicate::str::contains("Missing 1 critical events:"))
        .stdout(predicate::str::contains("1. User authentication events"));
}

#[test]
fn audit_share_and_output() {
    let api = shop_api();
    let mut cmd = growthos_cmd();
    cmd.env("GROWTHOS_API_URL", &api.url)
        .args(["audit", "acme/shop", "--share", "--output", "growth"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "Just scored 55/100 on growth tracking with @GrowthOS",
        ))
        .stdout(predicate::str::contains("Report saved: growth.json"));
}

#[test]
fn audit_announces_report_before_score() {
    let api = shop_api();
    let mut cmd = growthos_cmd();
    cmd.env("GROWTHOS_API_URL", &api.url)
        .args(["audit", "acme/shop", "-o", "growth"]);
    let output = cmd.output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let saved = stdout.find("Report saved: growth.json").expect("report announced");
    let score = stdout.find("Growth Score: 55/100").expect("score printed");
    assert!(saved < score, "stdout: {}", stdout);
}

#[test]
fn audit_sends_github_headers() {
    let api = shop_api();
    let mut cmd = growthos_cmd();
    cmd.env("GROWTHOS_API_URL", &api.url)
        .env("GITHUB_TOKEN", "ghp_test")
        .args(["audit", "acme/shop"]);
    cmd.assert().success();

    let requests = api.requests();
    let contents = requests
        .iter()
        .find(|r| r.path.starts_with("/repos/acme/shop/contents/package.json"))
        .expect("contents request");
    let searches: Vec<_> = requests
        .iter()
        .filter(|r| r.path.starts_with("/search/code"))
        .collect();
    assert_eq!(searches.len(), 5, "one search per query: {:?}", requests);

    for request in std::iter::once(contents).chain(searches) {
        assert!(request.has_header("user-agent: GrowthOS-Audit"), "{:?}", request);
        assert!(
            request.has_header("accept: application/vnd.github+json"),
            "{:?}",
            request
        );
        assert!(request.has_header("authorization: Bearer ghp_test"), "{:?}", request);
    }
}

#[test]
fn audit_without_token_sends_no_authorization() {
    let api = shop_api();
    let mut cmd = growthos_cmd();
    cmd.env("GROWTHOS_API_URL", &api.url)
        .args(["audit", "acme/shop"]);
    cmd.assert().success();

    let requests = api.requests();
    assert!(!requests.is_empty());
    for request in &requests {
        assert!(request.has_header("user-agent: GrowthOS-Audit"), "{:?}", request);
        assert!(!request.has_header_named("authorization"), "{:?}", request);
    }
}

#[test]
fn audit_non_object_manifest_exit_1() {
    let api = shop_api();
    let mut cmd = growthos_cmd();
    cmd.env("GROWTHOS_API_URL", &api.url)
        .args(["audit", "acme/empty"]);
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("expected a JSON object"));
}

#[test]
fn audit_json_output_valid() {
    let api = shop_api();
    let mut cmd = growthos_cmd();
    cmd.env("GROWTHOS_API_URL", &api.url)
        .args(["audit", "acme/shop", "--json"]);
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let s = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(s.trim()).expect("valid JSON");
    assert_eq!(parsed["score"], 55);
    assert_eq!(parsed["issues"][0], "User authentication events");
    assert!(parsed["audit_date"].as_str().unwrap().ends_with('Z'));
    assert_eq!(parsed["next_steps"].as_array().unwrap().len(), 4);
}

#[test]
fn audit_missing_repo_exit_1() {
    let api = shop_api();
    let mut cmd = growthos_cmd();
    cmd.env("GROWTHOS_API_URL", &api.url)
        .args(["audit", "acme/private"]);
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "Repository not found. Make sure it's public or provide a token.",
        ));
}

#[test]
fn audit_server_error_exit_1() {
    let api = serve(|_| (500, r#"{"message":"boom"}"#.to_string()));
    let mut cmd = growthos_cmd();
    cmd.env("GROWTHOS_API_URL", &api.url)
        .args(["audit", "acme/shop"]);
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Audit failed:").and(predicate::str::contains("500")));
}

#[test]
fn audit_explicit_missing_config_exit_1() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut cmd = growthos_cmd();
    cmd.current_dir(dir.path())
        .args(["audit", "acme/shop", "--config", "nope.json"]);
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn init_creates_config() {
    let dir = tempfile::TempDir::new().unwrap();
    let config_path = dir.path().join(".growthosrc.json");
    let mut cmd = growthos_cmd();
    cmd.arg("init")
        .arg("--skip-setup")
        .arg("--key")
        .arg("phc_test")
        .arg("--dir")
        .arg(dir.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("GrowthOS ready!"))
        .stdout(predicate::str::contains("user_signup"));
    assert!(config_path.exists(), ".growthosrc.json should be created");
    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("phc_test"));
}

#[test]
fn init_keeps_existing_config() {
    let dir = tempfile::TempDir::new().unwrap();
    let config_path = dir.path().join(".growthosrc.json");
    fs::write(&config_path, "{}").unwrap();

    let mut cmd = growthos_cmd();
    cmd.args(["init", "--skip-setup", "--key", "phc_new", "--dir"])
        .arg(dir.path());
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("already exists"));
    assert_eq!(fs::read_to_string(&config_path).unwrap(), "{}");
}

#[test]
fn init_reads_key_from_stdin() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut cmd = growthos_cmd();
    cmd.args(["init", "--dir"])
        .arg(dir.path())
        .write_stdin("phc_stdin\n");
    cmd.assert().success();
    let content = fs::read_to_string(dir.path().join(".growthosrc.json")).unwrap();
    assert!(content.contains("phc_stdin"));
}

#[test]
fn init_reports_local_analytics() {
    let dir = tempfile::TempDir::new().unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{"devDependencies":{"@amplitude/analytics-browser":"2.0.0"}}"#,
    )
    .unwrap();
    let mut cmd = growthos_cmd();
    cmd.args(["init", "--skip-setup", "--dir"]).arg(dir.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "Analytics SDK detected: @amplitude/analytics-browser",
        ));
}

#[test]
fn init_invalid_package_json_exit_1() {
    let dir = tempfile::TempDir::new().unwrap();
    fs::write(dir.path().join("package.json"), "{ not json").unwrap();
    let mut cmd = growthos_cmd();
    cmd.args(["init", "--skip-setup", "--dir"]).arg(dir.path());
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Init failed:").and(predicate::str::contains("package.json")));
    assert!(!dir.path().join(".growthosrc.json").exists());
}
