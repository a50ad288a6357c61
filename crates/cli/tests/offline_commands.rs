//! Binary behaviour that needs no server.

use std::path::Path;
use std::process::Command;

use serde_json::Value;
use tempfile::TempDir;

fn run_evo(home: &Path, args: &[&str]) -> (i32, Value, String) {
	let output = Command::new(env!("CARGO_BIN_EXE_evo"))
		.arg("--home")
		.arg(home)
		.args(["-f", "json"])
		.args(args)
		.env_remove("RUST_LOG")
		.output()
		.expect("failed to execute evo");

	let stdout = String::from_utf8_lossy(&output.stdout).to_string();
	let stderr = String::from_utf8_lossy(&output.stderr).to_string();
	let json = serde_json::from_str(&stdout).unwrap_or_else(|err| panic!("stdout is not JSON ({err}): {stdout}\nstderr: {stderr}"));
	(output.status.code().unwrap_or(-1), json, stderr)
}

fn write_session(home: &Path, body: &str) {
	std::fs::write(home.join("session.json"), body).expect("session file should be written");
}

#[test]
fn guard_redirects_without_session() {
	let tmp = TempDir::new().expect("temp dir should be created");
	let (code, json, _) = run_evo(tmp.path(), &["guard"]);
	assert_eq!(code, 1);
	assert_eq!(json["ok"], false);
	assert_eq!(json["command"], "guard");
	assert_eq!(json["inputs"]["path"], "/manager");
	assert_eq!(json["data"]["decision"], "redirect");
	assert_eq!(json["data"]["redirect"], "/manager/login");
	assert_eq!(json["error"]["code"], "UNAUTHORIZED");
}

#[test]
fn guard_renders_with_complete_session() {
	let tmp = TempDir::new().expect("temp dir should be created");
	write_session(
		tmp.path(),
		r#"{"apiUrl":"https://host/","instanceToken":"tok1","instanceId":"abc","instanceName":"Main","version":"2.2.3"}"#,
	);

	let (code, json, stderr) = run_evo(tmp.path(), &["guard", "/manager/instance/abc/dashboard"]);
	assert_eq!(code, 0, "guard failed: {stderr}");
	assert_eq!(json["ok"], true);
	assert_eq!(json["data"]["decision"], "render");
	assert_eq!(json["data"]["path"], "/manager/instance/abc/dashboard");
}

#[test]
fn guard_redirects_when_a_required_field_is_empty() {
	let tmp = TempDir::new().expect("temp dir should be created");
	write_session(
		tmp.path(),
		r#"{"apiUrl":"https://host/","instanceToken":"","instanceId":"abc","instanceName":"Main","version":"2.2.3"}"#,
	);

	let (code, json, _) = run_evo(tmp.path(), &["guard"]);
	assert_eq!(code, 1);
	assert_eq!(json["data"]["decision"], "redirect");
}

#[test]
fn status_masks_token_and_lists_missing_fields() {
	let tmp = TempDir::new().expect("temp dir should be created");
	write_session(tmp.path(), r#"{"apiUrl":"https://host/","instanceToken":"B6D711FCDE4D","instanceId":"abc"}"#);

	let (code, json, stderr) = run_evo(tmp.path(), &["status"]);
	assert_eq!(code, 0, "status failed: {stderr}");
	assert_eq!(json["data"]["authorized"], false);
	assert_eq!(json["data"]["instanceToken"], "B6D7****");
	assert_eq!(json["data"]["missing"], serde_json::json!(["version"]));
	assert_eq!(json["diagnostics"][0]["level"], "warning");
}

#[test]
fn status_on_empty_home_reports_no_session() {
	let tmp = TempDir::new().expect("temp dir should be created");
	let (code, json, _) = run_evo(tmp.path(), &["status"]);
	assert_eq!(code, 0);
	assert_eq!(json["data"]["authorized"], false);
	assert!(json["data"]["apiUrl"].is_null());
	assert_eq!(json["config"]["requestTimeoutMs"], 10_000);
}

#[test]
fn logout_removes_session_and_is_idempotent() {
	let tmp = TempDir::new().expect("temp dir should be created");
	write_session(
		tmp.path(),
		r#"{"apiUrl":"https://host/","instanceToken":"tok1","instanceId":"abc","instanceName":"Main","version":"2.2.3"}"#,
	);

	let (code, json, stderr) = run_evo(tmp.path(), &["logout"]);
	assert_eq!(code, 0, "logout failed: {stderr}");
	assert_eq!(json["data"]["cleared"], true);
	assert_eq!(json["data"]["redirect"], "/manager/login");
	assert!(!tmp.path().join("session.json").exists());

	let (code, json, _) = run_evo(tmp.path(), &["logout"]);
	assert_eq!(code, 0);
	assert_eq!(json["data"]["cleared"], false);
}

#[test]
fn login_with_malformed_url_is_rejected_before_any_request() {
	let tmp = TempDir::new().expect("temp dir should be created");
	let (code, json, _) = run_evo(tmp.path(), &["login", "-s", "not a url", "-k", "key"]);
	assert_eq!(code, 1);
	assert_eq!(json["error"]["code"], "LOGIN_REJECTED");
	let errors = json["error"]["details"]["fieldErrors"].as_array().expect("field errors");
	assert_eq!(errors.len(), 1);
	assert_eq!(errors[0]["field"], "serverUrl");
	assert_eq!(errors[0]["kind"], "invalidUrl");
}

#[test]
fn login_with_unreachable_server_reports_invalid_server() {
	let tmp = TempDir::new().expect("temp dir should be created");
	let port = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
	let url = format!("http://127.0.0.1:{port}/");

	let (code, json, _) = run_evo(tmp.path(), &["login", "-s", &url, "-k", "key"]);
	assert_eq!(code, 1);
	assert_eq!(json["ok"], false);
	assert_eq!(json["data"]["authenticated"], false);
	assert_eq!(json["error"]["details"]["fieldErrors"][0]["kind"], "invalidServer");
	assert_eq!(json["error"]["details"]["fieldErrors"][0]["messageKey"], "login.message.invalidServer");
	assert!(!tmp.path().join("session.json").exists());
}

#[test]
fn open_without_params_does_nothing() {
	let tmp = TempDir::new().expect("temp dir should be created");
	let (code, json, _) = run_evo(tmp.path(), &["open", "https://manager.example.com/manager/login?serverUrl=https%3A%2F%2Fhost"]);
	assert_eq!(code, 0);
	assert_eq!(json["data"]["triggered"], false);
	assert_eq!(json["inputs"]["path"], "/manager/login");
}

#[test]
fn open_with_unparsable_entry_url_is_invalid_input() {
	let tmp = TempDir::new().expect("temp dir should be created");
	let (code, json, _) = run_evo(tmp.path(), &["open", "::nope"]);
	assert_eq!(code, 1);
	assert_eq!(json["error"]["code"], "INVALID_INPUT");
}
