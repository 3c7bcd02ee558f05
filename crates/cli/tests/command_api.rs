use assert_cmd::Command;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

#[allow(deprecated)]
fn tagdex(tags_file: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tagdex").expect("binary");
    cmd.env_remove("TAGDEX_TAGS_FILE")
        .arg("--quiet")
        .arg("--tags-file")
        .arg(tags_file);
    cmd
}

fn run_request_raw(tags_file: &Path, request: &Value) -> (bool, Value) {
    let output = tagdex(tags_file)
        .arg("command")
        .arg("--json")
        .arg(request.to_string())
        .output()
        .expect("command run");
    let body: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    (output.status.success(), body)
}

fn run_request(tags_file: &Path, request: &Value) -> Value {
    let (ok, body) = run_request_raw(tags_file, request);
    assert!(ok, "stdout: {body}\nrequest: {request}");
    body
}

#[test]
fn tag_lifecycle_over_command_api() {
    let temp = tempdir().unwrap();
    let tags_file = temp.path().join("tags.json");

    let created = run_request(
        &tags_file,
        &json!({"action": "create-tag", "payload": {"name": "Project", "color": "#3366FF", "targetType": "folder"}}),
    );
    assert_eq!(created["status"], "ok");
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let attached = run_request(
        &tags_file,
        &json!({"action": "add-path-to-tag", "payload": {"tagId": id, "path": "/home/u/project"}}),
    );
    assert_eq!(attached["data"]["paths"], json!(["/home/u/project"]));

    let hits = run_request(
        &tags_file,
        &json!({"action": "get-file-tags", "payload": {"path": "/home/u/project/src/file.ts"}}),
    );
    assert_eq!(hits["data"][0]["id"], id.as_str());

    let persisted: Value = serde_json::from_str(&fs::read_to_string(&tags_file).unwrap()).unwrap();
    assert_eq!(persisted[0]["targetType"], "folder");
    assert_eq!(persisted[0]["paths"], json!(["/home/u/project"]));

    let removed = run_request(
        &tags_file,
        &json!({"action": "remove-tag", "payload": {"tagId": id}}),
    );
    assert_eq!(removed["data"], true);
    assert_eq!(fs::read_to_string(&tags_file).unwrap(), "[]");
}

#[test]
fn not_found_exits_nonzero_with_null_data() {
    let temp = tempdir().unwrap();
    let tags_file = temp.path().join("tags.json");

    let (ok, body) = run_request_raw(
        &tags_file,
        &json!({"action": "add-path-to-tag", "payload": {"tagId": "ghost", "path": "/x"}}),
    );
    assert!(!ok);
    assert_eq!(body["status"], "error");
    assert_eq!(body["data"], Value::Null);
    assert_eq!(body["error"]["code"], "not_found");
}

#[test]
fn corrupt_tags_file_is_recovered_on_load() {
    let temp = tempdir().unwrap();
    let tags_file = temp.path().join("tags.json");
    fs::write(&tags_file, r#""not an array""#).unwrap();

    let loaded = run_request(&tags_file, &json!({"action": "load-tags"}));
    assert_eq!(loaded["data"], json!([]));
    assert_eq!(fs::read_to_string(&tags_file).unwrap(), "[]");
}

#[test]
fn convenience_subcommands_share_the_request_path() {
    let temp = tempdir().unwrap();
    let tags_file = temp.path().join("tags.json");

    let output = tagdex(&tags_file)
        .args(["create", "Music", "--target-type", "folder"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let created: Value = serde_json::from_slice(&output.stdout).unwrap();
    let id = created["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(created["data"]["color"], "#FF6B6B");

    let output = tagdex(&tags_file)
        .args(["attach", &id, r"D:\Media\Music"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let output = tagdex(&tags_file)
        .args(["tags-for", "/mnt/media/music"])
        .output()
        .unwrap();
    let hits: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(hits["data"].as_array().unwrap().len(), 1);

    let output = tagdex(&tags_file)
        .args(["detach", &id, "d:/media/music/"])
        .output()
        .unwrap();
    let detached: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(detached["data"]["paths"], json!([]));
}

#[test]
fn serve_answers_each_line_and_announces_changes() {
    let temp = tempdir().unwrap();
    let tags_file = temp.path().join("tags.json");

    let line = |value: Value| format!("{value}\n").into_bytes();
    let mut input = Vec::new();
    input.extend(line(json!({"action": "add-tag", "payload": {"tag": {"id": "t1", "name": "One", "color": "#000", "paths": []}}})));
    input.extend(line(json!({"action": "get-file-tags", "payload": {"path": "/nothing"}})));
    input.extend_from_slice(b"\xff\xfe\n");
    input.extend(line(json!({"action": "bogus"})));
    input.extend(line(json!({"action": "load-tags"})));

    let output = tagdex(&tags_file)
        .arg("serve")
        .write_stdin(input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let lines: Vec<Value> = String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 6, "{lines:?}");
    assert_eq!(lines[0]["data"]["id"], "t1");
    assert_eq!(lines[0]["data"]["targetType"], "both");
    assert_eq!(lines[1]["event"], "tags-updated");
    assert_eq!(lines[1]["change"]["kind"], "tag-added");
    assert_eq!(lines[2]["data"], json!([]));
    assert_eq!(lines[3]["error"]["code"], "invalid_request");
    assert_eq!(lines[3]["data"], Value::Null);
    assert_eq!(lines[4]["error"]["code"], "invalid_request");
    assert_eq!(lines[5]["data"][0]["id"], "t1");
}
