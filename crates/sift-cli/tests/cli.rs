use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Output;
use tempfile::TempDir;

const CATALOG: &str = r#"{
  "tracks": [
    {
      "id": "0b6a3f2e-8c1d-4e59-a7b4-2d9c1e0f3a11",
      "title": "So What",
      "artist": "Miles Davis",
      "album": "Kind of Blue",
      "year": 1959,
      "tags": ["jazz", "modal"]
    },
    {
      "id": "0b6a3f2e-8c1d-4e59-a7b4-2d9c1e0f3a12",
      "title": "Paranoid Android",
      "artist": "Radiohead",
      "album": "OK Computer",
      "year": 1997,
      "tags": ["rock", "live"]
    },
    {
      "id": "0b6a3f2e-8c1d-4e59-a7b4-2d9c1e0f3a13",
      "title": "Alright",
      "artist": "Kendrick Lamar",
      "year": 2015,
      "explicit": true,
      "tags": ["hip hop", "jazz"]
    }
  ]
}"#;

struct Fixture {
    temp: TempDir,
    catalog: PathBuf,
}

fn fixture() -> Fixture {
    let temp = TempDir::new().expect("temp dir");
    let catalog = temp.path().join("catalog.json");
    fs::write(&catalog, CATALOG).expect("write catalog");
    Fixture { temp, catalog }
}

fn run_raw(fixture: &Fixture, args: &[&str]) -> Output {
    cargo_bin_cmd!("sift")
        .env("XDG_CONFIG_HOME", fixture.temp.path())
        .env_remove("RUST_LOG")
        .args(["--catalog", path_str(&fixture.catalog)])
        .args(args)
        .output()
        .expect("run command")
}

fn run_cmd(fixture: &Fixture, args: &[&str]) -> String {
    let output = run_raw(fixture, args);
    assert!(output.status.success(), "command failed: {:?}", output);
    String::from_utf8(output.stdout).expect("utf8")
}

fn run_cmd_json(fixture: &Fixture, args: &[&str]) -> Value {
    let mut full = vec!["--json"];
    full.extend_from_slice(args);
    let output = run_raw(fixture, &full);
    assert!(output.status.success(), "command failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("parse json")
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("utf8 path")
}

fn titles(value: &Value) -> Vec<String> {
    value
        .as_array()
        .expect("array")
        .iter()
        .map(|item| item["title"].as_str().expect("title").to_string())
        .collect()
}

#[test]
fn search_filters_catalog() {
    let fixture = fixture();

    let all = run_cmd_json(&fixture, &["search"]);
    assert_eq!(all.as_array().expect("array").len(), 3);

    let jazz = run_cmd_json(&fixture, &["search", "+jazz e:no"]);
    assert_eq!(titles(&jazz), vec!["So What"]);

    let either = run_cmd_json(&fixture, &["search", "y:1990- OR a:miles"]);
    assert_eq!(titles(&either), vec!["So What", "Paranoid Android", "Alright"]);

    let limited = run_cmd_json(&fixture, &["search", "--limit", "1", "--", "-live"]);
    assert_eq!(titles(&limited), vec!["So What"]);

    let text = run_cmd(&fixture, &["search", "al:computer"]);
    assert!(text.contains("Paranoid Android / Radiohead / OK Computer (1997)"));

    let none = run_cmd(&fixture, &["search", "t:nothing"]);
    assert_eq!(none.trim(), "no tracks");
}

#[test]
fn config_limit_applies_when_flag_absent() {
    let fixture = fixture();
    let config_dir = fixture.temp.path().join("sift");
    fs::create_dir_all(&config_dir).expect("config dir");
    fs::write(config_dir.join("config.toml"), "[output]\nlimit = 2\n").expect("write config");

    let limited = run_cmd_json(&fixture, &["search"]);
    assert_eq!(limited.as_array().expect("array").len(), 2);

    let widened = run_cmd_json(&fixture, &["search", "--limit", "5"]);
    assert_eq!(widened.as_array().expect("array").len(), 3);
}

#[test]
fn explain_prints_predicate() {
    let fixture = fixture();

    let tree = run_cmd_json(&fixture, &["explain", "t:a OR +live"]);
    assert_eq!(
        tree,
        serde_json::json!({
            "or": [{ "title_contains": "a" }, { "tag_included": "live" }]
        })
    );

    let text = run_cmd(&fixture, &["explain", "t:a AND (t:b OR t:c)"]);
    assert_eq!(text.trim(), "t:\"a\" AND (t:\"b\" OR t:\"c\")");

    let empty = run_cmd(&fixture, &["explain", ""]);
    assert_eq!(empty.trim(), "matches every track");
}

#[test]
fn tokenize_lists_tokens() {
    let fixture = fixture();

    let text = run_cmd(&fixture, &["tokenize", "al:\"Kind of Blue\" (y:1959 OR -live)"]);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec!["quoted\tal:\"Kind of Blue\"", "group\t(y:1959 OR -live)"]
    );

    let tokens = run_cmd_json(&fixture, &["tokenize", "a\\ b c"]);
    assert_eq!(
        tokens,
        serde_json::json!([
            { "kind": "word", "text": "a b" },
            { "kind": "word", "text": "c" }
        ])
    );
}

#[test]
fn tags_and_show() {
    let fixture = fixture();

    let tags = run_cmd(&fixture, &["tags"]);
    let lines: Vec<&str> = tags.lines().collect();
    assert_eq!(
        lines,
        vec!["hip hop (1)", "jazz (2)", "live (1)", "modal (1)", "rock (1)"]
    );

    let detail = run_cmd_json(
        &fixture,
        &["show", "0b6a3f2e-8c1d-4e59-a7b4-2d9c1e0f3a13"],
    );
    assert_eq!(detail["title"], "Alright");
    assert_eq!(detail["explicit"], true);
    assert!(detail["album"].is_null());
}

#[test]
fn exit_codes_follow_error_kind() {
    let fixture = fixture();

    let missing = run_raw(&fixture, &["show", "0b6a3f2e-8c1d-4e59-a7b4-2d9c1e0f3aff"]);
    assert_eq!(missing.status.code(), Some(2));

    let bad_id = run_raw(&fixture, &["show", "nope"]);
    assert_eq!(bad_id.status.code(), Some(3));

    let unclosed = run_raw(&fixture, &["search", "t:\"open"]);
    assert_eq!(unclosed.status.code(), Some(3));
    let stderr = String::from_utf8(unclosed.stderr).expect("utf8");
    assert!(stderr.contains("unclosed quote"), "stderr: {stderr}");

    let unbalanced = run_raw(&fixture, &["explain", "(a (b)"]);
    assert_eq!(unbalanced.status.code(), Some(3));

    let no_catalog = cargo_bin_cmd!("sift")
        .env("XDG_CONFIG_HOME", fixture.temp.path())
        .args(["--catalog", path_str(&fixture.temp.path().join("absent.json"))])
        .args(["search", "x"])
        .output()
        .expect("run command");
    assert_eq!(no_catalog.status.code(), Some(2));
}

#[test]
fn group_depth_limit_comes_from_config() {
    let fixture = fixture();
    let config = fixture.temp.path().join("custom.toml");
    fs::write(&config, "[query]\nmax_group_depth = 2\n").expect("write config");

    let deep = run_raw(
        &fixture,
        &["--config", path_str(&config), "explain", "(((a)))"],
    );
    assert_eq!(deep.status.code(), Some(3));

    let shallow = run_cmd(
        &fixture,
        &["--config", path_str(&config), "explain", "((a))"],
    );
    assert_eq!(shallow.trim(), "\"a\"");
}
