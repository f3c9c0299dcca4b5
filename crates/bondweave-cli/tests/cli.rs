use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const FIXTURE: &str = r#"{
    "boards": [
        {
            "id": 1,
            "board_name": "town",
            "schema": {"categories": [
                {"name": "News", "families": ["Reporting"], "fields": [
                    {"name": "title", "datatype": {"kind": "single", "t": {"kind": "text"}}},
                    {"name": "score", "datatype": {"kind": "single", "t": {"kind": "number"}}},
                    {"name": "see-also", "datatype": {"kind": "array", "t": {
                        "kind": "bond", "bondee": {"kind": "all"}
                    }}}
                ]},
                {"name": "Opinion", "families": ["Reporting"], "fields": [
                    {"name": "ref", "datatype": {"kind": "single", "t": {
                        "kind": "bond", "bondee": {"kind": "family", "families": ["Reporting"]}
                    }}}
                ]},
                {"name": "Sports", "fields": []}
            ]}
        },
        {
            "id": 2,
            "board_name": "club",
            "schema": {"categories": [{"name": "Match", "fields": []}]}
        }
    ],
    "articles": [
        {"id": 1, "board_id": 1, "category_name": "News", "title": "first"},
        {"id": 2, "board_id": 1, "category_name": "News", "title": "second"},
        {"id": 3, "board_id": 1, "category_name": "Sports", "title": "derby"},
        {"id": 4, "board_id": 2, "category_name": "Match", "title": "final"}
    ],
    "edges": [
        {"id": 10, "from": 1, "to": 2, "energy": 1, "name": "see-also"},
        {"id": 11, "from": 2, "to": 1, "energy": 1, "name": "see-also"},
        {"id": 12, "from": 1, "to": 3, "energy": 2, "name": "see-also"}
    ]
}"#;

struct Workspace {
    dir: TempDir,
    fixture: PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let fixture = dir.path().join("fixture.json");
        std::fs::write(&fixture, FIXTURE).unwrap();
        Self { dir, fixture }
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("bondweave").unwrap();
        cmd.env_remove("BONDWEAVE_FIXTURE")
            .env_remove("RUST_LOG")
            .arg("--fixture")
            .arg(&self.fixture);
        cmd
    }
}

fn graph_ids(stdout: &[u8]) -> (Vec<i64>, Vec<i64>) {
    let json: serde_json::Value = serde_json::from_slice(stdout).unwrap();
    let ids = |key: &str| -> Vec<i64> {
        json[key]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["id"].as_i64().unwrap())
            .collect()
    };
    (ids("nodes"), ids("edges"))
}

fn path_arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_graph_follows_cycle_once() {
    let ws = Workspace::new();
    let output = ws
        .cmd()
        .args(["--format", "json", "graph", "1"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let (nodes, edges) = graph_ids(&output.stdout);
    assert_eq!(nodes, vec![1, 2, 3]);
    assert_eq!(edges, vec![10, 12, 11]);
}

#[test]
fn test_graph_category_restriction() {
    let ws = Workspace::new();
    let output = ws
        .cmd()
        .args(["--format", "json", "graph", "1", "--categories", "News"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let (nodes, edges) = graph_ids(&output.stdout);
    assert_eq!(nodes, vec![1, 2]);
    assert_eq!(edges, vec![10, 11]);
}

#[test]
fn test_graph_family_whitelist() {
    let ws = Workspace::new();
    let output = ws
        .cmd()
        .args(["--format", "json", "graph", "1", "--whitelist", "Reporting"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let (nodes, _) = graph_ids(&output.stdout);
    assert_eq!(nodes, vec![1, 2]);
}

#[test]
fn test_graph_lists_conflict() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["graph", "1", "--whitelist", "A", "--blacklist", "B"])
        .assert()
        .failure();
}

#[test]
fn test_graph_missing_root() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["graph", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("99"));
}

#[test]
fn test_graph_table_output() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["graph", "1", "--stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CATEGORY"))
        .stdout(predicate::str::contains("derby"))
        .stdout(predicate::str::contains("expanded 3 node(s)"));
}

#[test]
fn test_validate_accepts_content() {
    let ws = Workspace::new();
    let content = ws.write(
        "ok.json",
        r#"{"title": "hello", "score": "1e3", "see-also": ["2", "3"]}"#,
    );
    ws.cmd()
        .args(["validate", "--board", "1", "--category", "News", "--content"])
        .arg(path_arg(&content))
        .assert()
        .success()
        .stdout(predicate::str::contains("valid"));
}

#[test]
fn test_validate_reports_first_bad_field() {
    let ws = Workspace::new();
    let content = ws.write(
        "bad.json",
        r#"{"title": "hello", "score": "abc", "see-also": ["x"]}"#,
    );
    ws.cmd()
        .args(["validate", "--board", "1", "--category", "News", "--content"])
        .arg(path_arg(&content))
        .assert()
        .failure()
        .stdout(predicate::str::contains("score: cannot parse as number"));
}

#[test]
fn test_validate_rejects_bond_across_boards() {
    let ws = Workspace::new();
    let content = ws.write(
        "cross.json",
        r#"{"title": "hello", "score": "3", "see-also": ["2", "4"]}"#,
    );
    ws.cmd()
        .args(["--format", "json", "validate", "--board", "1", "--category", "News"])
        .arg("--content")
        .arg(path_arg(&content))
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"valid\": false"))
        .stdout(predicate::str::contains("bond target must be on the same board"));
}

#[test]
fn test_check_rejects_bond_outside_family() {
    let ws = Workspace::new();
    let content = ws.write(
        "typed.json",
        r#"{"ref": {"energy": 1, "target_article": 3}}"#,
    );
    ws.cmd()
        .args(["check", "--board", "1", "--category", "Opinion", "--content"])
        .arg(path_arg(&content))
        .assert()
        .failure()
        .stdout(predicate::str::contains("cannot point to that category"));
}

#[test]
fn test_check_accepts_bond_inside_family() {
    let ws = Workspace::new();
    let content = ws.write(
        "typed.json",
        r#"{"ref": {"energy": 1, "target_article": 2}}"#,
    );
    ws.cmd()
        .args(["check", "--board", "1", "--category", "Opinion", "--content"])
        .arg(path_arg(&content))
        .assert()
        .success()
        .stdout(predicate::str::contains("ok"));
}

#[test]
fn test_families_json() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["--format", "json", "families", "--board", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Reporting"))
        .stdout(predicate::str::contains("Opinion"));
}

#[test]
fn test_families_table_all_boards() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["families"])
        .assert()
        .success()
        .stdout(predicate::str::contains("BOARD"))
        .stdout(predicate::str::contains("News, Opinion"));
}

#[test]
fn test_missing_fixture() {
    Command::cargo_bin("bondweave")
        .unwrap()
        .env_remove("BONDWEAVE_FIXTURE")
        .args(["graph", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no fixture"));
}

#[test]
fn test_completions_need_no_fixture() {
    Command::cargo_bin("bondweave")
        .unwrap()
        .env_remove("BONDWEAVE_FIXTURE")
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bondweave"));
}
