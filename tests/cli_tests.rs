//! Command-line tests for the list and check commands


use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use test_utils::Fixture;

fn walkrepo(fixture: &Fixture) -> Command {
    let mut cmd = Command::cargo_bin("walkrepo").unwrap();
    // keep the user's configuration out of the way
    cmd.env("HOME", fixture.path().join("home"))
        .env_remove("RUST_LOG")
        .current_dir(fixture.path());
    cmd
}

fn sample() -> Fixture {
    Fixture::with_files(&[
        ("tree/.gitignore", "*.log\n!keep.log\ntarget/"),
        ("tree/src/main.rs", ""),
        ("tree/src/debug.log", ""),
        ("tree/keep.log", ""),
        ("tree/target/out.bin", ""),
    ])
    .unwrap()
}

#[test]
fn test_list_prints_visited_entries() {
    let fixture = sample();

    walkrepo(&fixture)
        .args(["list", "tree"])
        .assert()
        .success()
        .stdout("keep.log\nsrc/\nsrc/main.rs\n");
}

#[test]
fn test_list_files_only() {
    let fixture = sample();

    walkrepo(&fixture)
        .args(["list", "tree", "--files-only"])
        .assert()
        .success()
        .stdout("keep.log\nsrc/main.rs\n");
}

#[test]
fn test_list_exclude_and_max_depth() {
    let fixture = sample();

    walkrepo(&fixture)
        .args(["list", "tree", "--exclude", "*.rs", "--max-depth", "1"])
        .assert()
        .success()
        .stdout("keep.log\nsrc/\n");

    walkrepo(&fixture)
        .args(["list", "tree", "--exclude", "*.rs"])
        .assert()
        .success()
        .stdout("keep.log\nsrc/\n");
}

#[test]
fn test_list_json_with_stats() {
    let fixture = sample();

    let output = walkrepo(&fixture)
        .args(["list", "tree", "--json", "--stats"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries: Vec<(String, bool)> = value["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| {
            (
                e["path"].as_str().unwrap().to_string(),
                e["dir"].as_bool().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        entries,
        vec![
            ("keep.log".to_string(), false),
            ("src".to_string(), true),
            ("src/main.rs".to_string(), false),
        ]
    );
    assert_eq!(value["stats"]["visited"], 3);
    assert_eq!(value["stats"]["excluded"], 2);
    assert_eq!(value["stats"]["rule_files"], 1);
}

#[test]
fn test_list_with_additional_rule_file() {
    let fixture = Fixture::with_files(&[
        ("tree/.ignore", "*.tmp"),
        ("tree/a.tmp", ""),
        ("tree/b.txt", ""),
    ])
    .unwrap();

    walkrepo(&fixture)
        .args(["list", "tree"])
        .assert()
        .success()
        .stdout(".ignore\na.tmp\nb.txt\n");

    walkrepo(&fixture)
        .args(["list", "tree", "--rule-file", ".ignore"])
        .assert()
        .success()
        .stdout("b.txt\n");
}

#[test]
fn test_list_reads_config_file() {
    let fixture = sample();
    fixture
        .write("walk.toml", "exclude = [\"src/\"]\n")
        .unwrap();

    walkrepo(&fixture)
        .args(["--config", "walk.toml", "list", "tree"])
        .assert()
        .success()
        .stdout("keep.log\n");
}

#[test]
fn test_list_missing_root_fails() {
    let fixture = sample();

    walkrepo(&fixture)
        .args(["list", "does-not-exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does-not-exist"));
}

#[test]
fn test_check_reports_status() {
    let fixture = sample();

    walkrepo(&fixture)
        .args(["check", "--root", "tree", "src/debug.log", "keep.log", "src/main.rs"])
        .assert()
        .success()
        .stdout("excluded\tsrc/debug.log\nincluded\tkeep.log\nincluded\tsrc/main.rs\n");
}

#[test]
fn test_check_verbose_shows_rule() {
    let fixture = sample();

    walkrepo(&fixture)
        .args(["check", "--root", "tree", "--verbose", "target/out.bin"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("excluded\ttarget/out.bin\t"))
        .stdout(predicate::str::contains(":3:target/"));
}

#[test]
fn test_check_json() {
    let fixture = sample();

    let output = walkrepo(&fixture)
        .args(["check", "--root", "tree", "--json", "keep.log", "src/debug.log"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value[0]["path"], "keep.log");
    assert_eq!(value[0]["excluded"], false);
    assert_eq!(value[0]["reachable"], true);
    assert!(value[0]["rule"].as_str().unwrap().ends_with(":2:!keep.log"));
    assert_eq!(value[1]["excluded"], true);
    assert!(value[1]["rule"].as_str().unwrap().ends_with(":1:*.log"));
}

#[test]
fn test_check_absolute_path_under_default_root() {
    let fixture = sample();
    let tree = fixture.path().join("tree");

    walkrepo(&fixture)
        .current_dir(&tree)
        .arg("check")
        .arg(tree.join("src/debug.log"))
        .arg(tree.join("keep.log"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("excluded\t"))
        .stdout(predicate::str::contains("included\t"));
}

#[cfg(unix)]
#[test]
fn test_check_reports_paths_behind_symlinks() {
    let fixture = sample();
    std::os::unix::fs::symlink(
        fixture.path().join("tree/src"),
        fixture.path().join("tree/alias"),
    )
    .unwrap();

    walkrepo(&fixture)
        .args(["check", "--root", "tree", "alias/main.rs"])
        .assert()
        .success()
        .stdout("unreachable\talias/main.rs\n");

    walkrepo(&fixture)
        .args(["list", "tree", "--files-only"])
        .assert()
        .success()
        .stdout("alias\nkeep.log\nsrc/main.rs\n");
}

#[test]
fn test_check_rejects_paths_outside_root() {
    let fixture = sample();

    walkrepo(&fixture)
        .args(["check", "--root", "tree", "../elsewhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("escapes"));
}

#[test]
fn test_check_requires_paths() {
    let fixture = sample();

    walkrepo(&fixture).args(["check"]).assert().failure();
}
