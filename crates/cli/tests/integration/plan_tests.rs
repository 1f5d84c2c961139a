//! Plan command integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn plan_shows_additions() {
  let env = TestEnv::new();
  let config = env.fixture("enabled.toml");

  env
    .cmd()
    .arg("plan")
    .arg(&config)
    .assert()
    .success()
    .stdout(predicate::str::contains("+ package git-series-manager-0.1.0 (x86_64-linux)"))
    .stdout(predicate::str::contains("+ file"))
    .stdout(predicate::str::contains("2 change(s) to apply"));

  assert!(!env.tool_config().exists());
}

#[test]
fn plan_after_apply_has_no_changes() {
  let env = TestEnv::new();
  let config = env.fixture("enabled.toml");

  env.cmd().arg("apply").arg(&config).assert().success();

  env
    .cmd()
    .arg("plan")
    .arg(&config)
    .assert()
    .success()
    .stdout(predicate::str::contains("No changes"));
}

#[test]
fn plan_detects_modified_file() {
  let env = TestEnv::new();
  let config = env.fixture("enabled.toml");
  env.write_file("config/git-series-manager/config.toml", "editor = \"vi\"\n");

  env
    .cmd()
    .arg("plan")
    .arg(&config)
    .assert()
    .success()
    .stdout(predicate::str::contains("~ file"));
}

#[test]
fn plan_uses_custom_package_set() {
  let env = TestEnv::new();
  let config = env.fixture("enabled.toml");
  let pkgs = env.fixture("pkgs.toml");

  env
    .cmd()
    .arg("--packages")
    .arg(&pkgs)
    .arg("plan")
    .arg(&config)
    .assert()
    .success()
    .stdout(predicate::str::contains("git-series-manager-0.2.0"));
}

#[test]
fn plan_disabled_is_empty() {
  let env = TestEnv::new();
  let config = env.fixture("disabled.toml");

  let output = env
    .cmd()
    .arg("plan")
    .arg(&config)
    .arg("--output")
    .arg("json")
    .output()
    .unwrap();
  assert!(output.status.success());

  let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(plan["packages"].as_array().map(|a| a.len()), Some(0));
  assert_eq!(plan["files"].as_array().map(|a| a.len()), Some(0));
}
