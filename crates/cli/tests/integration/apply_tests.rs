//! Apply command integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn apply_enabled_writes_config_and_provisions() {
  let env = TestEnv::new();
  let config = env.fixture("enabled.toml");

  env
    .cmd()
    .arg("apply")
    .arg(&config)
    .assert()
    .success()
    .stdout(predicate::str::contains("Apply complete"))
    .stdout(predicate::str::contains("Packages added: 1"))
    .stdout(predicate::str::contains("Files written: 1"));

  let rendered: toml::Table = toml::from_str(&std::fs::read_to_string(env.tool_config()).unwrap()).unwrap();
  assert_eq!(rendered.len(), 3);
  assert_eq!(rendered["editor"].as_str(), Some("nvim"));
  assert_eq!(rendered["repo_url_base"].as_str(), Some("https://git.example.com/proj/"));
  assert_eq!(
    rendered["sendmail_args"].as_array().map(|a| a.len()),
    Some(2)
  );

  let profile = std::fs::read_to_string(env.profile()).unwrap();
  assert!(profile.contains("\"git-series-manager\""));
  assert!(profile.contains("\"x86_64-linux\""));
}

#[test]
fn apply_disabled_has_no_effects() {
  let env = TestEnv::new();
  let config = env.fixture("disabled.toml");

  env
    .cmd()
    .arg("apply")
    .arg(&config)
    .assert()
    .success()
    .stdout(predicate::str::contains("not enabled"));

  assert!(!env.tool_config().exists());
  assert!(!env.profile().exists());
}

#[test]
fn apply_is_idempotent() {
  let env = TestEnv::new();
  let config = env.fixture("enabled.toml");

  env.cmd().arg("apply").arg(&config).assert().success();
  let first = std::fs::read_to_string(env.tool_config()).unwrap();

  env
    .cmd()
    .arg("apply")
    .arg(&config)
    .assert()
    .success()
    .stdout(predicate::str::contains("Packages added: 0"));

  assert_eq!(std::fs::read_to_string(env.tool_config()).unwrap(), first);
}

#[test]
fn apply_overwrites_previous_content() {
  let env = TestEnv::new();
  env.write_file("config/git-series-manager/config.toml", "stale = true\n");
  let config = env.write_file(
    "host.toml",
    "[programs.git-series-manager]\nenable = true\n[programs.git-series-manager.settings]\neditor = \"nvim\"\n",
  );

  env.cmd().arg("apply").arg(&config).assert().success();

  let content = std::fs::read_to_string(env.tool_config()).unwrap();
  assert!(!content.contains("stale"));
  assert!(content.contains("editor = \"nvim\""));
}

#[test]
fn apply_dry_run_writes_nothing() {
  let env = TestEnv::new();
  let config = env.fixture("enabled.toml");

  env
    .cmd()
    .arg("apply")
    .arg("--dry-run")
    .arg(&config)
    .assert()
    .success()
    .stdout(predicate::str::contains("Dry run: 2 change(s)"));

  assert!(!env.tool_config().exists());
  assert!(!env.profile().exists());
}

#[test]
fn apply_with_layers_merges_settings() {
  let env = TestEnv::new();
  let base = env.fixture("enabled.toml");
  let overlay = env.fixture("overlay.json");

  env.cmd().arg("apply").arg(&base).arg(&overlay).assert().success();

  let rendered: toml::Table = toml::from_str(&std::fs::read_to_string(env.tool_config()).unwrap()).unwrap();
  assert_eq!(rendered["editor"].as_str(), Some("hx"));
  assert_eq!(rendered["ci_url"].as_str(), Some("https://ci.example.com/{branch}"));
  assert!(rendered.contains_key("sendmail_args"));
}

#[test]
fn apply_type_error_fails() {
  let env = TestEnv::new();
  let config = env.fixture("bad_enable.toml");

  env
    .cmd()
    .arg("apply")
    .arg(&config)
    .assert()
    .failure()
    .stderr(predicate::str::contains("programs.git-series-manager.enable"));

  assert!(!env.tool_config().exists());
}

#[test]
fn apply_unresolvable_package_fails() {
  let env = TestEnv::new();
  let config = env.fixture("enabled.toml");

  env
    .cmd()
    .arg("--platform")
    .arg("x86_64-windows")
    .arg("apply")
    .arg(&config)
    .assert()
    .failure()
    .stderr(predicate::str::contains("git-series-manager.x86_64-windows"));

  assert!(!env.tool_config().exists());
}

#[test]
fn apply_json_output() {
  let env = TestEnv::new();
  let config = env.fixture("enabled.toml");

  let output = env
    .cmd()
    .arg("apply")
    .arg(&config)
    .arg("--output")
    .arg("json")
    .output()
    .unwrap();
  assert!(output.status.success());

  let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(report["packages_added"], 1);
  assert_eq!(report["files_written"], 1);
  assert_eq!(report["plan"]["files"][0]["change"]["kind"], "create");
}
