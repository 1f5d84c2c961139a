//! Render command integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn render_prints_settings_as_toml() {
  let env = TestEnv::new();
  let config = env.fixture("enabled.toml");

  let output = env.cmd().arg("render").arg(&config).output().unwrap();
  assert!(output.status.success());

  let rendered: toml::Table = toml::from_str(&String::from_utf8(output.stdout).unwrap()).unwrap();
  assert_eq!(rendered.len(), 3);
  assert_eq!(rendered["editor"].as_str(), Some("nvim"));
  assert!(!env.tool_config().exists());
}

#[test]
fn render_disabled_warns() {
  let env = TestEnv::new();
  let config = env.fixture("disabled.toml");

  env
    .cmd()
    .arg("render")
    .arg(&config)
    .assert()
    .success()
    .stdout(predicate::str::is_empty())
    .stderr(predicate::str::contains("not enabled"));
}

#[test]
fn render_rejects_null_in_json() {
  let env = TestEnv::new();
  let config = env.write_file(
    "host.json",
    r#"{ "programs": { "git-series-manager": { "enable": true, "settings": { "ci_url": null } } } }"#,
  );

  env
    .cmd()
    .arg("render")
    .arg(&config)
    .assert()
    .failure()
    .stderr(predicate::str::contains("settings.ci_url"));
}

#[test]
fn render_missing_config_fails() {
  let env = TestEnv::new();

  env
    .cmd()
    .arg("render")
    .arg(env.temp.path().join("missing.toml"))
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to evaluate config"));
}
