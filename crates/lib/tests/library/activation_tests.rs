use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use gsm_module_lib::activate::{ActivationContext, ActivateError, activate};
use gsm_module_lib::eval::evaluate_str;
use gsm_module_lib::host::{ApplyOptions, FileChange, FilesystemHost, apply};
use gsm_module_lib::package::PackageSet;
use gsm_module_lib::platform::Platform;
use gsm_module_lib::settings::Settings;

const ENABLED: &str = r#"
[programs.git-series-manager]
enable = true

[programs.git-series-manager.settings]
sendmail_args = ["--sendmail-cmd=x", "--to=a@b.com"]
repo_url_base = "https://git.example.com/proj/"
editor = "nvim"
"#;

struct Fixture {
  temp: TempDir,
  context: ActivationContext,
  host: FilesystemHost,
}

impl Fixture {
  fn new() -> Self {
    let temp = TempDir::new().unwrap();
    let context = ActivationContext::new(
      "aarch64-linux".parse::<Platform>().unwrap(),
      temp.path().join("config"),
      PackageSet::builtin(),
    );
    let host = FilesystemHost::new(temp.path().join("state"));
    Self { temp, context, host }
  }

  fn config_file(&self) -> PathBuf {
    self.temp.path().join("config/git-series-manager/config.toml")
  }

  fn run(&mut self, host_config: &str) -> Result<(), ActivateError> {
    let options = evaluate_str(host_config).unwrap();
    let effects = activate(&options, &self.context)?;
    apply(&effects, &mut self.host, &ApplyOptions::default()).unwrap();
    Ok(())
  }
}

#[test]
fn enabled_config_round_trips_through_the_file() {
  let mut fx = Fixture::new();
  fx.run(ENABLED).unwrap();

  let written = Settings::from_toml_str(&fs::read_to_string(fx.config_file()).unwrap()).unwrap();
  let expected = evaluate_str(ENABLED).unwrap().settings;
  assert_eq!(written, expected);
  assert_eq!(written.len(), 3);

  let provisioned = fx.host.provisioned().unwrap();
  assert_eq!(provisioned.len(), 1);
  assert_eq!(provisioned[0].name, "git-series-manager");
  assert_eq!(provisioned[0].platform, "aarch64-linux");
}

#[test]
fn defaults_produce_nothing() {
  let mut fx = Fixture::new();
  fx.run("").unwrap();

  assert!(!fx.config_file().exists());
  assert!(fx.host.provisioned().unwrap().is_empty());
}

#[test]
fn disabling_leaves_existing_file_alone() {
  let mut fx = Fixture::new();
  fx.run(ENABLED).unwrap();
  let before = fs::read_to_string(fx.config_file()).unwrap();

  fx.run("[programs.git-series-manager]\nenable = false\n").unwrap();

  assert_eq!(fs::read_to_string(fx.config_file()).unwrap(), before);
}

#[test]
fn reactivation_replaces_content_without_merging() {
  let mut fx = Fixture::new();
  fx.run(ENABLED).unwrap();
  fx.run(
    r#"
      [programs.git-series-manager]
      enable = true
      [programs.git-series-manager.settings]
      ci_url = "https://ci.example.com/{branch}"
    "#,
  )
  .unwrap();

  let written = Settings::from_toml_str(&fs::read_to_string(fx.config_file()).unwrap()).unwrap();
  assert_eq!(written.len(), 1);
  assert!(written.get("ci_url").is_some());
  assert!(written.get("editor").is_none());
}

#[test]
fn identical_reactivation_reports_unchanged() {
  let mut fx = Fixture::new();
  fx.run(ENABLED).unwrap();

  let options = evaluate_str(ENABLED).unwrap();
  let effects = activate(&options, &fx.context).unwrap();
  let report = apply(&effects, &mut fx.host, &ApplyOptions::default()).unwrap();

  assert_eq!(report.packages_added, 0);
  assert_eq!(report.plan.files[0].change, FileChange::Unchanged);
  assert_eq!(fx.host.provisioned().unwrap().len(), 1);
}

#[test]
fn missing_platform_fails_before_touching_the_host() {
  let mut fx = Fixture::new();
  fx.context.packages = PackageSet::empty();

  let err = fx.run(ENABLED).unwrap_err();
  assert_eq!(
    err.to_string(),
    "no package for lookup key 'git-series-manager.aarch64-linux'"
  );
  assert!(!fx.config_file().exists());
  assert!(!fx.host.profile_path().exists());
}
