//! Implementation of the `gsm-module info` command.

use anyhow::{Context, Result};

use gsm_module_lib::consts::REPO_OVERRIDE_PATH;
use gsm_module_lib::host::FilesystemHost;
use gsm_module_lib::platform::Platform;
use gsm_module_lib::platform::paths::{tool_config_path, user_config_root};

use super::HostArgs;
use crate::output::print_stat;

pub fn cmd_info(host: &HostArgs) -> Result<()> {
  println!("System:");
  if host.platform.is_some() {
    print_stat("Platform", &host.platform()?.triple());
  } else {
    match Platform::detect() {
      Ok(platform) => print_stat("Platform", &platform.triple()),
      Err(_) => print_stat("Platform", "unsupported"),
    }
  }

  let config_root = user_config_root().context("Failed to locate the user config root")?;
  print_stat("Config root", &config_root.display().to_string());
  print_stat("Config file", &tool_config_path(&config_root).display().to_string());
  print_stat("Repo override", &format!("<repo>/{} (read by the tool)", REPO_OVERRIDE_PATH));

  let fs_host = FilesystemHost::default_host().context("Failed to locate the data directory")?;
  print_stat("State", &fs_host.profile_path().display().to_string());

  let packages = host.package_set()?;
  let attrs: Vec<&str> = packages.attrs().collect();
  print_stat("Packages", &attrs.join(", "));

  Ok(())
}
