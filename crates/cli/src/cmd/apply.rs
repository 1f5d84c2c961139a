//! Implementation of the `gsm-module apply` command.
//!
//! Evaluates the configuration, provisions the package and writes the
//! tool's config file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use gsm_module_lib::host::{ApplyOptions, FilesystemHost, apply};

use super::plan::print_plan;
use super::{HostArgs, evaluate_and_activate};
use crate::output::{OutputFormat, print_info, print_json, print_stat, print_success};

pub fn cmd_apply(configs: &[PathBuf], host: &HostArgs, dry_run: bool, output: OutputFormat) -> Result<()> {
  let effects = evaluate_and_activate(configs, host)?;

  let mut fs_host = FilesystemHost::default_host().context("Failed to locate the data directory")?;
  let report = apply(&effects, &mut fs_host, &ApplyOptions { dry_run }).context("Apply failed")?;

  if output.is_json() {
    return print_json(&report);
  }

  if effects.is_empty() {
    print_info("git-series-manager is not enabled, nothing to apply");
    return Ok(());
  }

  print_plan(&report.plan);
  println!();

  if dry_run {
    print_info(&format!(
      "Dry run: {} change(s) would be applied",
      report.plan.change_count()
    ));
    return Ok(());
  }

  print_success("Apply complete!");
  print_stat("Packages added", &report.packages_added.to_string());
  print_stat("Files written", &report.files_written.to_string());
  info!(profile = %fs_host.profile_path().display(), "profile saved");

  Ok(())
}
