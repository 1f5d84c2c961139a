//! Implementation of the `gsm-module plan` command.
//!
//! Evaluates the configuration and shows what `apply` would change on the
//! host, without changing anything.

use std::path::PathBuf;

use anyhow::{Context, Result};

use gsm_module_lib::host::{FileChange, FilesystemHost, PackageChange, Plan, plan};
use gsm_module_lib::util::hash::Hashable;

use super::{HostArgs, evaluate_and_activate};
use crate::output::{OutputFormat, print_change, print_info, print_json, symbols, truncate_hash};

pub fn cmd_plan(configs: &[PathBuf], host: &HostArgs, output: OutputFormat) -> Result<()> {
  let effects = evaluate_and_activate(configs, host)?;
  let fs_host = FilesystemHost::default_host().context("Failed to locate the data directory")?;
  let plan = plan(&effects, &fs_host).context("Failed to compute plan")?;

  if output.is_json() {
    return print_json(&plan);
  }

  let hash = effects.compute_hash().context("Failed to compute effects hash")?;
  println!("Plan: {}", truncate_hash(&hash.0));
  print_plan(&plan);

  if plan.has_changes() {
    print_info(&format!("{} change(s) to apply", plan.change_count()));
  } else {
    print_info("No changes");
  }
  Ok(())
}

pub fn print_plan(plan: &Plan) {
  for package in &plan.packages {
    let symbol = match package.change {
      PackageChange::Add => symbols::ADD,
      PackageChange::Present => symbols::UNCHANGED,
    };
    print_change(symbol, "package", &package.artifact.to_string());
  }

  for file in &plan.files {
    let symbol = match file.change {
      FileChange::Create => symbols::ADD,
      FileChange::Update { .. } => symbols::MODIFY,
      FileChange::Unchanged => symbols::UNCHANGED,
    };
    print_change(symbol, "file", &file.path.display().to_string());
  }
}
