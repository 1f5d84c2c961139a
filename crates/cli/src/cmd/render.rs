//! Implementation of the `gsm-module render` command.
//!
//! Prints the TOML that `apply` would write, without touching the host.

use std::path::PathBuf;

use anyhow::Result;

use super::{HostArgs, evaluate_and_activate};
use crate::output::print_warning;

pub fn cmd_render(configs: &[PathBuf], host: &HostArgs) -> Result<()> {
  let effects = evaluate_and_activate(configs, host)?;

  if effects.files.is_empty() {
    print_warning("git-series-manager is not enabled, nothing to render");
    return Ok(());
  }

  for file in &effects.files {
    print!("{}", file.content);
  }
  Ok(())
}
