mod apply;
mod info;
mod plan;
mod render;

pub use apply::cmd_apply;
pub use info::cmd_info;
pub use plan::cmd_plan;
pub use render::cmd_render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use gsm_module_lib::activate::{ActivationContext, EffectSet, activate};
use gsm_module_lib::eval::evaluate;
use gsm_module_lib::package::PackageSet;
use gsm_module_lib::platform::Platform;
use gsm_module_lib::platform::paths::user_config_root;

/// Host-wide flags shared by every command.
#[derive(Debug, Clone, Default)]
pub struct HostArgs {
  /// Extra package set layered over the built-in one.
  pub packages: Option<PathBuf>,
  /// Platform triple to resolve packages for instead of the detected one.
  pub platform: Option<String>,
}

impl HostArgs {
  pub fn platform(&self) -> Result<Platform> {
    match &self.platform {
      Some(triple) => triple.parse().with_context(|| format!("Invalid --platform {}", triple)),
      None => Platform::detect().context("Failed to detect platform"),
    }
  }

  pub fn package_set(&self) -> Result<PackageSet> {
    let mut set = PackageSet::builtin();
    if let Some(path) = &self.packages {
      set.extend(PackageSet::load(path).context("Failed to load package set")?);
    }
    Ok(set)
  }

  pub fn context(&self) -> Result<ActivationContext> {
    let config_root = user_config_root().context("Failed to locate the user config root")?;
    Ok(ActivationContext::new(self.platform()?, config_root, self.package_set()?))
  }
}

/// Evaluate `configs` and activate the result.
fn evaluate_and_activate(configs: &[PathBuf], host: &HostArgs) -> Result<EffectSet> {
  let options = evaluate(configs).with_context(|| format!("Failed to evaluate config: {}", describe(configs)))?;
  let context = host.context()?;
  debug!(platform = %context.platform, config_root = %context.config_root.display(), "activation context");
  activate(&options, &context).context("Activation failed")
}

fn describe(configs: &[PathBuf]) -> String {
  configs
    .iter()
    .map(|p| p.display().to_string())
    .collect::<Vec<_>>()
    .join(", ")
}
