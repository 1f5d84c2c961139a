//! Activation: turning options into a description of side effects.
//!
//! [`activate`] is a pure projection. It does not touch the filesystem or
//! the environment; everything host-specific comes in through
//! [`ActivationContext`]. Performing the returned [`EffectSet`] is the job of
//! [`crate::host`].
//!
//! There are exactly two outcomes:
//!
//! - `enable = false`: an empty effect set. The package is not resolved.
//! - `enable = true`: one package to provision and one file, the rendered
//!   settings at `<config_root>/git-series-manager/config.toml`.

mod types;

pub use types::*;

use tracing::info;

use crate::options::ProgramOptions;
use crate::platform::paths::tool_config_path;

/// Project `options` onto the effects they require on the host.
///
/// # Errors
///
/// - [`ActivateError::Package`] if the package reference has no artifact for
///   `context.platform`.
/// - [`ActivateError::Settings`] if the settings cannot be rendered as TOML.
pub fn activate(options: &ProgramOptions, context: &ActivationContext) -> Result<EffectSet, ActivateError> {
  if !options.enable {
    info!("disabled, no effects");
    return Ok(EffectSet::default());
  }

  let artifact = context.packages.resolve(&options.package, &context.platform)?;
  let content = options.settings.to_toml_string()?;
  let path = tool_config_path(&context.config_root);

  info!(package = %artifact, path = %path.display(), "activated");

  Ok(EffectSet {
    packages: vec![artifact],
    files: vec![FileEffect { path, content }],
  })
}
