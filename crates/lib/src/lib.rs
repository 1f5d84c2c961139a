//! gsm-module-lib: configuration module for `git-series-manager`
//!
//! This crate turns a host configuration into the side effects needed to run
//! the patch-series tool:
//! - `options`: the typed `programs.git-series-manager` option surface
//! - `eval`: loading and deep-merging host configuration layers
//! - `activate`: the pure projection from options to an `EffectSet`
//! - `host`: planning and applying an `EffectSet` on a machine
//!
//! The tool itself, and its per-repository override file
//! (`<repo>/.patches/config.toml`), are outside this crate.

pub mod activate;
pub mod consts;
pub mod eval;
pub mod host;
pub mod options;
pub mod package;
pub mod platform;
pub mod settings;
pub mod util;
