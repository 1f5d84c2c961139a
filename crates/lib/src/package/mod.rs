//! Package references and the set of known packages.
//!
//! A [`PackageSet`] maps an attribute name (e.g. `git-series-manager`) and a
//! platform triple to exactly one [`Artifact`]. The options schema defaults
//! its `package` to a lookup of the tool's attribute for the current
//! platform.
//!
//! Additional package sets can be loaded from TOML, keyed the same way:
//!
//! ```toml
//! [git-series-manager.x86_64-linux]
//! name = "git-series-manager"
//! version = "0.2.0"
//! source = "file:///opt/pkgs/gsm"
//! ```

mod types;

pub use types::*;
