//! Names and fixed paths shared across the crate.

/// Name of this module, used for its own state directory.
pub const APP_NAME: &str = "gsm-module";

/// Name of the managed tool. Also the package attribute and config directory name.
pub const TOOL_NAME: &str = "git-series-manager";

/// File name of the rendered configuration inside the tool's config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Top-level namespace of the host option surface (`programs.<tool>`).
pub const PROGRAMS_NAMESPACE: &str = "programs";

/// Per-repository override read by the tool itself. Never produced here.
pub const REPO_OVERRIDE_PATH: &str = ".patches/config.toml";

/// Length of the truncated object hash.
pub const OBJ_HASH_PREFIX_LEN: usize = 20;
