mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cmd::HostArgs;
use output::OutputFormat;

/// gsm-module - configuration module for git-series-manager
#[derive(Parser)]
#[command(name = "gsm-module")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Additional package set (TOML) layered over the built-in one
  #[arg(long, global = true, value_name = "FILE")]
  packages: Option<PathBuf>,

  /// Resolve packages for this platform triple instead of the current one
  #[arg(long, global = true, value_name = "TRIPLE")]
  platform: Option<String>,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Show platform and path information
  Info,

  /// Print the config file that would be written
  Render {
    /// Host configuration files, merged in order
    #[arg(required = true)]
    configs: Vec<PathBuf>,
  },

  /// Show what apply would change
  Plan {
    /// Host configuration files, merged in order
    #[arg(required = true)]
    configs: Vec<PathBuf>,

    #[arg(short, long, value_enum, default_value_t)]
    output: OutputFormat,
  },

  /// Provision the package and write the config file
  Apply {
    /// Host configuration files, merged in order
    #[arg(required = true)]
    configs: Vec<PathBuf>,

    /// Compute changes but do not perform them
    #[arg(long)]
    dry_run: bool,

    #[arg(short, long, value_enum, default_value_t)]
    output: OutputFormat,
  },
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  match run(cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      output::print_error(&format!("{:#}", e));
      ExitCode::FAILURE
    }
  }
}

fn run(cli: Cli) -> Result<()> {
  let host = HostArgs {
    packages: cli.packages,
    platform: cli.platform,
  };

  match cli.command {
    Commands::Info => cmd::cmd_info(&host),
    Commands::Render { configs } => cmd::cmd_render(&configs, &host),
    Commands::Plan { configs, output } => cmd::cmd_plan(&configs, &host, output),
    Commands::Apply {
      configs,
      dry_run,
      output,
    } => cmd::cmd_apply(&configs, &host, dry_run, output),
  }
}
