mod cmd;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use cmd::{BuildArgs, cmd_build};

/// pinbuild - reproducible package builds
#[derive(Parser)]
#[command(name = "pinbuild")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Build the project in the sandboxed backend
  ///
  /// Only files visible to the backend are available to the build. Check files
  /// into version control (e.g. git) before building.
  Build(BuildArgs),
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let default_level = if cli.verbose { LevelFilter::DEBUG } else { LevelFilter::ERROR };
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let code = match cli.command {
    Commands::Build(args) => cmd_build(&args)?,
  };

  std::process::exit(code);
}
