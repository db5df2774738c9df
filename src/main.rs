use std::path::Path;

use anyhow::Result;
use clap::{Parser, Subcommand};

use op_release::release::run_release;
use op_release::ui::Reporter;
use op_release::version::BumpKind;

#[derive(Parser)]
#[command(
    name = "op-release",
    about = "Bump the plugin version, build, and commit the release"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one full release cycle
    #[command(subcommand)]
    Release(ReleaseCommand),
}

#[derive(Subcommand)]
enum ReleaseCommand {
    /// Bump the patch version (1.2.3 -> 1.2.4)
    Patch,
    /// Bump the minor version (1.2.3 -> 1.3.0)
    Minor,
    /// Bump the major version (1.2.3 -> 2.0.0)
    Major,
}

fn main() {
    if let Err(err) = run() {
        Reporter::new().error(&format!("{err:#}"));
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let reporter = Reporter::new();

    let kind = match cli.command {
        Commands::Release(ReleaseCommand::Patch) => BumpKind::Patch,
        Commands::Release(ReleaseCommand::Minor) => BumpKind::Minor,
        Commands::Release(ReleaseCommand::Major) => BumpKind::Major,
    };

    run_release(Path::new("."), kind, &reporter)?;
    Ok(())
}
