//! textmend command-line entry point

use clap::{Parser, Subcommand};
use textmend_cli::commands::{GenerateConfigArgs, ProcessArgs, ValidateArgs};

/// Repair localization defects in serialized UI tree snapshots
#[derive(Debug, Parser)]
#[command(name = "textmend", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the repair pipeline over a tree snapshot
    Process(ProcessArgs),
    /// Validate a dictionary table
    Validate(ValidateArgs),
    /// Write the embedded dictionary table as a starting point
    GenerateConfig(GenerateConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Process(args) => args.execute(),
        Commands::Validate(args) => args.execute(),
        Commands::GenerateConfig(args) => args.execute(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
