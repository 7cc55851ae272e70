//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    ///
    /// Writes the embedded correction table as a starting point; new
    /// mistranslated labels go in as additional entries.
    pub fn execute(&self) -> Result<()> {
        println!("Generating dictionary table...");
        println!("  Output file: {}", self.output.display());

        std::fs::write(&self.output, textmend_core::dictionary::default_config_toml())
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Dictionary table generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the table to add newly found mistranslations");
        println!("2. Validate it:");
        println!("   textmend validate --dictionary {}", self.output.display());
        println!("3. Use it for processing:");
        println!(
            "   textmend process -i tree.json --dictionary {}",
            self.output.display()
        );

        Ok(())
    }
}
