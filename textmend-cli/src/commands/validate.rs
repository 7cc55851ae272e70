//! Validate command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use textmend_core::Dictionary;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to the dictionary table to validate
    #[arg(short = 'd', long, value_name = "FILE", required = true)]
    pub dictionary: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!("Validating dictionary table: {}", self.dictionary.display());

        match Dictionary::from_file(&self.dictionary) {
            Ok(dictionary) => {
                println!("✓ Dictionary is valid!");
                println!("  Entries: {}", dictionary.len());
                if let Some(longest) = dictionary.entries().first() {
                    println!("  Longest source phrase: {:?}", longest.source);
                }
                if let Some(shortest) = dictionary.entries().last() {
                    println!("  Shortest source phrase: {:?}", shortest.source);
                }
                Ok(())
            }
            Err(e) => {
                println!("✗ Dictionary is invalid!");
                println!("  Error: {e}");
                Err(anyhow::anyhow!("Validation failed: {}", e))
            }
        }
    }
}
