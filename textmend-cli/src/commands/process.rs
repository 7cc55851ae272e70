//! Process command implementation

use crate::error::CliError;
use crate::snapshot::{self, NodeSnapshot};
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use textmend_core::{dictionary, Dictionary, Dispatcher};

/// Arguments for the process command
#[derive(Debug, Args)]
pub struct ProcessArgs {
    /// Input tree snapshot (JSON)
    #[arg(short, long, value_name = "FILE", required = true)]
    pub input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// External dictionary table (TOML); defaults to the embedded table
    #[arg(short, long, value_name = "FILE")]
    pub dictionary: Option<PathBuf>,

    /// Bound on fixpoint rounds
    #[arg(long, value_name = "N", default_value_t = textmend_core::dispatcher::DEFAULT_MAX_ROUNDS)]
    pub max_rounds: usize,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// The repaired tree as a JSON snapshot
    Json,
    /// The repaired rendered text, one leaf per line
    Text,
}

impl ProcessArgs {
    /// Execute the process command
    pub fn execute(&self) -> Result<()> {
        self.init_logging();

        log::info!("Repairing tree snapshot {}", self.input.display());
        log::debug!("Arguments: {:?}", self);

        let content = std::fs::read_to_string(&self.input)
            .map_err(|_| CliError::FileNotFound(self.input.display().to_string()))?;
        let parsed: NodeSnapshot = serde_json::from_str(&content)
            .map_err(|e| CliError::InvalidSnapshot(e.to_string()))?;
        let mut tree = snapshot::build_tree(&parsed)?;

        let dictionary = self.load_dictionary()?;
        let dispatcher = Dispatcher::builder()
            .dictionary(Arc::new(dictionary))
            .max_rounds(self.max_rounds)
            .build()
            .map_err(|e| CliError::ProcessingError(e.to_string()))?;

        let outcome = dispatcher.run_to_fixpoint(&mut tree);
        if !outcome.settled {
            log::warn!(
                "pipeline hit the round cap after {} rounds; output may be incomplete",
                outcome.rounds
            );
        } else {
            log::info!("pipeline settled after {} rounds", outcome.rounds);
        }

        let rendered = match self.format {
            OutputFormat::Json => {
                let repaired = snapshot::from_tree(&tree);
                serde_json::to_string_pretty(&repaired).context("serializing repaired tree")?
            }
            OutputFormat::Text => {
                let leaves = tree.leaves_where(tree.root(), |text| !text.trim().is_empty());
                leaves
                    .iter()
                    .filter_map(|id| tree.leaf_text(*id))
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        };

        match &self.output {
            Some(path) => std::fs::write(path, rendered + "\n")
                .with_context(|| format!("writing {}", path.display()))?,
            None => println!("{rendered}"),
        }
        Ok(())
    }

    fn load_dictionary(&self) -> Result<Dictionary> {
        match &self.dictionary {
            Some(path) => Dictionary::from_file(path)
                .map_err(|e| CliError::ConfigError(e.to_string()).into()),
            None => Ok(dictionary::default_german().clone()),
        }
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
                .try_init()
                .ok();
        }
    }
}
