pub mod cli;
pub mod settings;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::model::{GenerationStrategy, OutputFormat};
#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "binluhn")]
#[command(about = "BIN lookup and Luhn-valid test number generation")]
pub struct CliConfig {
    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[arg(long, global = true, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Look up issuer metadata for a 6-digit BIN
    Lookup(LookupArgs),
    /// Generate Luhn-valid test numbers
    Generate(GenerateArgs),
    /// Check numbers against the Luhn formula
    Validate(ValidateArgs),
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Args)]
pub struct LookupArgs {
    pub bin: String,

    #[arg(long)]
    pub endpoint: Option<String>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    #[arg(long, help = "visa, mastercard, amex or a brand from the config file")]
    pub brand: Option<String>,

    #[arg(long, conflicts_with = "brand")]
    pub prefix: Option<String>,

    #[arg(long)]
    pub length: Option<usize>,

    #[arg(long, short = 'n')]
    pub count: Option<usize>,

    #[arg(long, help = "check-digit or rejection-sampling")]
    pub strategy: Option<GenerationStrategy>,

    #[arg(long, help = "Seed for reproducible output")]
    pub seed: Option<u64>,

    #[arg(long, help = "Write results under this directory")]
    pub output_path: Option<String>,

    #[arg(long, value_delimiter = ',', help = "txt, csv, json")]
    pub format: Vec<OutputFormat>,

    #[arg(long, help = "Write results to files as well as stdout")]
    pub save: bool,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    #[arg(required = true)]
    pub numbers: Vec<String>,
}
