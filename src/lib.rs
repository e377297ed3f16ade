pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, Command};

pub use crate::config::{cli::LocalStorage, settings::Settings};
pub use crate::core::generator::{generate_batch, BatchWriter, GenerateRequest};
pub use crate::core::lookup::BinlistClient;
pub use crate::core::luhn::{check_digit, generate, generate_with, validate};
pub use crate::domain::model::{BinInfo, Brand, GeneratedBatch, GenerationStrategy, OutputFormat};
pub use crate::domain::ports::BinLookup;
pub use crate::utils::error::{BinluhnError, Result};
