pub mod generator;
pub mod lookup;
pub mod luhn;

pub use crate::domain::model::{BinInfo, Brand, GeneratedBatch, GenerationStrategy, OutputFormat};
pub use crate::domain::ports::{BinLookup, ConfigProvider, Storage};
pub use crate::utils::error::Result;
