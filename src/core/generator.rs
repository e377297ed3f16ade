use crate::core::luhn;
use crate::domain::model::{Brand, GeneratedBatch, GenerationStrategy, OutputFormat};
use crate::domain::ports::Storage;
use crate::utils::error::{BinluhnError, Result};
use crate::utils::validation::validate_positive_number;
use chrono::Utc;
use rand::RngCore;
use serde::Serialize;

/// 單次批次產生的參數
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub prefix: String,
    pub length: usize,
    pub count: usize,
    pub strategy: GenerationStrategy,
}

impl GenerateRequest {
    pub fn for_brand(brand: Brand, count: usize) -> Self {
        Self {
            prefix: brand.prefix().to_string(),
            length: brand.default_length(),
            count,
            strategy: GenerationStrategy::default(),
        }
    }

    pub fn with_prefix(prefix: impl Into<String>, length: usize, count: usize) -> Self {
        Self {
            prefix: prefix.into(),
            length,
            count,
            strategy: GenerationStrategy::default(),
        }
    }

    pub fn strategy(mut self, strategy: GenerationStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    number: &'a str,
    prefix: &'a str,
    length: usize,
    valid: bool,
}

pub fn generate_batch(request: &GenerateRequest, rng: &mut dyn RngCore) -> Result<GeneratedBatch> {
    validate_positive_number("count", request.count, 1)?;

    tracing::debug!(
        "Generating {} numbers with prefix {} (length {}, {:?})",
        request.count,
        request.prefix,
        request.length,
        request.strategy
    );

    let numbers = (0..request.count)
        .map(|_| {
            luhn::generate_with(&request.prefix, request.length, request.strategy, &mut *rng)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(GeneratedBatch {
        prefix: request.prefix.clone(),
        length: request.length,
        strategy: request.strategy,
        numbers,
        generated_at: Utc::now(),
    })
}

pub fn render(batch: &GeneratedBatch, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Txt => Ok(batch.numbers.join("\n")),
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            for number in &batch.numbers {
                writer.serialize(CsvRow {
                    number,
                    prefix: &batch.prefix,
                    length: number.len(),
                    valid: luhn::validate(number)?,
                })?;
            }
            let bytes = writer
                .into_inner()
                .map_err(|e| BinluhnError::IoError(e.into_error()))?;
            String::from_utf8(bytes).map_err(|e| {
                BinluhnError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
            })
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(batch)?),
    }
}

pub fn output_filename(batch: &GeneratedBatch, format: OutputFormat) -> String {
    format!(
        "generated_{}.{}",
        batch.generated_at.timestamp(),
        format.extension()
    )
}

/// 把產生結果寫進儲存空間
pub struct BatchWriter<S: Storage> {
    storage: S,
}

impl<S: Storage> BatchWriter<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// 每種格式各寫一個檔案，回傳寫入的檔名
    pub async fn save(&self, batch: &GeneratedBatch, formats: &[OutputFormat]) -> Result<Vec<String>> {
        let mut written = Vec::with_capacity(formats.len());

        for &format in formats {
            let filename = output_filename(batch, format);
            let content = render(batch, format)?;
            tracing::debug!("Writing {} ({} bytes) to storage", filename, content.len());
            self.storage.write_file(&filename, content.as_bytes()).await?;
            written.push(filename);
        }

        Ok(written)
    }
}
