use crate::config::toml_config::{BrandConfig, TomlConfig};
use crate::core::lookup::DEFAULT_LOOKUP_ENDPOINT;
use crate::domain::model::{Brand, GenerationStrategy, OutputFormat};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{BinluhnError, Result};
use crate::utils::validation::{self, Validate};
use std::collections::HashMap;
use std::path::Path;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
pub const DEFAULT_OUTPUT_PATH: &str = "./downloads";
pub const DEFAULT_COUNT: usize = 10;

/// 合併預設值、TOML 與命令列後的有效設定
#[derive(Debug, Clone)]
pub struct Settings {
    pub lookup_endpoint: String,
    pub timeout_seconds: u64,
    pub output_path: String,
    pub output_formats: Vec<OutputFormat>,
    pub count: usize,
    pub strategy: GenerationStrategy,
    pub brands: HashMap<String, BrandConfig>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            lookup_endpoint: DEFAULT_LOOKUP_ENDPOINT.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            output_formats: vec![OutputFormat::Txt],
            count: DEFAULT_COUNT,
            strategy: GenerationStrategy::default(),
            brands: HashMap::new(),
        }
    }
}

impl Settings {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path.display());
                let config = TomlConfig::from_file(path)?;
                config.validate()?;
                Ok(Self::from_toml(config))
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml(config: TomlConfig) -> Self {
        let mut settings = Self::default();

        if let Some(lookup) = config.lookup {
            if let Some(endpoint) = lookup.endpoint {
                settings.lookup_endpoint = endpoint;
            }
            if let Some(timeout) = lookup.timeout_seconds {
                settings.timeout_seconds = timeout;
            }
        }

        if let Some(generate) = config.generate {
            if let Some(count) = generate.count {
                settings.count = count;
            }
            if let Some(path) = generate.output_path {
                settings.output_path = path;
            }
            if let Some(formats) = generate.output_formats.filter(|f| !f.is_empty()) {
                settings.output_formats = formats;
            }
            if let Some(strategy) = generate.strategy {
                settings.strategy = strategy;
            }
        }

        settings.brands = config
            .brands
            .into_iter()
            .map(|(name, brand)| (name.to_ascii_lowercase(), brand))
            .collect();
        settings
    }

    /// 依品牌名稱或前綴決定 (prefix, length)
    ///
    /// 自訂品牌優先於內建品牌；`length` 有給就覆蓋預設長度。
    pub fn resolve_target(
        &self,
        brand: Option<&str>,
        prefix: Option<&str>,
        length: Option<usize>,
    ) -> Result<(String, usize)> {
        let (prefix, default_length) = match (brand, prefix) {
            (Some(_), Some(_)) => {
                return Err(BinluhnError::ConfigError {
                    message: "--brand and --prefix cannot be combined".to_string(),
                })
            }
            (Some(name), None) => {
                let key = name.trim().to_ascii_lowercase();
                match self.brands.get(&key) {
                    Some(custom) => (custom.prefix.clone(), custom.length),
                    None => {
                        let brand: Brand = name.parse()?;
                        (brand.prefix().to_string(), brand.default_length())
                    }
                }
            }
            (None, Some(prefix)) => (prefix.to_string(), Brand::Visa.default_length()),
            (None, None) => {
                return Err(BinluhnError::MissingConfigError {
                    field: "brand or prefix".to_string(),
                })
            }
        };

        Ok((prefix, length.unwrap_or(default_length)))
    }
}

impl ConfigProvider for Settings {
    fn lookup_endpoint(&self) -> &str {
        &self.lookup_endpoint
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_url("lookup_endpoint", &self.lookup_endpoint)?;
        validation::validate_range("timeout_seconds", self.timeout_seconds, 1, 300)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_positive_number("count", self.count, 1)?;
        Ok(())
    }
}
