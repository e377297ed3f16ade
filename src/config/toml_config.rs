use crate::domain::model::{GenerationStrategy, OutputFormat};
use crate::utils::error::{BinluhnError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub lookup: Option<LookupConfig>,
    pub generate: Option<GenerateConfig>,
    #[serde(default)]
    pub brands: HashMap<String, BrandConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupConfig {
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateConfig {
    pub count: Option<usize>,
    pub output_path: Option<String>,
    pub output_formats: Option<Vec<OutputFormat>>,
    pub strategy: Option<GenerationStrategy>,
}

/// 自訂發卡前綴，例如 `[brands.discover]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandConfig {
    pub prefix: String,
    pub length: usize,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BinluhnError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BinluhnError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${BINLIST_ENDPOINT})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BinluhnError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(endpoint) = self.lookup.as_ref().and_then(|l| l.endpoint.as_deref()) {
            validation::validate_url("lookup.endpoint", endpoint)?;
        }

        if let Some(generate) = &self.generate {
            if let Some(path) = &generate.output_path {
                validation::validate_path("generate.output_path", path)?;
            }
            if let Some(count) = generate.count {
                validation::validate_positive_number("generate.count", count, 1)?;
            }
        }

        for (name, brand) in &self.brands {
            let field = format!("brands.{}.prefix", name);
            let prefix = validation::validate_digits(&field, &brand.prefix)?;
            if brand.length <= prefix.len() {
                return Err(BinluhnError::ConfigValidationError {
                    field: format!("brands.{}.length", name),
                    message: "length must exceed the prefix length".to_string(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[lookup]
endpoint = "https://binlist.example.com/lookup"
timeout_seconds = 3

[generate]
count = 25
output_path = "./fixtures"
output_formats = ["csv", "json"]
strategy = "rejection-sampling"

[brands.discover]
prefix = "6011"
length = 16
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let lookup = config.lookup.as_ref().unwrap();
        assert_eq!(lookup.timeout_seconds, Some(3));

        let generate = config.generate.as_ref().unwrap();
        assert_eq!(generate.count, Some(25));
        assert_eq!(
            generate.output_formats.as_deref(),
            Some(&[OutputFormat::Csv, OutputFormat::Json][..])
        );
        assert_eq!(generate.strategy, Some(GenerationStrategy::RejectionSampling));
        assert_eq!(config.brands["discover"].prefix, "6011");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_is_valid() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.lookup.is_none());
        assert!(config.brands.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("BINLUHN_TEST_ENDPOINT", "https://lookup.internal.test");

        let toml_content = r#"
[lookup]
endpoint = "${BINLUHN_TEST_ENDPOINT}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.lookup.unwrap().endpoint.as_deref(),
            Some("https://lookup.internal.test")
        );

        std::env::remove_var("BINLUHN_TEST_ENDPOINT");
    }

    #[test]
    fn test_config_validation() {
        let bad_url = TomlConfig::from_toml_str("[lookup]\nendpoint = \"invalid-url\"\n").unwrap();
        assert!(bad_url.validate().is_err());

        let bad_brand = TomlConfig::from_toml_str(
            "[brands.short]\nprefix = \"601100\"\nlength = 6\n",
        )
        .unwrap();
        assert!(bad_brand.validate().is_err());

        let bad_prefix =
            TomlConfig::from_toml_str("[brands.x]\nprefix = \"60-11\"\nlength = 16\n").unwrap();
        assert!(bad_prefix.validate().is_err());
    }

    #[test]
    fn test_unknown_output_format_fails_to_parse() {
        let result = TomlConfig::from_toml_str("[generate]\noutput_formats = [\"xml\"]\n");
        assert!(matches!(
            result,
            Err(BinluhnError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[generate]\ncount = 3\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.generate.unwrap().count, Some(3));
    }
}
