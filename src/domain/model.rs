use crate::utils::error::BinluhnError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const NOT_AVAILABLE: &str = "N/A";

/// 發卡組織類別，決定前綴與預設長度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Brand {
    Visa,
    Mastercard,
    Amex,
}

impl Brand {
    pub const ALL: [Brand; 3] = [Brand::Visa, Brand::Mastercard, Brand::Amex];

    pub fn prefix(&self) -> &'static str {
        match self {
            Brand::Visa => "4",
            Brand::Mastercard => "5",
            Brand::Amex => "3",
        }
    }

    pub fn default_length(&self) -> usize {
        match self {
            Brand::Visa | Brand::Mastercard => 16,
            Brand::Amex => 15,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Brand::Visa => "visa",
            Brand::Mastercard => "mastercard",
            Brand::Amex => "amex",
        }
    }
}

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Brand {
    type Err = BinluhnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "visa" => Ok(Brand::Visa),
            "mastercard" | "mc" => Ok(Brand::Mastercard),
            "amex" | "americanexpress" => Ok(Brand::Amex),
            _ => Err(BinluhnError::invalid_argument(
                "brand",
                s,
                "Choose visa, mastercard or amex",
            )),
        }
    }
}

/// 產生號碼時如何決定最後一位
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenerationStrategy {
    /// 直接計算唯一合法的檢查碼
    #[default]
    CheckDigit,
    /// 整串隨機，直到通過 Luhn 為止
    RejectionSampling,
}

impl FromStr for GenerationStrategy {
    type Err = BinluhnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "check-digit" | "checkdigit" => Ok(GenerationStrategy::CheckDigit),
            "rejection" | "rejection-sampling" => Ok(GenerationStrategy::RejectionSampling),
            _ => Err(BinluhnError::invalid_argument(
                "strategy",
                s,
                "Choose check-digit or rejection-sampling",
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Txt,
    Csv,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Txt => "txt",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = BinluhnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "txt" | "text" => Ok(OutputFormat::Txt),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(BinluhnError::invalid_argument(
                "format",
                s,
                "Unsupported format. Valid formats: txt, csv, json",
            )),
        }
    }
}

/// 發卡行資訊，欄位缺漏時顯示為 N/A
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinInfo {
    pub bin: String,
    pub scheme: Option<String>,
    pub card_type: Option<String>,
    pub country: Option<String>,
    pub bank: Option<String>,
}

impl BinInfo {
    pub fn display_scheme(&self) -> &str {
        self.scheme.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn display_card_type(&self) -> &str {
        self.card_type.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn display_country(&self) -> &str {
        self.country.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn display_bank(&self) -> &str {
        self.bank.as_deref().unwrap_or(NOT_AVAILABLE)
    }
}

impl fmt::Display for BinInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BIN Info ({}):", self.bin)?;
        writeln!(f, "Scheme: {}", self.display_scheme())?;
        writeln!(f, "Type: {}", self.display_card_type())?;
        writeln!(f, "Country: {}", self.display_country())?;
        write!(f, "Bank: {}", self.display_bank())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedBatch {
    pub prefix: String,
    pub length: usize,
    pub strategy: GenerationStrategy,
    pub numbers: Vec<String>,
    pub generated_at: DateTime<Utc>,
}
