//! Luhn 檢查碼的驗證與產生。
//!
//! 由最右邊（索引 0）往左數，奇數索引的位數乘二，超過 9 則減 9；
//! 總和能被 10 整除即為合法號碼。

use crate::domain::model::GenerationStrategy;
use crate::utils::error::{BinluhnError, Result};
use crate::utils::validation::validate_digits;
use rand::{Rng, RngCore};

/// ISO/IEC 7812 卡號長度下限
pub const MIN_PAN_LENGTH: usize = 8;
/// ISO/IEC 7812 卡號長度上限
pub const MAX_PAN_LENGTH: usize = 19;

fn weigh(digit: u8, double: bool) -> u32 {
    let value = u32::from(digit);
    if !double {
        return value;
    }
    let doubled = value * 2;
    if doubled > 9 {
        doubled - 9
    } else {
        doubled
    }
}

/// 含檢查碼在內的 Luhn 加權總和
pub fn luhn_sum(digits: &[u8]) -> u32 {
    digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| weigh(d, i % 2 == 1))
        .sum()
}

pub fn is_valid(digits: &[u8]) -> bool {
    luhn_sum(digits) % 10 == 0
}

/// 驗證數字字串，非數字或空字串回傳 `InvalidArgument`
pub fn validate(number: &str) -> Result<bool> {
    let digits = validate_digits("number", number)?;
    Ok(is_valid(&digits))
}

/// 計算接在 `payload` 之後能讓整串通過 Luhn 的檢查碼
pub fn check_digit(payload: &[u8]) -> u8 {
    // 補上檢查碼後 payload 的每一位都往左移一格，奇偶互換
    let sum: u32 = payload
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| weigh(d, i % 2 == 0))
        .sum();
    ((10 - sum % 10) % 10) as u8
}

/// 以前綴產生指定長度的合法號碼，最後一位直接計算
pub fn generate(prefix: &str, length: usize, rng: &mut dyn RngCore) -> Result<String> {
    generate_with(prefix, length, GenerationStrategy::CheckDigit, rng)
}

pub fn generate_with(
    prefix: &str,
    length: usize,
    strategy: GenerationStrategy,
    rng: &mut dyn RngCore,
) -> Result<String> {
    let prefix_digits = check_generate_args(prefix, length)?;

    let mut digits = Vec::with_capacity(length);
    digits.extend_from_slice(&prefix_digits);

    match strategy {
        GenerationStrategy::CheckDigit => {
            fill_random(&mut digits, length - 1, rng);
            let check = check_digit(&digits);
            digits.push(check);
        }
        GenerationStrategy::RejectionSampling => {
            let mut attempts = 0u32;
            loop {
                attempts += 1;
                digits.truncate(prefix_digits.len());
                fill_random(&mut digits, length, rng);
                if is_valid(&digits) {
                    break;
                }
            }
            tracing::trace!("rejection sampling accepted after {} attempts", attempts);
        }
    }

    Ok(render(&digits))
}

fn check_generate_args(prefix: &str, length: usize) -> Result<Vec<u8>> {
    let prefix_digits = validate_digits("prefix", prefix)?;

    if length == 0 {
        return Err(BinluhnError::invalid_argument(
            "length",
            "0",
            "Length must be positive",
        ));
    }

    if length <= prefix_digits.len() {
        return Err(BinluhnError::invalid_argument(
            "length",
            length.to_string(),
            format!(
                "Length must exceed the prefix length ({}) to leave room for a check digit",
                prefix_digits.len()
            ),
        ));
    }

    if !(MIN_PAN_LENGTH..=MAX_PAN_LENGTH).contains(&length) {
        return Err(BinluhnError::invalid_argument(
            "length",
            length.to_string(),
            format!(
                "Length must be between {} and {}",
                MIN_PAN_LENGTH, MAX_PAN_LENGTH
            ),
        ));
    }

    Ok(prefix_digits)
}

fn fill_random(digits: &mut Vec<u8>, target: usize, rng: &mut dyn RngCore) {
    while digits.len() < target {
        digits.push(rng.random_range(0..10u8));
    }
}

fn render(digits: &[u8]) -> String {
    digits.iter().map(|&d| char::from(b'0' + d)).collect()
}
