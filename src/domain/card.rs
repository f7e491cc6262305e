use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, Result};

const MAX_NUMBER_DIGITS: usize = 16;
const MAX_EXPIRY_DIGITS: usize = 4;
const MAX_CVV_DIGITS: usize = 3;

/// The single stored payment-card profile. Stored in plain text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Card {
    #[serde(default)]
    pub holder: String,
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub expiry: String,
    #[serde(default)]
    pub cvv: String,
}

impl Default for Card {
    fn default() -> Self {
        Self {
            holder: "AETHER DRIFT".into(),
            number: "4589 1234 5678 9012".into(),
            expiry: "12/28".into(),
            cvv: "999".into(),
        }
    }
}

impl Card {
    /// Normalizes raw input and validates that holder and number are present.
    pub fn new(holder: &str, number: &str, expiry: &str, cvv: &str) -> Result<Self> {
        let holder = holder.trim().to_string();
        let number = format_card_number(number);
        if holder.is_empty() || number.is_empty() {
            return Err(LedgerError::validation("card holder and number are required"));
        }
        Ok(Self {
            holder,
            number,
            expiry: format_expiry(expiry),
            cvv: sanitize_cvv(cvv),
        })
    }

    /// `**** **** **** 9012` style rendering for screens that should not show the full number.
    pub fn masked_number(&self) -> String {
        let digits = digits_only(&self.number);
        if digits.len() <= 4 {
            return self.number.clone();
        }
        let visible = &digits[digits.len() - 4..];
        let hidden_groups = (digits.len() - 4).div_ceil(4);
        let mut parts = vec!["****"; hidden_groups];
        parts.push(visible);
        parts.join(" ")
    }
}

fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Keeps at most 16 digits and groups them in blocks of four.
pub fn format_card_number(raw: &str) -> String {
    let digits: Vec<char> = digits_only(raw).chars().take(MAX_NUMBER_DIGITS).collect();
    digits
        .chunks(4)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Keeps at most four digits and inserts `/` after the month.
pub fn format_expiry(raw: &str) -> String {
    let digits: String = digits_only(raw).chars().take(MAX_EXPIRY_DIGITS).collect();
    if digits.len() >= 2 {
        format!("{}/{}", &digits[..2], &digits[2..])
    } else {
        digits
    }
}

pub fn sanitize_cvv(raw: &str) -> String {
    digits_only(raw).chars().take(MAX_CVV_DIGITS).collect()
}
