use serde::{Deserialize, Serialize};

/// Locale-aware formatting preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LocaleConfig {
    pub decimal_separator: char,
    pub grouping_separator: char,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            decimal_separator: '.',
            grouping_separator: ',',
        }
    }
}

pub fn symbol_for(code: &str) -> String {
    match code.to_ascii_uppercase().as_str() {
        "INR" => "₹".into(),
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        other => format!("{other} "),
    }
}

pub fn minor_units_for(code: &str) -> u8 {
    match code.to_ascii_uppercase().as_str() {
        "JPY" => 0,
        _ => 2,
    }
}

pub fn format_number(locale: &LocaleConfig, value: f64, precision: u8) -> String {
    let mut body = format!("{:.*}", precision as usize, value);
    if locale.decimal_separator != '.' {
        if let Some(pos) = body.find('.') {
            body.replace_range(pos..=pos, &locale.decimal_separator.to_string());
        }
    }
    match body.find(locale.decimal_separator) {
        Some(pos) if precision > 0 => {
            let int_part = insert_grouping(&body[..pos], locale.grouping_separator);
            format!("{}{}", int_part, &body[pos..])
        }
        _ => insert_grouping(&body, locale.grouping_separator),
    }
}

fn insert_grouping(int_part: &str, separator: char) -> String {
    match int_part.strip_prefix('-') {
        Some(digits) => format!("-{}", group_digits(digits, separator)),
        None => group_digits(int_part, separator),
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.chars().count();
    let mut grouped = String::with_capacity(len + len / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx != 0 && (len - idx) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

/// Renders `amount` with the currency symbol, sign first: `-₹1,234.00`.
pub fn format_currency_value(amount: f64, code: &str, locale: &LocaleConfig) -> String {
    let body = format_number(locale, amount.abs(), minor_units_for(code));
    let sign = if amount < 0.0 && !is_zero(&body) { "-" } else { "" };
    format!("{sign}{}{body}", symbol_for(code))
}

/// Like [`format_currency_value`] but always carries a sign: `+₹80.00`.
pub fn format_signed(amount: f64, code: &str, locale: &LocaleConfig) -> String {
    let body = format_number(locale, amount.abs(), minor_units_for(code));
    let sign = if amount < 0.0 && !is_zero(&body) { '-' } else { '+' };
    format!("{sign}{}{body}", symbol_for(code))
}

fn is_zero(body: &str) -> bool {
    body.chars().all(|ch| !ch.is_ascii_digit() || ch == '0')
}
