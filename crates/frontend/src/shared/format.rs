//! Форматирование сумм, чисел и дат для экранов консоли.
//!
//! Символ валюты всегда приходит из конфигурации.

use chrono::{DateTime, NaiveDate};
use contracts::shared::indicators::ValueFormat;

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `-1234.5` with `"$"` -> `"-$1,234.50"`
pub fn format_money(value: f64, symbol: &str) -> String {
    if !value.is_finite() {
        return format!("{}0.00", symbol);
    }
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{}{}.{}", sign, symbol, group_thousands(int_part), frac_part)
}

pub fn format_integer(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}{}", sign, group_thousands(&digits))
}

pub fn format_value(value: f64, format: &ValueFormat) -> String {
    match format {
        ValueFormat::Money { symbol } => format_money(value, symbol),
        ValueFormat::Number { decimals } => format!("{:.prec$}", value, prec = *decimals as usize),
        ValueFormat::Percent { decimals } => format!("{:.prec$}%", value, prec = *decimals as usize),
        ValueFormat::Integer => format_integer(value),
    }
}

/// "2024-01-15T10:30:00Z" or "2024-01-15" -> "Jan 15, 2024"
pub fn format_date(value: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return dt.format("%b %d, %Y").to_string();
    }
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => date.format("%b %d, %Y").to_string(),
        Err(_) => value.to_string(),
    }
}

/// "2024-01-15T10:30:00Z" -> "Jan 15, 2024 10:30"
pub fn format_datetime(value: &str) -> String {
    match DateTime::parse_from_rfc3339(value) {
        Ok(dt) => dt.format("%b %d, %Y %H:%M").to_string(),
        Err(_) => format_date(value),
    }
}

pub fn format_datetime_opt(value: &Option<String>) -> String {
    value
        .as_deref()
        .map(format_datetime)
        .unwrap_or_else(|| "Never".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money() {
        assert_eq!(format_money(1234.5, "$"), "$1,234.50");
        assert_eq!(format_money(-1234567.891, "€"), "-€1,234,567.89");
        assert_eq!(format_money(0.0, "$"), "$0.00");
        assert_eq!(format_money(999.999, "$"), "$1,000.00");
        assert_eq!(format_money(f64::NAN, "$"), "$0.00");
    }

    #[test]
    fn test_integer_and_value() {
        assert_eq!(format_integer(1_234_567.0), "1,234,567");
        assert_eq!(format_integer(12.0), "12");
        assert_eq!(format_value(8.5, &ValueFormat::Percent { decimals: 1 }), "8.5%");
        assert_eq!(
            format_value(45.0, &ValueFormat::Money { symbol: "$".into() }),
            "$45.00"
        );
    }

    #[test]
    fn test_dates() {
        assert_eq!(format_date("2024-01-15"), "Jan 15, 2024");
        assert_eq!(format_date("2024-01-15T10:30:00Z"), "Jan 15, 2024");
        assert_eq!(format_datetime("2024-01-15T10:30:00Z"), "Jan 15, 2024 10:30");
        assert_eq!(format_date("invalid"), "invalid");
        assert_eq!(format_datetime_opt(&None), "Never");
    }
}
