use askama::Result;
use chrono::NaiveDate;
use std::fmt::Display;

// Custom filters for the templates: `{{ total|grouped }}`, `{{ date|date_in }}`.

/// Amount grouped in thousands (`1,250,000`); trailing zero decimals are
/// dropped.
#[allow(clippy::unnecessary_wraps)]
pub fn grouped<T: Display>(value: T) -> Result<String> {
    Ok(group_thousands(&value.to_string()))
}

/// Amount with exactly two decimals, as on the invoice editor.
#[allow(clippy::unnecessary_wraps)]
pub fn fixed2<T: Display>(value: T) -> Result<String> {
    Ok(format!("{:.2}", value))
}

/// Day/month/year, the way dates read on Indian documents. Takes anything
/// that displays as `YYYY-MM-DD`; other text passes through unchanged.
#[allow(clippy::unnecessary_wraps)]
pub fn date_in<T: Display>(value: T) -> Result<String> {
    let raw = value.to_string();
    Ok(match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
        Ok(date) => date.format("%-d/%-m/%Y").to_string(),
        Err(_) => raw,
    })
}

fn group_thousands(raw: &str) -> String {
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw),
    };
    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (digits, None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match fraction {
        Some(f) if !f.trim_end_matches('0').is_empty() => format!("{}{}.{}", sign, grouped, f),
        _ => format!("{}{}", sign, grouped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn groups_whole_amounts() {
        assert_eq!(grouped(Decimal::from(12500)).unwrap(), "12,500");
        assert_eq!(grouped(437500u32).unwrap(), "437,500");
        assert_eq!(grouped(999).unwrap(), "999");
        assert_eq!(grouped(0).unwrap(), "0");
        assert_eq!(grouped(-1250000i64).unwrap(), "-1,250,000");
    }

    #[test]
    fn keeps_meaningful_decimals() {
        assert_eq!(grouped(Decimal::new(123450, 2)).unwrap(), "1,234.5");
        assert_eq!(grouped(Decimal::new(4500000, 2)).unwrap(), "45,000");
        assert_eq!(fixed2(Decimal::from(495)).unwrap(), "495.00");
    }

    #[test]
    fn indian_date_format() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        assert_eq!(date_in(&date).unwrap(), "5/1/2025");
        assert_eq!(date_in("-").unwrap(), "-");
    }
}
