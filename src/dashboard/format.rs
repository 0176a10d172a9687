//! Display formatting: pt-BR currency and relative dates

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

/// Format a value as Brazilian Real: `R$ 1.234,56`, minus sign in front
/// for negative values.
pub fn format_currency(value: Decimal) -> String {
    let negative = value.is_sign_negative();
    let rounded = value
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    let as_text = format!("{:.2}", rounded);
    let (int_part, frac_part) = as_text.split_once('.').unwrap_or((as_text.as_str(), "00"));

    // Group the integer digits in threes, separated by '.'
    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::new();
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(*c);
    }

    let sign = if negative { "-" } else { "" };
    format!("{}R$ {},{}", sign, grouped, frac_part)
}

/// Relative date label for a transaction row.
///
/// The age is `ceil(|now - date| / 1 day)`, so a record written moments ago
/// already has age 1 and renders as "Hoje"; the displayed day count is one
/// less than the age. This off-by-one is kept on purpose for output parity
/// with the web dashboard.
pub fn relative_date(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff_ms = (now - date).num_milliseconds().abs();
    let diff_days = ((diff_ms as f64) / 86_400_000.0).ceil().max(1.0) as i64;

    match diff_days {
        1 => "Hoje".to_string(),
        2 => "Ontem".to_string(),
        d if d <= 7 => format!("{} dias atrás", d - 1),
        _ => date.format("%d/%m/%Y").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_currency_grouping() {
        assert_eq!(format_currency(dec("0")), "R$ 0,00");
        assert_eq!(format_currency(dec("40")), "R$ 40,00");
        assert_eq!(format_currency(dec("1234.56")), "R$ 1.234,56");
        assert_eq!(format_currency(dec("1234567.8")), "R$ 1.234.567,80");
    }

    #[test]
    fn test_currency_negative() {
        assert_eq!(format_currency(dec("-60")), "-R$ 60,00");
        assert_eq!(format_currency(dec("-1000.5")), "-R$ 1.000,50");
    }

    #[test]
    fn test_currency_rounding() {
        assert_eq!(format_currency(dec("9.995")), "R$ 10,00");
        assert_eq!(format_currency(dec("9.994")), "R$ 9,99");
    }

    #[test]
    fn test_relative_date_now_is_hoje() {
        let now = Utc::now();
        assert_eq!(relative_date(now, now), "Hoje");
        assert_eq!(relative_date(now - Duration::hours(3), now), "Hoje");
    }

    #[test]
    fn test_relative_date_yesterday() {
        let now = Utc::now();
        let date = now - Duration::days(1) - Duration::hours(2);
        assert_eq!(relative_date(date, now), "Ontem");
    }

    #[test]
    fn test_relative_date_days_ago() {
        let now = Utc::now();

        let date = now - Duration::days(6) - Duration::minutes(1);
        assert_eq!(relative_date(date, now), "6 dias atrás");

        let date = now - Duration::days(3) - Duration::minutes(1);
        assert_eq!(relative_date(date, now), "3 dias atrás");
    }

    #[test]
    fn test_relative_date_falls_back_to_calendar() {
        let now: DateTime<Utc> = "2026-08-29T12:00:00Z".parse().unwrap();
        let date: DateTime<Utc> = "2026-08-19T12:00:00Z".parse().unwrap();
        assert_eq!(relative_date(date, now), "19/08/2026");
    }

    #[test]
    fn test_relative_date_future_uses_absolute_diff() {
        let now = Utc::now();
        let date = now + Duration::hours(5);
        assert_eq!(relative_date(date, now), "Hoje");
    }
}
