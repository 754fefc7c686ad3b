// crates/geostat-core/src/period.rs

//! Period-to-year normalization.

use crate::raw::Period;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static YEAR_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]{4}").expect("year pattern is valid"));

fn is_year(s: &str) -> bool {
    s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit())
}

/// Extracts the reporting year of a period.
///
/// 1. `date` in `day.month.year` form → trailing component (`31.12.2023` → `2023`).
/// 2. Otherwise the first run of four digits in `name` (`2023 год` → `2023`).
///
/// A trailing date component that is not a 4-digit numeral falls through to
/// the name, so the result is always four ASCII digits.
///
/// ```rust
/// use geostat_core::period::extract_year;
/// use geostat_core::raw::Period;
///
/// let p = Period { name: "Декабрь".into(), date: Some("31.12.2023".into()), ..Default::default() };
/// assert_eq!(extract_year(&p), Some("2023"));
///
/// let p = Period { name: "2021 год".into(), date: None, ..Default::default() };
/// assert_eq!(extract_year(&p), Some("2021"));
/// ```
pub fn extract_year(period: &Period) -> Option<&str> {
    if let Some(date) = period.date.as_deref() {
        if date.contains('.') {
            let tail = date.rsplit('.').next().unwrap_or_default().trim();
            if is_year(tail) {
                return Some(tail);
            }
        }
    }
    YEAR_RUN.find(&period.name).map(|m| m.as_str())
}

/// Parses a period value. Numbers pass through, strings are trimmed and
/// parsed; anything else, and non-finite results, yield `None`.
pub fn parse_value(value: &Value) -> Option<f64> {
    let v = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    v.is_finite().then_some(v)
}

/// `true` when no keywords are configured or `name` contains at least one.
/// Matching is case-sensitive.
pub fn passes_keyword_filter(name: &str, keywords: &[String]) -> bool {
    keywords.is_empty() || keywords.iter().any(|k| name.contains(k.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn period(name: &str, date: Option<&str>) -> Period {
        Period {
            name: name.to_string(),
            date: date.map(str::to_string),
            value: Value::Null,
        }
    }

    #[test]
    fn date_wins_over_name() {
        let p = period("2019 год", Some("01.01.2020"));
        assert_eq!(extract_year(&p), Some("2020"));
    }

    #[test]
    fn name_used_when_date_missing_or_undotted() {
        assert_eq!(extract_year(&period("за 2022 год", None)), Some("2022"));
        assert_eq!(extract_year(&period("за 2022 год", Some(""))), Some("2022"));
        assert_eq!(extract_year(&period("за 2022 год", Some("2021-12-31"))), Some("2022"));
    }

    #[test]
    fn malformed_date_tail_falls_back_to_name() {
        assert_eq!(extract_year(&period("Декабрь 2018", Some("31.12."))), Some("2018"));
        assert_eq!(extract_year(&period("Декабрь 2018", Some("31.12.18"))), Some("2018"));
        assert_eq!(extract_year(&period("Декабрь", Some("31.12.18"))), None);
    }

    #[test]
    fn first_four_digit_run_only() {
        assert_eq!(extract_year(&period("123456", None)), Some("1234"));
        assert_eq!(extract_year(&period("2020-2021", None)), Some("2020"));
        assert_eq!(extract_year(&period("год 99", None)), None);
    }

    #[test]
    fn extracted_years_are_four_ascii_digits() {
        let cases = [
            period("Январь-декабрь 2023 года", None),
            period("x", Some("1.1.1999")),
            period("٢٠٢٣ 2024", None),
            period("", Some(" 31.12.2015 ")),
        ];
        for p in &cases {
            let y = extract_year(p).expect("year");
            assert!(is_year(y), "{y:?}");
        }
    }

    #[test]
    fn values_parse_from_numbers_and_strings() {
        assert_eq!(parse_value(&json!(500)), Some(500.0));
        assert_eq!(parse_value(&json!(" 12.5 ")), Some(12.5));
        assert_eq!(parse_value(&json!("1e3")), Some(1000.0));
    }

    #[test]
    fn non_numeric_values_are_rejected() {
        assert_eq!(parse_value(&json!("-")), None);
        assert_eq!(parse_value(&json!("")), None);
        assert_eq!(parse_value(&json!("NaN")), None);
        assert_eq!(parse_value(&json!(null)), None);
        assert_eq!(parse_value(&json!(true)), None);
    }

    #[test]
    fn keyword_filter_is_case_sensitive_any_match() {
        let kw = vec!["Декабрь".to_string(), "год".to_string()];
        assert!(passes_keyword_filter("Январь-Декабрь 2023", &kw));
        assert!(passes_keyword_filter("2023 год", &kw));
        assert!(!passes_keyword_filter("декабрь 2023", &kw));
        assert!(passes_keyword_filter("anything", &[]));
    }
}
