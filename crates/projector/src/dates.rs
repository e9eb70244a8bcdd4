use chrono::NaiveDate;

use crate::config::DateConfig;
use crate::model::{Row, Scalar};

/// Sort fallback for unparseable or missing dates. Epoch rows sort
/// before every dated row.
pub fn epoch() -> NaiveDate {
    // chrono's Default is 1970-01-01
    NaiveDate::default()
}

/// Parse a date string against the configured format list, then an
/// ISO prefix (covers RFC 3339 timestamps). `None` when nothing fits.
pub fn parse_date(value: &str, formats: &[String]) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    for format in formats {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date);
        }
    }
    // "2024-01-05T12:30:00Z" → try the date prefix
    if value.len() > 10 && value.is_char_boundary(10) {
        if let Ok(date) = NaiveDate::parse_from_str(&value[..10], "%Y-%m-%d") {
            return Some(date);
        }
    }
    None
}

/// Resolve a row's date: first configured column present on the row
/// (case-insensitive) that parses. Never fails; anomalies collapse to
/// the epoch.
pub fn parse_row_date(row: &Row, config: &DateConfig) -> NaiveDate {
    for column in &config.columns {
        let Some(value) = row.get_ci(column) else {
            continue;
        };
        if let Scalar::Text(text) = value {
            if let Some(date) = parse_date(text, &config.formats) {
                return date;
            }
        }
    }
    epoch()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> Row {
        Row::from_pairs(
            pairs
                .iter()
                .map(|(c, v)| (c.to_string(), Scalar::Text(v.to_string())))
                .collect(),
        )
    }

    #[test]
    fn iso_date_parses() {
        let config = DateConfig::default();
        let d = parse_row_date(&row(&[("date", "2024-03-01")]), &config);
        assert_eq!(d.to_string(), "2024-03-01");
    }

    #[test]
    fn us_slash_date_parses() {
        let config = DateConfig::default();
        let d = parse_row_date(&row(&[("date", "3/1/2024")]), &config);
        assert_eq!(d.to_string(), "2024-03-01");
    }

    #[test]
    fn rfc3339_prefix_parses() {
        let config = DateConfig::default();
        let d = parse_row_date(&row(&[("date", "2024-03-01T09:15:00Z")]), &config);
        assert_eq!(d.to_string(), "2024-03-01");
    }

    #[test]
    fn alternate_column_name_is_found() {
        let config = DateConfig::default();
        let d = parse_row_date(&row(&[("Posting_Date", "2024-02-14")]), &config);
        assert_eq!(d.to_string(), "2024-02-14");
    }

    #[test]
    fn missing_date_falls_back_to_epoch() {
        let config = DateConfig::default();
        let d = parse_row_date(&row(&[("memo", "no date here")]), &config);
        assert_eq!(d, epoch());
    }

    #[test]
    fn garbage_date_falls_back_to_epoch() {
        let config = DateConfig::default();
        let d = parse_row_date(&row(&[("date", "not-a-date")]), &config);
        assert_eq!(d, epoch());
    }

    #[test]
    fn numeric_date_cell_falls_back_to_epoch() {
        let config = DateConfig::default();
        let r = Row::from_pairs(vec![("date".into(), Scalar::Number(20240301.0))]);
        assert_eq!(parse_row_date(&r, &config), epoch());
    }
}
