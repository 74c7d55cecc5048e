//! Date rendering and parsing in the record files' day-month-year patterns.

use crate::constants::{DATE_FORMAT, DATE_TIME_FORMAT};
use crate::validation::{ValidationError, ValidationResult};
use chrono::{NaiveDate, NaiveDateTime};

/// Renders an optional date as `dd-MM-yyyy`, or the empty string when absent.
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

/// Renders an appointment slot as `dd-MM-yyyy HH:mm`.
pub fn format_date_time(value: NaiveDateTime) -> String {
    value.format(DATE_TIME_FORMAT).to_string()
}

pub fn parse_date(field: &'static str, value: &str) -> ValidationResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        ValidationError::InvalidDate {
            field,
            pattern: "dd-MM-yyyy",
            value: value.to_string(),
        }
    })
}

pub fn parse_date_time(field: &'static str, value: &str) -> ValidationResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), DATE_TIME_FORMAT).map_err(|_| {
        ValidationError::InvalidDate {
            field,
            pattern: "dd-MM-yyyy HH:mm",
            value: value.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_day_month_year() {
        let date = NaiveDate::from_ymd_opt(1995, 5, 12);
        assert_eq!(format_date(date), "12-05-1995");
        assert_eq!(format_date(None), "");
    }

    #[test]
    fn formats_appointment_slot() {
        let slot = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(9, 5, 0)
            .unwrap();
        assert_eq!(format_date_time(slot), "01-03-2024 09:05");
    }

    #[test]
    fn parses_what_it_formats() {
        let date = parse_date("dob", " 12-05-1995 ").unwrap();
        assert_eq!(format_date(Some(date)), "12-05-1995");

        let slot = parse_date_time("date", "01-03-2024 09:05").unwrap();
        assert_eq!(format_date_time(slot), "01-03-2024 09:05");
    }

    #[test]
    fn rejects_iso_dates() {
        let err = parse_date("dob", "1995-05-12").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidDate { field: "dob", .. }));
        assert!(parse_date_time("date", "2024-03-01T09:05").is_err());
    }
}
