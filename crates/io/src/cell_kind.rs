//! Output cell type inference.
//!
//! Result tables hold plain text. Before writing, each value is classified as
//! a date, a number, or text:
//!
//! 1. a number strictly between [`DATE_SERIAL_MIN`] and [`DATE_SERIAL_MAX`] is
//!    read as a spreadsheet date serial (days since 1899-12-30);
//! 2. text in a locale-independent date/time layout is read as a date;
//! 3. any other finite number stays numeric;
//! 4. everything else is text.
//!
//! The serial range is a heuristic. Genuine numbers inside it (amounts,
//! quantities, IDs) are rendered as dates.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};

/// Exclusive lower bound of the date-serial heuristic.
pub const DATE_SERIAL_MIN: f64 = 20000.0;

/// Exclusive upper bound of the date-serial heuristic.
pub const DATE_SERIAL_MAX: f64 = 60000.0;

/// Rendering for dates in the output workbook.
pub const DATE_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

const MILLIS_PER_DAY: f64 = 86_400_000.0;

const DATETIME_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
];

const DATE_LAYOUTS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
];

/// A result cell ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputCell {
    Date(NaiveDateTime),
    Number(f64),
    Text(String),
}

impl OutputCell {
    /// Text rendering: dates in [`DATE_FORMAT`], numbers in invariant notation.
    pub fn to_text(&self) -> String {
        match self {
            Self::Date(dt) => dt.format(DATE_FORMAT).to_string(),
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

/// Classify a stored text value for output.
pub fn infer_cell(text: &str) -> OutputCell {
    let number = parse_number(text);

    if let Some(n) = number {
        if n > DATE_SERIAL_MIN && n < DATE_SERIAL_MAX {
            if let Some(dt) = serial_to_datetime(n) {
                return OutputCell::Date(dt);
            }
        }
    }

    if let Some(dt) = parse_datetime(text) {
        return OutputCell::Date(dt);
    }

    match number {
        Some(n) => OutputCell::Number(n),
        None => OutputCell::Text(text.to_string()),
    }
}

/// Finite number in invariant notation (`.` decimal point, optional exponent).
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Convert a spreadsheet date serial to a date-time.
///
/// Day 0 is 1899-12-30; the fraction is the time of day, rounded to the
/// millisecond.
pub fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let millis = (serial * MILLIS_PER_DAY).round();
    if millis.abs() > i64::MAX as f64 {
        return None;
    }
    epoch.checked_add_signed(Duration::milliseconds(millis as i64))
}

/// Parse date/time text in one of the accepted locale-independent layouts.
pub fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_local());
    }

    for layout in DATETIME_LAYOUTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, layout) {
            return Some(dt);
        }
    }

    for layout in DATE_LAYOUTS {
        if let Ok(d) = NaiveDate::parse_from_str(trimmed, layout) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(value: &str) -> String {
        infer_cell(value).to_text()
    }

    #[test]
    fn test_date_serial_in_range() {
        assert_eq!(text_of("45000"), "15-03-2023 00:00:00");
        assert_eq!(text_of("59999"), "07-04-2064 00:00:00");
        assert_eq!(text_of("20001"), "04-10-1954 00:00:00");
    }

    #[test]
    fn test_date_serial_fraction_is_time() {
        assert_eq!(text_of("45000.5"), "15-03-2023 12:00:00");
        assert_eq!(text_of("44927.75"), "01-01-2023 18:00:00");
    }

    #[test]
    fn test_range_bounds_are_exclusive() {
        assert_eq!(infer_cell("60000"), OutputCell::Number(60000.0));
        assert_eq!(infer_cell("20000"), OutputCell::Number(20000.0));
        assert_eq!(infer_cell("19999"), OutputCell::Number(19999.0));
        assert!(matches!(infer_cell("59999"), OutputCell::Date(_)));
    }

    #[test]
    fn test_plain_numbers() {
        assert_eq!(infer_cell("1"), OutputCell::Number(1.0));
        assert_eq!(infer_cell("-12.75"), OutputCell::Number(-12.75));
        assert_eq!(infer_cell("1e3"), OutputCell::Number(1000.0));
        assert_eq!(infer_cell(" 7 "), OutputCell::Number(7.0));
        assert_eq!(text_of("60000"), "60000");
        assert_eq!(text_of("0.25"), "0.25");
    }

    #[test]
    fn test_non_finite_is_text() {
        assert_eq!(infer_cell("NaN"), OutputCell::Text("NaN".into()));
        assert_eq!(infer_cell("inf"), OutputCell::Text("inf".into()));
    }

    #[test]
    fn test_date_text() {
        assert_eq!(text_of("2024-01-15"), "15-01-2024 00:00:00");
        assert_eq!(text_of("2024-01-15 08:30:05"), "15-01-2024 08:30:05");
        assert_eq!(text_of("2024-01-15T08:30:05.250"), "15-01-2024 08:30:05");
        assert_eq!(text_of("01/15/2024"), "15-01-2024 00:00:00");
        assert_eq!(text_of("01/15/2024 2:05 PM"), "15-01-2024 14:05:00");
        assert_eq!(text_of("15 March 2023"), "15-03-2023 00:00:00");
        assert_eq!(text_of("Mar 15, 2023"), "15-03-2023 00:00:00");
        assert_eq!(text_of("2023-03-15T10:00:00+02:00"), "15-03-2023 10:00:00");
    }

    #[test]
    fn test_text_passthrough() {
        assert_eq!(infer_cell("Alice"), OutputCell::Text("Alice".into()));
        assert_eq!(infer_cell(""), OutputCell::Text(String::new()));
        assert_eq!(infer_cell("13/45/2024"), OutputCell::Text("13/45/2024".into()));
        assert_eq!(infer_cell("1,000"), OutputCell::Text("1,000".into()));
    }

    #[test]
    fn test_serial_to_datetime_epoch() {
        let dt = serial_to_datetime(0.0).unwrap();
        assert_eq!(dt.format(DATE_FORMAT).to_string(), "30-12-1899 00:00:00");
        assert!(serial_to_datetime(f64::NAN).is_none());
    }
}
