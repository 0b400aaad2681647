use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parse a date field into a calendar date, trying each format in order.
///
/// Date-time values are truncated to their date part. RFC 3339 values with an
/// offset keep the date as written, the offset is discarded.
pub fn parse_calendar_date<S: AsRef<str>>(value: &str, formats: &[S]) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    for format in formats {
        let format = format.as_ref();
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date);
        }
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
            return Some(datetime.date());
        }
    }

    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.naive_local().date())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::constants::DEFAULT_DATE_FORMATS;

    #[test]
    fn test_equal_dates_in_different_formats() {
        let expected = NaiveDate::from_ymd_opt(2011, 1, 5);

        for value in [
            "2011-01-05",
            "2011/01/05",
            "01/05/2011",
            "05-01-2011",
            "20110105",
            "2011-01-05 00:00",
            "2011-01-05 00:00:00",
            "2011-01-05 00:00:00.000",
            "2011-01-05T13:45:00",
            "2011-01-05T00:00:00.000",
            "2011-01-05T23:00:00+07:00",
            "  2011-01-05 ",
        ] {
            assert_eq!(
                parse_calendar_date(value, DEFAULT_DATE_FORMATS),
                expected,
                "failed for '{}'",
                value
            );
        }
    }

    #[test]
    fn test_unparseable_dates() {
        assert_eq!(parse_calendar_date("", DEFAULT_DATE_FORMATS), None);
        assert_eq!(parse_calendar_date("yesterday", DEFAULT_DATE_FORMATS), None);
        assert_eq!(parse_calendar_date("2011-02-30", DEFAULT_DATE_FORMATS), None);
    }

    #[test]
    fn test_custom_formats() {
        let formats = vec!["%d.%m.%Y".to_string()];
        assert_eq!(
            parse_calendar_date("05.01.2011", &formats),
            NaiveDate::from_ymd_opt(2011, 1, 5)
        );
        assert_eq!(parse_calendar_date("2011-01-05", &formats), None);
    }
}
