//! Year extraction from ESA CCI LST filenames.

use chrono::{Datelike, NaiveDate};

/// Extract the observation year from a filename carrying a
/// `YYYYMMDD000000` timestamp (an 8-digit calendar date followed by the
/// literal midnight time-of-day used by the yearly products).
///
/// The timestamp may appear anywhere in the name. Returns `None` when no
/// such timestamp exists or the 8-digit prefix is not a real calendar date.
pub fn extract_year(filename: &str) -> Option<i32> {
    let bytes = filename.as_bytes();
    if bytes.len() < 14 {
        return None;
    }

    for start in 0..=bytes.len() - 14 {
        let window = &bytes[start..start + 14];
        if !window.iter().all(u8::is_ascii_digit) {
            continue;
        }
        if &window[8..14] != b"000000" {
            continue;
        }
        // Safe: the window is pure ASCII digits.
        let date = std::str::from_utf8(&window[..8]).ok()?;
        if let Ok(parsed) = NaiveDate::parse_from_str(date, "%Y%m%d") {
            return Some(parsed.year());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_year_from_esa_cci_name() {
        assert_eq!(
            extract_year("ESACCI-LST-L3C-LST-SSMI_SSMIS-20100101000000-fv2.33.nc"),
            Some(2010)
        );
    }

    #[test]
    fn timestamp_position_does_not_matter() {
        assert_eq!(extract_year("20071231000000.nc"), Some(2007));
        assert_eq!(extract_year("prefix-20071231000000"), Some(2007));
    }

    #[test]
    fn rejects_nonzero_time_of_day() {
        assert_eq!(extract_year("ESACCI-LST-20100101120000-fv2.33.nc"), None);
    }

    #[test]
    fn rejects_impossible_calendar_dates() {
        assert_eq!(extract_year("data-20101332000000.nc"), None);
        assert_eq!(extract_year("data-20100230000000.nc"), None);
    }

    #[test]
    fn rejects_names_without_timestamp() {
        assert_eq!(extract_year("readme.nc"), None);
        assert_eq!(extract_year("short"), None);
        assert_eq!(extract_year(""), None);
    }

    #[test]
    fn ignores_shorter_digit_runs() {
        // 4 digits followed by 000000 but no full 8-digit date
        assert_eq!(extract_year("v2010000000x.nc"), None);
    }
}
