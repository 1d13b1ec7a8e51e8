//! Date handling for recordings.
//!
//! Field recorders commonly embed the recording date in the file name
//! (e.g. `Suomenoja_20240517_000000.flac`). When such a date parses, it
//! always overrides the day-of-year supplied via the metadata descriptor.

use chrono::{Datelike, Local, NaiveDate};

/// Extract a day of year from a recording file name, if one is embedded.
///
/// Recognized forms are an eight-digit `YYYYMMDD` run and a dashed
/// `YYYY-MM-DD`, anywhere in the name. Only digit runs that form a real
/// calendar date count; an eight-digit serial number like `99990000`
/// is ignored.
pub fn day_of_year_from_filename(file_name: &str) -> Option<u16> {
    let bytes = file_name.as_bytes();

    // Dashed form first: it is unambiguous when present.
    for start in 0..=bytes.len().saturating_sub(10) {
        // File names may contain multi-byte characters; skip non-boundary
        // offsets instead of slicing blindly.
        let Some(candidate) = file_name.get(start..start + 10) else {
            continue;
        };
        if let Ok(date) = NaiveDate::parse_from_str(candidate, "%Y-%m-%d") {
            return Some(ordinal_u16(&date));
        }
    }

    // Compact form: any 8-digit run that parses as a valid date.
    for start in 0..=bytes.len().saturating_sub(8) {
        let window = &bytes[start..start + 8];
        if !window.iter().all(u8::is_ascii_digit) {
            continue;
        }
        // Skip starts embedded in a longer digit sequence.
        if start > 0 && bytes[start - 1].is_ascii_digit() {
            continue;
        }
        let Some(candidate) = file_name.get(start..start + 8) else {
            continue;
        };
        if let Ok(date) = NaiveDate::parse_from_str(candidate, "%Y%m%d") {
            return Some(ordinal_u16(&date));
        }
    }

    None
}

/// Day of year for today's local date.
pub fn current_day_of_year() -> u16 {
    ordinal_u16(&Local::now().date_naive())
}

#[allow(clippy::cast_possible_truncation)]
fn ordinal_u16(date: &NaiveDate) -> u16 {
    // ordinal() is 1..=366, always within u16.
    date.ordinal() as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_date_in_filename() {
        // 2024-05-17 is day 138 of a leap year.
        assert_eq!(
            day_of_year_from_filename("Suomenoja_20240517_000000.flac"),
            Some(138)
        );
    }

    #[test]
    fn test_dashed_date_in_filename() {
        // 2023-01-31 is day 31.
        assert_eq!(
            day_of_year_from_filename("site-a_2023-01-31_dawn.wav"),
            Some(31)
        );
    }

    #[test]
    fn test_no_date_in_filename() {
        assert_eq!(day_of_year_from_filename("recording.wav"), None);
        assert_eq!(day_of_year_from_filename("meadow_take2.flac"), None);
    }

    #[test]
    fn test_invalid_calendar_date_is_ignored() {
        // Month 99 is not a date, just a serial number.
        assert_eq!(day_of_year_from_filename("unit_19999900.wav"), None);
    }

    #[test]
    fn test_new_year_day() {
        assert_eq!(day_of_year_from_filename("rec_20250101.wav"), Some(1));
    }

    #[test]
    fn test_current_day_of_year_in_range() {
        let day = current_day_of_year();
        assert!((1..=366).contains(&day));
    }
}
