//! Effective date resolution for price circulars.
//!
//! A circular states its date as "w.e.f. DD.MM.YYYY" somewhere in the body
//! text; filenames carry a date too ("...-11-july-2025.pdf",
//! "..._11_Jul_25.pdf"). The body marker wins, then the filename, then the
//! current processing date. Resolution never fails.

use chrono::{Local, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // "w.e.f. 11.07.2025" in-text marker
    static ref EFFECTIVE_FROM: Regex =
        Regex::new(r"w\.e\.f\.\s*(\d{1,2})\.(\d{1,2})\.(\d{4})").unwrap();

    // "11-july-2025" / "11-jul-2025" filename fragment (matched lowercased)
    static ref FILENAME_DAY_MONTH_YEAR: Regex =
        Regex::new(r"(\d{1,2})-([a-z]+)-(\d{4})").unwrap();

    // "11_Jul_25" filename fragment
    static ref FILENAME_DAY_MON_YY: Regex =
        Regex::new(r"(\d{1,2})_([A-Za-z]+)_(\d{2})").unwrap();
}

/// Resolve the effective date for one document.
///
/// Priority: in-text marker, then filename, then the current date. Invalid
/// calendar dates (day 32, month 13) are non-matches and fall through.
pub fn resolve_effective_date(text: &str, filename: &str) -> NaiveDate {
    date_from_text(text)
        .or_else(|| date_from_filename(filename))
        .unwrap_or_else(|| Local::now().date_naive())
}

/// Extract the "with effect from" date out of the document body.
pub fn date_from_text(text: &str) -> Option<NaiveDate> {
    let caps = EFFECTIVE_FROM.captures(text)?;
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let year: i32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Extract a date out of a circular filename.
pub fn date_from_filename(filename: &str) -> Option<NaiveDate> {
    let lower = filename.to_lowercase();

    if let Some(caps) = FILENAME_DAY_MONTH_YEAR.captures(&lower) {
        let day = caps[1].parse::<u32>().ok();
        let month = month_number(&caps[2]);
        let year = caps[3].parse::<i32>().ok();
        if let (Some(d), Some(m), Some(y)) = (day, month, year) {
            if let Some(date) = NaiveDate::from_ymd_opt(y, m, d) {
                return Some(date);
            }
        }
    }

    if let Some(caps) = FILENAME_DAY_MON_YY.captures(filename) {
        let day = caps[1].parse::<u32>().ok();
        let month = month_number(&caps[2]);
        let year = caps[3].parse::<i32>().ok().map(widen_year);
        if let (Some(d), Some(m), Some(y)) = (day, month, year) {
            if let Some(date) = NaiveDate::from_ymd_opt(y, m, d) {
                return Some(date);
            }
        }
    }

    None
}

fn widen_year(year: i32) -> i32 {
    // Two-digit year: 2000s for 00-49, 1900s for 50-99
    if year < 50 { 2000 + year } else { 1900 + year }
}

fn month_number(name: &str) -> Option<u32> {
    let number = match name.to_lowercase().as_str() {
        "january" | "jan" => 1,
        "february" | "feb" => 2,
        "march" | "mar" => 3,
        "april" | "apr" => 4,
        "may" => 5,
        "june" | "jun" => 6,
        "july" | "jul" => 7,
        "august" | "aug" => 8,
        "september" | "sep" => 9,
        "october" | "oct" => 10,
        "november" | "nov" => 11,
        "december" | "dec" => 12,
        _ => return None,
    };
    Some(number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_from_text() {
        let text = "Basic prices revised w.e.f. 11.7.2025 as under";
        assert_eq!(
            date_from_text(text),
            Some(NaiveDate::from_ymd_opt(2025, 7, 11).unwrap())
        );
    }

    #[test]
    fn test_invalid_text_date_is_no_match() {
        assert_eq!(date_from_text("w.e.f. 32.13.2025"), None);
    }

    #[test]
    fn test_text_marker_beats_filename() {
        let text = "Prices w.e.f. 4.7.2025";
        let resolved = resolve_effective_date(text, "primary-ready-reckoner-11-july-2025.pdf");
        assert_eq!(resolved, NaiveDate::from_ymd_opt(2025, 7, 4).unwrap());
    }

    #[test]
    fn test_invalid_text_date_falls_to_filename() {
        let resolved =
            resolve_effective_date("w.e.f. 32.13.2025", "primary-ready-reckoner-11-july-2025.pdf");
        assert_eq!(resolved, NaiveDate::from_ymd_opt(2025, 7, 11).unwrap());
    }

    #[test]
    fn test_filename_full_month_name() {
        assert_eq!(
            date_from_filename("primary-ready-reckoner-11-July-2025.pdf"),
            Some(NaiveDate::from_ymd_opt(2025, 7, 11).unwrap())
        );
    }

    #[test]
    fn test_filename_abbreviated_month_name() {
        assert_eq!(
            date_from_filename("primary-ready-reckoner-3-aug-2024.pdf"),
            Some(NaiveDate::from_ymd_opt(2024, 8, 3).unwrap())
        );
    }

    #[test]
    fn test_filename_two_digit_year() {
        assert_eq!(
            date_from_filename("Circular_11_Jul_25.pdf"),
            Some(NaiveDate::from_ymd_opt(2025, 7, 11).unwrap())
        );
        assert_eq!(
            date_from_filename("Circular_11_Jul_99.pdf"),
            Some(NaiveDate::from_ymd_opt(1999, 7, 11).unwrap())
        );
    }

    #[test]
    fn test_filename_invalid_day_is_no_match() {
        assert_eq!(date_from_filename("circular-32-july-2025.pdf"), None);
    }

    #[test]
    fn test_fallback_to_current_date() {
        let resolved = resolve_effective_date("no date here", "circular.pdf");
        assert_eq!(resolved, Local::now().date_naive());
    }
}
