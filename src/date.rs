//! Statement date extraction
//!
//! Recovers the calendar date encoded in a statement basename of the form
//! `"Chase <Month> <Day>.pdf"`. The original file set spanned two years and
//! disambiguated them with a trailing `20` on the day token (`"Chase June
//! 1520.pdf"` is June 15 of the earlier year), so year resolution goes
//! through an explicit [`YearWindow`] instead of a hard-coded pair.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

/// Year-resolution strategy for the two-year statement window.
///
/// A day token ending in the literal `20` suffix resolves to `with_suffix`;
/// a plain day token resolves to `without_suffix`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearWindow {
    /// Year assigned when the basename carries the `20` day suffix
    pub with_suffix: i32,
    /// Year assigned otherwise
    pub without_suffix: i32,
}

impl Default for YearWindow {
    fn default() -> Self {
        // The original statement set covered 2020-2021.
        Self {
            with_suffix: 2020,
            without_suffix: 2021,
        }
    }
}

fn statement_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^Chase (\w+) (\d+)\.pdf$").expect("statement pattern is valid")
    })
}

/// Extract the statement date from a basename, or `None` if the name does
/// not match the convention.
///
/// Parse failures (unrecognized pattern, unknown month name, day out of
/// range) all yield `None`; callers warn and skip the file rather than
/// aborting the batch.
///
/// # Example
///
/// ```
/// use statement_tools::date::{extract_statement_date, YearWindow};
/// use chrono::NaiveDate;
///
/// let years = YearWindow::default();
/// assert_eq!(
///     extract_statement_date("Chase March 5.pdf", &years),
///     NaiveDate::from_ymd_opt(2021, 3, 5),
/// );
/// assert_eq!(extract_statement_date("receipt.pdf", &years), None);
/// ```
pub fn extract_statement_date(basename: &str, years: &YearWindow) -> Option<NaiveDate> {
    let captures = statement_pattern().captures(basename)?;
    let month = parse_month(&captures[1])?;
    let (day, year) = split_day_token(&captures[2], years)?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parse a month name (case-insensitive)
///
/// Accepts full English month names plus the abbreviations that appeared in
/// the original statement filenames, including `Sept`.
fn parse_month(name: &str) -> Option<u32> {
    let name = name.to_ascii_lowercase();
    match name.as_str() {
        "january" | "jan" => Some(1),
        "february" | "feb" => Some(2),
        "march" | "mar" => Some(3),
        "april" | "apr" => Some(4),
        "may" => Some(5),
        "june" | "jun" => Some(6),
        "july" | "jul" => Some(7),
        "august" | "aug" => Some(8),
        "september" | "sept" | "sep" => Some(9),
        "october" | "oct" => Some(10),
        "november" | "nov" => Some(11),
        "december" | "dec" => Some(12),
        _ => None,
    }
}

/// Split the day token into a day-of-month and a resolved year.
///
/// A token longer than two digits ending in `20` is a day with the year
/// suffix (`"1520"` is day 15, suffix year). The bare token `"20"` keeps the
/// original reading: day 20 with the suffix year. Anything else is a plain
/// day in the non-suffix year.
fn split_day_token(token: &str, years: &YearWindow) -> Option<(u32, i32)> {
    if token == "20" {
        return Some((20, years.with_suffix));
    }
    if token.len() > 2 && token.ends_with("20") {
        let day = token[..token.len() - 2].parse().ok()?;
        return Some((day, years.with_suffix));
    }
    let day = token.parse().ok()?;
    Some((day, years.without_suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_full_month_name() {
        let years = YearWindow::default();
        assert_eq!(
            extract_statement_date("Chase January 15.pdf", &years),
            Some(ymd(2021, 1, 15)),
        );
        assert_eq!(
            extract_statement_date("Chase November 3.pdf", &years),
            Some(ymd(2021, 11, 3)),
        );
    }

    #[test]
    fn test_abbreviated_month_name() {
        let years = YearWindow::default();
        assert_eq!(
            extract_statement_date("Chase Jan 10.pdf", &years),
            Some(ymd(2021, 1, 10)),
        );
        assert_eq!(
            extract_statement_date("Chase Sept 1.pdf", &years),
            Some(ymd(2021, 9, 1)),
        );
        assert_eq!(
            extract_statement_date("Chase Dec 31.pdf", &years),
            Some(ymd(2021, 12, 31)),
        );
    }

    #[test]
    fn test_year_suffix() {
        let years = YearWindow::default();
        // Day token with trailing "20" resolves to the earlier year
        assert_eq!(
            extract_statement_date("Chase June 1520.pdf", &years),
            Some(ymd(2020, 6, 15)),
        );
        assert_eq!(
            extract_statement_date("Chase April 320.pdf", &years),
            Some(ymd(2020, 4, 3)),
        );
    }

    #[test]
    fn test_bare_day_twenty_takes_suffix_year() {
        // "Chase June 20.pdf" is ambiguous; it keeps the original reading of
        // day 20 in the suffix year.
        let years = YearWindow::default();
        assert_eq!(
            extract_statement_date("Chase June 20.pdf", &years),
            Some(ymd(2020, 6, 20)),
        );
    }

    #[test]
    fn test_year_iff_suffix() {
        // Year is with_suffix exactly when the basename ends in "20.pdf"
        let years = YearWindow::default();
        for (name, expected_year) in [
            ("Chase May 2.pdf", 2021),
            ("Chase May 20.pdf", 2020),
            ("Chase May 220.pdf", 2020),
            ("Chase May 22.pdf", 2021),
        ] {
            let date = extract_statement_date(name, &years).unwrap();
            assert_eq!(
                chrono::Datelike::year(&date),
                expected_year,
                "wrong year for {}",
                name
            );
        }
    }

    #[test]
    fn test_custom_year_window() {
        let years = YearWindow {
            with_suffix: 2019,
            without_suffix: 2022,
        };
        assert_eq!(
            extract_statement_date("Chase July 420.pdf", &years),
            Some(ymd(2019, 7, 4)),
        );
        assert_eq!(
            extract_statement_date("Chase July 4.pdf", &years),
            Some(ymd(2022, 7, 4)),
        );
    }

    #[test]
    fn test_unknown_month() {
        let years = YearWindow::default();
        assert_eq!(extract_statement_date("Chase Smarch 5.pdf", &years), None);
    }

    #[test]
    fn test_invalid_day() {
        let years = YearWindow::default();
        assert_eq!(extract_statement_date("Chase Feb 30.pdf", &years), None);
        assert_eq!(extract_statement_date("Chase June 0.pdf", &years), None);
    }

    #[test]
    fn test_non_matching_names() {
        let years = YearWindow::default();
        assert_eq!(extract_statement_date("receipt.pdf", &years), None);
        assert_eq!(extract_statement_date("Chase.pdf", &years), None);
        assert_eq!(extract_statement_date("Chase June.pdf", &years), None);
        assert_eq!(extract_statement_date("Chase June 5.txt", &years), None);
        // Already-prefixed names do not match the unprefixed convention
        assert_eq!(
            extract_statement_date("01.Chase June 5.pdf", &years),
            None
        );
    }

    #[test]
    fn test_chronological_ordering_across_years() {
        let years = YearWindow::default();
        let dec_2020 = extract_statement_date("Chase Dec 1520.pdf", &years).unwrap();
        let jan_2021 = extract_statement_date("Chase Jan 15.pdf", &years).unwrap();
        assert!(dec_2020 < jan_2021);
    }
}
