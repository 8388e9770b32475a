// Display formatting and lenient parsing helpers for the dashboard.
// Every function here is total: bad input comes back as a fallback value
// (empty string, the original input, or None), never as a panic.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;
use uuid::Uuid;

/// Currency symbol for all monetary display output.
pub const RUPEE: &str = "₹";

/// Strict date-only layout accepted by the display formatters.
static ISO_DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("hard-coded pattern"));

// Module for Indian number formatting, mirroring the en-IN convention the
// dashboard displays: rupee amounts with two decimals and lakh/crore digit
// grouping (last three digits, then groups of two).
pub mod indian_format {
    use anyhow::{anyhow, bail, Result};

    /// Formats a number with two decimals and Indian digit grouping, keeping
    /// the sign: `1234567.89` -> `"12,34,567.89"`, `-1500.0` -> `"-1,500.00"`.
    ///
    /// Non-finite input is rendered as zero rather than leaking `NaN`/`inf`
    /// into display strings.
    pub fn format_grouped(value: f64) -> String {
        let amount = if value.is_finite() { value } else { 0.0 };
        // Round to paise first so -0.001 does not come out as "-0.00".
        let rounded = (amount * 100.0).round() / 100.0;
        let digits = format!("{:.2}", rounded.abs());
        let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

        let grouped = group_digits(int_part);
        if rounded < 0.0 {
            format!("-{grouped}.{frac_part}")
        } else {
            format!("{grouped}.{frac_part}")
        }
    }

    /// Parses a monetary CSV field leniently: strips the rupee symbol,
    /// grouping commas, and stray whitespace; a parenthesized value is
    /// negative (`"(1,500.00)"` -> `-1500.0`).
    pub fn parse_amount(s: &str) -> Result<f64> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            bail!("empty amount field");
        }

        let (negative, body) = match trimmed.strip_prefix('(').and_then(|b| b.strip_suffix(')')) {
            Some(inner) => (true, inner),
            None => (false, trimmed),
        };

        let cleaned: String = body
            .chars()
            .filter(|c| !matches!(c, ',' | '₹') && !c.is_whitespace())
            .collect();

        let value: f64 = cleaned
            .parse()
            .map_err(|e| anyhow!("failed to parse amount '{}': {}", s, e))?;

        Ok(if negative { -value } else { value })
    }

    // Last three digits stay together, everything above groups in twos.
    fn group_digits(int_part: &str) -> String {
        if int_part.len() <= 3 {
            return int_part.to_string();
        }
        let (head, tail) = int_part.split_at(int_part.len() - 3);

        let mut groups: Vec<&str> = Vec::new();
        let mut rest = head;
        while rest.len() > 2 {
            let (upper, pair) = rest.split_at(rest.len() - 2);
            groups.push(pair);
            rest = upper;
        }
        if !rest.is_empty() {
            groups.push(rest);
        }
        groups.reverse();

        format!("{},{}", groups.join(","), tail)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn groups_below_thousand_unchanged() {
            assert_eq!(format_grouped(0.0), "0.00");
            assert_eq!(format_grouped(999.0), "999.00");
        }

        #[test]
        fn groups_lakhs_and_crores() {
            assert_eq!(format_grouped(1234.5), "1,234.50");
            assert_eq!(format_grouped(123456.0), "1,23,456.00");
            assert_eq!(format_grouped(1234567.89), "12,34,567.89");
            assert_eq!(format_grouped(123456789.0), "12,34,56,789.00");
        }

        #[test]
        fn keeps_sign_and_rounds_paise() {
            assert_eq!(format_grouped(-1500.0), "-1,500.00");
            assert_eq!(format_grouped(-0.001), "0.00");
            assert_eq!(format_grouped(2.345), "2.35");
        }

        #[test]
        fn non_finite_renders_as_zero() {
            assert_eq!(format_grouped(f64::NAN), "0.00");
            assert_eq!(format_grouped(f64::INFINITY), "0.00");
        }

        #[test]
        fn parse_amount_strips_symbol_and_commas() {
            assert_eq!(parse_amount("1,23,456.78").unwrap(), 123456.78);
            assert_eq!(parse_amount("₹1,500.00").unwrap(), 1500.0);
            assert_eq!(parse_amount(" 42 ").unwrap(), 42.0);
        }

        #[test]
        fn parse_amount_handles_signs() {
            assert_eq!(parse_amount("-250.5").unwrap(), -250.5);
            assert_eq!(parse_amount("(1,500.00)").unwrap(), -1500.0);
        }

        #[test]
        fn parse_amount_rejects_garbage() {
            assert!(parse_amount("").is_err());
            assert!(parse_amount("ten rupees").is_err());
        }
    }
}

/// Returns a fresh v4 UUID string: 36 characters, hyphenated, version
/// nibble `4`, variant nibble in `8..=b`.
pub fn generate_uuid() -> String {
    Uuid::new_v4().to_string()
}

/// Formats an amount using the fixed en-IN currency convention; a missing
/// amount is treated as zero. `Some(1234567.89)` -> `"₹12,34,567.89"`,
/// negative amounts put the minus ahead of the symbol (`"-₹42.00"`).
pub fn format_currency(value: Option<f64>) -> String {
    let grouped = indian_format::format_grouped(value.unwrap_or(0.0));
    match grouped.strip_prefix('-') {
        Some(rest) => format!("-{RUPEE}{rest}"),
        None => format!("{RUPEE}{grouped}"),
    }
}

/// Formats an amount in compact form: magnitudes of a million and above as
/// `"₹1.5M"`, a thousand and above as `"₹2.5K"`, everything else rounded to
/// whole rupees. The magnitude test uses the absolute value, so the sign
/// rides through the division: `-2500.0` -> `"₹-2.5K"`.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return format!("{RUPEE}0");
    }
    let abs = value.abs();
    if abs >= 1_000_000.0 {
        format!("{RUPEE}{:.1}M", value / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{RUPEE}{:.1}K", value / 1_000.0)
    } else {
        format!("{RUPEE}{}", value.round() as i64)
    }
}

/// Formats an ISO-like date string as `"15 January 2024"`, optionally with a
/// 24-hour time appended (`"15 January 2024, 10:30"`). Empty input renders
/// as `"-"`; unparseable input is returned unchanged.
pub fn format_date(date_string: &str, include_time: bool) -> String {
    if date_string.is_empty() {
        return "-".to_string();
    }
    match parse_iso_datetime(date_string) {
        Some(dt) => {
            if include_time {
                format!("{} {}", dt.day(), dt.format("%B %Y, %H:%M"))
            } else {
                format!("{} {}", dt.day(), dt.format("%B %Y"))
            }
        }
        None => date_string.to_string(),
    }
}

/// Formats an ISO-like date string as zero-padded `"DD-MM-YYYY"`. Empty in,
/// empty out; unparseable input is returned unchanged.
pub fn format_date_dd_mm_yyyy(date_string: &str) -> String {
    if date_string.is_empty() {
        return String::new();
    }
    match parse_iso_datetime(date_string) {
        Some(dt) => dt.format("%d-%m-%Y").to_string(),
        None => date_string.to_string(),
    }
}

/// Rearranges a `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SS` string to
/// `"DD-MM-YYYY"` for display. The check is a pattern check only; input not
/// matching the strict layout is returned unchanged, empty input stays empty.
pub fn format_date_for_display(date_string: &str) -> String {
    if date_string.is_empty() {
        return String::new();
    }
    match split_strict_date(date_string) {
        Some((year, month, day)) => format!("{day}-{month}-{year}"),
        None => date_string.to_string(),
    }
}

/// Same extraction as [`format_date_for_display`] but compact for statement
/// rows: `"2024-01-15"` -> `"15/01/24"` (two-digit year).
pub fn format_date_compact(date_string: &str) -> String {
    if date_string.is_empty() {
        return String::new();
    }
    match split_strict_date(date_string) {
        Some((year, month, day)) => format!("{day}/{month}/{}", &year[2..]),
        None => date_string.to_string(),
    }
}

/// Lenient date parser for statement CSV fields. Accepts `DD-MM-YYYY`,
/// `YYYY-MM-DD`, `DD/MM/YYYY`, and a small set of fallback layouts; segment
/// lengths disambiguate the hyphenated forms. Returns `None` for
/// empty/whitespace input and for anything unrecognized or out of calendar
/// range, logging a warning instead of failing the whole import.
pub fn parse_csv_date(date_string: &str) -> Option<NaiveDate> {
    let trimmed = date_string.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.contains('-') {
        let parts: Vec<&str> = trimmed.split('-').collect();
        if parts.len() == 3 {
            let lens = (parts[0].len(), parts[1].len(), parts[2].len());
            if lens == (2, 2, 4) {
                return date_from_segments(parts[2], parts[1], parts[0], trimmed);
            }
            if lens == (4, 2, 2) {
                return date_from_segments(parts[0], parts[1], parts[2], trimmed);
            }
        }
    }

    if trimmed.contains('/') {
        let parts: Vec<&str> = trimmed.split('/').collect();
        if parts.len() == 3 && (parts[0].len(), parts[1].len(), parts[2].len()) == (2, 2, 4) {
            return date_from_segments(parts[2], parts[1], parts[0], trimmed);
        }
    }

    fallback_parse(trimmed)
}

// Shared by the two rearranging formatters: strips a time suffix, then
// demands the strict YYYY-MM-DD pattern before slicing the segments.
fn split_strict_date(date_string: &str) -> Option<(&str, &str, &str)> {
    let date_part = date_string
        .split_once('T')
        .map(|(date, _time)| date)
        .unwrap_or(date_string);

    if !ISO_DATE_PATTERN.is_match(date_part) {
        return None;
    }
    Some((&date_part[0..4], &date_part[5..7], &date_part[8..10]))
}

fn date_from_segments(year: &str, month: &str, day: &str, raw: &str) -> Option<NaiveDate> {
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    let day: u32 = day.parse().ok()?;

    let date = NaiveDate::from_ymd_opt(year, month, day);
    if date.is_none() {
        warn!(input = %raw, "date out of calendar range");
    }
    date
}

fn fallback_parse(raw: &str) -> Option<NaiveDate> {
    if let Some(dt) = parse_iso_datetime(raw) {
        return Some(dt.date());
    }
    // Single-digit day/month variants plus the spelled-out layouts a pasted
    // statement occasionally carries.
    const LAYOUTS: [&str; 4] = ["%d/%m/%Y", "%d-%m-%Y", "%B %d, %Y", "%b %d, %Y"];
    for layout in LAYOUTS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, layout) {
            return Some(date);
        }
    }
    warn!(input = %raw, "unrecognized date layout");
    None
}

// ISO-like parse shared by the display formatters: datetime with or without
// fraction or offset, then date-only.
fn parse_iso_datetime(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_has_v4_structure() {
        let id = generate_uuid();
        assert_eq!(id.len(), 36);

        let bytes: Vec<char> = id.chars().collect();
        assert_eq!(bytes[8], '-');
        assert_eq!(bytes[13], '-');
        assert_eq!(bytes[18], '-');
        assert_eq!(bytes[23], '-');
        // Version nibble is fixed at 4, variant nibble is 8..=b.
        assert_eq!(bytes[14], '4');
        assert!(matches!(bytes[19], '8' | '9' | 'a' | 'b'));
    }

    #[test]
    fn uuid_calls_differ() {
        assert_ne!(generate_uuid(), generate_uuid());
    }

    #[test]
    fn currency_treats_missing_as_zero() {
        assert_eq!(format_currency(None), "₹0.00");
        assert_eq!(format_currency(Some(0.0)), "₹0.00");
    }

    #[test]
    fn currency_uses_indian_grouping() {
        assert_eq!(format_currency(Some(100.0)), "₹100.00");
        assert_eq!(format_currency(Some(123456.0)), "₹1,23,456.00");
        assert_eq!(format_currency(Some(1234567.89)), "₹12,34,567.89");
    }

    #[test]
    fn currency_negative_puts_minus_first() {
        assert_eq!(format_currency(Some(-42.0)), "-₹42.00");
        assert_eq!(format_currency(Some(-123456.0)), "-₹1,23,456.00");
    }

    #[test]
    fn amount_compacts_by_magnitude() {
        assert_eq!(format_amount(1_500_000.0), "₹1.5M");
        assert_eq!(format_amount(2_500.0), "₹2.5K");
        assert_eq!(format_amount(42.0), "₹42");
    }

    #[test]
    fn amount_magnitude_uses_absolute_value() {
        assert_eq!(format_amount(-2_500.0), "₹-2.5K");
        assert_eq!(format_amount(-1_500_000.0), "₹-1.5M");
        assert_eq!(format_amount(-42.0), "₹-42");
    }

    #[test]
    fn amount_boundaries() {
        assert_eq!(format_amount(999.0), "₹999");
        assert_eq!(format_amount(1_000.0), "₹1.0K");
        assert_eq!(format_amount(1_000_000.0), "₹1.0M");
    }

    #[test]
    fn long_date_formats_day_month_year() {
        assert_eq!(format_date("2024-01-15", false), "15 January 2024");
        assert_eq!(format_date("2024-01-15T10:30:00", true), "15 January 2024, 10:30");
        assert_eq!(format_date("", false), "-");
        assert_eq!(format_date("not-a-date", false), "not-a-date");
    }

    #[test]
    fn dd_mm_yyyy_zero_pads() {
        assert_eq!(format_date_dd_mm_yyyy("2024-01-05"), "05-01-2024");
        assert_eq!(format_date_dd_mm_yyyy("2024-01-15T10:30:00"), "15-01-2024");
        assert_eq!(format_date_dd_mm_yyyy(""), "");
        assert_eq!(format_date_dd_mm_yyyy("garbage"), "garbage");
    }

    #[test]
    fn display_date_rearranges_strict_layout() {
        assert_eq!(format_date_for_display("2024-01-15"), "15-01-2024");
        assert_eq!(format_date_for_display("2024-01-15T10:30:00"), "15-01-2024");
        assert_eq!(format_date_for_display("not-a-date"), "not-a-date");
        assert_eq!(format_date_for_display(""), "");
    }

    #[test]
    fn display_date_check_is_pattern_only() {
        // Matches the original behavior: the layout is validated, the
        // calendar is not.
        assert_eq!(format_date_for_display("2024-99-99"), "99-99-2024");
        assert_eq!(format_date_for_display("2024-1-15"), "2024-1-15");
    }

    #[test]
    fn compact_date_uses_two_digit_year() {
        assert_eq!(format_date_compact("2024-01-15"), "15/01/24");
        assert_eq!(format_date_compact("2024-01-15T10:30:00"), "15/01/24");
        assert_eq!(format_date_compact("15-01-2024"), "15-01-2024");
        assert_eq!(format_date_compact(""), "");
    }

    #[test]
    fn csv_date_accepts_both_hyphen_orders() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(parse_csv_date("15-01-2024"), Some(expected));
        assert_eq!(parse_csv_date("2024-01-15"), Some(expected));
    }

    #[test]
    fn csv_date_accepts_slashes() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(parse_csv_date("15/01/2024"), Some(expected));
    }

    #[test]
    fn csv_date_trims_whitespace() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(parse_csv_date("  2024-01-15  "), Some(expected));
    }

    #[test]
    fn csv_date_rejects_empty_and_garbage() {
        assert_eq!(parse_csv_date(""), None);
        assert_eq!(parse_csv_date("   "), None);
        assert_eq!(parse_csv_date("garbage!!"), None);
    }

    #[test]
    fn csv_date_rejects_out_of_range_instead_of_rolling_over() {
        assert_eq!(parse_csv_date("32-01-2024"), None);
        assert_eq!(parse_csv_date("2024-13-01"), None);
    }

    #[test]
    fn csv_date_fallback_layouts() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(parse_csv_date("January 15, 2024"), Some(expected));
        assert_eq!(parse_csv_date("2024-01-15T10:30:00"), Some(expected));
        // Single-digit segments miss the strict length check but the
        // fallback still reads them.
        assert_eq!(parse_csv_date("5/1/2024"), Some(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()));
    }
}
