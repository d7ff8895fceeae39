use chrono::{Datelike, NaiveDate};

/// Trim whitespace + strip outer quotes if present.
pub fn clean_str(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
        trimmed[1..trimmed.len() - 1].trim()
    } else {
        trimmed
    }
}

/// Coerce a numeric cell. Empty, non-numeric and non-finite text all become NaN.
pub fn coerce_numeric(raw: Option<&str>) -> f64 {
    let Some(raw) = raw else {
        return f64::NAN;
    };
    match clean_str(raw).parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => f64::NAN,
    }
}

/// Parse a bare `"YYYY"` token into Jan 1 of that year.
/// Anything else (extra characters, signs, fewer digits) is rejected.
pub fn parse_year(raw: Option<&str>) -> Option<NaiveDate> {
    let s = clean_str(raw?);
    if s.len() != 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: i32 = s.parse().ok()?;
    NaiveDate::from_ymd_opt(year, 1, 1)
}

/// Calendar year of a parsed date, for comparisons against slider values.
pub fn full_year(date: Option<NaiveDate>) -> Option<i32> {
    date.map(|d| d.year())
}

/// Country names: absent or blank → empty string, otherwise trimmed.
pub fn normalize_country(raw: Option<&str>) -> String {
    match raw {
        Some(s) => s.trim().to_string(),
        None => String::new(),
    }
}
