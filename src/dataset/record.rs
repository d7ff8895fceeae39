use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use super::parse::full_year;

/// One country-year row with its declared numeric columns coerced.
#[derive(Debug, Clone, Serialize)]
pub struct Record {
    /// Trimmed country name; empty when the cell was absent or blank.
    pub country: String,
    /// Jan 1 of the parsed year, `None` for the invalid-date sentinel.
    pub year: Option<NaiveDate>,
    /// Declared numeric columns. NaN marks a cell that did not coerce.
    pub numeric: BTreeMap<String, f64>,
    /// Every other column, verbatim.
    pub text: BTreeMap<String, String>,
}

impl Record {
    /// Value of a numeric column; undeclared columns read as NaN.
    pub fn value(&self, field: &str) -> f64 {
        self.numeric.get(field).copied().unwrap_or(f64::NAN)
    }

    pub fn full_year(&self) -> Option<i32> {
        full_year(self.year)
    }

    pub fn text(&self, field: &str) -> Option<&str> {
        self.text.get(field).map(String::as_str)
    }
}
