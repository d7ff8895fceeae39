// src/stats.rs

use serde::Serialize;
use std::collections::BTreeMap;

use crate::{
    config::ChartConfig,
    dataset::Dataset,
    encode::{build_encoding, Domains},
};

/// Row counts and raw domains for one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearSummary {
    pub year: i32,
    /// Rows carrying this year.
    pub rows: usize,
    /// Rows that survive the positive x/y filter.
    pub plottable: usize,
    pub domains: Domains,
}

/// Per-year summaries in ascending year order, plus the count of rows with no valid year.
pub fn summarize(dataset: &Dataset, config: &ChartConfig) -> (Vec<YearSummary>, usize) {
    let mut rows: BTreeMap<i32, usize> = BTreeMap::new();
    let mut undated = 0usize;
    for rec in dataset.records() {
        match rec.full_year() {
            Some(y) => *rows.entry(y).or_default() += 1,
            None => undated += 1,
        }
    }

    let summaries = rows
        .into_iter()
        .map(|(year, n)| {
            let enc = build_encoding(dataset, year, config);
            YearSummary {
                year,
                rows: n,
                plottable: enc.subset.len(),
                domains: enc.domains,
            }
        })
        .collect();
    (summaries, undated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{load_csv, NUMERIC_FIELDS};
    use crate::scale::Extent;
    use std::io::Cursor;

    #[test]
    fn counts_rows_and_plottable_rows() {
        let csv = "Country,Year,log_GDP_Per_Capita,Life_Expectancy,Total_Population,Aggregate_Score
A,2021,1.0,50,100,0.2
B,2021,2.0,70,400,0.9
C,2021,-1.0,60,50,0.5
D,2019,3.0,80,900,0.7
E,,3.0,80,900,0.7
";
        let data = load_csv(Cursor::new(csv), NUMERIC_FIELDS).unwrap();
        let (summaries, undated) = summarize(&data, &ChartConfig::default());
        assert_eq!(undated, 1);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].year, 2019);
        assert_eq!(summaries[1].rows, 3);
        assert_eq!(summaries[1].plottable, 2);
        assert_eq!(summaries[1].domains.x, Extent::Range { min: 1.0, max: 2.0 });
    }
}
