// src/tooltip.rs

use serde::Serialize;

use crate::config::Channels;
use crate::dataset::Record;
use crate::numfmt::{fixed, population};

/// Display strings for the hover panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tooltip {
    pub country: String,
    pub gdp: String,
    pub life_expectancy: String,
    pub population: String,
    pub aggregate: String,
}

impl Tooltip {
    pub fn for_record(rec: &Record, channels: &Channels) -> Self {
        Self {
            country: rec.country.clone(),
            gdp: fixed(rec.value(&channels.x), 2),
            life_expectancy: fixed(rec.value(&channels.y), 1),
            population: population(rec.value(&channels.size)),
            aggregate: fixed(rec.value(&channels.color), 2),
        }
    }

    /// Single-line form used for SVG `<title>` elements.
    pub fn summary(&self) -> String {
        format!(
            "{}\nGDP (log): {}\nLife expectancy: {}\nPopulation: {}\nAggregate score: {}",
            self.country, self.gdp, self.life_expectancy, self.population, self.aggregate
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{load_rows, NUMERIC_FIELDS};
    use std::collections::HashMap;

    fn record(cells: &[(&str, &str)]) -> Record {
        let row: HashMap<String, String> = cells
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        load_rows(vec![row], NUMERIC_FIELDS).records()[0].clone()
    }

    #[test]
    fn formats_each_field() {
        let rec = record(&[
            ("Country", " Norway "),
            ("Year", "2021"),
            ("log_GDP_Per_Capita", "11.1234"),
            ("Life_Expectancy", "83.16"),
            ("Total_Population", "5408320"),
            ("Aggregate_Score", "0.8999"),
        ]);
        let tip = Tooltip::for_record(&rec, &Channels::default());
        assert_eq!(
            tip,
            Tooltip {
                country: "Norway".into(),
                gdp: "11.12".into(),
                life_expectancy: "83.2".into(),
                population: "5,408,320".into(),
                aggregate: "0.90".into(),
            }
        );
        assert!(tip.summary().starts_with("Norway\n"));
    }

    #[test]
    fn missing_values_show_nan() {
        let rec = record(&[("Country", "Atlantis"), ("Year", "2021")]);
        let tip = Tooltip::for_record(&rec, &Channels::default());
        assert_eq!(tip.gdp, "NaN");
        assert_eq!(tip.population, "NaN");
    }
}
