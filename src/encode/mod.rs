// src/encode/mod.rs
pub mod join;

use serde::Serialize;
use std::{cmp::Ordering, collections::HashMap};
use tracing::debug;

use crate::{
    config::{Channels, ChartConfig},
    dataset::{Dataset, Record},
    scale::{Extent, LinearScale, Rgb, SequentialScale, SqrtScale, DEFAULT_DOMAIN},
    tooltip::Tooltip,
};

pub use join::{join, Transition};

/// Tick count used when rounding x/y domains.
pub const NICE_TICKS: usize = 10;

/// Raw `[min, max]` of each channel over the displayed subset, before any rounding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Domains {
    pub x: Extent,
    pub y: Extent,
    pub size: Extent,
    pub color: Extent,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Scales {
    pub x: LinearScale,
    pub y: LinearScale,
    pub r: SqrtScale,
    pub color: SequentialScale,
}

/// One bubble, ready to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    /// Stable identity across years: the country, suffixed `#n` for repeats within a year.
    pub key: String,
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub fill: Rgb,
    pub tooltip: Tooltip,
}

/// Owned, self-contained result for one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub year: i32,
    pub domains: Domains,
    pub scales: Scales,
    /// Draw order: largest population first.
    pub points: Vec<Point>,
}

impl Frame {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Filtered and sorted view of one year plus the scales fitted to it.
#[derive(Debug, Clone)]
pub struct Encoding<'a> {
    pub year: i32,
    pub subset: Vec<&'a Record>,
    pub domains: Domains,
    pub scales: Scales,
    channels: Channels,
    min_radius: f64,
}

/// Row is in `year` and has strictly positive x and y (NaN never passes).
pub fn is_plottable(rec: &Record, year: i32, channels: &Channels) -> bool {
    rec.full_year() == Some(year) && rec.value(&channels.x) > 0.0 && rec.value(&channels.y) > 0.0
}

/// Descending, NaN last.
fn by_size_desc(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        _ => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

/// Filter, sort and fit scales for `year`. Domains come only from that year's rows.
#[tracing::instrument(level = "debug", skip(dataset, config))]
pub fn build_encoding<'a>(dataset: &'a Dataset, year: i32, config: &ChartConfig) -> Encoding<'a> {
    let ch = &config.channels;

    let mut subset: Vec<&Record> = dataset
        .records()
        .iter()
        .filter(|r| is_plottable(r, year, ch))
        .collect();
    subset.sort_by(|a, b| by_size_desc(a.value(&ch.size), b.value(&ch.size)));

    let domains = Domains {
        x: Extent::of(subset.iter().map(|r| r.value(&ch.x))),
        y: Extent::of(subset.iter().map(|r| r.value(&ch.y))),
        size: Extent::of(subset.iter().map(|r| r.value(&ch.size))),
        color: Extent::of(subset.iter().map(|r| r.value(&ch.color))),
    };

    let area = config.plot_area();
    let scales = Scales {
        x: LinearScale::new(domains.x.bounds_or(DEFAULT_DOMAIN), [area.left, area.right])
            .nice(NICE_TICKS),
        y: LinearScale::new(domains.y.bounds_or(DEFAULT_DOMAIN), [area.bottom, area.top])
            .nice(NICE_TICKS),
        r: SqrtScale::new(domains.size.bounds_or(DEFAULT_DOMAIN), config.radius_range),
        color: SequentialScale::new(domains.color.bounds_or(DEFAULT_DOMAIN)),
    };

    debug!(year, kept = subset.len(), "built encoding");

    Encoding {
        year,
        subset,
        domains,
        scales,
        channels: ch.clone(),
        min_radius: config.radius_range[0],
    }
}

impl<'a> Encoding<'a> {
    pub fn x(&self, rec: &Record) -> f64 {
        self.scales.x.apply(rec.value(&self.channels.x))
    }

    pub fn y(&self, rec: &Record) -> f64 {
        self.scales.y.apply(rec.value(&self.channels.y))
    }

    /// Rows with no usable population still get the smallest bubble so they stay hoverable.
    pub fn radius(&self, rec: &Record) -> f64 {
        let r = self.scales.r.apply(rec.value(&self.channels.size));
        if r.is_nan() {
            self.min_radius
        } else {
            r
        }
    }

    pub fn color(&self, rec: &Record) -> Rgb {
        self.scales.color.apply(rec.value(&self.channels.color))
    }

    pub fn tooltip(&self, rec: &Record) -> Tooltip {
        Tooltip::for_record(rec, &self.channels)
    }

    /// Points in draw order with per-year unique keys.
    pub fn points(&self) -> Vec<Point> {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        self.subset
            .iter()
            .map(|rec| {
                let n = seen.entry(rec.country.as_str()).or_insert(0);
                let key = if *n == 0 {
                    rec.country.clone()
                } else {
                    format!("{}#{}", rec.country, n)
                };
                *n += 1;
                Point {
                    key,
                    cx: self.x(rec),
                    cy: self.y(rec),
                    r: self.radius(rec),
                    fill: self.color(rec),
                    tooltip: self.tooltip(rec),
                }
            })
            .collect()
    }

    pub fn frame(&self) -> Frame {
        Frame {
            year: self.year,
            domains: self.domains,
            scales: self.scales,
            points: self.points(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{fields, load_csv, NUMERIC_FIELDS};
    use crate::test_support::init_test_logging;
    use std::io::Cursor;

    const SCENARIO: &str = "Country,Year,log_GDP_Per_Capita,Life_Expectancy,Total_Population,Aggregate_Score
A,2021,1.0,50,100,0.2
B,2021,2.0,70,400,0.9
C,2021,-1.0,60,50,0.5
D,2020,3.0,80,900,0.7
E,2020,0.5,40,10,0.1
F,2020,,55,20,0.3
G,bad,1.5,65,30,0.6
";

    fn scenario() -> Dataset {
        load_csv(Cursor::new(SCENARIO), NUMERIC_FIELDS).unwrap()
    }

    #[test]
    fn three_record_scenario() {
        init_test_logging();
        let data = scenario();
        let cfg = ChartConfig::default();
        let enc = build_encoding(&data, 2021, &cfg);

        let pops: Vec<f64> = enc
            .subset
            .iter()
            .map(|r| r.value(fields::TOTAL_POPULATION))
            .collect();
        assert_eq!(pops, vec![400.0, 100.0]);
        assert_eq!(enc.domains.x, Extent::Range { min: 1.0, max: 2.0 });
        assert_eq!(enc.domains.y, Extent::Range { min: 50.0, max: 70.0 });
        assert_eq!(enc.domains.size, Extent::Range { min: 100.0, max: 400.0 });
        assert_eq!(enc.domains.color, Extent::Range { min: 0.2, max: 0.9 });
        assert_eq!(enc.scales.x.domain(), [1.0, 2.0]);
        assert_eq!(enc.scales.y.domain(), [50.0, 70.0]);
    }

    #[test]
    fn scales_map_onto_plot_area() {
        let data = scenario();
        let cfg = ChartConfig::default();
        let enc = build_encoding(&data, 2021, &cfg);
        let frame = enc.frame();

        let b = &frame.points[0];
        let a = &frame.points[1];
        assert_eq!(b.key, "B");
        assert!((b.cx - 990.0).abs() < 1e-9);
        assert!((b.cy - 10.0).abs() < 1e-9);
        assert!((b.r - 30.0).abs() < 1e-9);
        assert!((a.cx - 20.0).abs() < 1e-9);
        assert!((a.cy - 570.0).abs() < 1e-9);
        assert!((a.r - 2.0).abs() < 1e-9);
        assert_eq!(b.fill.to_string(), "#006837");
        assert_eq!(a.fill.to_string(), "#a50026");
        assert_eq!(a.tooltip.population, "100");
    }

    #[test]
    fn domains_are_local_to_each_year() {
        let data = scenario();
        let cfg = ChartConfig::default();
        let y2020 = build_encoding(&data, 2020, &cfg);
        let y2021 = build_encoding(&data, 2021, &cfg);

        // F has no GDP and is dropped; D and E remain
        assert_eq!(y2020.subset.len(), 2);
        assert_eq!(y2020.domains.x, Extent::Range { min: 0.5, max: 3.0 });
        assert_eq!(y2020.domains.size, Extent::Range { min: 10.0, max: 900.0 });
        assert_ne!(y2020.domains.x, y2021.domains.x);

        // rebuilding 2021 after 2020 gives the same result as before
        let again = build_encoding(&data, 2021, &cfg);
        assert_eq!(again.domains, y2021.domains);
        assert_eq!(again.scales, y2021.scales);
    }

    #[test]
    fn empty_year_is_not_an_error() {
        let data = scenario();
        let cfg = ChartConfig::default();
        let enc = build_encoding(&data, 1990, &cfg);
        assert!(enc.subset.is_empty());
        assert!(enc.domains.x.is_empty());
        assert!(enc.domains.color.is_empty());
        assert_eq!(enc.scales.x.domain(), [0.0, 1.0]);
        assert_eq!(enc.scales.r.domain(), DEFAULT_DOMAIN);
        assert!(enc.frame().is_empty());

        let empty = Dataset::default();
        assert!(build_encoding(&empty, 2021, &cfg).points().is_empty());
    }

    #[test]
    fn filter_is_idempotent_and_sort_non_increasing() {
        let data = scenario();
        let ch = Channels::default();
        for year in [2020, 2021, 1990] {
            let once: Vec<&Record> = data
                .records()
                .iter()
                .filter(|r| is_plottable(r, year, &ch))
                .collect();
            let twice: Vec<&Record> = once
                .iter()
                .copied()
                .filter(|r| is_plottable(r, year, &ch))
                .collect();
            assert_eq!(once.len(), twice.len());

            let enc = build_encoding(&data, year, &ChartConfig::default());
            for w in enc.subset.windows(2) {
                assert!(w[0].value(&ch.size) >= w[1].value(&ch.size));
            }
        }
    }

    #[test]
    fn single_point_year_uses_collapsed_domains() {
        let csv = "Country,Year,log_GDP_Per_Capita,Life_Expectancy,Total_Population,Aggregate_Score\nSolo,2005,2.5,61,1000,0.4\n";
        let data = load_csv(Cursor::new(csv), NUMERIC_FIELDS).unwrap();
        let cfg = ChartConfig::default();
        let frame = build_encoding(&data, 2005, &cfg).frame();
        let p = &frame.points[0];
        assert!((p.cx - 505.0).abs() < 1e-9);
        assert!((p.r - 16.0).abs() < 1e-9);
        assert!(p.cy.is_finite());
    }

    #[test]
    fn nan_population_sorts_last_with_min_radius() {
        let csv = "Country,Year,log_GDP_Per_Capita,Life_Expectancy,Total_Population,Aggregate_Score
Ghost,2010,1.0,50,,0.5
Big,2010,2.0,60,1000,0.6
Small,2010,1.5,55,10,
";
        let data = load_csv(Cursor::new(csv), NUMERIC_FIELDS).unwrap();
        let frame = build_encoding(&data, 2010, &ChartConfig::default()).frame();
        let keys: Vec<&str> = frame.points.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, vec!["Big", "Small", "Ghost"]);
        assert_eq!(frame.points[2].r, 2.0);
        assert_eq!(frame.points[1].fill, crate::scale::color::UNKNOWN);
    }

    #[test]
    fn duplicate_countries_get_distinct_keys() {
        let csv = "Country,Year,log_GDP_Per_Capita,Life_Expectancy,Total_Population,Aggregate_Score
Chad,2010,1.0,50,300,0.5
Chad,2010,2.0,60,200,0.6
Chad,2010,1.5,55,100,0.1
";
        let data = load_csv(Cursor::new(csv), NUMERIC_FIELDS).unwrap();
        let frame = build_encoding(&data, 2010, &ChartConfig::default()).frame();
        let keys: Vec<&str> = frame.points.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, vec!["Chad", "Chad#1", "Chad#2"]);
    }
}
