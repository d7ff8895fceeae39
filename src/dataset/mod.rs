// src/dataset/mod.rs
pub mod fields;
pub mod parse;
pub mod record;

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::{
    collections::{BTreeSet, HashMap},
    fmt,
    fs::File,
    io::{BufReader, Read},
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};
use url::Url;

pub use fields::NUMERIC_FIELDS;
pub use record::Record;

use parse::{coerce_numeric, normalize_country, parse_year};

/// The loaded table. Immutable once built; views are derived per year.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct valid years, ascending. Rows with the invalid-date sentinel are skipped.
    pub fn years(&self) -> Vec<i32> {
        self.records
            .iter()
            .filter_map(Record::full_year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Where the CSV comes from: a local file or an http(s) URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Path(PathBuf),
    Url(Url),
}

impl DataSource {
    /// Anything that parses as an http(s) URL is fetched; everything else is a path.
    pub fn parse(arg: &str) -> Self {
        match Url::parse(arg) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => DataSource::Url(url),
            _ => DataSource::Path(PathBuf::from(arg)),
        }
    }

    pub fn open(&self) -> Result<Box<dyn Read>> {
        match self {
            DataSource::Path(path) => {
                let file = File::open(path)
                    .with_context(|| format!("opening data file {}", path.display()))?;
                Ok(Box::new(BufReader::new(file)))
            }
            DataSource::Url(url) => {
                let resp = reqwest::blocking::get(url.clone())
                    .with_context(|| format!("GET {}", url))?
                    .error_for_status()
                    .with_context(|| format!("fetching {}", url))?;
                Ok(Box::new(resp))
            }
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Path(p) => write!(f, "{}", p.display()),
            DataSource::Url(u) => write!(f, "{}", u),
        }
    }
}

impl From<&Path> for DataSource {
    fn from(path: &Path) -> Self {
        DataSource::Path(path.to_path_buf())
    }
}

/// Build one record from a header → text mapping.
pub fn record_from_row(row: &HashMap<String, String>, numeric_fields: &[&str]) -> Record {
    let numeric = numeric_fields
        .iter()
        .map(|&f| (f.to_string(), coerce_numeric(row.get(f).map(String::as_str))))
        .collect();

    let text = row
        .iter()
        .filter(|(k, _)| {
            k.as_str() != fields::COUNTRY
                && k.as_str() != fields::YEAR
                && !numeric_fields.contains(&k.as_str())
        })
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    Record {
        country: normalize_country(row.get(fields::COUNTRY).map(String::as_str)),
        year: parse_year(row.get(fields::YEAR).map(String::as_str)),
        numeric,
        text,
    }
}

/// Coerce already-split rows into a dataset, preserving row order.
/// Cell problems degrade to sentinels; this never fails.
pub fn load_rows<I>(rows: I, numeric_fields: &[&str]) -> Dataset
where
    I: IntoIterator<Item = HashMap<String, String>>,
{
    let mut records = Vec::new();
    let mut bad_years = 0usize;
    let mut nan_cells = 0usize;

    for row in rows {
        let rec = record_from_row(&row, numeric_fields);
        if rec.year.is_none() {
            bad_years += 1;
        }
        nan_cells += rec.numeric.values().filter(|v| v.is_nan()).count();
        records.push(rec);
    }

    if bad_years > 0 {
        warn!(bad_years, "rows with unparseable Year kept with invalid-date sentinel");
    }
    debug!(rows = records.len(), nan_cells, "coerced rows");

    Dataset { records }
}

/// Read a headed CSV. Only an unreadable source fails the load; nothing partial is returned.
#[tracing::instrument(level = "info", skip(reader, numeric_fields))]
pub fn load_csv<R: Read>(reader: R, numeric_fields: &[&str]) -> Result<Dataset> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // ragged rows: missing trailing cells are simply absent
        .from_reader(reader);

    // cells are decoded lossily; bad bytes become U+FFFD instead of failing the load
    let headers: Vec<String> = rdr
        .byte_headers()
        .context("reading CSV header row")?
        .iter()
        .map(|h| String::from_utf8_lossy(h).trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (idx, result) in rdr.byte_records().enumerate() {
        let record = result.with_context(|| format!("reading CSV record {}", idx))?;
        let row: HashMap<String, String> = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.clone(), String::from_utf8_lossy(v).into_owned()))
            .collect();
        rows.push(row);
    }

    Ok(load_rows(rows, numeric_fields))
}

/// Open `source` and load it as the global health CSV.
pub fn load_source(source: &DataSource, numeric_fields: &[&str]) -> Result<Dataset> {
    info!(%source, "loading dataset");
    let reader = source.open()?;
    let data = load_csv(reader, numeric_fields).with_context(|| format!("loading {}", source))?;
    info!(rows = data.len(), years = data.years().len(), "dataset loaded");
    Ok(data)
}
