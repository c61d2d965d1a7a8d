use crate::domain::model::{HouseRecord, HOUSE_COLUMNS};
use crate::utils::error::{Result, ScrapeError};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Tsv,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Tsv => "tsv",
            OutputFormat::Json => "json",
        }
    }

    pub fn file_name(&self, stem: &str) -> String {
        format!("{}.{}", stem, self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = ScrapeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "tsv" => Ok(OutputFormat::Tsv),
            "json" => Ok(OutputFormat::Json),
            other => Err(ScrapeError::InvalidConfigValueError {
                field: "output_formats".to_string(),
                value: other.to_string(),
                reason: "Unsupported format. Valid formats: csv, tsv, json".to_string(),
            }),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Renders the whole result set in `format`.
///
/// Delimited output always starts with the `name,size,rent,status,city,server`
/// header, even when there are no records, and carries no index column.
pub fn render(records: &[HouseRecord], format: OutputFormat) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Csv => render_delimited(records, b','),
        OutputFormat::Tsv => render_delimited(records, b'\t'),
        OutputFormat::Json => Ok(serde_json::to_vec_pretty(records)?),
    }
}

fn render_delimited(records: &[HouseRecord], delimiter: u8) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(HOUSE_COLUMNS)?;
    for record in records {
        writer.serialize(record)?;
    }

    writer
        .into_inner()
        .map_err(|e| ScrapeError::Io(e.into_error()))
}
