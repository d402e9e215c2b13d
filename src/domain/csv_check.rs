//! Offline inspection of a price CSV before upload.
//!
//! The backtest service rejects files without the OHLCV columns below. This
//! check is advisory and never blocks a submission.

pub const REQUIRED_COLUMNS: [&str; 6] = ["Date", "Open", "High", "Low", "Close", "Volume"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvSummary {
    pub columns: Vec<String>,
    pub rows: usize,
    pub missing: Vec<&'static str>,
}

impl CsvSummary {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Read the header and count data rows. Column names are matched exactly.
pub fn inspect_csv(content: &[u8]) -> Result<CsvSummary, csv::Error> {
    let mut rdr = csv::Reader::from_reader(content);
    let columns: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();

    let mut rows = 0;
    for record in rdr.records() {
        record?;
        rows += 1;
    }

    let missing = REQUIRED_COLUMNS
        .into_iter()
        .filter(|required| !columns.iter().any(|c| c == required))
        .collect();

    Ok(CsvSummary {
        columns,
        rows,
        missing,
    })
}
