use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use returns_significance_core::{InputConfig, ReturnSeries};

use crate::error::SourceReadError;
use crate::record::{is_chronological, ReturnRecord};

/// Header of the returns column when none is configured.
pub const DEFAULT_COLUMN: &str = "return";
/// Header of the optional date column.
pub const DATE_COLUMN: &str = "date";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Delimited text file with a header row and one return per row.
///
/// Header names are matched exactly, after trimming whitespace.
///
/// Expected layout (the `date` column is optional):
/// ```text
/// date,return
/// 2024-01-02,0.02
/// 2024-01-03,-0.01
/// ```
#[derive(Debug, Clone)]
pub struct ReturnsCsvSource {
    path: PathBuf,
    column: String,
    delimiter: u8,
}

impl ReturnsCsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            column: DEFAULT_COLUMN.to_string(),
            delimiter: b',',
        }
    }

    /// Creates a source for `path` using the configured column and delimiter.
    ///
    /// # Errors
    /// Returns [`SourceReadError::InvalidDelimiter`] if the delimiter is not
    /// a single ASCII character.
    pub fn from_config(
        config: &InputConfig,
        path: impl Into<PathBuf>,
    ) -> Result<Self, SourceReadError> {
        let delimiter = Some(config.delimiter)
            .filter(char::is_ascii)
            .and_then(|c| u8::try_from(c).ok())
            .ok_or(SourceReadError::InvalidDelimiter(config.delimiter))?;
        Ok(Self::new(path)
            .with_column(config.column.clone())
            .with_delimiter(delimiter))
    }

    #[must_use]
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = column.into();
        self
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    /// Reads every row of the file.
    ///
    /// # Errors
    /// Returns [`SourceReadError`] if the file cannot be opened or parsed, the
    /// returns column is absent, or a cell in it is empty or not a number.
    pub fn read_records(&self) -> Result<Vec<ReturnRecord>, SourceReadError> {
        let origin = self.path.display().to_string();
        let file = File::open(&self.path).map_err(|source| SourceReadError::Open {
            path: origin.clone(),
            source,
        })?;
        self.read_records_from(file, &origin)
    }

    /// Reads rows from an arbitrary reader; `origin` names it in errors.
    ///
    /// # Errors
    /// Same as [`Self::read_records`], minus the open failure.
    pub fn read_records_from<R: Read>(
        &self,
        reader: R,
        origin: &str,
    ) -> Result<Vec<ReturnRecord>, SourceReadError> {
        let malformed = |source: csv::Error| SourceReadError::Malformed {
            path: origin.to_string(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers().map_err(malformed)?.clone();
        let Some(value_idx) = headers.iter().position(|h| h == self.column) else {
            return Err(SourceReadError::MissingField {
                path: origin.to_string(),
                field: self.column.clone(),
                available: headers.iter().map(str::to_string).collect(),
            });
        };
        let date_idx = headers.iter().position(|h| h == DATE_COLUMN);

        let mut records = Vec::new();
        for (i, result) in reader.records().enumerate() {
            let row = result.map_err(malformed)?;
            // Header is line 1
            let line = row.position().map_or(i as u64 + 2, csv::Position::line);

            let raw = row.get(value_idx).unwrap_or_default();
            if raw.is_empty() {
                return Err(SourceReadError::MissingValue {
                    path: origin.to_string(),
                    line,
                    field: self.column.clone(),
                });
            }
            let value: f64 = raw.parse().map_err(|_| SourceReadError::InvalidValue {
                path: origin.to_string(),
                line,
                field: self.column.clone(),
                value: raw.to_string(),
            })?;

            let date = date_idx
                .and_then(|idx| row.get(idx))
                .and_then(|s| NaiveDate::parse_from_str(s, DATE_FORMAT).ok());

            records.push(ReturnRecord { line, date, value });
        }

        tracing::debug!("Read {} return rows from {}", records.len(), origin);

        if date_idx.is_some() && !is_chronological(&records) {
            tracing::warn!("Rows in {} are not in chronological order", origin);
        }

        Ok(records)
    }

    /// Reads the file and returns the values of the returns column in row order.
    ///
    /// # Errors
    /// See [`Self::read_records`].
    pub fn load_series(&self) -> Result<ReturnSeries, SourceReadError> {
        let records = self.read_records()?;
        Ok(records.into_iter().map(|r| r.value).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn capture_warnings<T>(f: impl FnOnce() -> T) -> (T, String) {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();
        let out = tracing::subscriber::with_default(subscriber, f);
        let logs = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        (out, logs)
    }

    fn read(source: &ReturnsCsvSource, text: &str) -> Result<Vec<ReturnRecord>, SourceReadError> {
        source.read_records_from(text.as_bytes(), "test.csv")
    }

    fn values(records: &[ReturnRecord]) -> Vec<f64> {
        records.iter().map(|r| r.value).collect()
    }

    #[test]
    fn reads_single_return_column() {
        let source = ReturnsCsvSource::new("unused.csv");

        let records = read(&source, "return\n0.02\n-0.01\n0.015\n").unwrap();

        assert_eq!(values(&records), vec![0.02, -0.01, 0.015]);
        assert_eq!(records[0].line, 2);
        assert_eq!(records[2].line, 4);
        assert!(records.iter().all(|r| r.date.is_none()));
    }

    #[test]
    fn selects_named_column_among_others() {
        let source = ReturnsCsvSource::new("unused.csv");

        let records = read(&source, "date,ticker,return\n2024-01-02,ABC,0.01\n2024-01-03,ABC,-0.02\n")
            .unwrap();

        assert_eq!(values(&records), vec![0.01, -0.02]);
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2024, 1, 2));
        assert_eq!(records[1].date, NaiveDate::from_ymd_opt(2024, 1, 3));
    }

    #[test]
    fn trims_whitespace_around_headers_and_values() {
        let source = ReturnsCsvSource::new("unused.csv");

        let records = read(&source, " return \n 0.5 \n-0.25\n").unwrap();

        assert_eq!(values(&records), vec![0.5, -0.25]);
    }

    #[test]
    fn unparsable_dates_are_ignored() {
        let source = ReturnsCsvSource::new("unused.csv");

        let records = read(&source, "date,return\n01/02/2024,0.01\n").unwrap();

        assert_eq!(records[0].date, None);
        assert_eq!(records[0].value, 0.01);
    }

    #[test]
    fn out_of_order_dates_warn() {
        let source = ReturnsCsvSource::new("unused.csv");

        let (records, logs) = capture_warnings(|| {
            read(&source, "date,return\n2024-01-03,0.01\n2024-01-02,0.02\n")
        });

        assert_eq!(records.unwrap().len(), 2);
        assert!(logs.contains("not in chronological order"), "logs: {logs}");
    }

    #[test]
    fn ordered_dates_do_not_warn() {
        let source = ReturnsCsvSource::new("unused.csv");

        let (records, logs) = capture_warnings(|| {
            read(&source, "date,return\n2024-01-02,0.01\n2024-01-03,0.02\n")
        });

        assert!(records.is_ok());
        assert!(logs.is_empty(), "logs: {logs}");
    }

    #[test]
    fn custom_column_and_delimiter() {
        let source = ReturnsCsvSource::new("unused.csv")
            .with_column("net")
            .with_delimiter(b';');

        let records = read(&source, "date;net\n2024-01-02;0.03\n2024-01-03;0.04\n").unwrap();

        assert_eq!(values(&records), vec![0.03, 0.04]);
    }

    #[test]
    fn from_config_uses_configured_column() {
        let config = InputConfig {
            path: "ignored.csv".to_string(),
            column: "pnl".to_string(),
            delimiter: '\t',
        };
        let source = ReturnsCsvSource::from_config(&config, "returns.tsv").unwrap();

        assert_eq!(source.column(), "pnl");
        assert_eq!(source.path(), Path::new("returns.tsv"));
        let records = read(&source, "pnl\tdate\n0.1\t2024-01-02\n").unwrap();
        assert_eq!(values(&records), vec![0.1]);
    }

    #[test]
    fn from_config_rejects_multibyte_delimiter() {
        let config = InputConfig {
            delimiter: '€',
            ..InputConfig::default()
        };

        let err = ReturnsCsvSource::from_config(&config, "returns.csv").unwrap_err();

        assert!(matches!(err, SourceReadError::InvalidDelimiter('€')));
    }

    #[test]
    fn header_names_are_case_sensitive() {
        let source = ReturnsCsvSource::new("unused.csv");

        let err = read(&source, "Date,Return\n2024-01-02,0.01\n").unwrap_err();
        assert!(matches!(err, SourceReadError::MissingField { .. }));

        let records = read(&source, "Date,return\n2024-01-02,0.01\n").unwrap();
        assert_eq!(records[0].date, None);
    }

    #[test]
    fn missing_column_fails_with_available_headers() {
        let source = ReturnsCsvSource::new("unused.csv");

        let err = read(&source, "date,pnl\n2024-01-02,0.01\n").unwrap_err();

        match err {
            SourceReadError::MissingField {
                field, available, ..
            } => {
                assert_eq!(field, "return");
                assert_eq!(available, vec!["date".to_string(), "pnl".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_input_has_no_return_column() {
        let source = ReturnsCsvSource::new("unused.csv");

        let err = read(&source, "").unwrap_err();

        assert!(matches!(err, SourceReadError::MissingField { .. }));
    }

    #[test]
    fn header_only_yields_no_records() {
        let source = ReturnsCsvSource::new("unused.csv");

        let records = read(&source, "return\n").unwrap();

        assert!(records.is_empty());
    }

    #[test]
    fn empty_cell_is_missing_value() {
        let source = ReturnsCsvSource::new("unused.csv");

        let err = read(&source, "date,return\n2024-01-02,0.01\n2024-01-03,\n").unwrap_err();

        match err {
            SourceReadError::MissingValue { line, field, .. } => {
                assert_eq!(line, 3);
                assert_eq!(field, "return");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_numeric_cell_is_invalid_value() {
        let source = ReturnsCsvSource::new("unused.csv");

        let err = read(&source, "return\n0.01\nabc\n").unwrap_err();

        match err {
            SourceReadError::InvalidValue { line, value, .. } => {
                assert_eq!(line, 3);
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn nan_text_parses_as_number() {
        let source = ReturnsCsvSource::new("unused.csv");

        let records = read(&source, "return\nNaN\n0.01\n").unwrap();

        assert!(records[0].value.is_nan());
    }

    #[test]
    fn ragged_row_is_malformed() {
        let source = ReturnsCsvSource::new("unused.csv");

        let err = read(&source, "date,return\n2024-01-02,0.01,extra\n").unwrap_err();

        assert!(matches!(err, SourceReadError::Malformed { .. }));
    }

    #[test]
    fn load_series_reads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "return").unwrap();
        writeln!(file, "0.02").unwrap();
        writeln!(file, "-0.01").unwrap();
        file.flush().unwrap();

        let series = ReturnsCsvSource::new(file.path()).load_series().unwrap();

        assert_eq!(series.as_slice(), &[0.02, -0.01]);
    }

    #[test]
    fn missing_file_fails_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let source = ReturnsCsvSource::new(dir.path().join("does_not_exist.csv"));

        let err = source.load_series().unwrap_err();

        assert!(matches!(err, SourceReadError::Open { .. }));
    }
}
