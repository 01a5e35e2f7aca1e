use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use rsi_cycle_core::common::{
    cycle_error::{CycleError, CycleResult, ErrCode},
    enums::DataField,
    time::Time,
};
use rsi_cycle_core::PriceSeries;
use tracing::{debug, info};

const TIME_HEADERS: [&str; 4] = ["date", "datetime", "time", "timestamp"];

type Row = (Option<Time>, f64, f64, f64, f64);

/// Column positions of the fields we read
#[derive(Debug)]
struct Columns {
    time: Option<usize>,
    open: usize,
    high: usize,
    low: usize,
    close: usize,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> CycleResult<Self> {
        let find = |names: &[&str]| {
            headers
                .iter()
                .position(|h| names.iter().any(|n| h.trim().eq_ignore_ascii_case(n)))
        };
        let require = |field: DataField| {
            let name = field.to_string();
            find(&[name.as_str()]).ok_or_else(|| {
                CycleError::new(
                    format!("missing '{}' column in header {:?}", name, headers),
                    ErrCode::SrcDataFormatError,
                )
            })
        };
        Ok(Self {
            time: find(&TIME_HEADERS),
            open: require(DataField::FieldOpen)?,
            high: require(DataField::FieldHigh)?,
            low: require(DataField::FieldLow)?,
            close: require(DataField::FieldClose)?,
        })
    }

    fn parse(&self, line: usize, record: &StringRecord) -> CycleResult<Row> {
        let price = |col: usize, field: DataField| -> CycleResult<f64> {
            let raw = record.get(col).unwrap_or("").trim();
            raw.parse::<f64>().map_err(|_| {
                CycleError::new(
                    format!("line {}: bad {} value '{}'", line, field, raw),
                    ErrCode::SrcDataFormatError,
                )
            })
        };
        let time = match self.time {
            Some(col) => {
                let raw = record.get(col).unwrap_or("");
                let t = raw.parse::<Time>().map_err(|e| {
                    CycleError::new(format!("line {}: {}", line, e.msg), ErrCode::SrcDataFormatError)
                })?;
                Some(t)
            }
            None => None,
        };
        Ok((
            time,
            price(self.open, DataField::FieldOpen)?,
            price(self.high, DataField::FieldHigh)?,
            price(self.low, DataField::FieldLow)?,
            price(self.close, DataField::FieldClose)?,
        ))
    }
}

/// Read OHLC bars from CSV. Rows are sorted by time when a time column
/// exists, otherwise kept in file order.
pub fn read_series<R: Read>(reader: R, autofix: bool) -> CycleResult<PriceSeries> {
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = rdr
        .headers()
        .map_err(|e| CycleError::new(format!("cannot read header: {}", e), ErrCode::SrcDataFormatError))?
        .clone();
    let columns = Columns::from_headers(&headers)?;
    debug!(?columns, "csv columns");

    let mut rows = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| {
            CycleError::new(format!("line {}: {}", i + 2, e), ErrCode::SrcDataFormatError)
        })?;
        if record.iter().all(|f| f.is_empty()) {
            continue;
        }
        rows.push(columns.parse(i + 2, &record)?);
    }

    if columns.time.is_some() {
        rows.sort_by_key(|r| r.0);
    }
    PriceSeries::from_rows(rows, autofix)
}

pub fn load_series(path: &Path, autofix: bool) -> CycleResult<PriceSeries> {
    let file = std::fs::File::open(path).map_err(|e| {
        CycleError::new(format!("cannot open {}: {}", path.display(), e), ErrCode::NoData)
    })?;
    let series = read_series(file, autofix)?;
    info!(path = %path.display(), bars = series.len(), "price series loaded");
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_yahoo_style_export() {
        let data = "\
Date,Open,High,Low,Close,Adj Close,Volume
2024-01-03,101,103,100,102,102,1000
2024-01-02,100,102,99,101,101,1200
2024-01-04,102,104,101,103.5,103.5,900
";
        let s = read_series(data.as_bytes(), false).unwrap();
        assert_eq!(s.len(), 3);
        assert_eq!(s[0].close, 101.0);
        assert_eq!(s[0].time.unwrap().to_date_str(), "20240102");
        assert_eq!(s[2].close, 103.5);
        assert_eq!(s[2].index, 2);
    }

    #[test]
    fn test_without_time_column_keeps_order() {
        let data = "open,high,low,close\n3,3,3,3\n1,1,1,1\n";
        let s = read_series(data.as_bytes(), false).unwrap();
        assert_eq!(s.closes().collect::<Vec<_>>(), vec![3.0, 1.0]);
        assert!(s.first_time().is_none());
    }

    #[test]
    fn test_missing_column() {
        let data = "Date,Open,High,Low\n2024-01-02,1,1,1\n";
        let err = read_series(data.as_bytes(), false).unwrap_err();
        assert_eq!(err.errcode, ErrCode::SrcDataFormatError);
        assert!(err.msg.contains("close"));
    }

    #[test]
    fn test_bad_number_reports_line() {
        let data = "Date,Open,High,Low,Close\n2024-01-02,1,1,1,1\n2024-01-03,1,x,1,1\n";
        let err = read_series(data.as_bytes(), false).unwrap_err();
        assert!(err.msg.starts_with("line 3"));
    }

    #[test]
    fn test_duplicate_time_rejected() {
        let data = "Date,Open,High,Low,Close\n2024-01-02,1,1,1,1\n2024-01-02,1,1,1,1\n";
        let err = read_series(data.as_bytes(), false).unwrap_err();
        assert_eq!(err.errcode, ErrCode::KlNotMonotonous);
    }

    #[test]
    fn test_autofix_envelope() {
        let data = "open,high,low,close\n10,10.5,10.2,11\n";
        assert!(read_series(data.as_bytes(), false).is_err());
        let s = read_series(data.as_bytes(), true).unwrap();
        assert_eq!((s[0].low, s[0].high), (10.0, 11.0));
    }

    #[test]
    fn test_empty_file_gives_empty_series() {
        let s = read_series("Date,Open,High,Low,Close\n".as_bytes(), false).unwrap();
        assert!(s.is_empty());
    }
}
