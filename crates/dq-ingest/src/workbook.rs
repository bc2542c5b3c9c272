//! Workbook (`.xlsx`, `.xls`, `.ods`, ...) reading with calamine.
//!
//! Only the first sheet is read. Its first row is the header.

use std::path::Path;

use calamine::{Data, DataType, Range, Reader, open_workbook_auto};
use chrono::{NaiveDateTime, Timelike};

use dq_common::is_missing_token;
use dq_model::{CellValue, Table};

use crate::error::{IngestError, Result};

/// Reads the first sheet of a workbook into a table.
pub fn read_workbook(path: &Path, missing_tokens: &[String]) -> Result<Table> {
    let workbook_error = |message: String| IngestError::Workbook {
        path: path.to_path_buf(),
        message,
    };
    let mut workbook = open_workbook_auto(path).map_err(|e| workbook_error(e.to_string()))?;
    let Some(sheet) = workbook.sheet_names().first().cloned() else {
        return Err(IngestError::NoColumns {
            path: path.to_path_buf(),
        });
    };
    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| workbook_error(e.to_string()))?;
    tracing::debug!(path = %path.display(), sheet = %sheet, "reading sheet");

    range_to_table(&range, missing_tokens)?.ok_or_else(|| IngestError::NoColumns {
        path: path.to_path_buf(),
    })
}

/// Header row plus data rows. `None` when the sheet is empty.
pub fn range_to_table(range: &Range<Data>, missing_tokens: &[String]) -> Result<Option<Table>> {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(None);
    };
    let headers: Vec<String> = header.iter().map(header_name).collect();
    let body: Vec<Vec<CellValue>> = rows
        .map(|row| {
            row.iter()
                .map(|value| data_to_cell(value, missing_tokens))
                .collect()
        })
        .collect();
    Ok(Some(Table::from_rows(headers, body)?))
}

fn header_name(value: &Data) -> String {
    match value {
        Data::Empty => String::new(),
        Data::String(text) => text.trim().to_string(),
        other => other.to_string(),
    }
}

/// Converts one sheet cell. Empty and error cells (`#N/A`, `#DIV/0!`) are
/// missing. Dates become text the classifier can parse.
pub fn data_to_cell(value: &Data, missing_tokens: &[String]) -> CellValue {
    match value {
        Data::Empty | Data::Error(_) => CellValue::Missing,
        Data::String(text) => {
            if is_missing_token(text, missing_tokens) {
                CellValue::Missing
            } else {
                CellValue::text(text.trim())
            }
        }
        Data::Int(number) => CellValue::Number(*number as f64),
        Data::Float(number) => CellValue::from(*number),
        Data::Bool(flag) => CellValue::Boolean(*flag),
        Data::DateTime(_) => match value.as_datetime() {
            Some(datetime) => CellValue::Text(format_datetime(datetime)),
            None => CellValue::text(value.to_string()),
        },
        Data::DateTimeIso(text) | Data::DurationIso(text) => CellValue::text(text.trim()),
    }
}

fn format_datetime(datetime: NaiveDateTime) -> String {
    if datetime.num_seconds_from_midnight() == 0 {
        datetime.format("%Y-%m-%d").to_string()
    } else {
        datetime.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::CellErrorType;

    fn tokens() -> Vec<String> {
        vec!["NA".to_string()]
    }

    #[test]
    fn converts_sheet_cells() {
        let tokens = tokens();
        assert_eq!(data_to_cell(&Data::Empty, &tokens), CellValue::Missing);
        assert_eq!(
            data_to_cell(&Data::Error(CellErrorType::NA), &tokens),
            CellValue::Missing
        );
        assert_eq!(
            data_to_cell(&Data::String(" NA ".to_string()), &tokens),
            CellValue::Missing
        );
        assert_eq!(
            data_to_cell(&Data::String(" Oslo ".to_string()), &tokens),
            CellValue::text("Oslo")
        );
        assert_eq!(data_to_cell(&Data::Int(7), &tokens), CellValue::Number(7.0));
        assert_eq!(
            data_to_cell(&Data::Float(f64::NAN), &tokens),
            CellValue::Missing
        );
        assert_eq!(
            data_to_cell(&Data::Bool(true), &tokens),
            CellValue::Boolean(true)
        );
    }

    #[test]
    fn midnight_datetimes_keep_only_the_date() {
        let midnight = NaiveDateTime::parse_from_str("2024-03-05 00:00:00", "%Y-%m-%d %H:%M:%S")
            .unwrap();
        assert_eq!(format_datetime(midnight), "2024-03-05");
        let later = NaiveDateTime::parse_from_str("2024-03-05 08:30:00", "%Y-%m-%d %H:%M:%S")
            .unwrap();
        assert_eq!(format_datetime(later), "2024-03-05 08:30:00");
    }

    #[test]
    fn first_row_is_the_header() {
        let mut range = Range::new((0, 0), (2, 1));
        range.set_value((0, 0), Data::String("Name".to_string()));
        range.set_value((0, 1), Data::String("Age".to_string()));
        range.set_value((1, 0), Data::String("Ann".to_string()));
        range.set_value((1, 1), Data::Float(30.0));
        range.set_value((2, 0), Data::String("Bo".to_string()));

        let table = range_to_table(&range, &tokens()).unwrap().unwrap();
        assert_eq!(table.column_names(), vec!["Name", "Age"]);
        assert_eq!(
            table.column("Age").unwrap().values,
            vec![CellValue::Number(30.0), CellValue::Missing]
        );
    }

    #[test]
    fn empty_sheet_has_no_table() {
        let range: Range<Data> = Range::empty();
        assert!(range_to_table(&range, &tokens()).unwrap().is_none());
    }
}
