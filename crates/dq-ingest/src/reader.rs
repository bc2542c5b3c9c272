//! Spreadsheet loading into a [`Table`].

use std::fs::File;
use std::io::Read;
use std::path::Path;

use polars::prelude::{
    AnyValue, CsvParseOptions, CsvReadOptions, DataFrame, NullValues, PlSmallStr, SerReader,
};

use dq_common::any_to_cell;
use dq_model::{Column, SourceFormat, Table};

use crate::error::{IngestError, Result};
use crate::options::IngestOptions;
use crate::workbook::read_workbook;

fn open_error(path: &Path, err: std::io::Error) -> IngestError {
    if err.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: err,
        }
    }
}

/// Check file size against a limit.
pub fn check_file_size(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| open_error(path, e))?;
    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }
    Ok(())
}

/// Rejects UTF-16 exports, which Polars would read as garbage.
///
/// A UTF-8 BOM is fine.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| open_error(path, e))?;
    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    if bytes_read == 2 {
        if buffer == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        if buffer == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }
    Ok(())
}

/// Reads a CSV file into a Polars DataFrame. Missing tokens load as nulls so
/// that numeric columns keep a numeric dtype.
///
/// When the inferred dtypes do not fit the rest of the file, every column is
/// read again as text; the classifier parses numeric text later.
pub fn read_csv_frame(path: &Path, options: &IngestOptions) -> Result<DataFrame> {
    match read_csv_with_schema_length(path, options, options.infer_schema_length) {
        Ok(df) => Ok(df),
        Err(IngestError::CsvParse { message, .. }) if options.infer_schema_length != Some(0) => {
            tracing::warn!(
                path = %path.display(),
                error = %message,
                "inferred column types did not fit, reading every column as text"
            );
            read_csv_with_schema_length(path, options, Some(0))
        }
        Err(err) => Err(err),
    }
}

fn read_csv_with_schema_length(
    path: &Path,
    options: &IngestOptions,
    infer_schema_length: Option<usize>,
) -> Result<DataFrame> {
    let null_values: Vec<PlSmallStr> = options
        .missing_tokens
        .iter()
        .filter(|token| !token.is_empty())
        .map(|token| PlSmallStr::from(token.as_str()))
        .collect();
    let parse_options = CsvParseOptions::default()
        .with_null_values((!null_values.is_empty()).then_some(NullValues::AllColumns(null_values)));

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(infer_schema_length)
        .with_parse_options(parse_options)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Converts every frame column into a table column, keeping column and row
/// order.
pub fn frame_to_table(df: &DataFrame, missing_tokens: &[String]) -> Result<Table> {
    let height = df.height();
    let mut columns = Vec::with_capacity(df.width());
    for column in df.get_columns() {
        let mut values = Vec::with_capacity(height);
        for row_idx in 0..height {
            let value = column.get(row_idx).unwrap_or(AnyValue::Null);
            values.push(any_to_cell(value, missing_tokens));
        }
        columns.push(Column::new(column.name().to_string(), values));
    }
    Ok(Table::new(columns)?)
}

/// Loads a spreadsheet: workbooks by extension, CSV exports otherwise.
pub fn load_table(path: &Path, options: &IngestOptions) -> Result<Table> {
    check_file_size(path, options.max_file_size)?;
    let format = SourceFormat::from_path(path);
    let table = match format {
        SourceFormat::Workbook => read_workbook(path, &options.missing_tokens)?,
        SourceFormat::Csv => load_csv(path, options)?,
    };
    tracing::info!(
        path = %path.display(),
        format = ?format,
        rows = table.height(),
        columns = table.width(),
        missing_cells = table.missing_cells(),
        "loaded table"
    );
    Ok(table)
}

fn load_csv(path: &Path, options: &IngestOptions) -> Result<Table> {
    validate_encoding(path)?;
    let df = read_csv_frame(path, options)?;
    if df.width() == 0 {
        return Err(IngestError::NoColumns {
            path: path.to_path_buf(),
        });
    }
    frame_to_table(&df, &options.missing_tokens)
}
