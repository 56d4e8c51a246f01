//! Delimited-text reader for numeric tables.
//!
//! The first record is the header. Lines starting with `#` are comments,
//! fields are trimmed and a leading UTF-8 BOM is dropped. Quoting follows
//! RFC 4180, so a quoted header may contain the delimiter.

use crate::errors::DataError;

pub(super) fn parse(text: &str, delimiter: char) -> Result<(Vec<String>, Vec<Vec<f64>>), DataError> {
    if !delimiter.is_ascii() {
        return Err(DataError::Parse {
            line: 1,
            message: format!("delimiter '{delimiter}' is not a single ASCII character"),
        });
    }

    let mut reader = ::csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .has_headers(true)
        .flexible(true)
        .trim(::csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(text.as_bytes());

    let names: Vec<String> = reader
        .headers()
        .map_err(parse_error)?
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let name = if i == 0 { name.trim_start_matches('\u{feff}') } else { name };
            name.trim().to_string()
        })
        .collect();
    if names.is_empty() {
        return Err(DataError::Empty);
    }

    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); names.len()];
    for result in reader.records() {
        let record = result.map_err(parse_error)?;
        let line = record.position().map_or(0, |p| p.line() as usize);
        if record.len() != names.len() {
            return Err(DataError::Parse {
                line,
                message: format!("expected {} fields, found {}", names.len(), record.len()),
            });
        }
        for ((field, column), name) in record.iter().zip(columns.iter_mut()).zip(&names) {
            let value = field.parse::<f64>().map_err(|_| DataError::Parse {
                line,
                message: format!("invalid number '{field}' in column {name}"),
            })?;
            column.push(value);
        }
    }

    Ok((names, columns))
}

fn parse_error(err: ::csv::Error) -> DataError {
    DataError::Parse {
        line: err.position().map_or(0, |p| p.line() as usize),
        message: err.to_string(),
    }
}
