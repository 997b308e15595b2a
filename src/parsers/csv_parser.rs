use std::io::Read;

use crate::{
    NormalizeOptions,
    domain::source_record::{SOURCE_COLUMNS, SourceRecord},
    error::ExtractError,
};

/// Fails with the first required column that the header row doesn't provide. Extra columns are
/// allowed and ignored.
pub fn check_headers(headers: &csv::StringRecord) -> Result<(), ExtractError> {
    match SOURCE_COLUMNS
        .into_iter()
        .find(|column| !headers.iter().any(|header| header == *column))
    {
        Some(column) => Err(ExtractError::MissingColumn(column)),
        None => Ok(()),
    }
}

/// Reads every row of the tabular source, in input order.
///
/// # Errors
///
/// Any unreadable row, a row with a different field count than the header, or a missing
/// required column aborts the whole read. There is no per-row skipping.
pub fn read_source_records<R: Read>(
    reader: R,
    options: &NormalizeOptions,
) -> Result<Vec<SourceRecord>, ExtractError> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .from_reader(reader);

    check_headers(rdr.headers()?)?;

    rdr.deserialize::<SourceRecord>()
        .map(|record| record.map_err(ExtractError::from))
        .collect()
}
