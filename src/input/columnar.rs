//! Parquet site lists
//!
//! Only the domain column is read. String values may be stored either as
//! annotated UTF-8 or as raw byte arrays; nulls become rejected rows.

use super::{site_from_cell, InputError, SiteInput};
use parquet::file::reader::{FileReader, SerializedFileReader};
use parquet::record::Field;
use std::fs::File;
use std::path::Path;

/// Reads the sites of a Parquet file from `column` (case-insensitive)
pub fn parse_parquet_sites(path: &Path, column: &str) -> Result<Vec<SiteInput>, InputError> {
    let reader = SerializedFileReader::new(File::open(path)?)?;

    let names: Vec<String> = reader
        .metadata()
        .file_metadata()
        .schema_descr()
        .columns()
        .iter()
        .map(|c| c.name().to_string())
        .collect();

    let name = names
        .iter()
        .find(|n| n.eq_ignore_ascii_case(column))
        .cloned()
        .ok_or_else(|| InputError::MissingColumn {
            column: column.to_string(),
            found: names.join(", "),
        })?;

    let mut sites = Vec::new();
    for (idx, row) in reader.get_row_iter(None)?.enumerate() {
        let row = row?;
        let value = row
            .get_column_iter()
            .find(|(col, _)| col.as_str() == name)
            .and_then(|(_, field)| field_text(field));

        sites.push(site_from_cell(value.as_deref(), idx + 1));
    }

    Ok(sites)
}

fn field_text(field: &Field) -> Option<String> {
    match field {
        Field::Str(s) => Some(s.clone()),
        Field::Bytes(bytes) => std::str::from_utf8(bytes.data()).ok().map(str::to_string),
        _ => None,
    }
}
