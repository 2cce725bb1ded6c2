use std::io::Read;
use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::types::CatalogueRecord;

/// Load the catalogue CSV at `path`.
///
/// Columns are matched by header name (`speaker`, `item`, `media`, `prompt`);
/// any other columns are ignored.
pub fn load(path: &Path) -> Result<Vec<CatalogueRecord>> {
    info!(path = %path.display(), "importing catalogue");
    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    let records = collect(reader)?;
    info!(records = records.len(), "catalogue loaded");
    Ok(records)
}

/// Read catalogue rows from any reader.
pub fn read<R: Read>(input: R) -> Result<Vec<CatalogueRecord>> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input);
    collect(reader)
}

fn collect<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<CatalogueRecord>> {
    let mut records = Vec::new();
    for row in reader.deserialize::<CatalogueRecord>() {
        records.push(row?);
    }
    Ok(records)
}
