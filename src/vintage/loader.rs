//! Load vintage pools from CSV
//!
//! Expected header: `Vintage,Volume,Price`

use super::VintagePool;
use crate::config::LoadError;
use csv::Reader;
use std::path::Path;

/// Raw CSV row
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Vintage")]
    vintage: String,
    #[serde(rename = "Volume")]
    volume: f64,
    #[serde(rename = "Price")]
    price: f64,
}

impl CsvRow {
    fn into_pool(self) -> VintagePool {
        VintagePool::new(self.vintage.trim(), self.volume, self.price)
    }
}

/// Load all vintage pools from a CSV file
pub fn load_vintages<P: AsRef<Path>>(path: P) -> Result<Vec<VintagePool>, LoadError> {
    let path = path.as_ref();
    let reader = Reader::from_path(path)?;
    let pools = read_pools(reader)?;
    log::info!("Loaded {} vintages from {}", pools.len(), path.display());
    Ok(pools)
}

/// Load vintage pools from any reader (e.g., string buffer)
pub fn load_vintages_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<VintagePool>, LoadError> {
    read_pools(Reader::from_reader(reader))
}

fn read_pools<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<VintagePool>, LoadError> {
    let mut pools = Vec::new();
    for result in reader.deserialize() {
        let row: CsvRow = result?;
        pools.push(row.into_pool());
    }
    Ok(pools)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_reader() {
        let data = "Vintage,Volume,Price\n2021,250000,4.0\n2022,100000,6.5\n";
        let pools = load_vintages_from_reader(data.as_bytes()).unwrap();
        assert_eq!(pools.len(), 2);
        assert_eq!(pools[1], VintagePool::new("2022", 100_000.0, 6.5));
    }

    #[test]
    fn test_malformed_price_fails() {
        let data = "Vintage,Volume,Price\n2021,250000,cheap\n";
        let err = load_vintages_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Csv(_)));
    }

    #[test]
    fn test_load_reference_file() {
        let pools = load_vintages("data/reference_vintages.csv").expect("Failed to load vintages");
        assert_eq!(pools, crate::vintage::reference_vintages());
    }
}
