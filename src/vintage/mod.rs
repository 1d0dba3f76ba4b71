//! Vintage credit pools backing the certificate

mod data;
pub mod loader;

pub use data::{
    VintagePool, reference_vintages, reference_vintages_with_prices,
    REFERENCE_LABELS, REFERENCE_PRICES, REFERENCE_PRICE_RANGE, REFERENCE_VOLUME,
};
pub use loader::{load_vintages, load_vintages_from_reader};
