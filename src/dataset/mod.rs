//! Country dataset wiring.
//!
//! Wraps `data/json/countries.json`: `model` mirrors the record fields,
//! `identity` holds the key and status types, and `CountryIndex` serves the
//! attribute lookups.

pub mod identity;
pub mod index;
pub mod model;

pub use identity::{CountryKey, StatusBasis, StatusLevel};
pub use index::CountryIndex;
pub use model::{CountryRecord, CountryTable, load_country_table};
