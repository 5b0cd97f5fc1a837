//! Adapter for the land ministry's real-transaction open API: raw item
//! schemas, XML parsing, and normalization into [`TransactionRecord`]s.
//!
//! [`TransactionRecord`]: crate::workflows::market::domain::TransactionRecord

mod client;
mod mapping;
pub mod normalizer;
pub mod parser;

pub use client::MolitClient;
pub use normalizer::{normalize, normalize_all};
pub use parser::{LandRow, RawTrade, ResidentialRow};

use crate::workflows::market::domain::PropertyCategory;
use crate::workflows::market::period::YearMonth;
use std::fmt::Debug;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("transaction API request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("transaction API runtime unavailable: {0}")]
    Runtime(String),
    #[error("malformed transaction API response: {0}")]
    Xml(#[from] quick_xml::DeError),
}

/// Provider of raw transaction items for one category and deal month.
///
/// Implementations report failures; callers decide how to absorb them.
pub trait TradeSource: Debug {
    fn fetch(
        &self,
        category: PropertyCategory,
        period: YearMonth,
    ) -> Result<Vec<RawTrade>, SourceError>;
}
