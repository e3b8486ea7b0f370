//! Async clients for the routing data source.
//!
//! The [`DataSource`] trait is the seam the rest of the tool depends on; the
//! [`irrexplorer`] module implements it over HTTP. Both operations return
//! pre-computed records and fail with a [`FetchError`] that callers surface as-is.

pub mod irrexplorer;

use std::future::Future;

use thiserror::Error;

use crate::models::{AsnResponse, PrefixData};

/// Why a fetch failed.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Query timed out after {0} seconds. The query might return too many results.")]
    Timeout(u64),

    #[error("HTTP error! status: {0}")]
    Status(u16),

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error(transparent)]
    Transport(reqwest::Error),
}

/// Source of prefix records for ASN and prefix queries.
pub trait DataSource {
    /// Prefixes originated by `asn`, and prefixes overlapping them.
    fn fetch_asn(&self, asn: u32) -> impl Future<Output = Result<AsnResponse, FetchError>> + Send;

    /// Prefix records for an address or CIDR, including covering and covered prefixes.
    fn fetch_prefix(
        &self,
        prefix: &str,
    ) -> impl Future<Output = Result<Vec<PrefixData>, FetchError>> + Send;
}
