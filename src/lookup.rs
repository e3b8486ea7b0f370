use thiserror::Error;

use crate::input::classifier::{classify, InputKind};
use crate::models::PrefixData;
use crate::registry::{DataSource, FetchError};

pub const INVALID_INPUT_MESSAGE: &str = "Invalid input. Please enter a valid ASN (AS12345), IPv4 (1.1.1.1), IPv6 (2001:db8::1), or CIDR (1.1.1.0/24)";

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("{}", INVALID_INPUT_MESSAGE)]
    InvalidInput,

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Resolve one query string to the prefix records the data source knows about.
///
/// ASN queries return directly originated prefixes followed by overlapping ones.
pub async fn lookup<S: DataSource>(source: &S, input: &str) -> Result<Vec<PrefixData>, LookupError> {
    let query = input.trim();

    match classify(query) {
        InputKind::Asn(asn) => {
            let response = source.fetch_asn(asn).await?;
            let mut records = response.direct_origin;
            records.extend(response.overlaps);
            Ok(records)
        }
        InputKind::Ipv4 | InputKind::Ipv6 => Ok(source.fetch_prefix(query).await?),
        InputKind::Invalid => Err(LookupError::InvalidInput),
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use crate::models::{AsnResponse, PrefixData};
    use crate::registry::{DataSource, FetchError};

    /// In-memory data source; records every call it receives.
    #[derive(Default)]
    pub(crate) struct FakeSource {
        pub(crate) asns: HashMap<u32, AsnResponse>,
        pub(crate) prefixes: HashMap<String, Vec<PrefixData>>,
        pub(crate) timeouts: Vec<String>,
        pub(crate) calls: Mutex<Vec<String>>,
    }

    impl DataSource for FakeSource {
        async fn fetch_asn(&self, asn: u32) -> Result<AsnResponse, FetchError> {
            self.calls.lock().unwrap().push(format!("AS{}", asn));
            Ok(self.asns.get(&asn).cloned().unwrap_or_default())
        }

        async fn fetch_prefix(&self, prefix: &str) -> Result<Vec<PrefixData>, FetchError> {
            self.calls.lock().unwrap().push(prefix.to_string());
            if self.timeouts.iter().any(|p| p == prefix) {
                return Err(FetchError::Timeout(10));
            }
            Ok(self.prefixes.get(prefix).cloned().unwrap_or_default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fake::FakeSource;
    use super::*;
    use crate::models::AsnResponse;
    use crate::origin::fixtures::prefix;

    #[tokio::test]
    async fn test_asn_query_concatenates_direct_and_overlaps() {
        let mut direct = prefix(vec![13335], vec![], vec![]);
        direct.prefix = "1.1.1.0/24".to_string();
        let mut overlap = prefix(vec![13335], vec![], vec![]);
        overlap.prefix = "1.0.0.0/8".to_string();

        let mut source = FakeSource::default();
        source.asns.insert(
            13335,
            AsnResponse {
                direct_origin: vec![direct],
                overlaps: vec![overlap],
            },
        );

        let records = lookup(&source, " as13335 ").await.unwrap();
        let prefixes: Vec<&str> = records.iter().map(|r| r.prefix.as_str()).collect();
        assert_eq!(prefixes, vec!["1.1.1.0/24", "1.0.0.0/8"]);
        assert_eq!(*source.calls.lock().unwrap(), vec!["AS13335"]);
    }

    #[tokio::test]
    async fn test_address_query_uses_prefix_endpoint() {
        let mut source = FakeSource::default();
        source
            .prefixes
            .insert("192.0.2.1".to_string(), vec![prefix(vec![64500], vec![], vec![])]);

        let records = lookup(&source, "192.0.2.1").await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(*source.calls.lock().unwrap(), vec!["192.0.2.1"]);
    }

    #[tokio::test]
    async fn test_invalid_input_makes_no_call() {
        let source = FakeSource::default();
        let err = lookup(&source, "not-a-prefix").await.unwrap_err();
        assert!(matches!(err, LookupError::InvalidInput));
        assert_eq!(err.to_string(), INVALID_INPUT_MESSAGE);
        assert!(source.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_error_is_surfaced_verbatim() {
        let source = FakeSource {
            timeouts: vec!["2001:db8::/32".to_string()],
            ..FakeSource::default()
        };
        let err = lookup(&source, "2001:db8::/32").await.unwrap_err();
        assert!(matches!(err, LookupError::Fetch(FetchError::Timeout(10))));
        assert!(err.to_string().starts_with("Query timed out after 10 seconds"));
    }
}
