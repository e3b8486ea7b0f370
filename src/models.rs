use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// RPKI validation state attached to a single route object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RpkiStatus {
    #[serde(alias = "valid")]
    Valid,
    #[serde(alias = "invalid")]
    Invalid,
    #[serde(alias = "not_found")]
    NotFound,
}

impl fmt::Display for RpkiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RpkiStatus::Valid => write!(f, "valid"),
            RpkiStatus::Invalid => write!(f, "invalid"),
            RpkiStatus::NotFound => write!(f, "not_found"),
        }
    }
}

/// Collapsed status written to batch CSV output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchRpkiStatus {
    Valid,
    Invalid,
    Unknown,
}

impl fmt::Display for BatchRpkiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchRpkiStatus::Valid => write!(f, "valid"),
            BatchRpkiStatus::Invalid => write!(f, "invalid"),
            BatchRpkiStatus::Unknown => write!(f, "unknown"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageCategory {
    Success,
    Warning,
    Danger,
    Info,
    #[serde(other)]
    Other,
}

/// A route object from one IRR registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IrrRoute {
    #[serde(default)]
    pub rpsl_pk: String,
    pub asn: u32,
    #[serde(default)]
    pub rpsl_text: String,
    pub rpki_status: RpkiStatus,
    #[serde(default)]
    pub rpki_max_length: Option<u8>,
}

/// A ROA-derived route. Always carries a max length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpkiRoute {
    #[serde(default)]
    pub rpsl_pk: String,
    pub asn: u32,
    #[serde(default)]
    pub rpsl_text: String,
    pub rpki_status: RpkiStatus,
    pub rpki_max_length: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub category: MessageCategory,
    pub text: String,
}

/// IRR routes grouped by registry name, in the order the data source sent them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IrrRoutes(Vec<(String, Vec<IrrRoute>)>);

impl IrrRoutes {
    #[cfg(test)]
    pub fn new(registries: Vec<(String, Vec<IrrRoute>)>) -> Self {
        Self(registries)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[IrrRoute])> {
        self.0
            .iter()
            .map(|(name, routes)| (name.as_str(), routes.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for IrrRoutes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, routes) in &self.0 {
            map.serialize_entry(name, routes)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for IrrRoutes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedVisitor;

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = IrrRoutes;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of registry name to route list")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut registries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, routes)) = access.next_entry::<String, Vec<IrrRoute>>()? {
                    registries.push((name, routes));
                }
                Ok(IrrRoutes(registries))
            }

            // Some responses carry `null` instead of an empty object.
            fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
                Ok(IrrRoutes::default())
            }
        }

        deserializer.deserialize_any(OrderedVisitor)
    }
}

/// Everything the data source knows about one prefix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrefixData {
    pub prefix: String,
    #[serde(default)]
    pub bgp_origins: Vec<u32>,
    #[serde(default)]
    pub rpki_routes: Vec<RpkiRoute>,
    #[serde(default)]
    pub irr_routes: IrrRoutes,
    pub category_overall: MessageCategory,
    #[serde(default)]
    pub goodness_overall: i64,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub rir: Option<String>,
    #[serde(default)]
    pub prefix_sort_key_ip_prefix: String,
    #[serde(default)]
    pub prefix_sort_key_reverse_networklen_ip: String,
}

/// Response to an ASN query: prefixes the ASN originates, then overlapping ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AsnResponse {
    #[serde(default)]
    pub direct_origin: Vec<PrefixData>,
    #[serde(default)]
    pub overlaps: Vec<PrefixData>,
}

/// One exported CSV row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchResult {
    pub subnet: String,
    pub origin: u32,
    pub rpki: BatchRpkiStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "prefixSortKeyReverseNetworklenIp": "24-1.1.1.0",
        "messages": [{"category": "success", "text": "Everything looks good"}],
        "rpkiRoutes": [{
            "rpslPk": "1.1.1.0/24AS13335/24",
            "asn": 13335,
            "rpslText": "route: 1.1.1.0/24",
            "rpkiStatus": "VALID",
            "rpkiMaxLength": 24
        }],
        "prefixSortKeyIpPrefix": "1.1.1.0/24",
        "categoryOverall": "success",
        "irrRoutes": {
            "RADB": [{"rpslPk": "1.1.1.0/24AS13335", "asn": 13335, "rpslText": "", "rpkiStatus": "VALID", "rpkiMaxLength": null}],
            "APNIC": [{"rpslPk": "1.1.1.0/24AS13335", "asn": 13335, "rpslText": "", "rpkiStatus": "VALID", "rpkiMaxLength": 24}]
        },
        "bgpOrigins": [13335],
        "goodnessOverall": 3,
        "prefix": "1.1.1.0/24",
        "rir": "APNIC"
    }"#;

    #[test]
    fn test_decode_prefix_data() {
        let data: PrefixData = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(data.prefix, "1.1.1.0/24");
        assert_eq!(data.bgp_origins, vec![13335]);
        assert_eq!(data.rpki_routes[0].rpki_max_length, 24);
        assert_eq!(data.category_overall, MessageCategory::Success);
        assert_eq!(data.rir.as_deref(), Some("APNIC"));
    }

    #[test]
    fn test_irr_registry_order_preserved() {
        let data: PrefixData = serde_json::from_str(SAMPLE).unwrap();
        let names: Vec<&str> = data.irr_routes.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["RADB", "APNIC"]);
        let (_, apnic) = data.irr_routes.iter().nth(1).unwrap();
        assert_eq!(apnic[0].rpki_max_length, Some(24));
    }

    #[test]
    fn test_missing_lists_default_to_empty() {
        let data: PrefixData = serde_json::from_str(
            r#"{"prefix": "10.0.0.0/8", "categoryOverall": "info", "irrRoutes": null}"#,
        )
        .unwrap();
        assert!(data.bgp_origins.is_empty());
        assert!(data.rpki_routes.is_empty());
        assert!(data.irr_routes.is_empty());
    }

    #[test]
    fn test_unknown_category_and_lowercase_status() {
        let data: PrefixData = serde_json::from_str(
            r#"{"prefix": "10.0.0.0/8", "categoryOverall": "critical",
                "rpkiRoutes": [{"asn": 1, "rpkiStatus": "invalid", "rpkiMaxLength": 8}]}"#,
        )
        .unwrap();
        assert_eq!(data.category_overall, MessageCategory::Other);
        assert_eq!(data.rpki_routes[0].rpki_status, RpkiStatus::Invalid);
    }

    #[test]
    fn test_irr_routes_serialize_as_object() {
        let routes = IrrRoutes::new(vec![("RIPE".to_string(), Vec::new())]);
        assert_eq!(serde_json::to_string(&routes).unwrap(), r#"{"RIPE":[]}"#);
    }
}
