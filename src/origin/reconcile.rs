use std::collections::HashMap;

use serde::Serialize;

use crate::models::{PrefixData, RpkiStatus};

/// Everything the sources say about one origin ASN of a prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OriginEntry {
    pub asn: u32,
    /// Registries with a route object for this ASN, first-seen order.
    pub registries: Vec<String>,
    /// `None` until some source reports a status.
    pub rpki_status: Option<RpkiStatus>,
    pub has_rpki_route: bool,
    pub is_bgp_origin: bool,
}

impl OriginEntry {
    fn new(asn: u32) -> Self {
        Self {
            asn,
            registries: Vec::new(),
            rpki_status: None,
            has_rpki_route: false,
            is_bgp_origin: false,
        }
    }

    /// Source label: registries, then `RPKI`, with `BGP` only for pure BGP sightings.
    pub fn sources(&self) -> Vec<&str> {
        let mut sources: Vec<&str> = self.registries.iter().map(String::as_str).collect();
        if self.has_rpki_route {
            sources.push("RPKI");
        }
        if sources.is_empty() && self.is_bgp_origin {
            sources.push("BGP");
        }
        sources
    }

    pub fn status_label(&self) -> String {
        self.rpki_status
            .map(|status| status.to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

/// Per-ASN origin view of one prefix, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OriginMap {
    entries: Vec<OriginEntry>,
    #[serde(skip)]
    index: HashMap<u32, usize>,
}

impl OriginMap {
    pub fn iter(&self) -> impl Iterator<Item = &OriginEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&mut self, asn: u32) -> &mut OriginEntry {
        let next = self.entries.len();
        let i = *self.index.entry(asn).or_insert(next);
        if i == next {
            self.entries.push(OriginEntry::new(asn));
        }
        &mut self.entries[i]
    }
}

/// Merge BGP origins, RPKI routes and IRR routes of `data` into one entry per ASN.
///
/// Passes run BGP, then RPKI, then IRR registry by registry. An RPKI route sets
/// the status outright; an IRR annotation only fills in a status that no RPKI
/// route provided and that is still unknown.
pub fn reconcile(data: &PrefixData) -> OriginMap {
    let mut map = OriginMap::default();

    for &asn in &data.bgp_origins {
        map.entry(asn).is_bgp_origin = true;
    }

    for route in &data.rpki_routes {
        let entry = map.entry(route.asn);
        entry.has_rpki_route = true;
        entry.rpki_status = Some(route.rpki_status);
    }

    for (registry, routes) in data.irr_routes.iter() {
        for route in routes {
            let entry = map.entry(route.asn);
            if !entry.registries.iter().any(|r| r == registry) {
                entry.registries.push(registry.to_string());
            }
            if !entry.has_rpki_route && entry.rpki_status.is_none() {
                entry.rpki_status = Some(route.rpki_status);
            }
        }
    }

    map
}
