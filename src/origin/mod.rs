//! Origin reconciliation across BGP, RPKI and IRR data for one prefix.
//!
//! - [`reconcile`] — per-ASN origin view used for single-query display.
//! - [`extract`] — flat (subnet, origin, rpki) rows for batch export.

pub mod extract;
pub mod reconcile;

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::models::{IrrRoute, IrrRoutes, MessageCategory, PrefixData, RpkiRoute, RpkiStatus};

    /// Build a `192.0.2.0/24` record from (asn, status) pairs.
    pub(crate) fn prefix(
        bgp: Vec<u32>,
        rpki: Vec<(u32, RpkiStatus)>,
        irr: Vec<(&str, Vec<(u32, RpkiStatus)>)>,
    ) -> PrefixData {
        PrefixData {
            prefix: "192.0.2.0/24".to_string(),
            bgp_origins: bgp,
            rpki_routes: rpki
                .into_iter()
                .map(|(asn, rpki_status)| RpkiRoute {
                    rpsl_pk: format!("192.0.2.0/24AS{}/24", asn),
                    asn,
                    rpsl_text: String::new(),
                    rpki_status,
                    rpki_max_length: 24,
                })
                .collect(),
            irr_routes: IrrRoutes::new(
                irr.into_iter()
                    .map(|(name, routes)| {
                        let routes = routes
                            .into_iter()
                            .map(|(asn, rpki_status)| IrrRoute {
                                rpsl_pk: format!("192.0.2.0/24AS{}", asn),
                                asn,
                                rpsl_text: String::new(),
                                rpki_status,
                                rpki_max_length: None,
                            })
                            .collect();
                        (name.to_string(), routes)
                    })
                    .collect(),
            ),
            category_overall: MessageCategory::Info,
            goodness_overall: 0,
            messages: Vec::new(),
            rir: Some("RIPE NCC".to_string()),
            prefix_sort_key_ip_prefix: String::new(),
            prefix_sort_key_reverse_networklen_ip: String::new(),
        }
    }
}
