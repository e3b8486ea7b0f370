use crate::models::{BatchResult, BatchRpkiStatus, PrefixData, RpkiStatus};

/// Turn exact-match prefix records into CSV rows.
///
/// Origins named in any IRR registry are preferred; BGP origins are used only
/// when no registry has a route object for the prefix.
pub fn extract_batch_results(records: &[PrefixData]) -> Vec<BatchResult> {
    let mut results = Vec::new();

    for data in records {
        let mut origins: Vec<u32> = Vec::new();
        for (_, routes) in data.irr_routes.iter() {
            for route in routes {
                if !origins.contains(&route.asn) {
                    origins.push(route.asn);
                }
            }
        }

        if origins.is_empty() {
            for &asn in &data.bgp_origins {
                if !origins.contains(&asn) {
                    origins.push(asn);
                }
            }
        }

        results.extend(origins.into_iter().map(|origin| BatchResult {
            subnet: data.prefix.clone(),
            origin,
            rpki: resolve_rpki_status(data, origin),
        }));
    }

    results
}

/// RPKI route first, then the first decisive IRR annotation, else unknown.
fn resolve_rpki_status(data: &PrefixData, origin: u32) -> BatchRpkiStatus {
    if let Some(route) = data.rpki_routes.iter().find(|r| r.asn == origin) {
        return match route.rpki_status {
            RpkiStatus::Valid => BatchRpkiStatus::Valid,
            _ => BatchRpkiStatus::Invalid,
        };
    }

    data.irr_routes
        .iter()
        .filter_map(|(_, routes)| routes.iter().find(|r| r.asn == origin))
        .find_map(|route| match route.rpki_status {
            RpkiStatus::Valid => Some(BatchRpkiStatus::Valid),
            RpkiStatus::Invalid => Some(BatchRpkiStatus::Invalid),
            RpkiStatus::NotFound => None,
        })
        .unwrap_or(BatchRpkiStatus::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::origin::fixtures::prefix;

    #[test]
    fn test_bgp_fallback_without_irr() {
        let data = prefix(vec![2, 3], vec![], vec![]);
        let rows = extract_batch_results(&[data]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].origin, 2);
        assert_eq!(rows[1].origin, 3);
        assert!(rows.iter().all(|r| r.rpki == BatchRpkiStatus::Unknown));
        assert!(rows.iter().all(|r| r.subnet == "192.0.2.0/24"));
    }

    #[test]
    fn test_irr_origins_replace_bgp_origins() {
        let data = prefix(
            vec![64500],
            vec![],
            vec![("RIPE", vec![(64501, RpkiStatus::Valid)])],
        );
        let rows = extract_batch_results(&[data]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].origin, 64501);
        assert_eq!(rows[0].rpki, BatchRpkiStatus::Valid);
    }

    #[test]
    fn test_rpki_route_decides_status() {
        let data = prefix(
            vec![],
            vec![(1, RpkiStatus::NotFound), (2, RpkiStatus::Valid)],
            vec![("RADB", vec![(1, RpkiStatus::Valid), (2, RpkiStatus::Invalid)])],
        );
        let rows = extract_batch_results(&[data]);
        assert_eq!(rows[0].rpki, BatchRpkiStatus::Invalid);
        assert_eq!(rows[1].rpki, BatchRpkiStatus::Valid);
    }

    #[test]
    fn test_first_decisive_irr_status_wins() {
        let data = prefix(
            vec![],
            vec![],
            vec![
                ("RIPE", vec![(9, RpkiStatus::NotFound)]),
                ("RADB", vec![(9, RpkiStatus::Invalid)]),
                ("ARIN", vec![(9, RpkiStatus::Valid)]),
            ],
        );
        let rows = extract_batch_results(&[data]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].rpki, BatchRpkiStatus::Invalid);
    }

    #[test]
    fn test_not_found_everywhere_is_unknown() {
        let data = prefix(vec![], vec![], vec![("RIPE", vec![(9, RpkiStatus::NotFound)])]);
        assert_eq!(extract_batch_results(&[data])[0].rpki, BatchRpkiStatus::Unknown);
    }

    #[test]
    fn test_duplicate_origins_emitted_once() {
        let data = prefix(vec![1, 1], vec![], vec![]);
        assert_eq!(extract_batch_results(&[data]).len(), 1);

        let data = prefix(
            vec![],
            vec![],
            vec![
                ("RIPE", vec![(5, RpkiStatus::Valid)]),
                ("RADB", vec![(5, RpkiStatus::Valid), (6, RpkiStatus::Valid)]),
            ],
        );
        let origins: Vec<u32> = extract_batch_results(&[data]).iter().map(|r| r.origin).collect();
        assert_eq!(origins, vec![5, 6]);
    }

    #[test]
    fn test_no_records_no_rows() {
        assert!(extract_batch_results(&[]).is_empty());
    }
}
