use anyhow::Result;
use serde::Serialize;

use crate::models::PrefixData;
use crate::origin::reconcile::{reconcile, OriginMap};

/// A prefix record together with its reconciled origins.
#[derive(Debug, Serialize)]
pub struct PrefixReport<'a> {
    #[serde(flatten)]
    pub record: &'a PrefixData,
    pub origins: OriginMap,
}

/// Pretty-printed JSON array, one element per prefix record.
pub fn render(records: &[PrefixData]) -> Result<String> {
    let reports: Vec<PrefixReport<'_>> = records
        .iter()
        .map(|record| PrefixReport {
            record,
            origins: reconcile(record),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&reports)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RpkiStatus;
    use crate::origin::fixtures::prefix;

    #[test]
    fn test_render_includes_record_and_origins() {
        let data = prefix(
            vec![64500],
            vec![(64500, RpkiStatus::Valid)],
            vec![("RIPE", vec![(64500, RpkiStatus::Valid)])],
        );
        let json = render(&[data]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let report = &value[0];
        assert_eq!(report["prefix"], "192.0.2.0/24");
        assert_eq!(report["bgpOrigins"][0], 64500);
        assert_eq!(report["irrRoutes"]["RIPE"][0]["rpkiStatus"], "VALID");
        assert_eq!(report["origins"][0]["asn"], 64500);
        assert_eq!(report["origins"][0]["registries"][0], "RIPE");
        assert_eq!(report["origins"][0]["rpki_status"], "VALID");
        assert_eq!(report["origins"][0]["is_bgp_origin"], true);
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render(&[]).unwrap(), "[]");
    }
}
