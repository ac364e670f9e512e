//! Aggregation of per-turn intelligence into a threat report.

use super::{IndicatorSet, IntelRecord};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub summary: ReportSummary,
    /// The full ordered intel log, carried so a report stands on its own.
    pub timeline: Vec<IntelRecord>,
    pub threat_profile: ThreatProfile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_messages: usize,
    pub duration_estimate_minutes: u64,
    pub unique_iocs: IndicatorSet,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreatProfile {
    /// Arithmetic mean of sophistication scores; absent for an empty log.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_sophistication: Option<f64>,
    /// Per-record sophistication scores in log order.
    pub sophistication_trend: Vec<u8>,
}

/// Build a report from the ordered intel log. Pure and idempotent; an
/// empty log yields zero messages and no sophistication average.
pub fn summarize(log: &[IntelRecord]) -> Report {
    let mut unique_iocs = IndicatorSet::new();
    for record in log {
        for (kind, values) in &record.iocs {
            unique_iocs
                .entry(*kind)
                .or_default()
                .extend(values.iter().cloned());
        }
    }

    let sophistication_trend: Vec<u8> =
        log.iter().map(|r| r.tactics.sophistication).collect();
    let avg_sophistication = if sophistication_trend.is_empty() {
        None
    } else {
        let sum: f64 = sophistication_trend.iter().map(|&s| f64::from(s)).sum();
        Some(sum / sophistication_trend.len() as f64)
    };

    Report {
        summary: ReportSummary {
            total_messages: log.len(),
            duration_estimate_minutes: log.len() as u64 * 2,
            unique_iocs,
        },
        timeline: log.to_vec(),
        threat_profile: ThreatProfile {
            avg_sophistication,
            sophistication_trend,
        },
    }
}
