pub mod extractor;
pub mod report;
pub mod tactics;

pub use extractor::{IndicatorKind, IndicatorSet, extract};
pub use report::{Report, ReportSummary, ThreatProfile, summarize};
pub use tactics::{PrimaryTactic, TacticAnalyzer, TacticAssessment};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything harvested from one incoming scammer message.
///
/// Appended to the engagement's intel log and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntelRecord {
    pub timestamp: DateTime<Utc>,
    pub message: String,
    pub iocs: IndicatorSet,
    pub tactics: TacticAssessment,
}

impl IntelRecord {
    /// Extract IOCs from `message` and pair them with an already-produced
    /// tactic assessment, stamped with the current time.
    pub fn capture(message: &str, tactics: TacticAssessment) -> Self {
        Self {
            timestamp: Utc::now(),
            message: message.to_string(),
            iocs: extract(message),
            tactics,
        }
    }
}
