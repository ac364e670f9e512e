//! Regex layer over scammer text: URLs, phone numbers, wallet addresses,
//! and scam-vocabulary keywords.
//!
//! Pure and deterministic — malformed input simply yields fewer matches.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

/// The fixed kinds of indicator the extractor knows about.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum IndicatorKind {
    Urls,
    Phone,
    Email,
    CryptoWallet,
    BankKeywords,
    UrgencyWords,
    AuthorityClaims,
}

/// Matched indicator strings per kind. A kind is present only if at least
/// one match exists; values are deduplicated within one message.
pub type IndicatorSet = BTreeMap<IndicatorKind, BTreeSet<String>>;

static PATTERNS: LazyLock<Vec<(IndicatorKind, Regex)>> = LazyLock::new(|| {
    [
        (IndicatorKind::Urls, r"(?i)https?://[^\s]+"),
        (IndicatorKind::Phone, r"(?i)\b\d{3}[-.]?\d{3}[-.]?\d{4}\b"),
        (
            IndicatorKind::Email,
            r"(?i)\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b",
        ),
        (
            IndicatorKind::CryptoWallet,
            r"\b[13][a-km-zA-HJ-NP-Z1-9]{25,34}\b",
        ),
        (
            IndicatorKind::BankKeywords,
            r"(?i)\b(account|routing|transfer|wire|deposit|bank)\b",
        ),
        (
            IndicatorKind::UrgencyWords,
            r"(?i)\b(urgent|immediately|now|expires|limited|today|asap)\b",
        ),
        (
            IndicatorKind::AuthorityClaims,
            r"(?i)\b(police|irs|government|microsoft|apple|amazon|bank)\b",
        ),
    ]
    .into_iter()
    .map(|(kind, pattern)| (kind, Regex::new(pattern).expect("indicator pattern compiles")))
    .collect()
});

/// Extract all indicators of compromise from one message.
pub fn extract(text: &str) -> IndicatorSet {
    let mut iocs = IndicatorSet::new();
    for (kind, pattern) in PATTERNS.iter() {
        let matches: BTreeSet<String> = pattern
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect();
        if !matches.is_empty() {
            iocs.insert(*kind, matches);
        }
    }
    iocs
}
