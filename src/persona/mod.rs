pub mod generator;

pub use generator::PersonaGenerator;

use crate::error::PersonaError;
use serde::{Deserialize, Serialize};

/// The scam family an engagement is baited for.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::VariantNames,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ScamType {
    Phishing,
    TechSupport,
    Romance,
    CryptoInvestment,
}

/// A synthetic victim profile used to ground generated replies.
///
/// Created once per engagement and immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persona {
    pub name: String,
    pub age: u8,
    pub occupation: String,
    pub location: String,
    pub tech_literacy: u8,
    pub personality_traits: Vec<String>,
    pub vulnerabilities: Vec<String>,
    pub backstory: String,
    pub communication_style: String,
    pub scam_type: ScamType,
}

impl Persona {
    /// Range checks on model-generated fields. Failures propagate — a
    /// persona the caller can't trust breaks the whole engagement.
    pub fn validate(&self) -> Result<(), PersonaError> {
        if self.name.trim().is_empty() {
            return Err(PersonaError::Invalid("empty name".into()));
        }
        if !(45..=75).contains(&self.age) {
            return Err(PersonaError::Invalid(format!(
                "age {} outside 45-75",
                self.age
            )));
        }
        if !(1..=10).contains(&self.tech_literacy) {
            return Err(PersonaError::Invalid(format!(
                "tech_literacy {} outside 1-10",
                self.tech_literacy
            )));
        }
        Ok(())
    }
}
