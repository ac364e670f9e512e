//! LLM-backed classification of scammer manipulation tactics.
//!
//! Unlike persona and reply generation, failures here are absorbed: a
//! missing tactic assessment degrades one data point, it must never halt
//! the conversation. Downstream aggregation relies on every intel record
//! carrying a valid assessment, so the fallback is substituted on any
//! backend or parse failure.

use crate::backend::{ChatMessage, TextBackend, parse_structured};
use crate::error::StructuredOutputError;
use crate::prompt::PromptEngine;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

const DEFAULT_TEMPERATURE: f64 = 0.3;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, Default,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PrimaryTactic {
    Urgency,
    Authority,
    Fear,
    Greed,
    /// Catch-all: also absorbs any label the model invents.
    #[default]
    #[serde(other)]
    Unknown,
}

/// A per-message tactical assessment. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TacticAssessment {
    pub primary_tactic: PrimaryTactic,
    pub impersonation: String,
    pub requested_action: String,
    pub pressure_level: u8,
    pub sophistication: u8,
    #[serde(default)]
    pub red_flags: Vec<String>,
}

impl TacticAssessment {
    /// The fixed assessment substituted when analysis fails: neutral
    /// scores, no red flags.
    pub fn fallback() -> Self {
        Self {
            primary_tactic: PrimaryTactic::Unknown,
            impersonation: "unknown".to_string(),
            requested_action: "unknown".to_string(),
            pressure_level: 5,
            sophistication: 5,
            red_flags: Vec::new(),
        }
    }

    fn validate(&self) -> Result<(), StructuredOutputError> {
        if !(1..=10).contains(&self.pressure_level) {
            return Err(StructuredOutputError::new(
                format!("pressure_level {} outside 1-10", self.pressure_level),
                "",
            ));
        }
        if !(1..=10).contains(&self.sophistication) {
            return Err(StructuredOutputError::new(
                format!("sophistication {} outside 1-10", self.sophistication),
                "",
            ));
        }
        Ok(())
    }
}

/// Classifies scammer messages via the text-generation backend.
pub struct TacticAnalyzer {
    backend: Arc<dyn TextBackend>,
    prompts: PromptEngine,
    model: String,
    temperature: f64,
}

impl TacticAnalyzer {
    pub fn new(backend: Arc<dyn TextBackend>, model: &str) -> crate::Result<Self> {
        Ok(Self {
            backend,
            prompts: PromptEngine::new()?,
            model: model.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        })
    }

    /// Analyze one message. Never fails: any error from the backend or the
    /// structured parse is logged and replaced by the fallback assessment.
    pub async fn analyze(&self, message: &str) -> TacticAssessment {
        match self.try_analyze(message).await {
            Ok(assessment) => assessment,
            Err(err) => {
                warn!(%err, "tactic analysis failed, substituting fallback assessment");
                TacticAssessment::fallback()
            }
        }
    }

    /// The fallible inner step: one low-temperature backend call, then an
    /// explicit fence-strip + parse + validate.
    async fn try_analyze(&self, message: &str) -> crate::Result<TacticAssessment> {
        let instruction = self.prompts.analysis_instruction(message)?;
        let raw = self
            .backend
            .generate(
                &[ChatMessage::user(instruction)],
                &self.model,
                self.temperature,
                None,
            )
            .await?;

        let assessment: TacticAssessment = parse_structured(&raw)?;
        assessment.validate()?;
        Ok(assessment)
    }
}
