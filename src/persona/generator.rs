use super::{Persona, ScamType};
use crate::backend::{ChatMessage, TextBackend, parse_structured};
use crate::error::PersonaError;
use crate::prompt::PromptEngine;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

const DEFAULT_TEMPERATURE: f64 = 0.8;

/// What the model is asked to produce. `scam_type` is the caller's input
/// constraint, not part of the generated payload, so it is attached after
/// parsing.
#[derive(Debug, Deserialize)]
struct GeneratedProfile {
    name: String,
    age: u8,
    occupation: String,
    location: String,
    tech_literacy: u8,
    personality_traits: Vec<String>,
    #[serde(default)]
    vulnerabilities: Vec<String>,
    backstory: String,
    communication_style: String,
}

/// Produces victim personas via the text-generation backend.
///
/// Backend and parse/validation failures propagate as typed errors — unlike
/// the tactic analyzer, there is no fallback persona.
pub struct PersonaGenerator {
    backend: Arc<dyn TextBackend>,
    prompts: PromptEngine,
    model: String,
    temperature: f64,
}

impl PersonaGenerator {
    pub fn new(backend: Arc<dyn TextBackend>, model: &str) -> crate::Result<Self> {
        Ok(Self {
            backend,
            prompts: PromptEngine::new()?,
            model: model.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        })
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub async fn generate(&self, scam_type: ScamType) -> crate::Result<Persona> {
        let instruction = self.prompts.persona_instruction(scam_type)?;
        let raw = self
            .backend
            .generate(
                &[ChatMessage::user(instruction)],
                &self.model,
                self.temperature,
                None,
            )
            .await
            .map_err(PersonaError::Backend)?;

        let profile: GeneratedProfile =
            parse_structured(&raw).map_err(PersonaError::Malformed)?;

        let persona = Persona {
            name: profile.name,
            age: profile.age,
            occupation: profile.occupation,
            location: profile.location,
            tech_literacy: profile.tech_literacy,
            personality_traits: profile.personality_traits,
            vulnerabilities: profile.vulnerabilities,
            backstory: profile.backstory,
            communication_style: profile.communication_style,
            scam_type,
        };
        persona.validate()?;

        info!(name = %persona.name, %scam_type, "generated victim persona");
        Ok(persona)
    }
}
