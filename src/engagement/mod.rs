//! The conversation state machine: one engagement, one scammer, one
//! synthetic victim.
//!
//! State transitions mix keyword triggers with turn-count escalation, with
//! keyword rules taking priority. There is deliberately no hysteresis: a
//! late conversation can flip between LATE_STAGE/DISENGAGE and the keyword
//! states from one message to the next. Keyword checks are plain substring
//! containment, so e.g. "now" also triggers inside "know". Both quirks
//! mirror the observed scam-engagement behavior this module models and are
//! kept as-is.

pub mod stall;

pub use stall::{GENERIC_GUIDANCE, StallTactic, guidance_for};

use crate::backend::{ChatMessage, TextBackend};
use crate::config::Config;
use crate::intel::{self, IntelRecord, Report, TacticAnalyzer};
use crate::persona::{Persona, ScamType};
use crate::prompt::PromptEngine;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

const REQUEST_KEYWORDS: [&str; 4] = ["click", "link", "website", "download"];
const PRESSURE_KEYWORDS: [&str; 4] = ["urgent", "now", "immediately", "hurry"];

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ConversationState {
    InitialContact,
    Request,
    Pressure,
    LateStage,
    Disengage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    Scammer,
    Agent,
}

/// One entry in the dialogue history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueTurn {
    pub role: Speaker,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub total_turns: u32,
    pub final_state: ConversationState,
    pub messages_exchanged: usize,
    pub intelligence_gathered: usize,
    pub estimated_time_wasted_minutes: u64,
}

/// The JSON document the presentation layer offers for download.
#[derive(Debug, Clone, Serialize)]
pub struct EngagementExport {
    pub engagement_id: String,
    pub persona: Persona,
    pub scam_type: ScamType,
    pub messages: Vec<DialogueTurn>,
    pub intelligence: Vec<IntelRecord>,
    pub summary: ConversationSummary,
}

/// Generation knobs for the reply path.
#[derive(Debug, Clone)]
pub struct EngagementOptions {
    pub model: String,
    pub reply_temperature: f64,
    pub reply_max_tokens: u32,
    /// How many trailing dialogue turns are replayed as context.
    pub history_window: usize,
}

impl Default for EngagementOptions {
    fn default() -> Self {
        Self {
            model: "llama-3.1-8b-instant".to_string(),
            reply_temperature: 0.9,
            reply_max_tokens: 200,
            history_window: 6,
        }
    }
}

impl EngagementOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            model: config.model.clone(),
            reply_temperature: config.generation.reply_temperature,
            reply_max_tokens: config.generation.reply_max_tokens,
            history_window: config.generation.history_window,
        }
    }
}

/// Evaluate the transition rules for one incoming message. First match
/// wins; with no match the state is unchanged.
fn transition(current: ConversationState, turn_count: u32, message: &str) -> ConversationState {
    let lower = message.to_lowercase();

    if REQUEST_KEYWORDS.iter().any(|k| lower.contains(k)) {
        ConversationState::Request
    } else if PRESSURE_KEYWORDS.iter().any(|k| lower.contains(k)) {
        ConversationState::Pressure
    } else if turn_count > 15 {
        ConversationState::Disengage
    } else if turn_count > 8 {
        ConversationState::LateStage
    } else {
        current
    }
}

/// One full scammer-vs-agent conversation session.
///
/// Owns all mutable state (persona, dialogue history, intel log, turn
/// count, conversation state); concurrent engagements must be separate
/// instances.
pub struct Engagement {
    id: Uuid,
    persona: Persona,
    backend: Arc<dyn TextBackend>,
    analyzer: TacticAnalyzer,
    prompts: PromptEngine,
    options: EngagementOptions,
    history: Vec<DialogueTurn>,
    intel_log: Vec<IntelRecord>,
    turn_count: u32,
    state: ConversationState,
    rng: StdRng,
}

impl Engagement {
    pub fn new(
        persona: Persona,
        backend: Arc<dyn TextBackend>,
        options: EngagementOptions,
    ) -> crate::Result<Self> {
        Self::with_rng(persona, backend, options, StdRng::from_rng(&mut rand::rng()))
    }

    /// Seeded constructor for reproducible tactic selection.
    pub fn seeded(
        persona: Persona,
        backend: Arc<dyn TextBackend>,
        options: EngagementOptions,
        seed: u64,
    ) -> crate::Result<Self> {
        Self::with_rng(persona, backend, options, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(
        persona: Persona,
        backend: Arc<dyn TextBackend>,
        options: EngagementOptions,
        rng: StdRng,
    ) -> crate::Result<Self> {
        let analyzer = TacticAnalyzer::new(Arc::clone(&backend), &options.model)?;
        Ok(Self {
            id: Uuid::new_v4(),
            persona,
            backend,
            analyzer,
            prompts: PromptEngine::new()?,
            options,
            history: Vec::new(),
            intel_log: Vec::new(),
            turn_count: 0,
            state: ConversationState::InitialContact,
            rng,
        })
    }

    pub fn persona(&self) -> &Persona {
        &self.persona
    }

    pub fn state(&self) -> ConversationState {
        self.state
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn history(&self) -> &[DialogueTurn] {
        &self.history
    }

    pub fn intel_log(&self) -> &[IntelRecord] {
        &self.intel_log
    }

    /// Process one incoming scammer message and produce the in-character
    /// reply.
    ///
    /// Tactic-analysis failures are absorbed upstream; a reply-generation
    /// failure is fatal for this turn and propagates. The intel record and
    /// the scammer's dialogue turn are already appended by then and are
    /// not rolled back.
    pub async fn respond(&mut self, incoming: &str) -> crate::Result<String> {
        let tactics = self.analyzer.analyze(incoming).await;
        self.intel_log.push(IntelRecord::capture(incoming, tactics));

        self.state = transition(self.state, self.turn_count, incoming);

        self.history.push(DialogueTurn {
            role: Speaker::Scammer,
            content: incoming.to_string(),
        });

        let tactic = stall::select(self.turn_count, &mut self.rng);

        let system = self.prompts.system_instruction(&self.persona)?;
        let instruction = self.prompts.turn_instruction(
            &self.persona.name,
            incoming,
            self.turn_count + 1,
            &tactic.to_string(),
            tactic.guidance(),
        )?;

        let window_start = self
            .history
            .len()
            .saturating_sub(self.options.history_window);
        let mut messages = Vec::with_capacity(self.options.history_window + 2);
        messages.push(ChatMessage::system(system));
        for turn in &self.history[window_start..] {
            messages.push(match turn.role {
                Speaker::Scammer => ChatMessage::user(turn.content.clone()),
                Speaker::Agent => ChatMessage::assistant(turn.content.clone()),
            });
        }
        messages.push(ChatMessage::user(instruction));

        let reply = self
            .backend
            .generate(
                &messages,
                &self.options.model,
                self.options.reply_temperature,
                Some(self.options.reply_max_tokens),
            )
            .await?;

        self.history.push(DialogueTurn {
            role: Speaker::Agent,
            content: reply.clone(),
        });
        self.turn_count += 1;

        debug!(
            engagement = %self.id,
            turn = self.turn_count,
            state = %self.state,
            tactic = %tactic,
            "turn completed"
        );

        Ok(reply)
    }

    pub fn summary(&self) -> ConversationSummary {
        ConversationSummary {
            total_turns: self.turn_count,
            final_state: self.state,
            messages_exchanged: self.history.len(),
            intelligence_gathered: self.intel_log.len(),
            estimated_time_wasted_minutes: u64::from(self.turn_count) * 2,
        }
    }

    pub fn report(&self) -> Report {
        intel::summarize(&self.intel_log)
    }

    pub fn export(&self) -> EngagementExport {
        EngagementExport {
            engagement_id: self.id.to_string(),
            persona: self.persona.clone(),
            scam_type: self.persona.scam_type,
            messages: self.history.clone(),
            intelligence: self.intel_log.clone(),
            summary: self.summary(),
        }
    }
}
