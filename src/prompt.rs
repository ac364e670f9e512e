//! Tera-templated prompt construction.
//!
//! All instructions sent to the text-generation backend are built here:
//! the persona-derived system instruction, the per-turn stalling
//! instruction, the tactic-analysis instruction, and the
//! persona-generation instruction. Rendering is pure — no I/O.

use crate::persona::{Persona, ScamType};
use tera::{Context, Tera};

const SYSTEM_INSTRUCTION: &str = "\
You are roleplaying as {{ name }}, a {{ age }}-year-old {{ occupation }} from {{ location }}.

BACKGROUND: {{ backstory }}

PERSONALITY: {{ traits }}
TECH LITERACY: {{ tech_literacy }}/10 (lower = less tech-savvy)
COMMUNICATION: {{ communication_style }}

YOUR GOAL: Engage with the scammer to waste their time while staying believable. You are NOT aware you're talking to a scammer initially.

RULES:
1. Stay in character - respond as this person would
2. Ask clarifying questions when confused (often)
3. Express concerns and hesitations naturally
4. Make excuses for delays (\"let me find my glasses\", \"my computer is slow\")
5. NEVER provide real personal information - make up fake but believable details
6. Keep responses conversational (2-4 sentences usually)
7. If tech literacy is low, show confusion with technical terms
8. Occasionally go off on brief tangents about your life
9. Show interest but move slowly

Remember: You're a real person having a conversation, not obviously wasting time.";

const TURN_INSTRUCTION: &str = "\
The scammer just said: \"{{ message }}\"

Current situation:
- Conversation turn: {{ turn }}
- Your current strategy: {{ tactic }}
- Guidance: {{ guidance }}

Respond naturally as {{ name }}, in 2-4 sentences. Remember your goal is to waste their time while staying believable.";

const ANALYSIS_INSTRUCTION: &str = "\
Analyze this scammer message and identify the manipulation tactics being used.

Message: \"{{ message }}\"

Return ONLY a JSON object with this structure (no markdown):
{
    \"primary_tactic\": \"main manipulation technique (urgency/authority/fear/greed)\",
    \"impersonation\": \"who they're pretending to be (or 'none')\",
    \"requested_action\": \"what they want victim to do\",
    \"pressure_level\": number 1-10,
    \"sophistication\": number 1-10,
    \"red_flags\": [\"list\", \"of\", \"obvious\", \"scam\", \"indicators\"]
}";

const PERSONA_INSTRUCTION: &str = "\
Generate a realistic victim persona for a {{ scam_type }} scam.

Return ONLY a JSON object with this exact structure (no markdown, no extra text):
{
    \"name\": \"First name only\",
    \"age\": number between 45-75,
    \"occupation\": \"retired or simple job\",
    \"location\": \"city, country\",
    \"tech_literacy\": number 1-10 (lower = more vulnerable),
    \"personality_traits\": [\"trait1\", \"trait2\", \"trait3\"],
    \"vulnerabilities\": [\"vulnerability1\", \"vulnerability2\"],
    \"backstory\": \"2-3 sentence backstory that makes them believable target\",
    \"communication_style\": \"how they talk (formal/casual, verbosity)\"
}

Make them believable and sympathetic. They should be vulnerable but not stupid.";

const SYSTEM_NAME: &str = "system_instruction";
const TURN_NAME: &str = "turn_instruction";
const ANALYSIS_NAME: &str = "analysis_instruction";
const PERSONA_NAME: &str = "persona_instruction";

/// Tera engine pre-loaded with the honeypot's instruction templates.
pub struct PromptEngine {
    tera: Tera,
}

impl PromptEngine {
    pub fn new() -> anyhow::Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(SYSTEM_NAME, SYSTEM_INSTRUCTION)?;
        tera.add_raw_template(TURN_NAME, TURN_INSTRUCTION)?;
        tera.add_raw_template(ANALYSIS_NAME, ANALYSIS_INSTRUCTION)?;
        tera.add_raw_template(PERSONA_NAME, PERSONA_INSTRUCTION)?;
        Ok(Self { tera })
    }

    /// The roleplay block derived from a persona (identity, backstory,
    /// personality, tech literacy, communication style, behavioral rules).
    pub fn system_instruction(&self, persona: &Persona) -> anyhow::Result<String> {
        let mut ctx = Context::new();
        ctx.insert("name", &persona.name);
        ctx.insert("age", &persona.age);
        ctx.insert("occupation", &persona.occupation);
        ctx.insert("location", &persona.location);
        ctx.insert("backstory", &persona.backstory);
        ctx.insert("traits", &persona.personality_traits.join(", "));
        ctx.insert("tech_literacy", &persona.tech_literacy);
        ctx.insert("communication_style", &persona.communication_style);
        let rendered = self.tera.render(SYSTEM_NAME, &ctx)?;
        Ok(rendered)
    }

    /// The user-role instruction for one turn: raw scammer message, turn
    /// number, chosen stalling tactic and its guidance.
    pub fn turn_instruction(
        &self,
        persona_name: &str,
        message: &str,
        turn_number: u32,
        tactic: &str,
        guidance: &str,
    ) -> anyhow::Result<String> {
        let mut ctx = Context::new();
        ctx.insert("name", persona_name);
        ctx.insert("message", message);
        ctx.insert("turn", &turn_number);
        ctx.insert("tactic", tactic);
        ctx.insert("guidance", guidance);
        let rendered = self.tera.render(TURN_NAME, &ctx)?;
        Ok(rendered)
    }

    /// The tactic-analysis instruction embedding one scammer message.
    pub fn analysis_instruction(&self, message: &str) -> anyhow::Result<String> {
        let mut ctx = Context::new();
        ctx.insert("message", message);
        let rendered = self.tera.render(ANALYSIS_NAME, &ctx)?;
        Ok(rendered)
    }

    /// The persona-generation instruction for one scam type.
    pub fn persona_instruction(&self, scam_type: ScamType) -> anyhow::Result<String> {
        let mut ctx = Context::new();
        ctx.insert("scam_type", &scam_type.to_string());
        let rendered = self.tera.render(PERSONA_NAME, &ctx)?;
        Ok(rendered)
    }
}
