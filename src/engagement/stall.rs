//! Stalling-tactic selection.
//!
//! Which tactic the persona leans on is a pure function of the turn count
//! plus bounded randomness from the engagement's injected RNG, so a seeded
//! engagement replays the same tactic sequence.

use rand::Rng;
use serde::{Deserialize, Serialize};

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
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StallTactic {
    TechnicalDifficulty,
    NeedAssistance,
    ClarificationNeeded,
    Distraction,
    FakeCompliance,
}

/// Guidance used when a tactic name doesn't resolve to a known tactic.
pub const GENERIC_GUIDANCE: &str = "Engage naturally";

impl StallTactic {
    /// The fixed natural-language guidance handed to the model for this
    /// tactic.
    pub fn guidance(self) -> &'static str {
        match self {
            Self::TechnicalDifficulty => {
                "Express confusion with technology. Say your computer is slow, you can't find buttons, etc."
            }
            Self::NeedAssistance => {
                "Say you need to ask your grandson/daughter/friend for help with this."
            }
            Self::ClarificationNeeded => {
                "Ask them to explain in simpler terms. Act confused about specific details."
            }
            Self::Distraction => {
                "Go off on a brief tangent about something in your life. Then ask them to repeat what they said."
            }
            Self::FakeCompliance => {
                "Act like you're going to do it, but create obstacles ('let me find my reading glasses', 'my internet is slow')"
            }
        }
    }
}

/// Guidance for a tactic referred to by name; unknown names fall back to
/// [`GENERIC_GUIDANCE`].
pub fn guidance_for(name: &str) -> &'static str {
    name.parse::<StallTactic>()
        .map_or(GENERIC_GUIDANCE, StallTactic::guidance)
}

/// Pick the stalling tactic for the current turn.
///
/// Early turns always ask for clarification; mid-conversation alternates
/// between two-element candidate sets; from turn 10 on the persona fakes
/// compliance indefinitely.
pub fn select(turn_count: u32, rng: &mut impl Rng) -> StallTactic {
    match turn_count {
        0..=2 => StallTactic::ClarificationNeeded,
        3..=5 => {
            if rng.random_range(0..2) == 0 {
                StallTactic::TechnicalDifficulty
            } else {
                StallTactic::NeedAssistance
            }
        }
        6..=9 => {
            if rng.random_range(0..2) == 0 {
                StallTactic::Distraction
            } else {
                StallTactic::FakeCompliance
            }
        }
        _ => StallTactic::FakeCompliance,
    }
}
