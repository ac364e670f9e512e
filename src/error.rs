use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `lurebird`.
///
/// Each subsystem defines its own error variant. Callers match on these to
/// decide whether an engagement can continue; internal code uses
/// `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum LureError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Text-generation backend ─────────────────────────────────────────
    #[error("backend: {0}")]
    Backend(#[from] BackendError),

    // ── Structured model output ─────────────────────────────────────────
    #[error("structured output: {0}")]
    StructuredOutput(#[from] StructuredOutputError),

    // ── Persona generation ──────────────────────────────────────────────
    #[error("persona: {0}")]
    Persona(#[from] PersonaError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("failed to serialize config: {0}")]
    Serialize(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Backend errors ─────────────────────────────────────────────────────────

/// A generative-text call failed. Fatal for persona and reply generation;
/// absorbed into a fallback assessment by the tactic analyzer.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend {backend} request failed: {message}")]
    Request { backend: String, message: String },

    #[error("backend {backend} authentication failed")]
    Auth { backend: String },

    #[error("backend {backend} rate-limited (retry after {retry_after_secs}s)")]
    RateLimited {
        backend: String,
        retry_after_secs: u64,
    },

    #[error("backend {backend} API error ({status}): {message}")]
    Api {
        backend: String,
        status: u16,
        message: String,
    },

    #[error("backend {backend} timed out after {secs}s")]
    Timeout { backend: String, secs: u64 },

    #[error("backend {backend} returned no content")]
    NoContent { backend: String },
}

// ─── Structured-output errors ───────────────────────────────────────────────

/// Model text did not parse (or validate) against the expected schema after
/// fence-stripping.
#[derive(Debug, Error)]
#[error("payload did not match the expected schema: {reason} (payload: {snippet:?})")]
pub struct StructuredOutputError {
    pub reason: String,
    pub snippet: String,
}

impl StructuredOutputError {
    pub fn new(reason: impl Into<String>, payload: &str) -> Self {
        const SNIPPET_CHARS: usize = 120;
        let snippet = if payload.chars().count() > SNIPPET_CHARS {
            payload.chars().take(SNIPPET_CHARS).collect()
        } else {
            payload.to_string()
        };
        Self {
            reason: reason.into(),
            snippet,
        }
    }
}

// ─── Persona errors ─────────────────────────────────────────────────────────

/// Persona generation failures are never absorbed: a missing persona breaks
/// the whole engagement, so every variant propagates to the caller.
#[derive(Debug, Error)]
pub enum PersonaError {
    #[error("backend: {0}")]
    Backend(#[from] BackendError),

    #[error("malformed persona payload: {0}")]
    Malformed(#[from] StructuredOutputError),

    #[error("invalid persona: {0}")]
    Invalid(String),
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, LureError>;
