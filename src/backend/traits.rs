use super::types::ChatMessage;
use crate::error::BackendError;
use async_trait::async_trait;

/// The generative-text boundary.
///
/// The core treats text generation as an opaque capability: a sequence of
/// role-tagged messages plus sampling parameters in, generated text out.
/// Implementations must not retry or absorb failures — whether a failure is
/// fatal or degraded is decided by the caller (persona and reply generation
/// surface it, tactic analysis substitutes a fallback).
#[async_trait]
pub trait TextBackend: Send + Sync {
    /// Short backend name used in error messages and logs.
    fn name(&self) -> &str;

    async fn generate(
        &self,
        messages: &[ChatMessage],
        model: &str,
        temperature: f64,
        max_tokens: Option<u32>,
    ) -> Result<String, BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticBackend;

    #[async_trait]
    impl TextBackend for StaticBackend {
        fn name(&self) -> &str {
            "static"
        }

        async fn generate(
            &self,
            _messages: &[ChatMessage],
            _model: &str,
            _temperature: f64,
            _max_tokens: Option<u32>,
        ) -> Result<String, BackendError> {
            Ok("canned reply".to_string())
        }
    }

    #[tokio::test]
    async fn trait_objects_dispatch() {
        let backend: Box<dyn TextBackend> = Box::new(StaticBackend);
        let reply = backend
            .generate(&[ChatMessage::user("hi")], "test-model", 0.5, None)
            .await
            .unwrap();
        assert_eq!(reply, "canned reply");
        assert_eq!(backend.name(), "static");
    }
}
