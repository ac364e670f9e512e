pub mod compatible;
pub mod scrub;
pub mod structured;
pub mod traits;
pub mod types;

pub use compatible::OpenAiCompatibleBackend;
pub use scrub::{sanitize_api_error, scrub_secret_patterns};
pub use structured::{parse_structured, strip_code_fences};
pub use traits::TextBackend;
pub use types::{ChatMessage, ChatRole};
