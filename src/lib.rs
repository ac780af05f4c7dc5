#![forbid(unsafe_code)]
#![doc = r#"
oai-payloads

Typed request/response payloads for two OpenAI endpoints, with exact wire-key mappings.

Crate highlights
- `ToolOutputSubmission`: body for submitting tool outputs to a run (`{"tool_outputs": [...]}`).
- `ModerationReport`: strict decoder for moderation responses, with `is_flagged()` aggregation.
- No transport: callers bring their own HTTP client.

Modules
- `models`: Data structures for Runs and Moderations.
- `error`: `PayloadError` and the crate `Result` alias.
- `util`: Shared helpers (tracing, env config, input reading).
"#]

pub mod error;
pub mod models;
pub mod util;

pub use crate::error::{PayloadError, Result};

// Re-export model namespaces for convenience (downstream users can do `use oai_payloads::moderation`).
pub use crate::models::{moderation, runs};
pub use crate::models::{ModerationCategory, ModerationReport, ToolOutput, ToolOutputSubmission};
