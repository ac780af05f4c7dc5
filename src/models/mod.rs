//! Wire models for the Runs and Moderations APIs.
//!
//! This module groups two submodules:
//! - `runs`: the tool-output submission sent to a run awaiting `submit_tool_outputs`.
//! - `moderation`: the moderation request and the report decoded from the response.

pub mod moderation;
pub mod runs;

// Optional convenience re-exports for downstream users.
pub use moderation::{
    CategorySet, ModerationCategory, ModerationInput, ModerationReport, ModerationRequest,
    ModerationResult, UnknownCategory,
};
pub use runs::{ToolOutput, ToolOutputSubmission};
