use serde::{Deserialize, Serialize};

use crate::error::{PayloadError, Result};

/// One tool call result submitted back to a run in `requires_action` state.
///
/// Both fields always appear on the wire; an absent value is encoded as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolOutput {
    /// Id of the tool call in the run's `required_action` the output belongs to.
    #[serde(default)]
    pub tool_call_id: Option<String>,
    /// Output of the tool call.
    #[serde(default)]
    pub output: Option<String>,
}

impl ToolOutput {
    pub fn new(tool_call_id: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            tool_call_id: Some(tool_call_id.into()),
            output: Some(output.into()),
        }
    }

    /// An entry carrying neither a call id nor an output. Accepted as-is.
    pub fn is_blank(&self) -> bool {
        self.tool_call_id.is_none() && self.output.is_none()
    }
}

/// Request body for `POST /threads/{thread_id}/runs/{run_id}/submit_tool_outputs`.
///
/// All outputs of a run step go out in a single request, in the order given.
///
/// Example:
/// { "tool_outputs": [ { "tool_call_id": "call_1", "output": "42" } ] }
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolOutputSubmission {
    pub tool_outputs: Vec<ToolOutput>,
}

impl ToolOutputSubmission {
    pub fn new(tool_outputs: Vec<ToolOutput>) -> Self {
        Self { tool_outputs }
    }

    pub fn push(&mut self, output: ToolOutput) {
        self.tool_outputs.push(output);
    }

    pub fn len(&self) -> usize {
        self.tool_outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tool_outputs.is_empty()
    }

    pub fn to_value(&self) -> Result<serde_json::Value> {
        self.trace_encode();
        serde_json::to_value(self).map_err(PayloadError::Encode)
    }

    pub fn to_json(&self) -> Result<String> {
        self.trace_encode();
        serde_json::to_string(self).map_err(PayloadError::Encode)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        self.trace_encode();
        serde_json::to_string_pretty(self).map_err(PayloadError::Encode)
    }

    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| PayloadError::mismatch("tool output submission", e))
    }

    fn trace_encode(&self) {
        for (index, entry) in self.tool_outputs.iter().enumerate() {
            if entry.is_blank() {
                tracing::warn!(index, "tool output has neither tool_call_id nor output");
            }
        }
        tracing::debug!(count = self.tool_outputs.len(), "encoding tool output submission");
    }
}

impl FromIterator<ToolOutput> for ToolOutputSubmission {
    fn from_iter<I: IntoIterator<Item = ToolOutput>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl FromIterator<(String, String)> for ToolOutputSubmission {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(id, output)| ToolOutput::new(id, output))
            .collect()
    }
}
