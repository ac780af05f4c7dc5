use thiserror::Error;

/// Errors produced while encoding or decoding payloads.
#[derive(Error, Debug)]
pub enum PayloadError {
    /// Inbound JSON did not match the expected shape: a required key was
    /// missing, a value had the wrong type, or a container was not a list.
    #[error("Schema mismatch in {payload}: {source}")]
    SchemaMismatch {
        payload: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("Encoding error: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PayloadError {
    pub(crate) fn mismatch(payload: &'static str, source: serde_json::Error) -> Self {
        PayloadError::SchemaMismatch { payload, source }
    }

    pub fn is_schema_mismatch(&self) -> bool {
        matches!(self, PayloadError::SchemaMismatch { .. })
    }
}

pub type Result<T> = std::result::Result<T, PayloadError>;
