use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("invalid audit event JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("invalid audit event JSON on line {line}: {source}")]
    InvalidLine {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("audit record {position} is not a JSON object")]
    NotAnObject { position: usize },
}

pub type Result<T> = std::result::Result<T, AuditError>;
