use thiserror::Error;

/// Unified error type for the entire finance-forecast-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
///
/// Degenerate time series and malformed session data are recovered
/// locally and never show up here.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    // ── User input ──────────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    // ── Caller contract ─────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unknown {kind}: '{value}'")]
    UnknownVariant { kind: String, value: String },

    // ── Lookups ─────────────────────────────────────────────────────
    #[error("Expense not found: {0}")]
    ExpenseNotFound(String),

    #[error("Holding not found: {0}")]
    HoldingNotFound(String),

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    // ── Serialization / Configuration ───────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}

impl CoreError {
    /// Shorthand for an unknown enum string.
    pub fn unknown(kind: &str, value: &str) -> Self {
        CoreError::UnknownVariant {
            kind: kind.to_string(),
            value: value.to_string(),
        }
    }

    /// True for rejected user input, the only kind surfaced to the user
    /// as a rejection message. Everything else indicates caller misuse.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, CoreError::ValidationError(_))
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}
