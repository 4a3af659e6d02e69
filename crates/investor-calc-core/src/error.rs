use thiserror::Error;

#[derive(Debug, Error)]
pub enum InvestorCalcError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Cannot solve for {target}: {reason}")]
    InvalidSolveTarget { target: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl InvestorCalcError {
    /// Overflow past `Decimal`'s representable range, attributed to the
    /// input that drove it.
    pub(crate) fn overflow(field: &str) -> Self {
        InvestorCalcError::InvalidInput {
            field: field.into(),
            reason: "value exceeds the representable numeric range".into(),
        }
    }
}

impl From<serde_json::Error> for InvestorCalcError {
    fn from(e: serde_json::Error) -> Self {
        InvestorCalcError::SerializationError(e.to_string())
    }
}
