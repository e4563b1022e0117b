use thiserror::Error;

/// Errors raised by the simulation core.
///
/// None of these ever escape the per-frame tick: fetch and render faults are
/// logged and degrade the affected feature only.
#[derive(Error, Debug)]
pub enum OrreryError {
    /// A catalog feed could not be fetched or was unusable.
    #[error("failed to fetch {source_name}: {reason}")]
    DataFetch { source_name: String, reason: String },

    /// A numeric orbital element was missing, non-finite or out of range.
    #[error("invalid orbital element {field}: {value}")]
    InvalidOrbitalElements { field: &'static str, value: String },

    /// A raw record or config document did not match its expected shape.
    #[error("malformed record: {0}")]
    RecordParse(#[from] serde_json::Error),

    /// The compositing path failed; the caller falls back to direct rendering.
    #[error("composite pass failed: {0}")]
    Rendering(String),

    /// A lookup named a body that is not in the catalog.
    #[error("unknown body: {0}")]
    UnknownBody(String),
}

impl OrreryError {
    pub fn fetch(source_name: impl Into<String>, reason: impl ToString) -> Self {
        OrreryError::DataFetch {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }

    pub fn invalid(field: &'static str, value: impl ToString) -> Self {
        OrreryError::InvalidOrbitalElements {
            field,
            value: value.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, OrreryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failing_part() {
        let err = OrreryError::invalid("e", 1.5);
        assert_eq!(err.to_string(), "invalid orbital element e: 1.5");

        let err = OrreryError::fetch("sentry", "timeout");
        assert_eq!(err.to_string(), "failed to fetch sentry: timeout");
    }

    #[test]
    fn serde_errors_convert() {
        let parsed: std::result::Result<u32, _> = serde_json::from_str("nope");
        let err: OrreryError = parsed.unwrap_err().into();
        assert!(matches!(err, OrreryError::RecordParse(_)));
    }
}
