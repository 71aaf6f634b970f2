//! Error taxonomy for the transformation pipeline.
//!
//! Materialization failures are not represented here: whatever the isolate
//! raises while materializing or invoking a factory is propagated unmodified
//! as an [`anyhow::Error`] from the runtime module.

use thiserror::Error;

/// Failure modes of the source-to-factory pipeline.
///
/// None of these are recovered locally. The pipeline raises immediately and
/// the caller decides what to do with a failed transformation attempt.
#[derive(Debug, Error)]
pub enum TransformError {
    /// No default-exported entry symbol could be identified in the source.
    #[error("no default-exported component found in source")]
    MissingDefaultExport,

    /// The syntax transformation stage could not produce output.
    #[error("syntax transformation failed: {message}")]
    Syntax { message: String },
}

impl TransformError {
    pub fn syntax(message: impl Into<String>) -> Self {
        TransformError::Syntax {
            message: message.into(),
        }
    }
}
