use thiserror::Error;

/// Errors raised while compiling a search filter into a SQL fragment.
///
/// Both are deterministic for a given catalog, so callers should fail the
/// whole compilation pass instead of retrying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// The filter field is neither a reserved field nor a known attribute.
    #[error("Attribute '{field}' not found for entity '{entity}'")]
    AttributeNotFound { entity: String, field: String },

    /// Entity metadata has no link/identifier field for the entity.
    #[error("Cannot resolve link field for entity '{entity}'")]
    LinkFieldResolution { entity: String },
}
