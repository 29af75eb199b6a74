#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Duplicate datalogger id: {0}")]
    DuplicateLogger(String),
}

impl CoreError {
    /// Shorthand for a missing datalogger.
    pub fn logger_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "Datalogger",
            id: id.into(),
        }
    }
}
