/// Domain-level error taxonomy.
///
/// Infrastructure failures (database, cache) are wrapped at the service
/// boundary; this enum covers only errors the pure core can express.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
