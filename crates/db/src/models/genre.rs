use playdeck_core::types::GenreId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `genres` lookup table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}
