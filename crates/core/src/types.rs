/// Game and genre primary keys are PostgreSQL `uuid` columns.
pub type GameId = uuid::Uuid;

/// Genres share the uuid key space with games but are a separate table.
pub type GenreId = uuid::Uuid;

/// User ids are opaque strings issued by the external identity provider.
/// The core trusts them as-is and never re-validates.
pub type UserId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
