//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` (reads) or `&mut PgConnection` (writes that callers
//! compose into a transaction) as the first argument.

pub mod game_repo;
pub mod interaction_repo;
pub mod seen_game_repo;

pub use game_repo::GameRepo;
pub use interaction_repo::InteractionRepo;
pub use seen_game_repo::SeenGameRepo;
