//! Entity models matching database rows.
//!
//! Each struct derives `FromRow` plus `Serialize`; [`game::Game`] also
//! derives `Deserialize` because cached recommendation lists round-trip
//! through JSON.

pub mod game;
pub mod genre;
pub mod interaction;
pub mod seen_game;
