//! Recommendation generation and the service facade.
//!
//! [`generator::RecommendationGenerator`] assembles candidate lists from
//! interaction history and popularity; [`service::RecommendationService`]
//! wraps it with caching, invalidation, and interaction recording. The
//! HTTP layer consumes the service through plain ids and models; no
//! transport types cross this boundary.

pub mod error;
pub mod generator;
pub mod service;

pub use error::{RecommendError, RecommendResult};
pub use service::RecommendationService;
