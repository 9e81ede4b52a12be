//! Matching and ranking over the documentation catalog.
//!
//! Two entry points: [`resolve`] looks a query up within one kind, and
//! [`search_all`] buckets matches from the whole catalog into relevance tiers.
//! Both are synchronous, read-only and allocation-light.

pub mod distance;
pub mod query;
pub mod resolve;
pub mod tiered;

pub use distance::{closest_match, distance, rank_by_distance};
pub use query::Query;
pub use resolve::{Closeness, MatchResult, NO_MATCH, Outcome, RankKey, ResolveOptions, resolve};
pub use tiered::{Tier, TierListing, TieredResults, search_all};
