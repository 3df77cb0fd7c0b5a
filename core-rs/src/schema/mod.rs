//! Token position schemas
//!
//! A schema describes the expected structure of a campaign name for one
//! platform as an ordered list of positions:
//!
//! ```text
//! mny_make_others_awareness-snapads-mny-equity-ramadan_0225_sa_auction_...
//! │   │    │      │                                    │    │
//! │   │    │      Theme (sep "", looks ahead to "_")   │    Market
//! │   │    Group                                       Period (sep "")
//! │   Category
//! Brand
//! ```
//!
//! Schemas are validated when they are built (1..=15 positions, compiled
//! format patterns, named positions, non-empty synonym entries) and are immutable afterwards.

mod position;
mod presets;

pub use position::{SynonymMap, TokenPositionRule, TokenPositionSchema, DEFAULT_SEPARATOR, MAX_POSITIONS};
pub use presets::{builtin_platforms, builtin_schema, SchemaTemplate, BUILTIN_PLATFORMS};
