//! Floating tag computation for versioned image tags
//!
//! Given the concrete tags of a repository (`14.10.2`, `14.10.3`, `14.11.1`, ...),
//! computes floating aliases (`14`, `14.10`, `14.11`) pointing at the best
//! concrete version for each prefix.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Parser    │────▶│  Resolver   │────▶│    Plan     │
//! │ (tag→id)    │     │ (facade)    │     │ (copy list) │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │
//!                            ▼
//! ┌─────────────┐     ┌─────────────┐
//! │    Keys     │◀────│  Aggregate  │
//! │ (truncate)  │     │ (reduce)    │
//! └─────────────┘     └─────────────┘
//!                            │
//!                            ▼
//!                     ┌─────────────┐
//!                     │   Compare   │
//!                     │ (ordering)  │
//!                     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`parser`]: Raw tag to [`identifier::VersionId`]
//! - [`compare`]: Ordering within a comparability class, plus the release order
//! - [`keys`]: Aggregation keys (floating tag names) for an identifier
//! - [`aggregate`]: Key to best-candidate reduction
//! - [`filter`]: Inclusion filters
//! - [`resolve`]: Facade running all of the above over a tag list
//! - [`plan`]: Ordered copy tasks for mirroring
//! - [`error`]: Error types

pub mod aggregate;
pub mod compare;
pub mod error;
pub mod filter;
pub mod identifier;
pub mod keys;
pub mod parser;
pub mod plan;
pub mod resolve;

pub use compare::SpecificityOrder;
pub use error::{ParseFailure, VersionError};
pub use identifier::VersionId;
pub use parser::VersionParser;
pub use resolve::{Resolution, TagResolver};
