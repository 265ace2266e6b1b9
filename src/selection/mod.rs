//! Filter & selection subsystem
//!
//! Pure transformations over the merged dataset:
//!
//! 1. `FilterConfig::apply` narrows the dataset to a `Selection`
//! 2. Each view sorts and truncates the selection independently
//! 3. `CategorySummary` and `EntityProfile` derive figures from it
//!
//! Columns are addressed through the closed `Metric` enumeration.

mod filter;
mod metric;
mod summary;
mod view;

pub use filter::{FilterConfig, DEFAULT_DISPLAY_LIMIT};
pub use metric::Metric;
pub use summary::{CategorySummary, DistributionEntry, EntityProfile, Slice};
pub use view::{CategoryRow, Selection};
