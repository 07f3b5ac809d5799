//! Descriptive statistics for aggregated per-precinct counts.

pub mod math;

pub use math::central::*;
pub use math::fences::{Fences, OutlierClass, IQR_MULTIPLIER};
pub use math::moments::*;
pub use math::quantile::*;
pub use math::summary::{StatisticsSummary, StatsError};
