//! Pareto ranking: dominance analysis, non-dominated sorting and crowding
//! distance estimation.
//!
//! All objectives are minimized. Two chromosomes with identical objective
//! vectors dominate neither each other, so they always share a front.

pub mod crowding;
pub mod domination;
pub mod sorting;

pub use crowding::{crowding_scores, truncate_by_crowding, CrowdingScore};
pub use domination::{analyze_domination, DominationRecord};
pub use sorting::{non_dominated_sort, sort_fronts, Sorting};
