//! Matching pipeline: cost construction, optimal assignment, orchestration

/// Exact minimum-cost bipartite assignment solver
pub mod assignment;
/// Dense pairwise cost matrix construction
pub mod cost;
/// Tile swap pipeline orchestration for an image pair
pub mod executor;
