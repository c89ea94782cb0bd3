//! Task and person tracking with completion statistics.
//!
//! This module implements the tracking core: creating tasks, assigning them
//! to people, driving the task status lifecycle, and folding each first-time
//! completion into the assignee's running statistics (total completed tasks
//! and average duration in minutes). The task write and the conditional
//! person write commit as one atomic unit. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
