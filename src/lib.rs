//! Taskdb: task tracking with lifecycle-coupled completion statistics.
//!
//! This crate provides the orchestration core of a task tracking system: a
//! task status lifecycle, optional assignment of tasks to people, and an
//! incrementally maintained per-person aggregate (total completed tasks and
//! average task duration) that must stay consistent with that lifecycle.
//!
//! # Architecture
//!
//! Taskdb follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory storage)
//!
//! # Modules
//!
//! - [`tracking`]: Task lifecycle, person directory, completion statistics,
//!   and reporting

pub mod tracking;
