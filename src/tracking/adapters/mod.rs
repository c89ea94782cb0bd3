//! Adapter implementations for tracking ports.

pub mod memory;
