//! Common test utilities and fixtures
//!
//! This module provides shared test infrastructure including:
//! - In-memory and on-disk model databases
//! - A builder for forests and instance joins
//! - Assertions over the pass outputs

#![allow(dead_code)]

pub mod assertions;
pub mod fixtures;

// Re-export commonly used items
pub use assertions::*;
pub use fixtures::*;
