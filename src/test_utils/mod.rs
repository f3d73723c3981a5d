//! Shared test utilities for jobmatch.

pub mod fixtures;
pub mod logging;
