//! Property-based tests for the ranking pipeline.

mod ranking_properties;
mod text_properties;
