//! Unit test suite entry point.

mod config_tests;
mod corpus_file_tests;
mod scenario_tests;
mod static_model_tests;
