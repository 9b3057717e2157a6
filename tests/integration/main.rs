//! Integration tests for towr-replay

mod cli_test;
mod load_test;
