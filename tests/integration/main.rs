//! Integration tests

mod analyze_test;
mod api_test;
mod common;
mod market_test;
