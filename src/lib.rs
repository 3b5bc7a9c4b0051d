//! homeconfidence: Monte Carlo home-price simulation and offer confidence scoring
//!
//! This library provides the core components for:
//! - Request validation and ZIP normalization
//! - Market parameter estimation from ZHVI history
//! - Seeded geometric Brownian motion path simulation
//! - Outcome aggregation into percentiles and a confidence score
//! - Fragility, fair value and affordability assessments
//! - Plain-English explanations (template or LLM)
//! - HTTP API and CLI surfaces
//! - Logging and Prometheus metrics

pub mod affordability;
pub mod aggregate;
pub mod api;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod explain;
pub mod fair_value;
pub mod fragility;
pub mod market;
pub mod report;
pub mod request;
pub mod simulation;
pub mod telemetry;
