//! Credit decision engine.
//!
//! Scores a customer's loan history, prices requested loans with the standard
//! amortization formula, and applies the tiered approval policy. Storage is
//! reached only through the repository traits in [`workflows::lending`].

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
