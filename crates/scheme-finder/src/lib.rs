//! Scheme and scholarship discovery: profile documents, catalog adapters, and the
//! eligibility matcher that decides which programs a citizen qualifies for.

pub mod config;
pub mod eligibility;
pub mod error;
pub mod telemetry;
