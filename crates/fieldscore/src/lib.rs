//! Scoring and reporting workflows for monthly station maintenance rounds.
//!
//! The crate is organized around two workflows: `workflows::scorecard`, the
//! dynamic visit-scoring engine together with its report journal and HTTP
//! surface, and `workflows::roster`, the CSV-backed company directory that
//! supplies each company's station quota.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
