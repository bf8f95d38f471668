//! Domain layer for plansync
//!
//! This module contains the planning records, the run summary, error types
//! and the port traits implemented by adapters.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult, SetupError};
