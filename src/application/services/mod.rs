//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! The domain stays pure; size limits and strategy choice live here.

mod enumeration;

pub use enumeration::{EnumerationService, SearchOutcome};
