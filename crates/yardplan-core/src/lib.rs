//! # YardPlan Core
//!
//! Core types, errors, and unit handling for YardPlan.
//! Provides the error taxonomy shared by every layer, feet
//! formatting/parsing, and the geometry defaults used by the
//! render adapters and settings.

pub mod constants;
pub mod error;
pub mod units;

pub use error::{Error, GeometryError, PersistenceError, PlacementError, Result};

pub use units::{format_feet, parse_feet, round_position};
