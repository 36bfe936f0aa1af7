//! Error handling for YardPlan
//!
//! Provides comprehensive error types for all layers of the application:
//! - Geometry errors (invalid yard or object inputs)
//! - Placement errors (containment and naming rules)
//! - Persistence errors (layout file reading/writing)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Geometry error type
///
/// Represents errors in the raw numeric inputs to geometry computations,
/// before any placement rule is evaluated.
#[derive(Error, Debug, Clone)]
pub enum GeometryError {
    /// Yard dimensions must both be positive
    #[error("Yard dimensions must be positive: {front_width} x {left_depth} ft")]
    NonPositiveYard {
        /// The yard width along the front edge, in feet.
        front_width: f64,
        /// The yard depth along the left edge, in feet.
        left_depth: f64,
    },

    /// A coordinate or dimension was NaN or infinite
    #[error("{what} is not a finite number: {value}")]
    NonFiniteCoordinate {
        /// Which coordinate or dimension was non-finite.
        what: String,
        /// The offending value.
        value: f64,
    },

    /// Rotation must be a multiple of 90 degrees
    #[error("Rotation must be one of 0, 90, 180, 270 degrees, got {degrees}")]
    InvalidRotation {
        /// The rejected rotation in degrees.
        degrees: i32,
    },

    /// An object dimension must be positive
    #[error("{what} must be positive, got {value}")]
    NonPositiveSize {
        /// Which dimension was non-positive.
        what: String,
        /// The offending value.
        value: f64,
    },
}

/// Placement error type
///
/// Represents violations of the layout rules: objects must stay inside the
/// yard and carry a name unique within the layout. These are recoverable;
/// the layout is unchanged when one is returned.
#[derive(Error, Debug, Clone)]
pub enum PlacementError {
    /// Object extends past a yard edge
    #[error("'{name}' extends {by_ft:.1} ft past the {edge} edge of the yard")]
    OutOfBounds {
        /// The name of the object that failed placement.
        name: String,
        /// The yard edge that was crossed.
        edge: String,
        /// How far past the edge the object extends, in feet.
        by_ft: f64,
    },

    /// An object with this name already exists
    #[error("An object named '{name}' already exists in this layout")]
    DuplicateName {
        /// The duplicated name.
        name: String,
    },

    /// No object with this name exists
    #[error("No object named '{name}' in this layout")]
    NotFound {
        /// The name that was looked up.
        name: String,
    },
}

/// Persistence error type
///
/// Represents errors reading or writing a saved layout file.
#[derive(Error, Debug, Clone)]
pub enum PersistenceError {
    /// Layout file format version is not supported
    #[error("Unsupported layout file version: {version}")]
    UnsupportedVersion {
        /// The version string found in the file.
        version: String,
    },

    /// Object record has an unrecognized kind
    #[error("Unknown object kind: {kind}")]
    UnknownObjectKind {
        /// The unrecognized kind string.
        kind: String,
    },

    /// Object record is missing a field its kind requires
    #[error("Object of kind '{kind}' is missing required field '{field}'")]
    MissingField {
        /// The object kind being parsed.
        kind: String,
        /// The required field that was absent.
        field: String,
    },

    /// Layout file could not be parsed
    #[error("Malformed layout file: {reason}")]
    Malformed {
        /// The reason parsing failed.
        reason: String,
    },

    /// Layout file could not be read
    #[error("Failed to read layout file {path}: {reason}")]
    ReadFailed {
        /// The path that could not be read.
        path: String,
        /// The underlying failure.
        reason: String,
    },

    /// Layout file could not be written
    #[error("Failed to write layout file {path}: {reason}")]
    WriteFailed {
        /// The path that could not be written.
        path: String,
        /// The underlying failure.
        reason: String,
    },
}

/// Main error type for YardPlan
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Placement error
    #[error(transparent)]
    Placement(#[from] PlacementError),

    /// Persistence error
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is an out-of-bounds placement rejection
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, Error::Placement(PlacementError::OutOfBounds { .. }))
    }

    /// Check if this is a duplicate-name placement rejection
    pub fn is_duplicate_name(&self) -> bool {
        matches!(self, Error::Placement(PlacementError::DuplicateName { .. }))
    }

    /// Check if this is an unknown-object-name rejection
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Placement(PlacementError::NotFound { .. }))
    }

    /// Check if this is a geometry error
    pub fn is_geometry_error(&self) -> bool {
        matches!(self, Error::Geometry(_))
    }

    /// Check if this is a persistence error
    pub fn is_persistence_error(&self) -> bool {
        matches!(self, Error::Persistence(_))
    }

    /// Check if this is recoverable: an input or placement rejection
    /// that left the layout unchanged, so the caller may retry with
    /// corrected values.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Geometry(_) | Error::Placement(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

// Conversions between error types are automatic via `from` implementations
