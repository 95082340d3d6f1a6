use std::io;
use std::num::{ParseFloatError, ParseIntError};
use std::path::PathBuf;

use thiserror::Error;

use crate::value::ValueKind;

/// Failure to produce a [`Document`](crate::Document) at all.
///
/// Problems with individual lines never end up here; they are recorded as
/// [`Diagnostic`](crate::Diagnostic)s and the load carries on.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no such file: {}", path.display())]
    NoSuchFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read data")]
    Read {
        #[source]
        source: io::Error,
    },
}

/// Outcome of splitting a line or a value path into exactly two parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SplitError {
    /// Fewer than two parts.
    #[error("no value in line")]
    NoValue,
    /// More than two parts.
    #[error("malformed line")]
    Malformed,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("invalid value path {path:?}")]
    InvalidPath {
        path: String,
        #[source]
        source: SplitError,
    },
    #[error("no such section: {section:?}")]
    NoSuchSection { section: String },
    #[error("no field {field:?} in section {section:?}")]
    NoSuchField { section: String, field: String },
    #[error("cannot convert {value:?} to {kind}")]
    Conversion {
        value: String,
        kind: ValueKind,
        #[source]
        source: ConversionError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error(transparent)]
    Integer(ParseIntError),
    #[error(transparent)]
    Float(ParseFloatError),
}
