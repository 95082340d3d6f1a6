use std::fmt;

use crate::error::ConversionError;

/// The types a stored value can be read as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Integer,
    Float,
}

impl ValueKind {
    /// Interprets a raw stored value as this kind.
    ///
    /// Strings come back untouched. Numbers ignore surrounding whitespace, since trailing
    /// spaces are kept in stored values.
    pub fn parse(self, raw: &str) -> Result<Value, ConversionError> {
        Ok(match self {
            Self::String => Value::String(raw.to_owned()),
            Self::Integer => Value::Integer(parse_integer(raw)?),
            Self::Float => Value::Float(parse_float(raw)?),
        })
    }
}

pub(crate) fn parse_integer(raw: &str) -> Result<i64, ConversionError> {
    raw.trim().parse().map_err(ConversionError::Integer)
}

pub(crate) fn parse_float(raw: &str) -> Result<f64, ConversionError> {
    raw.trim().parse().map_err(ConversionError::Float)
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::String => "string".fmt(f),
            Self::Integer => "integer".fmt(f),
            Self::Float => "float".fmt(f),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
}

impl Value {
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::String(_) => ValueKind::String,
            Self::Integer(_) => ValueKind::Integer,
            Self::Float(_) => ValueKind::Float,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match *self {
            Self::Integer(n) => Some(n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match *self {
            Self::Float(n) => Some(n),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => s.fmt(f),
            Self::Integer(n) => n.fmt(f),
            Self::Float(n) => n.fmt(f),
        }
    }
}
