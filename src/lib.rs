#![warn(
    clippy::correctness,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::style,
    clippy::pedantic
)]

mod error;
mod line;
mod parser;
mod section;
mod value;

use std::io::Read;
use std::path::Path;
use std::{char, fs};

pub use error::{ConversionError, LoadError, QueryError, SplitError};
pub use line::LineKind;
pub use parser::{Diagnostic, DiagnosticKind};
pub use section::Section;
pub use value::{Value, ValueKind};

use crate::line::split_pair;
use crate::parser::Parser;

/// Byte Order Mark (BOM) is used to signal the endianness of an encoding. The order `0xFF 0xFE`
/// strongly suggests that the encoding is using little-endian byte order.
///
/// <https://en.wikipedia.org/wiki/Byte_order_mark>
const BOM_UTF16_LE: &[u8] = &[0xFF, 0xFE];
const BOM_UTF8: &[u8] = &[0xEF, 0xBB, 0xBF];

/// An INI file loaded into memory.
///
/// Values are kept exactly as they were read and only interpreted when queried with a
/// `"section.field"` path. A `Document` cannot be changed once it has been built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    sections: Vec<Section>,
    diagnostics: Vec<Diagnostic>,
}

impl Document {
    /// Reads and parses the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::NoSuchFile`] if the file cannot be read. Bad lines inside the file
    /// are not errors; see [`Document::diagnostics`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let buffer = fs::read(path).map_err(|source| LoadError::NoSuchFile {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(path = %path.display(), bytes = buffer.len(), "loading");
        Ok(Self::parse(&buffer))
    }

    /// # Errors
    ///
    /// Returns [`LoadError::Read`] if `reader` fails.
    pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self, LoadError> {
        let mut buffer = Vec::with_capacity(4096);
        reader
            .read_to_end(&mut buffer)
            .map_err(|source| LoadError::Read { source })?;

        Ok(Self::parse(&buffer))
    }

    #[must_use]
    pub fn parse(buffer: &[u8]) -> Self {
        let text = decode_data(buffer);
        let (sections, diagnostics) = Parser::new(&text).finish();

        Self {
            sections,
            diagnostics,
        }
    }

    /// Sections in the order they were first declared.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.name() == name)
    }

    /// Lines that were skipped while loading.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Returns the raw value stored at `path`.
    ///
    /// # Errors
    ///
    /// Fails if `path` is not exactly `"section.field"`, or if the section or the field does
    /// not exist.
    pub fn get_str(&self, path: &str) -> Result<&str, QueryError> {
        let (section_name, field) = split_pair(path, '.').map_err(|source| QueryError::InvalidPath {
            path: path.to_owned(),
            source,
        })?;

        let section = self
            .section(section_name)
            .ok_or_else(|| QueryError::NoSuchSection {
                section: section_name.to_owned(),
            })?;

        section.get(field).ok_or_else(|| {
            let available = section.keys().collect::<Vec<_>>().join(", ");
            tracing::warn!("no field {field:?} in section {section_name:?}; available: {available}");

            QueryError::NoSuchField {
                section: section_name.to_owned(),
                field: field.to_owned(),
            }
        })
    }

    /// Reads the value at `path` as `kind`.
    ///
    /// # Errors
    ///
    /// Fails for the same reasons as [`Document::get_str`], or with
    /// [`QueryError::Conversion`] if the stored text is not a valid `kind`.
    pub fn get(&self, path: &str, kind: ValueKind) -> Result<Value, QueryError> {
        self.convert(path, kind, |raw| kind.parse(raw))
    }

    /// # Errors
    ///
    /// See [`Document::get`].
    pub fn get_int(&self, path: &str) -> Result<i64, QueryError> {
        self.convert(path, ValueKind::Integer, value::parse_integer)
    }

    /// # Errors
    ///
    /// See [`Document::get`].
    pub fn get_float(&self, path: &str) -> Result<f64, QueryError> {
        self.convert(path, ValueKind::Float, value::parse_float)
    }

    fn convert<T, F>(&self, path: &str, kind: ValueKind, parse: F) -> Result<T, QueryError>
    where
        F: FnOnce(&str) -> Result<T, ConversionError>,
    {
        let raw = self.get_str(path)?;

        parse(raw).map_err(|source| QueryError::Conversion {
            value: raw.to_owned(),
            kind,
            source,
        })
    }
}

fn decode_data(data: &[u8]) -> String {
    if let Some(data) = data.strip_prefix(BOM_UTF16_LE) {
        let chunks = data.chunks_exact(2);
        let dangling = !chunks.remainder().is_empty();
        let utf16 = chunks
            .map(|chunk| u16::from_le_bytes([chunk[0], chunk[1]]))
            .collect::<Vec<u16>>();

        let mut text = char::decode_utf16(utf16)
            .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect::<String>();
        // A lone trailing byte cannot be a code unit.
        if dangling {
            text.push(char::REPLACEMENT_CHARACTER);
        }
        text
    } else {
        let data = data.strip_prefix(BOM_UTF8).unwrap_or(data);
        String::from_utf8_lossy(data).into_owned()
    }
}
