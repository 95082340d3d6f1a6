use std::fmt;

use crate::error::SplitError;
use crate::line::{LineKind, split_pair};
use crate::section::Section;

/// A line that was skipped while loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based line number.
    pub line: usize,
    pub kind: DiagnosticKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// The line is neither a comment, a section header nor a field.
    BadSyntax,
    /// A field line that did not split into a key and a value.
    Field(SplitError),
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DiagnosticKind::BadSyntax => write!(f, "bad syntax at line {}", self.line),
            DiagnosticKind::Field(SplitError::NoValue) => {
                write!(f, "no value in line {}", self.line)
            }
            DiagnosticKind::Field(SplitError::Malformed) => {
                write!(f, "malformed line {}", self.line)
            }
        }
    }
}

/// Represents an on-going parse.
#[derive(Debug, Clone)]
pub struct Parser<'a> {
    text: &'a str,
    sections: Vec<Section>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Parser<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            sections: Vec::with_capacity(16),
            diagnostics: Vec::new(),
        }
    }
}

impl Parser<'_> {
    /// Runs the load pass to the end of the text.
    ///
    /// The active section is an index into `sections`, threaded through the loop. Fields that
    /// show up before any header go into a section with an empty name.
    pub fn finish(mut self) -> (Vec<Section>, Vec<Diagnostic>) {
        let text = self.text;
        let mut active = None::<usize>;

        for (i, line) in text.lines().enumerate() {
            let number = i + 1;
            // `lines` leaves the `\r` on a final line that has no `\n` after it.
            let line = line.strip_suffix('\r').unwrap_or(line);
            match LineKind::of(line) {
                LineKind::Comment | LineKind::Empty => {}
                LineKind::Section => active = Some(self.open_section(line)),
                LineKind::Field => {
                    let index = match active {
                        Some(index) => index,
                        None => {
                            let index = self.open_named("");
                            active = Some(index);
                            index
                        }
                    };
                    self.add_field(line, index, number);
                }
                LineKind::Unknown => self.report(number, DiagnosticKind::BadSyntax),
            }
        }

        (self.sections, self.diagnostics)
    }

    /// Opens the section named by a header line, creating it if needed.
    ///
    /// Every `[`, `]` and space is removed, so `[My Section]` names `MySection`.
    fn open_section(&mut self, line: &str) -> usize {
        let name = line
            .chars()
            .filter(|&c| !matches!(c, '[' | ']' | ' '))
            .collect::<String>();

        self.open_named(&name)
    }

    fn open_named(&mut self, name: &str) -> usize {
        // Repeated headers reopen the existing section rather than replacing it.
        if let Some(i) = self.sections.iter().position(|section| section.name() == name) {
            return i;
        }

        tracing::debug!(section = name, "new section");
        self.sections.push(Section::new(name.to_owned()));
        self.sections.len() - 1
    }

    fn add_field(&mut self, line: &str, index: usize, number: usize) {
        match parse_field(line) {
            Ok((key, value)) => {
                tracing::debug!(section = self.sections[index].name(), %key, %value, "field");
                self.sections[index].insert(key, value);
            }
            Err(e) => self.report(number, DiagnosticKind::Field(e)),
        }
    }

    fn report(&mut self, line: usize, kind: DiagnosticKind) {
        let diagnostic = Diagnostic { line, kind };
        tracing::warn!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }
}

/// Turns `key = value ; comment` into `("key", "value")`.
fn parse_field(line: &str) -> Result<(String, String), SplitError> {
    let (key, rest) = split_pair(line, '=')?;

    let key = key.chars().filter(|&c| c != ' ').collect::<String>();

    // A value made only of spaces has no first non-space character and is kept whole.
    let value = match rest.find(|c: char| c != ' ') {
        Some(start) => &rest[start..],
        None => rest,
    };
    // Spaces between a value and its inline comment belong to the comment.
    let value = match value.split_once(';') {
        Some((value, _comment)) => value.trim_end_matches(' '),
        None => value,
    };

    Ok((key, value.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> (Vec<Section>, Vec<Diagnostic>) {
        Parser::new(text).finish()
    }

    #[test]
    fn field_key_and_value() {
        assert_eq!(
            parse_field("var1 = hello ; a comment"),
            Ok(("var1".to_owned(), "hello".to_owned()))
        );
        assert_eq!(
            parse_field("my key =   spaced  value"),
            Ok(("mykey".to_owned(), "spaced  value".to_owned()))
        );
        assert_eq!(parse_field("var2=42"), Ok(("var2".to_owned(), "42".to_owned())));
        assert_eq!(
            parse_field("trailing = kept  "),
            Ok(("trailing".to_owned(), "kept  ".to_owned()))
        );
        assert_eq!(parse_field("empty = ;"), Ok(("empty".to_owned(), String::new())));
        assert_eq!(parse_field("blank =   "), Ok(("blank".to_owned(), "   ".to_owned())));
    }

    #[test]
    fn field_without_value() {
        assert_eq!(parse_field("key="), Err(SplitError::NoValue));
        assert_eq!(parse_field("a = b = c"), Err(SplitError::Malformed));
    }

    #[test]
    fn section_names_lose_spaces() {
        let (sections, diagnostics) = parse("[ My Section ]\nkey = value\n");

        assert!(diagnostics.is_empty());
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].name(), "MySection");
        assert_eq!(sections[0].get("key"), Some("value"));
    }

    #[test]
    fn reopened_section_accumulates() {
        let (sections, _) = parse("[A]\nx = 1\n[B]\ny = 2\n[A]\nz = 3\n");

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].name(), "A");
        assert_eq!(sections[0].keys().collect::<Vec<_>>(), ["x", "z"]);
        assert_eq!(sections[1].get("y"), Some("2"));
    }

    #[test]
    fn fields_before_any_header() {
        let (sections, diagnostics) = parse("orphan = 1\n[A]\nx = 2\n");

        assert!(diagnostics.is_empty());
        assert_eq!(sections[0].name(), "");
        assert_eq!(sections[0].get("orphan"), Some("1"));
        assert_eq!(sections[1].get("x"), Some("2"));
    }

    #[test]
    fn bad_lines_are_reported_and_skipped() {
        let (sections, diagnostics) =
            parse("[A]\ngarbage[]=text\nkey=\nx = 1 = 2\n   \nok = yes\n");

        assert_eq!(sections[0].fields(), [("ok".to_owned(), "yes".to_owned())]);
        assert_eq!(
            diagnostics,
            [
                Diagnostic {
                    line: 2,
                    kind: DiagnosticKind::BadSyntax
                },
                Diagnostic {
                    line: 3,
                    kind: DiagnosticKind::Field(SplitError::NoValue)
                },
                Diagnostic {
                    line: 4,
                    kind: DiagnosticKind::Field(SplitError::Malformed)
                },
                Diagnostic {
                    line: 5,
                    kind: DiagnosticKind::BadSyntax
                },
            ]
        );
        assert_eq!(diagnostics[0].to_string(), "bad syntax at line 2");
        assert_eq!(diagnostics[1].to_string(), "no value in line 3");
        assert_eq!(diagnostics[2].to_string(), "malformed line 4");
    }

    #[test]
    fn crlf_line_endings() {
        let (sections, diagnostics) = parse("[A]\r\nkey = value\r\n");

        assert!(diagnostics.is_empty());
        assert_eq!(sections[0].get("key"), Some("value"));
    }

    #[test]
    fn carriage_return_on_last_line() {
        let (sections, diagnostics) = parse("[A]\r\nkey = value\r");

        assert!(diagnostics.is_empty());
        assert_eq!(sections[0].get("key"), Some("value"));
    }
}
