use crate::error::SplitError;

/// What a single line of an INI file declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Comment,
    Empty,
    Section,
    Field,
    Unknown,
}

impl LineKind {
    /// Classifies a line that has already had its line terminator removed.
    ///
    /// The checks run in a fixed order, so a line starting with `;` is a comment even when it
    /// also contains `=` or brackets.
    #[must_use]
    pub fn of(line: &str) -> Self {
        let has_brackets = line.contains('[') || line.contains(']');
        let has_equals = line.contains('=');

        if line.starts_with(';') {
            Self::Comment
        } else if line.is_empty() {
            Self::Empty
        } else if line.contains('[') && line.contains(']') && !has_equals {
            Self::Section
        } else if has_equals && !has_brackets {
            Self::Field
        } else {
            Self::Unknown
        }
    }
}

/// Splits `text` on `delimiter` into exactly two parts.
///
/// A single trailing delimiter does not produce an empty final part, so `"key="` has no value
/// while `"key=="` has an empty one.
pub fn split_pair(text: &str, delimiter: char) -> Result<(&str, &str), SplitError> {
    let body = text.strip_suffix(delimiter).unwrap_or(text);
    let mut parts = body.split(delimiter);

    match (parts.next(), parts.next(), parts.next()) {
        (Some(first), Some(second), None) => Ok((first, second)),
        (_, None, _) => Err(SplitError::NoValue),
        _ => Err(SplitError::Malformed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_wins_over_everything() {
        assert_eq!(LineKind::of("; key = [value]"), LineKind::Comment);
        assert_eq!(LineKind::of(";"), LineKind::Comment);
    }

    #[test]
    fn classify_lines() {
        assert_eq!(LineKind::of(""), LineKind::Empty);
        assert_eq!(LineKind::of("[Section1]"), LineKind::Section);
        assert_eq!(LineKind::of("var1 = hello ; a comment"), LineKind::Field);
        assert_eq!(LineKind::of("garbage[]=text"), LineKind::Unknown);
        assert_eq!(LineKind::of("[unbalanced"), LineKind::Unknown);
        assert_eq!(LineKind::of("   "), LineKind::Unknown);
        assert_eq!(LineKind::of("  ; indented"), LineKind::Unknown);
    }

    #[test]
    fn split_into_two() {
        assert_eq!(split_pair("key = value", '='), Ok(("key ", " value")));
        assert_eq!(split_pair("Section1.var1", '.'), Ok(("Section1", "var1")));
        assert_eq!(split_pair("key==", '='), Ok(("key", "")));
    }

    #[test]
    fn split_without_value() {
        assert_eq!(split_pair("Section1", '.'), Err(SplitError::NoValue));
        assert_eq!(split_pair("Section1.", '.'), Err(SplitError::NoValue));
        assert_eq!(split_pair("", '.'), Err(SplitError::NoValue));
    }

    #[test]
    fn split_too_many_parts() {
        assert_eq!(split_pair("a.b.c", '.'), Err(SplitError::Malformed));
        assert_eq!(split_pair("key = a = b", '='), Err(SplitError::Malformed));
    }
}
