//! Null-safe, failure-tolerant positional message formatting.
//!
//! Templates use `{0}`, `{1}`, ... placeholders with `{{` / `}}` brace
//! escapes. Formatting never fails outward: any malformed template or
//! missing argument collapses to the original template string, so a bad
//! message can never turn a log call into an error.

use std::fmt::Display;

/// A single positional argument for [`format_message`].
///
/// `Null` renders as the literal token `[null]`; the formatter never
/// tries to stringify an absent value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatArg {
    Null,
    Value(String),
}

impl<T: Display> From<T> for FormatArg {
    fn from(value: T) -> Self {
        FormatArg::Value(value.to_string())
    }
}

impl FormatArg {
    /// Build an argument from an optional value, mapping `None` to
    /// [`FormatArg::Null`].
    pub fn opt<T: Display>(value: Option<T>) -> Self {
        match value {
            Some(v) => FormatArg::Value(v.to_string()),
            None => FormatArg::Null,
        }
    }

    fn render(&self) -> &str {
        match self {
            FormatArg::Null => "[null]",
            FormatArg::Value(v) => v,
        }
    }
}

/// Why a template could not be expanded. Internal only; the public entry
/// point collapses every variant to the unformatted template.
#[derive(Debug, PartialEq, Eq)]
enum FormatError {
    UnclosedPlaceholder,
    BadIndex,
    MissingArgument,
    StrayBrace,
}

/// Expand a positional template against `args`.
///
/// - `None` template returns `None`.
/// - Empty `args` return the template unchanged.
/// - A placeholder referencing a missing argument, or any malformed
///   placeholder, returns the original template unchanged.
/// - Arguments beyond the highest referenced placeholder are ignored.
///
/// This function performs no I/O and never panics.
pub fn format_message(template: Option<&str>, args: &[FormatArg]) -> Option<String> {
    let template = template?;
    if args.is_empty() {
        return Some(template.to_string());
    }
    match try_format(template, args) {
        Ok(formatted) => Some(formatted),
        Err(_) => Some(template.to_string()),
    }
}

fn try_format(template: &str, args: &[FormatArg]) -> Result<String, FormatError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' => {
                if chars.peek() == Some(&'{') {
                    chars.next();
                    out.push('{');
                    continue;
                }
                let mut index_text = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(d) => index_text.push(d),
                        None => return Err(FormatError::UnclosedPlaceholder),
                    }
                }
                let index: usize = index_text.parse().map_err(|_| FormatError::BadIndex)?;
                let arg = args.get(index).ok_or(FormatError::MissingArgument)?;
                out.push_str(arg.render());
            }
            '}' => {
                if chars.peek() == Some(&'}') {
                    chars.next();
                    out.push('}');
                } else {
                    return Err(FormatError::StrayBrace);
                }
            }
            other => out.push(other),
        }
    }

    Ok(out)
}
