use thiserror::Error;

/// Hard parse error for one interface definition input.
#[derive(Debug, Clone, Error)]
pub struct ParseError {
    /// 1-based line number where the error occured.
    line: usize,

    /// The offending line text.
    fragment: String,

    /// Error kind.
    kind: ErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
enum ErrorKind {
    #[error("runtimeclass '{nested}' opened inside runtimeclass '{enclosing}'")]
    NestedClass { nested: String, enclosing: String },
}

impl ParseError {
    pub(crate) fn nested_class(
        line: usize,
        fragment: &str,
        nested: &str,
        enclosing: &str,
    ) -> Self {
        Self {
            line,
            fragment: fragment.to_string(),
            kind: ErrorKind::NestedClass {
                nested: nested.to_string(),
                enclosing: enclosing.to_string(),
            },
        }
    }

    /// Returns the 1-based line number where the error occured.
    #[inline]
    pub fn line_number(&self) -> usize {
        self.line
    }

    /// Returns the line text where the error occured.
    #[inline]
    pub fn fragment(&self) -> &str {
        &self.fragment
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "at line {line_number}: {msg}\n\
            {line_number: >5} | {fragment}",
            msg = self.kind,
            line_number = self.line,
            fragment = self.fragment.trim_end(),
        )
    }
}

/// Non-fatal condition noticed while scanning an input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Warning {
    /// End of input was reached with a `runtimeclass` block still open. The
    /// class is sealed with the members collected up to that point.
    #[error("runtimeclass '{class}' opened on line {line} is never closed")]
    UnterminatedClass { class: String, line: usize },
}
