//! Symbol sources feeding the correlator.
//!
//! The correlator only needs an ordered sequence of text lines describing
//! symbols. Two interchangeable sources provide it: the output of
//! `dumpbin /symbols` run against an `.obj` file, or a linker produced
//! `.map` file read straight from disk. Non-symbol noise lines are fine;
//! the correlator skips what it cannot match.

use std::{
    path::{Path, PathBuf},
    process::Command,
};

use thiserror::Error;

/// Errors raised while acquiring a symbol listing.
#[derive(Debug, Error)]
pub enum SymbolSourceError {
    /// The symbol source file does not exist.
    #[error("symbol source not found: {0}")]
    SourceNotFound(PathBuf),

    /// The symbol source file exists but could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The external dump utility is missing or exited with a failure. The
    /// diagnostic carries the tool's own error text when available.
    #[error("{tool}: {diagnostic}")]
    ExternalTool { tool: String, diagnostic: String },
}

/// An immutable, ordered symbol line sequence for the duration of one run.
#[derive(Debug, Clone, Default)]
pub struct SymbolListing {
    lines: Vec<String>,
}

impl SymbolListing {
    /// An empty listing. Correlating against it yields no matches, which is
    /// the degraded behavior for a failed external tool invocation.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a listing from raw symbol dump text.
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_string).collect(),
        }
    }

    /// Reads a linker `.map` file as a symbol listing.
    pub fn from_map_file(path: impl AsRef<Path>) -> Result<Self, SymbolSourceError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SymbolSourceError::SourceNotFound(path.to_path_buf())
            } else {
                SymbolSourceError::Io {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        Ok(Self::from_text(&text))
    }

    /// Obtains a listing for an `.obj` file through the given dumper.
    pub fn from_object(
        path: impl AsRef<Path>,
        dumper: &dyn SymbolDumper,
    ) -> Result<Self, SymbolSourceError> {
        Ok(Self::from_text(&dumper.dump(path.as_ref())?))
    }

    /// The raw lines, in source order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Collaborator that produces symbol dump text for an object file.
///
/// Injectable so the correlator and assembler can be exercised fully
/// offline with crafted listings.
pub trait SymbolDumper {
    fn dump(&self, object: &Path) -> Result<String, SymbolSourceError>;
}

/// The real `dumpbin /symbols` invocation.
#[derive(Debug, Clone)]
pub struct DumpbinTool {
    program: PathBuf,
}

impl DumpbinTool {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn tool_name(&self) -> String {
        self.program.display().to_string()
    }
}

impl Default for DumpbinTool {
    fn default() -> Self {
        Self::new("dumpbin.exe")
    }
}

impl SymbolDumper for DumpbinTool {
    fn dump(&self, object: &Path) -> Result<String, SymbolSourceError> {
        if !object.exists() {
            return Err(SymbolSourceError::SourceNotFound(object.to_path_buf()));
        }

        let output = Command::new(&self.program)
            .arg("/symbols")
            .arg(object)
            .output()
            .map_err(|e| SymbolSourceError::ExternalTool {
                tool: self.tool_name(),
                diagnostic: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(SymbolSourceError::ExternalTool {
                tool: self.tool_name(),
                diagnostic: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::{SymbolListing, SymbolSourceError};

    #[test]
    fn listing_preserves_line_order() {
        let listing = SymbolListing::from_text("first\nsecond\n\nfourth");
        assert_eq!(listing.lines(), ["first", "second", "", "fourth"]);
    }

    #[test]
    fn empty_listing() {
        assert!(SymbolListing::empty().is_empty());
        assert!(SymbolListing::from_text("").is_empty());
    }

    #[test]
    fn missing_map_file() {
        let err = SymbolListing::from_map_file("does/not/exist.map")
            .expect_err("missing map file must not produce a listing");
        assert!(matches!(err, SymbolSourceError::SourceNotFound(_)));
    }
}
