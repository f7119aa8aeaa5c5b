//! Correlates plain member names with the MSVC decorated symbols the
//! compiler emitted for them.
//!
//! A C++/WinRT implementation type `winrt::<Container>::implementation::<Class>`
//! mangles a member `Open` into something like
//! `?Open@IMan@implementation@ImgUtilsX@winrt@@QEAAXXZ`. The structural
//! pattern anchored on the member and class names is the only evidence
//! used; no demangler is involved.
//!
//! Overloads of one member appear as a contiguous run of lines in the
//! symbol listing. The scan therefore carries a forward-only cursor across
//! members: once a member has matched, the first non-matching line ends its
//! run, and the next member's scan resumes from that line. A member whose
//! symbols are split by an unrelated line only gets its first run captured.
//! That adjacency heuristic is a deliberate behavioral contract, not a bug.

use std::collections::BTreeMap;

use regex::Regex;

use ridl::RuntimeClass;

/// The decoration convention parameters shared by one run.
#[derive(Debug, Clone)]
pub struct DecorationNamespace {
    /// The project/solution namespace embedded in every decorated name.
    pub container: String,

    /// The language-projection namespace, `winrt` for C++/WinRT.
    pub binding: String,

    /// Trailing suffix requirement after the terminating `Z`.
    pub suffix: PatternSuffix,
}

impl DecorationNamespace {
    pub fn new(container: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            binding: "winrt".to_string(),
            suffix: PatternSuffix::Whitespace,
        }
    }

    pub fn with_binding(mut self, binding: impl Into<String>) -> Self {
        self.binding = binding.into();
        self
    }

    pub fn with_suffix(mut self, suffix: PatternSuffix) -> Self {
        self.suffix = suffix;
        self
    }
}

/// Whether a decorated name must be followed by whitespace.
///
/// `dumpbin /symbols` prints the undecorated view after the symbol, so a
/// trailing space is always present there; some map formats end the line
/// right after the name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PatternSuffix {
    /// Require a whitespace character after the terminating marker.
    #[default]
    Whitespace,

    /// Accept the terminating marker at end of line too.
    Bare,
}

/// Compiled structural pattern for one `(member, class)` pair.
#[derive(Debug)]
pub struct MatchPattern {
    regex: Regex,
}

impl MatchPattern {
    /// Compiles the pattern for `member` of `class` under `namespace`.
    ///
    /// The shape is a literal `?` marker, the member name, the qualifier
    /// chain `@<class>@implementation@<container>@<binding>@@`, then a
    /// non-greedy wildcard run ending at the first `Z`.
    pub fn new(
        member: &str,
        class: &str,
        namespace: &DecorationNamespace,
    ) -> Result<Self, regex::Error> {
        let core = format!(
            r"(\?{member}@{class}@implementation@{container}@{binding}@@.*?Z)",
            member = regex::escape(member),
            class = regex::escape(class),
            container = regex::escape(&namespace.container),
            binding = regex::escape(&namespace.binding),
        );

        let pattern = match namespace.suffix {
            PatternSuffix::Whitespace => format!(r"{core}\s"),
            PatternSuffix::Bare => core,
        };

        Ok(Self {
            regex: Regex::new(&pattern)?,
        })
    }

    /// Returns the decorated name if the line matches anywhere.
    pub fn find_in<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.regex
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

/// Decorated names per member for one class.
///
/// Members with zero matches are absent. Iteration order is the ordinal
/// member order, which is also the order they were correlated in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult {
    matches: BTreeMap<String, Vec<String>>,
}

impl MatchResult {
    fn insert(&mut self, member: &str, decorated: Vec<String>) {
        self.matches.insert(member.to_string(), decorated);
    }

    /// Returns the decorated names recorded for a member.
    pub fn decorated(&self, member: &str) -> Option<&[String]> {
        self.matches.get(member).map(Vec::as_slice)
    }

    /// Iterates over every decorated name across all members.
    pub fn all_decorated(&self) -> impl Iterator<Item = &str> {
        self.matches
            .values()
            .flat_map(|names| names.iter().map(String::as_str))
    }

    pub fn members(&self) -> impl Iterator<Item = &str> {
        self.matches.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Forward-only scan position over a symbol listing.
///
/// Threaded explicitly through the per-member scans of one class so the
/// adjacency behavior stays reproducible and testable in isolation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanCursor(usize);

impl ScanCursor {
    pub fn position(self) -> usize {
        self.0
    }
}

/// Correlates every member of `class` against the symbol lines.
///
/// Members are visited in their stored (sorted) order. The cursor advances
/// monotonically across members and is never reset within one class.
pub fn correlate(
    class: &RuntimeClass,
    lines: &[String],
    namespace: &DecorationNamespace,
) -> Result<MatchResult, regex::Error> {
    let mut result = MatchResult::default();
    let mut cursor = ScanCursor::default();

    for member in &class.members {
        let pattern = MatchPattern::new(member, &class.name, namespace)?;
        let (decorated, next) = scan_member(&pattern, lines, cursor);
        cursor = next;

        if decorated.is_empty() {
            log::info!("no decorated names found for {}::{member}", class.name);
        } else {
            result.insert(member, decorated);
        }
    }

    Ok(result)
}

/// Scans one member's pattern forward from `cursor`.
///
/// Matching lines are recorded and the cursor advances past them. The
/// first non-matching line after at least one match ends the scan without
/// consuming that line. Before the first match, non-matching lines are
/// skipped.
pub fn scan_member(
    pattern: &MatchPattern,
    lines: &[String],
    mut cursor: ScanCursor,
) -> (Vec<String>, ScanCursor) {
    let mut decorated = Vec::new();

    while let Some(line) = lines.get(cursor.0) {
        match pattern.find_in(line) {
            Some(name) => {
                decorated.push(name.to_string());
                cursor.0 += 1;
            }
            None if decorated.is_empty() => {
                cursor.0 += 1;
            }
            None => break,
        }
    }

    (decorated, cursor)
}
