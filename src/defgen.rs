//! Assembles correlated exports into module-definition file text.
//!
//! The rendered shape follows the MSVC `.def` grammar: a `LIBRARY` header,
//! an `EXPORTS` statement, and comment lines (`;` prefixed) naming the
//! runtimeclass each block of exports came from:
//!
//! ```text
//! LIBRARY   IMGUTILSX
//! EXPORTS
//! ; Functions from runtimeclass IMan
//!   ?Close@IMan@implementation@ImgUtilsX@winrt@@QEAAXXZ
//!   ?Open@IMan@implementation@ImgUtilsX@winrt@@QEAAXXZ
//! ```
//!
//! Rendering is pure: identical inputs always produce byte-identical text.

use std::collections::BTreeSet;
use std::fmt::Write;

use crate::correlate::MatchResult;

/// The deduplicated, ordinal-sorted decorated names for one runtimeclass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSet {
    class: String,
    exports: BTreeSet<String>,
}

impl ExportSet {
    /// Unions all decorated-name lists of a [`MatchResult`] into one set.
    ///
    /// Exact duplicate strings matched through different members collapse
    /// to a single export.
    pub fn from_matches(class: impl Into<String>, matches: &MatchResult) -> Self {
        Self {
            class: class.into(),
            exports: matches.all_decorated().map(str::to_string).collect(),
        }
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    /// Exports in ordinal-ascending order.
    pub fn exports(&self) -> impl Iterator<Item = &str> {
        self.exports.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.exports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exports.is_empty()
    }
}

/// An in-memory module-definition file, built group by group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefModule {
    library: String,
    groups: Vec<ExportSet>,
}

impl DefModule {
    /// Starts a module for `library`. The name is upper-cased for the
    /// `LIBRARY` statement.
    pub fn new(library: &str) -> Self {
        Self {
            library: library.to_uppercase(),
            groups: Vec::new(),
        }
    }

    /// Appends one class's export set. Groups render in push order, and a
    /// class with no matched exports still gets its comment header.
    pub fn push_group(&mut self, group: ExportSet) {
        self.groups.push(group);
    }

    pub fn library(&self) -> &str {
        &self.library
    }

    pub fn groups(&self) -> &[ExportSet] {
        &self.groups
    }

    /// Renders the complete `.def` file text.
    pub fn render(&self) -> String {
        let mut out = String::new();

        // Infallible; String's fmt::Write never errors.
        let _ = writeln!(out, "LIBRARY   {}", self.library);
        let _ = writeln!(out, "EXPORTS");

        for group in &self.groups {
            let _ = writeln!(out, "; Functions from runtimeclass {}", group.class());
            for export in group.exports() {
                let _ = writeln!(out, "  {export}");
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use crate::correlate::{DecorationNamespace, correlate};

    use super::{DefModule, ExportSet};

    fn match_result(lines: &[&str], members: &[&str]) -> crate::correlate::MatchResult {
        let lines: Vec<String> = lines.iter().map(|s| s.to_string()).collect();
        let class = ridl::RuntimeClass {
            name: "IMan".to_string(),
            members: members.iter().map(|s| s.to_string()).collect(),
            opened_at: 1,
        };
        correlate(&class, &lines, &DecorationNamespace::new("ImgUtilsX"))
            .expect("correlate failed")
    }

    #[test]
    fn render_shape() {
        let matches = match_result(
            &[
                "?Close@IMan@implementation@ImgUtilsX@winrt@@QEAAXXZ ",
                "?Open@IMan@implementation@ImgUtilsX@winrt@@QEAAXXZ ",
            ],
            &["Close", "Open"],
        );

        let mut def = DefModule::new("ImgUtilsX");
        def.push_group(ExportSet::from_matches("IMan", &matches));

        assert_eq!(
            def.render(),
            "LIBRARY   IMGUTILSX\n\
             EXPORTS\n\
             ; Functions from runtimeclass IMan\n\
             \x20 ?Close@IMan@implementation@ImgUtilsX@winrt@@QEAAXXZ\n\
             \x20 ?Open@IMan@implementation@ImgUtilsX@winrt@@QEAAXXZ\n"
        );
    }

    #[test]
    fn render_idempotent() {
        let matches = match_result(
            &["?Open@IMan@implementation@ImgUtilsX@winrt@@QEAAXXZ "],
            &["Open"],
        );

        let mut def = DefModule::new("ImgUtilsX");
        def.push_group(ExportSet::from_matches("IMan", &matches));

        assert_eq!(def.render(), def.render());
    }

    #[test]
    fn exports_sorted_ordinal() {
        // The overloads are captured in listing order (Q before A); the
        // rendered order depends only on the decorated strings themselves.
        let matches = match_result(
            &[
                "?Open@IMan@implementation@ImgUtilsX@winrt@@QEAAXXZ ",
                "?Open@IMan@implementation@ImgUtilsX@winrt@@AEAAXXZ ",
            ],
            &["Open"],
        );

        let group = ExportSet::from_matches("IMan", &matches);
        let rendered: Vec<&str> = group.exports().collect();
        assert_eq!(
            rendered,
            [
                "?Open@IMan@implementation@ImgUtilsX@winrt@@AEAAXXZ",
                "?Open@IMan@implementation@ImgUtilsX@winrt@@QEAAXXZ",
            ]
        );
    }

    #[test]
    fn duplicate_decorated_names_collapse() {
        // dumpbin can list the same symbol more than once; exact duplicate
        // strings keep a single export.
        let matches = match_result(
            &[
                "?Open@IMan@implementation@ImgUtilsX@winrt@@QEAAXXZ ",
                "?Open@IMan@implementation@ImgUtilsX@winrt@@QEAAXXZ ",
            ],
            &["Open"],
        );

        let group = ExportSet::from_matches("IMan", &matches);
        assert_eq!(group.len(), 1);
    }

    #[test]
    fn empty_group_keeps_comment_header() {
        let matches = match_result(&["no symbols here"], &["Open"]);

        let mut def = DefModule::new("imgutilsx");
        def.push_group(ExportSet::from_matches("IMan", &matches));

        assert_eq!(
            def.render(),
            "LIBRARY   IMGUTILSX\n\
             EXPORTS\n\
             ; Functions from runtimeclass IMan\n"
        );
    }
}
