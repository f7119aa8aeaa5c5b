//! Generates a Windows module-definition (`.def`) export file for a
//! C++/WinRT DLL.
//!
//! A component's public surface lives in `.idl` files as `runtimeclass`
//! blocks, but the symbols the MSVC compiler actually emits for those
//! members are decorated (name mangled). To hand the linker an export
//! list, each plain member name has to be matched back to its decorated
//! form using nothing but text evidence from a build artifact: the output
//! of `dumpbin /symbols` on the compiled `.obj`, or a linker `.map` file.
//!
//! The pipeline runs in four stages:
//!
//! 1. [`ridl`] parses the `.idl` text into [`ridl::RuntimeClass`] groups.
//! 2. [`symsrc`] supplies the symbol listing lines.
//! 3. [`correlate`] matches member names against decorated symbols using a
//!    structural pattern and a forward-only adjacency scan.
//! 4. [`defgen`] deduplicates, sorts and renders the `.def` text, which
//!    [`generator`] writes out.

pub mod cli;
pub mod correlate;
pub mod defgen;
pub mod generator;
pub mod logging;
pub mod symsrc;
