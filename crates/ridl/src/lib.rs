//! Parser for the `runtimeclass` subset of [MIDL 3.0](https://learn.microsoft.com/en-us/uwp/midl-3/)
//! interface definition files.
//!
//! A C++/WinRT component declares its public surface in `.idl` files. The
//! only constructs this crate understands are `runtimeclass` blocks and the
//! member declarations inside them:
//!
//! ```text
//! unsealed runtimeclass ImageCache
//! {
//!     ImageCache();
//!     static Windows.Foundation.IAsyncAction Prime(String path);
//!     void Flush();
//! }
//! ```
//!
//! Parsing is line oriented. Each line is tested against three standalone
//! recognizers ([`recognize::class_open`], [`recognize::class_close`],
//! [`recognize::member_decl`]) driven by a two state scanner. Anything the
//! recognizers do not understand (attributes, comments, imports, namespace
//! blocks) is skipped without error, so the crate never needs the full MIDL
//! grammar.
//!
//! The output of [`parse`] is the ordered list of classes found in the
//! text, each with its member names sorted, plus any warnings raised while
//! scanning. Opening a `runtimeclass` inside another one is the only hard
//! error.

mod error;
pub mod recognize;
mod scan;

pub use error::{ParseError, Warning};
pub use scan::{ParseOutput, RuntimeClass, parse};
