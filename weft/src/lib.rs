//! `weft` - Type-safe text composition into pluggable sinks 🧵🪡
//!
//! `weft` formats a statement and a list of heterogeneous arguments into an
//! ordered list of borrowed string [`Slice`]s, then hands the whole list to a
//! [`Sink`] in a single call. The sink owns the destination: a fixed buffer,
//! a growable [`String`], an [`io::Write`][std::io::Write] stream, or anything
//! else that implements the trait.
//!
//! ```
//! # use weft::*;
//! let mut buf = [0; 32];
//! let mut sink = CStrSink::new(&mut buf);
//!
//! weft::fmt!(&mut sink, "{0} has {1} {2}", "yarn", 3, "colors")?;
//! weft::splice!(&mut sink, "; ", 'x', "=", 1.5)?;
//! assert_eq!(sink.as_str(), "yarn has 3 colors; x=1.5");
//! # Ok::<(), weft::Error>(())
//! ```
//!
//! Nothing is ever partially written. Each request is exactly one
//! [`Sink::write()`], and the fixed-capacity [`CStrSink`] checks that the
//! whole statement, its optional newline, and a nul terminator fit before
//! touching its buffer:
//!
//! ```
//! # use weft::*;
//! let mut buf = [0; 8];
//! let mut sink = CStrSink::new(&mut buf);
//!
//! weft::fmt!(&mut sink, "{0}", "hello")?;
//! let err = weft::fmt!(&mut sink, " {0}", "world").unwrap_err();
//!
//! assert!(err.is_capacity_exceeded());
//! assert_eq!(sink.as_str(), "hello");
//! # Ok::<(), weft::Error>(())
//! ```
//!
//! Statement syntax is documented in [`statement`]; the arguments it accepts
//! are anything implementing [`Arg`].

#![deny(missing_docs)]

pub mod arg;
pub mod contract;
pub mod engine;
pub mod slice;
pub mod statement;

mod error;
mod flags;
mod newline;
mod sink;

pub use arg::Arg;
pub use engine::Engine;
pub use error::Error;
pub use flags::Flags;
pub use newline::Newline;
pub use sink::CStrSink;
pub use sink::Counter;
pub use sink::Sink;
pub use sink::Stream;
pub use slice::Slice;
pub use statement::FormatError;

// Macro stuff.
#[doc(hidden)]
pub mod m {
  pub use crate::engine;
  pub use crate::Arg;
}

/// Formats arguments according to a statement, and writes them to a sink.
///
/// This macro calls out to [`engine::fmt()`] internally.
///
/// ```
/// let mut out = String::new();
/// weft::fmt!(&mut out, "{0,4,,>}|{1}", 42, "x")?;
/// assert_eq!(out, "  42|x");
/// # Ok::<(), weft::Error>(())
/// ```
#[macro_export]
macro_rules! fmt {
  ($sink:expr, $statement:expr $(, $arg:expr)* $(,)?) => {
    $crate::m::engine::fmt(
      $sink,
      $statement,
      &[$(&$arg as &dyn $crate::m::Arg),*],
    )
  };
}

/// Like [`fmt!()`], but appends a newline.
#[macro_export]
macro_rules! fmtln {
  ($sink:expr, $statement:expr $(, $arg:expr)* $(,)?) => {
    $crate::m::engine::fmtln(
      $sink,
      $statement,
      &[$(&$arg as &dyn $crate::m::Arg),*],
    )
  };
}

/// Writes the concatenation of its arguments to a sink.
///
/// This macro calls out to [`engine::splice()`] internally.
#[macro_export]
macro_rules! splice {
  ($sink:expr $(, $arg:expr)* $(,)?) => {
    $crate::m::engine::splice(
      $sink,
      &[$(&$arg as &dyn $crate::m::Arg),*],
    )
  };
}

/// Like [`splice!()`], but appends a newline.
#[macro_export]
macro_rules! spliceln {
  ($sink:expr $(, $arg:expr)* $(,)?) => {
    $crate::m::engine::spliceln(
      $sink,
      &[$(&$arg as &dyn $crate::m::Arg),*],
    )
  };
}
