//! The composition engine.
//!
//! The engine turns a statement and its arguments into a list of [`Slice`]s
//! and hands that list to a [`Sink`] in exactly one [`Sink::write()`] call.
//! Arguments are converted once per request, up front; every slice of the
//! request borrows either from the statement or from those conversions, so
//! all of them stay alive until the write returns.

use byteyarn::YarnBox;

use crate::arg::Arg;
use crate::slice;
use crate::statement::Align;
use crate::statement::Field;
use crate::statement::Piece;
use crate::statement::Statement;
use crate::Error;
use crate::Flags;
use crate::Sink;
use crate::Slice;

/// What to do about arguments that no field of a statement refers to.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub enum Unreferenced {
  /// Silently accept them.
  #[default]
  Ignore,
  /// Reject the statement with
  /// [`ErrorKind::UnreferencedArgument`][crate::statement::ErrorKind].
  Error,
}

/// Options for an [`Engine`].
#[derive(Copy, Clone, Default, Debug)]
pub struct Options {
  /// Policy for unreferenced arguments.
  pub unreferenced: Unreferenced,
}

/// A configured composition engine.
///
/// The free functions in this module use an engine with default [`Options`].
#[derive(Copy, Clone, Default, Debug)]
pub struct Engine {
  options: Options,
}

impl Engine {
  /// Returns a new engine with the given options.
  pub fn new(options: Options) -> Self {
    Self { options }
  }

  /// Returns this engine's options.
  pub fn options(&self) -> &Options {
    &self.options
  }

  /// Formats `args` according to `statement` and writes the result to `sink`.
  pub fn fmt<'s, S: Sink + ?Sized>(
    &self,
    sink: &'s mut S,
    statement: &str,
    args: &[&dyn Arg],
  ) -> Result<&'s mut S, Error> {
    self.compose(sink, statement, args, Flags::NONE)
  }

  /// Like [`Engine::fmt()`], but appends a newline.
  pub fn fmtln<'s, S: Sink + ?Sized>(
    &self,
    sink: &'s mut S,
    statement: &str,
    args: &[&dyn Arg],
  ) -> Result<&'s mut S, Error> {
    self.compose(sink, statement, args, Flags::NEWLINE)
  }

  /// Writes the concatenation of `args` to `sink`.
  pub fn splice<'s, S: Sink + ?Sized>(
    &self,
    sink: &'s mut S,
    args: &[&dyn Arg],
  ) -> Result<&'s mut S, Error> {
    concatenate(sink, args, Flags::NONE)
  }

  /// Like [`Engine::splice()`], but appends a newline.
  pub fn spliceln<'s, S: Sink + ?Sized>(
    &self,
    sink: &'s mut S,
    args: &[&dyn Arg],
  ) -> Result<&'s mut S, Error> {
    concatenate(sink, args, Flags::NEWLINE)
  }

  fn compose<'s, S: Sink + ?Sized>(
    &self,
    sink: &'s mut S,
    statement: &str,
    args: &[&dyn Arg],
    flags: Flags,
  ) -> Result<&'s mut S, Error> {
    let parsed = Statement::parse(statement)
      .and_then(|s| {
        s.check_indices(args.len())?;
        if self.options.unreferenced == Unreferenced::Error {
          s.check_all_used(args.len())?;
        }
        Ok(s)
      })
      .map_err(|e| {
        log::debug!("rejected statement {statement:?}: {e}");
        e
      })?;

    let shims = args.iter().map(|a| a.shim()).collect::<Vec<_>>();
    let mut slices = Vec::with_capacity(parsed.pieces().len());
    for piece in parsed.pieces() {
      match piece {
        Piece::Literal(range) => push(&mut slices, &statement[range.clone()]),
        Piece::Field(field) => insert(&mut slices, &shims[field.index], field),
      }
    }

    deliver(sink, &slices, flags)
  }
}

/// Formats `args` according to `statement` and writes the result to `sink`.
///
/// See the [`statement`][crate::statement] module for the syntax.
///
/// ```
/// # use weft::*;
/// let mut out = String::new();
/// engine::fmt(&mut out, "{1}, {0}!", &[&"world", &"hello"])?;
/// assert_eq!(out, "hello, world!");
/// # Ok::<(), weft::Error>(())
/// ```
pub fn fmt<'s, S: Sink + ?Sized>(
  sink: &'s mut S,
  statement: &str,
  args: &[&dyn Arg],
) -> Result<&'s mut S, Error> {
  Engine::default().fmt(sink, statement, args)
}

/// Like [`fmt()`], but appends a newline.
pub fn fmtln<'s, S: Sink + ?Sized>(
  sink: &'s mut S,
  statement: &str,
  args: &[&dyn Arg],
) -> Result<&'s mut S, Error> {
  Engine::default().fmtln(sink, statement, args)
}

/// Writes the concatenation of `args` to `sink`.
pub fn splice<'s, S: Sink + ?Sized>(
  sink: &'s mut S,
  args: &[&dyn Arg],
) -> Result<&'s mut S, Error> {
  Engine::default().splice(sink, args)
}

/// Like [`splice()`], but appends a newline.
pub fn spliceln<'s, S: Sink + ?Sized>(
  sink: &'s mut S,
  args: &[&dyn Arg],
) -> Result<&'s mut S, Error> {
  Engine::default().spliceln(sink, args)
}

fn concatenate<'s, S: Sink + ?Sized>(
  sink: &'s mut S,
  args: &[&dyn Arg],
  flags: Flags,
) -> Result<&'s mut S, Error> {
  let shims = args.iter().map(|a| a.shim()).collect::<Vec<_>>();
  let mut slices = Vec::with_capacity(shims.len());
  for shim in &shims {
    push(&mut slices, shim.as_str());
  }

  deliver(sink, &slices, flags)
}

/// Issues the one write call of a request.
fn deliver<'s, S: Sink + ?Sized>(
  sink: &'s mut S,
  slices: &[Slice],
  flags: Flags,
) -> Result<&'s mut S, Error> {
  let total_len = slice::total_len(slices);
  log::trace!("writing {} slices ({total_len} characters)", slices.len());
  sink.write(total_len, slices, flags)
}

fn push<'a>(slices: &mut Vec<Slice<'a>>, text: &'a str) {
  if !text.is_empty() {
    slices.push(Slice::new(text));
  }
}

/// Pushes the slices for one field, truncated and padded as it requests.
fn insert<'a>(
  slices: &mut Vec<Slice<'a>>,
  shim: &'a YarnBox<'_, str>,
  field: &Field,
) {
  let mut text = shim.as_str();
  let mut width = text.chars().count();

  if let Some(max) = field.max {
    if width > max {
      let end = text.char_indices().nth(max).map_or(text.len(), |(i, _)| i);
      text = &text[..end];
      width = max;
    }
  }

  let padding = field.min.saturating_sub(width);
  let (before, after) = match field.align {
    Align::Left => (0, padding),
    Align::Right => (padding, 0),
    Align::Center => (padding / 2, padding - padding / 2),
  };

  pad(slices, before);
  push(slices, text);
  pad(slices, after);
}

/// Pushes slices totalling `len` spaces.
fn pad(slices: &mut Vec<Slice>, mut len: usize) {
  const SPACES: &str = "                                ";

  while len > SPACES.len() {
    slices.push(Slice::from_static(SPACES));
    len -= SPACES.len();
  }
  push(slices, &SPACES[..len]);
}
