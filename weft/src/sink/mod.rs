//! Output destinations.
//!
//! A [`Sink`] receives the finished slice list of a statement in one call and
//! commits it to wherever it keeps its text. The engine never talks to a
//! destination any other way, so adding a new destination means implementing
//! one function.

use crate::Error;
use crate::Flags;
use crate::Newline;
use crate::Slice;

mod c_string;
mod stream;

pub use c_string::CStrSink;
pub use stream::Stream;

/// A destination for composed text.
///
/// # Contract
///
/// `total_len` must be exactly the sum of the lengths of `slices` (see
/// [`slice::total_len()`][crate::slice::total_len]). Sinks plan capacity
/// using the declared value and do not re-sum it; passing a wrong value is a
/// caller bug, which the sink may respond to by panicking with a
/// [`contract::Violation`][crate::contract::Violation].
///
/// Slices are committed in order, followed by a newline if
/// [`Flags::newline()`] is set. A write either commits all of that or none of
/// it: when an implementation returns an error, it must not have changed any
/// state that a later write or query can observe, to the degree the
/// underlying destination allows.
pub trait Sink {
  /// Commits `slices` to this sink.
  fn write(
    &mut self,
    total_len: usize,
    slices: &[Slice],
    flags: Flags,
  ) -> Result<&mut Self, Error>;
}

impl<S: Sink + ?Sized> Sink for &mut S {
  fn write(
    &mut self,
    total_len: usize,
    slices: &[Slice],
    flags: Flags,
  ) -> Result<&mut Self, Error> {
    S::write(self, total_len, slices, flags)?;
    Ok(self)
  }
}

/// Growable strings accept any statement; the newline is always
/// [`Newline::platform()`].
impl Sink for String {
  fn write(
    &mut self,
    total_len: usize,
    slices: &[Slice],
    flags: Flags,
  ) -> Result<&mut Self, Error> {
    let newline = Newline::platform();
    let extra = if flags.newline() { newline.len() } else { 0 };
    // A hint only: an overstated `total_len` must not abort the process.
    let _ = self.try_reserve(total_len.saturating_add(extra));

    for slice in slices {
      self.push_str(slice.as_str());
    }
    if flags.newline() {
      self.push_str(newline.as_str());
    }

    log::trace!("committed {total_len} characters to string");
    Ok(self)
  }
}

/// A sink that discards its input, counting what it would have written.
///
/// Useful for sizing a buffer for a [`CStrSink`] ahead of time: the capacity
/// needed to hold everything written to a counter in one write is
/// [`Counter::required_capacity()`].
#[derive(Copy, Clone, Default, Debug)]
pub struct Counter {
  chars: usize,
  writes: usize,
  newline: Newline,
}

impl Counter {
  /// Returns a new, zeroed counter.
  pub fn new() -> Self {
    Self::default()
  }

  /// Sets the newline whose length is counted for newline writes.
  pub fn with_newline(mut self, newline: Newline) -> Self {
    self.newline = newline;
    self
  }

  /// Returns the number of characters written so far, newlines included.
  pub fn chars(&self) -> usize {
    self.chars
  }

  /// Returns the number of calls to [`Sink::write()`] so far.
  pub fn writes(&self) -> usize {
    self.writes
  }

  /// Returns the smallest capacity a [`CStrSink`] would need to accept
  /// everything counted so far, if it had all arrived in a single write.
  ///
  /// Saturates at `usize::MAX`.
  pub fn required_capacity(&self) -> usize {
    self.chars.saturating_add(1)
  }
}

impl Sink for Counter {
  fn write(
    &mut self,
    total_len: usize,
    _: &[Slice],
    flags: Flags,
  ) -> Result<&mut Self, Error> {
    self.chars = self.chars.saturating_add(total_len);
    if flags.newline() {
      self.chars = self.chars.saturating_add(self.newline.len());
    }
    self.writes += 1;
    Ok(self)
  }
}
