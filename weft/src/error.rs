//! Recoverable failures.

use std::io;

use crate::statement::FormatError;

#[cfg(doc)]
use crate::*;

/// An error produced while composing or delivering a statement.
///
/// These are all caller-facing, recoverable conditions. Defects inside this
/// library are reported through [`contract`] instead, and never show up
/// here.
#[derive(Debug, thiserror::Error)]
pub enum Error {
  /// A fixed-capacity sink cannot hold the statement.
  ///
  /// The sink is guaranteed to be unchanged.
  #[error("sink capacity exceeded: {required} characters required, but capacity is {capacity}")]
  CapacityExceeded {
    /// The capacity the write would have needed, including the terminator and
    /// any newline.
    required: usize,
    /// The fixed capacity of the sink.
    capacity: usize,
  },

  /// The format statement was malformed, or did not agree with its
  /// arguments.
  #[error(transparent)]
  Format(#[from] FormatError),

  /// A stream sink failed to write.
  #[error("sink stream failed: {0}")]
  Io(#[from] io::Error),
}

impl Error {
  /// Returns whether this is [`Error::CapacityExceeded`].
  pub fn is_capacity_exceeded(&self) -> bool {
    matches!(self, Self::CapacityExceeded { .. })
  }
}
