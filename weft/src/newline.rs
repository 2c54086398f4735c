//! Newline sequences.

use crate::Slice;

/// A newline sequence a sink appends when [`Flags::NEWLINE`] is set.
///
/// [`Flags::NEWLINE`]: crate::Flags::NEWLINE
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Newline {
  /// `\n`, as on Unix.
  Lf,
  /// `\r\n`, as on Windows.
  CrLf,
  /// `\r`, as on classic Mac OS.
  Cr,
}

impl Newline {
  /// Returns the canonical newline for the platform this library was
  /// compiled for.
  pub const fn platform() -> Self {
    if cfg!(windows) {
      Self::CrLf
    } else {
      Self::Lf
    }
  }

  /// Returns the text of this newline.
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Lf => "\n",
      Self::CrLf => "\r\n",
      Self::Cr => "\r",
    }
  }

  /// Returns this newline as a slice.
  pub const fn as_slice(self) -> Slice<'static> {
    Slice::from_static(self.as_str())
  }

  /// Returns the length of this newline, in code units.
  pub const fn len(self) -> usize {
    self.as_str().len()
  }
}

impl Default for Newline {
  fn default() -> Self {
    Self::platform()
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn platform_is_default() {
    assert_eq!(Newline::default(), Newline::platform());
    assert_eq!(Newline::CrLf.as_slice(), "\r\n");
    assert_eq!(Newline::CrLf.len(), 2);
  }
}
