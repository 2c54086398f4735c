//! String slices, the unit of output handed to a [`Sink`].

use std::fmt;

#[cfg(doc)]
use crate::*;

/// A read-only view of an already-materialized run of text.
///
/// A slice owns nothing: it borrows from a format statement, from an
/// argument, or from the temporary storage an argument was converted into.
/// The lifetime `'a` ties it to that storage, so a slice can never outlive
/// the request that produced it.
///
/// Lengths are measured in UTF-8 code units, which is what every sink counts
/// capacity in.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Slice<'a> {
  text: &'a str,
}

impl<'a> Slice<'a> {
  /// Returns a slice viewing `text`.
  pub const fn new(text: &'a str) -> Self {
    Self { text }
  }

  /// Returns the empty slice.
  pub const fn empty() -> Self {
    Self { text: "" }
  }

  /// Returns the length of this slice, in code units.
  pub const fn len(&self) -> usize {
    self.text.len()
  }

  /// Returns whether this slice is empty.
  pub const fn is_empty(&self) -> bool {
    self.text.is_empty()
  }

  /// Returns the text this slice views.
  pub const fn as_str(&self) -> &'a str {
    self.text
  }

  /// Returns the bytes this slice views.
  pub const fn as_bytes(&self) -> &'a [u8] {
    self.text.as_bytes()
  }
}

impl Slice<'static> {
  /// Returns a slice over immortal text.
  ///
  /// This is just [`Slice::new()`], spelled out for the benefit of `const`
  /// tables.
  pub const fn from_static(text: &'static str) -> Self {
    Self::new(text)
  }
}

/// Computes the sum of the lengths of `slices`.
///
/// This is the value a caller must pass as the `total_len` of
/// [`Sink::write()`].
pub fn total_len(slices: &[Slice]) -> usize {
  slices.iter().map(Slice::len).sum()
}

impl<'a> From<&'a str> for Slice<'a> {
  fn from(text: &'a str) -> Self {
    Self::new(text)
  }
}

impl<'a> From<&'a String> for Slice<'a> {
  fn from(text: &'a String) -> Self {
    Self::new(text)
  }
}

impl PartialEq<str> for Slice<'_> {
  fn eq(&self, other: &str) -> bool {
    self.text == other
  }
}

impl PartialEq<&str> for Slice<'_> {
  fn eq(&self, other: &&str) -> bool {
    self.text == *other
  }
}

impl fmt::Debug for Slice<'_> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    fmt::Debug::fmt(self.text, f)
  }
}

impl fmt::Display for Slice<'_> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str(self.text)
  }
}
