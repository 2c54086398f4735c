//! Per-write behavior flags.

use std::fmt;
use std::ops::BitOr;
use std::ops::BitOrAssign;

/// Optional behaviors requested of a single [`Sink::write()`][crate::Sink].
///
/// These can also be round-tripped through a raw bitmask with
/// [`Flags::from_bits()`] and [`Flags::bits()`]. Bits this version of the
/// library does not know about are dropped rather than rejected, so that
/// masks produced by newer code still work here.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Flags {
  newline: bool,
}

impl Flags {
  /// No optional behavior.
  pub const NONE: Self = Self { newline: false };

  /// Append the sink's newline sequence after the written slices.
  pub const NEWLINE: Self = Self { newline: true };

  /// The raw bit corresponding to [`Flags::NEWLINE`].
  pub const NEWLINE_BIT: u32 = 0x1;

  const KNOWN_BITS: u32 = Self::NEWLINE_BIT;

  /// Decodes a raw bitmask, ignoring unknown bits.
  pub const fn from_bits(bits: u32) -> Self {
    Self {
      newline: bits & Self::NEWLINE_BIT != 0,
    }
  }

  /// Encodes these flags as a raw bitmask.
  pub const fn bits(self) -> u32 {
    let bits = if self.newline { Self::NEWLINE_BIT } else { 0 };
    bits & Self::KNOWN_BITS
  }

  /// Whether a trailing newline was requested.
  pub const fn newline(self) -> bool {
    self.newline
  }

  /// Returns a copy of these flags with the newline flag set to `yes`.
  pub const fn with_newline(self, yes: bool) -> Self {
    Self { newline: yes }
  }

  /// Returns the union of two flag sets.
  pub const fn union(self, that: Self) -> Self {
    Self {
      newline: self.newline | that.newline,
    }
  }
}

impl BitOr for Flags {
  type Output = Self;

  fn bitor(self, that: Self) -> Self {
    self.union(that)
  }
}

impl BitOrAssign for Flags {
  fn bitor_assign(&mut self, that: Self) {
    *self = self.union(that);
  }
}

impl fmt::Debug for Flags {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    if self.newline {
      f.write_str("Flags(NEWLINE)")
    } else {
      f.write_str("Flags(NONE)")
    }
  }
}
