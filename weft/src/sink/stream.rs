use std::io;

use crate::Error;
use crate::Flags;
use crate::Newline;
use crate::Sink;
use crate::Slice;

/// A sink over an [`io::Write`].
///
/// Each statement is staged into an internal buffer and handed to the stream
/// with a single `write_all()`, so that a statement is never interleaved with
/// other output going to the same stream. Whether a failed `write_all()`
/// left part of the statement behind is up to the stream.
pub struct Stream<W: io::Write> {
  out: W,
  staging: String,
  newline: Newline,
}

impl<W: io::Write> Stream<W> {
  /// Wraps `out` in a sink.
  pub fn new(out: W) -> Self {
    Self {
      out,
      staging: String::new(),
      newline: Newline::platform(),
    }
  }

  /// Sets the newline written for [`Flags::NEWLINE`].
  pub fn with_newline(mut self, newline: Newline) -> Self {
    self.newline = newline;
    self
  }

  /// Returns a reference to the wrapped stream.
  pub fn get_ref(&self) -> &W {
    &self.out
  }

  /// Returns a mutable reference to the wrapped stream.
  pub fn get_mut(&mut self) -> &mut W {
    &mut self.out
  }

  /// Flushes the wrapped stream.
  pub fn flush(&mut self) -> Result<(), Error> {
    self.out.flush()?;
    Ok(())
  }

  /// Unwraps this sink, returning the wrapped stream.
  pub fn into_inner(self) -> W {
    self.out
  }
}

impl<W: io::Write> Sink for Stream<W> {
  fn write(
    &mut self,
    total_len: usize,
    slices: &[Slice],
    flags: Flags,
  ) -> Result<&mut Self, Error> {
    self.staging.clear();
    // A hint only: an overstated `total_len` must not abort the process.
    let _ = self
      .staging
      .try_reserve(total_len.saturating_add(self.newline.len()));
    for slice in slices {
      self.staging.push_str(slice.as_str());
    }
    if flags.newline() {
      self.staging.push_str(self.newline.as_str());
    }

    if let Err(e) = self.out.write_all(self.staging.as_bytes()) {
      log::debug!("stream sink failed: {e}");
      return Err(e.into());
    }

    log::trace!("committed {total_len} characters to stream");
    Ok(self)
  }
}
