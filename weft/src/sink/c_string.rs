use std::ffi::CStr;
use std::fmt;
use std::str;

use crate::contract;
use crate::contract::Kind;
use crate::Error;
use crate::Flags;
use crate::Newline;
use crate::Sink;
use crate::Slice;

/// A sink that fills a fixed-size, caller-owned buffer with a nul-terminated
/// string.
///
/// The capacity of the sink is the length of the buffer, and it counts the
/// terminator: a 16-byte buffer can hold 15 characters of text. The sink
/// borrows the buffer mutably for its whole life, which makes it impossible to
/// copy the sink or to touch the buffer behind its back.
///
/// Every write is all-or-nothing. If a write does not fit, it fails with
/// [`Error::CapacityExceeded`] and the buffer, including the terminator left by
/// the previous write, is untouched.
///
/// ```
/// # use weft::*;
/// let mut buf = [0xff; 8];
/// let mut sink = CStrSink::new(&mut buf);
///
/// sink.write(4, &["ab".into(), "cd".into()], Flags::NONE)?;
/// assert_eq!(sink.as_str(), "abcd");
/// assert_eq!(sink.size(), 4);
///
/// // Too big: nothing happens.
/// let err = sink.write(4, &["wxyz".into()], Flags::NONE).unwrap_err();
/// assert!(err.is_capacity_exceeded());
/// assert_eq!(sink.as_str(), "abcd");
///
/// drop(sink);
/// assert_eq!(&buf[..5], b"abcd\0");
/// # Ok::<(), weft::Error>(())
/// ```
pub struct CStrSink<'buf> {
  buf: &'buf mut [u8],
  len: usize,
  newline: Newline,
}

impl<'buf> CStrSink<'buf> {
  /// Creates a new, empty sink over `buf`.
  ///
  /// The contents of `buf` are not inspected; until the first successful
  /// write, [`CStrSink::as_c_str()`] returns `None` if no nul happens to be in
  /// the buffer already.
  pub fn new(buf: &'buf mut [u8]) -> Self {
    Self {
      buf,
      len: 0,
      newline: Newline::platform(),
    }
  }

  /// Sets the newline written for [`Flags::NEWLINE`].
  ///
  /// Defaults to [`Newline::platform()`].
  pub fn with_newline(mut self, newline: Newline) -> Self {
    self.newline = newline;
    self
  }

  /// Returns the number of characters written so far.
  ///
  /// This does not count the terminator, nor the newline appended by a
  /// newline write.
  pub fn size(&self) -> usize {
    self.len
  }

  /// Returns the total number of characters the buffer can hold, including
  /// the terminator.
  pub fn capacity(&self) -> usize {
    self.buf.len()
  }

  /// Returns the largest `total_len` a write without a newline could still
  /// accept.
  pub fn remaining(&self) -> usize {
    self.capacity().saturating_sub(self.len + 1)
  }

  /// Returns the text written so far.
  pub fn as_str(&self) -> &str {
    let bytes = &self.buf[..self.len];
    debug_assert!(str::from_utf8(bytes).is_ok());

    unsafe {
      // SAFETY: self.len is only advanced in write(), after the bytes up to
      // it have been filled by copying whole `str`s.
      str::from_utf8_unchecked(bytes)
    }
  }

  /// Returns the nul-terminated string in the buffer.
  ///
  /// After a newline write, this includes the newline. If the text itself
  /// contained a nul, the string ends there.
  pub fn as_c_str(&self) -> Option<&CStr> {
    CStr::from_bytes_until_nul(&self.buf[..]).ok()
  }

  /// Computes the capacity needed for a write, or `None` on overflow.
  fn required(&self, total_len: usize, flags: Flags) -> Option<usize> {
    let newline = if flags.newline() { self.newline.len() } else { 0 };
    self
      .len
      .checked_add(total_len)?
      .checked_add(newline)?
      .checked_add(1)
  }

  /// Copies `bytes` to `at`, returning the position just past them.
  ///
  /// The copy must stay inside `..end`, the region planned for this write.
  fn put(&mut self, at: usize, end: usize, bytes: &[u8]) -> usize {
    let next = at.saturating_add(bytes.len());
    contract::enforce(
      Kind::Precondition,
      next <= end,
      "c_string sink was handed slices longer than the declared total length",
    );

    self.buf[at..next].copy_from_slice(bytes);
    next
  }
}

impl Sink for CStrSink<'_> {
  fn write(
    &mut self,
    total_len: usize,
    slices: &[Slice],
    flags: Flags,
  ) -> Result<&mut Self, Error> {
    let capacity = self.capacity();
    let required = match self.required(total_len, flags) {
      Some(n) if n <= capacity => n,
      required => {
        let required = required.unwrap_or(usize::MAX);
        log::debug!(
          "c_string sink refused write: {required} required, {capacity} available"
        );
        return Err(Error::CapacityExceeded { required, capacity });
      }
    };

    // Everything past `required` is out of bounds for this write, so a lying
    // caller trips a contract check instead of scribbling on the rest of the
    // buffer.
    let mut p = self.len;
    for slice in slices {
      p = self.put(p, required, slice.as_bytes());
    }

    let newline = if flags.newline() { self.newline.len() } else { 0 };
    if flags.newline() {
      p = self.put(p, required, self.newline.as_str().as_bytes());
    }

    p = self.put(p, required, b"\0");

    let len = self.len + total_len;
    contract::enforce(
      Kind::Postcondition,
      p == len + newline + 1,
      "c_string sink writing logic failed: write pointer in wrong place",
    );

    self.len = len;
    log::trace!(
      "committed {total_len} characters to c_string sink ({len}/{capacity})"
    );
    Ok(self)
  }
}

/// Each `write!` is a single all-or-nothing write without a newline: the
/// formatted text is measured first, and nothing is written if it does not
/// fit.
impl fmt::Write for CStrSink<'_> {
  fn write_str(&mut self, s: &str) -> fmt::Result {
    match Sink::write(self, s.len(), &[Slice::new(s)], Flags::NONE) {
      Ok(_) => Ok(()),
      Err(_) => Err(fmt::Error),
    }
  }

  fn write_fmt(&mut self, args: fmt::Arguments) -> fmt::Result {
    let mut measure = Measure(0);
    fmt::write(&mut measure, args)?;

    let capacity = self.capacity();
    match self.required(measure.0, Flags::NONE) {
      Some(n) if n <= capacity => {}
      required => {
        let required = required.unwrap_or(usize::MAX);
        log::debug!(
          "c_string sink refused write: {required} required, {capacity} available"
        );
        return Err(fmt::Error);
      }
    }

    let len = self.len;
    let result = fmt::write(self, args);
    if result.is_err() {
      // Only reachable if formatting the same arguments twice produced
      // different text. Drop whatever pieces did make it in.
      self.len = len;
      self.buf[len] = 0;
    }
    result
  }
}

/// Counts the bytes a format string expands to.
struct Measure(usize);

impl fmt::Write for Measure {
  fn write_str(&mut self, s: &str) -> fmt::Result {
    self.0 = self.0.saturating_add(s.len());
    Ok(())
  }
}

impl fmt::Debug for CStrSink<'_> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("CStrSink")
      .field("text", &self.as_str())
      .field("size", &self.len)
      .field("capacity", &self.capacity())
      .finish()
  }
}
