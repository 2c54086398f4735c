//! Argument conversion.
//!
//! Every argument to a statement goes through [`Arg::shim()`] exactly once per
//! request, which turns it into text the engine can slice. Text that already
//! exists (`str`, `String`, yarns) is borrowed; everything else is rendered
//! into a yarn, which stores short results inline and so rarely allocates.

use std::fmt;

use byteyarn::YarnBox;

use crate::Slice;

/// A value that can be inserted into a statement.
///
/// Implement this for your own types to make them usable as arguments. Types
/// that implement [`fmt::Display`] can be passed through [`display()`]
/// instead.
pub trait Arg {
  /// Converts this value into text.
  ///
  /// The result may borrow from `self`. An empty result inserts nothing.
  fn shim(&self) -> YarnBox<'_, str>;
}

impl Arg for str {
  fn shim(&self) -> YarnBox<'_, str> {
    YarnBox::new(self)
  }
}

impl Arg for String {
  fn shim(&self) -> YarnBox<'_, str> {
    YarnBox::new(self)
  }
}

impl Arg for YarnBox<'_, str> {
  fn shim(&self) -> YarnBox<'_, str> {
    self.aliased()
  }
}

impl Arg for Slice<'_> {
  fn shim(&self) -> YarnBox<'_, str> {
    YarnBox::new(self.as_str())
  }
}

impl Arg for char {
  fn shim(&self) -> YarnBox<'_, str> {
    YarnBox::from_char(*self)
  }
}

impl Arg for bool {
  fn shim(&self) -> YarnBox<'_, str> {
    YarnBox::new(if *self { "true" } else { "false" })
  }
}

impl<T: Arg> Arg for Option<T> {
  fn shim(&self) -> YarnBox<'_, str> {
    match self {
      Some(x) => x.shim(),
      None => YarnBox::new(""),
    }
  }
}

impl<T: Arg + ?Sized> Arg for &T {
  fn shim(&self) -> YarnBox<'_, str> {
    T::shim(self)
  }
}

impl<T: Arg + ?Sized> Arg for &mut T {
  fn shim(&self) -> YarnBox<'_, str> {
    T::shim(self)
  }
}

impl<T: Arg + ?Sized> Arg for Box<T> {
  fn shim(&self) -> YarnBox<'_, str> {
    T::shim(self)
  }
}

macro_rules! display_shims {
  ($($ty:ty),* $(,)?) => {$(
    impl Arg for $ty {
      fn shim(&self) -> YarnBox<'_, str> {
        YarnBox::<str>::from_fmt(format_args!("{self}"))
      }
    }
  )*};
}

display_shims! {
  u8, u16, u32, u64, u128, usize,
  i8, i16, i32, i64, i128, isize,
  f32, f64,
}

/// An [`Arg`] that renders a [`fmt::Display`] value.
///
/// See [`display()`].
#[derive(Copy, Clone)]
pub struct Display<'a, T: ?Sized>(&'a T);

/// Adapts any [`fmt::Display`] value into an [`Arg`].
///
/// ```
/// # use weft::*;
/// let addr = std::net::Ipv4Addr::LOCALHOST;
///
/// let mut out = String::new();
/// weft::fmt!(&mut out, "listening on {0}", arg::display(&addr))?;
/// assert_eq!(out, "listening on 127.0.0.1");
/// # Ok::<(), weft::Error>(())
/// ```
pub fn display<T: fmt::Display + ?Sized>(value: &T) -> Display<'_, T> {
  Display(value)
}

impl<T: fmt::Display + ?Sized> Arg for Display<'_, T> {
  fn shim(&self) -> YarnBox<'_, str> {
    YarnBox::<str>::from_fmt(format_args!("{}", self.0))
  }
}
