//! Contract enforcement for internal invariants.
//!
//! A contract violation means this library (or a caller breaking a documented
//! obligation it cannot check up front) has put a sink in a state that should
//! be impossible. These are not [`Error`][crate::Error]s: continuing past one
//! risks emitting corrupted text, so they always panic.
//!
//! The panic payload is a [`Violation`], which [`catch()`] can recover for
//! callers that would rather report the defect than unwind through it.
//!
//! ```
//! use weft::contract;
//!
//! let result = contract::catch(|| {
//!   contract::enforce(contract::Kind::Invariant, 1 + 1 == 3, "math is broken");
//! });
//!
//! let violation = result.unwrap_err();
//! assert_eq!(violation.kind(), contract::Kind::Invariant);
//! assert_eq!(violation.message(), "math is broken");
//! ```

use std::fmt;
use std::panic;
use std::panic::AssertUnwindSafe;
use std::panic::Location;

/// The kind of contract that was violated.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Kind {
  /// A condition a caller was required to establish before an operation.
  Precondition,
  /// A condition an operation guarantees on completion.
  Postcondition,
  /// A condition that must hold at all times.
  Invariant,
}

impl Kind {
  fn name(self) -> &'static str {
    match self {
      Self::Precondition => "precondition",
      Self::Postcondition => "postcondition",
      Self::Invariant => "invariant",
    }
  }
}

/// A record of a violated contract.
///
/// This is the panic payload produced by [`enforce()`].
#[derive(Clone, Debug)]
pub struct Violation {
  kind: Kind,
  message: String,
  location: &'static Location<'static>,
}

impl Violation {
  /// Returns what kind of contract was violated.
  pub fn kind(&self) -> Kind {
    self.kind
  }

  /// Returns the message describing the violation.
  pub fn message(&self) -> &str {
    &self.message
  }

  /// Returns where the contract was checked.
  pub fn location(&self) -> &'static Location<'static> {
    self.location
  }
}

impl fmt::Display for Violation {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(
      f,
      "{} violated at {}: {}",
      self.kind.name(),
      self.location,
      self.message
    )
  }
}

/// Checks `cond`, and panics with a [`Violation`] if it is false.
///
/// The violation is logged at error level before unwinding.
#[track_caller]
pub fn enforce(kind: Kind, cond: bool, message: impl fmt::Display) {
  if cond {
    return;
  }

  let violation = Violation {
    kind,
    message: message.to_string(),
    location: Location::caller(),
  };

  log::error!("contract {violation}");
  panic::panic_any(violation)
}

/// Runs `body`, converting a [`Violation`] panic into an `Err`.
///
/// Panics with any other payload are resumed as-is.
pub fn catch<R>(body: impl FnOnce() -> R) -> Result<R, Violation> {
  match panic::catch_unwind(AssertUnwindSafe(body)) {
    Ok(r) => Ok(r),
    Err(payload) => match payload.downcast::<Violation>() {
      Ok(violation) => Err(*violation),
      Err(payload) => panic::resume_unwind(payload),
    },
  }
}
