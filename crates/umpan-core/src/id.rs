//! Identifier references as they arrive from callers.
//!
//! Ids are stored as integers, but callers hand them over as path segments or
//! query values, so a reference may be numeric text or arbitrary text.
//! Matching tries numeric equality first and only falls back to an exact
//! string comparison when the reference is not a number.

use std::fmt;

/// A caller-supplied reference to a stored id.
#[derive(Debug, Clone, PartialEq)]
pub enum IdRef {
  /// The trimmed text parsed as a number.
  Numeric(f64),
  /// Anything else, kept verbatim.
  Text(String),
}

impl IdRef {
  pub fn parse(raw: &str) -> Self {
    match raw.trim().parse::<f64>() {
      Ok(n) if !n.is_nan() => Self::Numeric(n),
      _ => Self::Text(raw.to_owned()),
    }
  }

  /// Whether this reference designates `id`.
  pub fn matches(&self, id: u64) -> bool {
    match self {
      Self::Numeric(n) => id as f64 == *n,
      Self::Text(s) => id.to_string() == *s,
    }
  }
}

impl From<u64> for IdRef {
  fn from(id: u64) -> Self { Self::Numeric(id as f64) }
}

impl From<&str> for IdRef {
  fn from(raw: &str) -> Self { Self::parse(raw) }
}

impl fmt::Display for IdRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Numeric(n) => write!(f, "{n}"),
      Self::Text(s) => f.write_str(s),
    }
  }
}
