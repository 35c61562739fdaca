//! Error types for calendar and span handling.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from time construction and conversion.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum TimeError {
    /// A span's start instant is after its end.
    InvalidSpan(&'static str),
    /// A calendar field is outside its valid range.
    InvalidCalendar(&'static str),
}

impl Display for TimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSpan(msg) => write!(f, "invalid time span: {msg}"),
            Self::InvalidCalendar(msg) => write!(f, "invalid calendar date: {msg}"),
        }
    }
}

impl Error for TimeError {}
