//! Library error type.

use core::fmt;

/// Errors produced while assembling an upload request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The serialized JSON body did not fit its fixed-capacity buffer.
    BodyOverflow,
    /// The framed HTTP request did not fit its fixed-capacity buffer.
    RequestOverflow,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BodyOverflow => write!(f, "payload body exceeds buffer capacity"),
            Error::RequestOverflow => write!(f, "request exceeds buffer capacity"),
        }
    }
}
