//! Error types for the codec and the device facade.

use thiserror::Error;

use crate::types::Property;

/// Errors raised while decoding a response frame.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Wrong length, or missing head/tail marker.
    #[error("malformed frame: {0}")]
    Framing(String),

    /// Byte 1 is neither a property reply nor a sample reply.
    #[error("unknown reply kind: 0x{0:02X}")]
    UnknownReplyKind(u8),

    /// Byte 2 of a property reply names no known property.
    #[error("unknown property code: 0x{0:02X}")]
    UnknownProperty(u8),
}

/// What a failed exchange was about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    Property(Property),
    Sample,
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Subject::Property(property) => write!(f, "{}", property),
            Subject::Sample => write!(f, "sample"),
        }
    }
}

/// Errors returned by [`Sds011`](crate::Sds011) operations.
///
/// `E` is the transport's own error type, carried through unmodified.
#[derive(Error, Debug)]
pub enum DeviceError<E: std::fmt::Debug> {
    /// The response frame could not be decoded.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The device did not give a trustworthy answer: the checksum failed,
    /// or a read got no complete response.
    #[error("value unknown for {0}: no valid response")]
    ValueUnknown(Subject),

    /// A write got no complete response; the device is likely powered off
    /// or disconnected.
    #[error("device inactive: no response to {0} write")]
    DeviceInactive(Property),

    /// The transport accepted only part of a command frame; no response
    /// was read.
    #[error("incomplete write: {written} of {expected} command bytes sent")]
    IncompleteWrite { written: usize, expected: usize },

    /// A well-formed reply arrived, but not the one the request asked for.
    #[error("unexpected reply to {expected} request")]
    UnexpectedReply { expected: Subject },

    /// The property cannot be written.
    #[error("{0} is read-only")]
    ReadOnly(Property),

    /// Invalid parameter passed to a function
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Transport layer error
    #[error("transport error: {0:?}")]
    Transport(E),
}
