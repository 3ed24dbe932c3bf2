use std::error::Error as StdError;
use std::fmt;

/// Convenience alias used by every fallible operation in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced when a request operation cannot be honoured.
///
/// None of these are transient. Each one reports a structural gap between
/// what the caller asked for and what a handshake can supply, so callers
/// should surface them rather than retry.
///
/// # Examples
///
/// ```
/// use handshake_adapter::{Error, ErrorKind};
///
/// let error = Error::unsupported("input_stream");
/// assert_eq!(
///     error.kind(),
///     &ErrorKind::UnsupportedCapability { operation: "input_stream" }
/// );
/// assert!(error.to_string().contains("not supported by this adapter"));
/// ```
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: String,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl Error {
    /// Creates a new error with the given kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// The operation has no meaning for a handshake-only request.
    pub fn unsupported(operation: &'static str) -> Self {
        Self::new(
            ErrorKind::UnsupportedCapability { operation },
            format!("{} is not supported by this adapter", operation),
        )
    }

    /// A header value exists but does not match the one accepted format.
    pub fn invalid_header(
        header: impl Into<String>,
        value: impl Into<String>,
        expected: &'static str,
    ) -> Self {
        let header = header.into();
        let value = value.into();
        let message = format!(
            "unsupported format for header {} value ({}), expecting {}",
            header, value, expected
        );
        Self::new(ErrorKind::InvalidHeaderFormat { header, value }, message)
    }

    /// The handshake carries a session object of some other type.
    pub fn unexpected_session_type(actual: &'static str, expected: &'static str) -> Self {
        Self::new(
            ErrorKind::UnexpectedSessionType { actual },
            format!(
                "the associated session type ({}) of the handshake is not the expected {}",
                actual, expected
            ),
        )
    }

    /// A session was requested with `create = true` but none exists.
    pub fn session_creation_unsupported() -> Self {
        Self::new(
            ErrorKind::SessionCreationUnsupported,
            "no access to a session manager, a new session cannot be created",
        )
    }

    /// Attaches the underlying parse failure.
    pub(crate) fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the error kind.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns the human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns true if this error reports an unsupported operation.
    pub fn is_unsupported(&self) -> bool {
        matches!(self.kind, ErrorKind::UnsupportedCapability { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|source| source as &(dyn StdError + 'static))
    }
}

/// The kind of failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The operation cannot be derived from a handshake
    UnsupportedCapability {
        /// Name of the rejected operation
        operation: &'static str,
    },
    /// A header value failed to parse against its fixed format
    InvalidHeaderFormat {
        /// Header name as requested
        header: String,
        /// The offending raw value
        value: String,
    },
    /// The handshake session object is not an [`HttpSession`](crate::HttpSession)
    UnexpectedSessionType {
        /// Fully qualified name of the actual type
        actual: &'static str,
    },
    /// Session creation was requested but is not possible here
    SessionCreationUnsupported,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::UnsupportedCapability { operation } => {
                write!(f, "Unsupported capability '{}'", operation)
            }
            ErrorKind::InvalidHeaderFormat { header, .. } => {
                write!(f, "Invalid format for header '{}'", header)
            }
            ErrorKind::UnexpectedSessionType { actual } => {
                write!(f, "Unexpected session type '{}'", actual)
            }
            ErrorKind::SessionCreationUnsupported => write!(f, "Session creation unsupported"),
        }
    }
}
