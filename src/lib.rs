//! Capability-limited adapter for WebSocket handshake requests.
//!
//! A WebSocket server hands upgrade hooks a narrow view of the opening
//! request: headers, query parameters, the request URI and whatever identity
//! and session the connection carries. Code written against a full HTTP
//! request interface expects far more. This crate bridges the two:
//! - **Full contract**: [`HttpRequest`] lists every operation a request
//!   consumer may ask for, and each one fails with
//!   [`ErrorKind::UnsupportedCapability`] unless overridden
//! - **Adapter**: [`HandshakeAdapter`] overrides exactly the operations that
//!   can be derived from a [`HandshakeRequest`]
//! - **Factory**: [`wrap_if_needed`] avoids wrapping sources that already
//!   implement the full contract
//!
//! # Core Types
//!
//! - [`HandshakeRequest`]: the narrow source view
//! - [`Handshake`]: owned handshake, buildable from an [`http::Request`]
//! - [`HttpRequest`]: the full request contract
//! - [`NullRequest`]: a request that supports nothing
//! - [`Cookie`]: one pair from a `Cookie` header
//! - [`HttpSession`]: the session type handed out by [`HttpRequest::session`]
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use handshake_adapter::{wrap_if_needed, ErrorKind, Handshake, HttpRequest};
//!
//! let handshake = Handshake::new("/chat?room=rust".parse().unwrap())
//!     .add_header("Cookie", "theme=dark; beta")
//!     .add_header("If-Modified-Since", "Wed, 21 Oct 2015 07:28:00 GMT");
//!
//! let request = wrap_if_needed(Arc::new(handshake));
//!
//! assert_eq!(request.method().unwrap(), "GET");
//! assert_eq!(request.parameter("room").unwrap(), Some("rust"));
//! assert_eq!(request.date_header("If-Modified-Since").unwrap(), 1_445_412_480_000);
//! assert_eq!(request.date_header("Date").unwrap(), -1);
//!
//! // Things a handshake cannot know are rejected, never defaulted
//! let error = request.content_length().unwrap_err();
//! assert_eq!(
//!     error.kind(),
//!     &ErrorKind::UnsupportedCapability { operation: "content_length" }
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod adapter;
mod contract;
mod cookie;
mod date;
mod error;
mod handshake;
mod request;
mod session;

#[cfg(test)]
mod test_utils;

pub use adapter::{wrap_if_needed, HandshakeAdapter};
pub use contract::{DispatcherType, HttpRequest, NullRequest, Opaque, Part, ABSENT_HEADER};
pub use cookie::{Cookie, COOKIE_HEADER};
pub use date::parse_http_date;
pub use error::{Error, ErrorKind, Result};
pub use handshake::Handshake;
pub use request::{HandshakeRequest, OpaqueSession, Principal};
pub use session::HttpSession;
