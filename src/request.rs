use std::any::{self, Any};
use std::fmt;
use std::sync::Arc;

use http::Uri;

use crate::contract::HttpRequest;

/// An authenticated user or service principal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Unique identifier for this principal
    pub id: String,
    /// Display name
    pub name: String,
}

/// Session object attached to a handshake by the transport layer.
///
/// The transport does not promise any particular session type, so the value
/// is kept type-erased together with the name of its concrete type.
///
/// # Examples
///
/// ```
/// use handshake_adapter::{HttpSession, OpaqueSession};
///
/// let session = OpaqueSession::new(HttpSession::new("sess-1"));
/// assert!(session.type_name().ends_with("HttpSession"));
/// assert!(session.downcast::<HttpSession>().is_some());
/// assert!(session.downcast::<String>().is_none());
/// ```
#[derive(Clone)]
pub struct OpaqueSession {
    type_name: &'static str,
    value: Arc<dyn Any + Send + Sync>,
}

impl OpaqueSession {
    /// Wraps a session value.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self::from_arc(Arc::new(value))
    }

    /// Wraps an already shared session value without copying it.
    pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Self {
            type_name: any::type_name::<T>(),
            value,
        }
    }

    /// Returns the concrete type name of the wrapped value.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns the shared value if it is a `T`.
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.value).downcast::<T>().ok()
    }
}

impl fmt::Debug for OpaqueSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpaqueSession")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// The narrow, handshake-only view of an inbound connection request.
///
/// This is what a WebSocket server hands to upgrade hooks: headers, query
/// parameters, the request URI and whatever identity the connection carries.
/// Key lookups follow the implementor's own semantics; callers never
/// re-normalize names.
///
/// # Examples
///
/// ```
/// use handshake_adapter::{Handshake, HandshakeRequest};
///
/// let handshake = Handshake::new("/chat?room=1".parse().unwrap())
///     .add_header("Sec-WebSocket-Version", "13");
///
/// assert_eq!(
///     handshake.header_values("sec-websocket-version"),
///     Some(&["13".to_string()][..])
/// );
/// assert_eq!(handshake.query_string(), Some("room=1"));
/// ```
pub trait HandshakeRequest {
    /// Returns every value bound to a header name, or `None` if absent.
    fn header_values(&self, name: &str) -> Option<&[String]>;

    /// Returns all header names in the source's own order.
    fn header_names(&self) -> Vec<&str>;

    /// Returns every value bound to a parameter name, or `None` if absent.
    fn parameter_values(&self, name: &str) -> Option<&[String]>;

    /// Returns all parameter names in the source's own order.
    fn parameter_names(&self) -> Vec<&str>;

    /// Returns the request URI as received.
    fn request_uri(&self) -> &Uri;

    /// Returns the raw query string, if any.
    fn query_string(&self) -> Option<&str>;

    /// Returns the authenticated principal, if any.
    fn user_principal(&self) -> Option<&Principal>;

    /// Checks the connection's principal against a role.
    fn is_user_in_role(&self, role: &str) -> bool;

    /// Returns the session object attached by the transport, if any.
    fn http_session(&self) -> Option<&OpaqueSession>;

    /// Returns this request through the full contract when the type
    /// implements it natively.
    ///
    /// Types implementing both traits override this to return `Some(self)`
    /// so that [`wrap_if_needed`](crate::wrap_if_needed) passes them through.
    fn as_http_request(self: Arc<Self>) -> Option<Arc<dyn HttpRequest>> {
        None
    }
}
