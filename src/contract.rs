//! The full request contract and its reject-all defaults.
//!
//! [`HttpRequest`] describes everything a general-purpose request consumer
//! may ask of a request: headers, cookies, sessions, parameters, attributes,
//! body streams, security, async processing and dispatch. Every method has a
//! default body that fails with [`ErrorKind::UnsupportedCapability`], so an
//! implementor overrides only what it can honestly answer. A default never
//! returns an "empty" value, which keeps "unsupported" from being mistaken
//! for "absent".
//!
//! [`ErrorKind::UnsupportedCapability`]: crate::ErrorKind::UnsupportedCapability

use std::any::Any;
use std::fmt;
use std::io::{BufRead, Read};
use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::cookie::Cookie;
use crate::error::{Error, Result};
use crate::request::Principal;
use crate::session::HttpSession;

/// Returned by [`HttpRequest::date_header`] and [`HttpRequest::int_header`]
/// when the header is not present.
pub const ABSENT_HEADER: i32 = -1;

/// Type-erased object owned by the surrounding server runtime
/// (attribute values, dispatchers, async contexts).
pub type Opaque = Arc<dyn Any + Send + Sync>;

/// How a request reached the code handling it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatcherType {
    /// Initial client request
    Request,
    /// Forwarded by another handler
    Forward,
    /// Included into another handler's response
    Include,
    /// Resumed async processing
    Async,
    /// Error page dispatch
    Error,
}

impl fmt::Display for DispatcherType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatcherType::Request => write!(f, "REQUEST"),
            DispatcherType::Forward => write!(f, "FORWARD"),
            DispatcherType::Include => write!(f, "INCLUDE"),
            DispatcherType::Async => write!(f, "ASYNC"),
            DispatcherType::Error => write!(f, "ERROR"),
        }
    }
}

/// One part of a `multipart/form-data` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    name: String,
    content_type: Option<String>,
    data: Vec<u8>,
}

impl Part {
    /// Creates a part.
    pub fn new(name: impl Into<String>, content_type: Option<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type,
            data,
        }
    }

    /// Returns the form field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared content type, if any.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Returns the raw part body.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

fn unsupported<T>(operation: &'static str) -> Result<T> {
    tracing::debug!(operation, "rejecting unsupported request operation");
    Err(Error::unsupported(operation))
}

/// The full request contract expected by general-purpose consumers.
///
/// All operations are fallible. Callers must not assume a best-effort
/// answer: the only silently substituted values are the documented absence
/// cases (`None`, [`ABSENT_HEADER`]).
///
/// # Examples
///
/// ```
/// use handshake_adapter::{HttpRequest, NullRequest};
///
/// let request = NullRequest;
/// let error = request.header("Host").unwrap_err();
/// assert!(error.is_unsupported());
/// ```
#[allow(unused_variables)]
pub trait HttpRequest {
    /// Authentication scheme used to protect the request.
    fn auth_type(&self) -> Result<Option<String>> {
        unsupported("auth_type")
    }

    /// Cookies sent with the request, `None` if there were none.
    fn cookies(&self) -> Result<Option<&[Cookie]>> {
        unsupported("cookies")
    }

    /// Date header as milliseconds since the Unix epoch, or [`ABSENT_HEADER`].
    fn date_header(&self, name: &str) -> Result<i64> {
        unsupported("date_header")
    }

    /// First value of a header.
    fn header(&self, name: &str) -> Result<Option<&str>> {
        unsupported("header")
    }

    /// Every value of a header, `None` if the name is absent.
    fn headers(&self, name: &str) -> Result<Option<&[String]>> {
        unsupported("headers")
    }

    /// All header names.
    fn header_names(&self) -> Result<Vec<&str>> {
        unsupported("header_names")
    }

    /// Integer header, or [`ABSENT_HEADER`].
    fn int_header(&self, name: &str) -> Result<i32> {
        unsupported("int_header")
    }

    /// HTTP method.
    fn method(&self) -> Result<&str> {
        unsupported("method")
    }

    /// Extra path information after the handler path.
    fn path_info(&self) -> Result<Option<String>> {
        unsupported("path_info")
    }

    /// Path info translated to a filesystem path.
    fn path_translated(&self) -> Result<Option<PathBuf>> {
        unsupported("path_translated")
    }

    /// Context path prefix of the application.
    fn context_path(&self) -> Result<String> {
        unsupported("context_path")
    }

    /// Raw query string.
    fn query_string(&self) -> Result<Option<&str>> {
        unsupported("query_string")
    }

    /// Login of the authenticated user.
    fn remote_user(&self) -> Result<Option<String>> {
        unsupported("remote_user")
    }

    /// Whether the authenticated user holds `role`.
    fn is_user_in_role(&self, role: &str) -> Result<bool> {
        unsupported("is_user_in_role")
    }

    /// Authenticated principal.
    fn user_principal(&self) -> Result<Option<&Principal>> {
        unsupported("user_principal")
    }

    /// Session id sent by the client.
    fn requested_session_id(&self) -> Result<Option<String>> {
        unsupported("requested_session_id")
    }

    /// Request URI as received.
    fn request_uri(&self) -> Result<String> {
        unsupported("request_uri")
    }

    /// Reconstructed absolute URL without the query string.
    fn request_url(&self) -> Result<String> {
        unsupported("request_url")
    }

    /// Path of the handler that matched the request.
    fn handler_path(&self) -> Result<String> {
        unsupported("handler_path")
    }

    /// Current session, creating one if `create` is set.
    fn session(&self, create: bool) -> Result<Option<Arc<HttpSession>>> {
        unsupported("session")
    }

    /// Current session, creating one if needed.
    #[deprecated(note = "use `session(true)`")]
    fn current_session(&self) -> Result<Option<Arc<HttpSession>>> {
        self.session(true)
    }

    /// Assigns a new id to the current session.
    fn change_session_id(&self) -> Result<String> {
        unsupported("change_session_id")
    }

    /// Whether the requested session id is still valid.
    fn is_requested_session_id_valid(&self) -> Result<bool> {
        unsupported("is_requested_session_id_valid")
    }

    /// Whether the requested session id came from a cookie.
    fn is_requested_session_id_from_cookie(&self) -> Result<bool> {
        unsupported("is_requested_session_id_from_cookie")
    }

    /// Whether the requested session id came from the URL.
    fn is_requested_session_id_from_url(&self) -> Result<bool> {
        unsupported("is_requested_session_id_from_url")
    }

    /// Runs the container's authentication for this request.
    fn authenticate(&self) -> Result<bool> {
        unsupported("authenticate")
    }

    /// Authenticates with a username and password.
    fn login(&self, username: &str, password: &str) -> Result<()> {
        unsupported("login")
    }

    /// Clears the authenticated identity.
    fn logout(&self) -> Result<()> {
        unsupported("logout")
    }

    /// All multipart body parts.
    fn parts(&self) -> Result<Vec<Part>> {
        unsupported("parts")
    }

    /// A single multipart body part.
    fn part(&self, name: &str) -> Result<Option<Part>> {
        unsupported("part")
    }

    /// Hands the connection over to a protocol upgrade handler.
    fn upgrade(&self) -> Result<Opaque> {
        unsupported("upgrade")
    }

    /// Request-scoped attribute.
    fn attribute(&self, name: &str) -> Result<Option<Opaque>> {
        unsupported("attribute")
    }

    /// Names of all request-scoped attributes.
    fn attribute_names(&self) -> Result<Vec<String>> {
        unsupported("attribute_names")
    }

    /// Stores a request-scoped attribute.
    fn set_attribute(&self, name: &str, value: Opaque) -> Result<()> {
        unsupported("set_attribute")
    }

    /// Removes a request-scoped attribute.
    fn remove_attribute(&self, name: &str) -> Result<()> {
        unsupported("remove_attribute")
    }

    /// Body character encoding.
    fn character_encoding(&self) -> Result<Option<String>> {
        unsupported("character_encoding")
    }

    /// Overrides the body character encoding.
    fn set_character_encoding(&self, encoding: &str) -> Result<()> {
        unsupported("set_character_encoding")
    }

    /// Body length in bytes.
    fn content_length(&self) -> Result<Option<u64>> {
        unsupported("content_length")
    }

    /// Body MIME type.
    fn content_type(&self) -> Result<Option<String>> {
        unsupported("content_type")
    }

    /// Binary body stream.
    fn input_stream(&self) -> Result<Box<dyn Read + Send>> {
        unsupported("input_stream")
    }

    /// Character body stream.
    fn reader(&self) -> Result<Box<dyn BufRead + Send>> {
        unsupported("reader")
    }

    /// First value of a request parameter.
    fn parameter(&self, name: &str) -> Result<Option<&str>> {
        unsupported("parameter")
    }

    /// All parameter names.
    fn parameter_names(&self) -> Result<Vec<&str>> {
        unsupported("parameter_names")
    }

    /// Every value of a parameter, `None` if the name is absent.
    fn parameter_values(&self, name: &str) -> Result<Option<&[String]>> {
        unsupported("parameter_values")
    }

    /// Owned copy of every parameter and its values.
    fn parameter_map(&self) -> Result<IndexMap<String, Vec<String>>> {
        unsupported("parameter_map")
    }

    /// Protocol name and version, e.g. `HTTP/1.1`.
    fn protocol(&self) -> Result<String> {
        unsupported("protocol")
    }

    /// URI scheme.
    fn scheme(&self) -> Result<Option<&str>> {
        unsupported("scheme")
    }

    /// Host name the request was sent to.
    fn server_name(&self) -> Result<String> {
        unsupported("server_name")
    }

    /// Port the request was sent to.
    fn server_port(&self) -> Result<u16> {
        unsupported("server_port")
    }

    /// Client address.
    fn remote_addr(&self) -> Result<IpAddr> {
        unsupported("remote_addr")
    }

    /// Client host name.
    fn remote_host(&self) -> Result<String> {
        unsupported("remote_host")
    }

    /// Client port.
    fn remote_port(&self) -> Result<u16> {
        unsupported("remote_port")
    }

    /// Host name of the receiving interface.
    fn local_name(&self) -> Result<String> {
        unsupported("local_name")
    }

    /// Address of the receiving interface.
    fn local_addr(&self) -> Result<IpAddr> {
        unsupported("local_addr")
    }

    /// Port of the receiving interface.
    fn local_port(&self) -> Result<u16> {
        unsupported("local_port")
    }

    /// Preferred client locale as a language tag.
    fn locale(&self) -> Result<String> {
        unsupported("locale")
    }

    /// Acceptable client locales, most preferred first.
    fn locales(&self) -> Result<Vec<String>> {
        unsupported("locales")
    }

    /// Whether the request arrived over a secure channel.
    fn is_secure(&self) -> Result<bool> {
        unsupported("is_secure")
    }

    /// Dispatcher for forwarding to or including `path`.
    fn request_dispatcher(&self, path: &str) -> Result<Opaque> {
        unsupported("request_dispatcher")
    }

    /// Filesystem path backing a virtual path.
    fn real_path(&self, path: &str) -> Result<Option<PathBuf>> {
        unsupported("real_path")
    }

    /// Application-wide server context.
    fn server_context(&self) -> Result<Opaque> {
        unsupported("server_context")
    }

    /// Puts the request into async mode.
    fn start_async(&self) -> Result<Opaque> {
        unsupported("start_async")
    }

    /// Whether async mode has been started.
    fn is_async_started(&self) -> Result<bool> {
        unsupported("is_async_started")
    }

    /// Whether async mode is available.
    fn is_async_supported(&self) -> Result<bool> {
        unsupported("is_async_supported")
    }

    /// Context of the running async operation.
    fn async_context(&self) -> Result<Opaque> {
        unsupported("async_context")
    }

    /// How the request was dispatched.
    fn dispatcher_type(&self) -> Result<DispatcherType> {
        unsupported("dispatcher_type")
    }
}

/// A request that supports nothing.
///
/// Useful as a stand-in where a request is structurally required but none
/// is available; every operation reports
/// [`UnsupportedCapability`](crate::ErrorKind::UnsupportedCapability).
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRequest;

impl HttpRequest for NullRequest {}
