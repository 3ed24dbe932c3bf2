//! Handshake adapter for exposing handshake requests through [`HttpRequest`].

use std::any;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::contract::{HttpRequest, ABSENT_HEADER};
use crate::cookie::{derive_cookies, Cookie};
use crate::date;
use crate::error::{Error, Result};
use crate::request::{HandshakeRequest, Principal};
use crate::session::HttpSession;

/// WebSocket opening handshakes are always GET requests (RFC 6455, 4.1).
const HANDSHAKE_METHOD: &str = "GET";

/// Adapter presenting a [`HandshakeRequest`] as a full [`HttpRequest`].
///
/// `HandshakeAdapter` answers the operations a handshake can support
/// (headers, cookies, parameters, URI, identity and an existing session)
/// and leaves everything else to the contract's defaults, which fail with
/// [`UnsupportedCapability`](crate::ErrorKind::UnsupportedCapability).
///
/// Cookies are parsed once, when the source is assigned.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use handshake_adapter::{Handshake, HandshakeAdapter, HttpRequest};
///
/// let handshake = Handshake::new("/chat?room=rust".parse().unwrap())
///     .add_header("Cookie", "theme=dark; beta");
///
/// let adapter = HandshakeAdapter::new(Arc::new(handshake));
///
/// assert_eq!(adapter.method().unwrap(), "GET");
/// assert_eq!(adapter.parameter("room").unwrap(), Some("rust"));
/// assert_eq!(adapter.cookies().unwrap().unwrap().len(), 2);
/// assert!(adapter.input_stream().is_err());
/// ```
pub struct HandshakeAdapter {
    source: Arc<dyn HandshakeRequest>,
    cookies: Option<Vec<Cookie>>,
}

impl HandshakeAdapter {
    /// Wraps `source`, parsing its cookies before returning.
    pub fn new(source: Arc<dyn HandshakeRequest>) -> Self {
        let cookies = derive_cookies(source.as_ref());
        Self { source, cookies }
    }

    /// Returns the wrapped handshake.
    pub fn source(&self) -> &Arc<dyn HandshakeRequest> {
        &self.source
    }

    /// Replaces the wrapped handshake.
    ///
    /// The cookie list is derived from the new source first, then both are
    /// swapped in together, so no read can see cookies from the old source.
    pub fn set_source(&mut self, source: Arc<dyn HandshakeRequest>) {
        let cookies = derive_cookies(source.as_ref());
        tracing::debug!(uri = %source.request_uri(), "reassigned handshake source");
        self.source = source;
        self.cookies = cookies;
    }
}

impl fmt::Debug for HandshakeAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Cookie values can carry credentials, so only names are shown
        let cookie_names: Option<Vec<&str>> = self
            .cookies
            .as_ref()
            .map(|cookies| cookies.iter().map(Cookie::name).collect());
        f.debug_struct("HandshakeAdapter")
            .field("uri", self.source.request_uri())
            .field("cookies", &cookie_names)
            .finish()
    }
}

impl HttpRequest for HandshakeAdapter {
    fn cookies(&self) -> Result<Option<&[Cookie]>> {
        Ok(self.cookies.as_deref())
    }

    fn date_header(&self, name: &str) -> Result<i64> {
        match self.header(name)? {
            None => Ok(ABSENT_HEADER.into()),
            Some(value) => Ok(date::parse_with_header(name, value)?.timestamp_millis()),
        }
    }

    fn header(&self, name: &str) -> Result<Option<&str>> {
        Ok(self
            .source
            .header_values(name)
            .and_then(|values| values.first())
            .map(String::as_str))
    }

    fn headers(&self, name: &str) -> Result<Option<&[String]>> {
        Ok(self.source.header_values(name))
    }

    fn header_names(&self) -> Result<Vec<&str>> {
        Ok(self.source.header_names())
    }

    fn int_header(&self, name: &str) -> Result<i32> {
        match self.header(name)? {
            None => Ok(ABSENT_HEADER),
            Some(value) => value.parse::<i32>().map_err(|e| {
                Error::invalid_header(name, value, "a base-10 integer").with_source(e)
            }),
        }
    }

    fn method(&self) -> Result<&str> {
        Ok(HANDSHAKE_METHOD)
    }

    fn query_string(&self) -> Result<Option<&str>> {
        Ok(self.source.query_string())
    }

    fn is_user_in_role(&self, role: &str) -> Result<bool> {
        Ok(self.source.is_user_in_role(role))
    }

    fn user_principal(&self) -> Result<Option<&Principal>> {
        Ok(self.source.user_principal())
    }

    fn request_uri(&self) -> Result<String> {
        Ok(self.source.request_uri().to_string())
    }

    fn session(&self, create: bool) -> Result<Option<Arc<HttpSession>>> {
        match self.source.http_session() {
            Some(session) => match session.downcast::<HttpSession>() {
                Some(session) => Ok(Some(session)),
                None => {
                    tracing::warn!(
                        actual = session.type_name(),
                        "handshake session is not an HttpSession"
                    );
                    Err(Error::unexpected_session_type(
                        session.type_name(),
                        any::type_name::<HttpSession>(),
                    ))
                }
            },
            None if create => Err(Error::session_creation_unsupported()),
            None => Ok(None),
        }
    }

    fn parameter(&self, name: &str) -> Result<Option<&str>> {
        Ok(self
            .source
            .parameter_values(name)
            .map(|values| values.first().map_or("", String::as_str)))
    }

    fn parameter_names(&self) -> Result<Vec<&str>> {
        Ok(self.source.parameter_names())
    }

    fn parameter_values(&self, name: &str) -> Result<Option<&[String]>> {
        Ok(self.source.parameter_values(name))
    }

    fn parameter_map(&self) -> Result<IndexMap<String, Vec<String>>> {
        Ok(self
            .source
            .parameter_names()
            .into_iter()
            .map(|name| {
                let values = self.source.parameter_values(name).unwrap_or_default();
                (name.to_string(), values.to_vec())
            })
            .collect())
    }

    fn scheme(&self) -> Result<Option<&str>> {
        Ok(self.source.request_uri().scheme_str())
    }
}

/// Returns `source` as an [`HttpRequest`], wrapping it only when needed.
///
/// Sources that already implement the full contract (signalled through
/// [`HandshakeRequest::as_http_request`]) are returned unchanged. Everything
/// else gets a new [`HandshakeAdapter`].
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use handshake_adapter::{wrap_if_needed, Handshake, HttpRequest};
///
/// let request = wrap_if_needed(Arc::new(Handshake::new("/ws".parse().unwrap())));
/// assert_eq!(request.request_uri().unwrap(), "/ws");
/// ```
pub fn wrap_if_needed(source: Arc<dyn HandshakeRequest>) -> Arc<dyn HttpRequest> {
    match Arc::clone(&source).as_http_request() {
        Some(native) => {
            tracing::debug!("handshake implements the full request contract, not wrapping");
            native
        }
        None => Arc::new(HandshakeAdapter::new(source)),
    }
}
