//! Owned handshake request for servers and tests.

use std::collections::HashSet;
use std::fmt;

use http::Uri;
use indexmap::IndexMap;

use crate::request::{HandshakeRequest, OpaqueSession, Principal};

#[derive(Clone)]
struct HeaderEntry {
    // First-seen spelling of the name
    name: String,
    values: Vec<String>,
}

/// An owned WebSocket handshake request.
///
/// Header names are matched case-insensitively and keep the spelling they
/// were first added with. Parameter names are case-sensitive. Both keep
/// insertion order. Parameters are seeded from the URI query string.
///
/// # Examples
///
/// ```
/// use handshake_adapter::{Handshake, HandshakeRequest, Principal};
///
/// let handshake = Handshake::new("/chat?room=rust&room=go".parse().unwrap())
///     .add_header("Cookie", "session=abc")
///     .set_principal(Principal {
///         id: "user-1".to_string(),
///         name: "Alice".to_string(),
///     })
///     .add_role("member");
///
/// assert_eq!(handshake.parameter_values("room").unwrap().len(), 2);
/// assert!(handshake.header_values("cookie").is_some());
/// assert!(handshake.is_user_in_role("member"));
/// ```
#[derive(Clone)]
pub struct Handshake {
    uri: Uri,
    headers: IndexMap<String, HeaderEntry>,
    parameters: IndexMap<String, Vec<String>>,
    principal: Option<Principal>,
    roles: HashSet<String>,
    session: Option<OpaqueSession>,
}

impl Handshake {
    /// Creates a handshake for `uri`, decoding its query into parameters.
    pub fn new(uri: Uri) -> Self {
        let mut parameters: IndexMap<String, Vec<String>> = IndexMap::new();
        if let Some(query) = uri.query() {
            for (name, value) in url::form_urlencoded::parse(query.as_bytes()) {
                parameters
                    .entry(name.into_owned())
                    .or_default()
                    .push(value.into_owned());
            }
        }

        Self {
            uri,
            headers: IndexMap::new(),
            parameters,
            principal: None,
            roles: HashSet::new(),
            session: None,
        }
    }

    /// Builds a handshake from an upgrade request.
    ///
    /// Every header value is copied; values that are not valid UTF-8 are
    /// skipped. A [`Principal`] or [`OpaqueSession`] stored in the request
    /// extensions is carried over.
    pub fn from_request<B>(request: &http::Request<B>) -> Self {
        let mut handshake = Self::new(request.uri().clone());

        for (name, value) in request.headers() {
            match value.to_str() {
                Ok(value) => handshake.push_header(name.as_str(), value.to_string()),
                Err(_) => tracing::warn!(header = %name, "skipping non UTF-8 header value"),
            }
        }

        handshake.principal = request.extensions().get::<Principal>().cloned();
        handshake.session = request.extensions().get::<OpaqueSession>().cloned();
        handshake
    }

    /// Appends a header value.
    pub fn add_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_header(&name.into(), value.into());
        self
    }

    /// Replaces every value of a header. An empty `values` keeps the name
    /// present with no values.
    pub fn set_header(mut self, name: impl Into<String>, values: Vec<String>) -> Self {
        let name = name.into();
        self.headers
            .entry(name.to_ascii_lowercase())
            .or_insert_with(|| HeaderEntry {
                name,
                values: Vec::new(),
            })
            .values = values;
        self
    }

    /// Appends a parameter value.
    pub fn add_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters
            .entry(name.into())
            .or_default()
            .push(value.into());
        self
    }

    /// Replaces every value of a parameter. An empty `values` keeps the name
    /// present with no values.
    pub fn set_parameter(mut self, name: impl Into<String>, values: Vec<String>) -> Self {
        self.parameters.insert(name.into(), values);
        self
    }

    /// Sets the authenticated principal.
    pub fn set_principal(mut self, principal: Principal) -> Self {
        self.principal = Some(principal);
        self
    }

    /// Grants a role to the principal.
    pub fn add_role(mut self, role: impl Into<String>) -> Self {
        self.roles.insert(role.into());
        self
    }

    /// Attaches the transport's session object.
    pub fn set_session(mut self, session: OpaqueSession) -> Self {
        self.session = Some(session);
        self
    }

    fn push_header(&mut self, name: &str, value: String) {
        self.headers
            .entry(name.to_ascii_lowercase())
            .or_insert_with(|| HeaderEntry {
                name: name.to_string(),
                values: Vec::new(),
            })
            .values
            .push(value);
    }
}

impl fmt::Debug for Handshake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Header and parameter values can carry credentials, so only names are shown
        f.debug_struct("Handshake")
            .field("uri", &self.uri)
            .field("headers", &self.header_names())
            .field("parameters", &self.parameter_names())
            .field("principal", &self.principal)
            .field("roles", &self.roles)
            .field("session", &self.session)
            .finish()
    }
}

impl HandshakeRequest for Handshake {
    fn header_values(&self, name: &str) -> Option<&[String]> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(|entry| entry.values.as_slice())
    }

    fn header_names(&self) -> Vec<&str> {
        self.headers
            .values()
            .map(|entry| entry.name.as_str())
            .collect()
    }

    fn parameter_values(&self, name: &str) -> Option<&[String]> {
        self.parameters.get(name).map(Vec::as_slice)
    }

    fn parameter_names(&self) -> Vec<&str> {
        self.parameters.keys().map(String::as_str).collect()
    }

    fn request_uri(&self) -> &Uri {
        &self.uri
    }

    fn query_string(&self) -> Option<&str> {
        self.uri.query()
    }

    fn user_principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    fn is_user_in_role(&self, role: &str) -> bool {
        self.principal.is_some() && self.roles.contains(role)
    }

    fn http_session(&self) -> Option<&OpaqueSession> {
        self.session.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::alice;
    use crate::HttpSession;

    #[test]
    fn new_decodes_query_parameters() {
        let handshake = Handshake::new("/ws?name=J%C3%B6rg&tag=a&tag=b+c&flag".parse().unwrap());

        assert_eq!(handshake.query_string(), Some("name=J%C3%B6rg&tag=a&tag=b+c&flag"));
        assert_eq!(handshake.parameter_values("name").unwrap(), ["Jörg"]);
        assert_eq!(handshake.parameter_values("tag").unwrap(), ["a", "b c"]);
        assert_eq!(handshake.parameter_values("flag").unwrap(), [""]);
        assert_eq!(handshake.parameter_names(), vec!["name", "tag", "flag"]);
    }

    #[test]
    fn headers_are_case_insensitive_and_keep_first_spelling() {
        let handshake = Handshake::new("/ws".parse().unwrap())
            .add_header("Sec-WebSocket-Protocol", "chat")
            .add_header("sec-websocket-protocol", "superchat")
            .add_header("Host", "example.com");

        assert_eq!(
            handshake.header_values("SEC-WEBSOCKET-PROTOCOL").unwrap(),
            ["chat", "superchat"]
        );
        assert_eq!(handshake.header_names(), vec!["Sec-WebSocket-Protocol", "Host"]);
    }

    #[test]
    fn set_header_and_parameter_allow_zero_values() {
        let handshake = Handshake::new("/ws".parse().unwrap())
            .set_header("X-Empty", Vec::new())
            .set_parameter("empty", Vec::new());

        assert_eq!(handshake.header_values("x-empty"), Some(&[][..]));
        assert_eq!(handshake.parameter_values("empty"), Some(&[][..]));
        assert_eq!(handshake.parameter_values("missing"), None);
    }

    #[test]
    fn roles_require_a_principal() {
        let anonymous = Handshake::new("/ws".parse().unwrap()).add_role("admin");
        assert!(!anonymous.is_user_in_role("admin"));

        let signed_in = anonymous.set_principal(alice());
        assert!(signed_in.is_user_in_role("admin"));
        assert!(!signed_in.is_user_in_role("owner"));
    }

    #[test]
    fn from_request_copies_headers_and_extensions() {
        let mut request = http::Request::builder()
            .uri("ws://example.com/chat?room=1")
            .header("Cookie", "a=1")
            .header("Cookie", "b=2")
            .header("Upgrade", "websocket")
            .body(())
            .unwrap();
        request.extensions_mut().insert(alice());
        request
            .extensions_mut()
            .insert(OpaqueSession::new(HttpSession::new("sess-1")));

        let handshake = Handshake::from_request(&request);

        assert_eq!(handshake.header_values("Cookie").unwrap(), ["a=1", "b=2"]);
        let mut names = handshake.header_names();
        names.sort_unstable();
        assert_eq!(names, vec!["cookie", "upgrade"]);
        assert_eq!(handshake.parameter_values("room").unwrap(), ["1"]);
        assert_eq!(handshake.user_principal(), Some(&alice()));
        assert!(handshake.http_session().is_some());
        assert_eq!(handshake.request_uri().scheme_str(), Some("ws"));
    }

    #[test]
    fn from_request_skips_non_utf8_values() {
        let request = http::Request::builder()
            .uri("/chat")
            .header("X-Binary", http::HeaderValue::from_bytes(b"\xff\xfe").unwrap())
            .header("X-Text", "ok")
            .body(())
            .unwrap();

        let handshake = Handshake::from_request(&request);

        assert_eq!(handshake.header_values("x-binary"), None);
        assert_eq!(handshake.header_values("x-text").unwrap(), ["ok"]);
    }

    #[test]
    fn debug_output_shows_names_but_not_values() {
        let handshake = Handshake::new("/ws".parse().unwrap())
            .add_header("Cookie", "session=s3cr3t")
            .add_parameter("token", "hunter2");

        let rendered = format!("{:?}", handshake);

        assert!(rendered.contains("Cookie"));
        assert!(rendered.contains("token"));
        assert!(!rendered.contains("s3cr3t"));
        assert!(!rendered.contains("hunter2"));
    }
}
