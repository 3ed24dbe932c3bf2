use chrono::{DateTime, Utc};

/// The session type the full request contract hands out.
///
/// Sessions are created and managed by the surrounding server. This crate
/// only passes existing sessions through, so the type is a read-only handle.
///
/// # Examples
///
/// ```
/// use handshake_adapter::HttpSession;
///
/// let session = HttpSession::new("sess-42");
/// assert_eq!(session.id(), "sess-42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSession {
    id: String,
    created_at: DateTime<Utc>,
}

impl HttpSession {
    /// Creates a session handle stamped with the current time.
    pub fn new(id: impl Into<String>) -> Self {
        Self::with_created_at(id, Utc::now())
    }

    /// Creates a session handle with an explicit creation time.
    pub fn with_created_at(id: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            created_at,
        }
    }

    /// Returns the session identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns when the session was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
