//! Credentials appended to every query sent to a server
use std::fmt;

/// An API key paired with the account it belongs to.
///
/// Authenticating with both may lift the server's anonymous rate limits. The pair is opaque:
/// it is never checked against the server and is sent as-is on every request.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken {
    api_key: String,
    user_id: String,
}

impl AuthToken {
    /// Returns `None` unless both the key and the user id are non-empty.
    pub fn new<K, U>(api_key: K, user_id: U) -> Option<Self>
    where
        K: Into<String>,
        U: Into<String>,
    {
        let api_key = api_key.into();
        let user_id = user_id.into();

        if api_key.is_empty() || user_id.is_empty() {
            return None;
        }

        Some(Self { api_key, user_id })
    }

    #[inline]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    #[inline]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthToken")
            .field("api_key", &"<redacted>")
            .field("user_id", &self.user_id)
            .finish()
    }
}
