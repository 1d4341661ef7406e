//! Everything needed to search an imageboard: filters, query encoding, transport, decoding
//! and pagination.
use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub mod auth;
pub mod client;
pub mod decoder;
pub mod entry;
pub mod error;
pub mod filter;
pub mod paginator;
pub mod post;
pub mod query;
pub mod transport;

/// The wire format a search surface answers with.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum WireFormat {
    /// Gelbooru-style `index.php?page=dapi` responses.
    Xml,
    /// e621-style `posts.json` responses.
    Json,
}

/// Every search surface this crate knows how to query.
///
/// Each kind is bound to exactly one [`WireFormat`] and has its own set of query parameters
/// and limits.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    PostSearch,
    TagSearch,
    UserSearch,
    CommentSearch,
    JsonPostSearch,
}

impl BackendKind {
    #[inline]
    #[must_use]
    pub const fn wire_format(self) -> WireFormat {
        match self {
            Self::PostSearch | Self::TagSearch | Self::UserSearch | Self::CommentSearch => {
                WireFormat::Xml
            }
            Self::JsonPostSearch => WireFormat::Json,
        }
    }

    /// Highest `limit` value the server accepts for this kind, if it takes one at all.
    ///
    /// Tag searches report the cap the server actually enforces (1000), not the 100 stated in
    /// gelbooru's API documentation.
    #[inline]
    #[must_use]
    pub const fn max_limit(self) -> Option<u64> {
        match self {
            Self::PostSearch | Self::UserSearch => Some(100),
            Self::TagSearch => Some(1000),
            Self::JsonPostSearch => Some(320),
            Self::CommentSearch => None,
        }
    }

    /// Name of the XML root element wrapping the entries of this kind.
    #[must_use]
    pub const fn xml_root(self) -> Option<&'static str> {
        match self {
            Self::PostSearch => Some("posts"),
            Self::TagSearch => Some("tags"),
            Self::UserSearch => Some("users"),
            Self::CommentSearch => Some("comments"),
            Self::JsonPostSearch => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PostSearch => "post search",
            Self::TagSearch => "tag search",
            Self::UserSearch => "user search",
            Self::CommentSearch => "comment search",
            Self::JsonPostSearch => "json post search",
        }
    }
}

impl Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
