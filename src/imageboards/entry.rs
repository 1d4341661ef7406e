//! Decoded search results
use crate::imageboards::post::{tags::TagType, Post};
use serde::{Deserialize, Serialize};

/// Result of a tag search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: u64,
    pub name: String,
    /// Number of posts using the tag.
    pub count: u64,
    pub category: TagType,
    pub ambiguous: bool,
}

/// Result of a user search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub active: bool,
}

/// Result of a comment search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub post_id: u64,
    /// Name of the author.
    pub creator: String,
    pub creator_id: u64,
    pub created_at: String,
    pub body: Option<String>,
}

/// One item of a [`ResultSet`]. All entries of a set share the same variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Entry {
    Post(Post),
    Tag(Tag),
    User(User),
    Comment(Comment),
}

impl Entry {
    pub const fn as_post(&self) -> Option<&Post> {
        match self {
            Self::Post(p) => Some(p),
            _ => None,
        }
    }

    pub const fn as_tag(&self) -> Option<&Tag> {
        match self {
            Self::Tag(t) => Some(t),
            _ => None,
        }
    }

    pub const fn as_user(&self) -> Option<&User> {
        match self {
            Self::User(u) => Some(u),
            _ => None,
        }
    }

    pub const fn as_comment(&self) -> Option<&Comment> {
        match self {
            Self::Comment(c) => Some(c),
            _ => None,
        }
    }

    pub const fn id(&self) -> u64 {
        match self {
            Self::Post(p) => p.id,
            Self::Tag(t) => t.id,
            Self::User(u) => u.id,
            Self::Comment(c) => c.id,
        }
    }
}

/// Pagination metadata reported by the server alongside a page of entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Page size the server applied. `0` when it didn't say.
    pub limit: u64,
    /// Index of the first entry of this page within the whole result.
    pub offset: u64,
    pub total_count: u64,
}

/// A single page of decoded entries.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResultSet {
    entries: Vec<Entry>,
    page: Option<PageInfo>,
}

impl ResultSet {
    pub fn new(entries: Vec<Entry>, page: Option<PageInfo>) -> Self {
        Self { entries, page }
    }

    #[inline]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[inline]
    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }

    /// Pagination metadata. Only XML post, tag and user searches report it.
    #[inline]
    pub const fn page_info(&self) -> Option<PageInfo> {
        self.page
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn posts(&self) -> impl Iterator<Item = &Post> {
        self.entries.iter().filter_map(Entry::as_post)
    }

    pub fn tags(&self) -> impl Iterator<Item = &Tag> {
        self.entries.iter().filter_map(Entry::as_tag)
    }

    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.entries.iter().filter_map(Entry::as_user)
    }

    pub fn comments(&self) -> impl Iterator<Item = &Comment> {
        self.entries.iter().filter_map(Entry::as_comment)
    }
}
