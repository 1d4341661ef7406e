//! # Post Tags
//!
//! Tags attached to a [`Post`](crate::Post), each with the category the server filed it under.
//! Gelbooru post listings carry a flat tag string, so those tags end up as [`TagType::Any`].
use serde::{Deserialize, Serialize};

/// A single tag attached to a post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostTag {
    tag: String,
    tag_type: TagType,
}

/// Categorizes the type or nature of a tag.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TagType {
    /// Tags identifying the artist(s) of the work.
    Author,
    /// Tags related to copyright, series, or franchise.
    Copyright,
    /// Tags identifying specific characters depicted.
    Character,
    /// Tags identifying the species of characters, primarily used on e621/e926.
    Species,
    /// General descriptive tags about the content, scene, or attributes.
    General,
    /// Tags related to lore or setting, primarily used on e621/e926.
    Lore,
    /// Meta-tags related to the post itself (e.g., "high_resolution", "tagme").
    Meta,
    /// Tags flagged as invalid or deprecated by the server.
    Invalid,
    /// A catch-all or unspecified tag type.
    Any,
}

impl TagType {
    /// Maps the numeric `type` of a gelbooru tag search result.
    pub const fn from_gelbooru(code: u64) -> Self {
        match code {
            0 => Self::General,
            1 => Self::Author,
            3 => Self::Copyright,
            4 => Self::Character,
            5 => Self::Meta,
            6 => Self::Invalid,
            _ => Self::Any,
        }
    }
}

impl PostTag {
    pub fn new(text: &str, tag_type: TagType) -> Self {
        Self {
            tag: text.to_string(),
            tag_type,
        }
    }

    /// Returns a reference to the textual content of the tag.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub const fn tag_type(&self) -> TagType {
        self.tag_type
    }
}

/// Splits a space separated tag string, as found in gelbooru post listings.
pub fn split_tag_string(tags: &str) -> Vec<PostTag> {
    tags.split_whitespace()
        .map(|t| PostTag::new(t, TagType::Any))
        .collect()
}
