//! Main representation of an imageboard post
//!
//! # Post
//! A [`Post` struct](Post) is a generic representation of an imageboard post. Gelbooru's flat
//! XML listing and e621's nested JSON both decode into it, so callers never need to care which
//! wire format a server speaks.
//!
//! Fields that only one format carries are `Option`s (or empty collections) when decoded from
//! the other one.
use serde::{Deserialize, Serialize};

use self::{rating::Rating, tags::PostTag, tags::TagType};

pub mod rating;
pub mod tags;

/// Snapshot of a post as the server reported it at fetch time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Post {
    /// ID number of the post given by the imageboard
    pub id: u64,
    pub created_at: String,
    /// Only reported by e621.
    pub updated_at: Option<String>,
    /// Rating of the post. Can be:
    ///
    /// * `Rating::Safe` for SFW posts
    /// * `Rating::Questionable` for a not necessarily SFW post
    /// * `Rating::Explicit` for NSFW posts
    /// * `Rating::Unknown` in case none of the above are correctly parsed
    pub rating: Rating,
    pub score: Score,
    pub file: MediaFile,
    pub preview: Preview,
    pub sample: Sample,
    pub tags: Vec<PostTag>,
    pub locked_tags: Vec<String>,
    pub sources: Vec<String>,
    /// Gelbooru `change` or e621 `change_seq`.
    pub change: Option<u64>,
    /// Raw moderation status, as reported by gelbooru.
    pub status: Option<String>,
    pub flags: Flags,
    pub relationships: Relationships,
    /// Uploader name, as reported by gelbooru.
    pub owner: Option<String>,
    pub uploader_id: Option<u64>,
    pub approver_id: Option<u64>,
    pub description: Option<String>,
    pub has_notes: bool,
    pub has_comments: bool,
    pub comment_count: Option<u64>,
    pub fav_count: Option<u64>,
    pub is_favorited: bool,
    pub pools: Vec<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Score {
    pub up: Option<i64>,
    pub down: Option<i64>,
    pub total: i64,
}

/// The original media file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MediaFile {
    pub width: u64,
    pub height: u64,
    pub ext: Option<String>,
    /// Size in bytes. Only reported by e621.
    pub size: Option<u64>,
    pub md5: String,
    /// Missing when the server hides the file from the current user.
    pub url: Option<String>,
    /// Stored file name (gelbooru `image`).
    pub name: Option<String>,
    /// Storage directory (gelbooru `directory`).
    pub directory: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Preview {
    pub width: u64,
    pub height: u64,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Sample {
    pub has: bool,
    pub width: Option<u64>,
    pub height: Option<u64>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Flags {
    pub pending: bool,
    pub flagged: bool,
    pub note_locked: bool,
    pub status_locked: bool,
    pub rating_locked: bool,
    pub deleted: bool,
}

impl Flags {
    /// Derives flags from gelbooru's single `status` string.
    pub fn from_status(status: &str) -> Self {
        Self {
            pending: status == "pending",
            flagged: status == "flagged",
            deleted: status == "deleted",
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Relationships {
    pub parent_id: Option<u64>,
    pub has_children: bool,
    /// Only reported by e621.
    pub has_active_children: bool,
    /// Only reported by e621.
    pub children: Vec<u64>,
}

impl Post {
    /// Tags of the given category.
    pub fn tags_of(&self, tag_type: TagType) -> impl Iterator<Item = &str> {
        self.tags
            .iter()
            .filter(move |t| t.tag_type() == tag_type)
            .map(PostTag::tag)
    }

    #[inline]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.tag() == tag)
    }
}

/// Guess the file extension from the last `.` of a file name or URL.
pub(crate) fn extension_of(name: &str) -> Option<String> {
    let (_, ext) = name.rsplit_once('.')?;
    if ext.is_empty() || ext.contains('/') {
        return None;
    }
    Some(ext.to_string())
}
