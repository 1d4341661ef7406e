//! Wire models for e621's `posts.json` API.
use crate::imageboards::post::tags::{PostTag, TagType};
use crate::imageboards::post::{
    rating::Rating, Flags, MediaFile, Post, Preview, Relationships, Sample, Score,
};
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct E621TopLevel {
    pub posts: Vec<E621Post>,
}

#[derive(Deserialize, Debug)]
pub struct E621Post {
    pub id: u64,
    #[serde(default)]
    pub created_at: String,
    pub updated_at: Option<String>,
    #[serde(default)]
    pub file: E621File,
    #[serde(default)]
    pub preview: E621Preview,
    #[serde(default)]
    pub sample: E621Sample,
    #[serde(default)]
    pub score: E621Score,
    #[serde(default)]
    pub tags: Tags,
    pub locked_tags: Option<Vec<String>>,
    pub change_seq: Option<u64>,
    #[serde(default)]
    pub flags: E621Flags,
    #[serde(default)]
    pub rating: String,
    pub fav_count: Option<u64>,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub pools: Vec<u64>,
    #[serde(default)]
    pub relationships: E621Relationships,
    pub approver_id: Option<u64>,
    pub uploader_id: Option<u64>,
    pub description: Option<String>,
    pub comment_count: Option<u64>,
    #[serde(default)]
    pub is_favorited: bool,
}

#[derive(Deserialize, Debug, Default)]
pub struct E621File {
    #[serde(default)]
    pub width: u64,
    #[serde(default)]
    pub height: u64,
    pub ext: Option<String>,
    pub size: Option<u64>,
    pub md5: Option<String>,
    pub url: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct E621Preview {
    #[serde(default)]
    pub width: u64,
    #[serde(default)]
    pub height: u64,
    pub url: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct E621Sample {
    #[serde(default)]
    pub has: bool,
    pub width: Option<u64>,
    pub height: Option<u64>,
    pub url: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct E621Score {
    #[serde(default)]
    pub up: i64,
    #[serde(default)]
    pub down: i64,
    #[serde(default)]
    pub total: i64,
}

#[derive(Deserialize, Debug, Default)]
pub struct Tags {
    #[serde(default)]
    pub general: Vec<String>,
    #[serde(default)]
    pub species: Vec<String>,
    #[serde(default)]
    pub character: Vec<String>,
    #[serde(default)]
    pub copyright: Vec<String>,
    #[serde(default)]
    pub artist: Vec<String>,
    #[serde(default)]
    pub invalid: Vec<String>,
    #[serde(default)]
    pub lore: Vec<String>,
    #[serde(default)]
    pub meta: Vec<String>,
}

impl Tags {
    pub fn map_tags(&self) -> Vec<PostTag> {
        let mut tag_list = Vec::with_capacity(64);
        tag_list.extend(self.general.iter().map(|t| PostTag::new(t, TagType::General)));
        tag_list.extend(self.species.iter().map(|t| PostTag::new(t, TagType::Species)));
        tag_list.extend(
            self.character
                .iter()
                .map(|t| PostTag::new(t, TagType::Character)),
        );
        tag_list.extend(
            self.copyright
                .iter()
                .map(|t| PostTag::new(t, TagType::Copyright)),
        );
        tag_list.extend(self.artist.iter().map(|t| PostTag::new(t, TagType::Author)));
        tag_list.extend(self.invalid.iter().map(|t| PostTag::new(t, TagType::Invalid)));
        tag_list.extend(self.lore.iter().map(|t| PostTag::new(t, TagType::Lore)));
        tag_list.extend(self.meta.iter().map(|t| PostTag::new(t, TagType::Meta)));

        tag_list
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct E621Flags {
    #[serde(default)]
    pub pending: bool,
    #[serde(default)]
    pub flagged: bool,
    #[serde(default)]
    pub note_locked: bool,
    #[serde(default)]
    pub status_locked: bool,
    #[serde(default)]
    pub rating_locked: bool,
    #[serde(default)]
    pub deleted: bool,
}

#[derive(Deserialize, Debug, Default)]
pub struct E621Relationships {
    pub parent_id: Option<u64>,
    #[serde(default)]
    pub has_children: bool,
    #[serde(default)]
    pub has_active_children: bool,
    #[serde(default)]
    pub children: Vec<u64>,
}

impl From<E621Post> for Post {
    fn from(p: E621Post) -> Self {
        let tags = p.tags.map_tags();

        Self {
            id: p.id,
            created_at: p.created_at,
            updated_at: p.updated_at,
            rating: Rating::from_rating_str(&p.rating),
            score: Score {
                up: Some(p.score.up),
                down: Some(p.score.down),
                total: p.score.total,
            },
            file: MediaFile {
                width: p.file.width,
                height: p.file.height,
                ext: p.file.ext,
                size: p.file.size,
                md5: p.file.md5.unwrap_or_default(),
                url: p.file.url,
                name: None,
                directory: None,
            },
            preview: Preview {
                width: p.preview.width,
                height: p.preview.height,
                url: p.preview.url,
            },
            sample: Sample {
                has: p.sample.has,
                width: p.sample.width,
                height: p.sample.height,
                url: p.sample.url,
            },
            tags,
            locked_tags: p.locked_tags.unwrap_or_default(),
            sources: p.sources,
            change: p.change_seq,
            status: None,
            flags: Flags {
                pending: p.flags.pending,
                flagged: p.flags.flagged,
                note_locked: p.flags.note_locked,
                status_locked: p.flags.status_locked,
                rating_locked: p.flags.rating_locked,
                deleted: p.flags.deleted,
            },
            relationships: Relationships {
                parent_id: p.relationships.parent_id,
                has_children: p.relationships.has_children,
                has_active_children: p.relationships.has_active_children,
                children: p.relationships.children,
            },
            owner: None,
            uploader_id: p.uploader_id,
            approver_id: p.approver_id,
            description: p.description.filter(|d| !d.is_empty()),
            has_notes: false,
            has_comments: p.comment_count.map_or(false, |c| c > 0),
            comment_count: p.comment_count,
            fav_count: p.fav_count,
            is_favorited: p.is_favorited,
            pools: p.pools,
        }
    }
}
