//! Wire models for gelbooru's `index.php?page=dapi` XML API.
//!
//! Attributes are matched through quick-xml's `@` prefix, child elements by their plain name.
use crate::imageboards::entry::{Comment, PageInfo, Tag, User};
use crate::imageboards::error::DecodeCause;
use crate::imageboards::post::tags::{split_tag_string, TagType};
use crate::imageboards::post::{
    extension_of, rating::Rating, Flags, MediaFile, Post, Preview, Relationships, Sample, Score,
};
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use serde::de::{self, Deserializer};
use serde::Deserialize;
use std::fmt::Display;
use std::str::FromStr;

#[derive(Deserialize, Debug)]
pub struct GelbooruPosts {
    #[serde(rename = "@limit")]
    pub limit: Option<u64>,
    #[serde(rename = "@offset")]
    pub offset: Option<u64>,
    #[serde(rename = "@count")]
    pub count: Option<u64>,
    #[serde(rename = "post", default)]
    pub posts: Vec<GelbooruPost>,
}

#[derive(Deserialize, Debug)]
pub struct GelbooruTags {
    #[serde(rename = "@limit")]
    pub limit: Option<u64>,
    #[serde(rename = "@offset")]
    pub offset: Option<u64>,
    #[serde(rename = "@count")]
    pub count: Option<u64>,
    #[serde(rename = "tag", default)]
    pub tags: Vec<GelbooruTag>,
}

#[derive(Deserialize, Debug)]
pub struct GelbooruUsers {
    #[serde(rename = "@limit")]
    pub limit: Option<u64>,
    #[serde(rename = "@offset")]
    pub offset: Option<u64>,
    #[serde(rename = "@count")]
    pub count: Option<u64>,
    #[serde(rename = "user", default)]
    pub users: Vec<GelbooruUser>,
}

#[derive(Deserialize, Debug)]
pub struct GelbooruComments {
    #[serde(rename = "comment", default)]
    pub comments: Vec<GelbooruComment>,
}

/// Gelbooru answers with one child element per field, while safebooru and rule34 put every
/// field in an attribute of an empty `<post/>`. Both shapes are accepted, and empty values are
/// read as absent.
#[derive(Deserialize, Debug)]
pub struct GelbooruPost {
    #[serde(alias = "@id")]
    pub id: u64,
    #[serde(alias = "@created_at", default)]
    pub created_at: String,
    #[serde(alias = "@score", default, deserialize_with = "empty_as_none")]
    pub score: Option<i64>,
    #[serde(alias = "@width", default, deserialize_with = "empty_as_none")]
    pub width: Option<u64>,
    #[serde(alias = "@height", default, deserialize_with = "empty_as_none")]
    pub height: Option<u64>,
    #[serde(alias = "@md5", default)]
    pub md5: String,
    #[serde(alias = "@directory")]
    pub directory: Option<String>,
    #[serde(alias = "@image")]
    pub image: Option<String>,
    #[serde(alias = "@rating", default)]
    pub rating: String,
    #[serde(alias = "@source")]
    pub source: Option<String>,
    #[serde(alias = "@change", default, deserialize_with = "empty_as_none")]
    pub change: Option<u64>,
    #[serde(alias = "@owner")]
    pub owner: Option<String>,
    #[serde(alias = "@creator_id", default, deserialize_with = "empty_as_none")]
    pub creator_id: Option<u64>,
    #[serde(alias = "@parent_id", default, deserialize_with = "empty_as_none")]
    pub parent_id: Option<u64>,
    #[serde(alias = "@sample", default, deserialize_with = "empty_as_none")]
    pub sample: Option<u64>,
    #[serde(alias = "@sample_url")]
    pub sample_url: Option<String>,
    #[serde(alias = "@sample_width", default, deserialize_with = "empty_as_none")]
    pub sample_width: Option<u64>,
    #[serde(alias = "@sample_height", default, deserialize_with = "empty_as_none")]
    pub sample_height: Option<u64>,
    #[serde(alias = "@preview_height", default, deserialize_with = "empty_as_none")]
    pub preview_height: Option<u64>,
    #[serde(alias = "@preview_width", default, deserialize_with = "empty_as_none")]
    pub preview_width: Option<u64>,
    #[serde(alias = "@tags", default)]
    pub tags: String,
    #[serde(alias = "@has_notes", default, deserialize_with = "flag")]
    pub has_notes: bool,
    #[serde(alias = "@has_comments", default, deserialize_with = "flag")]
    pub has_comments: bool,
    #[serde(alias = "@file_url")]
    pub file_url: Option<String>,
    #[serde(alias = "@preview_url")]
    pub preview_url: Option<String>,
    #[serde(alias = "@status")]
    pub status: Option<String>,
    #[serde(alias = "@has_children", default, deserialize_with = "flag")]
    pub has_children: bool,
}

/// Reads a number that may be sent as empty text (`<change/>`, `parent_id=""`).
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(text) if !text.trim().is_empty() => {
            text.trim().parse().map(Some).map_err(de::Error::custom)
        }
        _ => Ok(None),
    }
}

fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)?.as_deref().map(str::trim) {
        Some("true") | Some("1") => Ok(true),
        Some("false") | Some("0") | Some("") | None => Ok(false),
        Some(other) => Err(de::Error::custom(format!(
            "invalid boolean `{}`",
            other
        ))),
    }
}

/// Gelbooru documents tag fields as child elements but some deployments still answer with
/// attributes, so both are accepted.
#[derive(Deserialize, Debug)]
pub struct GelbooruTag {
    #[serde(alias = "@id")]
    pub id: u64,
    #[serde(alias = "@name")]
    pub name: String,
    #[serde(alias = "@count", default)]
    pub count: u64,
    #[serde(rename = "type", alias = "@type", default)]
    pub kind: u64,
    #[serde(alias = "@ambiguous", default)]
    pub ambiguous: bool,
}

#[derive(Deserialize, Debug)]
pub struct GelbooruUser {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub active: bool,
}

#[derive(Deserialize, Debug)]
pub struct GelbooruComment {
    #[serde(rename = "@id")]
    pub id: u64,
    #[serde(rename = "@post_id")]
    pub post_id: u64,
    #[serde(rename = "@created_at", default)]
    pub created_at: String,
    #[serde(rename = "@creator", default)]
    pub creator: String,
    #[serde(rename = "@creator_id", default)]
    pub creator_id: u64,
    #[serde(rename = "@body")]
    pub body: Option<String>,
}

/// Builds [`PageInfo`] from the root attributes. A root without `count` carries no metadata.
pub(crate) fn page_info(
    limit: Option<u64>,
    offset: Option<u64>,
    count: Option<u64>,
) -> Option<PageInfo> {
    count.map(|total_count| PageInfo {
        limit: limit.unwrap_or_default(),
        offset: offset.unwrap_or_default(),
        total_count,
    })
}

/// Local name of the first element of the document.
pub(crate) fn root_element(xml: &str) -> Result<String, DecodeCause> {
    let mut reader = Reader::from_str(xml);

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => {
                return Ok(String::from_utf8_lossy(e.local_name().as_ref()).into_owned())
            }
            Event::Eof => return Err(DecodeCause::MissingRoot),
            _ => {}
        }
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.is_empty())
}

impl From<GelbooruPost> for Post {
    fn from(p: GelbooruPost) -> Self {
        let image = non_empty(p.image);
        let file_url = non_empty(p.file_url);
        let ext = image
            .as_deref()
            .or(file_url.as_deref())
            .and_then(extension_of);
        let sample_url = non_empty(p.sample_url);
        let sample_width = p.sample_width.filter(|w| *w != 0);
        let has_sample = p.sample.map_or_else(
            || sample_url.is_some() && sample_width.is_some(),
            |s| s != 0,
        );
        let status = non_empty(p.status);
        let flags = status.as_deref().map(Flags::from_status).unwrap_or_default();

        Self {
            id: p.id,
            created_at: p.created_at,
            updated_at: None,
            rating: Rating::from_rating_str(&p.rating),
            score: Score {
                up: None,
                down: None,
                total: p.score.unwrap_or_default(),
            },
            file: MediaFile {
                width: p.width.unwrap_or_default(),
                height: p.height.unwrap_or_default(),
                ext,
                size: None,
                md5: p.md5,
                url: file_url,
                name: image,
                directory: non_empty(p.directory),
            },
            preview: Preview {
                width: p.preview_width.unwrap_or_default(),
                height: p.preview_height.unwrap_or_default(),
                url: non_empty(p.preview_url),
            },
            sample: Sample {
                has: has_sample,
                width: sample_width,
                height: p.sample_height.filter(|h| *h != 0),
                url: sample_url,
            },
            tags: split_tag_string(&p.tags),
            locked_tags: Vec::new(),
            sources: non_empty(p.source).into_iter().collect(),
            change: p.change,
            status,
            flags,
            relationships: Relationships {
                parent_id: p.parent_id.filter(|id| *id != 0),
                has_children: p.has_children,
                ..Default::default()
            },
            owner: non_empty(p.owner),
            uploader_id: p.creator_id,
            approver_id: None,
            description: None,
            has_notes: p.has_notes,
            has_comments: p.has_comments,
            comment_count: None,
            fav_count: None,
            is_favorited: false,
            pools: Vec::new(),
        }
    }
}

impl From<GelbooruTag> for Tag {
    fn from(t: GelbooruTag) -> Self {
        Self {
            id: t.id,
            name: t.name,
            count: t.count,
            category: TagType::from_gelbooru(t.kind),
            ambiguous: t.ambiguous,
        }
    }
}

impl From<GelbooruUser> for User {
    fn from(u: GelbooruUser) -> Self {
        Self {
            id: u.id,
            name: u.username,
            active: u.active,
        }
    }
}

impl From<GelbooruComment> for Comment {
    fn from(c: GelbooruComment) -> Self {
        Self {
            id: c.id,
            post_id: c.post_id,
            creator: c.creator,
            creator_id: c.creator_id,
            created_at: c.created_at,
            body: non_empty(c.body),
        }
    }
}
