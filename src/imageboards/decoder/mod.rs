//! Response decoding
//!
//! Each wire format gets its own [`Decoder`]. The caller picks one through [`decoder_for`]
//! using the [`BackendKind`] of the search, and the decoder only has to map the format's own
//! models into a [`ResultSet`].
//!
//! Decoding is all-or-nothing: a body that fails to parse, or that answers a different kind of
//! search than the one requested, is rejected as a whole.
use crate::imageboards::entry::{Entry, ResultSet};
use crate::imageboards::error::{DecodeCause, DecodeError};
use crate::imageboards::{BackendKind, WireFormat};
use log::debug;
use quick_xml::de::from_str;
use std::time::Instant;

pub mod e621;
pub mod gelbooru;

use self::e621::E621TopLevel;
use self::gelbooru::{
    page_info, root_element, GelbooruComments, GelbooruPosts, GelbooruTags, GelbooruUsers,
};

/// Turns a raw response body into a [`ResultSet`].
pub trait Decoder: Send + Sync {
    /// Decodes `body` as the answer to a search of the given `kind`.
    ///
    /// # Errors
    /// Returns a [`DecodeError`] when the body is malformed, doesn't match the expected
    /// schema, or `kind` is not served in this decoder's wire format.
    fn decode(&self, kind: BackendKind, body: &[u8]) -> Result<ResultSet, DecodeError>;
}

/// Decoder for gelbooru-style XML.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlDecoder;

/// Decoder for e621-style JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

/// Returns the decoder matching the wire format of `kind`.
pub fn decoder_for(kind: BackendKind) -> &'static dyn Decoder {
    match kind.wire_format() {
        WireFormat::Xml => &XmlDecoder,
        WireFormat::Json => &JsonDecoder,
    }
}

impl Decoder for XmlDecoder {
    fn decode(&self, kind: BackendKind, body: &[u8]) -> Result<ResultSet, DecodeError> {
        let Some(expected) = kind.xml_root() else {
            return Err(DecodeError::new(body, DecodeCause::UnsupportedKind { kind }));
        };

        let start = Instant::now();
        let text = std::str::from_utf8(body).map_err(|e| DecodeError::new(body, e))?;

        let found = root_element(text).map_err(|e| DecodeError::new(body, e))?;
        if found != expected {
            return Err(DecodeError::new(
                body,
                DecodeCause::UnexpectedRoot { expected, found },
            ));
        }

        let set = match kind {
            BackendKind::PostSearch => {
                let root: GelbooruPosts = from_str(text).map_err(|e| DecodeError::new(body, e))?;
                ResultSet::new(
                    root.posts
                        .into_iter()
                        .map(|p| Entry::Post(p.into()))
                        .collect(),
                    page_info(root.limit, root.offset, root.count),
                )
            }
            BackendKind::TagSearch => {
                let root: GelbooruTags = from_str(text).map_err(|e| DecodeError::new(body, e))?;
                ResultSet::new(
                    root.tags.into_iter().map(|t| Entry::Tag(t.into())).collect(),
                    page_info(root.limit, root.offset, root.count),
                )
            }
            BackendKind::UserSearch => {
                let root: GelbooruUsers = from_str(text).map_err(|e| DecodeError::new(body, e))?;
                ResultSet::new(
                    root.users
                        .into_iter()
                        .map(|u| Entry::User(u.into()))
                        .collect(),
                    page_info(root.limit, root.offset, root.count),
                )
            }
            BackendKind::CommentSearch => {
                let root: GelbooruComments =
                    from_str(text).map_err(|e| DecodeError::new(body, e))?;
                ResultSet::new(
                    root.comments
                        .into_iter()
                        .map(|c| Entry::Comment(c.into()))
                        .collect(),
                    None,
                )
            }
            BackendKind::JsonPostSearch => {
                return Err(DecodeError::new(body, DecodeCause::UnsupportedKind { kind }))
            }
        };

        debug!("List size: {}", set.len());
        debug!("XML mapping took {:?}", start.elapsed());
        Ok(set)
    }
}

impl Decoder for JsonDecoder {
    fn decode(&self, kind: BackendKind, body: &[u8]) -> Result<ResultSet, DecodeError> {
        if kind != BackendKind::JsonPostSearch {
            return Err(DecodeError::new(body, DecodeCause::UnsupportedKind { kind }));
        }

        let start = Instant::now();
        let items: E621TopLevel =
            serde_json::from_slice(body).map_err(|e| DecodeError::new(body, e))?;

        let entries: Vec<Entry> = items
            .posts
            .into_iter()
            .map(|p| Entry::Post(p.into()))
            .collect();

        debug!("List size: {}", entries.len());
        debug!("JSON mapping took {:?}", start.elapsed());
        Ok(ResultSet::new(entries, None))
    }
}
