//! Typed search descriptions, one per [`BackendKind`].
//!
//! Every field is optional unless stated otherwise. `None`, empty strings and empty lists are
//! treated as absent and never reach the query string. An explicit `Some(0)` is a real value and
//! is sent.
use crate::imageboards::error::QueryError;
use crate::imageboards::BackendKind;
use std::fmt::Display;
use std::str::FromStr;

/// Gelbooru post search (`s=post`). Pages (`pid`) start at 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub id: Option<u64>,
    /// At most 100.
    pub limit: Option<u64>,
    pub page: Option<u64>,
    pub change_id: Option<u64>,
    pub tags: Vec<String>,
}

/// Gelbooru tag search (`s=tag`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFilter {
    pub id: Option<u64>,
    /// At most 1000.
    pub limit: Option<u64>,
    pub after_id: Option<u64>,
    pub name: Option<String>,
    pub names: Vec<String>,
    pub name_pattern: Option<String>,
    /// One of `date`, `count` or `name`. See [`TagOrder`].
    pub order_by: Option<String>,
}

/// Gelbooru user search (`s=user`). Pages (`pid`) start at 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// At most 100.
    pub limit: Option<u64>,
    pub page: Option<u64>,
    pub name: Option<String>,
    pub name_pattern: Option<String>,
}

/// Gelbooru comment search (`s=comment`). The post id is mandatory and must be non-zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentFilter {
    pub post_id: u64,
}

/// e621 post search (`posts.json`). Pages start at 1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonPostFilter {
    pub page: Option<u64>,
    /// At most 320.
    pub limit: Option<u64>,
    pub tags: Vec<String>,
}

/// Sort orders accepted by tag searches.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TagOrder {
    Date,
    Count,
    Name,
}

impl TagOrder {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Count => "count",
            Self::Name => "name",
        }
    }
}

impl Display for TagOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TagOrder {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date" => Ok(Self::Date),
            "count" => Ok(Self::Count),
            "name" => Ok(Self::Name),
            other => Err(QueryError::invalid(
                "order_by",
                format!("`{}` is not one of date, count, name", other),
            )),
        }
    }
}

/// A search description for any supported [`BackendKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterSpec {
    Posts(PostFilter),
    Tags(TagFilter),
    Users(UserFilter),
    Comments(CommentFilter),
    JsonPosts(JsonPostFilter),
}

impl FilterSpec {
    #[must_use]
    pub const fn kind(&self) -> BackendKind {
        match self {
            Self::Posts(_) => BackendKind::PostSearch,
            Self::Tags(_) => BackendKind::TagSearch,
            Self::Users(_) => BackendKind::UserSearch,
            Self::Comments(_) => BackendKind::CommentSearch,
            Self::JsonPosts(_) => BackendKind::JsonPostSearch,
        }
    }

    /// Whether this search has a page field the [`Paginator`](crate::Paginator) can advance.
    #[must_use]
    pub const fn is_pageable(&self) -> bool {
        matches!(self, Self::Posts(_) | Self::Users(_) | Self::JsonPosts(_))
    }

    /// Current page field, `None` when unset or when the search has no pages.
    #[must_use]
    pub const fn page(&self) -> Option<u64> {
        match self {
            Self::Posts(f) => f.page,
            Self::Users(f) => f.page,
            Self::JsonPosts(f) => f.page,
            Self::Tags(_) | Self::Comments(_) => None,
        }
    }

    /// Sets the page field. Returns `false` and leaves the filter untouched if the search
    /// has no pages.
    pub fn set_page(&mut self, page: u64) -> bool {
        match self {
            Self::Posts(f) => f.page = Some(page),
            Self::Users(f) => f.page = Some(page),
            Self::JsonPosts(f) => f.page = Some(page),
            Self::Tags(_) | Self::Comments(_) => return false,
        }
        true
    }

    /// Checks the filter against the server's limits.
    ///
    /// # Errors
    /// Returns [`QueryError::InvalidFilter`] naming the first offending field.
    pub fn validate(&self) -> Result<(), QueryError> {
        let kind = self.kind();
        match self {
            Self::Posts(f) => check_limit(kind, f.limit),
            Self::Users(f) => check_limit(kind, f.limit),
            Self::JsonPosts(f) => check_limit(kind, f.limit),
            Self::Tags(f) => {
                check_limit(kind, f.limit)?;
                match f.order_by.as_deref() {
                    None | Some("") => Ok(()),
                    Some(order) => order.parse::<TagOrder>().map(|_| ()),
                }
            }
            Self::Comments(f) => {
                if f.post_id == 0 {
                    return Err(QueryError::invalid(
                        "post_id",
                        "must be greater than 0, a comment search needs a target post",
                    ));
                }
                Ok(())
            }
        }
    }
}

fn check_limit(kind: BackendKind, limit: Option<u64>) -> Result<(), QueryError> {
    match (limit, kind.max_limit()) {
        (Some(limit), Some(max)) if limit > max => Err(QueryError::invalid(
            "limit",
            format!("{} allows at most {} results per page, got {}", kind, max, limit),
        )),
        _ => Ok(()),
    }
}

impl From<PostFilter> for FilterSpec {
    fn from(f: PostFilter) -> Self {
        Self::Posts(f)
    }
}

impl From<TagFilter> for FilterSpec {
    fn from(f: TagFilter) -> Self {
        Self::Tags(f)
    }
}

impl From<UserFilter> for FilterSpec {
    fn from(f: UserFilter) -> Self {
        Self::Users(f)
    }
}

impl From<CommentFilter> for FilterSpec {
    fn from(f: CommentFilter) -> Self {
        Self::Comments(f)
    }
}

impl From<JsonPostFilter> for FilterSpec {
    fn from(f: JsonPostFilter) -> Self {
        Self::JsonPosts(f)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn post_limit_over_100_is_rejected() {
        for limit in [101, 500, 1000, u64::MAX] {
            let filter = FilterSpec::Posts(PostFilter {
                limit: Some(limit),
                ..Default::default()
            });

            match filter.validate() {
                Err(QueryError::InvalidFilter { field, .. }) => assert_eq!(field, "limit"),
                other => panic!("expected InvalidFilter, got {:?}", other),
            }
        }

        let ok = FilterSpec::Posts(PostFilter {
            limit: Some(100),
            ..Default::default()
        });
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn tag_limit_uses_effective_cap() {
        let at_cap = FilterSpec::Tags(TagFilter {
            limit: Some(1000),
            ..Default::default()
        });
        assert!(at_cap.validate().is_ok());

        let over = FilterSpec::Tags(TagFilter {
            limit: Some(1001),
            ..Default::default()
        });
        let err = over.validate().unwrap_err();
        assert!(err.to_string().contains("1000"));
    }

    #[test]
    fn user_limit_over_100_is_rejected() {
        let filter = FilterSpec::Users(UserFilter {
            limit: Some(101),
            ..Default::default()
        });
        assert!(matches!(
            filter.validate(),
            Err(QueryError::InvalidFilter { field: "limit", .. })
        ));
    }

    #[test]
    fn tag_order_must_be_known() {
        for order in ["", "date", "count", "name"] {
            let filter = FilterSpec::Tags(TagFilter {
                order_by: Some(order.to_string()),
                ..Default::default()
            });
            assert!(filter.validate().is_ok(), "{} should be accepted", order);
        }

        for order in ["Date", "random", "id", " name"] {
            let filter = FilterSpec::Tags(TagFilter {
                order_by: Some(order.to_string()),
                ..Default::default()
            });
            assert!(matches!(
                filter.validate(),
                Err(QueryError::InvalidFilter {
                    field: "order_by",
                    ..
                })
            ));
        }
    }

    #[test]
    fn comment_search_needs_a_post() {
        let filter = FilterSpec::Comments(CommentFilter { post_id: 0 });
        assert!(matches!(
            filter.validate(),
            Err(QueryError::InvalidFilter {
                field: "post_id",
                ..
            })
        ));

        assert!(FilterSpec::Comments(CommentFilter { post_id: 7 })
            .validate()
            .is_ok());
    }

    #[test]
    fn only_paged_searches_take_a_page() {
        let mut tags = FilterSpec::Tags(TagFilter::default());
        assert!(!tags.set_page(3));
        assert_eq!(tags.page(), None);

        let mut posts = FilterSpec::Posts(PostFilter::default());
        assert!(posts.set_page(3));
        assert_eq!(posts.page(), Some(3));
    }
}
