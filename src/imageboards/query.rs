//! Query string encoding
//!
//! [`QueryParams`] keeps the absent-means-omitted rule and the `+` list delimiter in one place,
//! so each search kind only has to list its parameters in order.
use crate::imageboards::auth::AuthToken;
use crate::imageboards::error::QueryError;
use crate::imageboards::filter::FilterSpec;
use log::debug;
use std::borrow::Cow;

/// Ordered key/value pairs that will be appended to an endpoint prefix.
#[derive(Debug, Default, Clone)]
pub struct QueryParams {
    pairs: Vec<(&'static str, Cow<'static, str>)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Numeric parameter, skipped when `None`.
    pub fn number(&mut self, key: &'static str, value: Option<u64>) -> &mut Self {
        if let Some(n) = value {
            self.pairs.push((key, Cow::Owned(n.to_string())));
        }
        self
    }

    /// Text parameter, skipped when `None` or empty. The value is percent-encoded.
    pub fn text(&mut self, key: &'static str, value: Option<&str>) -> &mut Self {
        if let Some(s) = value.filter(|s| !s.is_empty()) {
            self.pairs
                .push((key, Cow::Owned(urlencoding::encode(s).into_owned())));
        }
        self
    }

    /// List parameter joined with `+`, skipped when it has no non-empty element.
    pub fn list(&mut self, key: &'static str, values: &[String]) -> &mut Self {
        let joined = values
            .iter()
            .filter(|v| !v.is_empty())
            .map(|v| urlencoding::encode(v))
            .collect::<Vec<_>>()
            .join("+");

        if !joined.is_empty() {
            self.pairs.push((key, Cow::Owned(joined)));
        }
        self
    }

    /// Parameter copied verbatim, without any encoding.
    pub fn verbatim(&mut self, key: &'static str, value: &str) -> &mut Self {
        self.pairs.push((key, Cow::Owned(value.to_string())));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Appends every pair to `prefix`, picking `?` or `&` for the first one depending on
    /// whether the prefix already carries a query.
    pub fn append_to(&self, prefix: &str) -> String {
        let mut url = String::with_capacity(prefix.len() + self.pairs.len() * 16);
        url.push_str(prefix);

        for (key, value) in &self.pairs {
            if !(url.ends_with('?') || url.ends_with('&')) {
                url.push(if url.contains('?') { '&' } else { '?' });
            }
            url.push_str(key);
            url.push('=');
            url.push_str(value);
        }

        url
    }
}

/// Validates `filter` and encodes it, with the credentials of `auth` if any, onto `prefix`.
///
/// This is a pure function: the same inputs always produce the same URL.
///
/// # Errors
/// Returns [`QueryError::InvalidFilter`] when the filter breaks a server limit. No partial URL is
/// produced in that case.
pub fn build_query(
    prefix: &str,
    filter: &FilterSpec,
    auth: Option<&AuthToken>,
) -> Result<String, QueryError> {
    filter.validate()?;

    let mut params = QueryParams::new();

    if let Some(token) = auth {
        params
            .verbatim("api_key", token.api_key())
            .verbatim("user_id", token.user_id());
    }

    match filter {
        FilterSpec::Posts(f) => {
            params
                .number("pid", f.page)
                .number("limit", f.limit)
                .number("cid", f.change_id)
                .number("id", f.id)
                .list("tags", &f.tags);
        }
        FilterSpec::Tags(f) => {
            params
                .number("id", f.id)
                .number("limit", f.limit)
                .number("after_id", f.after_id)
                .text("name", f.name.as_deref())
                .list("names", &f.names)
                .text("name_pattern", f.name_pattern.as_deref())
                .text("orderby", f.order_by.as_deref());
        }
        FilterSpec::Users(f) => {
            params
                .number("limit", f.limit)
                .number("pid", f.page)
                .text("name", f.name.as_deref())
                .text("name_pattern", f.name_pattern.as_deref());
        }
        FilterSpec::Comments(f) => {
            params.number("post_id", Some(f.post_id));
        }
        FilterSpec::JsonPosts(f) => {
            params
                .number("page", f.page)
                .number("limit", f.limit)
                .list("tags", &f.tags);
        }
    }

    let url = params.append_to(prefix);
    debug!("Built {} query", filter.kind());
    Ok(url)
}

/// Copy of `url` safe for logs, with the `api_key` value masked.
pub fn redact(url: &str) -> Cow<'_, str> {
    let Some(start) = url.find("api_key=").map(|i| i + "api_key=".len()) else {
        return Cow::Borrowed(url);
    };
    let end = url[start..].find('&').map_or(url.len(), |i| start + i);

    Cow::Owned(format!("{}***{}", &url[..start], &url[end..]))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::imageboards::filter::{
        CommentFilter, JsonPostFilter, PostFilter, TagFilter, UserFilter,
    };

    const POSTS: &str = "https://gelbooru.com/index.php?page=dapi&q=index&s=post";
    const JSON_POSTS: &str = "https://e621.net/posts.json";

    #[test]
    fn absent_fields_emit_nothing() {
        let filters = [
            FilterSpec::Posts(PostFilter::default()),
            FilterSpec::Tags(TagFilter::default()),
            FilterSpec::Users(UserFilter::default()),
            FilterSpec::JsonPosts(JsonPostFilter::default()),
        ];

        for filter in &filters {
            assert_eq!(build_query(POSTS, filter, None).unwrap(), POSTS);
        }

        let empty_strings = FilterSpec::Tags(TagFilter {
            name: Some(String::new()),
            name_pattern: Some(String::new()),
            order_by: Some(String::new()),
            names: vec![String::new()],
            ..Default::default()
        });
        assert_eq!(build_query(POSTS, &empty_strings, None).unwrap(), POSTS);
    }

    #[test]
    fn auth_follows_prefix_verbatim() {
        let token = AuthToken::new("abc123", "42").unwrap();
        let url = build_query(POSTS, &FilterSpec::Posts(PostFilter::default()), Some(&token))
            .unwrap();

        assert_eq!(url, format!("{}&api_key=abc123&user_id=42", POSTS));
    }

    #[test]
    fn tags_are_plus_joined_in_order() {
        let filter = FilterSpec::Posts(PostFilter {
            tags: vec!["a".into(), "b".into(), "c".into()],
            ..Default::default()
        });

        assert_eq!(
            build_query(POSTS, &filter, None).unwrap(),
            format!("{}&tags=a+b+c", POSTS)
        );

        let single = FilterSpec::Posts(PostFilter {
            tags: vec!["solo".into()],
            ..Default::default()
        });
        assert!(build_query(POSTS, &single, None)
            .unwrap()
            .ends_with("&tags=solo"));
    }

    #[test]
    fn post_params_follow_fixed_order() {
        let filter = FilterSpec::Posts(PostFilter {
            id: Some(9),
            limit: Some(50),
            page: Some(2),
            change_id: Some(77),
            tags: vec!["blue_sky".into(), "rating:general".into()],
        });

        assert_eq!(
            build_query(POSTS, &filter, None).unwrap(),
            format!(
                "{}&pid=2&limit=50&cid=77&id=9&tags=blue_sky+rating%3Ageneral",
                POSTS
            )
        );
    }

    #[test]
    fn explicit_zero_is_sent() {
        let filter = FilterSpec::Posts(PostFilter {
            page: Some(0),
            ..Default::default()
        });

        assert_eq!(
            build_query(POSTS, &filter, None).unwrap(),
            format!("{}&pid=0", POSTS)
        );
    }

    #[test]
    fn tag_params() {
        let filter = FilterSpec::Tags(TagFilter {
            limit: Some(1000),
            after_id: Some(10),
            names: vec!["cat".into(), "dog".into()],
            name_pattern: Some("%fox%".into()),
            order_by: Some("count".into()),
            ..Default::default()
        });

        assert_eq!(
            build_query("https://x/index.php?s=tag", &filter, None).unwrap(),
            "https://x/index.php?s=tag&limit=1000&after_id=10&names=cat+dog&name_pattern=%25fox%25&orderby=count"
        );
    }

    #[test]
    fn comment_query() {
        let filter = FilterSpec::Comments(CommentFilter { post_id: 7507608 });
        assert_eq!(
            build_query("https://x/index.php?s=comment", &filter, None).unwrap(),
            "https://x/index.php?s=comment&post_id=7507608"
        );
    }

    #[test]
    fn question_mark_added_when_prefix_has_no_query() {
        let filter = FilterSpec::JsonPosts(JsonPostFilter {
            page: Some(2),
            limit: Some(320),
            tags: vec!["umbreon".into(), "espeon".into()],
        });

        assert_eq!(
            build_query(JSON_POSTS, &filter, None).unwrap(),
            "https://e621.net/posts.json?page=2&limit=320&tags=umbreon+espeon"
        );
        assert_eq!(
            build_query("https://e621.net/posts.json?", &filter, None).unwrap(),
            "https://e621.net/posts.json?page=2&limit=320&tags=umbreon+espeon"
        );
    }

    #[test]
    fn invalid_filter_builds_nothing() {
        let filter = FilterSpec::Posts(PostFilter {
            limit: Some(101),
            tags: vec!["a".into()],
            ..Default::default()
        });

        assert!(matches!(
            build_query(POSTS, &filter, None),
            Err(QueryError::InvalidFilter { field: "limit", .. })
        ));
    }

    #[test]
    fn redact_masks_key_only() {
        assert_eq!(
            redact("https://x/?s=post&api_key=secret&user_id=1&pid=2"),
            "https://x/?s=post&api_key=***&user_id=1&pid=2"
        );
        assert_eq!(redact("https://x/?api_key=secret"), "https://x/?api_key=***");
        assert_eq!(redact("https://x/?s=post"), "https://x/?s=post");
    }
}
