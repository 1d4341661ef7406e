//! Multi-page walking
//!
//! A [`Paginator`] repeats a search, advancing the filter's page field after every successful
//! fetch, until the server runs out of entries or a request fails. Pages already handed out stay
//! with the caller when a later one fails.
use crate::imageboards::client::BooruClient;
use crate::imageboards::entry::ResultSet;
use crate::imageboards::error::QueryError;
use crate::imageboards::filter::FilterSpec;
use crate::imageboards::transport::Transport;
use crate::imageboards::WireFormat;
use futures::stream::{self, Stream};
use log::debug;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PageState {
    /// Nothing fetched yet.
    Init,
    Fetching,
    /// The last page was not the final one.
    HasMore,
    Done,
    /// A request failed. The error was returned by the call that hit it.
    Failed,
}

impl PageState {
    #[inline]
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

pub struct Paginator<'a, T: Transport> {
    client: &'a BooruClient<T>,
    filter: FilterSpec,
    state: PageState,
    pages_fetched: usize,
}

impl<'a, T: Transport> Paginator<'a, T> {
    pub const fn new(client: &'a BooruClient<T>, filter: FilterSpec) -> Self {
        Self {
            client,
            filter,
            state: PageState::Init,
            pages_fetched: 0,
        }
    }

    #[inline]
    pub const fn state(&self) -> PageState {
        self.state
    }

    #[inline]
    pub const fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// The filter as it will be sent on the next fetch.
    #[inline]
    pub const fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    /// Fetches the next page.
    ///
    /// Returns `Ok(None)` once the walk is over, either because the last page was reached or
    /// because a previous call already returned an error.
    pub async fn next_page(&mut self) -> Result<Option<ResultSet>, QueryError> {
        if self.state.is_finished() {
            return Ok(None);
        }

        self.state = PageState::Fetching;

        match self.client.search(&self.filter).await {
            Ok(page) => {
                self.pages_fetched += 1;
                self.advance(&page);
                Ok(Some(page))
            }
            Err(error) => {
                debug!(
                    "Pagination stopped after {} pages: {}",
                    self.pages_fetched, error
                );
                self.state = PageState::Failed;
                Err(error)
            }
        }
    }

    fn advance(&mut self, page: &ResultSet) {
        if page.is_empty() || !self.filter.is_pageable() {
            self.state = PageState::Done;
            return;
        }

        let next = match page.page_info() {
            Some(info) => {
                if info.offset + page.len() as u64 >= info.total_count {
                    debug!("Reached the end of {} entries", info.total_count);
                    self.state = PageState::Done;
                    return;
                }
                // Never go back to a page already fetched, whatever offset the server reports.
                if info.limit > 0 {
                    (info.offset / info.limit + 1).max(self.following_page())
                } else {
                    self.following_page()
                }
            }
            None => self.following_page(),
        };

        self.filter.set_page(next);
        self.state = PageState::HasMore;
        debug!("Next page: {}", next);
    }

    /// Page after the current one when the server gave no metadata to compute it from.
    ///
    /// XML pages start at 0, JSON pages at 1.
    fn following_page(&self) -> u64 {
        match self.filter.kind().wire_format() {
            WireFormat::Xml => self.filter.page().unwrap_or(0) + 1,
            WireFormat::Json => self.filter.page().unwrap_or(1).max(1) + 1,
        }
    }

    /// Turns the walk into a stream of pages. The stream ends after the last page or right
    /// after yielding an error.
    pub fn into_stream(self) -> impl Stream<Item = Result<ResultSet, QueryError>> + 'a
    where
        T: 'a,
    {
        stream::unfold(self, |mut pager| async move {
            match pager.next_page().await {
                Ok(Some(page)) => Some((Ok(page), pager)),
                Ok(None) => None,
                Err(error) => Some((Err(error), pager)),
            }
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::imageboards::client::test::{e621, gelbooru, StubTransport};
    use crate::imageboards::error::TransportError;
    use crate::imageboards::filter::{JsonPostFilter, PostFilter, TagFilter};
    use futures::StreamExt;

    fn posts_page(offset: u64, len: u64, total: u64) -> String {
        posts_page_with_root(
            &format!(r#"limit="100" offset="{}" count="{}""#, offset, total),
            offset,
            len,
        )
    }

    fn posts_page_with_root(root_attrs: &str, offset: u64, len: u64) -> String {
        let mut xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><posts {}>"#,
            root_attrs
        );
        for id in offset..offset + len {
            xml.push_str(&format!("<post><id>{}</id><md5>{:032x}</md5></post>", id + 1, id));
        }
        xml.push_str("</posts>");
        xml
    }

    fn posts_filter() -> FilterSpec {
        PostFilter {
            limit: Some(100),
            tags: vec!["landscape".to_string()],
            ..Default::default()
        }
        .into()
    }

    #[tokio::test]
    async fn walks_until_the_total_is_reached() {
        let stub = StubTransport::with_bodies([
            posts_page(0, 100, 250),
            posts_page(100, 100, 250),
            posts_page(200, 50, 250),
        ]);
        let client = BooruClient::with_transport(gelbooru(), &stub);
        let mut pager = client.paginate(posts_filter());

        let mut sizes = Vec::new();
        while let Some(page) = pager.next_page().await.unwrap() {
            sizes.push(page.len());
        }

        assert_eq!(sizes, [100, 100, 50]);
        assert_eq!(pager.state(), PageState::Done);
        assert_eq!(pager.pages_fetched(), 3);

        let urls = stub.urls();
        assert_eq!(urls.len(), 3);
        assert!(!urls[0].contains("pid="));
        assert!(urls[1].contains("&pid=1&"));
        assert!(urls[2].contains("&pid=2&"));
    }

    #[tokio::test]
    async fn page_index_only_moves_forward() {
        let stub = StubTransport::with_bodies([
            posts_page(0, 100, 250),
            posts_page(0, 100, 250),
            posts_page(0, 100, 250),
            String::from(r#"<posts limit="100" offset="0" count="250"></posts>"#),
        ]);
        let client = BooruClient::with_transport(gelbooru(), &stub);
        let mut pager = client.paginate(posts_filter());

        while pager.next_page().await.unwrap().is_some() {}

        let urls = stub.urls();
        assert_eq!(urls.len(), 4);
        assert!(!urls[0].contains("pid="));
        assert!(urls[1].contains("&pid=1&"));
        assert!(urls[2].contains("&pid=2&"));
        assert!(urls[3].contains("&pid=3&"));
        assert_eq!(pager.state(), PageState::Done);
    }

    #[tokio::test]
    async fn root_without_limit_increments_the_page() {
        let stub = StubTransport::with_bodies([
            posts_page_with_root(r#"count="250" offset="0""#, 0, 100),
            posts_page_with_root(r#"count="250" offset="100""#, 100, 100),
            posts_page_with_root(r#"count="250" offset="200""#, 200, 50),
        ]);
        let client = BooruClient::with_transport(gelbooru(), &stub);
        let mut pager = client.paginate(posts_filter());

        let mut sizes = Vec::new();
        while let Some(page) = pager.next_page().await.unwrap() {
            assert_eq!(page.page_info().map(|p| p.limit), Some(0));
            sizes.push(page.len());
        }

        assert_eq!(sizes, [100, 100, 50]);
        assert_eq!(pager.state(), PageState::Done);

        let urls = stub.urls();
        assert_eq!(urls.len(), 3);
        assert!(!urls[0].contains("pid="));
        assert!(urls[1].contains("&pid=1&"));
        assert!(urls[2].contains("&pid=2&"));
    }

    #[tokio::test]
    async fn empty_first_page_ends_the_walk() {
        let stub = StubTransport::with_bodies([r#"{"posts":[]}"#]);
        let client = BooruClient::with_transport(e621(), &stub);
        let mut pager = client.paginate(JsonPostFilter::default().into());

        let page = pager.next_page().await.unwrap().unwrap();
        assert!(page.is_empty());
        assert_eq!(pager.state(), PageState::Done);
        assert!(pager.next_page().await.unwrap().is_none());
        assert_eq!(stub.urls().len(), 1);
    }

    #[tokio::test]
    async fn failure_keeps_earlier_pages() {
        let stub = StubTransport::with_bodies([posts_page(0, 100, 250)]);
        stub.push(Err(TransportError::Other("connection reset".to_string())));
        let client = BooruClient::with_transport(gelbooru(), &stub);
        let mut pager = client.paginate(posts_filter());

        let first = pager.next_page().await.unwrap().unwrap();
        assert_eq!(first.len(), 100);
        assert_eq!(pager.state(), PageState::HasMore);

        let err = pager.next_page().await.unwrap_err();
        assert!(matches!(err, QueryError::TransportFailure(_)));
        assert_eq!(pager.state(), PageState::Failed);

        assert!(pager.next_page().await.unwrap().is_none());
        assert_eq!(stub.urls().len(), 2);
        assert_eq!(pager.pages_fetched(), 1);
    }

    #[tokio::test]
    async fn invalid_filter_fails_without_a_request() {
        let stub = StubTransport::default();
        let client = BooruClient::with_transport(gelbooru(), &stub);
        let mut pager = client.paginate(
            PostFilter {
                limit: Some(101),
                ..Default::default()
            }
            .into(),
        );

        let err = pager.next_page().await.unwrap_err();
        assert!(matches!(err, QueryError::InvalidFilter { field: "limit", .. }));
        assert_eq!(pager.state(), PageState::Failed);
        assert!(stub.urls().is_empty());
    }

    #[tokio::test]
    async fn unsupported_search_fails_without_a_request() {
        let stub = StubTransport::default();
        let client = BooruClient::with_transport(e621(), &stub);
        let mut pager = client.paginate(posts_filter());

        let err = pager.next_page().await.unwrap_err();
        assert!(matches!(err, QueryError::UnsupportedSearch { .. }));
        assert!(stub.urls().is_empty());
    }

    #[tokio::test]
    async fn json_pages_start_at_one() {
        let stub = StubTransport::with_bodies([
            include_str!("../../assets/sample_responses/e621_posts.json"),
            r#"{"posts":[]}"#,
        ]);
        let client = BooruClient::with_transport(e621(), &stub);
        let pager = client.paginate(
            JsonPostFilter {
                limit: Some(2),
                ..Default::default()
            }
            .into(),
        );

        let pages: Vec<_> = pager.into_stream().collect().await;
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].as_ref().unwrap().len(), 2);
        assert!(pages[1].as_ref().unwrap().is_empty());

        assert_eq!(
            stub.urls(),
            [
                "https://e621.net/posts.json?limit=2",
                "https://e621.net/posts.json?page=2&limit=2",
            ]
        );
    }

    #[tokio::test]
    async fn tag_searches_are_single_shot() {
        let stub = StubTransport::with_bodies([include_str!(
            "../../assets/sample_responses/tags.xml"
        )]);
        let client = BooruClient::with_transport(gelbooru(), &stub);
        let mut pager = client.paginate(TagFilter::default().into());

        assert_eq!(pager.next_page().await.unwrap().unwrap().len(), 3);
        assert_eq!(pager.state(), PageState::Done);
        assert!(pager.next_page().await.unwrap().is_none());
        assert_eq!(stub.urls().len(), 1);
    }

    #[tokio::test]
    async fn stream_stops_after_an_error() {
        let stub = StubTransport::default();
        stub.push(Err(TransportError::Other("boom".to_string())));
        let client = BooruClient::with_transport(gelbooru(), &stub);

        let pages: Vec<_> = client.paginate(posts_filter()).into_stream().collect().await;
        assert_eq!(pages.len(), 1);
        assert!(pages[0].is_err());
    }
}
