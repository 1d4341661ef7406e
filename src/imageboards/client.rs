//! Search client for a single configured server
//!
//! A [`BooruClient`] ties together the pieces of a search: it resolves the endpoint of the
//! configured [`ServerConfig`], builds the request URL, hands it to its [`Transport`] and picks
//! the [`Decoder`](crate::Decoder) matching the search kind.
use crate::config::ServerConfig;
use crate::imageboards::auth::AuthToken;
use crate::imageboards::decoder::decoder_for;
use crate::imageboards::entry::ResultSet;
use crate::imageboards::error::QueryError;
use crate::imageboards::filter::{
    CommentFilter, FilterSpec, JsonPostFilter, PostFilter, TagFilter, UserFilter,
};
use crate::imageboards::paginator::Paginator;
use crate::imageboards::query::build_query;
use crate::imageboards::transport::{HttpTransport, Transport};
use log::debug;
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct BooruClient<T: Transport = HttpTransport> {
    server: ServerConfig,
    auth: Option<AuthToken>,
    transport: T,
}

impl BooruClient<HttpTransport> {
    /// Creates a client for `server` that talks HTTP with the server's own User-Agent.
    pub fn new(server: ServerConfig) -> Result<Self, QueryError> {
        let transport = HttpTransport::new(&server.user_agent)?;
        debug!("Using User-Agent: {}", server.user_agent);
        Ok(Self::with_transport(server, transport))
    }
}

impl<T: Transport> BooruClient<T> {
    pub const fn with_transport(server: ServerConfig, transport: T) -> Self {
        Self {
            server,
            auth: None,
            transport,
        }
    }

    /// Attaches credentials to every request made from now on.
    #[must_use]
    pub fn with_auth(mut self, auth: Option<AuthToken>) -> Self {
        if auth.is_some() {
            debug!("Authenticating requests to {}", self.server.pretty_name);
        }
        self.auth = auth;
        self
    }

    #[inline]
    pub const fn server(&self) -> &ServerConfig {
        &self.server
    }

    #[inline]
    pub const fn auth(&self) -> Option<&AuthToken> {
        self.auth.as_ref()
    }

    #[inline]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Full request URL for `filter` on this server, credentials included.
    ///
    /// # Errors
    /// [`QueryError::UnsupportedSearch`] if the server has no endpoint for the search kind,
    /// [`QueryError::InvalidFilter`] if the filter breaks a server limit.
    pub fn build_query(&self, filter: &FilterSpec) -> Result<String, QueryError> {
        let kind = filter.kind();
        let prefix = self
            .server
            .endpoint(kind)
            .ok_or_else(|| QueryError::UnsupportedSearch {
                server: self.server.name.clone(),
                kind,
            })?;

        build_query(prefix, filter, self.auth.as_ref())
    }

    /// Runs a single search and decodes the answer.
    ///
    /// Nothing is sent when the query can't be built.
    pub async fn search(&self, filter: &FilterSpec) -> Result<ResultSet, QueryError> {
        let url = self.build_query(filter)?;

        let start = Instant::now();
        let body = self.transport.get(&url).await?;
        debug!(
            "Fetched {} bytes in {}ms",
            body.len(),
            start.elapsed().as_millis()
        );

        let results = decoder_for(filter.kind()).decode(filter.kind(), &body)?;
        debug!("{} returned {} entries", filter.kind(), results.len());

        Ok(results)
    }

    /// Walks every page of `filter`, starting from the page the filter is set to.
    pub fn paginate(&self, filter: FilterSpec) -> Paginator<'_, T> {
        Paginator::new(self, filter)
    }

    pub async fn search_posts(&self, filter: PostFilter) -> Result<ResultSet, QueryError> {
        self.search(&filter.into()).await
    }

    pub async fn search_tags(&self, filter: TagFilter) -> Result<ResultSet, QueryError> {
        self.search(&filter.into()).await
    }

    pub async fn search_users(&self, filter: UserFilter) -> Result<ResultSet, QueryError> {
        self.search(&filter.into()).await
    }

    pub async fn search_comments(&self, filter: CommentFilter) -> Result<ResultSet, QueryError> {
        self.search(&filter.into()).await
    }

    pub async fn search_json_posts(
        &self,
        filter: JsonPostFilter,
    ) -> Result<ResultSet, QueryError> {
        self.search(&filter.into()).await
    }
}
